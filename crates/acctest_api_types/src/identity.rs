// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0
//! # Identity API types
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::BuilderError;

/// Identity v3 project.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Project {
    /// The project ID.
    pub id: String,

    /// The project name.
    pub name: String,

    /// The description of the project.
    #[builder(default)]
    #[serde(default)]
    pub description: Option<String>,

    /// The project domain_id.
    pub domain_id: String,

    /// If set to true, project is enabled.
    #[builder(default = "true")]
    #[serde(default = "crate::default_true")]
    pub enabled: bool,

    /// Whether the project also acts as a domain.
    #[builder(default)]
    #[serde(default)]
    pub is_domain: bool,

    /// The ID of the parent for the project.
    #[builder(default)]
    #[serde(default)]
    pub parent_id: Option<String>,

    /// Project tags.
    #[builder(default)]
    #[serde(default)]
    pub tags: Vec<String>,
}
