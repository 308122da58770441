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
//! # Firewall (FWaaS v1) API types
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::BuilderError;

/// Firewall policy.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct FirewallPolicy {
    pub id: String,

    #[builder(default)]
    #[serde(default)]
    pub name: String,

    #[builder(default)]
    #[serde(default)]
    pub description: String,

    /// Ordered list of the firewall rule IDs.
    #[builder(default)]
    #[serde(default)]
    pub firewall_rules: Vec<String>,

    #[builder(default)]
    #[serde(default)]
    pub audited: bool,

    #[builder(default)]
    #[serde(default)]
    pub shared: bool,

    #[builder(default)]
    #[serde(default)]
    pub tenant_id: String,
}
