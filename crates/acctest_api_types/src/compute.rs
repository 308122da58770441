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
//! # Compute API types
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::BuilderError;

/// Compute flavor.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into))]
pub struct Flavor {
    /// The ID of the flavor.
    pub id: String,

    /// The display name of the flavor.
    pub name: String,

    /// The amount of RAM a flavor has, in MiB.
    pub ram: u64,

    /// The number of virtual CPUs that will be allocated to the server.
    pub vcpus: u32,

    /// The size of the root disk that will be created in GiB.
    pub disk: u64,

    /// The size of a dedicated swap disk. Nova reports an empty string when
    /// there is no swap.
    #[builder(default)]
    #[serde(default)]
    pub swap: serde_json::Value,

    /// The receive / transmit factor.
    #[builder(default)]
    #[serde(default)]
    pub rxtx_factor: f64,

    /// Whether the flavor is public.
    #[builder(default)]
    #[serde(rename = "os-flavor-access:is_public", default = "crate::default_true")]
    pub is_public: bool,

    /// The size of the ephemeral disk in GiB.
    #[builder(default)]
    #[serde(rename = "OS-FLV-EXT-DATA:ephemeral", default)]
    pub ephemeral: u64,

    /// Free form description of the flavor.
    #[builder(default)]
    #[serde(default)]
    pub description: Option<String>,
}
