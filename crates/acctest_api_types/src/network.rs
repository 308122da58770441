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
//! # Networking API types
//!
//! Routers, floating IPs and the extension listing used for capability
//! discovery.
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::BuilderError;

/// Layer-3 router.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Router {
    /// The ID of the router.
    pub id: String,

    /// Human-readable name of the router.
    #[builder(default)]
    #[serde(default)]
    pub name: String,

    /// Human-readable description of the router.
    #[builder(default)]
    #[serde(default)]
    pub description: String,

    /// The administrative state of the router.
    #[builder(default = "true")]
    #[serde(default = "crate::default_true")]
    pub admin_state_up: bool,

    /// The router status (`ACTIVE`, `ERROR`, ...).
    #[builder(default)]
    #[serde(default)]
    pub status: String,

    /// Distributed virtual router flag, only visible to admins.
    #[builder(default)]
    #[serde(default)]
    pub distributed: Option<bool>,

    /// The external gateway information of the router.
    #[builder(default)]
    #[serde(default)]
    pub external_gateway_info: Option<GatewayInfo>,

    /// The ID of the project owning the router.
    #[builder(default)]
    #[serde(default)]
    pub tenant_id: String,
}

/// Router external gateway.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct GatewayInfo {
    /// External network ID.
    pub network_id: String,

    /// Whether SNAT is enabled on the gateway.
    #[builder(default)]
    #[serde(default)]
    pub enable_snat: Option<bool>,

    /// Fixed IPs on the external network.
    #[builder(default)]
    #[serde(default)]
    pub external_fixed_ips: Vec<ExternalFixedIp>,
}

/// Fixed IP of the router gateway.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct ExternalFixedIp {
    #[builder(default)]
    #[serde(default)]
    pub subnet_id: Option<String>,
    #[builder(default)]
    #[serde(default)]
    pub ip_address: Option<String>,
}

/// Floating IP.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct FloatingIp {
    /// The ID of the floating IP address.
    pub id: String,

    /// The ID of the network associated with the floating IP.
    pub floating_network_id: String,

    /// The floating IP address.
    #[builder(default)]
    #[serde(default)]
    pub floating_ip_address: String,

    /// The ID of a port associated with the floating IP.
    #[builder(default)]
    #[serde(default)]
    pub port_id: Option<String>,

    /// The fixed IP address that is associated with the floating IP.
    #[builder(default)]
    #[serde(default)]
    pub fixed_ip_address: Option<String>,

    /// The floating IP status (`ACTIVE`, `DOWN`, `ERROR`).
    #[builder(default)]
    #[serde(default)]
    pub status: String,

    #[builder(default)]
    #[serde(default)]
    pub description: String,

    #[builder(default)]
    #[serde(default)]
    pub tenant_id: String,
}

/// Networking API extension.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Extension {
    /// Extension alias (e.g. `vpnaas`).
    pub alias: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// List of the networking API extensions.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ExtensionList {
    pub extensions: Vec<Extension>,
}
