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
//! # VPN (VPNaaS v2) API types
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::BuilderError;

/// IPsec site connection.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct SiteConnection {
    pub id: String,

    #[builder(default)]
    #[serde(default)]
    pub name: String,

    #[builder(default)]
    #[serde(default)]
    pub description: String,

    /// The peer gateway public IPv4 or IPv6 address or FQDN.
    pub peer_address: String,

    /// The peer router identity for authentication.
    #[builder(default)]
    #[serde(default)]
    pub peer_id: String,

    /// Unique list of valid peer private CIDRs (legacy mode).
    #[builder(default)]
    #[serde(default)]
    pub peer_cidrs: Vec<String>,

    /// The ID of the endpoint group with the local subnets.
    #[builder(default)]
    #[serde(default)]
    pub local_ep_group_id: Option<String>,

    /// The ID of the endpoint group with the peer CIDRs.
    #[builder(default)]
    #[serde(default)]
    pub peer_ep_group_id: Option<String>,

    pub ikepolicy_id: String,

    pub ipsecpolicy_id: String,

    pub vpnservice_id: String,

    #[builder(default = "true")]
    #[serde(default = "crate::default_true")]
    pub admin_state_up: bool,

    /// Connection status (`ACTIVE`, `DOWN`, `PENDING_DELETE`, ...).
    #[builder(default)]
    #[serde(default)]
    pub status: String,

    #[builder(default)]
    #[serde(default)]
    pub mtu: Option<u32>,

    /// `bi-directional` or `response-only`.
    #[builder(default)]
    #[serde(default)]
    pub initiator: Option<String>,

    /// Dead peer detection settings.
    #[builder(default)]
    #[serde(default)]
    pub dpd: Option<DeadPeerDetection>,

    #[builder(default)]
    #[serde(default)]
    pub tenant_id: String,
}

/// Dead peer detection protocol settings.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct DeadPeerDetection {
    pub action: String,
    pub interval: u32,
    pub timeout: u32,
}
