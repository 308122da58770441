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

//! # OpenStack acceptance test API types
//!
//! This crate defines the subset of the OpenStack REST payloads that the
//! acceptance test verifiers read: Keystone v3 password authentication with
//! the service catalog, and the resources whose lifecycle is verified
//! (compute flavors, firewall policies, identity projects, floating IPs,
//! routers and VPN site connections).

pub mod auth;
pub mod catalog;
pub mod compute;
pub mod error;
pub mod fwaas;
pub mod identity;
pub mod network;
pub mod scope;
pub mod vpnaas;

/// Return `true` to be used as a positive default for the serde macros.
pub fn default_true() -> bool {
    true
}
