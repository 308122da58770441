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
//! # Acceptance environment
//!
//! Inputs of the test case preconditions. Most of them are only checked for
//! presence.
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, Clone)]
pub struct EnvironmentSection {
    /// Acceptance tests only provision anything when set.
    pub tf_acc: Option<String>,

    pub image_id: Option<String>,

    pub image_name: Option<String>,

    pub flavor_id: Option<String>,

    pub flavor_name: Option<String>,

    /// Floating IP pool.
    pub pool_name: Option<String>,

    pub network_id: Option<String>,

    /// External gateway network.
    pub ext_gw_id: Option<String>,

    /// The cloud supports VPNaaS.
    pub vpn_environment: Option<String>,

    /// The cloud supports FWaaS.
    pub fw_environment: Option<String>,
}

impl EnvironmentSection {
    /// Whether acceptance tests are enabled.
    pub fn acceptance(&self) -> bool {
        self.tf_acc.is_some()
    }
}
