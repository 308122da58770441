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
//! # Case preconditions
//!
//! Every test case declares what the cloud must offer for the case to be
//! meaningful. The preconditions are evaluated before anything is
//! provisioned. An unmet precondition skips the case, except for the missing
//! required environment which fails it.
use std::fmt;

use crate::cloud::Capabilities;
use crate::config::EnvironmentSection;
use crate::error::LifecycleError;

/// Alias of the VPNaaS networking extension.
const VPNAAS_EXTENSION: &str = "vpnaas";
/// Alias of the FWaaS networking extension.
const FWAAS_EXTENSION: &str = "fwaas";

/// Environment requirement of a test case.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Precondition {
    /// Acceptance tests are enabled (`TF_ACC`).
    Acceptance,
    /// Image, flavor, pool, network and external gateway are configured.
    RequiredEnv,
    /// The user has administrative rights.
    AdminOnly,
    /// VPNaaS is available.
    Vpn,
    /// FWaaS is available.
    Firewall,
}

impl Precondition {
    /// An unmet fatal precondition fails the case instead of skipping it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::RequiredEnv)
    }

    /// Check the precondition. The error carries the reason.
    pub fn check(
        &self,
        env: &EnvironmentSection,
        username: Option<&str>,
        capabilities: &Capabilities,
    ) -> Result<(), String> {
        match self {
            Self::Acceptance => require(env.acceptance(), "TF_ACC must be set for acceptance tests"),
            Self::RequiredEnv => {
                let missing: Vec<&str> = [
                    (
                        "OS_IMAGE_ID or OS_IMAGE_NAME",
                        env.image_id.is_some() || env.image_name.is_some(),
                    ),
                    (
                        "OS_FLAVOR_ID or OS_FLAVOR_NAME",
                        env.flavor_id.is_some() || env.flavor_name.is_some(),
                    ),
                    ("OS_POOL_NAME", env.pool_name.is_some()),
                    ("OS_NETWORK_ID", env.network_id.is_some()),
                    ("OS_EXTGW_ID", env.ext_gw_id.is_some()),
                ]
                .into_iter()
                .filter(|(_, set)| !set)
                .map(|(name, _)| name)
                .collect();
                if missing.is_empty() {
                    Ok(())
                } else {
                    Err(format!("{} must be set", missing.join(", ")))
                }
            }
            Self::AdminOnly => require(
                username == Some("admin") || capabilities.admin,
                "the user is not an admin",
            ),
            Self::Vpn => require(
                env.vpn_environment.is_some() || capabilities.has_network_extension(VPNAAS_EXTENSION),
                "OS_VPN_ENVIRONMENT is not set and VPNaaS is not available",
            ),
            Self::Firewall => require(
                env.fw_environment.is_some() || capabilities.has_network_extension(FWAAS_EXTENSION),
                "OS_FW_ENVIRONMENT is not set and FWaaS is not available",
            ),
        }
    }
}

fn require(condition: bool, reason: &str) -> Result<(), String> {
    if condition {
        Ok(())
    } else {
        Err(reason.to_string())
    }
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Acceptance => "acceptance",
            Self::RequiredEnv => "required environment",
            Self::AdminOnly => "admin only",
            Self::Vpn => "vpnaas",
            Self::Firewall => "fwaas",
        })
    }
}

/// Evaluate the preconditions in order. The first unmet one is returned.
pub fn evaluate(
    preconditions: &[Precondition],
    env: &EnvironmentSection,
    username: Option<&str>,
    capabilities: &Capabilities,
) -> Result<(), LifecycleError> {
    for precondition in preconditions {
        precondition
            .check(env, username, capabilities)
            .map_err(|reason| LifecycleError::PreconditionFailed {
                precondition: *precondition,
                reason,
            })?;
    }
    Ok(())
}
