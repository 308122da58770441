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
//! # Error
//!
//! Errors that terminate a test case.
use thiserror::Error;

use crate::cloud::CloudError;
use crate::driver::DriverError;
use crate::hcl::HclError;
use crate::precheck::Precondition;
use crate::verifier::import::Difference;

pub use openstack_acctest_api_types::error::BuilderError;

/// Lifecycle error.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The Terraform CLI failed or timed out.
    #[error("provisioning failed: {}", source)]
    Provisioning {
        /// The source of the error.
        #[from]
        source: DriverError,
    },

    /// Re-applying the configuration would replace a resource.
    #[error("{resource_type} {address} (id: {id}) would be replaced")]
    ReplacementRequired {
        resource_type: String,
        address: String,
        id: String,
    },

    /// The resource does not exist in the cloud.
    #[error("{resource_type} {id} not found")]
    NotFound { resource_type: String, id: String },

    /// Attribute predicate failed.
    #[error(
        "{resource_type} {id}: attribute `{key}` expected `{expected}`, got `{observed}`"
    )]
    AttributeMismatch {
        resource_type: String,
        id: String,
        key: String,
        expected: String,
        observed: String,
    },

    /// The imported resource differs from the applied one.
    #[error(
        "imported {resource_type} {id} differs from the applied state: {}",
        differences.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
    )]
    ImportMismatch {
        resource_type: String,
        id: String,
        differences: Vec<Difference>,
    },

    /// Environment precondition of the case is not met.
    #[error("precondition `{precondition}` not met: {reason}")]
    PreconditionFailed {
        precondition: Precondition,
        reason: String,
    },

    /// The resource is still present after the destroy.
    #[error("{resource_type} {id} still exists")]
    StillExists { resource_type: String, id: String },

    /// The address is not present in the Terraform state.
    #[error("Not found: {address}")]
    MissingResource { address: String },

    /// The resource in the Terraform state has no ID.
    #[error("No ID is set: {address}")]
    MissingId { address: String },

    /// The API lookup failed for reasons other than absence.
    #[error("lookup of {resource_type} {id} failed: {}", source)]
    Lookup {
        resource_type: String,
        id: String,
        /// The source of the error.
        #[source]
        source: CloudError,
    },

    /// No lookup is registered for the resource type.
    #[error("resource type {0} has no registered lookup")]
    UnknownResourceType(String),

    /// The test case definition is invalid.
    #[error("invalid test case: {}", source)]
    InvalidCase {
        /// The source of the error.
        #[from]
        source: validator::ValidationErrors,
    },

    #[error(transparent)]
    Builder {
        #[from]
        source: BuilderError,
    },

    /// The configuration could not be rendered.
    #[error(transparent)]
    Render {
        /// The source of the error.
        #[from]
        source: HclError,
    },

    /// A step which needs a configuration does not carry one.
    #[error("step {0} has no configuration")]
    MissingConfig(usize),
}

impl LifecycleError {
    /// Whether the error should be reported as a skip instead of a failure.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::PreconditionFailed { precondition, .. } if !precondition.is_fatal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_resource() {
        let err = LifecycleError::AttributeMismatch {
            resource_type: "openstack_networking_router_v2".into(),
            id: "r1".into(),
            key: "description".into(),
            expected: "router description".into(),
            observed: "".into(),
        };
        assert_eq!(
            "openstack_networking_router_v2 r1: attribute `description` expected `router description`, got ``",
            err.to_string()
        );
        assert_eq!(
            "Not found: openstack_networking_router_v2.router_1",
            LifecycleError::MissingResource {
                address: "openstack_networking_router_v2.router_1".into()
            }
            .to_string()
        );
    }

    #[test]
    fn test_is_skip() {
        assert!(
            LifecycleError::PreconditionFailed {
                precondition: Precondition::AdminOnly,
                reason: "not admin".into()
            }
            .is_skip()
        );
        assert!(
            !LifecycleError::PreconditionFailed {
                precondition: Precondition::RequiredEnv,
                reason: "OS_POOL_NAME".into()
            }
            .is_skip()
        );
        assert!(!LifecycleError::MissingConfig(1).is_skip());
    }
}
