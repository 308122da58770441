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
//! # Registered resource kinds
//!
//! A kind describes how a Terraform resource type is looked up in the
//! OpenStack API. Every verifier is parameterized by a kind, so adding a new
//! resource type to the verification only needs a new entry here.
use serde::de::DeserializeOwned;
use serde_json::Value;

use openstack_acctest_api_types::compute::Flavor;
use openstack_acctest_api_types::fwaas::FirewallPolicy;
use openstack_acctest_api_types::identity::Project;
use openstack_acctest_api_types::network::{FloatingIp, Router};
use openstack_acctest_api_types::vpnaas::SiteConnection;

use crate::cloud::ServiceType;

/// Statuses of resources which are being removed.
pub const TERMINATING_STATUSES: &[&str] = &["PENDING_DELETE", "DELETING", "DELETED", "SOFT_DELETED"];

/// Lookup descriptor of a Terraform resource type.
#[derive(Debug, Eq, PartialEq)]
pub struct ResourceKind {
    /// Versioned Terraform resource type.
    pub resource_type: &'static str,
    /// Service serving the resource.
    pub service: ServiceType,
    /// Path relative to the (versioned) service endpoint with the `{id}`
    /// placeholder.
    pub path_template: &'static str,
    /// Key wrapping the object in the response body.
    pub envelope: &'static str,
}

impl ResourceKind {
    /// Path of the resource with the ID.
    pub fn path(&self, id: &str) -> String {
        self.path_template.replace("{id}", id)
    }

    /// Whether the looked up object is being removed.
    pub fn is_terminating(&self, resource: &Value) -> bool {
        resource
            .get("status")
            .and_then(Value::as_str)
            .is_some_and(|status| {
                TERMINATING_STATUSES
                    .iter()
                    .any(|terminating| terminating.eq_ignore_ascii_case(status))
            })
    }
}

pub static FLAVOR: ResourceKind = ResourceKind {
    resource_type: "openstack_compute_flavor_v2",
    service: ServiceType::Compute,
    path_template: "flavors/{id}",
    envelope: "flavor",
};

pub static FIREWALL_POLICY: ResourceKind = ResourceKind {
    resource_type: "openstack_fw_policy_v1",
    service: ServiceType::Network,
    path_template: "fw/firewall_policies/{id}",
    envelope: "firewall_policy",
};

pub static PROJECT: ResourceKind = ResourceKind {
    resource_type: "openstack_identity_project_v3",
    service: ServiceType::Identity,
    path_template: "projects/{id}",
    envelope: "project",
};

pub static FLOATING_IP: ResourceKind = ResourceKind {
    resource_type: "openstack_networking_floatingip_v2",
    service: ServiceType::Network,
    path_template: "floatingips/{id}",
    envelope: "floatingip",
};

pub static ROUTER: ResourceKind = ResourceKind {
    resource_type: "openstack_networking_router_v2",
    service: ServiceType::Network,
    path_template: "routers/{id}",
    envelope: "router",
};

pub static SITE_CONNECTION: ResourceKind = ResourceKind {
    resource_type: "openstack_vpnaas_site_connection_v2",
    service: ServiceType::Network,
    path_template: "vpn/ipsec-site-connections/{id}",
    envelope: "ipsec_site_connection",
};

static REGISTRY: [&ResourceKind; 6] = [
    &FLAVOR,
    &FIREWALL_POLICY,
    &PROJECT,
    &FLOATING_IP,
    &ROUTER,
    &SITE_CONNECTION,
];

/// All the registered kinds.
pub fn kinds() -> &'static [&'static ResourceKind] {
    &REGISTRY
}

/// Kind registered for the Terraform resource type.
pub fn kind_for(resource_type: &str) -> Option<&'static ResourceKind> {
    REGISTRY
        .iter()
        .copied()
        .find(|kind| kind.resource_type == resource_type)
}

/// Typed API view of a registered kind.
pub trait Lookupable: DeserializeOwned + Send {
    fn kind() -> &'static ResourceKind;
}

impl Lookupable for Flavor {
    fn kind() -> &'static ResourceKind {
        &FLAVOR
    }
}

impl Lookupable for FirewallPolicy {
    fn kind() -> &'static ResourceKind {
        &FIREWALL_POLICY
    }
}

impl Lookupable for Project {
    fn kind() -> &'static ResourceKind {
        &PROJECT
    }
}

impl Lookupable for FloatingIp {
    fn kind() -> &'static ResourceKind {
        &FLOATING_IP
    }
}

impl Lookupable for Router {
    fn kind() -> &'static ResourceKind {
        &ROUTER
    }
}

impl Lookupable for SiteConnection {
    fn kind() -> &'static ResourceKind {
        &SITE_CONNECTION
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_kind_for() {
        assert_eq!(
            Some(&ROUTER),
            kind_for("openstack_networking_router_v2")
        );
        assert_eq!(
            "openstack_vpnaas_site_connection_v2",
            <SiteConnection as Lookupable>::kind().resource_type
        );
        assert!(kind_for("openstack_networking_network_v2").is_none());
        assert_eq!(6, kinds().len());
    }

    #[test]
    fn test_path() {
        assert_eq!("routers/abc", ROUTER.path("abc"));
        assert_eq!(
            "vpn/ipsec-site-connections/c1",
            SITE_CONNECTION.path("c1")
        );
    }

    #[test]
    fn test_is_terminating() {
        assert!(ROUTER.is_terminating(&json!({"id": "r", "status": "PENDING_DELETE"})));
        assert!(FLOATING_IP.is_terminating(&json!({"id": "r", "status": "deleted"})));
        assert!(!ROUTER.is_terminating(&json!({"id": "r", "status": "ACTIVE"})));
        assert!(!FLAVOR.is_terminating(&json!({"id": "f"})));
    }
}
