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
//! # Resources
//!
//! Following concepts are covered:
//!
//! ## ResourceSpec
//!
//! The declarative definition of a single Terraform resource: its versioned
//! type, its label and an ordered body of attributes and nested blocks. The
//! typed builders of the submodules produce the specs of the supported
//! resource types. A spec is immutable once it is placed into the
//! configuration of a step.
//!
//! ## LiveResource
//!
//! The object returned by the OpenStack API for a created resource, keyed by
//! the opaque ID the cloud assigned to it.
//!
//! ## ResourceKind
//!
//! The lookup descriptor of a Terraform resource type, see [`kind`].
use serde_json::Value;

pub mod compute;
pub mod fwaas;
pub mod identity;
pub mod kind;
pub mod network;
pub mod vpnaas;

use crate::hcl::{Block, Expression, HclError, Traversal};
use crate::state::Attributes;
use crate::verifier::Predicate;

pub use kind::{Lookupable, ResourceKind, kind_for, kinds};

/// Declarative definition of a single resource.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceSpec {
    resource_type: String,
    label: String,
    block: Block,
}

impl ResourceSpec {
    pub fn new<T: Into<String>, L: Into<String>>(resource_type: T, label: L) -> Self {
        let resource_type = resource_type.into();
        let label = label.into();
        Self {
            block: Block::resource(&resource_type, &label),
            resource_type,
            label,
        }
    }

    /// Append an attribute.
    pub fn attr<K: Into<String>, V: Into<Expression>>(mut self, key: K, value: V) -> Self {
        self.block = self.block.attr(key, value);
        self
    }

    /// Append an attribute when the value is set.
    pub fn attr_opt<K: Into<String>, V: Into<Expression>>(mut self, key: K, value: Option<V>) -> Self {
        self.block = self.block.attr_opt(key, value);
        self
    }

    /// Append a nested block.
    pub fn block(mut self, block: Block) -> Self {
        self.block = self.block.block(block);
        self
    }

    /// Explicit dependencies on other resources.
    pub fn depends_on(self, resources: &[&ResourceSpec]) -> Self {
        let deps: Vec<Expression> = resources
            .iter()
            .map(|res| Traversal::new(&res.resource_type).attr(&res.label).into())
            .collect();
        self.attr("depends_on", deps)
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Resource address, e.g. `openstack_networking_router_v2.router_1`.
    pub fn address(&self) -> String {
        format!("{}.{}", self.resource_type, self.label)
    }

    /// Reference to the `id` of the resource.
    pub fn id(&self) -> Traversal {
        Traversal::new(&self.resource_type)
            .attr(&self.label)
            .attr("id")
    }

    /// Reference to an attribute in the dotted notation, e.g.
    /// `external_fixed_ip.0.subnet_id`.
    pub fn reference(&self, attribute: &str) -> Result<Traversal, HclError> {
        Traversal::parse(&format!("{}.{attribute}", self.address()))
    }

    /// Exact match predicates of all the literal top level attributes.
    pub fn predicates(&self) -> Vec<Predicate> {
        self.block
            .body()
            .attributes()
            .filter_map(|attr| {
                attr.value
                    .as_literal()
                    .map(|value| Predicate::equals(&attr.key, value))
            })
            .collect()
    }

    pub fn to_block(&self) -> Block {
        self.block.clone()
    }
}

impl From<ResourceSpec> for Block {
    fn from(value: ResourceSpec) -> Self {
        value.block
    }
}

/// Operation timeouts of a resource.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeouts {
    pub create: Option<String>,
    pub update: Option<String>,
    pub delete: Option<String>,
}

impl Timeouts {
    /// Create and delete timeouts.
    pub fn create_delete<C: Into<String>, D: Into<String>>(create: C, delete: D) -> Self {
        Self {
            create: Some(create.into()),
            update: None,
            delete: Some(delete.into()),
        }
    }
}

impl From<Timeouts> for Block {
    fn from(value: Timeouts) -> Self {
        Block::new("timeouts")
            .attr_opt("create", value.create)
            .attr_opt("update", value.update)
            .attr_opt("delete", value.delete)
    }
}

/// Resource as returned by the OpenStack API.
#[derive(Clone, Debug, PartialEq)]
pub struct LiveResource {
    kind: &'static ResourceKind,
    id: String,
    value: Value,
    attributes: Attributes,
}

impl LiveResource {
    pub fn new(kind: &'static ResourceKind, value: Value) -> Self {
        let id = value
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let attributes = Attributes::flatten(&value);
        Self {
            kind,
            id,
            value,
            attributes,
        }
    }

    pub fn kind(&self) -> &'static ResourceKind {
        self.kind
    }

    /// ID reported by the API. Empty when the object carries none.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn status(&self) -> Option<&str> {
        self.value.get("status").and_then(Value::as_str)
    }

    /// Whether the resource is being removed.
    pub fn is_terminating(&self) -> bool {
        self.kind.is_terminating(&self.value)
    }

    /// Typed API view of the resource.
    pub fn typed<T: Lookupable>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use openstack_acctest_api_types::network::Router;

    use super::*;
    use crate::hcl::Document;

    fn router() -> ResourceSpec {
        ResourceSpec::new("openstack_networking_router_v2", "router_1")
            .attr("name", "router_1")
            .attr("admin_state_up", true)
            .attr(
                "external_network_id",
                Traversal::parse("data.openstack_networking_network_v2.ext.id").unwrap(),
            )
            .block(Timeouts::create_delete("5m", "5m").into())
    }

    #[test]
    fn test_addressing() {
        let spec = router();
        assert_eq!("openstack_networking_router_v2.router_1", spec.address());
        assert_eq!(
            Traversal::parse("openstack_networking_router_v2.router_1.id").unwrap(),
            spec.id()
        );
        assert_eq!(
            Traversal::parse("openstack_networking_router_v2.router_1.external_fixed_ip.0.subnet_id")
                .unwrap(),
            spec.reference("external_fixed_ip.0.subnet_id").unwrap()
        );
        assert!(spec.reference("bad attr").is_err());
    }

    #[test]
    fn test_predicates_skip_references_and_blocks() {
        let keys: Vec<String> = router()
            .predicates()
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(
            vec![r#"name == "router_1""#, r#"admin_state_up == "true""#],
            keys
        );
    }

    #[test]
    fn test_depends_on() {
        let interface = ResourceSpec::new("openstack_networking_router_interface_v2", "ri_1");
        let rendered = Document::new()
            .block(ResourceSpec::new("openstack_vpnaas_site_connection_v2", "conn_1").depends_on(&[&interface]).into())
            .render()
            .unwrap();
        assert!(rendered.contains("depends_on = [openstack_networking_router_interface_v2.ri_1]"));
    }

    #[test]
    fn test_live_resource() {
        let live = LiveResource::new(
            &kind::ROUTER,
            json!({"id": "r1", "name": "router_1", "status": "ACTIVE", "admin_state_up": true}),
        );
        assert_eq!("r1", live.id());
        assert_eq!(Some("ACTIVE"), live.status());
        assert!(!live.is_terminating());
        assert_eq!(Some("true"), live.attributes().get("admin_state_up"));
        let typed: Router = live.typed().unwrap();
        assert_eq!("router_1", typed.name);
    }
}
