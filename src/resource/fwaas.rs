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
//! # Firewall (FWaaS v1) resources
use derive_builder::Builder;

use crate::error::BuilderError;
use crate::hcl::Expression;
use crate::resource::ResourceSpec;

/// `openstack_fw_policy_v1`.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct FirewallPolicySpec {
    pub label: String,

    #[builder(default)]
    pub name: Option<Expression>,

    #[builder(default)]
    pub description: Option<Expression>,

    /// Ordered rule references.
    #[builder(default)]
    pub rules: Vec<Expression>,

    #[builder(default)]
    pub audited: Option<Expression>,

    #[builder(default)]
    pub shared: Option<Expression>,
}

impl From<FirewallPolicySpec> for ResourceSpec {
    fn from(value: FirewallPolicySpec) -> Self {
        let spec = ResourceSpec::new("openstack_fw_policy_v1", value.label)
            .attr_opt("name", value.name)
            .attr_opt("description", value.description);
        let spec = if value.rules.is_empty() {
            spec
        } else {
            spec.attr("rules", value.rules)
        };
        spec.attr_opt("audited", value.audited)
            .attr_opt("shared", value.shared)
    }
}

/// `openstack_fw_rule_v1`.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct FirewallRuleSpec {
    pub label: String,

    #[builder(default)]
    pub name: Option<Expression>,

    #[builder(default)]
    pub description: Option<Expression>,

    /// `tcp`, `udp`, `icmp` or `any`.
    pub protocol: Expression,

    /// `allow` or `deny`.
    pub action: Expression,

    #[builder(default)]
    pub destination_port: Option<Expression>,

    #[builder(default)]
    pub enabled: Option<Expression>,
}

impl From<FirewallRuleSpec> for ResourceSpec {
    fn from(value: FirewallRuleSpec) -> Self {
        ResourceSpec::new("openstack_fw_rule_v1", value.label)
            .attr_opt("name", value.name)
            .attr_opt("description", value.description)
            .attr("protocol", value.protocol)
            .attr("action", value.action)
            .attr_opt("destination_port", value.destination_port)
            .attr_opt("enabled", value.enabled)
    }
}
