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
//! # VPN (VPNaaS v2) resources
//!
//! A site connection needs a VPN service on a router, an IKE and an IPsec
//! policy and, in the endpoint group mode, a local and a peer endpoint
//! group.
use derive_builder::Builder;

use crate::error::BuilderError;
use crate::hcl::Expression;
use crate::resource::ResourceSpec;

/// `openstack_vpnaas_service_v2`.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct VpnServiceSpec {
    pub label: String,

    #[builder(default)]
    pub name: Option<Expression>,

    pub router_id: Expression,

    #[builder(default)]
    pub subnet_id: Option<Expression>,

    #[builder(default)]
    pub admin_state_up: Option<Expression>,
}

impl From<VpnServiceSpec> for ResourceSpec {
    fn from(value: VpnServiceSpec) -> Self {
        ResourceSpec::new("openstack_vpnaas_service_v2", value.label)
            .attr_opt("name", value.name)
            .attr("router_id", value.router_id)
            .attr_opt("subnet_id", value.subnet_id)
            .attr_opt("admin_state_up", value.admin_state_up)
    }
}

/// `openstack_vpnaas_ike_policy_v2`.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct IkePolicySpec {
    pub label: String,

    #[builder(default)]
    pub name: Option<Expression>,
}

impl From<IkePolicySpec> for ResourceSpec {
    fn from(value: IkePolicySpec) -> Self {
        ResourceSpec::new("openstack_vpnaas_ike_policy_v2", value.label).attr_opt("name", value.name)
    }
}

/// `openstack_vpnaas_ipsec_policy_v2`.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct IpsecPolicySpec {
    pub label: String,

    #[builder(default)]
    pub name: Option<Expression>,
}

impl From<IpsecPolicySpec> for ResourceSpec {
    fn from(value: IpsecPolicySpec) -> Self {
        ResourceSpec::new("openstack_vpnaas_ipsec_policy_v2", value.label)
            .attr_opt("name", value.name)
    }
}

/// `openstack_vpnaas_endpoint_group_v2`.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct EndpointGroupSpec {
    pub label: String,

    #[builder(default)]
    pub name: Option<Expression>,

    /// `cidr` or `subnet`.
    pub group_type: Expression,

    pub endpoints: Vec<Expression>,
}

impl From<EndpointGroupSpec> for ResourceSpec {
    fn from(value: EndpointGroupSpec) -> Self {
        ResourceSpec::new("openstack_vpnaas_endpoint_group_v2", value.label)
            .attr_opt("name", value.name)
            .attr("type", value.group_type)
            .attr("endpoints", value.endpoints)
    }
}

/// `openstack_vpnaas_site_connection_v2`.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct SiteConnectionSpec {
    pub label: String,

    #[builder(default)]
    pub name: Option<Expression>,

    pub ikepolicy_id: Expression,

    pub ipsecpolicy_id: Expression,

    pub vpnservice_id: Expression,

    /// Pre-shared key.
    pub psk: Expression,

    pub peer_address: Expression,

    #[builder(default)]
    pub peer_id: Option<Expression>,

    #[builder(default)]
    pub local_ep_group_id: Option<Expression>,

    #[builder(default)]
    pub peer_ep_group_id: Option<Expression>,

    #[builder(default)]
    pub admin_state_up: Option<Expression>,
}

impl From<SiteConnectionSpec> for ResourceSpec {
    fn from(value: SiteConnectionSpec) -> Self {
        ResourceSpec::new("openstack_vpnaas_site_connection_v2", value.label)
            .attr_opt("name", value.name)
            .attr("ikepolicy_id", value.ikepolicy_id)
            .attr("ipsecpolicy_id", value.ipsecpolicy_id)
            .attr("vpnservice_id", value.vpnservice_id)
            .attr("psk", value.psk)
            .attr("peer_address", value.peer_address)
            .attr_opt("peer_id", value.peer_id)
            .attr_opt("local_ep_group_id", value.local_ep_group_id)
            .attr_opt("peer_ep_group_id", value.peer_ep_group_id)
            .attr_opt("admin_state_up", value.admin_state_up)
    }
}
