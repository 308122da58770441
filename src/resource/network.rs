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
//! # Networking resources
use derive_builder::Builder;

use crate::error::BuilderError;
use crate::hcl::{Block, Expression};
use crate::resource::{ResourceSpec, Timeouts};

/// `openstack_networking_router_v2`.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct RouterSpec {
    /// Resource label.
    pub label: String,

    #[builder(default)]
    pub name: Option<Expression>,

    #[builder(default)]
    pub description: Option<Expression>,

    #[builder(default)]
    pub admin_state_up: Option<Expression>,

    #[builder(default)]
    pub distributed: Option<Expression>,

    /// External gateway network.
    #[builder(default)]
    pub external_network_id: Option<Expression>,

    #[builder(default)]
    pub enable_snat: Option<Expression>,

    /// Explicit IPs on the external network.
    #[builder(default)]
    pub external_fixed_ips: Vec<ExternalFixedIp>,

    #[builder(default)]
    pub vendor_options: Option<VendorOptions>,

    #[builder(default)]
    pub timeouts: Option<Timeouts>,
}

/// `external_fixed_ip` block of a router.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExternalFixedIp {
    pub subnet_id: Option<Expression>,
    pub ip_address: Option<Expression>,
}

impl ExternalFixedIp {
    /// Any address of the subnet.
    pub fn subnet<S: Into<Expression>>(subnet_id: S) -> Self {
        Self {
            subnet_id: Some(subnet_id.into()),
            ip_address: None,
        }
    }
}

/// `vendor_options` block of a router.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VendorOptions {
    /// Set the gateway in a separate call after the router is created.
    pub set_router_gateway_after_create: bool,
}

impl From<RouterSpec> for ResourceSpec {
    fn from(value: RouterSpec) -> Self {
        let mut spec = ResourceSpec::new("openstack_networking_router_v2", value.label)
            .attr_opt("name", value.name)
            .attr_opt("description", value.description)
            .attr_opt("admin_state_up", value.admin_state_up)
            .attr_opt("distributed", value.distributed)
            .attr_opt("external_network_id", value.external_network_id)
            .attr_opt("enable_snat", value.enable_snat);
        for fixed_ip in value.external_fixed_ips {
            spec = spec.block(
                Block::new("external_fixed_ip")
                    .attr_opt("subnet_id", fixed_ip.subnet_id)
                    .attr_opt("ip_address", fixed_ip.ip_address),
            );
        }
        if let Some(opts) = value.vendor_options {
            spec = spec.block(Block::new("vendor_options").attr(
                "set_router_gateway_after_create",
                opts.set_router_gateway_after_create,
            ));
        }
        if let Some(timeouts) = value.timeouts {
            spec = spec.block(timeouts.into());
        }
        spec
    }
}

/// `openstack_networking_router_interface_v2`.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct RouterInterfaceSpec {
    pub label: String,

    pub router_id: Expression,

    pub subnet_id: Expression,
}

impl From<RouterInterfaceSpec> for ResourceSpec {
    fn from(value: RouterInterfaceSpec) -> Self {
        ResourceSpec::new("openstack_networking_router_interface_v2", value.label)
            .attr("router_id", value.router_id)
            .attr("subnet_id", value.subnet_id)
    }
}

/// `openstack_networking_network_v2`.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct NetworkSpec {
    pub label: String,

    #[builder(default)]
    pub name: Option<Expression>,

    #[builder(default)]
    pub admin_state_up: Option<Expression>,
}

impl From<NetworkSpec> for ResourceSpec {
    fn from(value: NetworkSpec) -> Self {
        ResourceSpec::new("openstack_networking_network_v2", value.label)
            .attr_opt("name", value.name)
            .attr_opt("admin_state_up", value.admin_state_up)
    }
}

/// `openstack_networking_subnet_v2`.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct SubnetSpec {
    pub label: String,

    #[builder(default)]
    pub name: Option<Expression>,

    pub network_id: Expression,

    pub cidr: Expression,

    #[builder(default)]
    pub ip_version: Option<Expression>,
}

impl From<SubnetSpec> for ResourceSpec {
    fn from(value: SubnetSpec) -> Self {
        ResourceSpec::new("openstack_networking_subnet_v2", value.label)
            .attr_opt("name", value.name)
            .attr("network_id", value.network_id)
            .attr("cidr", value.cidr)
            .attr_opt("ip_version", value.ip_version)
    }
}

/// `openstack_networking_floatingip_v2`.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct FloatingIpSpec {
    pub label: String,

    /// Name of the external network to allocate from.
    #[builder(default)]
    pub pool: Option<Expression>,

    #[builder(default)]
    pub description: Option<Expression>,
}

impl From<FloatingIpSpec> for ResourceSpec {
    fn from(value: FloatingIpSpec) -> Self {
        ResourceSpec::new("openstack_networking_floatingip_v2", value.label)
            .attr_opt("pool", value.pool)
            .attr_opt("description", value.description)
    }
}
