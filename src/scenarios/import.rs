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
//! # Import scenarios
//!
//! Every case applies a resource, imports it into a fresh state and expects
//! the imported attributes to match the applied ones.
use crate::config::EnvironmentSection;
use crate::error::LifecycleError;
use crate::harness::random::{rand_string, random_with_prefix};
use crate::harness::{ImportStepBuilder, TestCase, TestCaseBuilder, TestStepBuilder};
use crate::hcl::Expression;
use crate::precheck::Precondition;
use crate::resource::ResourceSpec;
use crate::resource::compute::FlavorSpecBuilder;
use crate::resource::fwaas::{FirewallPolicySpecBuilder, FirewallRuleSpecBuilder};
use crate::resource::identity::ProjectSpecBuilder;
use crate::resource::network::{
    FloatingIpSpecBuilder, NetworkSpecBuilder, RouterInterfaceSpecBuilder, RouterSpecBuilder,
    SubnetSpecBuilder,
};
use crate::resource::vpnaas::{
    EndpointGroupSpecBuilder, IkePolicySpecBuilder, IpsecPolicySpecBuilder,
    SiteConnectionSpecBuilder, VpnServiceSpecBuilder,
};
use crate::verifier::{Check, Predicate};

pub const FLAVOR: &str = "import_flavor";
pub const FIREWALL_POLICY: &str = "import_fw_policy";
pub const PROJECT: &str = "import_project";
pub const FLOATING_IP: &str = "import_floating_ip";
pub const SITE_CONNECTION: &str = "import_site_connection";

/// Apply the resources and import the primary one.
fn apply_and_import(
    name: &str,
    preconditions: &[Precondition],
    resources: Vec<ResourceSpec>,
    primary: &ResourceSpec,
    predicates: Vec<Predicate>,
) -> Result<TestCase, LifecycleError> {
    let address = primary.address();
    let apply = TestStepBuilder::default()
        .resources(resources)
        .primary(address.as_str())
        .checks(vec![Check::exists(&address, predicates)])
        .build()?;
    let import = TestStepBuilder::default()
        .import(ImportStepBuilder::default().address(address.as_str()).build()?)
        .build()?;
    Ok(TestCaseBuilder::default()
        .name(name)
        .preconditions(preconditions.to_vec())
        .steps(vec![apply, import])
        .build()?)
}

pub fn flavor(_env: &EnvironmentSection) -> Result<TestCase, LifecycleError> {
    let name = random_with_prefix("tf-acc-flavor");
    let flavor: ResourceSpec = FlavorSpecBuilder::default()
        .label("flavor_1")
        .name(name.as_str())
        .ram(2048u32)
        .vcpus(2u32)
        .disk(5u32)
        .build()?
        .into();
    apply_and_import(
        FLAVOR,
        &[
            Precondition::Acceptance,
            Precondition::RequiredEnv,
            Precondition::AdminOnly,
        ],
        vec![flavor.clone()],
        &flavor,
        flavor.predicates(),
    )
}

/// Policy holding a deny and an allow rule, in this order.
pub fn firewall_policy(_env: &EnvironmentSection) -> Result<TestCase, LifecycleError> {
    let udp_deny: ResourceSpec = FirewallRuleSpecBuilder::default()
        .label("udp_deny")
        .protocol("udp")
        .action("deny")
        .build()?
        .into();
    let tcp_allow: ResourceSpec = FirewallRuleSpecBuilder::default()
        .label("tcp_allow")
        .protocol("tcp")
        .action("allow")
        .build()?
        .into();
    let policy: ResourceSpec = FirewallPolicySpecBuilder::default()
        .label("policy_1")
        .name("policy_1")
        .description("terraform acceptance test")
        .rules(vec![Expression::from(udp_deny.id()), Expression::from(tcp_allow.id())])
        .build()?
        .into();
    apply_and_import(
        FIREWALL_POLICY,
        &[
            Precondition::Acceptance,
            Precondition::RequiredEnv,
            Precondition::Firewall,
        ],
        vec![policy.clone(), tcp_allow, udp_deny],
        &policy,
        [policy.predicates(), vec![Predicate::equals("firewall_rules.#", "2")]].concat(),
    )
}

pub fn project(_env: &EnvironmentSection) -> Result<TestCase, LifecycleError> {
    let name = format!("ACCPTTEST-{}", rand_string(5));
    let project: ResourceSpec = ProjectSpecBuilder::default()
        .label("project_1")
        .name(name.as_str())
        .description("A project")
        .tags(vec!["tag1".to_string(), "tag2".to_string()])
        .build()?
        .into();
    apply_and_import(
        PROJECT,
        &[
            Precondition::Acceptance,
            Precondition::RequiredEnv,
            Precondition::AdminOnly,
        ],
        vec![project.clone()],
        &project,
        [project.predicates(), vec![Predicate::equals("tags.#", "2")]].concat(),
    )
}

/// Floating IP allocated from the configured pool.
pub fn floating_ip(env: &EnvironmentSection) -> Result<TestCase, LifecycleError> {
    let mut builder = FloatingIpSpecBuilder::default();
    builder.label("fip_1");
    if let Some(pool) = &env.pool_name {
        builder.pool(pool);
    }
    let fip: ResourceSpec = builder.build()?.into();
    apply_and_import(
        FLOATING_IP,
        &[Precondition::Acceptance, Precondition::RequiredEnv],
        vec![fip.clone()],
        &fip,
        vec![Predicate::present("floating_ip_address")],
    )
}

/// Site connection in the endpoint group mode with the whole VPN stack
/// around it.
pub fn site_connection(env: &EnvironmentSection) -> Result<TestCase, LifecycleError> {
    let network: ResourceSpec = NetworkSpecBuilder::default()
        .label("network_1")
        .name("tf_test_network")
        .admin_state_up(true)
        .build()?
        .into();
    let subnet: ResourceSpec = SubnetSpecBuilder::default()
        .label("subnet_1")
        .network_id(network.id())
        .cidr("192.168.199.0/24")
        .ip_version(4u32)
        .build()?
        .into();
    let router: ResourceSpec = RouterSpecBuilder::default()
        .label("router_1")
        .name("my_router")
        .external_network_id(env.ext_gw_id.clone().unwrap_or_default())
        .build()?
        .into();
    let interface: ResourceSpec = RouterInterfaceSpecBuilder::default()
        .label("router_interface_1")
        .router_id(router.id())
        .subnet_id(subnet.id())
        .build()?
        .into();
    let service: ResourceSpec = VpnServiceSpecBuilder::default()
        .label("service_1")
        .router_id(router.id())
        .admin_state_up(false)
        .build()?
        .into();
    let ipsec: ResourceSpec = IpsecPolicySpecBuilder::default()
        .label("policy_1")
        .build()?
        .into();
    let ike: ResourceSpec = IkePolicySpecBuilder::default()
        .label("policy_2")
        .build()?
        .into();
    let peer_group: ResourceSpec = EndpointGroupSpecBuilder::default()
        .label("group_1")
        .group_type("cidr")
        .endpoints(vec![
            Expression::from("10.0.0.24/24"),
            Expression::from("10.0.0.25/24"),
        ])
        .build()?
        .into();
    let local_group: ResourceSpec = EndpointGroupSpecBuilder::default()
        .label("group_2")
        .group_type("subnet")
        .endpoints(vec![Expression::from(subnet.id())])
        .build()?
        .into();
    let connection: ResourceSpec = ResourceSpec::from(
        SiteConnectionSpecBuilder::default()
            .label("conn_1")
            .name("connection_1")
            .ikepolicy_id(ike.id())
            .ipsecpolicy_id(ipsec.id())
            .vpnservice_id(service.id())
            .psk("secret")
            .peer_address("192.168.10.1")
            .peer_id("192.168.10.1")
            .local_ep_group_id(local_group.id())
            .peer_ep_group_id(peer_group.id())
            .build()?,
    )
    .depends_on(&[&interface]);

    apply_and_import(
        SITE_CONNECTION,
        &[
            Precondition::Acceptance,
            Precondition::RequiredEnv,
            Precondition::Vpn,
        ],
        vec![
            network,
            subnet,
            router,
            interface,
            service,
            ipsec,
            ike,
            peer_group,
            local_group,
            connection.clone(),
        ],
        &connection,
        vec![
            Predicate::equals("name", "connection_1"),
            Predicate::equals("peer_address", "192.168.10.1"),
        ],
    )
}
