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
//! # Router scenarios
//!
//! Creation, in-place update and external gateway handling of
//! `openstack_networking_router_v2`.
use crate::config::EnvironmentSection;
use crate::error::LifecycleError;
use crate::harness::{TestCase, TestCaseBuilder, TestStepBuilder};
use crate::precheck::Precondition;
use crate::resource::network::{ExternalFixedIp, RouterSpecBuilder, VendorOptions};
use crate::resource::{ResourceSpec, Timeouts};
use crate::verifier::{Check, Predicate};

pub const BASIC: &str = "router_basic";
pub const UPDATE_EXTERNAL_GATEWAY: &str = "router_update_external_gateway";
pub const VENDOR_OPTS: &str = "router_vendor_opts";
pub const VENDOR_OPTS_NO_SNAT: &str = "router_vendor_opts_no_snat";
pub const EXT_FIXED_IPS: &str = "router_ext_fixed_ips";

const PRECONDITIONS: &[Precondition] = &[Precondition::Acceptance, Precondition::RequiredEnv];
const ADMIN_PRECONDITIONS: &[Precondition] = &[
    Precondition::Acceptance,
    Precondition::RequiredEnv,
    Precondition::AdminOnly,
];

fn timeouts() -> Timeouts {
    Timeouts::create_delete("5m", "5m")
}

fn ext_gw(env: &EnvironmentSection) -> String {
    env.ext_gw_id.clone().unwrap_or_default()
}

/// Router with a description, renamed and stripped of the description in
/// place.
pub fn basic(_env: &EnvironmentSection) -> Result<TestCase, LifecycleError> {
    let created: ResourceSpec = RouterSpecBuilder::default()
        .label("router_1")
        .name("router_1")
        .description("router description")
        .admin_state_up(true)
        .timeouts(timeouts())
        .build()?
        .into();
    let renamed: ResourceSpec = RouterSpecBuilder::default()
        .label("router_1")
        .name("router_2")
        .admin_state_up(true)
        .timeouts(timeouts())
        .build()?
        .into();
    let address = created.address();

    Ok(TestCaseBuilder::default()
        .name(BASIC)
        .preconditions(PRECONDITIONS.to_vec())
        .steps(vec![
            TestStepBuilder::default()
                .resources(vec![created])
                .checks(vec![
                    Check::exists(
                        &address,
                        vec![
                            Predicate::equals("name", "router_1"),
                            Predicate::equals("description", "router description"),
                            Predicate::equals("admin_state_up", "true"),
                        ],
                    ),
                    Check::attr(
                        &address,
                        vec![Predicate::equals("description", "router description")],
                    ),
                ])
                .build()?,
            TestStepBuilder::default()
                .resources(vec![renamed])
                .checks(vec![Check::attr(
                    &address,
                    vec![
                        Predicate::equals("name", "router_2"),
                        Predicate::equals("description", ""),
                    ],
                )])
                .build()?,
        ])
        .build()?)
}

/// Router without a gateway which gets one in the second step.
pub fn update_external_gateway(env: &EnvironmentSection) -> Result<TestCase, LifecycleError> {
    let ext_gw = ext_gw(env);
    let plain: ResourceSpec = RouterSpecBuilder::default()
        .label("router_1")
        .name("router")
        .admin_state_up(true)
        .build()?
        .into();
    let with_gateway: ResourceSpec = RouterSpecBuilder::default()
        .label("router_1")
        .name("router")
        .admin_state_up(true)
        .external_network_id(ext_gw.as_str())
        .build()?
        .into();
    let address = plain.address();

    Ok(TestCaseBuilder::default()
        .name(UPDATE_EXTERNAL_GATEWAY)
        .preconditions(PRECONDITIONS.to_vec())
        .steps(vec![
            TestStepBuilder::default()
                .resources(vec![plain])
                .checks(vec![Check::exists(
                    &address,
                    vec![Predicate::absent("external_gateway_info.network_id")],
                )])
                .build()?,
            TestStepBuilder::default()
                .resources(vec![with_gateway])
                .checks(vec![
                    Check::attr(
                        &address,
                        vec![Predicate::equals("external_network_id", ext_gw.as_str())],
                    ),
                    Check::exists(
                        &address,
                        vec![Predicate::equals(
                            "external_gateway_info.network_id",
                            ext_gw.as_str(),
                        )],
                    ),
                ])
                .build()?,
        ])
        .build()?)
}

fn vendor_router(env: &EnvironmentSection, no_snat: bool) -> Result<ResourceSpec, LifecycleError> {
    let mut builder = RouterSpecBuilder::default();
    builder
        .label("router_1")
        .name("router_1")
        .admin_state_up(true)
        .external_network_id(ext_gw(env))
        .vendor_options(VendorOptions {
            set_router_gateway_after_create: true,
        });
    if no_snat {
        builder.distributed(false).enable_snat(false);
    }
    Ok(builder.build()?.into())
}

/// Gateway set in a separate call after the creation.
pub fn vendor_opts(env: &EnvironmentSection) -> Result<TestCase, LifecycleError> {
    let router = vendor_router(env, false)?;
    let address = router.address();
    Ok(TestCaseBuilder::default()
        .name(VENDOR_OPTS)
        .preconditions(PRECONDITIONS.to_vec())
        .steps(vec![
            TestStepBuilder::default()
                .resources(vec![router])
                .checks(vec![
                    Check::exists(
                        &address,
                        vec![Predicate::equals("external_gateway_info.network_id", ext_gw(env))],
                    ),
                    Check::attr(&address, vec![Predicate::equals("external_network_id", ext_gw(env))]),
                ])
                .build()?,
        ])
        .build()?)
}

/// Centralized router with SNAT disabled, which only an admin may set.
pub fn vendor_opts_no_snat(env: &EnvironmentSection) -> Result<TestCase, LifecycleError> {
    let router = vendor_router(env, true)?;
    let address = router.address();
    Ok(TestCaseBuilder::default()
        .name(VENDOR_OPTS_NO_SNAT)
        .preconditions(ADMIN_PRECONDITIONS.to_vec())
        .steps(vec![
            TestStepBuilder::default()
                .resources(vec![router])
                .checks(vec![
                    Check::exists(
                        &address,
                        vec![
                            Predicate::equals("external_gateway_info.network_id", ext_gw(env)),
                            Predicate::equals("external_gateway_info.enable_snat", "false"),
                        ],
                    ),
                    Check::attr(
                        &address,
                        vec![
                            Predicate::equals("external_network_id", ext_gw(env)),
                            Predicate::equals("enable_snat", "false"),
                        ],
                    ),
                ])
                .build()?,
        ])
        .build()?)
}

/// Second router taking two addresses of the subnet the first router's
/// gateway landed on.
pub fn ext_fixed_ips(env: &EnvironmentSection) -> Result<TestCase, LifecycleError> {
    let first: ResourceSpec = RouterSpecBuilder::default()
        .label("router_1")
        .name("router_1")
        .admin_state_up(true)
        .external_network_id(ext_gw(env))
        .timeouts(timeouts())
        .build()?
        .into();
    let subnet = first.reference("external_fixed_ip.0.subnet_id")?;
    let second: ResourceSpec = RouterSpecBuilder::default()
        .label("router_2")
        .name("router_2")
        .admin_state_up(true)
        .external_network_id(ext_gw(env))
        .external_fixed_ips(vec![
            ExternalFixedIp::subnet(subnet.clone()),
            ExternalFixedIp::subnet(subnet),
        ])
        .timeouts(timeouts())
        .build()?
        .into();
    let address = second.address();

    Ok(TestCaseBuilder::default()
        .name(EXT_FIXED_IPS)
        .preconditions(ADMIN_PRECONDITIONS.to_vec())
        .steps(vec![
            TestStepBuilder::default()
                .resources(vec![first, second])
                .checks(vec![Check::attr(
                    &address,
                    vec![
                        Predicate::equals("name", "router_2"),
                        Predicate::equals("external_fixed_ip.#", "2"),
                        Predicate::equals("enable_snat", "true"),
                    ],
                )])
                .build()?,
        ])
        .build()?)
}
