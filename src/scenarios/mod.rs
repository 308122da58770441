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
//! # Scenario catalog
//!
//! The test cases shipped with the crate. Every scenario is a named
//! constructor, so the cases are built from the environment only when they
//! are about to run.
use crate::config::EnvironmentSection;
use crate::error::LifecycleError;
use crate::harness::TestCase;

pub mod import;
pub mod router;

/// Named constructor of a test case.
#[derive(Clone, Copy, Debug)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    build: fn(&EnvironmentSection) -> Result<TestCase, LifecycleError>,
}

impl Scenario {
    /// Build the case for the environment.
    pub fn build(&self, env: &EnvironmentSection) -> Result<TestCase, LifecycleError> {
        (self.build)(env)
    }
}

static CATALOG: [Scenario; 10] = [
    Scenario {
        name: router::BASIC,
        description: "create a router and rename it in place",
        build: router::basic,
    },
    Scenario {
        name: router::UPDATE_EXTERNAL_GATEWAY,
        description: "attach an external gateway to an existing router",
        build: router::update_external_gateway,
    },
    Scenario {
        name: router::VENDOR_OPTS,
        description: "set the gateway after the router is created",
        build: router::vendor_opts,
    },
    Scenario {
        name: router::VENDOR_OPTS_NO_SNAT,
        description: "centralized router with SNAT disabled",
        build: router::vendor_opts_no_snat,
    },
    Scenario {
        name: router::EXT_FIXED_IPS,
        description: "router with explicit external fixed IPs",
        build: router::ext_fixed_ips,
    },
    Scenario {
        name: import::FLAVOR,
        description: "import a compute flavor",
        build: import::flavor,
    },
    Scenario {
        name: import::FIREWALL_POLICY,
        description: "import a firewall policy with rules",
        build: import::firewall_policy,
    },
    Scenario {
        name: import::PROJECT,
        description: "import an identity project",
        build: import::project,
    },
    Scenario {
        name: import::FLOATING_IP,
        description: "import a floating IP",
        build: import::floating_ip,
    },
    Scenario {
        name: import::SITE_CONNECTION,
        description: "import a VPN site connection",
        build: import::site_connection,
    },
];

/// All the scenarios in their run order.
pub fn catalog() -> &'static [Scenario] {
    &CATALOG
}

/// Scenario with the name.
pub fn find(name: &str) -> Option<&'static Scenario> {
    CATALOG.iter().find(|scenario| scenario.name == name)
}

/// Build all the cases of the catalog.
pub fn all(env: &EnvironmentSection) -> Result<Vec<TestCase>, LifecycleError> {
    CATALOG.iter().map(|scenario| scenario.build(env)).collect()
}
