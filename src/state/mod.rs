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
//! # Terraform state
//!
//! The state as reported by `terraform show -json`. Only the managed
//! resources are kept, indexed by their address.
use serde::Deserialize;
use serde_json::{Map, Value};

pub mod attributes;

pub use attributes::Attributes;

#[derive(Deserialize)]
struct ShowOutput {
    #[serde(default)]
    values: Option<StateValues>,
}

#[derive(Deserialize)]
struct StateValues {
    root_module: Module,
}

#[derive(Deserialize)]
struct Module {
    #[serde(default)]
    resources: Vec<RawResource>,
    #[serde(default)]
    child_modules: Vec<Module>,
}

#[derive(Deserialize)]
struct RawResource {
    address: String,
    mode: String,
    #[serde(rename = "type")]
    resource_type: String,
    name: String,
    #[serde(default)]
    values: Map<String, Value>,
}

/// Single resource of the state.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceState {
    /// Resource address, e.g. `openstack_networking_router_v2.router_1`.
    pub address: String,
    /// Terraform resource type.
    pub resource_type: String,
    /// Resource label.
    pub name: String,
    /// Attribute values as reported by the provider.
    pub values: Map<String, Value>,
    attributes: Attributes,
}

impl ResourceState {
    pub fn new<A, T, N>(address: A, resource_type: T, name: N, values: Map<String, Value>) -> Self
    where
        A: Into<String>,
        T: Into<String>,
        N: Into<String>,
    {
        let attributes = Attributes::flatten(&Value::Object(values.clone()));
        Self {
            address: address.into(),
            resource_type: resource_type.into(),
            name: name.into(),
            values,
            attributes,
        }
    }

    /// Resource ID. `None` when unset or empty.
    pub fn id(&self) -> Option<&str> {
        self.values
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// Managed resources of the Terraform state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct State {
    resources: Vec<ResourceState>,
}

impl State {
    /// Parse the `terraform show -json` output.
    pub fn from_json(data: &[u8]) -> Result<Self, serde_json::Error> {
        let output: ShowOutput = serde_json::from_slice(data)?;
        let mut resources = Vec::new();
        if let Some(values) = output.values {
            collect(values.root_module, &mut resources);
        }
        Ok(Self { resources })
    }

    pub fn from_resources(resources: Vec<ResourceState>) -> Self {
        Self { resources }
    }

    pub fn resource(&self, address: &str) -> Option<&ResourceState> {
        self.resources.iter().find(|res| res.address == address)
    }

    pub fn resources(&self) -> impl Iterator<Item = &ResourceState> {
        self.resources.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

fn collect(module: Module, out: &mut Vec<ResourceState>) {
    for res in module.resources {
        if res.mode == "managed" {
            out.push(ResourceState::new(
                res.address,
                res.resource_type,
                res.name,
                res.values,
            ));
        }
    }
    for child in module.child_modules {
        collect(child, out);
    }
}
