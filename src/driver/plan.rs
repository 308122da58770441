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
//! # Terraform plan
//!
//! The planned resource changes as reported by `terraform show -json` for a
//! saved plan file.
use serde::Deserialize;
use serde_json::Value;

/// Planned action on a resource.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    NoOp,
    Create,
    Read,
    Update,
    Delete,
    Forget,
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize)]
struct RawPlan {
    #[serde(default)]
    resource_changes: Vec<RawChange>,
}

#[derive(Deserialize)]
struct RawChange {
    address: String,
    mode: String,
    #[serde(rename = "type")]
    resource_type: String,
    change: RawChangeBody,
}

#[derive(Deserialize)]
struct RawChangeBody {
    actions: Vec<Action>,
    #[serde(default)]
    before: Option<Value>,
    #[serde(default)]
    after: Option<Value>,
}

/// Planned change of a single managed resource.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceChange {
    pub address: String,
    pub resource_type: String,
    pub actions: Vec<Action>,
    /// Values before the change, `None` for new resources.
    pub before: Option<Value>,
    /// Known values after the change.
    pub after: Option<Value>,
}

impl ResourceChange {
    /// The resource is deleted and created again (in either order).
    pub fn is_replacement(&self) -> bool {
        self.actions.contains(&Action::Delete) && self.actions.contains(&Action::Create)
    }

    /// The resource is updated in place.
    pub fn is_update(&self) -> bool {
        self.actions == [Action::Update]
    }

    /// ID of the resource before the change.
    pub fn before_id(&self) -> Option<&str> {
        self.before
            .as_ref()
            .and_then(|val| val.get("id"))
            .and_then(Value::as_str)
    }
}

/// Planned changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Plan {
    pub resource_changes: Vec<ResourceChange>,
}

impl Plan {
    /// Parse the `terraform show -json <plan>` output.
    pub fn from_json(data: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: RawPlan = serde_json::from_slice(data)?;
        Ok(Self {
            resource_changes: raw
                .resource_changes
                .into_iter()
                .filter(|change| change.mode == "managed")
                .map(|change| ResourceChange {
                    address: change.address,
                    resource_type: change.resource_type,
                    actions: change.change.actions,
                    before: change.change.before,
                    after: change.change.after,
                })
                .collect(),
        })
    }

    /// Changes replacing an existing resource.
    pub fn replacements(&self) -> impl Iterator<Item = &ResourceChange> {
        self.resource_changes
            .iter()
            .filter(|change| change.is_replacement())
    }

    /// Changes updating an existing resource in place.
    pub fn updates(&self) -> impl Iterator<Item = &ResourceChange> {
        self.resource_changes
            .iter()
            .filter(|change| change.is_update())
    }
}
