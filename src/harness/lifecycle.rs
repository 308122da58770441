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
//! # Lifecycle operations
//!
//! Wraps the driver of a test case and enforces the identity rules of the
//! resources: an in-place update keeps the ID and a replacement only happens
//! when the step allows it.
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::driver::LifecycleDriver;
use crate::error::LifecycleError;
use crate::harness::ReplacementPolicy;
use crate::hcl::{Block, Document};
use crate::state::{ResourceState, State};

/// Result of an apply.
#[derive(Clone, Debug)]
pub struct Applied {
    /// ID of the primary resource.
    pub id: Option<String>,
    pub state: State,
}

/// Resource replaced by a re-apply.
#[derive(Clone, Debug, PartialEq)]
pub struct Replacement {
    pub address: String,
    pub resource_type: String,
    pub old_id: String,
    pub new_id: Option<String>,
}

/// Result of a re-apply.
#[derive(Clone, Debug)]
pub struct ReapplyOutcome {
    /// ID of the primary resource.
    pub id: Option<String>,
    pub state: State,
    pub replacements: Vec<Replacement>,
}

/// Resource imported into a fresh state.
#[derive(Clone, Debug)]
pub struct ImportedResource {
    pub resource: ResourceState,
    /// Configuration reconstructed from the imported values.
    pub config: Block,
}

/// Lifecycle of the resources of a single test case.
pub struct Lifecycle {
    driver: Box<dyn LifecycleDriver>,
}

/// ID of the resource at the address, when one is requested.
fn primary_id(state: &State, primary: Option<&str>) -> Result<Option<String>, LifecycleError> {
    let Some(address) = primary else {
        return Ok(None);
    };
    let resource = state
        .resource(address)
        .ok_or_else(|| LifecycleError::MissingResource {
            address: address.into(),
        })?;
    resource
        .id()
        .map(|id| Some(id.to_string()))
        .ok_or_else(|| LifecycleError::MissingId {
            address: address.into(),
        })
}

impl Lifecycle {
    pub fn new(driver: Box<dyn LifecycleDriver>) -> Self {
        Self { driver }
    }

    /// Apply the configuration and return the ID of the primary resource.
    pub async fn apply(
        &self,
        config: &Document,
        primary: Option<&str>,
    ) -> Result<Applied, LifecycleError> {
        let state = self.driver.apply(config).await?;
        let id = primary_id(&state, primary)?;
        info!(?primary, ?id, "applied");
        Ok(Applied { id, state })
    }

    /// Apply a changed configuration to the existing resources.
    pub async fn reapply(
        &self,
        config: &Document,
        primary: Option<&str>,
        policy: ReplacementPolicy,
    ) -> Result<ReapplyOutcome, LifecycleError> {
        let before = self.driver.state().await?;
        let plan = self.driver.plan(config).await?;

        let mut replaced: BTreeMap<&str, &str> = BTreeMap::new();
        for change in plan.replacements() {
            let id = change.before_id().unwrap_or_default();
            if policy == ReplacementPolicy::Forbid {
                return Err(LifecycleError::ReplacementRequired {
                    resource_type: change.resource_type.clone(),
                    address: change.address.clone(),
                    id: id.into(),
                });
            }
            debug!(address = %change.address, id, "replacement planned");
            replaced.insert(&change.address, id);
        }

        let state = self.driver.apply(config).await?;

        // in-place updates must keep the identity
        for old in before.resources() {
            let (Some(old_id), Some(new)) = (old.id(), state.resource(&old.address)) else {
                continue;
            };
            if replaced.contains_key(old.address.as_str()) {
                continue;
            }
            if new.id() != Some(old_id) {
                return Err(LifecycleError::ReplacementRequired {
                    resource_type: old.resource_type.clone(),
                    address: old.address.clone(),
                    id: old_id.into(),
                });
            }
        }

        let replacements = replaced
            .into_iter()
            .filter(|(_, old_id)| !old_id.is_empty())
            .map(|(address, old_id)| Replacement {
                address: address.to_string(),
                resource_type: before
                    .resource(address)
                    .map(|res| res.resource_type.clone())
                    .unwrap_or_default(),
                old_id: old_id.to_string(),
                new_id: state
                    .resource(address)
                    .and_then(ResourceState::id)
                    .map(ToString::to_string),
            })
            .collect();

        let id = primary_id(&state, primary)?;
        info!(?primary, ?id, "re-applied");
        Ok(ReapplyOutcome {
            id,
            state,
            replacements,
        })
    }

    /// Import the resource into a fresh state and rebuild its configuration.
    pub async fn import(
        &self,
        config: &Document,
        address: &str,
        id: &str,
    ) -> Result<ImportedResource, LifecycleError> {
        let state = self.driver.import(config, address, id).await?;
        let resource = state
            .resource(address)
            .cloned()
            .ok_or_else(|| LifecycleError::MissingResource {
                address: address.into(),
            })?;
        let config = Block::from_values(
            resource.resource_type.clone(),
            resource.name.clone(),
            &resource.values,
        );
        info!(address, id, "imported");
        Ok(ImportedResource { resource, config })
    }

    /// Destroy everything the case created.
    pub async fn destroy(&self) -> Result<(), LifecycleError> {
        Ok(self.driver.destroy().await?)
    }

    /// Current state.
    pub async fn state(&self) -> Result<State, LifecycleError> {
        Ok(self.driver.state().await?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::driver::{Action, DriverError, MockDriver, Plan, ResourceChange};

    const ROUTER: &str = "openstack_networking_router_v2.router_1";

    fn router_state(id: &str, name: &str) -> State {
        State::from_resources(vec![ResourceState::new(
            ROUTER,
            "openstack_networking_router_v2",
            "router_1",
            json!({"id": id, "name": name, "admin_state_up": true, "timeouts": null})
                .as_object()
                .unwrap()
                .clone(),
        )])
    }

    fn change(actions: Vec<Action>, before: Value) -> Plan {
        Plan {
            resource_changes: vec![ResourceChange {
                address: ROUTER.into(),
                resource_type: "openstack_networking_router_v2".into(),
                actions,
                before: Some(before),
                after: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_apply_returns_primary_id() {
        let mut driver = MockDriver::default();
        driver
            .expect_apply()
            .returning(|_| Ok(router_state("r1", "router_1")));
        let lifecycle = Lifecycle::new(Box::new(driver));

        let applied = lifecycle.apply(&Document::new(), Some(ROUTER)).await.unwrap();
        assert_eq!(Some("r1".to_string()), applied.id);

        assert!(matches!(
            lifecycle
                .apply(&Document::new(), Some("openstack_networking_router_v2.router_2"))
                .await,
            Err(LifecycleError::MissingResource { .. })
        ));
    }

    #[tokio::test]
    async fn test_apply_failure_is_provisioning_error() {
        let mut driver = MockDriver::default();
        driver.expect_apply().returning(|_| {
            Err(DriverError::Rejected {
                command: "apply".into(),
                diagnostics: vec!["Error creating OpenStack networking router".into()],
            })
        });
        let lifecycle = Lifecycle::new(Box::new(driver));
        let err = lifecycle.apply(&Document::new(), Some(ROUTER)).await.unwrap_err();
        assert!(matches!(err, LifecycleError::Provisioning { .. }));
        assert!(err.to_string().contains("Error creating OpenStack networking router"));
    }

    #[tokio::test]
    async fn test_reapply_in_place() {
        let mut driver = MockDriver::default();
        driver
            .expect_state()
            .returning(|| Ok(router_state("r1", "router_1")));
        driver
            .expect_plan()
            .returning(|_| Ok(change(vec![Action::Update], json!({"id": "r1"}))));
        driver
            .expect_apply()
            .returning(|_| Ok(router_state("r1", "router_2")));
        let lifecycle = Lifecycle::new(Box::new(driver));

        let outcome = lifecycle
            .reapply(&Document::new(), Some(ROUTER), ReplacementPolicy::Forbid)
            .await
            .unwrap();
        assert_eq!(Some("r1".to_string()), outcome.id);
        assert!(outcome.replacements.is_empty());
    }

    #[tokio::test]
    async fn test_reapply_forbidden_replacement_does_not_apply() {
        let mut driver = MockDriver::default();
        driver
            .expect_state()
            .returning(|| Ok(router_state("r1", "router_1")));
        driver.expect_plan().returning(|_| {
            Ok(change(vec![Action::Delete, Action::Create], json!({"id": "r1"})))
        });
        driver.expect_apply().never();
        let lifecycle = Lifecycle::new(Box::new(driver));

        let err = lifecycle
            .reapply(&Document::new(), Some(ROUTER), ReplacementPolicy::Forbid)
            .await
            .unwrap_err();
        assert_eq!(
            "openstack_networking_router_v2 openstack_networking_router_v2.router_1 (id: r1) would be replaced",
            err.to_string()
        );
    }

    #[tokio::test]
    async fn test_reapply_allowed_replacement() {
        let mut driver = MockDriver::default();
        driver
            .expect_state()
            .returning(|| Ok(router_state("r1", "router_1")));
        driver.expect_plan().returning(|_| {
            Ok(change(vec![Action::Create, Action::Delete], json!({"id": "r1"})))
        });
        driver
            .expect_apply()
            .returning(|_| Ok(router_state("r2", "router_1")));
        let lifecycle = Lifecycle::new(Box::new(driver));

        let outcome = lifecycle
            .reapply(&Document::new(), Some(ROUTER), ReplacementPolicy::Allow)
            .await
            .unwrap();
        assert_eq!(
            vec![Replacement {
                address: ROUTER.into(),
                resource_type: "openstack_networking_router_v2".into(),
                old_id: "r1".into(),
                new_id: Some("r2".into()),
            }],
            outcome.replacements
        );
    }

    #[tokio::test]
    async fn test_reapply_unplanned_id_change() {
        let mut driver = MockDriver::default();
        driver
            .expect_state()
            .returning(|| Ok(router_state("r1", "router_1")));
        driver.expect_plan().returning(|_| Ok(Plan::default()));
        driver
            .expect_apply()
            .returning(|_| Ok(router_state("r9", "router_1")));
        let lifecycle = Lifecycle::new(Box::new(driver));

        assert!(matches!(
            lifecycle
                .reapply(&Document::new(), None, ReplacementPolicy::Allow)
                .await,
            Err(LifecycleError::ReplacementRequired { id, .. }) if id == "r1"
        ));
    }

    #[tokio::test]
    async fn test_import_rebuilds_config() {
        let mut driver = MockDriver::default();
        driver
            .expect_import()
            .withf(|_, address: &'_ str, id: &'_ str| address == ROUTER && id == "r1")
            .returning(|_, _, _| Ok(router_state("r1", "router_1")));
        let lifecycle = Lifecycle::new(Box::new(driver));

        let imported = lifecycle
            .import(&Document::new(), ROUTER, "r1")
            .await
            .unwrap();
        assert_eq!(Some("r1"), imported.resource.id());
        assert_eq!(
            "resource \"openstack_networking_router_v2\" \"router_1\" {\n  admin_state_up = true\n  name = \"router_1\"\n}\n",
            Document::new().block(imported.config).render().unwrap()
        );
    }
}
