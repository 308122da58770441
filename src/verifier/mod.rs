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
//! # State verification
//!
//! After every step the resources created by Terraform are looked up in the
//! cloud by their ID and compared against the expected attributes.
//!
//! Two levels of checks exist:
//!
//! - [`Check::Attr`] evaluates predicates against the Terraform state alone.
//! - [`Check::Exists`] requires the resource to be in the state with an ID,
//!   looks it up through the OpenStack API and evaluates the predicates
//!   against the live object.
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub mod import;
pub mod predicate;
pub mod teardown;

use crate::cloud::{CloudError, ResourceLookup};
use crate::error::LifecycleError;
use crate::poll::{Attempt, PollConfig, poll};
use crate::resource::{LiveResource, Lookupable, ResourceKind, kind_for};
use crate::state::{ResourceState, State};

pub use predicate::{Mismatch, Predicate};
pub use teardown::TeardownVerifier;

/// Assertion about a resource of the Terraform state.
#[derive(Clone, Debug)]
pub enum Check {
    /// Predicates against the attributes recorded in the state.
    Attr {
        address: String,
        predicates: Vec<Predicate>,
    },
    /// The resource has an ID and the cloud object satisfies the predicates.
    Exists {
        address: String,
        predicates: Vec<Predicate>,
    },
}

impl Check {
    pub fn attr<A: Into<String>>(address: A, predicates: Vec<Predicate>) -> Self {
        Self::Attr {
            address: address.into(),
            predicates,
        }
    }

    pub fn exists<A: Into<String>>(address: A, predicates: Vec<Predicate>) -> Self {
        Self::Exists {
            address: address.into(),
            predicates,
        }
    }

    pub fn address(&self) -> &str {
        match self {
            Self::Attr { address, .. } | Self::Exists { address, .. } => address,
        }
    }
}

/// Verifies the live resources against the expectations.
#[derive(Clone)]
pub struct StateVerifier {
    lookup: Arc<dyn ResourceLookup>,
    poll: PollConfig,
}

impl StateVerifier {
    pub fn new(lookup: Arc<dyn ResourceLookup>, poll: PollConfig) -> Self {
        Self { lookup, poll }
    }

    /// Look the resource up, retrying the transient failures.
    async fn fetch(&self, kind: &ResourceKind, id: &str) -> Result<Option<Value>, CloudError> {
        poll(&self.poll, "lookup", || async move {
            match self.lookup.lookup(kind, id).await {
                Ok(found) => Attempt::Done(found),
                Err(err) if err.is_transient() => Attempt::Retry(err),
                Err(err) => Attempt::Fail(err),
            }
        })
        .await
        .map_err(|err| err.into_inner())
    }

    /// Look the resource up and evaluate the predicates in order. The first
    /// failing predicate is reported.
    #[tracing::instrument(level = "info", skip(self, kind, predicates), fields(resource_type = kind.resource_type))]
    pub async fn check(
        &self,
        kind: &'static ResourceKind,
        id: &str,
        predicates: &[Predicate],
    ) -> Result<LiveResource, LifecycleError> {
        let not_found = || LifecycleError::NotFound {
            resource_type: kind.resource_type.into(),
            id: id.into(),
        };
        let value = self
            .fetch(kind, id)
            .await
            .map_err(|source| LifecycleError::Lookup {
                resource_type: kind.resource_type.into(),
                id: id.into(),
                source,
            })?
            .ok_or_else(not_found)?;

        let live = LiveResource::new(kind, value);
        if live.id() != id {
            debug!(returned = live.id(), "lookup returned another resource");
            return Err(not_found());
        }

        for predicate in predicates {
            predicate
                .evaluate(live.attributes(), live.value())
                .map_err(|mismatch| attribute_mismatch(kind.resource_type, id, mismatch))?;
        }
        debug!(checked = predicates.len(), "resource verified");
        Ok(live)
    }

    /// Typed API view of the resource.
    pub async fn get<T: Lookupable>(&self, id: &str) -> Result<T, LifecycleError> {
        let kind = T::kind();
        self.check(kind, id, &[])
            .await?
            .typed()
            .map_err(|source| LifecycleError::Lookup {
                resource_type: kind.resource_type.into(),
                id: id.into(),
                source: source.into(),
            })
    }

    /// Evaluate the check against the state (and the cloud).
    pub async fn verify(&self, check: &Check, state: &State) -> Result<(), LifecycleError> {
        let resource = resolve(state, check.address())?;
        match check {
            Check::Attr { predicates, .. } => evaluate_state(resource, predicates),
            Check::Exists { address, predicates } => {
                let id = resource.id().ok_or_else(|| LifecycleError::MissingId {
                    address: address.clone(),
                })?;
                let kind = kind_for(&resource.resource_type).ok_or_else(|| {
                    LifecycleError::UnknownResourceType(resource.resource_type.clone())
                })?;
                self.check(kind, id, predicates).await.map(|_| ())
            }
        }
    }
}

fn resolve<'a>(state: &'a State, address: &str) -> Result<&'a ResourceState, LifecycleError> {
    state
        .resource(address)
        .ok_or_else(|| LifecycleError::MissingResource {
            address: address.into(),
        })
}

fn evaluate_state(resource: &ResourceState, predicates: &[Predicate]) -> Result<(), LifecycleError> {
    let raw = Value::Object(resource.values.clone());
    for predicate in predicates {
        predicate
            .evaluate(resource.attributes(), &raw)
            .map_err(|mismatch| {
                attribute_mismatch(
                    &resource.resource_type,
                    resource.id().unwrap_or(&resource.address),
                    mismatch,
                )
            })?;
    }
    Ok(())
}

fn attribute_mismatch(resource_type: &str, id: &str, mismatch: Mismatch) -> LifecycleError {
    LifecycleError::AttributeMismatch {
        resource_type: resource_type.into(),
        id: id.into(),
        key: mismatch.key,
        expected: mismatch.expected,
        observed: mismatch.observed,
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;
    use std::time::Duration;
    use tracing_test::traced_test;

    use openstack_acctest_api_types::network::Router;

    use super::*;
    use crate::cloud::MockLookup;
    use crate::resource::kind::ROUTER;

    fn fast() -> PollConfig {
        PollConfig {
            timeout: Duration::from_secs(2),
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            backoff_multiplier: 2.0,
        }
    }

    fn router_json(name: &str) -> Value {
        json!({
            "id": "r1",
            "name": name,
            "admin_state_up": true,
            "status": "ACTIVE",
            "external_gateway_info": {"network_id": "ext", "enable_snat": true}
        })
    }

    fn unavailable() -> CloudError {
        CloudError::Status {
            method: "GET".into(),
            url: "http://neutron/v2.0/routers/r1".into(),
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: String::new(),
        }
    }

    fn state() -> State {
        let values = json!({"id": "r1", "name": "router_1", "external_fixed_ip": [{"subnet_id": "s1"}, {"subnet_id": "s1"}]});
        State::from_resources(vec![ResourceState::new(
            "openstack_networking_router_v2.router_1",
            "openstack_networking_router_v2",
            "router_1",
            values.as_object().unwrap().clone(),
        )])
    }

    #[tokio::test]
    async fn test_check() {
        let mut lookup = MockLookup::default();
        lookup
            .expect_lookup()
            .withf(|kind: &ResourceKind, id: &'_ str| kind.resource_type == "openstack_networking_router_v2" && id == "r1")
            .returning(|_, _| Ok(Some(router_json("router_1"))));
        let verifier = StateVerifier::new(Arc::new(lookup), fast());

        let live = verifier
            .check(
                &ROUTER,
                "r1",
                &[
                    Predicate::equals("name", "router_1"),
                    Predicate::equals("external_gateway_info.network_id", "ext"),
                ],
            )
            .await
            .unwrap();
        assert_eq!("r1", live.id());

        match verifier
            .check(&ROUTER, "r1", &[Predicate::equals("name", "router_2")])
            .await
        {
            Err(LifecycleError::AttributeMismatch {
                resource_type,
                id,
                key,
                expected,
                observed,
            }) => {
                assert_eq!("openstack_networking_router_v2", resource_type);
                assert_eq!("r1", id);
                assert_eq!("name", key);
                assert_eq!("router_2", expected);
                assert_eq!("router_1", observed);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let router: Router = verifier.get("r1").await.unwrap();
        assert_eq!("router_1", router.name);
    }

    #[tokio::test]
    async fn test_first_failing_predicate_is_reported() {
        let mut lookup = MockLookup::default();
        lookup
            .expect_lookup()
            .returning(|_, _| Ok(Some(router_json("router_1"))));
        let verifier = StateVerifier::new(Arc::new(lookup), fast());
        let err = verifier
            .check(
                &ROUTER,
                "r1",
                &[
                    Predicate::equals("admin_state_up", "false"),
                    Predicate::equals("name", "other"),
                ],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::AttributeMismatch { key, .. } if key == "admin_state_up"));
    }

    #[tokio::test]
    async fn test_not_found() {
        let mut lookup = MockLookup::default();
        lookup
            .expect_lookup()
            .withf(|_, id: &'_ str| id == "gone")
            .returning(|_, _| Ok(None));
        lookup
            .expect_lookup()
            .withf(|_, id: &'_ str| id == "other")
            .returning(|_, _| Ok(Some(router_json("router_1"))));
        let verifier = StateVerifier::new(Arc::new(lookup), fast());

        assert!(matches!(
            verifier.check(&ROUTER, "gone", &[]).await,
            Err(LifecycleError::NotFound { id, .. }) if id == "gone"
        ));
        // the API answered with a different object
        assert!(matches!(
            verifier.check(&ROUTER, "other", &[]).await,
            Err(LifecycleError::NotFound { id, .. }) if id == "other"
        ));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_transient_errors_are_retried() {
        let mut lookup = MockLookup::default();
        let mut seq = mockall::Sequence::new();
        lookup
            .expect_lookup()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(unavailable()));
        lookup
            .expect_lookup()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(Some(router_json("router_1"))));
        let verifier = StateVerifier::new(Arc::new(lookup), fast());

        assert!(verifier.check(&ROUTER, "r1", &[]).await.is_ok());
        assert!(logs_contain("not ready, polling again"));
    }

    #[tokio::test]
    async fn test_permanent_error() {
        let mut lookup = MockLookup::default();
        lookup
            .expect_lookup()
            .times(1)
            .returning(|_, _| Err(CloudError::MissingEnvelope("router".into())));
        let verifier = StateVerifier::new(Arc::new(lookup), fast());
        assert!(matches!(
            verifier.check(&ROUTER, "r1", &[]).await,
            Err(LifecycleError::Lookup { source: CloudError::MissingEnvelope(_), .. })
        ));
    }

    #[tokio::test]
    async fn test_verify_state_checks() {
        let mut lookup = MockLookup::default();
        lookup
            .expect_lookup()
            .returning(|_, _| Ok(Some(router_json("router_1"))));
        let verifier = StateVerifier::new(Arc::new(lookup), fast());
        let state = state();

        verifier
            .verify(
                &Check::attr(
                    "openstack_networking_router_v2.router_1",
                    vec![Predicate::equals("external_fixed_ip.#", "2")],
                ),
                &state,
            )
            .await
            .unwrap();
        verifier
            .verify(
                &Check::exists(
                    "openstack_networking_router_v2.router_1",
                    vec![Predicate::equals("name", "router_1")],
                ),
                &state,
            )
            .await
            .unwrap();

        let err = verifier
            .verify(
                &Check::exists("openstack_networking_router_v2.router_2", vec![]),
                &state,
            )
            .await
            .unwrap_err();
        assert_eq!(
            "Not found: openstack_networking_router_v2.router_2",
            err.to_string()
        );

        let err = verifier
            .verify(
                &Check::attr(
                    "openstack_networking_router_v2.router_1",
                    vec![Predicate::equals("external_fixed_ip.#", "1")],
                ),
                &state,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::AttributeMismatch { observed, .. } if observed == "2"));
    }

    #[tokio::test]
    async fn test_verify_missing_id() {
        let verifier = StateVerifier::new(Arc::new(MockLookup::default()), fast());
        let state = State::from_resources(vec![ResourceState::new(
            "openstack_networking_router_v2.router_1",
            "openstack_networking_router_v2",
            "router_1",
            json!({"id": "", "name": "router_1"}).as_object().unwrap().clone(),
        )]);
        let err = verifier
            .verify(
                &Check::exists("openstack_networking_router_v2.router_1", vec![]),
                &state,
            )
            .await
            .unwrap_err();
        assert_eq!(
            "No ID is set: openstack_networking_router_v2.router_1",
            err.to_string()
        );
    }
}
