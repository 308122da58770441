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
//! # Teardown verification
//!
//! Deletion in OpenStack is frequently asynchronous. A destroyed resource is
//! polled until the API stops returning it. A resource which is still being
//! removed when the deadline passes is accepted.
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::cloud::{CloudError, ResourceLookup};
use crate::error::LifecycleError;
use crate::poll::{Attempt, PollConfig, PollError, poll};
use crate::resource::{ResourceKind, kind_for};
use crate::state::State;

/// Why the resource is not confirmed to be gone yet.
#[derive(Debug)]
enum Remaining {
    Terminating(String),
    Present,
    Lookup(CloudError),
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminating(status) => write!(f, "resource is in status {status}"),
            Self::Present => f.write_str("resource is present"),
            Self::Lookup(err) => write!(f, "lookup failed: {err}"),
        }
    }
}

/// Confirms the resources are gone after the destroy.
#[derive(Clone)]
pub struct TeardownVerifier {
    lookup: Arc<dyn ResourceLookup>,
    poll: PollConfig,
}

impl TeardownVerifier {
    pub fn new(lookup: Arc<dyn ResourceLookup>, poll: PollConfig) -> Self {
        Self { lookup, poll }
    }

    /// Wait for the resource to disappear.
    #[tracing::instrument(level = "info", skip(self, kind), fields(resource_type = kind.resource_type))]
    pub async fn check_absent(&self, kind: &ResourceKind, id: &str) -> Result<(), LifecycleError> {
        let result = poll(&self.poll, "check destroy", || async move {
            match self.lookup.lookup(kind, id).await {
                Ok(None) => Attempt::Done(()),
                Ok(Some(value)) if kind.is_terminating(&value) => Attempt::Retry(Remaining::Terminating(
                    value
                        .get("status")
                        .and_then(|status| status.as_str())
                        .unwrap_or_default()
                        .to_string(),
                )),
                Ok(Some(_)) => Attempt::Fail(Remaining::Present),
                Err(err) => Attempt::Retry(Remaining::Lookup(err)),
            }
        })
        .await;

        match result {
            Ok(()) => {
                info!("resource is gone");
                Ok(())
            }
            Err(PollError::Timeout(Remaining::Terminating(status))) => {
                warn!(%status, "resource is still being removed, accepting");
                Ok(())
            }
            Err(PollError::Timeout(Remaining::Lookup(source))) => Err(LifecycleError::Lookup {
                resource_type: kind.resource_type.into(),
                id: id.into(),
                source,
            }),
            Err(PollError::Timeout(Remaining::Present) | PollError::Failed(_)) => {
                Err(LifecycleError::StillExists {
                    resource_type: kind.resource_type.into(),
                    id: id.into(),
                })
            }
        }
    }

    /// Check every resource of the last known state with a registered kind.
    /// All of them are checked. The first failure is returned.
    pub async fn check_destroyed(&self, state: &State) -> Result<(), LifecycleError> {
        let mut first_error = None;
        for resource in state.resources() {
            let (Some(kind), Some(id)) = (kind_for(&resource.resource_type), resource.id()) else {
                continue;
            };
            if let Err(err) = self.check_absent(kind, id).await {
                warn!(address = %resource.address, "{}", err);
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
