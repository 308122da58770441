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
//! # Case reports
use std::fmt;
use std::time::Duration;

use crate::error::LifecycleError;

/// Result of a test case.
#[derive(Debug)]
pub enum Outcome {
    Passed,
    /// A precondition is not met. Nothing was provisioned.
    Skipped(String),
    Failed(LifecycleError),
}

/// Report of a single test case.
#[derive(Debug)]
pub struct CaseReport {
    pub name: String,
    pub outcome: Outcome,
    pub duration: Duration,
}

impl CaseReport {
    pub fn new<N: Into<String>>(name: N, result: Result<(), LifecycleError>, duration: Duration) -> Self {
        let outcome = match result {
            Ok(()) => Outcome::Passed,
            Err(err) if err.is_skip() => Outcome::Skipped(err.to_string()),
            Err(err) => Outcome::Failed(err),
        };
        Self {
            name: name.into(),
            outcome,
            duration,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, Outcome::Skipped(_))
    }
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.duration.as_secs_f64();
        match &self.outcome {
            Outcome::Passed => write!(f, "PASS {} ({secs:.1}s)", self.name),
            Outcome::Skipped(reason) => write!(f, "SKIP {} ({secs:.1}s): {reason}", self.name),
            Outcome::Failed(err) => write!(f, "FAIL {} ({secs:.1}s): {err}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precheck::Precondition;

    #[test]
    fn test_outcome() {
        let passed = CaseReport::new("router_basic", Ok(()), Duration::from_millis(12_340));
        assert_eq!("PASS router_basic (12.3s)", passed.to_string());

        let skipped = CaseReport::new(
            "flavor_import",
            Err(LifecycleError::PreconditionFailed {
                precondition: Precondition::AdminOnly,
                reason: "the user is not an admin".into(),
            }),
            Duration::ZERO,
        );
        assert!(skipped.is_skipped());
        assert_eq!(
            "SKIP flavor_import (0.0s): precondition `admin only` not met: the user is not an admin",
            skipped.to_string()
        );

        let failed = CaseReport::new(
            "router_basic",
            Err(LifecycleError::StillExists {
                resource_type: "openstack_networking_router_v2".into(),
                id: "r1".into(),
            }),
            Duration::from_secs(1),
        );
        assert!(failed.is_failed());
        assert_eq!(
            "FAIL router_basic (1.0s): openstack_networking_router_v2 r1 still exists",
            failed.to_string()
        );
    }
}
