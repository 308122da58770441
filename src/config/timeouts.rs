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
//! # Operation bounds
use serde::Deserialize;
use std::time::Duration;
use validator::Validate;

/// Timeouts in seconds.
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct TimeoutsSection {
    /// Single `terraform apply`, `plan` or `import` invocation.
    #[serde(default = "default_apply")]
    #[validate(range(min = 1, max = 86400))]
    pub apply: u64,

    /// Single `terraform destroy` invocation.
    #[serde(default = "default_apply")]
    #[validate(range(min = 1, max = 86400))]
    pub destroy: u64,

    /// Total time spent retrying a transient lookup failure.
    #[serde(default = "default_lookup")]
    #[validate(range(min = 1, max = 86400))]
    pub lookup: u64,

    /// Total time to wait for a destroyed resource to disappear.
    #[serde(default = "default_check_destroy")]
    #[validate(range(min = 1, max = 86400))]
    pub check_destroy: u64,

    /// Initial delay between two polls.
    #[serde(default = "default_poll_interval")]
    #[validate(range(min = 1, max = 3600))]
    pub poll_interval: u64,
}

fn default_apply() -> u64 {
    1200
}

fn default_lookup() -> u64 {
    30
}

fn default_check_destroy() -> u64 {
    120
}

fn default_poll_interval() -> u64 {
    2
}

impl Default for TimeoutsSection {
    fn default() -> Self {
        Self {
            apply: default_apply(),
            destroy: default_apply(),
            lookup: default_lookup(),
            check_destroy: default_check_destroy(),
            poll_interval: default_poll_interval(),
        }
    }
}

impl TimeoutsSection {
    pub fn apply(&self) -> Duration {
        Duration::from_secs(self.apply)
    }

    pub fn destroy(&self) -> Duration {
        Duration::from_secs(self.destroy)
    }

    pub fn lookup(&self) -> Duration {
        Duration::from_secs(self.lookup)
    }

    pub fn check_destroy(&self) -> Duration {
        Duration::from_secs(self.check_destroy)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }
}
