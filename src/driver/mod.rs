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
//! # Lifecycle driver
//!
//! Provisioning goes through the Terraform CLI. The [`LifecycleDriver`]
//! trait is the seam between the harness and the CLI so that the harness can
//! be tested without a cloud.
use async_trait::async_trait;

pub mod diagnostics;
pub mod error;
#[cfg(test)]
mod mock;
pub mod plan;
pub mod terraform;

use crate::hcl::Document;
use crate::state::State;

pub use error::DriverError;
#[cfg(test)]
pub use mock::{MockDriver, MockWorkspaces};
pub use plan::{Action, Plan, ResourceChange};
pub use terraform::{TerraformDriver, TerraformWorkspaces};

/// Terraform working directory of a single test case.
#[async_trait]
pub trait LifecycleDriver: Send + Sync {
    /// Write the configuration and apply it.
    async fn apply(&self, config: &Document) -> Result<State, DriverError>;

    /// Write the configuration and compute the changes applying it would do.
    async fn plan(&self, config: &Document) -> Result<Plan, DriverError>;

    /// Import the existing object into a fresh state, returning that state.
    /// The state of the working directory is not touched.
    async fn import<'a>(
        &self,
        config: &Document,
        address: &'a str,
        id: &'a str,
    ) -> Result<State, DriverError>;

    /// Destroy everything the working directory manages.
    async fn destroy(&self) -> Result<(), DriverError>;

    /// Current state of the working directory.
    async fn state(&self) -> Result<State, DriverError>;
}

/// Creates the working directory of a test case.
#[async_trait]
pub trait WorkspaceFactory: Send + Sync {
    async fn create<'a>(&self, case: &'a str) -> Result<Box<dyn LifecycleDriver>, DriverError>;
}
