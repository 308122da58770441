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

use async_trait::async_trait;
use mockall::mock;

use crate::driver::{DriverError, LifecycleDriver, Plan, WorkspaceFactory};
use crate::hcl::Document;
use crate::state::State;

mock! {
    pub Driver {}

    #[async_trait]
    impl LifecycleDriver for Driver {
        async fn apply(&self, config: &Document) -> Result<State, DriverError>;

        async fn plan(&self, config: &Document) -> Result<Plan, DriverError>;

        async fn import<'a>(
            &self,
            config: &Document,
            address: &'a str,
            id: &'a str,
        ) -> Result<State, DriverError>;

        async fn destroy(&self) -> Result<(), DriverError>;

        async fn state(&self) -> Result<State, DriverError>;
    }
}

mock! {
    pub Workspaces {}

    #[async_trait]
    impl WorkspaceFactory for Workspaces {
        async fn create<'a>(&self, case: &'a str) -> Result<Box<dyn LifecycleDriver>, DriverError>;
    }
}
