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
//

use eyre::{Result, eyre};
use std::path::PathBuf;
use std::sync::Arc;

use openstack_acctest::cloud::CloudSession;
use openstack_acctest::config::Config;
use openstack_acctest::driver::TerraformWorkspaces;
use openstack_acctest::harness::{self, Context, Outcome};
use openstack_acctest::scenarios;

const DEFAULT_CONFIG: &str = "/etc/openstack-acctest/acctest.conf";

/// Configuration from `ACCTEST_CONFIG` (or the default path) and the process
/// environment.
pub fn config() -> Result<Config> {
    let path = std::env::var("ACCTEST_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG.to_string());
    Config::new(PathBuf::from(path))
}

/// Run the scenario against the configured cloud.
pub async fn run_scenario(name: &str) -> Result<()> {
    let cfg = config()?;
    if !cfg.environment.acceptance() {
        eprintln!("skipping {name}: TF_ACC is not set");
        return Ok(());
    }
    let scenario = scenarios::find(name).ok_or_else(|| eyre!("unknown scenario {name}"))?;
    let case = scenario.build(&cfg.environment)?;

    let session = Arc::new(CloudSession::new(&cfg));
    let capabilities = session.discover().await.unwrap_or_default();
    let ctx = Context::new(
        cfg.clone(),
        session,
        Arc::new(TerraformWorkspaces::new(cfg)),
    )
    .with_capabilities(capabilities);

    let report = harness::run(&ctx, &case).await;
    eprintln!("{report}");
    match report.outcome {
        Outcome::Failed(err) => Err(err.into()),
        Outcome::Passed | Outcome::Skipped(_) => Ok(()),
    }
}
