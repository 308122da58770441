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
//! Acceptance test runner.
//!
//! This is the entry point of the `acctest` binary.

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Report, Result, bail};
use futures::stream::{self, StreamExt};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::{
    Layer,
    filter::{LevelFilter, Targets},
    prelude::*,
};

use openstack_acctest::cloud::CloudSession;
use openstack_acctest::config::Config;
use openstack_acctest::driver::TerraformWorkspaces;
use openstack_acctest::harness::{self, CaseReport, Context, TestCase};
use openstack_acctest::scenarios::{self, Scenario};

/// Lifecycle acceptance tests of Terraform managed `OpenStack` resources.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the config file.
    #[arg(short, long, default_value = "/etc/openstack-acctest/acctest.conf")]
    config: PathBuf,

    /// Verbosity level. Repeat to increase level.
    #[arg(short, long, global=true, action = clap::ArgAction::Count, display_order = 920)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available test cases.
    List,
    /// Run test cases.
    Run {
        /// Names of the cases to run. All cases are run when empty.
        names: Vec<String>,

        /// Number of cases running at the same time.
        #[arg(long, default_value_t = 1)]
        parallel: usize,

        /// Discover the admin role and the networking extensions for the
        /// preconditions.
        #[arg(long)]
        discover: bool,
    },
}

/// Scenarios selected by name.
fn select(names: &[String]) -> Result<Vec<&'static Scenario>> {
    if names.is_empty() {
        return Ok(scenarios::catalog().iter().collect());
    }
    names
        .iter()
        .map(|name| match scenarios::find(name) {
            Some(scenario) => Ok(scenario),
            None => bail!("unknown test case `{name}`"),
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Report> {
    color_eyre::install()?;
    let args = Args::parse();

    let filter = Targets::new()
        .with_default(match args.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        })
        .with_target("hyper_util", Level::INFO)
        .with_target("rustls", Level::INFO);

    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(filter);

    // build the tracing registry
    tracing_subscriber::registry().with(log_layer).init();

    let (names, parallel, discover) = match args.command {
        Command::List => {
            for scenario in scenarios::catalog() {
                println!("{:<32} {}", scenario.name, scenario.description);
            }
            return Ok(());
        }
        Command::Run {
            names,
            parallel,
            discover,
        } => (names, parallel.max(1), discover),
    };

    let cfg = Config::new(args.config)?;
    let selected = select(&names)?;
    let cases: Vec<TestCase> = selected
        .iter()
        .map(|scenario| scenario.build(&cfg.environment))
        .collect::<Result<_, _>>()?;

    let session = Arc::new(CloudSession::new(&cfg));
    let mut ctx = Context::new(
        cfg.clone(),
        session.clone(),
        Arc::new(TerraformWorkspaces::new(cfg.clone())),
    );
    if discover && cfg.environment.acceptance() {
        match session.discover().await {
            Ok(capabilities) => ctx = ctx.with_capabilities(capabilities),
            Err(err) => warn!("capability discovery failed: {}", err),
        }
    }

    info!(cases = cases.len(), parallel, "running acceptance tests");
    let ctx = &ctx;
    let reports: Vec<CaseReport> = stream::iter(cases.iter())
        .map(|case| harness::run(ctx, case))
        .buffer_unordered(parallel)
        .collect()
        .await;

    for report in &reports {
        println!("{report}");
    }
    let failed = reports.iter().filter(|report| report.is_failed()).count();
    let skipped = reports.iter().filter(|report| report.is_skipped()).count();
    println!(
        "{} passed, {} skipped, {} failed",
        reports.len() - failed - skipped,
        skipped,
        failed
    );
    if failed > 0 {
        bail!("{failed} test case(s) failed");
    }
    Ok(())
}
