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
//! # Test case runner
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::LifecycleError;
use crate::harness::{CaseReport, Context, ImportStep, Lifecycle, TestCase, TestStep};
use crate::hcl::Document;
use crate::precheck;
use crate::resource::kind_for;
use crate::state::State;
use crate::verifier::import;

/// Run the test case and report its outcome.
#[tracing::instrument(level = "info", skip_all, fields(case = %case.name))]
pub async fn run(ctx: &Context, case: &TestCase) -> CaseReport {
    let start = Instant::now();
    let result = run_case(ctx, case).await;
    let report = CaseReport::new(case.name.clone(), result, start.elapsed());
    info!("{}", report);
    report
}

async fn run_case(ctx: &Context, case: &TestCase) -> Result<(), LifecycleError> {
    case.validate_all()?;
    precheck::evaluate(
        &case.preconditions,
        ctx.environment(),
        ctx.config.openstack.username.as_deref(),
        &ctx.capabilities,
    )?;

    let lifecycle = Lifecycle::new(ctx.workspaces.create(&case.name).await?);
    let result = run_steps(ctx, case, &lifecycle).await;
    if let Err(err) = &result {
        warn!("case failed, cleaning up: {}", err);
    }

    let last_state = lifecycle.state().await.unwrap_or_else(|err| {
        warn!("state before destroy is unknown: {}", err);
        State::default()
    });
    let cleanup = match lifecycle.destroy().await {
        Ok(()) => ctx.teardown().check_destroyed(&last_state).await,
        Err(err) => Err(err),
    };

    match (result, cleanup) {
        (Err(err), cleanup) => {
            if let Err(cleanup_err) = cleanup {
                warn!("cleanup failed: {}", cleanup_err);
            }
            Err(err)
        }
        (Ok(()), cleanup) => cleanup,
    }
}

async fn run_steps(
    ctx: &Context,
    case: &TestCase,
    lifecycle: &Lifecycle,
) -> Result<(), LifecycleError> {
    let verifier = ctx.verifier();
    let mut current: Option<Document> = None;

    for (idx, step) in case.steps.iter().enumerate() {
        info!(step = idx, "running step");

        let state = match &step.import {
            Some(import_step) => {
                let config = current.as_ref().ok_or(LifecycleError::MissingConfig(idx))?;
                import_resource(lifecycle, config, import_step).await?
            }
            None => {
                let config = ctx.document(&step.resources);
                let state = apply_step(ctx, lifecycle, step, &config, current.is_none()).await?;
                current = Some(config);
                state
            }
        };

        for check in &step.checks {
            verifier.verify(check, &state).await?;
        }
    }
    Ok(())
}

/// Apply (first step) or re-apply the configuration of the step.
async fn apply_step(
    ctx: &Context,
    lifecycle: &Lifecycle,
    step: &TestStep,
    config: &Document,
    first: bool,
) -> Result<State, LifecycleError> {
    let primary = step.primary_address();
    if first {
        return Ok(lifecycle.apply(config, primary.as_deref()).await?.state);
    }

    let outcome = lifecycle
        .reapply(config, primary.as_deref(), step.replacement)
        .await?;
    let teardown = ctx.teardown();
    for replacement in &outcome.replacements {
        if let Some(kind) = kind_for(&replacement.resource_type) {
            teardown.check_absent(kind, &replacement.old_id).await?;
        }
    }
    Ok(outcome.state)
}

/// Import the resource into a fresh state and compare it with the applied
/// one. Returns the imported state.
async fn import_resource(
    lifecycle: &Lifecycle,
    config: &Document,
    step: &ImportStep,
) -> Result<State, LifecycleError> {
    let applied_state = lifecycle.state().await?;
    let applied = applied_state
        .resource(&step.address)
        .ok_or_else(|| LifecycleError::MissingResource {
            address: step.address.clone(),
        })?;
    let id = match &step.id {
        Some(id) => id.clone(),
        None => applied
            .id()
            .ok_or_else(|| LifecycleError::MissingId {
                address: step.address.clone(),
            })?
            .to_string(),
    };

    let imported = lifecycle.import(config, &step.address, &id).await?;
    debug!(
        config = %Document::new().block(imported.config.clone()).render()?,
        "imported configuration"
    );

    if step.verify {
        let differences = import::diff(
            applied.attributes(),
            imported.resource.attributes(),
            &step.ignore,
        );
        if !differences.is_empty() {
            return Err(LifecycleError::ImportMismatch {
                resource_type: applied.resource_type.clone(),
                id,
                differences,
            });
        }
    }
    Ok(State::from_resources(vec![imported.resource]))
}
