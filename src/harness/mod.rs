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
//! # Test harness
//!
//! A [`TestCase`] is an ordered list of [`TestStep`]s run against its own
//! Terraform working directory:
//!
//! - the first step with resources applies them,
//! - every following step with resources re-applies the changed
//!   configuration,
//! - an import step imports a resource of the last configuration into a
//!   fresh state and compares it with the applied one.
//!
//! After the last step (or the first failing one) everything is destroyed
//! and the destroyed resources are confirmed to be gone.
use derive_builder::Builder;
use std::sync::Arc;
use validator::{Validate, ValidationError, ValidationErrors};

pub mod lifecycle;
pub mod random;
pub mod report;
pub mod runner;

use crate::cloud::{Capabilities, ResourceLookup};
use crate::config::{Config, EnvironmentSection};
use crate::driver::WorkspaceFactory;
use crate::error::BuilderError;
use crate::hcl::{Block, Document};
use crate::poll::PollConfig;
use crate::precheck::Precondition;
use crate::resource::ResourceSpec;
use crate::verifier::{Check, StateVerifier, TeardownVerifier};

pub use lifecycle::{Applied, ImportedResource, Lifecycle, ReapplyOutcome, Replacement};
pub use report::{CaseReport, Outcome};
pub use runner::run;

/// What a re-apply may do to the existing resources.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ReplacementPolicy {
    /// Any planned replacement fails the step before anything is applied.
    #[default]
    Forbid,
    /// Replacements are applied. The replaced resources must be gone.
    Allow,
}

/// Import of a resource of the last applied configuration.
#[derive(Builder, Clone, Debug, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct ImportStep {
    /// Address of the imported resource.
    #[validate(length(min = 1))]
    pub address: String,

    /// ID to import. The ID of the applied resource is used when unset.
    #[builder(default)]
    pub id: Option<String>,

    /// Compare the imported attributes with the applied ones.
    #[builder(default = "true")]
    pub verify: bool,

    /// Attribute prefixes excluded from the comparison.
    #[builder(default)]
    pub ignore: Vec<String>,
}

/// Single step of a test case.
#[derive(Builder, Clone, Debug)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct TestStep {
    /// Resources of the configuration.
    #[builder(default)]
    pub resources: Vec<ResourceSpec>,

    /// Address of the resource whose ID the step reports. Defaults to the
    /// last resource.
    #[builder(default)]
    pub primary: Option<String>,

    /// Checks run after the step.
    #[builder(default)]
    pub checks: Vec<Check>,

    #[builder(default)]
    pub import: Option<ImportStep>,

    #[builder(default)]
    pub replacement: ReplacementPolicy,
}

impl TestStep {
    /// Address of the resource whose ID the step reports.
    pub fn primary_address(&self) -> Option<String> {
        self.primary
            .clone()
            .or_else(|| self.resources.last().map(ResourceSpec::address))
    }
}

impl Validate for TestStep {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if let Some(import) = &self.import {
            if !self.resources.is_empty() {
                let mut errors = ValidationErrors::new();
                errors.add("import", ValidationError::new("import_with_resources"));
                return Err(errors);
            }
            return import.validate();
        }
        if self.resources.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("resources", ValidationError::new("empty_step"));
            return Err(errors);
        }
        Ok(())
    }
}

/// Lifecycle test of a set of resources.
#[derive(Builder, Clone, Debug, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct TestCase {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Evaluated in order before anything is provisioned.
    #[builder(default)]
    pub preconditions: Vec<Precondition>,

    /// At least one step.
    pub steps: Vec<TestStep>,
}

impl TestCase {
    /// Validate the case and all of its steps.
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_default();
        if self.steps.is_empty() {
            errors.add("steps", ValidationError::new("length"));
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        self.steps.iter().try_for_each(Validate::validate)
    }
}

/// Everything a test case run needs.
#[derive(Clone)]
pub struct Context {
    pub config: Config,
    pub lookup: Arc<dyn ResourceLookup>,
    pub workspaces: Arc<dyn WorkspaceFactory>,
    pub capabilities: Capabilities,
}

impl Context {
    pub fn new(
        config: Config,
        lookup: Arc<dyn ResourceLookup>,
        workspaces: Arc<dyn WorkspaceFactory>,
    ) -> Self {
        Self {
            config,
            lookup,
            workspaces,
            capabilities: Capabilities::default(),
        }
    }

    /// Use the discovered capabilities for the preconditions.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn environment(&self) -> &EnvironmentSection {
        &self.config.environment
    }

    /// Configuration document of the resources.
    pub fn document(&self, resources: &[ResourceSpec]) -> Document {
        let mut doc = Document::with_provider(
            self.config.terraform.provider_source.clone(),
            self.config.terraform.provider_version.as_deref(),
        );
        for resource in resources {
            doc.push(Block::from(resource.clone()));
        }
        doc
    }

    pub fn verifier(&self) -> StateVerifier {
        StateVerifier::new(self.lookup.clone(), PollConfig::lookup(&self.config.timeouts))
    }

    pub fn teardown(&self) -> TeardownVerifier {
        TeardownVerifier::new(
            self.lookup.clone(),
            PollConfig::check_destroy(&self.config.timeouts),
        )
    }
}
