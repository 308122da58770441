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

//! # OpenStack Terraform acceptance tests
//!
//! Lifecycle acceptance testing of Terraform managed OpenStack resources. A
//! test case is a sequence of steps. Every step renders a Terraform
//! configuration, drives the `terraform` CLI to apply, re-apply or import it,
//! and verifies the outcome twice: against the Terraform state and against the
//! live OpenStack API. When the case ends everything it created is destroyed
//! and the destruction is confirmed by looking the resources up again.
//!
//! The crate is split into the following parts:
//!
//! - [`hcl`] and [`resource`] render the configuration out of typed
//!   resource specs.
//!
//! - [`driver`] wraps the Terraform CLI, [`harness::lifecycle`] implements the
//!   apply, re-apply, import and destroy operations on top of it.
//!
//! - [`verifier`] looks resources up through [`cloud`] and evaluates
//!   predicates against them, [`verifier::teardown`] confirms their removal.
//!
//! - [`harness`] runs the test cases, [`scenarios`] holds the catalog of the
//!   router and import cases.
//!
//! Nothing is provisioned unless the preconditions of a case (see
//! [`precheck`]) are met, most importantly `TF_ACC` being set.

pub mod cloud;
pub mod config;
pub mod driver;
pub mod error;
pub mod harness;
pub mod hcl;
pub mod poll;
pub mod precheck;
pub mod resource;
pub mod scenarios;
pub mod state;
pub mod verifier;
