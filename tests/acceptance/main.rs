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
//! Acceptance tests of the scenario catalog.
//!
//! The scenario tests provision real resources and only do so with `TF_ACC`
//! set. The offline tests drive the harness against a stand-in `terraform`.

mod common;
mod import;
#[cfg(unix)]
mod offline;
mod router;
