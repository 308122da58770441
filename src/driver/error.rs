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

use std::time::Duration;
use thiserror::Error;

use crate::hcl::HclError;

/// Terraform CLI error.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The invocation did not finish in time and was killed.
    #[error("terraform {command} timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// The invocation exited with an error.
    #[error("terraform {command} failed: {}", diagnostics.join("; "))]
    Rejected {
        command: String,
        diagnostics: Vec<String>,
    },

    /// IO error.
    #[error("io error: {}", source)]
    Io {
        /// The source of the error.
        #[from]
        source: std::io::Error,
    },

    /// Json serialization error.
    #[error("json serde error: {}", source)]
    Json {
        /// The source of the error.
        #[from]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Render {
        #[from]
        source: HclError,
    },
}
