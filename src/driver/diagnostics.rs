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
//! # Terraform diagnostics
//!
//! With `-json` Terraform reports every diagnostic as a separate JSON line
//! of its machine readable UI stream. Commands without the JSON output
//! report them on stderr as plain text.
use serde::Deserialize;

#[derive(Deserialize)]
struct Message {
    #[serde(rename = "type")]
    message_type: String,
    #[serde(default)]
    diagnostic: Option<Diagnostic>,
}

#[derive(Deserialize)]
struct Diagnostic {
    severity: String,
    summary: String,
    #[serde(default)]
    detail: String,
    #[serde(default)]
    address: Option<String>,
}

/// Error diagnostics of a failed invocation.
pub fn parse(stdout: &[u8], stderr: &[u8]) -> Vec<String> {
    let stdout = String::from_utf8_lossy(stdout);
    let mut diagnostics: Vec<String> = stdout
        .lines()
        .filter_map(|line| serde_json::from_str::<Message>(line).ok())
        .filter(|msg| msg.message_type == "diagnostic")
        .filter_map(|msg| msg.diagnostic)
        .filter(|diag| diag.severity == "error")
        .map(|diag| {
            let mut text = match diag.address {
                Some(address) => format!("{address}: {}", diag.summary),
                None => diag.summary,
            };
            let detail = diag.detail.trim();
            if !detail.is_empty() {
                text.push_str(": ");
                text.push_str(detail);
            }
            text
        })
        .collect();

    if diagnostics.is_empty() {
        let stderr = String::from_utf8_lossy(stderr);
        let text = stderr
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('╷') && !line.starts_with('╵'))
            .map(|line| line.trim_start_matches('│').trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !text.is_empty() {
            diagnostics.push(text);
        }
    }
    diagnostics
}
