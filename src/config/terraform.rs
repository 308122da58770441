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
//! # Terraform CLI
use serde::Deserialize;
use std::path::PathBuf;

/// Terraform CLI and provider configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct TerraformSection {
    /// Path or name of the `terraform` binary.
    #[serde(default = "default_binary")]
    pub binary: PathBuf,

    /// Registry source of the OpenStack provider.
    #[serde(default = "default_provider_source")]
    pub provider_source: String,

    /// Version constraint of the provider.
    pub provider_version: Option<String>,

    /// Local provider mirror passed as `-plugin-dir` to `terraform init`.
    pub plugin_dir: Option<PathBuf>,

    /// Directory where the per case working directories are created. The
    /// system temporary directory is used when unset.
    pub work_dir: Option<PathBuf>,
}

fn default_binary() -> PathBuf {
    PathBuf::from("terraform")
}

fn default_provider_source() -> String {
    "terraform-provider-openstack/openstack".into()
}

impl Default for TerraformSection {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            provider_source: default_provider_source(),
            provider_version: None,
            plugin_dir: None,
            work_dir: None,
        }
    }
}
