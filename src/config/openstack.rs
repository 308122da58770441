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
//! # Cloud credentials
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// OpenStack password authentication.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct OpenStackSection {
    /// Identity endpoint, e.g. `https://keystone.example.com/v3`.
    pub auth_url: Option<Url>,

    pub username: Option<String>,

    pub user_id: Option<String>,

    pub password: Option<SecretString>,

    pub project_name: Option<String>,

    pub project_id: Option<String>,

    #[serde(default = "default_domain")]
    pub user_domain_name: String,

    #[serde(default = "default_domain")]
    pub project_domain_name: String,

    /// Region used for the endpoint selection.
    pub region_name: Option<String>,

    /// Endpoint interface (`public`, `internal` or `admin`).
    #[serde(default = "default_interface")]
    pub interface: String,
}

fn default_domain() -> String {
    "Default".into()
}

fn default_interface() -> String {
    "public".into()
}
