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

use eyre::Result;

use openstack_acctest::scenarios::import;

use crate::common::run_scenario;

#[tokio::test]
async fn test_import_flavor() -> Result<()> {
    run_scenario(import::FLAVOR).await
}

#[tokio::test]
async fn test_import_fw_policy() -> Result<()> {
    run_scenario(import::FIREWALL_POLICY).await
}

#[tokio::test]
async fn test_import_project() -> Result<()> {
    run_scenario(import::PROJECT).await
}

#[tokio::test]
async fn test_import_floating_ip() -> Result<()> {
    run_scenario(import::FLOATING_IP).await
}

#[tokio::test]
async fn test_import_site_connection() -> Result<()> {
    run_scenario(import::SITE_CONNECTION).await
}
