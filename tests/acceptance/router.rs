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

use openstack_acctest::scenarios::router;

use crate::common::run_scenario;

#[tokio::test]
async fn test_router_basic() -> Result<()> {
    run_scenario(router::BASIC).await
}

#[tokio::test]
async fn test_router_update_external_gateway() -> Result<()> {
    run_scenario(router::UPDATE_EXTERNAL_GATEWAY).await
}

#[tokio::test]
async fn test_router_vendor_opts() -> Result<()> {
    run_scenario(router::VENDOR_OPTS).await
}

#[tokio::test]
async fn test_router_vendor_opts_no_snat() -> Result<()> {
    run_scenario(router::VENDOR_OPTS_NO_SNAT).await
}

#[tokio::test]
async fn test_router_ext_fixed_ips() -> Result<()> {
    run_scenario(router::EXT_FIXED_IPS).await
}
