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

use async_trait::async_trait;
use eyre::Result;
use serde_json::{Value, json};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use openstack_acctest::cloud::{CloudError, ResourceLookup};
use openstack_acctest::config::Config;
use openstack_acctest::driver::TerraformWorkspaces;
use openstack_acctest::error::LifecycleError;
use openstack_acctest::harness::{self, Context, Outcome};
use openstack_acctest::resource::ResourceKind;
use openstack_acctest::scenarios;

/// Stand-in `terraform` managing a single router. `@MARKER@` is created by a
/// destroy when `@REMOVE@` is `1`.
const FAKE_TERRAFORM: &str = r#"#!/bin/sh
case "$1" in
  init)
    exit 0 ;;
  apply)
    name=$(sed -n 's/^  name = "\(.*\)"$/\1/p' main.tf | head -n 1)
    desc=$(sed -n 's/^  description = "\(.*\)"$/\1/p' main.tf | head -n 1)
    printf '{"values":{"root_module":{"resources":[{"address":"openstack_networking_router_v2.router_1","mode":"managed","type":"openstack_networking_router_v2","name":"router_1","values":{"id":"r1","name":"%s","description":"%s","admin_state_up":true}}]}}}' "$name" "$desc" > state.json ;;
  plan)
    echo '{"resource_changes":[{"address":"openstack_networking_router_v2.router_1","mode":"managed","type":"openstack_networking_router_v2","change":{"actions":@ACTIONS@,"before":{"id":"r1"},"after":{}}}]}' > acctest.tfplan ;;
  show)
    if [ -n "$4" ]; then
      cat "$4"
    else
      cat state.json
    fi ;;
  destroy)
    if [ "@REMOVE@" = "1" ]; then
      touch "@MARKER@"
    fi ;;
esac
"#;

/// Router API answering until the fake destroy leaves the marker behind.
struct FakeRouters {
    marker: PathBuf,
}

#[async_trait]
impl ResourceLookup for FakeRouters {
    async fn lookup<'a>(
        &self,
        _kind: &ResourceKind,
        id: &'a str,
    ) -> Result<Option<Value>, CloudError> {
        if self.marker.exists() {
            return Ok(None);
        }
        Ok(Some(json!({
            "id": id,
            "name": "router_1",
            "description": "router description",
            "admin_state_up": true,
            "status": "ACTIVE",
        })))
    }
}

struct Fixture {
    _root: TempDir,
    ctx: Context,
}

fn install(root: &Path, actions: &str, remove: bool) -> Result<PathBuf> {
    let marker = root.join("destroyed");
    let script = FAKE_TERRAFORM
        .replace("@ACTIONS@", actions)
        .replace("@REMOVE@", if remove { "1" } else { "0" })
        .replace("@MARKER@", &marker.display().to_string());
    let binary = root.join("terraform");
    std::fs::write(&binary, script)?;
    std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755))?;
    Ok(binary)
}

fn fixture(actions: &str, remove: bool) -> Result<Fixture> {
    let root = TempDir::new()?;
    let mut cfg = Config::default();
    cfg.terraform.binary = install(root.path(), actions, remove)?;
    cfg.terraform.work_dir = Some(root.path().join("cases"));
    cfg.timeouts.apply = 30;
    cfg.timeouts.destroy = 30;
    cfg.timeouts.lookup = 2;
    cfg.timeouts.check_destroy = 2;
    cfg.timeouts.poll_interval = 1;
    cfg.environment.tf_acc = Some("1".into());
    cfg.environment.image_name = Some("cirros".into());
    cfg.environment.flavor_name = Some("m1.tiny".into());
    cfg.environment.pool_name = Some("public".into());
    cfg.environment.network_id = Some("n1".into());
    cfg.environment.ext_gw_id = Some("ext-net".into());

    let lookup = Arc::new(FakeRouters {
        marker: root.path().join("destroyed"),
    });
    let ctx = Context::new(
        cfg.clone(),
        lookup,
        Arc::new(TerraformWorkspaces::new(cfg)),
    );
    Ok(Fixture { _root: root, ctx })
}

async fn run_router_basic(fixture: &Fixture) -> Result<Outcome> {
    let case = scenarios::router::basic(&fixture.ctx.config.environment)?;
    Ok(harness::run(&fixture.ctx, &case).await.outcome)
}

#[tokio::test]
async fn test_router_basic_passes() -> Result<()> {
    let fixture = fixture(r#"["update"]"#, true)?;
    match run_router_basic(&fixture).await? {
        Outcome::Passed => Ok(()),
        other => Err(eyre::eyre!("unexpected outcome {other:?}")),
    }
}

#[tokio::test]
async fn test_router_basic_forbidden_replacement() -> Result<()> {
    let fixture = fixture(r#"["delete","create"]"#, true)?;
    match run_router_basic(&fixture).await? {
        Outcome::Failed(LifecycleError::ReplacementRequired { address, id, .. }) => {
            assert_eq!("openstack_networking_router_v2.router_1", address);
            assert_eq!("r1", id);
            Ok(())
        }
        other => Err(eyre::eyre!("unexpected outcome {other:?}")),
    }
}

#[tokio::test]
async fn test_router_basic_still_exists() -> Result<()> {
    let fixture = fixture(r#"["update"]"#, false)?;
    match run_router_basic(&fixture).await? {
        Outcome::Failed(LifecycleError::StillExists { resource_type, id }) => {
            assert_eq!("openstack_networking_router_v2", resource_type);
            assert_eq!("r1", id);
            Ok(())
        }
        other => Err(eyre::eyre!("unexpected outcome {other:?}")),
    }
}
