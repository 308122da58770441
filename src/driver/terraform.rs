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
//! # Terraform CLI driver
//!
//! Every test case gets its own temporary working directory holding a single
//! `main.tf` and the local state. The directory is removed when the driver
//! is dropped.
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempDir;
use tokio::process::Command;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::driver::plan::Plan;
use crate::driver::{DriverError, LifecycleDriver, WorkspaceFactory, diagnostics};
use crate::hcl::Document;
use crate::state::State;

const CONFIG_FILE: &str = "main.tf";
const PLAN_FILE: &str = "acctest.tfplan";
const IMPORT_STATE_FILE: &str = "import.tfstate";

/// Terraform working directory of a single test case.
pub struct TerraformDriver {
    binary: PathBuf,
    dir: TempDir,
    plugin_dir: Option<PathBuf>,
    env: Vec<(&'static str, String)>,
    password: Option<SecretString>,
    timeout: Duration,
    destroy_timeout: Duration,
    init: OnceCell<()>,
}

impl TerraformDriver {
    /// Driver operating in `dir` with the credentials of `config`.
    pub fn new(config: &Config, dir: TempDir) -> Self {
        let os = &config.openstack;
        let env: Vec<(&'static str, String)> = [
            ("OS_AUTH_URL", os.auth_url.as_ref().map(ToString::to_string)),
            ("OS_USERNAME", os.username.clone()),
            ("OS_USER_ID", os.user_id.clone()),
            ("OS_PROJECT_NAME", os.project_name.clone()),
            ("OS_PROJECT_ID", os.project_id.clone()),
            ("OS_USER_DOMAIN_NAME", Some(os.user_domain_name.clone())),
            ("OS_PROJECT_DOMAIN_NAME", Some(os.project_domain_name.clone())),
            ("OS_REGION_NAME", os.region_name.clone()),
            ("OS_INTERFACE", Some(os.interface.clone())),
        ]
        .into_iter()
        .filter_map(|(name, val)| val.map(|val| (name, val)))
        .collect();

        Self {
            binary: config.terraform.binary.clone(),
            dir,
            plugin_dir: config.terraform.plugin_dir.clone(),
            env,
            password: os.password.clone(),
            timeout: config.timeouts.apply(),
            destroy_timeout: config.timeouts.destroy(),
            init: OnceCell::new(),
        }
    }

    /// Working directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.current_dir(self.dir.path())
            .env("TF_IN_AUTOMATION", "1")
            .env("TF_INPUT", "0")
            .env("CHECKPOINT_DISABLE", "1")
            .envs(self.env.iter().map(|(name, val)| (*name, val.as_str())))
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if let Some(password) = &self.password {
            cmd.env("OS_PASSWORD", password.expose_secret());
        }
        cmd
    }

    /// Run the CLI and return its stdout.
    async fn run(&self, args: &[&str], timeout: Duration) -> Result<Vec<u8>, DriverError> {
        let command = args.first().copied().unwrap_or_default().to_string();
        debug!(dir = %self.dir.path().display(), ?args, "running terraform");

        let mut cmd = self.command();
        cmd.args(args);
        let output = tokio::time::timeout(timeout, cmd.output())
            .await
            .map_err(|_| {
                warn!("terraform {} timed out after {:?}", command, timeout);
                DriverError::Timeout {
                    command: command.clone(),
                    timeout,
                }
            })??;

        if output.status.success() {
            debug!("terraform {} succeeded", command);
            Ok(output.stdout)
        } else {
            let mut diagnostics = diagnostics::parse(&output.stdout, &output.stderr);
            if diagnostics.is_empty() {
                diagnostics.push(output.status.to_string());
            }
            warn!("terraform {} failed: {}", command, diagnostics.join("; "));
            Err(DriverError::Rejected {
                command,
                diagnostics,
            })
        }
    }

    /// Write the configuration and initialize the directory on first use.
    async fn prepare(&self, config: &Document) -> Result<(), DriverError> {
        tokio::fs::write(self.dir.path().join(CONFIG_FILE), config.render()?).await?;
        self.init
            .get_or_try_init(|| async {
                let mut args = vec!["init", "-input=false", "-no-color"];
                let plugin_dir = self
                    .plugin_dir
                    .as_ref()
                    .map(|dir| format!("-plugin-dir={}", dir.display()));
                if let Some(plugin_dir) = &plugin_dir {
                    args.push(plugin_dir);
                }
                self.run(&args, self.timeout).await.map(|_| ())
            })
            .await?;
        Ok(())
    }

    /// Import the object into the `state_file` and read it back.
    async fn import_into(
        &self,
        state_file: &str,
        address: &str,
        id: &str,
    ) -> Result<State, DriverError> {
        let state_arg = format!("-state={state_file}");
        self.run(
            &["import", "-input=false", "-no-color", &state_arg, address, id],
            self.timeout,
        )
        .await?;
        Ok(State::from_json(&self.show(Some(state_file)).await?)?)
    }

    async fn show(&self, file: Option<&str>) -> Result<Vec<u8>, DriverError> {
        let mut args = vec!["show", "-json", "-no-color"];
        if let Some(file) = file {
            args.push(file);
        }
        self.run(&args, self.timeout).await
    }
}

#[async_trait]
impl LifecycleDriver for TerraformDriver {
    #[tracing::instrument(level = "info", skip_all, fields(dir = %self.dir.path().display()))]
    async fn apply(&self, config: &Document) -> Result<State, DriverError> {
        self.prepare(config).await?;
        self.run(
            &["apply", "-auto-approve", "-input=false", "-no-color", "-json"],
            self.timeout,
        )
        .await?;
        info!("configuration applied");
        self.state().await
    }

    #[tracing::instrument(level = "info", skip_all, fields(dir = %self.dir.path().display()))]
    async fn plan(&self, config: &Document) -> Result<Plan, DriverError> {
        self.prepare(config).await?;
        let out = format!("-out={PLAN_FILE}");
        self.run(
            &["plan", "-input=false", "-no-color", "-json", &out],
            self.timeout,
        )
        .await?;
        Ok(Plan::from_json(&self.show(Some(PLAN_FILE)).await?)?)
    }

    #[tracing::instrument(level = "info", skip(self, config), fields(dir = %self.dir.path().display()))]
    async fn import<'a>(
        &self,
        config: &Document,
        address: &'a str,
        id: &'a str,
    ) -> Result<State, DriverError> {
        self.prepare(config).await?;
        let fresh = self.dir.path().join(IMPORT_STATE_FILE);
        if tokio::fs::try_exists(&fresh).await? {
            tokio::fs::remove_file(&fresh).await?;
        }

        let result = self.import_into(IMPORT_STATE_FILE, address, id).await;

        // the imported copy must never own the resource
        if let Err(err) = tokio::fs::remove_file(&fresh).await {
            debug!("import state not removed: {}", err);
        }
        result
    }

    #[tracing::instrument(level = "info", skip_all, fields(dir = %self.dir.path().display()))]
    async fn destroy(&self) -> Result<(), DriverError> {
        if !self.init.initialized() {
            debug!("nothing was applied, skipping destroy");
            return Ok(());
        }
        self.run(
            &["destroy", "-auto-approve", "-input=false", "-no-color", "-json"],
            self.destroy_timeout,
        )
        .await?;
        info!("configuration destroyed");
        Ok(())
    }

    async fn state(&self) -> Result<State, DriverError> {
        if !self.init.initialized() {
            return Ok(State::default());
        }
        Ok(State::from_json(&self.show(None).await?)?)
    }
}

/// Creates the per case working directories in the configured directory.
pub struct TerraformWorkspaces {
    config: Config,
}

impl TerraformWorkspaces {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

/// Directory name prefix derived from the case name.
fn dir_prefix(case: &str) -> String {
    let name: String = case
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("acctest-{name}-")
}

#[async_trait]
impl WorkspaceFactory for TerraformWorkspaces {
    async fn create<'a>(&self, case: &'a str) -> Result<Box<dyn LifecycleDriver>, DriverError> {
        let prefix = dir_prefix(case);
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);
        let dir = match &self.config.terraform.work_dir {
            Some(work_dir) => {
                tokio::fs::create_dir_all(work_dir).await?;
                builder.tempdir_in(work_dir)?
            }
            None => builder.tempdir()?,
        };
        debug!(case, dir = %dir.path().display(), "created working directory");
        Ok(Box::new(TerraformDriver::new(&self.config, dir)))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::fs::PermissionsExt;

    use super::*;
    use crate::hcl::{Block, Document};

    /// Stand-in for the CLI answering the subcommands the driver uses.
    const FAKE_TERRAFORM: &str = r#"#!/bin/sh
case "$1" in
  init)
    exit 0 ;;
  apply)
    test -f main.tf || exit 3
    echo '{"type":"apply_complete"}' ;;
  plan)
    echo '{"@level":"error","type":"diagnostic","diagnostic":{"severity":"error","summary":"Invalid reference","detail":""}}'
    exit 1 ;;
  import)
    echo '{"values":{"root_module":{"resources":[{"address":"a_b.c","mode":"managed","type":"a_b","name":"c","values":{"id":"imported"}}]}}}' > import.tfstate ;;
  show)
    if [ -n "$4" ]; then
      cat "$4"
    else
      printf '{"values":{"root_module":{"resources":[{"address":"a_b.c","mode":"managed","type":"a_b","name":"c","values":{"id":"%s-%s"}}]}}}' "$OS_USERNAME" "$OS_PASSWORD"
    fi ;;
  destroy)
    sleep 5 ;;
esac
"#;

    fn driver() -> (TempDir, TerraformDriver) {
        let bin_dir = TempDir::new().unwrap();
        let binary = bin_dir.path().join("terraform");
        std::fs::write(&binary, FAKE_TERRAFORM).unwrap();
        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut config = Config::default();
        config.terraform.binary = binary;
        config.timeouts.destroy = 1;
        config.openstack.username = Some("demo".into());
        config.openstack.password = Some(SecretString::from("secret".to_string()));
        (bin_dir, TerraformDriver::new(&config, TempDir::new().unwrap()))
    }

    fn document() -> Document {
        Document::new().block(Block::resource("a_b", "c").attr("name", "c"))
    }

    #[tokio::test]
    async fn test_cli_lifecycle() {
        let (_bin, driver) = driver();

        assert!(driver.state().await.unwrap().is_empty());
        // never applied
        driver.destroy().await.unwrap();

        let state = driver.apply(&document()).await.unwrap();
        assert_eq!(
            Some("demo-secret"),
            state.resource("a_b.c").and_then(|res| res.id())
        );
        let written = std::fs::read_to_string(driver.path().join(CONFIG_FILE)).unwrap();
        assert!(written.contains(r#"resource "a_b" "c""#));

        let imported = driver.import(&document(), "a_b.c", "imported").await.unwrap();
        assert_eq!(Some("imported"), imported.resource("a_b.c").and_then(|res| res.id()));
        assert!(!driver.path().join(IMPORT_STATE_FILE).exists());

        match driver.plan(&document()).await {
            Err(DriverError::Rejected {
                command,
                diagnostics,
            }) => {
                assert_eq!("plan", command);
                assert_eq!(vec!["Invalid reference".to_string()], diagnostics);
            }
            other => panic!("unexpected plan result: {other:?}"),
        }

        match driver.destroy().await {
            Err(DriverError::Timeout { command, timeout }) => {
                assert_eq!("destroy", command);
                assert_eq!(Duration::from_secs(1), timeout);
            }
            other => panic!("unexpected destroy result: {other:?}"),
        }
    }

    #[test]
    fn test_dir_prefix() {
        assert_eq!(
            "acctest-router-basic-",
            dir_prefix("router_basic")
        );
        assert_eq!("acctest-import-v2-", dir_prefix("import/v2"));
    }

    #[tokio::test]
    async fn test_workspaces_in_work_dir() {
        let root = TempDir::new().unwrap();
        let mut config = Config::default();
        config.terraform.work_dir = Some(root.path().join("cases"));
        let workspaces = TerraformWorkspaces::new(config);
        let driver = workspaces.create("router_basic").await.unwrap();
        assert!(driver.state().await.unwrap().is_empty());
        let entries: Vec<String> = std::fs::read_dir(root.path().join("cases"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(1, entries.len());
        assert!(entries[0].starts_with("acctest-router-basic-"));
    }
}
