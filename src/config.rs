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
//! # Acceptance test configuration
//!
//! The configuration is read from an optional INI file. The conventional
//! OpenStack and Terraform acceptance environment variables (`OS_*`,
//! `TF_ACC`) override the file.
use config::{File, FileFormat};
use eyre::{Report, WrapErr};
use serde::Deserialize;
use std::path::PathBuf;
use validator::Validate;

mod environment;
mod openstack;
mod terraform;
mod timeouts;

pub use environment::EnvironmentSection;
pub use openstack::OpenStackSection;
pub use terraform::TerraformSection;
pub use timeouts::TimeoutsSection;

/// Environment variables and the configuration keys they override.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("OS_AUTH_URL", "openstack.auth_url"),
    ("OS_USERNAME", "openstack.username"),
    ("OS_USER_ID", "openstack.user_id"),
    ("OS_PASSWORD", "openstack.password"),
    ("OS_PROJECT_ID", "openstack.project_id"),
    ("OS_USER_DOMAIN_NAME", "openstack.user_domain_name"),
    ("OS_PROJECT_DOMAIN_NAME", "openstack.project_domain_name"),
    ("OS_REGION_NAME", "openstack.region_name"),
    ("OS_INTERFACE", "openstack.interface"),
    ("TF_ACC", "environment.tf_acc"),
    ("OS_IMAGE_ID", "environment.image_id"),
    ("OS_IMAGE_NAME", "environment.image_name"),
    ("OS_FLAVOR_ID", "environment.flavor_id"),
    ("OS_FLAVOR_NAME", "environment.flavor_name"),
    ("OS_POOL_NAME", "environment.pool_name"),
    ("OS_NETWORK_ID", "environment.network_id"),
    ("OS_EXTGW_ID", "environment.ext_gw_id"),
    ("OS_VPN_ENVIRONMENT", "environment.vpn_environment"),
    ("OS_FW_ENVIRONMENT", "environment.fw_environment"),
];

#[derive(Debug, Default, Deserialize, Clone)]
pub struct Config {
    /// Cloud credentials.
    #[serde(default)]
    pub openstack: OpenStackSection,

    /// Terraform CLI and provider.
    #[serde(default)]
    pub terraform: TerraformSection,

    /// Operation bounds.
    #[serde(default)]
    pub timeouts: TimeoutsSection,

    /// Inputs of the case preconditions.
    #[serde(default)]
    pub environment: EnvironmentSection,
}

impl Config {
    /// Read the configuration file (if present) with the process environment
    /// applied on top.
    pub fn new(path: PathBuf) -> Result<Self, Report> {
        Self::load(path, |name| std::env::var(name).ok())
    }

    /// Read the configuration file (if present) with the environment lookup
    /// `env` applied on top.
    pub fn load<F>(path: PathBuf, env: F) -> Result<Self, Report>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = config::Config::builder();

        if path.is_file() {
            builder = builder.add_source(File::from(path).format(FileFormat::Ini));
        }

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, env(var).filter(|val| !val.is_empty()))?;
        }
        builder = builder.set_override_option(
            "openstack.project_name",
            env("OS_PROJECT_NAME")
                .or_else(|| env("OS_TENANT_NAME"))
                .filter(|val| !val.is_empty()),
        )?;

        builder.try_into()
    }
}

impl TryFrom<config::ConfigBuilder<config::builder::DefaultState>> for Config {
    type Error = Report;
    fn try_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, Self::Error> {
        let mut builder = builder;
        builder = builder
            .set_default("openstack.user_domain_name", "Default")?
            .set_default("openstack.project_domain_name", "Default")?
            .set_default("openstack.interface", "public")?
            .set_default("terraform.binary", "terraform")?
            .set_default(
                "terraform.provider_source",
                "terraform-provider-openstack/openstack",
            )?
            .set_default("timeouts.apply", "1200")?
            .set_default("timeouts.destroy", "1200")?
            .set_default("timeouts.lookup", "30")?
            .set_default("timeouts.check_destroy", "120")?
            .set_default("timeouts.poll_interval", "2")?;

        let config: Self = builder
            .build()
            .wrap_err("Failed to read configuration file")?
            .try_deserialize()
            .wrap_err("Failed to parse configuration file")?;
        config
            .timeouts
            .validate()
            .wrap_err("Invalid [timeouts] configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;
    use std::collections::HashMap;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let conf = Config::try_from(config::Config::builder()).unwrap();
        assert_eq!("public", conf.openstack.interface);
        assert_eq!("Default", conf.openstack.user_domain_name);
        assert_eq!(PathBuf::from("terraform"), conf.terraform.binary);
        assert_eq!(Duration::from_secs(1200), conf.timeouts.apply());
        assert_eq!(Duration::from_secs(2), conf.timeouts.poll_interval());
        assert!(!conf.environment.acceptance());
    }

    #[test]
    fn test_ini_file_with_env_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[openstack]
auth_url = http://keystone.local:5000/v3
username = demo
password = from-file
project_name = demo
region_name = RegionOne

[terraform]
provider_version = ~> 3.0

[timeouts]
lookup = 5
"#
        )
        .unwrap();

        let env = HashMap::from([
            ("OS_PASSWORD", "from-env"),
            ("OS_TENANT_NAME", "legacy"),
            ("OS_EXTGW_ID", "ext-net"),
            ("TF_ACC", "1"),
            ("OS_FW_ENVIRONMENT", ""),
        ]);
        let conf = Config::load(file.path().to_path_buf(), |name| {
            env.get(name).map(ToString::to_string)
        })
        .unwrap();

        assert_eq!(
            "http://keystone.local:5000/v3",
            conf.openstack.auth_url.as_ref().unwrap().as_str()
        );
        assert_eq!(
            "from-env",
            conf.openstack.password.as_ref().unwrap().expose_secret()
        );
        assert_eq!(Some("legacy".into()), conf.openstack.project_name);
        assert_eq!(Some("RegionOne".into()), conf.openstack.region_name);
        assert_eq!(Some("~> 3.0".into()), conf.terraform.provider_version);
        assert_eq!(Duration::from_secs(5), conf.timeouts.lookup());
        assert_eq!(Duration::from_secs(1200), conf.timeouts.destroy());
        assert!(conf.environment.acceptance());
        assert_eq!(Some("ext-net".into()), conf.environment.ext_gw_id);
        assert_eq!(None, conf.environment.fw_environment);
    }

    #[test]
    fn test_timeouts_are_bounded() {
        for section in ["poll_interval = 0", "check_destroy = 0", "lookup = 10000000"] {
            let mut file = NamedTempFile::new().unwrap();
            write!(file, "[timeouts]\n{section}\n").unwrap();
            let err = Config::load(file.path().to_path_buf(), |_| None).unwrap_err();
            assert!(
                format!("{err:?}").contains("Invalid [timeouts] configuration"),
                "{section}: {err:?}"
            );
        }
    }

    #[test]
    fn test_missing_file() {
        let conf = Config::load(PathBuf::from("/nonexistent/acctest.conf"), |_| None).unwrap();
        assert!(conf.openstack.auth_url.is_none());
        assert!(conf.openstack.password.is_none());
    }
}
