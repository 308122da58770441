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
//! # OpenStack API access
//!
//! The verifiers only ever read. [`CloudSession`] authenticates with the
//! Keystone v3 password method, resolves the service endpoints from the
//! catalog of the token and performs plain `GET` requests against them.
//!
//! The token is renewed when it is about to expire, so a single session can
//! be shared by all the concurrently running test cases.
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::{
    Client, ClientBuilder, StatusCode,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

use openstack_acctest_api_types::auth::*;
use openstack_acctest_api_types::catalog::Catalog;
use openstack_acctest_api_types::network::ExtensionList;
use openstack_acctest_api_types::scope::*;

pub mod error;
#[cfg(test)]
mod mock;

use crate::config::{Config, OpenStackSection};
use crate::resource::ResourceKind;
pub use error::CloudError;
#[cfg(test)]
pub use mock::MockLookup;

/// Tokens expiring within this many seconds are renewed before use.
const TOKEN_RENEWAL_MARGIN: i64 = 60;

/// Catalog service type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ServiceType {
    Compute,
    Identity,
    Network,
}

impl ServiceType {
    /// Service type as registered in the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compute => "compute",
            Self::Identity => "identity",
            Self::Network => "network",
        }
    }

    /// API version segment the endpoint must end with.
    fn version_suffix(&self) -> Option<&'static str> {
        match self {
            Self::Compute => None,
            Self::Identity => Some("v3/"),
            Self::Network => Some("v2.0/"),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only access to the live resources.
#[async_trait]
pub trait ResourceLookup: Send + Sync {
    /// Fetch the resource of the kind by its ID. `None` when the API does not
    /// know it.
    async fn lookup<'a>(
        &self,
        kind: &ResourceKind,
        id: &'a str,
    ) -> Result<Option<Value>, CloudError>;
}

/// Capabilities of the cloud and of the authenticated user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Capabilities {
    /// The token carries the `admin` role.
    pub admin: bool,
    /// Aliases of the enabled networking API extensions.
    pub network_extensions: BTreeSet<String>,
}

impl Capabilities {
    pub fn has_network_extension(&self, alias: &str) -> bool {
        self.network_extensions.contains(alias)
    }
}

/// Authenticated state.
struct AuthState {
    client: Client,
    expires_at: DateTime<Utc>,
    catalog: Catalog,
    token: Token,
}

impl AuthState {
    fn is_fresh(&self) -> bool {
        self.expires_at - Utc::now() > TimeDelta::seconds(TOKEN_RENEWAL_MARGIN)
    }
}

/// Authenticated OpenStack API session.
pub struct CloudSession {
    config: OpenStackSection,
    timeout: Duration,
    auth: RwLock<Option<AuthState>>,
}

impl CloudSession {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.openstack.clone(),
            timeout: config.timeouts.lookup(),
            auth: RwLock::new(None),
        }
    }

    /// Password identity with the project scope out of the configuration.
    fn auth_request(&self) -> Result<AuthRequest, CloudError> {
        let password = self
            .config
            .password
            .as_ref()
            .ok_or_else(|| CloudError::Credentials("password is not set".into()))?;

        let mut user = UserPasswordBuilder::default();
        user.password(password.expose_secret());
        match (&self.config.user_id, &self.config.username) {
            (Some(id), _) => {
                user.id(id);
            }
            (None, Some(name)) => {
                user.name(name).domain(
                    DomainBuilder::default()
                        .name(&self.config.user_domain_name)
                        .build()?,
                );
            }
            (None, None) => {
                return Err(CloudError::Credentials(
                    "neither user id nor name is set".into(),
                ));
            }
        }

        let identity = IdentityBuilder::default()
            .methods(vec!["password".into()])
            .password(PasswordAuthBuilder::default().user(user.build()?).build()?)
            .build()?;

        let scope = match (&self.config.project_id, &self.config.project_name) {
            (Some(id), _) => Some(Scope::Project(
                ScopeProjectBuilder::default().id(id).build()?,
            )),
            (None, Some(name)) => Some(Scope::Project(
                ScopeProjectBuilder::default()
                    .name(name)
                    .domain(
                        DomainBuilder::default()
                            .name(&self.config.project_domain_name)
                            .build()?,
                    )
                    .build()?,
            )),
            (None, None) => None,
        };

        Ok(AuthRequest {
            auth: AuthRequestInner { identity, scope },
        })
    }

    /// Obtain a new token.
    #[tracing::instrument(level = "info", skip(self))]
    async fn authenticate(&self) -> Result<AuthState, CloudError> {
        let auth_url = self
            .config
            .auth_url
            .as_ref()
            .ok_or_else(|| CloudError::Credentials("auth_url is not set".into()))?;
        let rsp = ClientBuilder::new()
            .timeout(self.timeout)
            .build()?
            .post(token_url(auth_url)?)
            .json(&self.auth_request()?)
            .send()
            .await?;

        if !rsp.status().is_success() {
            return Err(CloudError::AuthenticationFailed(rsp.status()));
        }

        let token = SecretString::from(
            rsp.headers()
                .get("X-Subject-Token")
                .ok_or(CloudError::MissingToken)?
                .to_str()
                .map_err(|_| CloudError::MissingToken)?
                .to_string(),
        );
        let auth: TokenResponse = rsp.json().await?;

        let mut header = HeaderValue::from_str(token.expose_secret())?;
        header.set_sensitive(true);
        let client = ClientBuilder::new()
            .timeout(self.timeout)
            .default_headers(HeaderMap::from_iter([(
                HeaderName::from_static("x-auth-token"),
                header,
            )]))
            .build()?;

        info!(
            user = %auth.token.user.id,
            expires_at = %auth.token.expires_at,
            "authenticated"
        );
        Ok(AuthState {
            client,
            expires_at: auth.token.expires_at,
            catalog: auth.token.catalog.clone().unwrap_or_default(),
            token: auth.token,
        })
    }

    /// Authenticated client and the endpoint of the service.
    async fn client_for(&self, service: ServiceType) -> Result<(Client, Url), CloudError> {
        {
            let guard = self.auth.read().await;
            if let Some(state) = guard.as_ref()
                && state.is_fresh()
            {
                return Ok((state.client.clone(), self.endpoint_from(&state.catalog, service)?));
            }
        }
        let mut guard = self.auth.write().await;
        if let Some(state) = guard.as_ref()
            && state.is_fresh()
        {
            return Ok((state.client.clone(), self.endpoint_from(&state.catalog, service)?));
        }
        let state = self.authenticate().await?;
        let res = (state.client.clone(), self.endpoint_from(&state.catalog, service)?);
        *guard = Some(state);
        Ok(res)
    }

    fn endpoint_from(&self, catalog: &Catalog, service: ServiceType) -> Result<Url, CloudError> {
        let endpoint = catalog
            .find_endpoint(
                service.as_str(),
                &self.config.interface,
                self.config.region_name.as_deref(),
            )
            .ok_or_else(|| CloudError::EndpointNotFound {
                service: service.to_string(),
                interface: self.config.interface.clone(),
            })?;
        versioned_endpoint(&endpoint.url, service)
    }

    /// Base url of the service.
    pub async fn endpoint(&self, service: ServiceType) -> Result<Url, CloudError> {
        Ok(self.client_for(service).await?.1)
    }

    /// `GET` the path relative to the service endpoint. `None` on 404.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_json(
        &self,
        service: ServiceType,
        path: &str,
    ) -> Result<Option<Value>, CloudError> {
        let (client, endpoint) = self.client_for(service).await?;
        let url = endpoint.join(path)?;
        let rsp = client.get(url.clone()).send().await?;
        let status = rsp.status();
        debug!(%url, %status, "response");
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CloudError::Status {
                method: "GET".into(),
                url: url.to_string(),
                status,
                body: rsp.text().await.unwrap_or_default(),
            });
        }
        Ok(Some(rsp.json().await?))
    }

    /// Discover the admin role and the enabled networking extensions.
    #[tracing::instrument(level = "info", skip(self))]
    pub async fn discover(&self) -> Result<Capabilities, CloudError> {
        let extensions: ExtensionList = match self.get_json(ServiceType::Network, "extensions").await? {
            Some(val) => serde_json::from_value(val)?,
            None => ExtensionList::default(),
        };
        let admin = self
            .auth
            .read()
            .await
            .as_ref()
            .is_some_and(|state| state.token.has_role("admin"));
        Ok(Capabilities {
            admin,
            network_extensions: extensions
                .extensions
                .into_iter()
                .map(|ext| ext.alias)
                .collect(),
        })
    }
}

#[async_trait]
impl ResourceLookup for CloudSession {
    #[tracing::instrument(level = "info", skip(self, kind), fields(resource_type = kind.resource_type))]
    async fn lookup<'a>(
        &self,
        kind: &ResourceKind,
        id: &'a str,
    ) -> Result<Option<Value>, CloudError> {
        let Some(mut body) = self.get_json(kind.service, &kind.path(id)).await? else {
            return Ok(None);
        };
        body.get_mut(kind.envelope)
            .map(Value::take)
            .map(Some)
            .ok_or_else(|| CloudError::MissingEnvelope(kind.envelope.into()))
    }
}

/// `auth/tokens` url of the identity endpoint, with or without the `/v3`
/// suffix.
fn token_url(auth_url: &Url) -> Result<Url, CloudError> {
    let base = auth_url.as_str().trim_end_matches('/');
    let base = if base.ends_with("/v3") {
        base.to_string()
    } else {
        format!("{base}/v3")
    };
    Ok(Url::parse(&format!("{base}/auth/tokens"))?)
}

/// Catalog url of the service with the trailing slash and the version
/// segment.
fn versioned_endpoint(url: &str, service: ServiceType) -> Result<Url, CloudError> {
    let mut base = url.trim_end_matches('/').to_string();
    base.push('/');
    if let Some(suffix) = service.version_suffix()
        && !base.ends_with(suffix)
    {
        base.push_str(suffix);
    }
    Ok(Url::parse(&base)?)
}
