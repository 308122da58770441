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
//! # Keystone v3 token API types
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::BuilderError;
use crate::scope::{Domain, Project, Scope};

/// An authentication request.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct AuthRequest {
    /// An identity object.
    pub auth: AuthRequestInner,
}

/// An authentication request.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct AuthRequestInner {
    /// An identity object.
    pub identity: Identity,

    /// The authorization scope. A project given by name must carry its
    /// domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

/// An identity object.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Identity {
    /// The authentication method. For password authentication, specify
    /// password.
    pub methods: Vec<String>,

    /// The password object, contains the authentication information.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<PasswordAuth>,
}

/// The password object, contains the authentication information.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct PasswordAuth {
    /// A user object.
    pub user: UserPassword,
}

/// User password information
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct UserPassword {
    /// User ID
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// User Name
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// User domain
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
    /// User password
    pub password: String,
}

/// Token creation response.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TokenResponse {
    /// Token
    pub token: Token,
}

/// Authorization token.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Token {
    /// The authentication methods used to obtain the token.
    #[serde(default)]
    pub methods: Vec<String>,

    /// The date and time when the token expires.
    pub expires_at: DateTime<Utc>,

    /// A user object.
    pub user: User,

    /// The project the token is scoped to.
    #[serde(default)]
    pub project: Option<Project>,

    /// Roles granted on the scope.
    #[serde(default)]
    pub roles: Option<Vec<Role>>,

    /// A catalog object.
    #[serde(default)]
    pub catalog: Option<Catalog>,
}

impl Token {
    /// Whether a role with the given name is granted on the token scope.
    pub fn has_role(&self, name: &str) -> bool {
        self.roles
            .as_ref()
            .is_some_and(|roles| roles.iter().any(|role| role.name == name))
    }
}

/// User information
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct User {
    /// User ID
    pub id: String,
    /// User Name
    #[serde(default)]
    pub name: Option<String>,
    /// User domain
    #[serde(default)]
    pub domain: Option<Domain>,
}

/// Role reference inside of the token.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Role {
    /// Role ID.
    pub id: String,
    /// Role name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_token_response_parse() {
        let rsp: TokenResponse = serde_json::from_value(json!({
            "token": {
                "methods": ["password"],
                "expires_at": "2030-01-01T00:00:00.000000Z",
                "user": {"id": "uid", "name": "admin", "domain": {"id": "default"}},
                "project": {"id": "pid", "name": "admin", "domain": {"id": "default"}},
                "roles": [{"id": "rid", "name": "admin"}, {"id": "rid2", "name": "member"}],
                "catalog": [{
                    "type": "network",
                    "id": "svc",
                    "endpoints": [{"id": "e", "url": "http://n:9696", "interface": "public", "region": "RegionOne"}]
                }]
            }
        }))
        .unwrap();
        assert!(rsp.token.has_role("admin"));
        assert!(!rsp.token.has_role("reader"));
        assert_eq!("pid", rsp.token.project.unwrap().id);
        assert_eq!(1, rsp.token.catalog.unwrap().0.len());
    }

    #[test]
    fn test_password_request_serialization() {
        let identity = IdentityBuilder::default()
            .methods(vec!["password".into()])
            .password(
                PasswordAuthBuilder::default()
                    .user(
                        UserPasswordBuilder::default()
                            .name("admin")
                            .password("secret")
                            .build()
                            .unwrap(),
                    )
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let request = AuthRequest {
            auth: AuthRequestInner {
                identity,
                scope: None,
            },
        };
        assert_eq!(
            json!({"auth": {"identity": {
                "methods": ["password"],
                "password": {"user": {"name": "admin", "password": "secret"}}
            }}}),
            serde_json::to_value(request).unwrap()
        );
    }
}
