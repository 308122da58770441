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

use reqwest::StatusCode;
use thiserror::Error;

use openstack_acctest_api_types::error::BuilderError;

/// OpenStack API error.
#[derive(Debug, Error)]
pub enum CloudError {
    /// Authentication was rejected.
    #[error("authentication failed with {0}")]
    AuthenticationFailed(StatusCode),

    /// The authentication response does not carry a token.
    #[error("token is missing in the authentication response")]
    MissingToken,

    /// Not enough credentials to authenticate.
    #[error("incomplete credentials: {0}")]
    Credentials(String),

    /// The catalog has no matching endpoint.
    #[error("service {service} with the {interface} interface is not in the catalog")]
    EndpointNotFound { service: String, interface: String },

    /// Unexpected response status.
    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: String,
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The response object is not wrapped into the expected envelope.
    #[error("response envelope `{0}` is missing")]
    MissingEnvelope(String),

    #[error(transparent)]
    Builder {
        #[from]
        source: BuilderError,
    },

    #[error(transparent)]
    Header {
        #[from]
        source: reqwest::header::InvalidHeaderValue,
    },

    /// HTTP transport error.
    #[error("http error: {}", source)]
    Http {
        /// The source of the error.
        #[from]
        source: reqwest::Error,
    },

    /// Json serialization error.
    #[error("json serde error: {}", source)]
    Json {
        /// The source of the error.
        #[from]
        source: serde_json::Error,
    },

    /// Url parsing error
    #[error(transparent)]
    UrlParse {
        #[from]
        source: url::ParseError,
    },
}

impl CloudError {
    /// Whether repeating the request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::Http { source } => source.is_connect() || source.is_timeout(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: StatusCode) -> CloudError {
        CloudError::Status {
            method: "GET".into(),
            url: "http://neutron/v2.0/routers/r1".into(),
            status,
            body: String::new(),
        }
    }

    #[test]
    fn test_is_transient() {
        assert!(status(StatusCode::SERVICE_UNAVAILABLE).is_transient());
        assert!(status(StatusCode::TOO_MANY_REQUESTS).is_transient());
        assert!(!status(StatusCode::FORBIDDEN).is_transient());
        assert!(!CloudError::MissingToken.is_transient());
    }
}
