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
//! # Catalog API types
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::BuilderError;

/// A catalog object.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Catalog(pub Vec<CatalogService>);

impl Catalog {
    /// Find the endpoint of the service with the given type.
    ///
    /// The `interface` must match exactly. When `region` is given the
    /// endpoint must belong to it (matching either `region` or `region_id`),
    /// otherwise the first endpoint of the interface wins.
    pub fn find_endpoint(
        &self,
        service_type: &str,
        interface: &str,
        region: Option<&str>,
    ) -> Option<&Endpoint> {
        self.0
            .iter()
            .filter(|svc| svc.r#type.as_deref() == Some(service_type))
            .flat_map(|svc| svc.endpoints.iter())
            .filter(|ep| ep.interface == interface)
            .find(|ep| match region {
                Some(region) => {
                    ep.region.as_deref() == Some(region) || ep.region_id.as_deref() == Some(region)
                }
                None => true,
            })
    }
}

/// A catalog service.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct CatalogService {
    #[builder(default)]
    pub r#type: Option<String>,
    #[builder(default)]
    #[serde(default)]
    pub name: Option<String>,
    pub id: String,
    #[builder(default)]
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

/// A Catalog Endpoint.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Endpoint {
    pub id: String,
    pub url: String,
    pub interface: String,
    #[builder(default)]
    #[serde(default)]
    pub region: Option<String>,
    #[builder(default)]
    #[serde(default)]
    pub region_id: Option<String>,
}
