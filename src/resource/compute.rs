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
//! # Compute resources
use derive_builder::Builder;

use crate::error::BuilderError;
use crate::hcl::Expression;
use crate::resource::ResourceSpec;

/// `openstack_compute_flavor_v2`.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct FlavorSpec {
    pub label: String,

    pub name: Expression,

    /// Memory in MiB.
    pub ram: Expression,

    pub vcpus: Expression,

    /// Root disk size in GiB.
    pub disk: Expression,

    #[builder(default)]
    pub swap: Option<Expression>,

    #[builder(default)]
    pub is_public: Option<Expression>,
}

impl From<FlavorSpec> for ResourceSpec {
    fn from(value: FlavorSpec) -> Self {
        ResourceSpec::new("openstack_compute_flavor_v2", value.label)
            .attr("name", value.name)
            .attr("ram", value.ram)
            .attr("vcpus", value.vcpus)
            .attr("disk", value.disk)
            .attr_opt("swap", value.swap)
            .attr_opt("is_public", value.is_public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verifier::Predicate;

    #[test]
    fn test_flavor_predicates() {
        let spec: ResourceSpec = FlavorSpecBuilder::default()
            .label("flavor_1")
            .name("tf-acc-flavor-42")
            .ram(2048u32)
            .vcpus(2u32)
            .disk(5u32)
            .is_public(true)
            .build()
            .unwrap()
            .into();
        let predicates: Vec<String> = spec.predicates().iter().map(Predicate::to_string).collect();
        assert_eq!(
            vec![
                r#"name == "tf-acc-flavor-42""#,
                r#"ram == "2048""#,
                r#"vcpus == "2""#,
                r#"disk == "5""#,
                r#"is_public == "true""#,
            ],
            predicates
        );
    }
}
