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
//! # Identity resources
use derive_builder::Builder;

use crate::error::BuilderError;
use crate::hcl::Expression;
use crate::resource::ResourceSpec;

/// `openstack_identity_project_v3`.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct ProjectSpec {
    pub label: String,

    pub name: Expression,

    #[builder(default)]
    pub description: Option<Expression>,

    #[builder(default)]
    pub domain_id: Option<Expression>,

    #[builder(default)]
    pub enabled: Option<Expression>,

    #[builder(default)]
    pub tags: Vec<String>,
}

impl From<ProjectSpec> for ResourceSpec {
    fn from(value: ProjectSpec) -> Self {
        let spec = ResourceSpec::new("openstack_identity_project_v3", value.label)
            .attr("name", value.name)
            .attr_opt("description", value.description)
            .attr_opt("domain_id", value.domain_id)
            .attr_opt("enabled", value.enabled);
        if value.tags.is_empty() {
            spec
        } else {
            spec.attr("tags", value.tags)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hcl::Document;

    #[test]
    fn test_project() {
        let spec: ResourceSpec = ProjectSpecBuilder::default()
            .label("project_1")
            .name("ACCPTTEST-abcde")
            .description("A project")
            .tags(vec!["tag1".to_string(), "tag2".to_string()])
            .build()
            .unwrap()
            .into();
        assert_eq!(
            r#"resource "openstack_identity_project_v3" "project_1" {
  name = "ACCPTTEST-abcde"
  description = "A project"
  tags = ["tag1", "tag2"]
}
"#,
            Document::new().block(spec.into()).render().unwrap()
        );
    }
}
