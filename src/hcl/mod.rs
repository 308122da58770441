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
//! # Terraform configuration renderer
//!
//! A small structured model of the HCL native syntax: a [`Document`] is an
//! ordered list of [`Block`]s, every block has a [`Body`] made of attributes
//! and nested blocks. Rendering validates identifiers and escapes string
//! literals, so the output is well formed by construction. The output only
//! depends on the input: items keep their insertion order and map keys are
//! sorted.
use serde_json::{Map, Value};

pub mod error;
pub mod expression;

pub use error::HclError;
pub use expression::{Expression, Traversal};

use expression::quote;

pub(crate) const INDENT: &str = "  ";

/// Whether the string is a valid HCL identifier.
pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Terraform configuration document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document starting with the `terraform { required_providers {} }`
    /// block for the `openstack` provider.
    pub fn with_provider<S: Into<String>>(source: S, version: Option<&str>) -> Self {
        let mut provider = std::collections::BTreeMap::new();
        provider.insert("source".to_string(), Expression::from(source.into()));
        if let Some(version) = version {
            provider.insert("version".to_string(), Expression::from(version));
        }
        Self::new().block(
            Block::new("terraform")
                .block(Block::new("required_providers").attr("openstack", provider)),
        )
    }

    /// Append a top level block.
    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Append a top level block in place.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Iterate over the `resource` blocks.
    pub fn resources(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|block| block.kind == "resource")
    }

    /// Render the document.
    pub fn render(&self) -> Result<String, HclError> {
        let mut out = String::new();
        for (idx, block) in self.blocks.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            block.write(&mut out, 0)?;
            out.push('\n');
        }
        Ok(out)
    }
}

/// Single attribute of a body.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub key: String,
    pub value: Expression,
}

/// Item of a block body.
#[derive(Clone, Debug, PartialEq)]
pub enum BodyItem {
    Attribute(Attribute),
    Block(Block),
}

/// Block body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Body {
    items: Vec<BodyItem>,
}

impl Body {
    pub fn items(&self) -> &[BodyItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the attributes of the body.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.items.iter().filter_map(|item| match item {
            BodyItem::Attribute(attr) => Some(attr),
            BodyItem::Block(_) => None,
        })
    }

    /// Value of the attribute with the given key.
    pub fn attribute(&self, key: &str) -> Option<&Expression> {
        self.attributes()
            .find(|attr| attr.key == key)
            .map(|attr| &attr.value)
    }

    /// Iterate over the nested blocks of the given type.
    pub fn blocks<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Block> + 'a {
        self.items.iter().filter_map(move |item| match item {
            BodyItem::Block(block) if block.kind == kind => Some(block),
            _ => None,
        })
    }

    fn push_attribute(&mut self, key: String, value: Expression) {
        self.items
            .push(BodyItem::Attribute(Attribute { key, value }));
    }

    /// Convert a JSON value of the Terraform state back into body items:
    /// arrays of objects become repeated nested blocks, empty collections and
    /// nulls are omitted.
    fn push_value(&mut self, key: &str, value: &Value) {
        match value {
            Value::Null => {}
            Value::Array(items) if items.is_empty() => {}
            Value::Object(map) if map.is_empty() => {}
            Value::Array(items) if items.iter().all(Value::is_object) => {
                for item in items {
                    let mut block = Block::new(key);
                    if let Value::Object(map) = item {
                        for (nested_key, nested) in map {
                            block.body.push_value(nested_key, nested);
                        }
                    }
                    self.items.push(BodyItem::Block(block));
                }
            }
            other => self.push_attribute(key.into(), Expression::from_json(other)),
        }
    }

    fn write(&self, out: &mut String, indent: usize) -> Result<(), HclError> {
        let mut previous_was_block = None;
        for item in &self.items {
            let is_block = matches!(item, BodyItem::Block(_));
            if let Some(previous) = previous_was_block
                && (previous || is_block)
            {
                out.push('\n');
            }
            previous_was_block = Some(is_block);
            match item {
                BodyItem::Attribute(attr) => {
                    if !is_identifier(&attr.key) {
                        return Err(HclError::InvalidIdentifier(attr.key.clone()));
                    }
                    out.push_str(&INDENT.repeat(indent));
                    out.push_str(&attr.key);
                    out.push_str(" = ");
                    attr.value.write(out, indent)?;
                    out.push('\n');
                }
                BodyItem::Block(block) => {
                    block.write(out, indent)?;
                    out.push('\n');
                }
            }
        }
        Ok(())
    }
}

/// HCL block: `type "label" ... { body }`.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    kind: String,
    labels: Vec<String>,
    body: Body,
}

impl Block {
    pub fn new<S: Into<String>>(kind: S) -> Self {
        Self {
            kind: kind.into(),
            labels: Vec::new(),
            body: Body::default(),
        }
    }

    /// `resource "<resource_type>" "<name>"` block.
    pub fn resource<T: Into<String>, N: Into<String>>(resource_type: T, name: N) -> Self {
        Self::new("resource").label(resource_type).label(name)
    }

    /// Reconstruct a `resource` block out of the JSON values of the Terraform
    /// state. The computed `id` and the `timeouts` are not part of the
    /// reconstructed configuration.
    pub fn from_values<T: Into<String>, N: Into<String>>(
        resource_type: T,
        name: N,
        values: &Map<String, Value>,
    ) -> Self {
        let mut block = Self::resource(resource_type, name);
        for (key, value) in values {
            if key == "id" || key == "timeouts" {
                continue;
            }
            block.body.push_value(key, value);
        }
        block
    }

    pub fn label<S: Into<String>>(mut self, label: S) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Append an attribute.
    pub fn attr<K: Into<String>, V: Into<Expression>>(mut self, key: K, value: V) -> Self {
        self.body.push_attribute(key.into(), value.into());
        self
    }

    /// Append an attribute when the value is set.
    pub fn attr_opt<K: Into<String>, V: Into<Expression>>(self, key: K, value: Option<V>) -> Self {
        match value {
            Some(value) => self.attr(key, value),
            None => self,
        }
    }

    /// Append a nested block.
    pub fn block(mut self, block: Block) -> Self {
        self.body.items.push(BodyItem::Block(block));
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    fn write(&self, out: &mut String, indent: usize) -> Result<(), HclError> {
        if !is_identifier(&self.kind) {
            return Err(HclError::InvalidIdentifier(self.kind.clone()));
        }
        out.push_str(&INDENT.repeat(indent));
        out.push_str(&self.kind);
        for label in &self.labels {
            out.push(' ');
            out.push_str(&quote(label));
        }
        if self.body.is_empty() {
            out.push_str(" {}");
            return Ok(());
        }
        out.push_str(" {\n");
        self.body.write(out, indent + 1)?;
        out.push_str(&INDENT.repeat(indent));
        out.push('}');
        Ok(())
    }
}
