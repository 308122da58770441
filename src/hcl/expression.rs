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
//! # Attribute expressions
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::hcl::error::HclError;
use crate::hcl::{INDENT, is_identifier};

/// Single-line lists longer than this are wrapped one element per line.
const MAX_INLINE_LIST: usize = 80;

/// Value of an attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Expression>),
    /// Object constructor. Keys are rendered sorted.
    Map(BTreeMap<String, Expression>),
    /// Bare reference to another object, e.g.
    /// `openstack_networking_router_v2.router_1.id`.
    Traversal(Traversal),
}

impl Expression {
    /// Build an expression out of a JSON value.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(val) => Self::Bool(*val),
            Value::Number(val) => Self::Number(val.clone()),
            Value::String(val) => Self::String(val.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => Self::Map(
                map.iter()
                    .map(|(key, val)| (key.clone(), Self::from_json(val)))
                    .collect(),
            ),
        }
    }

    /// Literal scalar value in the form Terraform stores it in the state, or
    /// `None` for references and collections.
    pub fn as_literal(&self) -> Option<String> {
        match self {
            Self::Bool(val) => Some(val.to_string()),
            Self::Number(val) => Some(val.to_string()),
            Self::String(val) => Some(val.clone()),
            _ => None,
        }
    }

    pub(crate) fn write(&self, out: &mut String, indent: usize) -> Result<(), HclError> {
        match self {
            Self::Null => out.push_str("null"),
            Self::Bool(val) => out.push_str(if *val { "true" } else { "false" }),
            Self::Number(val) => out.push_str(&val.to_string()),
            Self::String(val) => out.push_str(&quote(val)),
            Self::Traversal(val) => val.write(out)?,
            Self::List(items) => {
                if items.is_empty() {
                    out.push_str("[]");
                    return Ok(());
                }
                let inline = items
                    .iter()
                    .all(|item| !matches!(item, Self::List(_) | Self::Map(_)));
                if inline {
                    let mut line = String::from("[");
                    for (idx, item) in items.iter().enumerate() {
                        if idx > 0 {
                            line.push_str(", ");
                        }
                        item.write(&mut line, indent)?;
                    }
                    line.push(']');
                    if line.len() <= MAX_INLINE_LIST {
                        out.push_str(&line);
                        return Ok(());
                    }
                }
                out.push_str("[\n");
                for item in items {
                    out.push_str(&INDENT.repeat(indent + 1));
                    item.write(out, indent + 1)?;
                    out.push_str(",\n");
                }
                out.push_str(&INDENT.repeat(indent));
                out.push(']');
            }
            Self::Map(map) => {
                if map.is_empty() {
                    out.push_str("{}");
                    return Ok(());
                }
                out.push_str("{\n");
                for (key, val) in map {
                    out.push_str(&INDENT.repeat(indent + 1));
                    if is_identifier(key) {
                        out.push_str(key);
                    } else {
                        out.push_str(&quote(key));
                    }
                    out.push_str(" = ");
                    val.write(out, indent + 1)?;
                    out.push('\n');
                }
                out.push_str(&INDENT.repeat(indent));
                out.push('}');
            }
        }
        Ok(())
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for Expression {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for Expression {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Expression {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for Expression {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for Expression {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<Traversal> for Expression {
    fn from(value: Traversal) -> Self {
        Self::Traversal(value)
    }
}

impl<T: Into<Expression>> From<Vec<T>> for Expression {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Expression>> From<BTreeMap<String, T>> for Expression {
    fn from(value: BTreeMap<String, T>) -> Self {
        Self::Map(value.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Single step of a [`Traversal`].
#[derive(Clone, Debug, PartialEq)]
pub enum TraversalStep {
    Attr(String),
    Index(usize),
}

/// Reference to another object of the configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Traversal {
    root: String,
    steps: Vec<TraversalStep>,
}

impl Traversal {
    pub fn new<S: Into<String>>(root: S) -> Self {
        Self {
            root: root.into(),
            steps: Vec::new(),
        }
    }

    /// Append an attribute access.
    pub fn attr<S: Into<String>>(mut self, name: S) -> Self {
        self.steps.push(TraversalStep::Attr(name.into()));
        self
    }

    /// Append an index access.
    pub fn index(mut self, idx: usize) -> Self {
        self.steps.push(TraversalStep::Index(idx));
        self
    }

    /// Parse the dotted (flatmap like) notation: numeric segments become
    /// index accesses, so `a.b.0.c` is rendered as `a.b[0].c`.
    pub fn parse(reference: &str) -> Result<Self, HclError> {
        let mut segments = reference.split('.');
        let root = segments
            .next()
            .filter(|root| is_identifier(root))
            .ok_or_else(|| HclError::InvalidTraversal(reference.into()))?;
        let mut traversal = Self::new(root);
        for segment in segments {
            if let Ok(idx) = segment.parse::<usize>() {
                traversal = traversal.index(idx);
            } else if is_identifier(segment) {
                traversal = traversal.attr(segment);
            } else {
                return Err(HclError::InvalidTraversal(reference.into()));
            }
        }
        Ok(traversal)
    }

    fn write(&self, out: &mut String) -> Result<(), HclError> {
        if !is_identifier(&self.root) {
            return Err(HclError::InvalidIdentifier(self.root.clone()));
        }
        out.push_str(&self.root);
        for step in &self.steps {
            match step {
                TraversalStep::Attr(name) => {
                    if !is_identifier(name) {
                        return Err(HclError::InvalidIdentifier(name.clone()));
                    }
                    out.push('.');
                    out.push_str(name);
                }
                TraversalStep::Index(idx) => {
                    let _ = write!(out, "[{idx}]");
                }
            }
        }
        Ok(())
    }
}

/// Quote and escape a string literal. Template introducers are doubled so
/// values are never interpolated.
pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
