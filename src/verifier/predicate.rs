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
//! # Attribute predicates
use regex::Regex;
use serde_json::Value;
use std::fmt;

use crate::state::Attributes;

const ABSENT: &str = "<absent>";

/// Expected value assertion against a single attribute.
///
/// The flattened attribute keys are used by all the variants except
/// [`Predicate::Json`], which addresses the raw object with a JSON pointer.
#[derive(Clone, Debug)]
pub enum Predicate {
    /// Exact match. A missing attribute equals its zero value (`""`, or `"0"`
    /// for the `.#`/`.%` count keys).
    Equals { key: String, value: String },
    /// The attribute is set.
    Present(String),
    /// The attribute is not set.
    Absent(String),
    /// The attribute matches the regular expression.
    Matches { key: String, pattern: Regex },
    /// Structural equality of the value under the JSON pointer.
    Json { pointer: String, value: Value },
}

/// Failed predicate.
#[derive(Clone, Debug, PartialEq)]
pub struct Mismatch {
    pub key: String,
    pub expected: String,
    pub observed: String,
}

impl Predicate {
    pub fn equals<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        Self::Equals {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn present<K: Into<String>>(key: K) -> Self {
        Self::Present(key.into())
    }

    pub fn absent<K: Into<String>>(key: K) -> Self {
        Self::Absent(key.into())
    }

    pub fn matches<K: Into<String>>(key: K, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::Matches {
            key: key.into(),
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn json<P: Into<String>>(pointer: P, value: Value) -> Self {
        Self::Json {
            pointer: pointer.into(),
            value,
        }
    }

    /// Attribute key (or JSON pointer) the predicate is about.
    pub fn key(&self) -> &str {
        match self {
            Self::Equals { key, .. } | Self::Matches { key, .. } => key,
            Self::Present(key) | Self::Absent(key) => key,
            Self::Json { pointer, .. } => pointer,
        }
    }

    /// Evaluate the predicate against the flattened attributes and the raw
    /// object they were flattened from.
    pub fn evaluate(&self, attributes: &Attributes, raw: &Value) -> Result<(), Mismatch> {
        let mismatch = |expected: String, observed: String| {
            Err(Mismatch {
                key: self.key().to_string(),
                expected,
                observed,
            })
        };
        match self {
            Self::Equals { key, value } => {
                let observed = attributes.get_or_zero(key);
                if observed == value {
                    Ok(())
                } else {
                    mismatch(value.clone(), observed.to_string())
                }
            }
            Self::Present(key) => match attributes.get(key) {
                Some(_) => Ok(()),
                None => mismatch("<present>".into(), ABSENT.into()),
            },
            Self::Absent(key) => match attributes.get(key) {
                None => Ok(()),
                Some(observed) => mismatch(ABSENT.into(), observed.to_string()),
            },
            Self::Matches { key, pattern } => match attributes.get(key) {
                Some(observed) if pattern.is_match(observed) => Ok(()),
                Some(observed) => mismatch(format!("/{pattern}/"), observed.to_string()),
                None => mismatch(format!("/{pattern}/"), ABSENT.into()),
            },
            Self::Json { pointer, value } => match raw.pointer(pointer) {
                Some(observed) if observed == value => Ok(()),
                Some(observed) => mismatch(value.to_string(), observed.to_string()),
                None => mismatch(value.to_string(), ABSENT.into()),
            },
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals { key, value } => write!(f, "{key} == {value:?}"),
            Self::Present(key) => write!(f, "{key} is set"),
            Self::Absent(key) => write!(f, "{key} is not set"),
            Self::Matches { key, pattern } => write!(f, "{key} =~ /{pattern}/"),
            Self::Json { pointer, value } => write!(f, "{pointer} == {value}"),
        }
    }
}
