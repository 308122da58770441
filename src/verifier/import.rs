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
//! # Import verification
//!
//! An imported resource must carry the same attributes as the applied one.
//! `timeouts` only live in the configuration and are never compared.
use std::collections::BTreeSet;
use std::fmt;

use crate::state::Attributes;

/// Attributes prefixes which are never compared.
const ALWAYS_IGNORED: &[&str] = &["timeouts"];

/// Attribute differing between the imported and the applied resource.
#[derive(Clone, Debug, PartialEq)]
pub struct Difference {
    pub key: String,
    /// Value of the imported resource.
    pub actual: Option<String>,
    /// Value of the applied resource.
    pub expected: Option<String>,
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |val: &Option<String>| match val {
            Some(val) => format!("`{val}`"),
            None => "<absent>".to_string(),
        };
        write!(
            f,
            "{}: imported {}, applied {}",
            self.key,
            show(&self.actual),
            show(&self.expected)
        )
    }
}

/// Whether the key is the prefix itself or nested below it.
fn has_prefix(key: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('.');
    key == prefix
        || key
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('.'))
}

fn is_ignored(key: &str, ignore: &[String]) -> bool {
    ALWAYS_IGNORED.iter().any(|prefix| has_prefix(key, prefix))
        || ignore.iter().any(|prefix| has_prefix(key, prefix))
}

/// All the attributes differing between the `imported` and the `applied`
/// resource. A missing attribute equals its zero value.
pub fn diff(applied: &Attributes, imported: &Attributes, ignore: &[String]) -> Vec<Difference> {
    let keys: BTreeSet<&str> = applied
        .iter()
        .chain(imported.iter())
        .map(|(key, _)| key)
        .filter(|key| !is_ignored(key, ignore))
        .collect();

    keys.into_iter()
        .filter(|key| applied.get_or_zero(key) != imported.get_or_zero(key))
        .map(|key| Difference {
            key: key.to_string(),
            actual: imported.get(key).map(ToString::to_string),
            expected: applied.get(key).map(ToString::to_string),
        })
        .collect()
}
