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
//! # Flattened attributes
//!
//! Nested JSON values are flattened into dotted keys the way the Terraform
//! test framework addresses them: `tags.#` holds the length of a list,
//! `value_specs.%` the size of a map and `external_fixed_ip.0.subnet_id` an
//! attribute of the first nested block. Nulls are omitted.
use serde_json::Value;
use std::collections::BTreeMap;

/// Flattened attribute view of a resource.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    /// Flatten the attributes of a JSON object. Anything else yields an empty
    /// set.
    pub fn flatten(value: &Value) -> Self {
        let mut out = BTreeMap::new();
        if let Value::Object(map) = value {
            for (key, val) in map {
                flatten_value(key, val, false, &mut out);
            }
        }
        Self(out)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value of the key with the zero value for a missing one: `"0"` for the
    /// count keys and `""` for everything else.
    pub fn get_or_zero(&self, key: &str) -> &str {
        match self.get(key) {
            Some(val) => val,
            None if is_count_key(key) => "0",
            None => "",
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Whether the key holds the size of a list or a map.
pub fn is_count_key(key: &str) -> bool {
    key.ends_with(".#") || key.ends_with(".%")
}

/// Flatten a single value. Objects which are elements of a list are nested
/// blocks and carry no size key.
fn flatten_value(prefix: &str, value: &Value, block: bool, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Null => {}
        Value::Bool(val) => {
            out.insert(prefix.to_string(), val.to_string());
        }
        Value::Number(val) => {
            out.insert(prefix.to_string(), val.to_string());
        }
        Value::String(val) => {
            out.insert(prefix.to_string(), val.clone());
        }
        Value::Array(items) => {
            out.insert(format!("{prefix}.#"), items.len().to_string());
            for (idx, item) in items.iter().enumerate() {
                flatten_value(&format!("{prefix}.{idx}"), item, true, out);
            }
        }
        Value::Object(map) => {
            if !block {
                let size = map.values().filter(|val| !val.is_null()).count();
                out.insert(format!("{prefix}.%"), size.to_string());
            }
            for (key, val) in map {
                flatten_value(&format!("{prefix}.{key}"), val, false, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_flatten() {
        let attrs = Attributes::flatten(&json!({
            "id": "r1",
            "admin_state_up": true,
            "description": "",
            "distributed": null,
            "ram": 2048,
            "tags": ["tag1", "tag2"],
            "value_specs": {"a": "b", "c": null},
            "external_fixed_ip": [
                {"subnet_id": "s1", "ip_address": "10.0.0.2"},
                {"subnet_id": "s1", "ip_address": "10.0.0.3"}
            ],
            "vendor_options": []
        }));

        assert_eq!(Some("r1"), attrs.get("id"));
        assert_eq!(Some("true"), attrs.get("admin_state_up"));
        assert_eq!(Some(""), attrs.get("description"));
        assert_eq!(None, attrs.get("distributed"));
        assert_eq!(Some("2048"), attrs.get("ram"));
        assert_eq!(Some("2"), attrs.get("tags.#"));
        assert_eq!(Some("tag2"), attrs.get("tags.1"));
        assert_eq!(Some("1"), attrs.get("value_specs.%"));
        assert_eq!(Some("b"), attrs.get("value_specs.a"));
        assert_eq!(Some("2"), attrs.get("external_fixed_ip.#"));
        assert_eq!(Some("s1"), attrs.get("external_fixed_ip.0.subnet_id"));
        assert_eq!(Some("10.0.0.3"), attrs.get("external_fixed_ip.1.ip_address"));
        assert!(!attrs.contains_key("external_fixed_ip.0.%"));
        assert_eq!(Some("0"), attrs.get("vendor_options.#"));
    }

    #[test]
    fn test_get_or_zero() {
        let attrs = Attributes::flatten(&json!({"name": "router_2"}));
        assert_eq!("router_2", attrs.get_or_zero("name"));
        assert_eq!("", attrs.get_or_zero("description"));
        assert_eq!("0", attrs.get_or_zero("external_fixed_ip.#"));
        assert_eq!("0", attrs.get_or_zero("value_specs.%"));
    }

    #[test]
    fn test_flatten_non_object() {
        assert!(Attributes::flatten(&json!(["a"])).is_empty());
    }
}
