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
//! # Random tokens
//!
//! Cases running against the same tenant use randomized names to avoid
//! collisions.
use rand::Rng;

/// Characters of [`rand_string`].
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz012346789";

/// Non-negative random integer.
pub fn rand_int() -> u32 {
    rand::rng().random_range(0..i32::MAX as u32)
}

/// `<prefix>-<random integer>`.
pub fn random_with_prefix(prefix: &str) -> String {
    format!("{prefix}-{}", rand_int())
}

/// Random lowercase alphanumeric string of the given length.
pub fn rand_string(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}
