// Copyright 2025 jonefeewang@gmail.com
//
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

use std::collections::btree_map;
use std::collections::BTreeMap;

use super::data::Value;

/// Opaque position map (source partition or source offset) supplied by the
/// position tracker. Records carry it as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coordinates(BTreeMap<String, Value>);

impl Coordinates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for Coordinates {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Coordinates(map)
    }
}

impl FromIterator<(String, Value)> for Coordinates {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Coordinates(iter.into_iter().collect())
    }
}
