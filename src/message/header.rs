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

use super::data::{SchemaAndValue, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    key: String,
    value: SchemaAndValue,
}

impl Header {
    pub fn new(key: impl Into<String>, value: SchemaAndValue) -> Header {
        Header {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &SchemaAndValue {
        &self.value
    }
}

/// Ordered header list attached to a record.
///
/// Appending never replaces: two headers may share a name and both are kept,
/// in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectHeaders {
    headers: Vec<Header>,
}

impl ConnectHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<String>, value: SchemaAndValue) -> &mut Self {
        self.headers.push(Header::new(key, value));
        self
    }

    pub fn add_string(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.add(key, SchemaAndValue::string(value))
    }

    pub fn add_int64(&mut self, key: impl Into<String>, value: i64) -> &mut Self {
        self.add(key, SchemaAndValue::int64(value))
    }

    /// Appends every header of `other` after the current ones.
    pub fn add_all(&mut self, other: &ConnectHeaders) -> &mut Self {
        self.headers.extend(other.headers.iter().cloned());
        self
    }

    pub fn last_with_name(&self, key: &str) -> Option<&Header> {
        self.headers.iter().rev().find(|h| h.key == key)
    }

    pub fn all_with_name<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Header> + 'a {
        self.headers.iter().filter(move |h| h.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.headers.iter()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// `(key, string payload)` pairs, handy for logging and assertions.
    pub fn string_entries(&self) -> Vec<(&str, Option<&str>)> {
        self.headers
            .iter()
            .map(|h| (h.key(), h.value().value.as_str()))
            .collect()
    }
}

impl Extend<Header> for ConnectHeaders {
    fn extend<T: IntoIterator<Item = Header>>(&mut self, iter: T) {
        self.headers.extend(iter);
    }
}

impl FromIterator<Header> for ConnectHeaders {
    fn from_iter<T: IntoIterator<Item = Header>>(iter: T) -> Self {
        ConnectHeaders {
            headers: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ConnectHeaders {
    type Item = Header;
    type IntoIter = std::vec::IntoIter<Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConnectHeaders {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.iter()
    }
}

impl From<Vec<(String, Value)>> for ConnectHeaders {
    fn from(entries: Vec<(String, Value)>) -> Self {
        entries
            .into_iter()
            .map(|(key, value)| Header::new(key, SchemaAndValue::new(None, value)))
            .collect()
    }
}
