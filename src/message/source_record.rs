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

use std::fmt::{Display, Formatter};

use super::coordinates::Coordinates;
use super::data::{Schema, SchemaAndValue, Value};
use super::header::ConnectHeaders;

/// A record ready for the publish stage.
///
/// `topic` and `partition` may both be unset; the publish stage is then
/// responsible for routing (e.g. through its partitioner).
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    pub source_partition: Coordinates,
    pub source_offset: Coordinates,
    pub topic: Option<String>,
    pub partition: Option<i32>,
    pub key: SchemaAndValue,
    pub value: SchemaAndValue,
    pub timestamp: Option<i64>,
    pub headers: ConnectHeaders,
}

impl SourceRecord {
    pub fn key_schema(&self) -> Option<&Schema> {
        self.key.schema.as_ref()
    }

    pub fn key(&self) -> &Value {
        &self.key.value
    }

    pub fn value_schema(&self) -> Option<&Schema> {
        self.value.schema.as_ref()
    }

    pub fn value(&self) -> &Value {
        &self.value.value
    }
}

impl Display for SourceRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SourceRecord {{ topic: {}, partition: {}, timestamp: {}, headers: {}, key: {}, value: {} }}",
            self.topic.as_deref().unwrap_or("<unset>"),
            self.partition
                .map_or_else(|| "<unset>".to_string(), |p| p.to_string()),
            self.timestamp
                .map_or_else(|| "<unset>".to_string(), |t| t.to_string()),
            self.headers.len(),
            type_name(&self.key),
            type_name(&self.value),
        )
    }
}

fn type_name(value: &SchemaAndValue) -> String {
    value
        .schema_type()
        .map_or_else(|| "null".to_string(), |t| t.to_string())
}
