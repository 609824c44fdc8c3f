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

//! Typed payloads carried by source records.
//!
//! A record key, a record value and every header value are a
//! [`SchemaAndValue`]: a payload plus the schema describing it. Either half
//! may be missing, a schemaless payload is common for raw lines.
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use bytes::Bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaType {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Boolean,
    String,
    Bytes,
    Array,
    Map,
    Struct,
}

impl Display for SchemaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SchemaType::Int8 => "int8",
            SchemaType::Int16 => "int16",
            SchemaType::Int32 => "int32",
            SchemaType::Int64 => "int64",
            SchemaType::Float32 => "float32",
            SchemaType::Float64 => "float64",
            SchemaType::Boolean => "boolean",
            SchemaType::String => "string",
            SchemaType::Bytes => "bytes",
            SchemaType::Array => "array",
            SchemaType::Map => "map",
            SchemaType::Struct => "struct",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub schema_type: SchemaType,
    pub optional: bool,
    pub name: Option<String>,
}

impl Schema {
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            optional: false,
            name: None,
        }
    }

    pub fn optional(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            optional: true,
            name: None,
        }
    }

    pub fn optional_string() -> Self {
        Self::optional(SchemaType::String)
    }

    pub fn optional_int64() -> Self {
        Self::optional(SchemaType::Int64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Bytes(Bytes),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// named fields, in field-name order
    Struct(BTreeMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The schema type this payload is an instance of; `None` for null.
    pub fn schema_type(&self) -> Option<SchemaType> {
        let schema_type = match self {
            Value::Null => return None,
            Value::Boolean(_) => SchemaType::Boolean,
            Value::Int8(_) => SchemaType::Int8,
            Value::Int16(_) => SchemaType::Int16,
            Value::Int32(_) => SchemaType::Int32,
            Value::Int64(_) => SchemaType::Int64,
            Value::Float32(_) => SchemaType::Float32,
            Value::Float64(_) => SchemaType::Float64,
            Value::String(_) => SchemaType::String,
            Value::Bytes(_) => SchemaType::Bytes,
            Value::Array(_) => SchemaType::Array,
            Value::Map(_) => SchemaType::Map,
            Value::Struct(_) => SchemaType::Struct,
        };
        Some(schema_type)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(v) => Some(*v as i64),
            Value::Int16(v) => Some(*v as i64),
            Value::Int32(v) => Some(*v as i64),
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Value::Bytes(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaAndValue {
    pub schema: Option<Schema>,
    pub value: Value,
}

impl SchemaAndValue {
    pub fn new(schema: Option<Schema>, value: Value) -> Self {
        Self { schema, value }
    }

    /// The (no schema, null) pair a record carries for an absent key or value.
    pub fn null() -> Self {
        Self {
            schema: None,
            value: Value::Null,
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(Some(Schema::optional_string()), Value::String(value.into()))
    }

    pub fn int64(value: i64) -> Self {
        Self::new(Some(Schema::optional_int64()), Value::Int64(value))
    }

    pub fn is_null(&self) -> bool {
        self.schema.is_none() && self.value.is_null()
    }

    /// Declared schema type, or the payload's own type when schemaless.
    pub fn schema_type(&self) -> Option<SchemaType> {
        self.schema
            .as_ref()
            .map(|s| s.schema_type)
            .or_else(|| self.value.schema_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_pair() {
        let null = SchemaAndValue::null();
        assert!(null.is_null());
        assert!(!SchemaAndValue::new(None, Value::from("x")).is_null());
        // a typed null is still a value
        assert!(!SchemaAndValue::new(Some(Schema::optional_string()), Value::Null).is_null());
    }

    #[test]
    fn test_shortcuts_carry_optional_schemas() {
        let s = SchemaAndValue::string("line");
        assert_eq!(s.schema, Some(Schema::optional(SchemaType::String)));
        assert_eq!(s.value.as_str(), Some("line"));

        let n = SchemaAndValue::int64(42);
        assert_eq!(n.schema.map(|s| s.schema_type), Some(SchemaType::Int64));
        assert_eq!(n.value.as_i64(), Some(42));
    }

    #[test]
    fn test_every_schema_type_has_a_payload() {
        let payloads = vec![
            (Value::Int8(1), SchemaType::Int8),
            (Value::Int16(2), SchemaType::Int16),
            (Value::Float32(0.5), SchemaType::Float32),
            (Value::Struct(BTreeMap::new()), SchemaType::Struct),
            (Value::Bytes(Bytes::from_static(b"x")), SchemaType::Bytes),
        ];
        for (value, expected) in payloads {
            assert_eq!(value.schema_type(), Some(expected));
            let typed = SchemaAndValue::new(Some(Schema::new(expected)), value);
            assert_eq!(typed.schema_type(), Some(expected));
        }
        assert_eq!(Value::Int16(-3).as_i64(), Some(-3));
        assert_eq!(Value::Null.schema_type(), None);
    }

    #[test]
    fn test_schemaless_payload_reports_its_own_type() {
        let raw = SchemaAndValue::new(None, Value::from(true));
        assert_eq!(raw.schema_type(), Some(SchemaType::Boolean));
        assert_eq!(SchemaAndValue::null().schema_type(), None);
        assert_eq!(SchemaType::Int64.to_string(), "int64");
    }
}
