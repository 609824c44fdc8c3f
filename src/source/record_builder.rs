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

//! Assembly of the outbound [`SourceRecord`] from a reader's output.
//!
//! A [`SourceRecordBuilder`] is configured once, then asked to `build` the
//! record. Configuration goes through `&mut self` and building through
//! `&self`, so the borrow checker keeps the two phases apart.
use std::fmt::{Debug, Formatter};

use tracing::{debug, trace};

use crate::message::{ConnectHeaders, Coordinates, SchemaAndValue, SourceRecord};
use crate::service::AssemblerConfig;
use crate::{AppError, AppResult};

use super::file_meta::FileObjectMeta;

/// Lazily computes a record key or value. `Ok(None)` means "nothing
/// produced"; an `Err` aborts the build and reaches the caller unchanged.
pub type ValueSupplier = Box<dyn Fn() -> AppResult<Option<SchemaAndValue>> + Send + Sync>;

pub struct SourceRecordBuilder {
    topic: Option<String>,
    partition: Option<i32>,
    key_supplier: Option<ValueSupplier>,
    value_supplier: ValueSupplier,
    timestamp: Option<i64>,
    additional_headers: Option<ConnectHeaders>,
    header_prefix: Option<String>,
}

impl Debug for SourceRecordBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRecordBuilder")
            .field("topic", &self.topic)
            .field("partition", &self.partition)
            .field("has_key_supplier", &self.key_supplier.is_some())
            .field("timestamp", &self.timestamp)
            .field(
                "additional_headers",
                &self.additional_headers.as_ref().map(|h| h.len()),
            )
            .field("header_prefix", &self.header_prefix)
            .finish()
    }
}

impl SourceRecordBuilder {
    pub fn new<F>(value_supplier: F) -> Self
    where
        F: Fn() -> AppResult<Option<SchemaAndValue>> + Send + Sync + 'static,
    {
        Self {
            topic: None,
            partition: None,
            key_supplier: None,
            value_supplier: Box::new(value_supplier),
            timestamp: None,
            additional_headers: None,
            header_prefix: None,
        }
    }

    /// Same as [`new`](Self::new) for callers whose value supplier is itself
    /// optional; a missing supplier is rejected here rather than at build time.
    pub fn try_new<F>(value_supplier: Option<F>) -> AppResult<Self>
    where
        F: Fn() -> AppResult<Option<SchemaAndValue>> + Send + Sync + 'static,
    {
        value_supplier
            .map(Self::new)
            .ok_or_else(|| AppError::InvalidRecord("value supplier cannot be null".to_string()))
    }

    pub fn with_key<F>(&mut self, key_supplier: F) -> &mut Self
    where
        F: Fn() -> AppResult<Option<SchemaAndValue>> + Send + Sync + 'static,
    {
        self.key_supplier = Some(Box::new(key_supplier));
        self
    }

    pub fn with_topic(&mut self, topic: impl Into<String>) -> &mut Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_partition(&mut self, partition: i32) -> &mut Self {
        self.partition = Some(partition);
        self
    }

    /// epoch millis
    pub fn with_timestamp(&mut self, timestamp: i64) -> &mut Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Headers appended after the file metadata headers. Replaces any set
    /// given earlier.
    pub fn with_headers(&mut self, headers: ConnectHeaders) -> &mut Self {
        self.additional_headers = Some(headers);
        self
    }

    /// Prefix of the headers rendered from file metadata. Without one the
    /// metadata renders its default header names.
    pub fn with_header_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.header_prefix = Some(prefix.into());
        self
    }

    pub fn clear_key(&mut self) -> &mut Self {
        self.key_supplier = None;
        self
    }

    /// Falls back to the default topic given at build time.
    pub fn clear_topic(&mut self) -> &mut Self {
        self.topic = None;
        self
    }

    /// Falls back to the default partition given at build time.
    pub fn clear_partition(&mut self) -> &mut Self {
        self.partition = None;
        self
    }

    pub fn clear_timestamp(&mut self) -> &mut Self {
        self.timestamp = None;
        self
    }

    pub fn clear_headers(&mut self) -> &mut Self {
        self.additional_headers = None;
        self
    }

    pub fn clear_header_prefix(&mut self) -> &mut Self {
        self.header_prefix = None;
        self
    }

    /// Assembles one record.
    ///
    /// Fails with [`AppError::InvalidRecord`] when a position or the file
    /// metadata is missing (suppliers are not called in that case), or when
    /// neither a key nor a value is produced. Topic and partition fall back to
    /// the given defaults and stay unset if those are missing too.
    pub fn build(
        &self,
        source_partition: Option<Coordinates>,
        source_offset: Option<Coordinates>,
        metadata: Option<&dyn FileObjectMeta>,
        default_topic: Option<&str>,
        default_partition: Option<i32>,
    ) -> AppResult<SourceRecord> {
        self.assemble(
            source_partition,
            source_offset,
            metadata,
            default_topic,
            default_partition,
            self.header_prefix.as_deref(),
        )
    }

    /// [`build`](Self::build) with routing defaults and the header prefix
    /// taken from `config`. A prefix set on the builder takes precedence.
    pub fn build_with_defaults(
        &self,
        source_partition: Option<Coordinates>,
        source_offset: Option<Coordinates>,
        metadata: Option<&dyn FileObjectMeta>,
        config: &AssemblerConfig,
    ) -> AppResult<SourceRecord> {
        self.assemble(
            source_partition,
            source_offset,
            metadata,
            config.routing.default_topic.as_deref(),
            config.routing.default_partition,
            self.header_prefix
                .as_deref()
                .or(Some(config.headers.prefix.as_str())),
        )
    }

    fn assemble(
        &self,
        source_partition: Option<Coordinates>,
        source_offset: Option<Coordinates>,
        metadata: Option<&dyn FileObjectMeta>,
        default_topic: Option<&str>,
        default_partition: Option<i32>,
        header_prefix: Option<&str>,
    ) -> AppResult<SourceRecord> {
        let source_partition = source_partition.ok_or_else(|| reject("source partition"))?;
        let source_offset = source_offset.ok_or_else(|| reject("source offset"))?;
        let metadata = metadata.ok_or_else(|| reject("metadata"))?;

        let key = match &self.key_supplier {
            Some(supplier) => supplier()?,
            None => None,
        };
        let value = (self.value_supplier)()?;

        if key.is_none() && value.is_none() {
            debug!("rejecting record from {}: no key and no value", metadata.uri());
            return Err(AppError::InvalidRecord(
                "key and value cannot be both null".to_string(),
            ));
        }

        let mut headers = match header_prefix {
            Some(prefix) => metadata.to_connect_headers_with_prefix(prefix),
            None => metadata.to_connect_headers(),
        };
        if let Some(additional) = &self.additional_headers {
            headers.add_all(additional);
        }

        let record = SourceRecord {
            source_partition,
            source_offset,
            topic: self
                .topic
                .clone()
                .or_else(|| default_topic.map(str::to_string)),
            partition: self.partition.or(default_partition),
            key: key.unwrap_or_else(SchemaAndValue::null),
            value: value.unwrap_or_else(SchemaAndValue::null),
            timestamp: self.timestamp,
            headers,
        };
        trace!("assembled record from {}: {}", metadata.uri(), record);
        Ok(record)
    }
}

fn reject(input: &str) -> AppError {
    debug!("rejecting record: {} is missing", input);
    AppError::InvalidRecord(format!("{input} cannot be null"))
}
