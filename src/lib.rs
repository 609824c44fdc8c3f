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

//! Record assembly for file ingestion.
//!
//! Readers hand a [`SourceRecordBuilder`] the lazily computed key and value of
//! a record, its source positions and the metadata of the file it came from;
//! the builder returns the [`SourceRecord`] the publish stage sends to a topic.
mod message;
mod service;
mod source;

pub use message::{
    ConnectHeaders, Coordinates, Header, Schema, SchemaAndValue, SchemaType, SourceRecord, Value,
};
pub use service::{
    setup_local_tracing, AppError, AppResult, AssemblerConfig, HeadersConfig, RoutingConfig,
    StaticHeader, DEFAULT_HEADER_PREFIX,
};
pub use source::{
    FileContentDigest, FileObjectMeta, GenericFileObjectMeta, LocalFileObjectMeta,
    SourceRecordBuilder, ValueSupplier, CRC32C_ALGORITHM,
};
