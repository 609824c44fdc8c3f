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

//! Descriptions of the file a record was read from.
//!
//! The record builder only needs [`FileObjectMeta::to_connect_headers`]; the
//! remaining accessors exist so readers and tests can build and inspect
//! metadata without going through headers.
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::message::{ConnectHeaders, SchemaAndValue, Value};
use crate::service::DEFAULT_HEADER_PREFIX;
use crate::AppResult;

pub const CRC32C_ALGORITHM: &str = "CRC32C";
const DIGEST_READ_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContentDigest {
    pub digest: String,
    pub algorithm: String,
}

impl FileContentDigest {
    pub fn new(digest: impl Into<String>, algorithm: impl Into<String>) -> Self {
        Self {
            digest: digest.into(),
            algorithm: algorithm.into(),
        }
    }
}

pub trait FileObjectMeta {
    fn uri(&self) -> &str;

    fn name(&self) -> &str;

    fn content_length(&self) -> Option<u64>;

    /// epoch millis
    fn last_modified(&self) -> Option<i64>;

    fn content_digest(&self) -> Option<&FileContentDigest>;

    fn user_defined_metadata(&self) -> &BTreeMap<String, Value>;

    fn to_connect_headers(&self) -> ConnectHeaders {
        self.to_connect_headers_with_prefix(DEFAULT_HEADER_PREFIX)
    }

    /// Renders the metadata as headers named `<prefix><attribute>`.
    ///
    /// Order: name, uri, contentLength, lastModified, the digest pair when
    /// known, then user-defined entries sorted by key.
    fn to_connect_headers_with_prefix(&self, prefix: &str) -> ConnectHeaders {
        let mut headers = ConnectHeaders::new();
        headers
            .add_string(format!("{prefix}name"), self.name())
            .add_string(format!("{prefix}uri"), self.uri());
        match self.content_length() {
            Some(length) => headers.add_int64(
                format!("{prefix}contentLength"),
                i64::try_from(length).unwrap_or(i64::MAX),
            ),
            None => headers.add(format!("{prefix}contentLength"), SchemaAndValue::null()),
        };
        match self.last_modified() {
            Some(millis) => headers.add_int64(format!("{prefix}lastModified"), millis),
            None => headers.add(format!("{prefix}lastModified"), SchemaAndValue::null()),
        };
        if let Some(digest) = self.content_digest() {
            headers
                .add_string(format!("{prefix}contentDigest.digest"), digest.digest.clone())
                .add_string(
                    format!("{prefix}contentDigest.algorithm"),
                    digest.algorithm.clone(),
                );
        }
        for (key, value) in self.user_defined_metadata() {
            headers.add(
                format!("{prefix}{key}"),
                SchemaAndValue::new(None, value.clone()),
            );
        }
        headers
    }
}

/// Metadata assembled by hand, e.g. for objects that are not local files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericFileObjectMeta {
    uri: String,
    name: String,
    content_length: Option<u64>,
    last_modified: Option<i64>,
    content_digest: Option<FileContentDigest>,
    user_defined_metadata: BTreeMap<String, Value>,
}

impl GenericFileObjectMeta {
    pub fn new(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_content_length(mut self, content_length: u64) -> Self {
        self.content_length = Some(content_length);
        self
    }

    pub fn with_last_modified(mut self, last_modified: i64) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    pub fn with_content_digest(mut self, digest: FileContentDigest) -> Self {
        self.content_digest = Some(digest);
        self
    }

    pub fn with_user_defined(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.user_defined_metadata.insert(key.into(), value.into());
        self
    }
}

impl FileObjectMeta for GenericFileObjectMeta {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    fn last_modified(&self) -> Option<i64> {
        self.last_modified
    }

    fn content_digest(&self) -> Option<&FileContentDigest> {
        self.content_digest.as_ref()
    }

    fn user_defined_metadata(&self) -> &BTreeMap<String, Value> {
        &self.user_defined_metadata
    }
}

/// Metadata of a file on the local filesystem, digest included.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFileObjectMeta {
    path: PathBuf,
    meta: GenericFileObjectMeta,
}

impl LocalFileObjectMeta {
    pub fn from_path<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = std::fs::canonicalize(path.as_ref())?;
        let fs_meta = std::fs::metadata(&path)?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let uri = format!("file://{}", path.display());

        let mut meta = GenericFileObjectMeta::new(uri, name)
            .with_content_length(fs_meta.len())
            .with_content_digest(FileContentDigest::new(
                crc32c_of(&path)?.to_string(),
                CRC32C_ALGORITHM,
            ));
        if let Ok(modified) = fs_meta.modified() {
            let modified: DateTime<Utc> = modified.into();
            meta = meta.with_last_modified(modified.timestamp_millis());
        }

        trace!(
            "local file meta: {} length: {:?} digest: {:?}",
            meta.uri(),
            meta.content_length(),
            meta.content_digest()
        );
        Ok(Self { path, meta })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn with_user_defined(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta = self.meta.with_user_defined(key, value);
        self
    }
}

fn crc32c_of(path: &Path) -> AppResult<u32> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut buf = vec![0u8; DIGEST_READ_BUFFER_SIZE];
    let mut crc = 0u32;
    loop {
        let read = reader.read(&mut buf)?;
        if read == 0 {
            break;
        }
        crc = crc32c::crc32c_append(crc, &buf[..read]);
    }
    Ok(crc)
}

impl FileObjectMeta for LocalFileObjectMeta {
    fn uri(&self) -> &str {
        self.meta.uri()
    }

    fn name(&self) -> &str {
        self.meta.name()
    }

    fn content_length(&self) -> Option<u64> {
        self.meta.content_length()
    }

    fn last_modified(&self) -> Option<i64> {
        self.meta.last_modified()
    }

    fn content_digest(&self) -> Option<&FileContentDigest> {
        self.meta.content_digest()
    }

    fn user_defined_metadata(&self) -> &BTreeMap<String, Value> {
        self.meta.user_defined_metadata()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_header_rendering_order() {
        let meta = GenericFileObjectMeta::new("s3://bucket/a.csv", "a.csv")
            .with_content_length(12)
            .with_last_modified(1_700_000_000_000)
            .with_content_digest(FileContentDigest::new("abc", "MD5"))
            .with_user_defined("owner", "ops")
            .with_user_defined("batch", 4i64);

        let headers = meta.to_connect_headers();
        let keys: Vec<&str> = headers.iter().map(|h| h.key()).collect();
        assert_eq!(
            keys,
            vec![
                "connect.file.name",
                "connect.file.uri",
                "connect.file.contentLength",
                "connect.file.lastModified",
                "connect.file.contentDigest.digest",
                "connect.file.contentDigest.algorithm",
                "connect.file.batch",
                "connect.file.owner",
            ]
        );
        assert_eq!(
            headers
                .last_with_name("connect.file.contentLength")
                .and_then(|h| h.value().value.as_i64()),
            Some(12)
        );
    }

    #[test]
    fn test_unknown_attributes_render_as_null() {
        let headers = GenericFileObjectMeta::new("file:///x", "x").to_connect_headers_with_prefix("f.");
        assert_eq!(headers.len(), 4);
        assert!(headers
            .last_with_name("f.lastModified")
            .is_some_and(|h| h.value().is_null()));
        assert!(headers.last_with_name("f.contentDigest.digest").is_none());
    }

    #[test]
    fn test_local_file_meta() -> AppResult<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"123456789")?;
        file.flush()?;

        let meta = LocalFileObjectMeta::from_path(file.path())?;
        assert_eq!(meta.content_length(), Some(9));
        assert!(meta.uri().starts_with("file://"));
        assert!(meta.last_modified().is_some());
        // CRC-32C check value
        assert_eq!(
            meta.content_digest(),
            Some(&FileContentDigest::new(
                0xE306_9283u32.to_string(),
                CRC32C_ALGORITHM
            ))
        );
        Ok(())
    }

    #[test]
    fn test_local_file_meta_missing_file() {
        let result = LocalFileObjectMeta::from_path("/no/such/file/for/meta");
        assert!(matches!(result, Err(crate::AppError::IoError(_))));
    }
}
