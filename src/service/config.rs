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

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::message::ConnectHeaders;

use super::{AppError, AppResult};

pub const DEFAULT_HEADER_PREFIX: &str = "connect.file.";

/// Fallback routing handed to the record builder. Either field may be unset,
/// in which case the record leaves with no topic/partition and the publish
/// stage decides.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoutingConfig {
    pub default_topic: Option<String>,
    pub default_partition: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StaticHeader {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeadersConfig {
    /// prefix of the headers rendered from file metadata
    #[serde(default = "default_header_prefix")]
    pub prefix: String,
    /// extra headers attached to every record, in this order
    #[serde(default)]
    pub static_headers: Vec<StaticHeader>,
}

fn default_header_prefix() -> String {
    DEFAULT_HEADER_PREFIX.to_string()
}

impl Default for HeadersConfig {
    fn default() -> Self {
        Self {
            prefix: default_header_prefix(),
            static_headers: Vec::new(),
        }
    }
}

impl HeadersConfig {
    pub fn static_connect_headers(&self) -> ConnectHeaders {
        let mut headers = ConnectHeaders::new();
        for header in &self.static_headers {
            headers.add_string(header.key.clone(), header.value.clone());
        }
        headers
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssemblerConfig {
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub headers: HeadersConfig,
}

impl AssemblerConfig {
    pub fn set_up_config<P: AsRef<Path>>(path: P) -> AppResult<AssemblerConfig> {
        let path_str = path.as_ref().to_str().ok_or(AppError::InvalidValue(
            "config file path",
            path.as_ref().to_string_lossy().to_string(),
        ))?;
        let config = config::Config::builder()
            .add_source(config::File::with_name(path_str))
            .build()?;

        let assembler_config: AssemblerConfig = config.try_deserialize()?;
        Ok(assembler_config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::Builder;

    use super::*;

    #[test]
    fn test_load_full_config() -> AppResult<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(
            file,
            r#"
[routing]
default_topic = "file-events"
default_partition = 3

[headers]
prefix = "x.file."
static_headers = [
    {{ key = "env", value = "prod" }},
    {{ key = "team", value = "ingest" }},
]
"#
        )?;

        let config = AssemblerConfig::set_up_config(file.path())?;
        assert_eq!(config.routing.default_topic.as_deref(), Some("file-events"));
        assert_eq!(config.routing.default_partition, Some(3));
        assert_eq!(config.headers.prefix, "x.file.");

        let headers = config.headers.static_connect_headers();
        let keys: Vec<&str> = headers.iter().map(|h| h.key()).collect();
        assert_eq!(keys, vec!["env", "team"]);
        Ok(())
    }

    #[test]
    fn test_missing_sections_use_defaults() -> AppResult<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "[routing]")?;

        let config = AssemblerConfig::set_up_config(file.path())?;
        assert_eq!(config.routing, RoutingConfig::default());
        assert_eq!(config.headers.prefix, DEFAULT_HEADER_PREFIX);
        assert!(config.headers.static_headers.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = AssemblerConfig::set_up_config("/definitely/not/here/assembler");
        assert!(matches!(result, Err(AppError::ConfigFileError(_))));
    }
}
