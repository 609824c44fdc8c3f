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

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// a record that cannot leave the pipeline: a required input is missing,
    /// or neither a key nor a value was produced
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("invalid value: {0}, {1}")]
    InvalidValue(&'static str, String),

    /// raised by key/value producers, passed through untouched
    #[error("producer error: {0}")]
    Producer(String),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("config file error: {0}")]
    ConfigFileError(#[from] config::ConfigError),

    #[error("tracing setup error: {0}")]
    TracingSetup(String),
}

impl AppError {
    pub fn is_invalid_record(&self) -> bool {
        matches!(self, AppError::InvalidRecord(_))
    }
}
