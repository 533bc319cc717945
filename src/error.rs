use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration related error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// File operation error
    #[error("File error: {0}")]
    File(#[from] FileError),

    /// Point source error (database or CSV input)
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Sink error (plot or file output)
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Configuration file parse failed
    #[error("Failed to parse configuration file {path}: {reason}")]
    ParseFailed { path: PathBuf, reason: String },

    /// Invalid log level
    #[error("Invalid log level '{level}', valid values: {}", valid_levels.join(", "))]
    InvalidLogLevel {
        level: String,
        valid_levels: Vec<String>,
    },

    /// Invalid configuration value
    #[error("Invalid configuration value {field} = '{value}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// File already exists
    #[error("File already exists: {path} (set overwrite=true to replace)")]
    AlreadyExists { path: PathBuf },

    /// File write failed
    #[error("Failed to write file {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    /// Create directory failed
    #[error("Failed to create directory {path}: {reason}")]
    CreateDirectoryFailed { path: PathBuf, reason: String },
}

/// 数据源错误
#[derive(Debug, Error)]
pub enum SourceError {
    /// Could not open a connection
    #[error("Failed to connect to {target}: {reason}")]
    ConnectFailed { target: String, reason: String },

    /// Query execution failed
    #[error("Query failed ({sql}): {reason}")]
    QueryFailed { sql: String, reason: String },

    /// A column could not be read as a number
    #[error("Cannot read column {column} of row {row}: {reason}")]
    BadColumn {
        row: usize,
        column: usize,
        reason: String,
    },

    /// Closing the connection failed
    #[error("Failed to close connection: {reason}")]
    CloseFailed { reason: String },

    /// Reading a points file failed
    #[error("Failed to read points file {path} (line {line}): {reason}")]
    CsvReadFailed {
        path: PathBuf,
        line: u64,
        reason: String,
    },
}

/// 输出错误
#[derive(Debug, Error)]
pub enum SinkError {
    /// Failed to create output file
    #[error("Failed to create output file {path}: {reason}")]
    FileCreateFailed { path: PathBuf, reason: String },

    /// Failed to write output file
    #[error("Failed to write file {path}: {reason}")]
    FileWriteFailed { path: PathBuf, reason: String },

    /// Plot rendering failed
    #[error("Plot failed: {reason}")]
    PlotFailed { reason: String },
}

/// 应用程序 Result 类型别名
pub type Result<T> = std::result::Result<T, Error>;

// 辅助宏，用于快速创建错误
#[macro_export]
macro_rules! config_error {
    ($variant:ident { $($field:ident $(: $value:expr)?),+ $(,)? }) => {
        $crate::error::Error::Config($crate::error::ConfigError::$variant {
            $($field $(: $value)?),+
        })
    };
}

#[macro_export]
macro_rules! source_error {
    ($variant:ident { $($field:ident $(: $value:expr)?),+ $(,)? }) => {
        $crate::error::Error::Source($crate::error::SourceError::$variant {
            $($field $(: $value)?),+
        })
    };
}

#[macro_export]
macro_rules! sink_error {
    ($variant:ident { $($field:ident $(: $value:expr)?),+ $(,)? }) => {
        $crate::error::Error::Sink($crate::error::SinkError::$variant {
            $($field $(: $value)?),+
        })
    };
}
