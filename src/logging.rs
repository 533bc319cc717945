use crate::config::LoggingConfig;
use crate::constants::LOG_LEVELS;
use crate::error::{ConfigError, Error, FileError, Result};
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

// 使用 once_cell 缓存日志级别映射表，避免每次查找时重新构建
static LOG_LEVEL_MAP: Lazy<HashMap<&'static str, LevelFilter>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("trace", LevelFilter::Trace);
    map.insert("debug", LevelFilter::Debug);
    map.insert("info", LevelFilter::Info);
    map.insert("warn", LevelFilter::Warn);
    map.insert("error", LevelFilter::Error);
    map
});

/// 写入 stdout 与日志文件的简单 Logger
struct FileAndStdoutLogger {
    level: LevelFilter,
    file: Arc<Mutex<File>>,
}

impl log::Log for FileAndStdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let msg = format_record(record.level(), record.target(), &record.args().to_string());

        let _ = std::io::stdout().write_all(msg.as_bytes());

        // 文件中额外带上时间戳
        if let Ok(mut f) = self.file.lock() {
            let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let _ = write!(f, "{ts} {msg}");
        }
    }

    fn flush(&self) {
        if let Ok(mut f) = self.file.lock() {
            let _ = f.flush();
        }
    }
}

/// 格式化单条日志：`[LEVEL] target - message\n`
fn format_record(level: Level, target: &str, message: &str) -> String {
    format!("[{level}] {target} - {message}\n")
}

/// 初始化日志系统
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;

    let log_path = Path::new(&config.file);
    if let Some(parent_dir) = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && !p.exists())
    {
        std::fs::create_dir_all(parent_dir).map_err(|e| {
            Error::File(FileError::CreateDirectoryFailed {
                path: parent_dir.to_path_buf(),
                reason: e.to_string(),
            })
        })?;
    }

    // 简单的追加日志文件（不做滚动）
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| {
            Error::File(FileError::WriteFailed {
                path: log_path.to_path_buf(),
                reason: e.to_string(),
            })
        })?;

    let logger = FileAndStdoutLogger {
        level,
        file: Arc::new(Mutex::new(file)),
    };

    log::set_max_level(level);
    log::set_boxed_logger(Box::new(logger)).map_err(|e: SetLoggerError| {
        Error::File(FileError::WriteFailed {
            path: log_path.to_path_buf(),
            reason: format!("Failed to install logger: {e}"),
        })
    })?;

    log::info!(
        "Logging initialized - level: {:?}, file: {}, retention: {} day(s)",
        level,
        config.file,
        config.retention_days()
    );

    Ok(())
}

/// 初始化控制台日志（用于 init / completions 等命令）
pub fn init_simple_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    };
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}

/// 解析日志级别字符串
pub fn parse_log_level(level_str: &str) -> Result<LevelFilter> {
    let lower = level_str.to_lowercase();
    LOG_LEVEL_MAP.get(lower.as_str()).copied().ok_or_else(|| {
        Error::Config(ConfigError::InvalidLogLevel {
            level: level_str.to_string(),
            valid_levels: LOG_LEVELS.iter().map(|s| (*s).to_string()).collect(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level_case_insensitive() {
        assert_eq!(parse_log_level("DEBUG").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_log_level("warn").unwrap(), LevelFilter::Warn);
    }

    #[test]
    fn test_parse_log_level_invalid() {
        let err = parse_log_level("verbose").unwrap_err();
        assert!(err.to_string().contains("verbose"));
    }

    #[test]
    fn test_format_record() {
        assert_eq!(
            format_record(Level::Info, "pointplot", "started"),
            "[INFO] pointplot - started\n"
        );
    }
}
