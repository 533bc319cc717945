use crate::constants::{DEFAULT_OUTPUT_FILE, DEFAULT_SCHEMA, LOG_LEVELS, is_plain_identifier};
use crate::error::{ConfigError, Error, Result};
use crate::sink::SinkKind;
use crate::source::Table;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 密码为空时读取的环境变量
pub const PASSWORD_ENV: &str = "PGPASSWORD";

/// PostgreSQL 默认主机
fn default_postgres_host() -> String {
    "localhost".to_string()
}

/// PostgreSQL 默认端口
fn default_postgres_port() -> u16 {
    5432
}

/// PostgreSQL 默认用户名
fn default_postgres_username() -> String {
    "postgres".to_string()
}

/// PostgreSQL 默认数据库
fn default_postgres_database() -> String {
    "postgres".to_string()
}

/// 默认 schema
fn default_schema() -> String {
    DEFAULT_SCHEMA.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub file: FileConfig,
    #[serde(default)]
    pub plot: PlotConfig,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::Config(ConfigError::NotFound(path.to_path_buf())))?;
        Self::from_str(&content, path.to_path_buf())
    }

    /// 从字符串解析配置
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str, path: PathBuf) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|e| {
            Error::Config(ConfigError::ParseFailed {
                path,
                reason: e.to_string(),
            })
        })?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        self.logging.validate()?;
        self.database.validate()?;
        self.file.validate()?;
        self.plot.validate()?;
        Ok(())
    }
}

/// 数据库连接配置
#[derive(Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL 主机地址
    #[serde(default = "default_postgres_host")]
    pub host: String,
    /// PostgreSQL 端口
    #[serde(default = "default_postgres_port")]
    pub port: u16,
    /// 用户名
    #[serde(default = "default_postgres_username")]
    pub username: String,
    /// 密码（为空时读取 PGPASSWORD）
    #[serde(default)]
    pub password: String,
    /// 数据库名
    #[serde(default = "default_postgres_database")]
    pub database: String,
    /// 表所在 schema
    #[serde(default = "default_schema")]
    pub schema: String,
    /// 连接超时（秒），0 表示不限
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_postgres_host(),
            port: default_postgres_port(),
            username: default_postgres_username(),
            password: String::new(),
            database: default_postgres_database(),
            schema: default_schema(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

// 密码不进入日志或错误输出
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let password = if self.password.is_empty() { "" } else { "***" };
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &password)
            .field("database", &self.database)
            .field("schema", &self.schema)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl DatabaseConfig {
    /// 获取实际使用的密码：配置优先，否则读取环境变量
    pub fn password(&self) -> String {
        resolve_password(&self.password, std::env::var(PASSWORD_ENV).ok())
    }

    /// 连接目标描述（不含密码）
    pub fn target(&self) -> String {
        format!(
            "{}@{}:{}/{}",
            self.username, self.host, self.port, self.database
        )
    }

    /// 验证配置
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(invalid("database.host", &self.host, "Host cannot be empty"));
        }
        if self.port == 0 {
            return Err(invalid(
                "database.port",
                &self.port.to_string(),
                "Port must be between 1 and 65535",
            ));
        }
        if self.username.trim().is_empty() {
            return Err(invalid(
                "database.username",
                &self.username,
                "Username cannot be empty",
            ));
        }
        if self.database.trim().is_empty() {
            return Err(invalid(
                "database.database",
                &self.database,
                "Database name cannot be empty",
            ));
        }
        if !is_plain_identifier(&self.schema) {
            return Err(invalid(
                "database.schema",
                &self.schema,
                "Schema must be a plain SQL identifier ([A-Za-z_][A-Za-z0-9_]*)",
            ));
        }
        Ok(())
    }
}

/// 配置密码优先，其次环境变量，均缺失时为空
pub fn resolve_password(configured: &str, from_env: Option<String>) -> String {
    if configured.is_empty() {
        from_env.unwrap_or_default()
    } else {
        configured.to_string()
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> Error {
    Error::Config(ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    })
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// 应用日志输出文件路径
    pub file: String,
    pub level: String,
    #[serde(default = "default_retention_days")]
    pub retention_days: usize,
}

fn default_retention_days() -> usize {
    7
}

impl LoggingConfig {
    /// 获取日志输出文件路径
    pub fn file(&self) -> &str {
        &self.file
    }

    /// 获取日志级别
    pub fn level(&self) -> &str {
        &self.level
    }

    /// 获取日志保留天数
    pub fn retention_days(&self) -> usize {
        self.retention_days
    }

    /// 验证日志级别是否有效
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS
            .iter()
            .any(|&l| l.eq_ignore_ascii_case(self.level.as_str()))
        {
            return Err(Error::Config(ConfigError::InvalidLogLevel {
                level: self.level.clone(),
                valid_levels: LOG_LEVELS.iter().map(|s| (*s).to_string()).collect(),
            }));
        }

        // 验证保留天数（1-365天）
        if self.retention_days == 0 || self.retention_days > 365 {
            return Err(invalid(
                "logging.retention_days",
                &self.retention_days.to_string(),
                "Retention days must be between 1 and 365",
            ));
        }

        if self.file.trim().is_empty() {
            return Err(invalid("logging.file", &self.file, "Log file cannot be empty"));
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: "logs/pointplot.log".to_string(),
            level: "info".to_string(),
            retention_days: 7,
        }
    }
}

/// 默认渲染目标：读取哪张表、输出到哪里
#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct RenderConfig {
    #[serde(default)]
    pub table: Table,
    #[serde(default)]
    pub sink: SinkKind,
}

/// 文件输出配置
#[derive(Debug, Deserialize, Clone)]
pub struct FileConfig {
    /// 输出文件路径
    pub path: String,
    /// 是否覆盖已存在的文件
    #[serde(default = "default_true")]
    pub overwrite: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_FILE.to_string(),
            overwrite: true,
        }
    }
}

impl FileConfig {
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(invalid("file.path", &self.path, "Output path cannot be empty"));
        }
        Ok(())
    }
}

/// 散点图输出配置
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PlotConfig {
    /// 写入 HTML 文件而非打开查看器
    #[serde(default)]
    pub html: Option<String>,
}

impl PlotConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(html) = &self.html {
            if html.trim().is_empty() {
                return Err(invalid("plot.html", html, "HTML output path cannot be empty"));
            }
        }
        Ok(())
    }
}
