use log::{debug, error, info, warn};

use crate::error::{Error, FileError, Result};
use std::fs;
use std::path::Path;

/// 默认配置文件内容
pub const DEFAULT_CONFIG: &str = r#"# pointplot 配置文件

[database]
host = "localhost"
port = 5432
username = "postgres"
# 留空时读取环境变量 PGPASSWORD
password = ""
database = "postgres"
# 数据表所在 schema
schema = "lab05"
# 连接超时（秒），0 表示不限
connect_timeout_secs = 10

[logging]
# 应用日志输出路径
file = "logs/pointplot.log"
# 日志级别: trace, debug, info, warn, error
level = "info"
# 日志保留天数 (1-365)
retention_days = 7

[render]
# 读取的表: fn, fn_file
table = "fn"
# 输出方式: plot, file
sink = "plot"

[file]
# 文件输出路径（每行 `x, y`）
path = "sine.csv"
overwrite = true

[plot]
# 设置后写入 HTML 文件，不打开查看器
# html = "export/plot.html"
"#;

/// 生成默认配置文件
pub fn handle_init(output_path: &str, force: bool) -> Result<()> {
    let path = Path::new(output_path);

    info!("Generating configuration file: {output_path}");

    // 检查文件是否已存在
    if path.exists() && !force {
        error!("Configuration file already exists: {output_path}");
        info!("Tip: use --force to overwrite");
        return Err(Error::File(FileError::AlreadyExists {
            path: path.to_path_buf(),
        }));
    }

    let overwriting = path.exists();
    if overwriting {
        warn!("Overwriting existing configuration file");
    }

    // 创建目录（如果需要）
    if let Some(parent) = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && !p.exists())
    {
        info!("Creating directory: {}", parent.display());
        fs::create_dir_all(parent).map_err(|e| {
            Error::File(FileError::CreateDirectoryFailed {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })
        })?;
    }

    debug!("Writing configuration file...");
    fs::write(path, DEFAULT_CONFIG).map_err(|e| {
        Error::File(FileError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    })?;

    if overwriting {
        info!("Configuration file overwritten: {output_path}");
    } else {
        info!("Configuration file created: {output_path}");
    }

    info!("Next steps:");
    info!("  1. Edit the configuration file: {output_path}");
    info!("  2. Validate it: pointplot validate -c {output_path}");
    info!("  3. Render: pointplot run -c {output_path}");

    Ok(())
}
