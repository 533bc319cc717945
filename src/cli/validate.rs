use log::info;

use crate::config::Config;
use crate::error::Result;

/// 验证配置文件并输出生效的设置
pub fn handle_validate(cfg: &Config) -> Result<()> {
    cfg.validate()?;

    info!("Database: {}", cfg.database.target());
    info!("Schema: {}", cfg.database.schema);
    info!(
        "Password: {}",
        if cfg.database.password().is_empty() {
            "not set"
        } else {
            "set"
        }
    );
    info!("Log level: {}", cfg.logging.level());
    info!("Log file: {}", cfg.logging.file());
    info!("Log retention: {} day(s)", cfg.logging.retention_days());
    info!(
        "Default render: table={} sink={}",
        cfg.render.table, cfg.render.sink
    );
    info!(
        "File output: {} (overwrite: {})",
        cfg.file.path,
        if cfg.file.overwrite { "yes" } else { "no" }
    );
    match &cfg.plot.html {
        Some(html) => info!("Plot output: {html}"),
        None => info!("Plot output: viewer"),
    }

    Ok(())
}
