use super::opts::RunArgs;
use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{self, RunStats};
use crate::sink::{self, SinkKind};
use crate::source::{CsvSource, Table};
use log::info;

/// 将命令行参数合并进配置，返回最终使用的表与输出类型
pub fn apply_overrides(cfg: &mut Config, args: &RunArgs) -> (Table, SinkKind) {
    if let Some(output) = &args.output {
        cfg.file.path.clone_from(output);
    }
    if let Some(html) = &args.html {
        cfg.plot.html = Some(html.clone());
    }
    (
        args.table.unwrap_or(cfg.render.table),
        args.sink.unwrap_or(cfg.render.sink),
    )
}

/// 运行读取 + 输出任务
pub fn handle_run(cfg: &Config, args: &RunArgs) -> Result<RunStats> {
    let mut cfg = cfg.clone();
    let (table, kind) = apply_overrides(&mut cfg, args);
    cfg.validate()?;

    info!("Starting point render task");

    let stats = match &args.from_csv {
        Some(path) => {
            let mut source = CsvSource::new(path);
            info!("Input file: {}", source.path().display());
            let mut sink = sink::from_config(kind, &cfg)?;
            pipeline::fetch_and_render(&mut source, sink.as_mut())?
        }
        None => {
            info!("Table: {}", table.qualified(&cfg.database.schema));
            pipeline::run_table(&cfg, table, kind)?
        }
    };

    let elapsed = stats.elapsed.as_secs_f64();
    info!(
        "Render stats: {} => {}: {} point(s) in {elapsed:.3}s",
        stats.source, stats.sink, stats.points
    );

    eprintln!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!("✓ Render Task Completed");
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!("  Source:   {}", stats.source);
    eprintln!("  Sink:     {}", stats.sink);
    eprintln!("  Points:   {}", stats.points);
    eprintln!("  Elapsed:  {elapsed:.3} seconds");
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    Ok(stats)
}
