/// 读取 → 输出 流程
use crate::config::Config;
use crate::error::Result;
use crate::sink::{self, Sink, SinkKind};
use crate::source::{PointSource, PostgresConnector, Table, TableSource};
use log::info;
use std::time::{Duration, Instant};

/// 单次运行的统计信息
#[derive(Debug, Clone)]
pub struct RunStats {
    /// 数据源名称
    pub source: String,
    /// 输出名称
    pub sink: String,
    /// 处理的点数
    pub points: usize,
    /// 总耗时
    pub elapsed: Duration,
}

/// 从数据源读取完整结果集并交给输出
pub fn fetch_and_render(source: &mut dyn PointSource, sink: &mut dyn Sink) -> Result<RunStats> {
    let start = Instant::now();

    info!("Loading points from {}", source.name());
    let points = source.load()?;

    info!("Rendering {} point(s) to {}", points.len(), sink.name());
    sink.render(&points)?;

    Ok(RunStats {
        source: source.name(),
        sink: sink.name().to_string(),
        points: points.len(),
        elapsed: start.elapsed(),
    })
}

/// 读取指定表并输出到指定目标
pub fn run_table(config: &Config, table: Table, kind: SinkKind) -> Result<RunStats> {
    let connector = PostgresConnector::from_config(&config.database);
    let mut source = TableSource::new(connector, config.database.schema.clone(), table);
    let mut sink = sink::from_config(kind, config)?;
    fetch_and_render(&mut source, sink.as_mut())
}
