/// Sink 模块 - 负责将点集输出到目标
///
/// 支持的输出目标:
/// - 散点图（plotly，打开查看器或写入 HTML）
/// - `x, y` 文本文件
use crate::config::Config;
use crate::error::Result;
use crate::source::Point;
use log::info;
use serde::Deserialize;
use std::fmt;

mod file;
#[cfg(feature = "plot")]
mod plot;
mod util;

pub use file::{FileSink, format_line};
#[cfg(feature = "plot")]
pub use plot::{PlotOutput, PlotSink, build_plot};

/// 输出类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    /// 散点图
    #[default]
    Plot,
    /// 文本文件
    File,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::Plot => f.write_str("plot"),
            SinkKind::File => f.write_str("file"),
        }
    }
}

/// 输出 trait - 所有输出目标必须实现此接口
pub trait Sink {
    /// 输出完整结果集
    fn render(&mut self, points: &[Point]) -> Result<()>;

    /// 获取输出名称 (用于日志记录)
    fn name(&self) -> &str;
}

/// 根据输出类型与配置创建输出目标
pub fn from_config(kind: SinkKind, config: &Config) -> Result<Box<dyn Sink>> {
    match kind {
        SinkKind::File => {
            info!("Using file sink: {}", config.file.path);
            Ok(Box::new(FileSink::from_config(&config.file)))
        }
        #[cfg(feature = "plot")]
        SinkKind::Plot => {
            let sink = PlotSink::from_config(&config.plot);
            info!("Using plot sink: {}", sink.output());
            Ok(Box::new(sink))
        }
        #[cfg(not(feature = "plot"))]
        SinkKind::Plot => Err(crate::sink_error!(PlotFailed {
            reason: "built without the `plot` feature".to_string(),
        })),
    }
}
