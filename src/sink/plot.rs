//! 散点图输出
//!
//! - `build_plot` 根据点集构建 plotly 图（固定标题、坐标轴标签、网格和 y=0 参考线）
//! - `PlotSink` 打开系统查看器展示，或写入独立 HTML 文件

use super::Sink;
use super::util::ensure_parent_dir;
use crate::config::PlotConfig;
use crate::constants::{MARKER_SIZE, PLOT_TITLE, X_LABEL, Y_LABEL};
use crate::error::{Error, FileError, Result};
use crate::sink_error;
use crate::source::Point;
use log::info;
use plotly::common::{Marker, Mode, Title};
use plotly::layout::{Axis, Layout, RangeMode};
use plotly::{Plot, Scatter};
use std::fmt;
use std::path::{Path, PathBuf};

/// 散点图输出方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotOutput {
    /// 在系统默认查看器（浏览器）中打开
    Viewer,
    /// 写入 HTML 文件
    Html(PathBuf),
}

impl fmt::Display for PlotOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotOutput::Viewer => f.write_str("viewer"),
            PlotOutput::Html(path) => write!(f, "{}", path.display()),
        }
    }
}

/// 使用 plotly 将点集绘制为散点图
pub fn build_plot(points: &[Point]) -> Plot {
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();

    let trace = Scatter::new(xs, ys)
        .name("points")
        .mode(Mode::Markers)
        .marker(Marker::new().size(MARKER_SIZE).color("black"));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(
        Layout::new()
            .title(Title::with_text(PLOT_TITLE))
            .x_axis(
                Axis::new()
                    .title(Title::with_text(X_LABEL))
                    .show_grid(true),
            )
            .y_axis(
                Axis::new()
                    .title(Title::with_text(Y_LABEL))
                    .show_grid(true)
                    .range_mode(RangeMode::ToZero)
                    .zero_line(true)
                    .zero_line_color("black")
                    .zero_line_width(1),
            )
            .show_legend(false),
    );
    plot
}

/// 散点图输出
#[derive(Debug)]
pub struct PlotSink {
    output: PlotOutput,
}

impl PlotSink {
    pub fn new(output: PlotOutput) -> Self {
        Self { output }
    }

    pub fn from_config(config: &PlotConfig) -> Self {
        match &config.html {
            Some(path) => Self::new(PlotOutput::Html(PathBuf::from(path))),
            None => Self::new(PlotOutput::Viewer),
        }
    }

    pub fn output(&self) -> &PlotOutput {
        &self.output
    }

    fn write_html(plot: &Plot, path: &Path) -> Result<()> {
        ensure_parent_dir(path).map_err(|e| {
            Error::File(FileError::CreateDirectoryFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        })?;
        std::fs::write(path, plot.to_html()).map_err(|e| {
            sink_error!(FileWriteFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        })?;
        info!("Scatter plot written to {}", path.display());
        Ok(())
    }
}

impl Sink for PlotSink {
    fn render(&mut self, points: &[Point]) -> Result<()> {
        let plot = build_plot(points);
        match &self.output {
            PlotOutput::Viewer => {
                info!(
                    "Opening scatter plot ({} point(s)) in viewer; this call returns without waiting for the viewer to close",
                    points.len()
                );
                plot.show();
                Ok(())
            }
            PlotOutput::Html(path) => Self::write_html(&plot, path),
        }
    }

    fn name(&self) -> &str {
        "plot"
    }
}
