use super::{Point, PointSource};
use crate::error::Result;
use crate::source_error;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// 文本文件数据源 - 读取文件输出生成的 `x, y` 行
#[derive(Debug)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_field(&self, line: u64, value: &str) -> Result<f64> {
        value.parse::<f64>().map_err(|e| {
            source_error!(CsvReadFailed {
                path: self.path.clone(),
                line,
                reason: format!("'{value}' is not a number: {e}"),
            })
        })
    }
}

impl PointSource for CsvSource {
    fn load(&mut self) -> Result<Vec<Point>> {
        info!("Reading points from {}", self.path.display());

        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(::csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| {
                source_error!(CsvReadFailed {
                    path: self.path.clone(),
                    line: 0,
                    reason: e.to_string(),
                })
            })?;

        let mut points = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| {
                source_error!(CsvReadFailed {
                    path: self.path.clone(),
                    line: e.position().map_or(0, ::csv::Position::line),
                    reason: e.to_string(),
                })
            })?;
            let line = record.position().map_or(0, ::csv::Position::line);

            if record.len() != 2 {
                return Err(source_error!(CsvReadFailed {
                    path: self.path.clone(),
                    line,
                    reason: format!("expected 2 fields, found {}", record.len()),
                }));
            }

            points.push(Point::new(
                self.parse_field(line, &record[0])?,
                self.parse_field(line, &record[1])?,
            ));
        }

        debug!("Read {} point(s) from {}", points.len(), self.path.display());
        Ok(points)
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}
