use super::Sink;
use super::util::ensure_parent_dir;
use crate::config::FileConfig;
use crate::constants::FIELD_SEPARATOR;
use crate::error::{Error, FileError, Result};
use crate::sink_error;
use crate::source::Point;
use log::{debug, info};
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// 将单个点格式化为 `x, y`（不含换行）
pub fn format_line(point: &Point) -> String {
    format!("{}{FIELD_SEPARATOR}{}", point.x, point.y)
}

/// 文件输出 - 每个点写一行 `x, y`，无表头、无转义
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    overwrite: bool,
    written: usize,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>, overwrite: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            overwrite,
            written: 0,
        }
    }

    pub fn from_config(config: &FileConfig) -> Self {
        Self::new(&config.path, config.overwrite)
    }

    fn write_failed(&self, e: &std::io::Error) -> Error {
        sink_error!(FileWriteFailed {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}

impl Sink for FileSink {
    fn render(&mut self, points: &[Point]) -> Result<()> {
        ensure_parent_dir(&self.path).map_err(|e| {
            Error::File(FileError::CreateDirectoryFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            })
        })?;

        // overwrite 时截断已有内容，否则仅在文件不存在时创建
        let opened = if self.overwrite {
            File::create(&self.path)
        } else {
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&self.path)
        };
        let file = opened.map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                Error::File(FileError::AlreadyExists {
                    path: self.path.clone(),
                })
            } else {
                sink_error!(FileCreateFailed {
                    path: self.path.clone(),
                    reason: e.to_string(),
                })
            }
        })?;
        let mut writer = BufWriter::new(file);

        self.written = 0;
        for point in points {
            writeln!(writer, "{}", format_line(point)).map_err(|e| self.write_failed(&e))?;
            self.written += 1;
        }
        writer.flush().map_err(|e| self.write_failed(&e))?;

        debug!("Flushed {} line(s)", self.written);
        info!(
            "File export finished: {} ({} point(s))",
            self.path.display(),
            self.written
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
