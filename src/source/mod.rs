/// Source 模块 - 负责读取 (x, y) 点集
///
/// 支持的数据源:
/// - PostgreSQL 表（`lab05.fn` / `lab05.fn_file`）
/// - 文件输出生成的 `x, y` 文本文件
use crate::constants::select_points_sql;
use crate::error::Result;
use log::{debug, info, warn};
use serde::Deserialize;
use std::fmt;

pub mod csv;
pub mod postgres;

pub use csv::CsvSource;
pub use postgres::{PostgresConnection, PostgresConnector};

/// 单个数据点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// 可查询的数据表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Table {
    /// `fn` 表
    #[default]
    Fn,
    /// `fn_file` 表
    FnFile,
}

impl Table {
    /// 不带 schema 的表名
    pub fn name(self) -> &'static str {
        match self {
            Table::Fn => "fn",
            Table::FnFile => "fn_file",
        }
    }

    /// 带 schema 的完整表名
    pub fn qualified(self, schema: &str) -> String {
        format!("{schema}.{}", self.name())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 已打开的连接
pub trait Connection {
    /// 执行查询并取回全部结果
    fn query_points(&mut self, sql: &str) -> Result<Vec<Point>>;

    /// 关闭连接
    fn close(self) -> Result<()>;
}

/// 连接工厂
pub trait Connector {
    type Conn: Connection;

    /// 打开新连接
    fn connect(&self) -> Result<Self::Conn>;

    /// 连接目标描述 (用于日志记录，不含密码)
    fn target(&self) -> String;
}

/// 连接守卫：保证连接在任何退出路径上恰好关闭一次
#[derive(Debug)]
pub struct ConnectionGuard<C: Connection> {
    conn: Option<C>,
}

impl<C: Connection> ConnectionGuard<C> {
    pub fn new(conn: C) -> Self {
        Self { conn: Some(conn) }
    }

    /// 在受保护的连接上执行查询
    pub fn query_points(&mut self, sql: &str) -> Result<Vec<Point>> {
        match self.conn.as_mut() {
            Some(conn) => conn.query_points(sql),
            None => Err(crate::source_error!(QueryFailed {
                sql: sql.to_string(),
                reason: "connection already closed".to_string(),
            })),
        }
    }

    /// 显式关闭连接，返回关闭时的错误
    pub fn close(mut self) -> Result<()> {
        match self.conn.take() {
            Some(conn) => conn.close(),
            None => Ok(()),
        }
    }
}

impl<C: Connection> Drop for ConnectionGuard<C> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            debug!("Closing connection on early exit");
            if let Err(e) = conn.close() {
                warn!("Failed to close connection on Drop: {e}");
            }
        }
    }
}

/// 点集数据源 trait - 所有数据源必须实现此接口
pub trait PointSource {
    /// 读取完整结果集
    fn load(&mut self) -> Result<Vec<Point>>;

    /// 获取数据源名称 (用于日志记录)
    fn name(&self) -> String;
}

/// 打开连接、查询指定表、取回所有行并关闭连接
pub fn fetch_points<K: Connector>(connector: &K, schema: &str, table: Table) -> Result<Vec<Point>> {
    let sql = select_points_sql(schema, table.name());
    info!("Connecting to {}", connector.target());

    let mut guard = ConnectionGuard::new(connector.connect()?);
    debug!("Executing: {sql}");
    let points = guard.query_points(&sql)?;
    guard.close()?;

    info!(
        "Fetched {} point(s) from {}",
        points.len(),
        table.qualified(schema)
    );
    Ok(points)
}

/// 基于数据库表的数据源
#[derive(Debug)]
pub struct TableSource<K: Connector> {
    connector: K,
    schema: String,
    table: Table,
}

impl<K: Connector> TableSource<K> {
    pub fn new(connector: K, schema: impl Into<String>, table: Table) -> Self {
        Self {
            connector,
            schema: schema.into(),
            table,
        }
    }
}

impl<K: Connector> PointSource for TableSource<K> {
    fn load(&mut self) -> Result<Vec<Point>> {
        fetch_points(&self.connector, &self.schema, self.table)
    }

    fn name(&self) -> String {
        self.table.qualified(&self.schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct StubConn {
        closes: Rc<Cell<usize>>,
        fail_query: bool,
    }

    impl Connection for StubConn {
        fn query_points(&mut self, sql: &str) -> Result<Vec<Point>> {
            if self.fail_query {
                return Err(crate::source_error!(QueryFailed {
                    sql: sql.to_string(),
                    reason: "relation does not exist".to_string(),
                }));
            }
            Ok(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.5)])
        }

        fn close(self) -> Result<()> {
            self.closes.set(self.closes.get() + 1);
            Ok(())
        }
    }

    struct StubConnector {
        closes: Rc<Cell<usize>>,
        fail_query: bool,
    }

    impl Connector for StubConnector {
        type Conn = StubConn;

        fn connect(&self) -> Result<StubConn> {
            Ok(StubConn {
                closes: Rc::clone(&self.closes),
                fail_query: self.fail_query,
            })
        }

        fn target(&self) -> String {
            "stub".to_string()
        }
    }

    fn connector(fail_query: bool) -> StubConnector {
        StubConnector {
            closes: Rc::new(Cell::new(0)),
            fail_query,
        }
    }

    #[test]
    fn test_table_names() {
        assert_eq!(Table::Fn.name(), "fn");
        assert_eq!(Table::FnFile.name(), "fn_file");
        assert_eq!(Table::FnFile.qualified("lab05"), "lab05.fn_file");
        assert_eq!(Table::Fn.to_string(), "fn");
    }

    #[test]
    fn test_guard_closes_once_on_explicit_close() {
        let c = connector(false);
        let guard = ConnectionGuard::new(c.connect().unwrap());
        guard.close().unwrap();
        assert_eq!(c.closes.get(), 1);
    }

    #[test]
    fn test_guard_closes_on_drop() {
        let c = connector(false);
        {
            let _guard = ConnectionGuard::new(c.connect().unwrap());
        }
        assert_eq!(c.closes.get(), 1);
    }

    #[test]
    fn test_fetch_closes_once_on_failure() {
        let c = connector(true);
        let result = fetch_points(&c, "lab05", Table::Fn);
        assert!(result.is_err());
        assert_eq!(c.closes.get(), 1);
    }

    #[test]
    fn test_table_source_name() {
        let source = TableSource::new(connector(false), "lab05", Table::FnFile);
        assert_eq!(source.name(), "lab05.fn_file");
    }
}
