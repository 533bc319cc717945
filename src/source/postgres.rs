use super::{Connection, Connector, Point};
use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::source_error;
use ::postgres::{Client, NoTls, Row};
use log::{debug, info};

/// PostgreSQL 连接工厂
pub struct PostgresConnector {
    config: ::postgres::Config,
    target: String,
}

impl std::fmt::Debug for PostgresConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresConnector")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl PostgresConnector {
    /// 从配置创建连接工厂
    pub fn from_config(config: &DatabaseConfig) -> Self {
        let mut pg = ::postgres::Config::new();
        pg.host(&config.host)
            .port(config.port)
            .user(&config.username)
            .dbname(&config.database)
            .application_name("pointplot");

        let password = config.password();
        if !password.is_empty() {
            pg.password(password);
        }

        if config.connect_timeout_secs > 0 {
            pg.connect_timeout(std::time::Duration::from_secs(config.connect_timeout_secs));
        }

        Self {
            config: pg,
            target: config.target(),
        }
    }
}

impl Connector for PostgresConnector {
    type Conn = PostgresConnection;

    fn connect(&self) -> Result<PostgresConnection> {
        let client = self.config.connect(NoTls).map_err(|e| {
            source_error!(ConnectFailed {
                target: self.target.clone(),
                reason: e.to_string(),
            })
        })?;
        info!("Connected to PostgreSQL: {}", self.target);
        Ok(PostgresConnection { client })
    }

    fn target(&self) -> String {
        self.target.clone()
    }
}

/// 已打开的 PostgreSQL 连接
pub struct PostgresConnection {
    client: Client,
}

impl std::fmt::Debug for PostgresConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresConnection")
            .field("closed", &self.client.is_closed())
            .finish()
    }
}

fn read_column(row: &Row, row_idx: usize, column: usize) -> Result<f64> {
    row.try_get::<_, Option<f64>>(column)
        .map_err(|e| {
            source_error!(BadColumn {
                row: row_idx,
                column,
                reason: e.to_string(),
            })
        })?
        .ok_or_else(|| {
            source_error!(BadColumn {
                row: row_idx,
                column,
                reason: "NULL value".to_string(),
            })
        })
}

impl Connection for PostgresConnection {
    fn query_points(&mut self, sql: &str) -> Result<Vec<Point>> {
        let rows = self.client.query(sql, &[]).map_err(|e| {
            source_error!(QueryFailed {
                sql: sql.to_string(),
                reason: e.to_string(),
            })
        })?;
        debug!("Query returned {} row(s)", rows.len());

        rows.iter()
            .enumerate()
            .map(|(idx, row)| -> Result<Point> {
                Ok(Point::new(
                    read_column(row, idx, 0)?,
                    read_column(row, idx, 1)?,
                ))
            })
            .collect()
    }

    fn close(self) -> Result<()> {
        self.client.close().map_err(|e| {
            source_error!(CloseFailed {
                reason: e.to_string(),
            })
        })?;
        debug!("PostgreSQL connection closed");
        Ok(())
    }
}
