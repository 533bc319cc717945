//! Tests against a live PostgreSQL server.
//!
//! Run with `cargo test -- --ignored`; connection settings come from
//! `POINTPLOT_TEST_HOST` / `POINTPLOT_TEST_PORT` / `POINTPLOT_TEST_USER` and
//! `PGPASSWORD`.

use pointplot::config::{Config, DatabaseConfig};
use pointplot::pipeline::run_table;
use pointplot::sink::SinkKind;
use pointplot::source::{PostgresConnector, Table, fetch_points};
use std::fs;

const TEST_SCHEMA: &str = "pointplot_test";

fn database_config() -> DatabaseConfig {
    let mut cfg = DatabaseConfig {
        schema: TEST_SCHEMA.to_string(),
        ..DatabaseConfig::default()
    };
    if let Ok(host) = std::env::var("POINTPLOT_TEST_HOST") {
        cfg.host = host;
    }
    if let Some(port) = std::env::var("POINTPLOT_TEST_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
    {
        cfg.port = port;
    }
    if let Ok(user) = std::env::var("POINTPLOT_TEST_USER") {
        cfg.username = user;
    }
    cfg
}

fn seed(cfg: &DatabaseConfig, rows: &[(f64, f64)]) {
    let mut pg = postgres::Config::new();
    pg.host(&cfg.host)
        .port(cfg.port)
        .user(&cfg.username)
        .dbname(&cfg.database)
        .password(cfg.password());
    let mut client = pg.connect(postgres::NoTls).expect("connect for seeding");

    client
        .batch_execute(&format!(
            "DROP SCHEMA IF EXISTS {TEST_SCHEMA} CASCADE;
             CREATE SCHEMA {TEST_SCHEMA};
             CREATE TABLE {TEST_SCHEMA}.fn (x real, y real);
             CREATE TABLE {TEST_SCHEMA}.fn_file (x numeric, y numeric);"
        ))
        .expect("create tables");

    // 故意乱序插入，检查 ORDER BY x
    for (x, y) in rows.iter().rev() {
        client
            .execute(
                &format!("INSERT INTO {TEST_SCHEMA}.fn (x, y) VALUES ($1::float8, $2::float8)"),
                &[x, y],
            )
            .expect("insert row");
    }
    client.close().expect("close seeding connection");
}

#[test]
#[ignore = "requires a running PostgreSQL server"]
fn live_fetch_orders_by_x_and_writes_file() {
    let db = database_config();
    seed(&db, &[(0.0, 0.0), (1.0, 0.841), (2.0, 0.909)]);

    let points = fetch_points(&PostgresConnector::from_config(&db), TEST_SCHEMA, Table::Fn).unwrap();
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0]);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("sine.csv");
    let mut cfg = Config {
        database: db,
        ..Config::default()
    };
    cfg.file.path = out.to_string_lossy().to_string();

    let stats = run_table(&cfg, Table::Fn, SinkKind::File).unwrap();
    assert_eq!(stats.points, 3);

    // real 列经 float8 转换后会带出单精度误差，只比较行数与 x 列
    let content = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("0, "));
    assert!(lines[2].starts_with("2, "));
}

#[test]
#[ignore = "requires a running PostgreSQL server"]
fn live_empty_table_gives_empty_file() {
    let db = database_config();
    seed(&db, &[]);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("empty.csv");
    let mut cfg = Config {
        database: db,
        ..Config::default()
    };
    cfg.file.path = out.to_string_lossy().to_string();

    let stats = run_table(&cfg, Table::FnFile, SinkKind::File).unwrap();
    assert_eq!(stats.points, 0);
    assert_eq!(fs::read_to_string(&out).unwrap(), "");
}

#[test]
#[ignore = "requires a running PostgreSQL server"]
fn live_missing_table_is_query_error() {
    let db = DatabaseConfig {
        schema: "pointplot_missing_schema".to_string(),
        ..database_config()
    };
    let err = fetch_points(&PostgresConnector::from_config(&db), &db.schema, Table::Fn).unwrap_err();
    assert!(err.to_string().contains("Query failed"));
}
