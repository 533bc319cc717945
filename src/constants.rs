//! 公共常量与复用函数
//! 提供：
//! - 合法日志级别常量 LOG_LEVELS
//! - 散点图的固定标题、坐标轴标签与点大小
//! - 查询语句模板

/// 合法的日志级别（统一来源）
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// 默认 schema
pub const DEFAULT_SCHEMA: &str = "lab05";

/// 文件输出默认路径
pub const DEFAULT_OUTPUT_FILE: &str = "sine.csv";

/// 散点图标题
pub const PLOT_TITLE: &str = "Plot of x and y";

/// X 轴标签
pub const X_LABEL: &str = "x";

/// Y 轴标签（两张表共用同一标签）
pub const Y_LABEL: &str = "y = sin{x}";

/// 散点大小（plotly 默认值为 6）
pub const MARKER_SIZE: usize = 2;

/// 文件输出中 x 与 y 之间的分隔符
pub const FIELD_SEPARATOR: &str = ", ";

/// 生成读取点集的 SELECT 语句
///
/// 两列统一转换为 double precision，保证客户端按 f64 读取。
pub fn select_points_sql(schema: &str, table: &str) -> String {
    format!(
        "SELECT x::double precision AS x, y::double precision AS y FROM {schema}.{table} ORDER BY x;"
    )
}

/// 判断是否为简单 SQL 标识符（字母或下划线开头，仅含字母、数字、下划线）
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
