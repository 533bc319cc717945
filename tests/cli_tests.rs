use std::{fs, path::PathBuf, process::Command};

// Helper to get path to compiled binary provided by Cargo for integration tests
fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pointplot"))
}

// 转换路径为 TOML 兼容格式（Windows 反斜杠转义）
fn toml_path(path: &std::path::Path) -> String {
    path.display().to_string().replace('\\', "\\\\")
}

fn write_config(dir: &std::path::Path, extra: &str) -> PathBuf {
    let config_path = dir.join("config.toml");
    let cfg = format!(
        r#"
[database]
host = "127.0.0.1"
port = 1
connect_timeout_secs = 2

[logging]
file = "{}"
level = "info"

{extra}
"#,
        toml_path(&dir.join("logs/app.log")),
    );
    fs::write(&config_path, cfg).unwrap();
    config_path
}

#[test]
fn run_from_csv_writes_file_sink() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("input.csv");
    let output = tmp.path().join("out/sine.csv");
    fs::write(&input, "0, 0\n1, 0.841\n2, 0.909\n").unwrap();

    let config_path = write_config(
        tmp.path(),
        &format!("[file]\npath = \"{}\"\n", toml_path(&output)),
    );

    let status = Command::new(binary_path())
        .arg("run")
        .arg("-c")
        .arg(config_path.as_os_str())
        .arg("--sink")
        .arg("file")
        .arg("--from-csv")
        .arg(input.as_os_str())
        .status()
        .expect("failed to run binary");

    assert!(status.success(), "binary exit status not success: {status:?}");
    let content = fs::read_to_string(&output).expect("output not created");
    assert_eq!(content, "0, 0\n1, 0.841\n2, 0.909\n");
    assert!(tmp.path().join("logs/app.log").exists());
}

#[test]
fn run_from_csv_writes_html_plot() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("input.csv");
    let html = tmp.path().join("plot.html");
    fs::write(&input, "0, 0\n1, 0.841\n").unwrap();

    let config_path = write_config(tmp.path(), "");

    let status = Command::new(binary_path())
        .arg("-q")
        .arg("run")
        .arg("-c")
        .arg(config_path.as_os_str())
        .arg("--sink")
        .arg("plot")
        .arg("--html")
        .arg(html.as_os_str())
        .arg("--from-csv")
        .arg(input.as_os_str())
        .status()
        .expect("failed to run binary");

    if cfg!(feature = "plot") {
        assert!(status.success());
        assert!(fs::read_to_string(&html).unwrap().contains("Plot of x and y"));
    } else {
        assert!(!status.success());
    }
}

#[test]
fn run_fails_when_database_unreachable() {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("never.csv");
    let config_path = write_config(
        tmp.path(),
        &format!("[file]\npath = \"{}\"\n", toml_path(&output)),
    );

    let result = Command::new(binary_path())
        .arg("run")
        .arg("-c")
        .arg(config_path.as_os_str())
        .arg("--sink")
        .arg("file")
        .output()
        .expect("failed to run binary");

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("127.0.0.1:1"), "stderr: {stderr}");
    assert!(!output.exists());
}

#[test]
fn init_then_validate() {
    let tmp = tempfile::tempdir().unwrap();
    let config_path = tmp.path().join("generated.toml");

    let status = Command::new(binary_path())
        .arg("init")
        .arg("-o")
        .arg(config_path.as_os_str())
        .status()
        .expect("failed to run binary");
    assert!(status.success());

    // 生成的配置将日志写到相对路径，切换到临时目录执行
    let status = Command::new(binary_path())
        .current_dir(tmp.path())
        .arg("validate")
        .arg("-c")
        .arg(config_path.as_os_str())
        .status()
        .expect("failed to run binary");
    assert!(status.success());
}

#[test]
fn init_refuses_existing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let config_path = tmp.path().join("config.toml");
    fs::write(&config_path, "keep").unwrap();

    let status = Command::new(binary_path())
        .arg("init")
        .arg("-o")
        .arg(config_path.as_os_str())
        .status()
        .expect("failed to run binary");

    assert!(!status.success());
    assert_eq!(fs::read_to_string(&config_path).unwrap(), "keep");
}

#[test]
fn validate_rejects_bad_schema() {
    let tmp = tempfile::tempdir().unwrap();
    let config_path = write_config(tmp.path(), "");
    let content = fs::read_to_string(&config_path)
        .unwrap()
        .replace("port = 1\n", "port = 1\nschema = \"lab05.fn; --\"\n");
    fs::write(&config_path, content).unwrap();

    let status = Command::new(binary_path())
        .arg("validate")
        .arg("-c")
        .arg(config_path.as_os_str())
        .status()
        .expect("failed to run binary");
    assert!(!status.success());
}

#[test]
fn no_command_prints_help_and_fails() {
    let result = Command::new(binary_path())
        .output()
        .expect("failed to run binary");
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("Usage: pointplot"));
}
