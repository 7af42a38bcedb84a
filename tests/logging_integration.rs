use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(suffix: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock should be after unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "sentai-logging-{suffix}-{stamp}-{}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("failed to create temp directory");
    dir
}

fn write_resources(dir: &Path) {
    fs::write(dir.join("engines.json"), r#"[{"name": "ada", "description": ""}]"#)
        .expect("failed to write engines.json");
    fs::write(dir.join("haikus.json"), r#"["h"]"#).expect("failed to write haikus.json");
    fs::write(dir.join("quotes.json"), r#"["q"]"#).expect("failed to write quotes.json");
    fs::write(dir.join("ascii.txt"), "ART\n").expect("failed to write ascii.txt");
}

fn run_with_logging_env(
    resource_dir: &Path,
    log_output: &str,
    log_format: &str,
    log_file_path: Option<&Path>,
) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sentai"));
    // -v 1 drives the default filter to debug; EOF on stdin ends the chat
    // loop immediately after the startup log line is emitted.
    cmd.args(["-v", "1"])
        .env("RESOURCES_DIR", resource_dir)
        .env_remove("RUST_LOG")
        .env("LOG_OUTPUT", log_output)
        .env("LOG_FORMAT", log_format);

    if let Some(path) = log_file_path {
        cmd.env("LOG_FILE_PATH", path);
    } else {
        cmd.env_remove("LOG_FILE_PATH");
    }

    cmd.output().expect("failed to run sentai binary")
}

fn find_rotated_log_file(dir: &Path, base_file_name: &str) -> PathBuf {
    let expected_prefix = format!("{base_file_name}.");
    let mut matches: Vec<PathBuf> = fs::read_dir(dir)
        .expect("failed to read temp directory")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with(&expected_prefix))
                .unwrap_or(false)
        })
        .collect();

    matches.sort();
    matches
        .pop()
        .expect("expected a rotated log file to be created")
}

#[test]
fn json_format_emits_json_log_lines_on_stderr() {
    let resources = unique_temp_dir("json-res");
    write_resources(&resources);

    let output = run_with_logging_env(&resources, "stderr", "json", None);
    assert!(output.status.success(), "run should exit cleanly on EOF");

    let stderr = String::from_utf8_lossy(&output.stderr);
    let json_lines: Vec<&str> = stderr
        .lines()
        .filter(|line| line.trim_start().starts_with('{'))
        .collect();
    assert!(
        !json_lines.is_empty(),
        "expected at least one JSON log line, got stderr:\n{stderr}"
    );

    let parsed: Vec<Value> = json_lines
        .iter()
        .map(|line| serde_json::from_str::<Value>(line).expect("line should be valid JSON"))
        .collect();
    assert!(
        parsed.iter().any(|entry| {
            entry
                .get("fields")
                .and_then(|fields| fields.get("message"))
                .and_then(Value::as_str)
                == Some("resolved configuration")
        }),
        "expected startup log message in JSON output, got stderr:\n{stderr}"
    );

    let _ = fs::remove_dir_all(&resources);
}

#[test]
fn file_output_writes_logs_to_rotated_file() {
    let resources = unique_temp_dir("file-res");
    write_resources(&resources);
    let log_dir = unique_temp_dir("file-logs");
    let log_path = log_dir.join("sentai.log");

    let output = run_with_logging_env(&resources, "file", "pretty", Some(&log_path));
    assert!(output.status.success(), "run should exit cleanly on EOF");

    let rotated = find_rotated_log_file(&log_dir, "sentai.log");
    let file_contents = fs::read_to_string(&rotated).expect("failed to read rotated log file");
    assert!(
        file_contents.contains("resolved configuration"),
        "expected startup log message in file, got:\n{file_contents}"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("resolved configuration"),
        "did not expect normal logs on stderr for file-only mode:\n{stderr}"
    );

    let _ = fs::remove_dir_all(&resources);
    let _ = fs::remove_dir_all(&log_dir);
}

#[test]
fn invalid_file_path_falls_back_to_stderr_logging() {
    let resources = unique_temp_dir("fallback-res");
    write_resources(&resources);
    let log_dir = unique_temp_dir("fallback-logs");
    let blocking_file = log_dir.join("not-a-directory");
    fs::write(&blocking_file, "block").expect("failed to create blocking file");
    let log_path = blocking_file.join("sentai.log");

    let output = run_with_logging_env(&resources, "file", "pretty", Some(&log_path));
    assert!(output.status.success(), "run should exit cleanly on EOF");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to initialize LOG_OUTPUT=file"),
        "expected fallback warning, got:\n{stderr}"
    );
    assert!(
        stderr.contains("using stderr instead"),
        "expected stderr fallback message, got:\n{stderr}"
    );
    assert!(
        stderr.contains("resolved configuration"),
        "expected logs to continue on stderr after fallback, got:\n{stderr}"
    );

    let _ = fs::remove_dir_all(&resources);
    let _ = fs::remove_dir_all(&log_dir);
}
