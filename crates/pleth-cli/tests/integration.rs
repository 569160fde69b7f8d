//! Integration tests for the `pleth` binary.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn pleth_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pleth"))
}

/// 5 Hz breathing at 2000 Hz with a flat half-second pause at 2 s.
fn write_pause_trace(path: &Path) {
    let text: String = (0..10000)
        .map(|i| {
            let x = if (4000..5000).contains(&i) {
                0.0
            } else {
                (2.0 * std::f64::consts::PI * 5.0 * f64::from(i) / 2000.0).sin()
            };
            format!("{x:.6}\n")
        })
        .collect();
    std::fs::write(path, text).unwrap();
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "pleth failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn cli_help_lists_commands() {
    let output = pleth_bin().arg("--help").output().expect("failed to run pleth --help");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["score", "pauses", "cycles", "timing", "summary", "config"] {
        assert!(stdout.contains(command), "help should mention '{command}'");
    }
}

#[test]
fn cli_version_works() {
    let output = pleth_bin().arg("--version").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("pleth"));
}

#[test]
fn cli_pauses_json_reports_one_pause() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trace.txt");
    write_pause_trace(&input);

    let output = pleth_bin()
        .args(["pauses", input.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    let report = stdout_json(&output);
    assert_eq!(report["count"], 1);
    assert_eq!(report["pauses"].as_array().unwrap().len(), 1);
    let start = report["pauses"][0]["start_secs"].as_f64().unwrap();
    assert!((1.9..2.2).contains(&start), "pause starts at {start}");
}

#[test]
fn cli_pauses_min_duration_override() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trace.txt");
    write_pause_trace(&input);

    let output = pleth_bin()
        .args(["pauses", input.to_str().unwrap(), "--min-duration", "1.0", "--json"])
        .output()
        .unwrap();
    let report = stdout_json(&output);
    assert_eq!(report["count"], 0);
    assert_eq!(report["min_duration_samples"], 2000);
}

#[test]
fn cli_score_writes_csv() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trace.txt");
    let csv = dir.path().join("score.csv");
    write_pause_trace(&input);

    let output = pleth_bin()
        .args(["score", input.to_str().unwrap(), "-o", csv.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "pleth score failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let text = std::fs::read_to_string(&csv).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("time_s,score,pause"));
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 10000);
    assert!(rows.iter().any(|r| r.ends_with(",1")));
    // Clipped at the default ceiling
    assert!(rows.iter().all(|r| {
        let score: f64 = r.split(',').nth(1).unwrap().parse().unwrap();
        score.is_nan() || score <= 2.0
    }));
}

#[test]
fn cli_cycles_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trace.txt");
    write_pause_trace(&input);

    let output = pleth_bin()
        .args(["cycles", input.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    let report = stdout_json(&output);
    let peaks = report["peaks"].as_array().unwrap().len();
    assert!(peaks > 0);
    assert_eq!(report["cycle_count"], peaks);
}

#[test]
fn cli_timing_rejects_short_trace() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trace.txt");
    write_pause_trace(&input);

    let output = pleth_bin()
        .args(["timing", input.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success(), "10000 samples cannot cover the padding");
}

#[test]
fn cli_summary_prints_one_row_per_file() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    write_pause_trace(&first);
    write_pause_trace(&second);

    let output = pleth_bin()
        .args(["summary", first.to_str().unwrap(), second.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    let rows = stdout_json(&output);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row["pause_count"], 1);
        assert_eq!(row["samples"], 10000);
        assert!(row["median_t_in"].is_null());
    }
}

#[test]
fn cli_summary_reports_emka_start_time() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("session.raw");
    let mut text = String::from("Date/Time of     first sample\tMar 14, 2017 - 09:26:53 AM.500\n");
    text.push_str("Sampling\t2000 Hz\nChannel\tFlow\nTime         Value\n");
    for i in 0..10000 {
        let v = (2.0 * std::f64::consts::PI * 5.0 * f64::from(i) / 2000.0).sin();
        text.push_str(&format!("{:<13}{:>8.5}\n", "09:26:53.500", v));
    }
    std::fs::write(&input, text).unwrap();

    let output = pleth_bin()
        .args(["summary", input.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    let rows = stdout_json(&output);
    assert_eq!(rows[0]["samples"], 10000);
    assert_eq!(rows[0]["start"], "2017-03-14T09:26:53.500");
}

#[test]
fn cli_nonexistent_input_fails() {
    let output = pleth_bin()
        .args(["pauses", "/nonexistent/trace.txt"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read trace"));
}

#[test]
fn cli_forced_emka_format_on_text_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trace.txt");
    write_pause_trace(&input);

    let output = pleth_bin()
        .args(["--format", "emka", "cycles", input.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn cli_config_init_and_show() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let path_arg = path.to_str().unwrap();

    let output = pleth_bin().args(["config", "init", "--config", path_arg]).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(path.exists());

    let again = pleth_bin().args(["config", "init", "--config", path_arg]).output().unwrap();
    assert!(!again.status.success(), "init must not overwrite without --force");

    let forced = pleth_bin()
        .args(["config", "init", "--force", "--config", path_arg])
        .output()
        .unwrap();
    assert!(forced.status.success());

    let show = pleth_bin().args(["--config", path_arg, "config", "show"]).output().unwrap();
    assert!(show.status.success());
    let stdout = String::from_utf8_lossy(&show.stdout);
    assert!(stdout.contains("[eami]"));
    assert!(stdout.contains("min_duration_samples = 600"));
}

#[test]
fn cli_invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "[eami]\nlow_hz = 50.0\n").unwrap();
    let input = dir.path().join("trace.txt");
    write_pause_trace(&input);

    let output = pleth_bin()
        .args(["--config", config.to_str().unwrap(), "pauses", input.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("configuration"));
}
