use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_racechart")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "racechart.exe"
            } else {
                "racechart"
            });
            p
        })
}

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("cli_smoke").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn cli_render_writes_svg() {
    let out_path = out_dir("svg").join("chart.svg");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(exe())
        .args(["render", "--source", "tests/data/cyclists.json", "--out"])
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let svg = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(svg.matches("<circle").count(), 8);
    assert!(svg.contains("<animate"));
}

#[test]
fn cli_render_writes_png() {
    let out_path = out_dir("png").join("chart.png");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(exe())
        .args([
            "render",
            "--source",
            "tests/data/cyclists.json",
            "--layout",
            "tall",
            "--out",
        ])
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let bytes = std::fs::read(&out_path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn cli_load_failure_writes_nothing() {
    let out_path = out_dir("fail").join("chart.svg");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(exe())
        .args(["render", "--source", "tests/data/no_such_file.json", "--out"])
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(!status.success());
    assert!(!out_path.exists());
}

#[test]
fn cli_rejects_nan_snapshot_time() {
    let out_path = out_dir("nan").join("chart.svg");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(exe())
        .args([
            "render",
            "--source",
            "tests/data/cyclists.json",
            "--snapshot-ms",
            "NaN",
            "--out",
        ])
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(!status.success());
    assert!(!out_path.exists());
}

#[test]
fn cli_inspect_prints_summary() {
    let output = std::process::Command::new(exe())
        .args(["inspect", "--source", "tests/data/cyclists.json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["records"], 8);
    assert_eq!(summary["doped"], 5);
    assert_eq!(summary["time_offset_seconds"], 2210.0);
    assert_eq!(summary["max_elapsed"], "02:33");
}
