#![cfg(feature = "cli")]

use std::path::{Path, PathBuf};
use std::process::Command;

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = PathBuf::from(format!(
        "{}/rfstim-cli-{tag}-{}-{}",
        std::env::temp_dir().display(),
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn write_config(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("config file should be writable");
    path
}

const STIM_CSV: &str = "\
StimName,StimType,TriggerType,PinName,FreqListName,FreqListIndex,Power,WaveFile,RepeatCount
stim-cw,CW,SW,RF1,flist-a,0,-10.0,none,1
";

const FLIST_CSV: &str = "\
FreqListName,FreqListValue
flist-a,1.8e9|2.4e9|3.7e9
";

#[test]
fn run_cycle_reports_applied_registers() {
    let dir = unique_temp_dir("run");
    let stim = write_config(&dir, "site.stim", STIM_CSV);
    let flist = write_config(&dir, "site.flist", FLIST_CSV);

    let output = Command::new(env!("CARGO_BIN_EXE_rfstim"))
        .arg("--log-level")
        .arg("error")
        .arg("--format")
        .arg("json")
        .arg("run")
        .arg(&stim)
        .arg(&flist)
        .arg("--stim")
        .arg("stim-cw")
        .arg("--freq-index")
        .arg("2")
        .arg("--power=-4.5")
        .output()
        .expect("run command should start");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(json["stim"], "stim-cw");
    assert_eq!(json["channel_type"], "CW");
    assert_eq!(json["dispatch"], "handled");
    assert_eq!(json["status"], 0);
    assert_eq!(json["frequency"], 3.7e9);
    assert_eq!(json["power"], -4.5);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn run_unknown_stim_fails_with_data_error() {
    let dir = unique_temp_dir("unknown-stim");
    let stim = write_config(&dir, "site.stim", STIM_CSV);
    let flist = write_config(&dir, "site.flist", FLIST_CSV);

    let output = Command::new(env!("CARGO_BIN_EXE_rfstim"))
        .arg("--log-level")
        .arg("error")
        .arg("run")
        .arg(&stim)
        .arg(&flist)
        .arg("--stim")
        .arg("stim-zzz")
        .output()
        .expect("run command should start");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(60));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn show_prints_parsed_tables_as_json() {
    let dir = unique_temp_dir("show");
    let flist = write_config(&dir, "site.flist", FLIST_CSV);

    let output = Command::new(env!("CARGO_BIN_EXE_rfstim"))
        .arg("--log-level")
        .arg("error")
        .arg("--format")
        .arg("json")
        .arg("show")
        .arg(&flist)
        .output()
        .expect("show command should start");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(json["category"], "flist");
    assert_eq!(json["rows"][0][0], "flist-a");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn version_prints_package_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_rfstim"))
        .arg("version")
        .output()
        .expect("version command should start");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}
