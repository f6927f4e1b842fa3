//! CLI command integration tests.
//! Each test clears RTKIT_CONFIG so a developer's config cannot leak in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rtkit() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("rtkit").unwrap();
    cmd.env_remove("RTKIT_CONFIG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn math_signed_zero() {
    rtkit()
        .args(["math", "max", "0", "-0"])
        .assert()
        .success()
        .stdout("0\n");
    rtkit()
        .args(["math", "min", "0", "-0"])
        .assert()
        .success()
        .stdout("-0\n");
}

#[test]
fn math_hypot_and_special_values() {
    rtkit()
        .args(["math", "hypot", "3", "4"])
        .assert()
        .success()
        .stdout("5\n");
    rtkit()
        .args(["math", "sqrt", "-1"])
        .assert()
        .success()
        .stdout("NaN\n");
    rtkit()
        .args(["math", "exp", "1000"])
        .assert()
        .success()
        .stdout("Infinity\n");
}

#[test]
fn math_coerces_strings_and_booleans() {
    rtkit()
        .args(["math", "abs", "0x10"])
        .assert()
        .success()
        .stdout("16\n");
    rtkit()
        .args(["math", "max", "true", "null"])
        .assert()
        .success()
        .stdout("1\n");
    rtkit()
        .args(["math", "floor", "abc"])
        .assert()
        .success()
        .stdout("NaN\n");
}

#[test]
fn math_unknown_function_fails() {
    rtkit()
        .args(["math", "frobnicate", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Math.frobnicate is not a function"));
}

#[test]
fn math_coercion_error_is_reported() {
    rtkit()
        .args(["math", "abs", "[1]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Math.abs failed"));
}

#[test]
fn constants_lists_all_eight() {
    let out = stdout_of(rtkit().arg("constants"));
    assert_eq!(out.lines().count(), 8);
    assert!(out.contains("PI      = 3.141592653589793"));
    assert!(out.contains("SQRT1_2 = 0.7071067811865476"));
}

#[test]
fn random_seed_is_reproducible() {
    let a = stdout_of(rtkit().args(["random", "--count", "5", "--seed", "42"]));
    let b = stdout_of(rtkit().args(["random", "--count", "5", "--seed", "42"]));
    assert_eq!(a, b);
    assert_eq!(a.lines().count(), 5);
    for line in a.lines() {
        let n: f64 = line.parse().unwrap();
        assert!((0.0..1.0).contains(&n), "{n}");
    }
}

#[test]
fn config_seed_matches_flag_seed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rtkit.toml");
    std::fs::write(&path, "[random]\nseed = 42\n").unwrap();

    let from_flag = stdout_of(rtkit().args(["random", "--count", "3", "--seed", "42"]));
    let from_env = stdout_of(rtkit().env("RTKIT_CONFIG", &path).args(["random", "--count", "3"]));
    let from_arg = stdout_of(
        rtkit()
            .arg("--config")
            .arg(&path)
            .args(["random", "--count", "3"]),
    );
    assert_eq!(from_flag, from_env);
    assert_eq!(from_flag, from_arg);
}

#[test]
fn bad_config_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rtkit.toml");
    std::fs::write(&path, "[output]\npretty = \"yes\"\n").unwrap();
    rtkit()
        .arg("--config")
        .arg(&path)
        .arg("constants")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn set_dedups_and_answers_queries() {
    let out = stdout_of(rtkit().args(["set", "[1,2,2,3]", "--has", "2", "--has", "9", "--delete", "1"]));
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["size"], 2);
    assert_eq!(report["has"][0]["result"], true);
    assert_eq!(report["has"][1]["result"], false);
    assert_eq!(report["delete"][0]["result"], true);
    assert_eq!(report["contents"], serde_json::json!([2, 3]));
}

#[test]
fn map_keeps_first_insertion_position() {
    let out = stdout_of(rtkit().args([
        "map",
        r#"[["a",1],["b",2],["a",3]]"#,
        "--get",
        "a",
        "--get",
        "zz",
    ]));
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["size"], 2);
    assert_eq!(report["get"][0]["result"], 3);
    assert_eq!(report["get"][1]["result"], serde_json::Value::Null);
    assert_eq!(report["contents"], serde_json::json!([["a", 3], ["b", 2]]));
}

#[test]
fn map_from_non_iterable_fails() {
    rtkit()
        .args(["map", r#"{"a":1}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to construct Map"))
        .stderr(predicate::str::contains("is not iterable"));
    rtkit()
        .args(["map", "[1]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not an entry object"));
}

#[test]
fn pretty_output_from_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rtkit.toml");
    std::fs::write(&path, "[output]\npretty = true\n").unwrap();
    rtkit()
        .env("RTKIT_CONFIG", &path)
        .args(["set", "[1]"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"size\": 1"));
}

#[test]
fn verbose_logs_to_stderr() {
    rtkit()
        .args(["--verbose", "math", "sin", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}
