mod common;

use common::{jgf_run, static_dump, timing_run, write_dump};
use predicates::prelude::*;

#[test]
fn test_report_without_files_is_usage_error() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("oshaprof");
    cmd.arg("caches");

    cmd.assert().failure().stderr(predicate::str::contains("FILES"));
}

#[test]
fn test_caches_prints_table() {
    let dir = tempfile::tempdir().unwrap();
    let a = jgf_run(dir.path(), "Crypt", 4, true, 3, 1, 0);
    let b = jgf_run(dir.path(), "Crypt", 4, false, 1, 1, 1);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("oshaprof");
    cmd.arg("caches").arg(&a).arg(&b);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Array cache hit rate"))
        .stdout(predicate::str::contains("Crypt"))
        .stdout(predicate::str::contains("0.7500"));
}

#[test]
fn test_json_output_written() {
    let dir = tempfile::tempdir().unwrap();
    let a = jgf_run(dir.path(), "Crypt", 4, true, 3, 1, 0);
    let b = jgf_run(dir.path(), "Crypt", 4, false, 1, 1, 1);
    let out = dir.path().join("reports/caches.json");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("oshaprof");
    cmd.arg("caches").arg("-o").arg(&out).arg(&a).arg(&b);
    cmd.assert().success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["report"], "caches");
    assert_eq!(json["inputs"], 2);
    assert_eq!(json["data"]["all"]["array_states_hit_rate"], 0.75);
    assert!(json["generated_at"].is_string());
}

#[test]
fn test_garbage_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let bad = write_dump(dir.path(), "JGFCryptBenchSizeA-4-threads-prof-0.py", "exec('x')");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("oshaprof");
    cmd.arg("checks").arg(&bad);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load profiles"));
}

#[test]
fn test_zero_denominator_fails() {
    let dir = tempfile::tempdir().unwrap();
    // Only array-state runs, so the element-state half is empty
    let a = jgf_run(dir.path(), "Crypt", 4, true, 3, 1, 0);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("oshaprof");
    cmd.arg("caches").arg(&a);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to compute caches report"));
}

#[test]
fn test_option_flag_narrows_selection() {
    let dir = tempfile::tempdir().unwrap();
    let a = jgf_run(dir.path(), "Crypt", 4, true, 3, 1, 0);

    // No profile has arrayCacheSize=64, so nothing is loaded and the
    // threads report is empty but successful
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("oshaprof");
    cmd.arg("threads").arg("-O").arg("arrayCacheSize=64").arg(&a);

    cmd.assert().success().stdout(predicate::str::contains("Threads per run"));
}

#[test]
fn test_malformed_option_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let a = jgf_run(dir.path(), "Crypt", 4, true, 3, 1, 0);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("oshaprof");
    cmd.arg("caches").arg("-O").arg("arrayCacheSize").arg(&a);

    cmd.assert().failure();
}

#[test]
fn test_static_report_rejects_option_filters() {
    let dir = tempfile::tempdir().unwrap();
    let s = static_dump(dir.path(), "crypt", 10, 5);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("oshaprof");
    cmd.arg("modules").arg("-O").arg("profile=true").arg(&s);

    cmd.assert().failure();
}

#[test]
fn test_static_report_ignores_config_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let s = static_dump(dir.path(), "crypt", 10, 5);
    let config = write_dump(dir.path(), "presets.toml", "[presets.caches]\nrecord = \"false\"\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("oshaprof");
    cmd.env("OSHAPROF_CONFIG", &config).arg("inlining").arg(&s);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Overall: 50.0%"));
}

#[test]
fn test_element_states_slowdown_keeps_array_state_baseline() {
    let dir = tempfile::tempdir().unwrap();
    // Baselines record arrayIndexStates=false, like every uninstrumented run
    let files = vec![
        timing_run(dir.path(), "Crypt", 8, true, false, 6, 0),
        timing_run(dir.path(), "Crypt", 8, false, true, 3, 1),
        timing_run(dir.path(), "Crypt", 8, true, true, 100, 2),
        timing_run(dir.path(), "Crypt", 4, true, false, 50, 0),
    ];

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("oshaprof");
    cmd.arg("slowdown-element-states").args(&files);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Slowdown with element states, 8 threads"))
        .stdout(predicate::str::contains("2.0000"));
}

#[test]
fn test_inlining_report() {
    let dir = tempfile::tempdir().unwrap();
    let s = static_dump(dir.path(), "crypt", 10, 5);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("oshaprof");
    cmd.arg("inlining").arg(&s);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Overall: 50.0%"));
}

#[test]
fn test_validate_describes_both_dump_kinds() {
    let dir = tempfile::tempdir().unwrap();
    let p = jgf_run(dir.path(), "Crypt", 4, true, 3, 1, 0);
    let s = static_dump(dir.path(), "crypt", 10, 5);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("oshaprof");
    cmd.arg("validate").arg(&p).arg(&s);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("profile of JGFCryptBenchSizeA"))
        .stdout(predicate::str::contains("static stats of crypt"))
        .stdout(predicate::str::contains("2 file(s) valid"));
}

#[test]
fn test_presets_with_config_override() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_dump(dir.path(), "presets.toml", "[presets.caches]\nrecord = \"false\"\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("oshaprof");
    cmd.arg("presets").arg("--config").arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("caches       profile=true, record=false"))
        .stdout(predicate::str::contains("threads      (every profile)"));
}

#[test]
fn test_version() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("oshaprof");
    cmd.arg("version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("oshaprof v"));
}
