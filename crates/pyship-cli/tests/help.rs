use assert_cmd::cargo::cargo_bin_cmd;

mod common;

use common::stdout_text;

#[test]
fn help_lists_stages_and_the_test_flag() {
    let assert = cargo_bin_cmd!("pyship").arg("--help").assert().success();
    let help = stdout_text(&assert);
    assert!(help.contains("clean"));
    assert!(help.contains("build"));
    assert!(help.contains("upload"));
    assert!(help.contains("--test"));
}

#[test]
fn version_flag_reports_the_crate_version() {
    let assert = cargo_bin_cmd!("pyship").arg("--version").assert().success();
    assert!(stdout_text(&assert).contains(env!("CARGO_PKG_VERSION")));
}
