#![cfg(unix)]

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;

mod common;

use common::{install_fake_python, parse_json, prepare_project, stderr_text, stdout_text};

#[test]
fn release_with_test_flag_targets_testpypi() {
    let (temp, project) = prepare_project("pyship-release-test-");
    let python = install_fake_python(temp.path());
    let log = temp.path().join("invocations.log");
    fs::create_dir_all(project.join("build")).expect("stale build dir");

    let assert = cargo_bin_cmd!("pyship")
        .current_dir(&project)
        .env("PYSHIP_PYTHON", &python)
        .env("FAKE_PYTHON_LOG", &log)
        .args(["--test"])
        .assert()
        .success();

    assert!(
        !project.join("build").exists(),
        "stale build output is cleaned before building"
    );
    let invocations = fs::read_to_string(&log).expect("invocation log");
    assert!(invocations.contains("-m build"));
    assert!(invocations.contains("--repository testpypi"));
    assert!(stdout_text(&assert)
        .contains("pip install --index-url https://test.pypi.org/simple/ demo-pkg"));
}

#[test]
fn release_defaults_to_production_registry() {
    let (temp, project) = prepare_project("pyship-release-prod-");
    let python = install_fake_python(temp.path());
    let log = temp.path().join("invocations.log");

    let assert = cargo_bin_cmd!("pyship")
        .current_dir(&project)
        .env("PYSHIP_PYTHON", &python)
        .env("FAKE_PYTHON_LOG", &log)
        .assert()
        .success();

    let invocations = fs::read_to_string(&log).expect("invocation log");
    assert!(invocations.contains("-m twine upload"));
    assert!(
        !invocations.contains("--repository"),
        "production uploads use twine's default repository"
    );
    assert!(stdout_text(&assert).contains("pip install demo-pkg"));
}

#[test]
fn build_failure_halts_the_pipeline() {
    let (temp, project) = prepare_project("pyship-build-fail-");
    let python = install_fake_python(temp.path());
    let log = temp.path().join("invocations.log");

    let assert = cargo_bin_cmd!("pyship")
        .current_dir(&project)
        .env("PYSHIP_PYTHON", &python)
        .env("FAKE_PYTHON_LOG", &log)
        .env("FAKE_BUILD_EXIT", "3")
        .assert()
        .code(3);

    let invocations = fs::read_to_string(&log).expect("invocation log");
    assert!(invocations.contains("-m build"));
    assert!(
        !invocations.contains("twine"),
        "upload must not run after a failed build"
    );
    assert!(stderr_text(&assert).contains("fake build error"));
}

#[test]
fn upload_failure_exits_with_the_twine_code() {
    let (temp, project) = prepare_project("pyship-upload-fail-");
    let python = install_fake_python(temp.path());

    cargo_bin_cmd!("pyship")
        .current_dir(&project)
        .env("PYSHIP_PYTHON", &python)
        .env("FAKE_TWINE_EXIT", "2")
        .assert()
        .code(2);
}

#[test]
fn upload_stage_reuses_existing_artifacts() {
    let (temp, project) = prepare_project("pyship-upload-stage-");
    let python = install_fake_python(temp.path());
    let log = temp.path().join("invocations.log");
    let dist = project.join("dist");
    fs::create_dir_all(&dist).expect("dist dir");
    fs::write(dist.join("demo_pkg-0.1.0.tar.gz"), b"sdist").expect("artifact");

    cargo_bin_cmd!("pyship")
        .current_dir(&project)
        .env("PYSHIP_PYTHON", &python)
        .env("FAKE_PYTHON_LOG", &log)
        .args(["upload", "--test"])
        .assert()
        .success();

    let invocations = fs::read_to_string(&log).expect("invocation log");
    assert!(invocations.contains("--repository testpypi"));
    assert!(invocations.contains("demo_pkg-0.1.0.tar.gz"));
    assert!(
        !invocations.contains("-m build"),
        "the upload stage must not rebuild"
    );
}

#[test]
fn upload_without_artifacts_is_a_user_error() {
    let (_temp, project) = prepare_project("pyship-upload-empty-");

    let assert = cargo_bin_cmd!("pyship")
        .current_dir(&project)
        .args(["--json", "upload"])
        .assert()
        .code(1);

    let payload = parse_json(&assert);
    assert_eq!(payload["status"], "UserError");
    assert_eq!(payload["exit_code"], 1);
    assert_eq!(payload["details"]["hint"], "run `pyship build` first");
}
