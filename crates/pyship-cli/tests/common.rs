#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::assert::Assert;
use serde_json::Value;
use tempfile::TempDir;

pub fn prepare_project(prefix: &str) -> (TempDir, PathBuf) {
    let temp = tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("tempdir");
    let project = temp.path().join("demo_pkg");
    fs::create_dir_all(&project).expect("project dir");
    fs::write(
        project.join("pyproject.toml"),
        "[project]\nname = \"demo-pkg\"\nversion = \"0.1.0\"\n",
    )
    .expect("pyproject");
    (temp, project)
}

pub fn parse_json(assert: &Assert) -> Value {
    serde_json::from_slice(&assert.get_output().stdout).expect("valid json envelope")
}

pub fn stdout_text(assert: &Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

pub fn stderr_text(assert: &Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}

/// Stand-in for the real interpreter: handles `-m build` and
/// `-m twine upload`, with exit codes driven by FAKE_BUILD_EXIT and
/// FAKE_TWINE_EXIT. Every invocation is appended to FAKE_PYTHON_LOG.
#[cfg(unix)]
const FAKE_PYTHON: &str = r#"#!/bin/sh
if [ -n "$FAKE_PYTHON_LOG" ]; then
    echo "$@" >> "$FAKE_PYTHON_LOG"
fi
case "$2" in
build)
    if [ -n "$FAKE_BUILD_EXIT" ] && [ "$FAKE_BUILD_EXIT" != 0 ]; then
        echo "fake build error" >&2
        exit "$FAKE_BUILD_EXIT"
    fi
    mkdir -p dist
    : > dist/demo_pkg-0.1.0.tar.gz
    : > dist/demo_pkg-0.1.0-py3-none-any.whl
    ;;
twine)
    if [ -n "$FAKE_TWINE_EXIT" ] && [ "$FAKE_TWINE_EXIT" != 0 ]; then
        echo "fake upload error" >&2
        exit "$FAKE_TWINE_EXIT"
    fi
    echo "uploaded"
    ;;
esac
exit 0
"#;

#[cfg(unix)]
pub fn install_fake_python(dir: &std::path::Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-python");
    fs::write(&script, FAKE_PYTHON).expect("write fake interpreter");
    let mut perms = fs::metadata(&script).expect("script metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&script, perms).expect("chmod script");
    script
}
