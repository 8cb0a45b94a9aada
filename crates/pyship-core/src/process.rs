use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Execute a program and capture stdout/stderr.
///
/// # Errors
/// Returns an error when the program cannot be spawned.
pub fn run_captured(program: &str, args: &[String], cwd: &Path) -> Result<RunOutput> {
    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("failed to start {program}"))?;
    Ok(RunOutput {
        code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Execute a program with stdout/stderr streamed straight to the console.
///
/// # Errors
/// Returns an error when the program cannot be spawned or waited on.
pub fn run_streaming(program: &str, args: &[String], cwd: &Path) -> Result<i32> {
    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("failed to start {program}"))?;
    Ok(status.code().unwrap_or(-1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn run_captured_reports_exit_code_and_streams() {
        let temp = tempfile::tempdir().expect("tempdir");
        let output = run_captured(
            "sh",
            &[
                "-c".to_string(),
                "echo out; echo err >&2; exit 3".to_string(),
            ],
            temp.path(),
        )
        .expect("spawn sh");
        assert_eq!(output.code, 3);
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = run_captured("pyship-no-such-interpreter", &[], temp.path())
            .expect_err("spawn should fail");
        assert!(err.to_string().contains("failed to start"));
    }
}
