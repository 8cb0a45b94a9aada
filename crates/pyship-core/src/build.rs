use anyhow::Result;
use serde_json::json;
use tracing::info;

use crate::config::CommandContext;
use crate::outcome::ExecutionOutcome;
use crate::process::run_captured;

/// Builds distribution artifacts by invoking `python -m build`.
///
/// Output is captured; on a nonzero exit the child's stderr travels back
/// in the outcome details so the CLI can replay it.
///
/// # Errors
/// Returns an error when the interpreter cannot be spawned.
pub fn build_package(ctx: &CommandContext) -> Result<ExecutionOutcome> {
    let python = ctx.config().python().program.as_str();
    let args = vec!["-m".to_string(), "build".to_string()];
    info!(python = python, "building distribution artifacts");

    let output = run_captured(python, &args, ctx.cwd())?;
    if output.code != 0 {
        return Ok(ExecutionOutcome::failure(
            format!("pyship build: `{python} -m build` exited with code {}", output.code),
            json!({
                "code": output.code,
                "stderr": output.stderr,
            }),
        ));
    }

    Ok(ExecutionOutcome::success(
        "pyship build: artifacts written to dist/",
        json!({ "code": 0 }),
    ))
}
