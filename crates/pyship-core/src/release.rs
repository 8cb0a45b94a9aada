use std::fs;
use std::path::Path;

use anyhow::Result;
use serde_json::json;
use toml_edit::{DocumentMut, Item};
use tracing::info;

use crate::build::build_package;
use crate::clean::clean_workspace;
use crate::config::CommandContext;
use crate::outcome::{CommandStatus, ExecutionOutcome};
use crate::registry::Registry;
use crate::upload::upload_package;

#[derive(Clone, Debug)]
pub struct ReleaseRequest {
    pub test_mode: bool,
}

/// Runs the full pipeline: clean, build, upload, in strict order.
///
/// The first stage that does not come back `Ok` halts the pipeline and its
/// outcome is returned unchanged, so the stage's exit code and captured
/// output reach the caller. On full success the outcome carries the
/// registry-appropriate `pip install` instruction as a hint.
///
/// # Errors
/// Returns an error when a stage fails in a way it does not model itself,
/// e.g. a filesystem error while deleting build output.
pub fn release_package(ctx: &CommandContext, request: &ReleaseRequest) -> Result<ExecutionOutcome> {
    let registry = Registry::select(request.test_mode);
    let mut stages = Vec::new();

    let cleaned = clean_workspace(ctx.cwd())?;
    info!("{}", cleaned.message);
    stages.push(cleaned.message);

    let built = build_package(ctx)?;
    if built.status != CommandStatus::Ok {
        return Ok(built);
    }
    info!("{}", built.message);
    stages.push(built.message);

    let uploaded = upload_package(ctx, &registry)?;
    if uploaded.status != CommandStatus::Ok {
        return Ok(uploaded);
    }
    info!("{}", uploaded.message);
    stages.push(uploaded.message);

    let package = package_name(ctx.cwd());
    let install = registry.install_instruction(&package);
    Ok(ExecutionOutcome::success(
        format!("pyship release: {} release complete", registry.label()),
        json!({
            "registry": registry.label(),
            "package": package,
            "install": install.clone(),
            "hint": install,
            "stages": stages,
        }),
    ))
}

/// Package name for the install instruction: `[project].name` from
/// pyproject.toml when present, else the sanitized directory name.
fn package_name(root: &Path) -> String {
    if let Some(name) = pyproject_name(root) {
        return name;
    }
    root.file_name()
        .and_then(|name| name.to_str())
        .map(sanitize_package_name)
        .unwrap_or_else(|| "package".to_string())
}

fn pyproject_name(root: &Path) -> Option<String> {
    let contents = fs::read_to_string(root.join("pyproject.toml")).ok()?;
    let doc: DocumentMut = contents.parse().ok()?;
    doc.get("project")?
        .as_table()?
        .get("name")
        .and_then(Item::as_str)
        .map(ToString::to_string)
}

fn sanitize_package_name(raw: &str) -> String {
    raw.trim().replace('_', "-").to_ascii_lowercase()
}
