use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::json;
use thiserror::Error;
use tracing::info;

use crate::config::CommandContext;
use crate::outcome::ExecutionOutcome;
use crate::process::run_streaming;
use crate::registry::Registry;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("distribution directory {0} does not exist")]
    MissingDir(String),
    #[error("no distribution artifacts under {0}")]
    NoArtifacts(String),
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Uploads everything under `dist/` to the selected registry via
/// `python -m twine upload`, streaming twine's output to the console.
///
/// # Errors
/// Returns an error when the distribution directory cannot be read or the
/// interpreter cannot be spawned.
pub fn upload_package(ctx: &CommandContext, registry: &Registry) -> Result<ExecutionOutcome> {
    let dist_dir = ctx.cwd().join(ctx.config().publish().dist_dir);
    let artifacts = match discover_artifacts(&dist_dir) {
        Ok(files) => files,
        Err(err @ (ArtifactError::MissingDir(_) | ArtifactError::NoArtifacts(_))) => {
            return Ok(ExecutionOutcome::user_error(
                format!("pyship upload: {err}"),
                json!({
                    "registry": registry.label(),
                    "hint": "run `pyship build` first",
                }),
            ));
        }
        Err(err) => return Err(err.into()),
    };

    let python = ctx.config().python().program.as_str();
    let args = upload_args(registry, &artifacts);
    info!(
        registry = registry.label(),
        count = artifacts.len(),
        "uploading artifacts"
    );

    let code = run_streaming(python, &args, ctx.cwd())?;
    if code != 0 {
        return Ok(ExecutionOutcome::failure(
            format!(
                "pyship upload: {} upload failed with code {code}",
                registry.label()
            ),
            json!({ "code": code, "registry": registry.label() }),
        ));
    }

    Ok(ExecutionOutcome::success(
        format!(
            "pyship upload: {} artifacts uploaded to {}",
            artifacts.len(),
            registry.label()
        ),
        json!({
            "code": 0,
            "registry": registry.label(),
            "artifacts": artifact_names(&artifacts),
        }),
    ))
}

fn discover_artifacts(dist_dir: &Path) -> Result<Vec<PathBuf>, ArtifactError> {
    let display = dist_dir.display().to_string();
    if !dist_dir.is_dir() {
        return Err(ArtifactError::MissingDir(display));
    }
    let entries = fs::read_dir(dist_dir).map_err(|source| ArtifactError::Io {
        path: display.clone(),
        source,
    })?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ArtifactError::Io {
            path: display.clone(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    if files.is_empty() {
        return Err(ArtifactError::NoArtifacts(display));
    }
    files.sort();
    Ok(files)
}

fn upload_args(registry: &Registry, artifacts: &[PathBuf]) -> Vec<String> {
    let mut args = vec!["-m".to_string(), "twine".to_string(), "upload".to_string()];
    if let Some(repository) = registry.repository() {
        args.push("--repository".to_string());
        args.push(repository.to_string());
    }
    args.extend(
        artifacts
            .iter()
            .map(|path| path.to_string_lossy().into_owned()),
    );
    args
}

fn artifact_names(artifacts: &[PathBuf]) -> Vec<String> {
    artifacts
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect()
}
