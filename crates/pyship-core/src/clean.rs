use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::debug;

use crate::fs::remove_dir_all_writable;
use crate::outcome::ExecutionOutcome;

const EXACT_DIRS: [&str; 2] = ["build", "dist"];
const EGG_INFO_SUFFIX: &str = ".egg-info";

fn is_build_output(name: &str) -> bool {
    EXACT_DIRS.contains(&name) || name.ends_with(EGG_INFO_SUFFIX)
}

/// Removes stale build output from the working directory.
///
/// Deletes directories named `build` or `dist` and any `*.egg-info`
/// directory directly under `root`. Non-directory matches are left alone
/// and missing matches are not an error.
///
/// # Errors
/// Returns an error when the directory cannot be scanned or a matching
/// directory cannot be deleted.
pub fn clean_workspace(root: &Path) -> Result<ExecutionOutcome> {
    let mut removed = Vec::new();
    let entries =
        fs::read_dir(root).with_context(|| format!("reading {}", root.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry under {}", root.display()))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !is_build_output(name) {
            continue;
        }
        let file_type = entry
            .file_type()
            .with_context(|| format!("inspecting {}", entry.path().display()))?;
        if !file_type.is_dir() {
            continue;
        }
        remove_dir_all_writable(&entry.path())?;
        debug!(dir = name, "removed build output");
        removed.push(name.to_string());
    }
    removed.sort();

    let message = if removed.is_empty() {
        "pyship clean: nothing to remove".to_string()
    } else {
        format!("pyship clean: removed {}", removed.join(", "))
    };
    Ok(ExecutionOutcome::success(message, json!({ "removed": removed })))
}
