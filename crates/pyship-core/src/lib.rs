#![deny(clippy::all, warnings)]

mod build;
mod clean;
mod config;
mod fs;
mod outcome;
mod process;
mod registry;
mod release;
mod upload;

pub use crate::build::build_package;
pub use crate::clean::clean_workspace;
pub use crate::config::{CommandContext, Config, PublishConfig, PythonConfig};
pub use crate::outcome::{to_json_response, CommandStatus, ExecutionOutcome};
pub use crate::process::RunOutput;
pub use crate::registry::Registry;
pub use crate::release::{release_package, ReleaseRequest};
pub use crate::upload::{upload_package, ArtifactError};
