//! Flow assembly: pre command, compile/run plan, post command.

use std::path::PathBuf;

use hdlflow_manifest::{ResolvedManifest, SourceFile, SourceSet};

use crate::backends::ToolBackend;
use crate::error::ToolError;
use crate::invocation::Invocation;

/// Everything a backend needs to plan one simulation run.
#[derive(Debug, Clone)]
pub struct SimRequest {
    /// Top-level entry module name.
    pub top: String,
    /// Logical library the sources compile into.
    pub library: String,
    /// Source files in compile order.
    pub files: Vec<SourceFile>,
    /// Include search directories.
    pub include_dirs: Vec<PathBuf>,
    /// Working directory for every invocation (the manifest directory).
    pub work_dir: PathBuf,
    /// Directory for build products (simulator work libraries, images).
    pub out_dir: PathBuf,
    /// Shell command to run before compilation, already expanded.
    pub pre_cmd: Option<String>,
    /// Shell command to run after the simulation, already expanded.
    pub post_cmd: Option<String>,
}

impl SimRequest {
    /// Builds a request from a resolved root manifest and its gathered
    /// source set.
    pub fn from_manifest(resolved: &ResolvedManifest, set: &SourceSet, out_dir: PathBuf) -> Self {
        SimRequest {
            top: resolved.manifest.sim_top.clone(),
            library: resolved.manifest.library.clone(),
            files: set.files.clone(),
            include_dirs: set.include_dirs.clone(),
            work_dir: resolved.dir.clone(),
            out_dir,
            pre_cmd: resolved.pre_cmd.clone(),
            post_cmd: resolved.post_cmd.clone(),
        }
    }
}

/// Plans the full flow for a request: the pre command (if any), the
/// backend's compile and run steps, then the post command (if any).
///
/// The returned invocations are in execution order and nothing has been
/// spawned yet.
pub fn plan_flow(
    backend: &dyn ToolBackend,
    request: &SimRequest,
) -> Result<Vec<Invocation>, ToolError> {
    let mut steps = Vec::new();
    if let Some(pre) = &request.pre_cmd {
        steps.push(Invocation::shell(pre, &request.work_dir));
    }
    steps.extend(backend.plan(request)?);
    if let Some(post) = &request.post_cmd {
        steps.push(Invocation::shell(post, &request.work_dir));
    }
    Ok(steps)
}
