//! `hdlflow sim` — drive one manifest's simulation flow.
//!
//! Loads the manifest tree, gathers sources in compile order, resolves the
//! simulator backend, plans the flow (pre command, compile steps, run step,
//! post command), and executes it. `--dry-run` stops after planning and
//! prints the command lines instead.

use hdlflow_manifest::build_module_tree;
use hdlflow_tool::{plan_flow, resolve_tool, SimRequest};

use crate::pipeline::resolve_manifest_root;
use crate::{GlobalArgs, SimArgs};

/// Runs the `hdlflow sim` command.
///
/// Returns exit code 0 when every step succeeds, 1 when a flow step fails.
pub fn run(args: &SimArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    // Step 1: Locate the manifest and build the module tree
    let root = resolve_manifest_root(args.path.as_deref(), global)?;
    let tree = build_module_tree(&root)?;
    let manifest = tree.root();

    // Step 2: Only simulation manifests drive a flow
    if !manifest.manifest.is_simulation() {
        return Err(format!(
            "manifest requests '{}', not a simulation",
            manifest.manifest.action
        )
        .into());
    }

    // Step 3: Resolve the backend before anything is spawned
    let tool_name = args
        .tool
        .as_deref()
        .unwrap_or(&manifest.manifest.sim_tool);
    let backend = resolve_tool(tool_name)?;

    // Step 4: Gather sources in compile order
    let set = tree.source_set()?;
    if set.files.is_empty() {
        return Err("no HDL source files gathered".into());
    }

    if !global.quiet {
        eprintln!(
            "   Simulating {} with {}",
            manifest.manifest.sim_top,
            backend.name()
        );
        for remote in &set.remote {
            eprintln!("warning: {} module not fetched: {}", remote.kind, remote.url);
        }
    }

    // Step 5: Plan the flow
    let out_dir = tree.root_dir().join("out");
    let request = SimRequest::from_manifest(manifest, &set, out_dir.clone());
    let steps = plan_flow(backend.as_ref(), &request)?;

    if args.dry_run {
        for step in &steps {
            println!("{}", step.command_line());
        }
        return Ok(0);
    }

    // Step 6: Execute, stopping at the first failing step
    std::fs::create_dir_all(&out_dir)?;
    for step in &steps {
        if global.verbose {
            eprintln!("   Running {}", step.command_line());
        }
        if let Err(e) = step.run() {
            eprintln!("error: {e}");
            return Ok(1);
        }
    }

    if !global.quiet {
        eprintln!("   Flow finished ({} step(s))", steps.len());
    }
    Ok(0)
}
