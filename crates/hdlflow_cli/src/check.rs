//! `hdlflow check` — validate a manifest tree and report a summary.

use serde_json::json;

use hdlflow_manifest::build_module_tree;
use hdlflow_tool::resolve_tool;

use crate::pipeline::resolve_manifest_root;
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Runs the `hdlflow check` command.
///
/// Loading, resolution, and gathering failures propagate as hard errors;
/// an unknown simulator is reported in the summary and makes the check
/// fail with exit code 1. Advisory findings (an unfetched remote module,
/// a post command that never mentions the top module) are warnings only.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let root = resolve_manifest_root(args.path.as_deref(), global)?;
    let tree = build_module_tree(&root)?;
    let manifest = tree.root();
    let set = tree.source_set()?;

    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    if manifest.manifest.is_simulation() {
        if let Err(e) = resolve_tool(&manifest.manifest.sim_tool) {
            errors.push(e.to_string());
        }
    }
    if !manifest.post_cmd_mentions_top() {
        warnings.push(format!(
            "sim_post_cmd does not reference sim_top '{}'",
            manifest.manifest.sim_top
        ));
    }
    for remote in &set.remote {
        warnings.push(format!("{} module not fetched: {}", remote.kind, remote.url));
    }

    match args.format {
        ReportFormat::Json => {
            let report = json!({
                "manifest_dir": tree.root_dir(),
                "action": manifest.manifest.action.to_string(),
                "sim_tool": manifest.manifest.sim_tool,
                "sim_top": manifest.manifest.sim_top,
                "library": manifest.manifest.library,
                "module_count": tree.module_count(),
                "file_count": set.files.len(),
                "include_dirs": set.include_dirs,
                "remote_modules": set.remote,
                "warnings": warnings,
                "errors": errors,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        ReportFormat::Text => {
            if !global.quiet {
                println!("manifest:  {}", tree.root_dir().display());
                println!("action:    {}", manifest.manifest.action);
                println!("sim_tool:  {}", display_or_dash(&manifest.manifest.sim_tool));
                println!("sim_top:   {}", display_or_dash(&manifest.manifest.sim_top));
                println!("library:   {}", manifest.manifest.library);
                println!("modules:   {}", tree.module_count());
                println!("files:     {}", set.files.len());
            }
            for warning in &warnings {
                eprintln!("{}: {warning}", paint("warning", "33", global.color));
            }
            for error in &errors {
                eprintln!("{}: {error}", paint("error", "31", global.color));
            }
        }
    }

    Ok(if errors.is_empty() { 0 } else { 1 })
}

/// Shows `-` for fields a synthesis manifest legitimately leaves empty.
fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Wraps a label in an ANSI color when colored output is enabled.
fn paint(label: &str, code: &str, color: bool) -> String {
    if color {
        format!("\x1b[{code}m{label}\x1b[0m")
    } else {
        label.to_string()
    }
}
