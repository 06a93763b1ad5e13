//! `hdlflow files` — list gathered source files in compile order.

use hdlflow_manifest::build_module_tree;

use crate::pipeline::resolve_manifest_root;
use crate::{FilesArgs, GlobalArgs, ReportFormat};

/// Runs the `hdlflow files` command.
pub fn run(args: &FilesArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let root = resolve_manifest_root(args.path.as_deref(), global)?;
    let tree = build_module_tree(&root)?;
    let set = tree.source_set()?;

    match args.format {
        ReportFormat::Text => {
            for file in &set.files {
                println!("{}", file.path.display());
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&set.files)?);
        }
    }

    Ok(0)
}
