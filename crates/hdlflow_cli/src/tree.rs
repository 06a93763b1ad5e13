//! `hdlflow tree` — print the module dependency tree.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use hdlflow_manifest::{build_module_tree, ModuleTree};

use crate::pipeline::resolve_manifest_root;
use crate::{GlobalArgs, TreeArgs};

/// Runs the `hdlflow tree` command.
pub fn run(args: &TreeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let root = resolve_manifest_root(args.path.as_deref(), global)?;
    let tree = build_module_tree(&root)?;

    print!("{}", render(&tree));
    Ok(0)
}

/// Renders the dependency tree as indented text.
///
/// A module already printed higher up (a shared dependency or a cycle
/// participant) is marked instead of expanded again, so rendering always
/// terminates.
fn render(tree: &ModuleTree) -> String {
    let mut out = format!("{}\n", tree.root_dir().display());
    let mut visited = HashSet::new();
    visited.insert(tree.root_dir().to_path_buf());
    render_children(tree, tree.root_dir(), "", &mut visited, &mut out);
    out
}

fn render_children(
    tree: &ModuleTree,
    dir: &Path,
    prefix: &str,
    visited: &mut HashSet<PathBuf>,
    out: &mut String,
) {
    let deps = tree.dependencies_of(dir);
    for (i, dep) in deps.iter().enumerate() {
        let last = i + 1 == deps.len();
        let connector = if last { "└── " } else { "├── " };

        let mut label = dep.display().to_string();
        if !tree.has_manifest(dep) {
            label.push_str(" (no manifest)");
        }
        if !visited.insert(dep.clone()) {
            out.push_str(&format!("{prefix}{connector}{label} (shown above)\n"));
            continue;
        }
        out.push_str(&format!("{prefix}{connector}{label}\n"));

        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        render_children(tree, dep, &child_prefix, visited, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdlflow_manifest::MANIFEST_FILE;
    use std::fs;
    use tempfile::TempDir;

    fn sim_manifest(extra: &str) -> String {
        format!("action = \"simulation\"\nsim_tool = \"modelsim\"\nsim_top = \"tb\"\n{extra}")
    }

    #[test]
    fn renders_nested_dependencies() {
        let tmp = TempDir::new().unwrap();
        let leaf = tmp.path().join("leaf");
        fs::create_dir_all(&leaf).unwrap();

        let mid = tmp.path().join("mid");
        fs::create_dir_all(&mid).unwrap();
        fs::write(
            mid.join(MANIFEST_FILE),
            sim_manifest("[modules]\nlocal = [\"../leaf\"]\n"),
        )
        .unwrap();

        let root = tmp.path().join("top");
        fs::create_dir_all(&root).unwrap();
        fs::write(
            root.join(MANIFEST_FILE),
            sim_manifest("[modules]\nlocal = [\"../mid\"]\n"),
        )
        .unwrap();

        let tree = build_module_tree(&root).unwrap();
        let rendered = render(&tree);
        assert!(rendered.contains("mid"));
        assert!(rendered.contains("leaf (no manifest)"));
    }

    #[test]
    fn shared_dependency_marked_not_expanded() {
        let tmp = TempDir::new().unwrap();
        let common = tmp.path().join("common");
        fs::create_dir_all(&common).unwrap();
        fs::write(common.join(MANIFEST_FILE), sim_manifest("")).unwrap();

        let a = tmp.path().join("a");
        fs::create_dir_all(&a).unwrap();
        fs::write(
            a.join(MANIFEST_FILE),
            sim_manifest("[modules]\nlocal = [\"../common\"]\n"),
        )
        .unwrap();

        let root = tmp.path().join("top");
        fs::create_dir_all(&root).unwrap();
        fs::write(
            root.join(MANIFEST_FILE),
            sim_manifest("[modules]\nlocal = [\"../a\", \"../common\"]\n"),
        )
        .unwrap();

        let tree = build_module_tree(&root).unwrap();
        let rendered = render(&tree);
        assert_eq!(rendered.matches("(shown above)").count(), 1);
    }

    #[test]
    fn cyclic_tree_rendering_terminates() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        fs::write(
            a.join(MANIFEST_FILE),
            sim_manifest("[modules]\nlocal = [\"../b\"]\n"),
        )
        .unwrap();
        fs::write(
            b.join(MANIFEST_FILE),
            sim_manifest("[modules]\nlocal = [\"../a\"]\n"),
        )
        .unwrap();

        let tree = build_module_tree(&a).unwrap();
        let rendered = render(&tree);
        assert!(rendered.contains("(shown above)"));
    }
}
