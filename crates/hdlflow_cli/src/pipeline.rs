//! Shared helpers for CLI commands: locating the manifest directory.

use std::path::{Path, PathBuf};

use hdlflow_manifest::MANIFEST_FILE;

use crate::GlobalArgs;

/// Walks up from `start` looking for the nearest directory containing a
/// `Manifest.toml`.
pub fn find_manifest_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(MANIFEST_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {MANIFEST_FILE} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the manifest directory from an optional positional path and
/// global CLI args.
///
/// Precedence: positional path, then `--manifest`, then walking up from
/// the current directory. A path naming a file is taken as the manifest
/// file itself (its parent directory is used); a directory is used as-is.
pub fn resolve_manifest_root(
    path_arg: Option<&str>,
    global: &GlobalArgs,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(arg) = path_arg.or(global.manifest.as_deref()) {
        let p = PathBuf::from(arg);
        if p.is_file() {
            Ok(p.parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        find_manifest_root(&std::env::current_dir()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn minimal_manifest() -> &'static str {
        "action = \"simulation\"\nsim_tool = \"modelsim\"\nsim_top = \"tb\"\n"
    }

    fn global_with(manifest: Option<String>) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            manifest,
        }
    }

    #[test]
    fn find_manifest_root_in_current_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(MANIFEST_FILE), minimal_manifest()).unwrap();
        let root = find_manifest_root(tmp.path()).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn find_manifest_root_in_parent() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(MANIFEST_FILE), minimal_manifest()).unwrap();
        let sub = tmp.path().join("rtl");
        fs::create_dir_all(&sub).unwrap();
        let root = find_manifest_root(&sub).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn find_manifest_root_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = find_manifest_root(tmp.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("could not find Manifest.toml"));
    }

    #[test]
    fn positional_path_beats_manifest_flag() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();

        let global = global_with(Some(b.to_str().unwrap().to_string()));
        let root = resolve_manifest_root(Some(a.to_str().unwrap()), &global).unwrap();
        assert_eq!(root, a);
    }

    #[test]
    fn manifest_flag_file_resolves_to_parent() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = tmp.path().join(MANIFEST_FILE);
        fs::write(&manifest_path, minimal_manifest()).unwrap();

        let global = global_with(Some(manifest_path.to_str().unwrap().to_string()));
        let root = resolve_manifest_root(None, &global).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn manifest_flag_dir_used_as_is() {
        let tmp = TempDir::new().unwrap();
        let global = global_with(Some(tmp.path().to_str().unwrap().to_string()));
        let root = resolve_manifest_root(None, &global).unwrap();
        assert_eq!(root, tmp.path());
    }
}
