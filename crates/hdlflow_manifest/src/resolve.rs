//! Path resolution and command expansion for a loaded manifest.
//!
//! Resolution turns the relative paths a manifest declares into normalized
//! paths anchored at the manifest's own directory, checks that every local
//! dependency exists, and expands `$TOP` placeholders in the pre/post
//! commands. Normalization is lexical: `.` and `..` components are folded
//! without touching the filesystem, so a resolved path is always the
//! manifest directory joined with the declared relative path.

use crate::error::ManifestError;
use crate::types::Manifest;
use std::path::{Component, Path, PathBuf};

/// A manifest with its declared paths resolved against its directory.
#[derive(Debug, Clone)]
pub struct ResolvedManifest {
    /// The normalized directory the manifest was loaded from.
    pub dir: PathBuf,
    /// The manifest record itself.
    pub manifest: Manifest,
    /// Resolved local dependency directories, in declaration order.
    pub local_modules: Vec<PathBuf>,
    /// Resolved include search directories, in declaration order.
    pub include_dirs: Vec<PathBuf>,
    /// Pre-compilation shell command with placeholders expanded.
    pub pre_cmd: Option<String>,
    /// Post-run shell command with placeholders expanded.
    pub post_cmd: Option<String>,
}

impl ResolvedManifest {
    /// Returns `true` if the expanded post command references the top
    /// module (vacuously true when there is no post command).
    pub fn post_cmd_mentions_top(&self) -> bool {
        match &self.post_cmd {
            Some(cmd) => cmd.contains(&self.manifest.sim_top),
            None => true,
        }
    }
}

/// Resolves a loaded manifest against the directory it was loaded from.
///
/// Every `modules.local` entry must name an existing directory once joined
/// with `dir` and normalized; the first one that does not is reported as a
/// [`ManifestError::MissingDependency`] carrying the offending path.
pub fn resolve_manifest(dir: &Path, manifest: Manifest) -> Result<ResolvedManifest, ManifestError> {
    let dir = normalize_path(dir);

    let mut local_modules = Vec::new();
    for rel in &manifest.modules.local {
        let resolved = normalize_path(&dir.join(rel));
        if !resolved.is_dir() {
            return Err(ManifestError::MissingDependency(resolved));
        }
        local_modules.push(resolved);
    }

    let include_dirs = manifest
        .include_dirs
        .iter()
        .map(|d| normalize_path(&dir.join(d)))
        .collect();

    let pre_cmd = manifest
        .sim_pre_cmd
        .as_deref()
        .map(|c| expand_top(c, &manifest.sim_top));
    let post_cmd = manifest
        .sim_post_cmd
        .as_deref()
        .map(|c| expand_top(c, &manifest.sim_top));

    Ok(ResolvedManifest {
        dir,
        manifest,
        local_modules,
        include_dirs,
        pre_cmd,
        post_cmd,
    })
}

/// Lexically normalizes a path, folding `.` and `..` components.
///
/// A `..` that would climb above a relative path's start is kept; a `..`
/// directly under the root is dropped. The filesystem is never consulted,
/// so symlinks are not resolved.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal =
                    matches!(out.components().next_back(), Some(Component::Normal(_)));
                let last_is_root = matches!(
                    out.components().next_back(),
                    Some(Component::RootDir | Component::Prefix(_))
                );
                if last_is_normal {
                    out.pop();
                } else if !last_is_root {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Expands `$TOP` and `${TOP}` in a command string to the top module name.
///
/// A `$TOP` immediately followed by an identifier character is a different
/// variable (`$TOPLEVEL`) and is left alone. All other text passes through
/// untouched.
pub fn expand_top(cmd: &str, top: &str) -> String {
    let mut out = String::with_capacity(cmd.len());
    let mut i = 0;
    while i < cmd.len() {
        let rest = &cmd[i..];
        if let Some(tail) = rest.strip_prefix("${TOP}") {
            out.push_str(top);
            i = cmd.len() - tail.len();
        } else if let Some(tail) = rest.strip_prefix("$TOP") {
            let continues = tail
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
            if continues {
                out.push('$');
                i += 1;
            } else {
                out.push_str(top);
                i = cmd.len() - tail.len();
            }
        } else {
            let ch = rest.chars().next().expect("non-empty remainder");
            out.push(ch);
            i += ch.len_utf8();
        }
    }
    out
}
