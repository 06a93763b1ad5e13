//! Recursive module gathering.
//!
//! Starting from a root manifest, gathering walks every `modules.local`
//! dependency. A dependency directory that carries its own `Manifest.toml`
//! is loaded and its dependencies walked in turn; a plain directory
//! contributes its HDL sources directly. The walk builds a directed
//! dependency graph over module directories and produces a [`SourceSet`]
//! with all files in dependency-first compile order.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use crate::error::ManifestError;
use crate::loader::{load_manifest, MANIFEST_FILE};
use crate::resolve::{normalize_path, resolve_manifest, ResolvedManifest};
use crate::types::{detect_language, HdlLanguage};

/// A single HDL source file with its detected language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceFile {
    /// Normalized path to the file.
    pub path: PathBuf,
    /// Language detected from the file extension.
    pub language: HdlLanguage,
}

/// Category of a remote dependency module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteKind {
    /// Declared under `modules.git`.
    Git,
    /// Declared under `modules.svn`.
    Svn,
}

impl std::fmt::Display for RemoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteKind::Git => write!(f, "git"),
            RemoteKind::Svn => write!(f, "svn"),
        }
    }
}

/// A remote dependency module declared somewhere in the tree.
///
/// Remote modules are reported, not fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteModule {
    /// The category the module was declared under.
    pub kind: RemoteKind,
    /// The declared URL, verbatim.
    pub url: String,
}

/// Everything gathered from a module tree, ready for a tool backend.
#[derive(Debug, Clone)]
pub struct SourceSet {
    /// Source files in compile order: dependencies first, the root
    /// module's files last, duplicates removed.
    pub files: Vec<SourceFile>,
    /// Merged include directories from every manifest, deduplicated.
    pub include_dirs: Vec<PathBuf>,
    /// Remote modules declared anywhere in the tree.
    pub remote: Vec<RemoteModule>,
    /// Module directories in the same dependency-first order as `files`.
    pub module_dirs: Vec<PathBuf>,
}

/// The dependency graph of module directories rooted at one manifest.
#[derive(Debug)]
pub struct ModuleTree {
    graph: DiGraph<PathBuf, ()>,
    nodes: HashMap<PathBuf, NodeIndex>,
    resolved: HashMap<PathBuf, Option<ResolvedManifest>>,
    children: HashMap<PathBuf, Vec<PathBuf>>,
    root_dir: PathBuf,
}

/// Builds the module tree rooted at `root_dir`.
///
/// The root directory must contain a `Manifest.toml`. Every reachable
/// local dependency is resolved (and loaded, where it has a manifest of
/// its own) exactly once; a dependency that names a missing directory
/// aborts the walk with the offending path.
pub fn build_module_tree(root_dir: &Path) -> Result<ModuleTree, ManifestError> {
    let root_dir = normalize_path(root_dir);
    if !root_dir.join(MANIFEST_FILE).is_file() {
        return Err(ManifestError::Validation(format!(
            "no {MANIFEST_FILE} in {}",
            root_dir.display()
        )));
    }

    let mut tree = ModuleTree {
        graph: DiGraph::new(),
        nodes: HashMap::new(),
        resolved: HashMap::new(),
        children: HashMap::new(),
        root_dir: root_dir.clone(),
    };

    let mut pending = vec![root_dir];
    while let Some(dir) = pending.pop() {
        if tree.resolved.contains_key(&dir) {
            continue;
        }
        let node = tree.node_for(&dir);

        if dir.join(MANIFEST_FILE).is_file() {
            let manifest = load_manifest(&dir)?;
            let resolved = resolve_manifest(&dir, manifest)?;
            let mut child_dirs = Vec::new();
            for dep in resolved.local_modules.clone() {
                let dep_node = tree.node_for(&dep);
                tree.graph.add_edge(node, dep_node, ());
                child_dirs.push(dep.clone());
                pending.push(dep);
            }
            tree.children.insert(dir.clone(), child_dirs);
            tree.resolved.insert(dir, Some(resolved));
        } else {
            tree.children.insert(dir.clone(), Vec::new());
            tree.resolved.insert(dir, None);
        }
    }

    Ok(tree)
}

impl ModuleTree {
    /// The root module's resolved manifest.
    pub fn root(&self) -> &ResolvedManifest {
        self.resolved[&self.root_dir]
            .as_ref()
            .expect("root manifest is loaded during tree construction")
    }

    /// The normalized root module directory.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Number of module directories in the tree, the root included.
    pub fn module_count(&self) -> usize {
        self.resolved.len()
    }

    /// Local dependencies of a module directory, in declaration order.
    pub fn dependencies_of(&self, dir: &Path) -> &[PathBuf] {
        self.children.get(dir).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if the given module directory carries a manifest.
    pub fn has_manifest(&self, dir: &Path) -> bool {
        matches!(self.resolved.get(dir), Some(Some(_)))
    }

    /// Produces the gathered [`SourceSet`] in dependency-first order.
    ///
    /// Fails if the dependency graph contains a cycle, if an explicit
    /// `files` entry is missing on disk, or if one has an unrecognized
    /// extension.
    pub fn source_set(&self) -> Result<SourceSet, ManifestError> {
        let order = toposort(&self.graph, None).map_err(|_| self.cycle_error())?;

        let mut files = Vec::new();
        let mut seen_files = HashSet::new();
        let mut include_dirs = Vec::new();
        let mut seen_includes = HashSet::new();
        let mut remote = Vec::new();
        let mut module_dirs = Vec::new();

        // Toposort puts dependents before their dependencies (edges point
        // module -> dep), so compile order is the reverse.
        for node in order.iter().rev() {
            let dir = &self.graph[*node];
            module_dirs.push(dir.clone());

            let module_files = match &self.resolved[dir] {
                Some(resolved) => {
                    for inc in &resolved.include_dirs {
                        if seen_includes.insert(inc.clone()) {
                            include_dirs.push(inc.clone());
                        }
                    }
                    for url in &resolved.manifest.modules.git {
                        remote.push(RemoteModule {
                            kind: RemoteKind::Git,
                            url: url.clone(),
                        });
                    }
                    for url in &resolved.manifest.modules.svn {
                        remote.push(RemoteModule {
                            kind: RemoteKind::Svn,
                            url: url.clone(),
                        });
                    }
                    if resolved.manifest.files.is_empty() {
                        discover_source_files(dir)?
                    } else {
                        explicit_source_files(dir, &resolved.manifest.files)?
                    }
                }
                None => discover_source_files(dir)?,
            };

            for file in module_files {
                if seen_files.insert(file.path.clone()) {
                    files.push(file);
                }
            }
        }

        Ok(SourceSet {
            files,
            include_dirs,
            remote,
            module_dirs,
        })
    }

    /// Interns a directory as a graph node.
    fn node_for(&mut self, dir: &Path) -> NodeIndex {
        match self.nodes.get(dir) {
            Some(node) => *node,
            None => {
                let node = self.graph.add_node(dir.to_path_buf());
                self.nodes.insert(dir.to_path_buf(), node);
                node
            }
        }
    }

    /// Builds a [`ManifestError::DependencyCycle`] naming the directories
    /// on the first strongly connected component that forms a cycle.
    fn cycle_error(&self) -> ManifestError {
        for scc in tarjan_scc(&self.graph) {
            let is_cycle = scc.len() > 1
                || (scc.len() == 1 && self.graph.find_edge(scc[0], scc[0]).is_some());
            if is_cycle {
                let mut names: Vec<String> = scc
                    .iter()
                    .map(|n| self.graph[*n].display().to_string())
                    .collect();
                names.sort();
                let first = names[0].clone();
                names.push(first);
                return ManifestError::DependencyCycle(names.join(" -> "));
            }
        }
        ManifestError::DependencyCycle("unknown".to_string())
    }
}

/// Resolves a manifest's explicit `files` list against its directory.
fn explicit_source_files(dir: &Path, files: &[String]) -> Result<Vec<SourceFile>, ManifestError> {
    let mut out = Vec::new();
    for rel in files {
        let path = normalize_path(&dir.join(rel));
        if !path.is_file() {
            return Err(ManifestError::MissingSourceFile(path));
        }
        let language = detect_language(&path).ok_or_else(|| {
            ManifestError::Validation(format!(
                "unrecognized HDL file extension: {}",
                path.display()
            ))
        })?;
        out.push(SourceFile { path, language });
    }
    Ok(out)
}

/// Scans a module directory for HDL source files (recursive, sorted).
fn discover_source_files(dir: &Path) -> Result<Vec<SourceFile>, ManifestError> {
    let mut files = Vec::new();
    walk_dir(dir, &mut files)?;
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Recursively walks a directory collecting files with HDL extensions.
fn walk_dir(dir: &Path, files: &mut Vec<SourceFile>) -> Result<(), ManifestError> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk_dir(&path, files)?;
        } else if let Some(language) = detect_language(&path) {
            files.push(SourceFile {
                path: normalize_path(&path),
                language,
            });
        }
    }
    Ok(())
}
