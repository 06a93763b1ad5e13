//! Loading, validation, and resolution of `Manifest.toml` module manifests.
//!
//! A manifest is a flat, immutable record declaring what an orchestrator
//! needs to drive one simulation run: the action to perform, the simulator
//! backend, the top-level entry module, optional pre/post shell commands,
//! and the dependency modules whose sources must be gathered first. This
//! crate reads the record into a strongly-typed [`Manifest`], resolves its
//! declared paths against the manifest's own directory, and walks the local
//! dependency tree into a compile-ordered [`SourceSet`].

#![warn(missing_docs)]

pub mod error;
pub mod gather;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ManifestError;
pub use gather::{build_module_tree, ModuleTree, RemoteKind, RemoteModule, SourceFile, SourceSet};
pub use loader::{load_manifest, load_manifest_from_str, MANIFEST_FILE};
pub use resolve::{expand_top, normalize_path, resolve_manifest, ResolvedManifest};
pub use types::{detect_language, Action, HdlLanguage, Manifest, ModuleSet};
