//! Manifest types deserialized from `Manifest.toml`.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A per-directory manifest describing one module.
///
/// The manifest is a flat record consumed once per invocation: it names the
/// operation to perform, the simulator backend to use, the top-level entry
/// module, optional pre/post shell commands, the module's own source files,
/// and the dependency modules to gather before compiling. All fields are
/// immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// The operation this manifest requests from the orchestrator.
    pub action: Action,

    /// Name of the simulator backend (e.g., "modelsim", "ghdl", "icarus").
    ///
    /// Kept as a free-form string; the tool layer resolves it against the
    /// backend registry before any process is spawned.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sim_tool: String,

    /// Name of the top-level entry module for the simulation run.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sim_top: String,

    /// Shell command run before compilation starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sim_pre_cmd: Option<String>,

    /// Shell command run after the simulation completes, typically to open
    /// a waveform viewer. `$TOP` and `${TOP}` expand to [`sim_top`].
    ///
    /// [`sim_top`]: Manifest::sim_top
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sim_post_cmd: Option<String>,

    /// Logical library the module's sources compile into.
    #[serde(default = "default_library")]
    pub library: String,

    /// HDL source files of this module, relative to the manifest directory,
    /// in compile order. When empty, the directory is scanned for files
    /// with recognized HDL extensions instead.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,

    /// Include search directories, relative to the manifest directory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_dirs: Vec<String>,

    /// Dependency modules, grouped by category.
    #[serde(default, skip_serializing_if = "ModuleSet::is_empty")]
    pub modules: ModuleSet,
}

impl Manifest {
    /// Returns `true` if this manifest requests a simulation run.
    pub fn is_simulation(&self) -> bool {
        self.action == Action::Simulation
    }
}

/// The default logical library name.
fn default_library() -> String {
    "work".to_string()
}

/// The orchestrator operation a manifest requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Compile the gathered sources and run the named testbench.
    Simulation,
    /// Synthesize the design. Accepted and validated, but no synthesis
    /// flow is driven by this tool.
    Synthesis,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Simulation => write!(f, "simulation"),
            Action::Synthesis => write!(f, "synthesis"),
        }
    }
}

/// Dependency modules declared by a manifest, grouped by category.
///
/// `local` entries are filesystem paths resolved relative to the manifest's
/// own directory. `git` and `svn` entries are remote URLs; they are carried
/// through gathering so callers can report them, but nothing fetches them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleSet {
    /// Relative paths to local dependency modules, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub local: Vec<String>,

    /// Git repository URLs of remote dependency modules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub git: Vec<String>,

    /// Subversion URLs of remote dependency modules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub svn: Vec<String>,
}

impl ModuleSet {
    /// Returns `true` if no dependencies are declared in any category.
    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.git.is_empty() && self.svn.is_empty()
    }
}

/// HDL language detected from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HdlLanguage {
    /// Verilog-2005 (`.v`).
    Verilog,
    /// SystemVerilog-2017 (`.sv`).
    SystemVerilog,
    /// VHDL-2008 (`.vhd`, `.vhdl`).
    Vhdl,
}

impl HdlLanguage {
    /// Returns `true` for the Verilog family (Verilog or SystemVerilog).
    pub fn is_verilog_family(&self) -> bool {
        matches!(self, HdlLanguage::Verilog | HdlLanguage::SystemVerilog)
    }
}

/// Detects the HDL language from a file's extension.
///
/// Returns `None` for unrecognized extensions.
pub fn detect_language(path: &Path) -> Option<HdlLanguage> {
    match path.extension()?.to_str()? {
        "v" => Some(HdlLanguage::Verilog),
        "sv" => Some(HdlLanguage::SystemVerilog),
        "vhd" | "vhdl" => Some(HdlLanguage::Vhdl),
        _ => None,
    }
}
