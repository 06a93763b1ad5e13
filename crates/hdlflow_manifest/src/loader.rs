//! Manifest file loading and validation.

use crate::error::ManifestError;
use crate::types::{Action, Manifest};
use std::path::Path;

/// Name of the manifest file within a module directory.
pub const MANIFEST_FILE: &str = "Manifest.toml";

/// Loads and validates a `Manifest.toml` from a module directory.
///
/// Reads `<dir>/Manifest.toml`, parses it, and validates required fields.
pub fn load_manifest(dir: &Path) -> Result<Manifest, ManifestError> {
    let manifest_path = dir.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&manifest_path)?;
    load_manifest_from_str(&content)
}

/// Parses and validates a manifest from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_manifest_from_str(content: &str) -> Result<Manifest, ManifestError> {
    let manifest: Manifest =
        toml::from_str(content).map_err(|e| ManifestError::Parse(e.to_string()))?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

/// Validates that required fields are present for the requested action.
///
/// A simulation manifest must name a simulator and a top module. The
/// library name must never be empty since backends pass it verbatim.
fn validate_manifest(manifest: &Manifest) -> Result<(), ManifestError> {
    if manifest.action == Action::Simulation {
        if manifest.sim_tool.is_empty() {
            return Err(ManifestError::MissingField("sim_tool".to_string()));
        }
        if manifest.sim_top.is_empty() {
            return Err(ManifestError::MissingField("sim_top".to_string()));
        }
    }
    if manifest.library.is_empty() {
        return Err(ManifestError::Validation(
            "library must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parse_minimal_manifest() {
        let toml = r#"
action = "simulation"
sim_tool = "modelsim"
sim_top = "stream_upsize_tb"
"#;
        let manifest = load_manifest_from_str(toml).unwrap();
        assert_eq!(manifest.action, Action::Simulation);
        assert_eq!(manifest.sim_tool, "modelsim");
        assert_eq!(manifest.sim_top, "stream_upsize_tb");
        assert!(manifest.sim_post_cmd.is_none());
        assert!(manifest.modules.is_empty());
    }

    #[test]
    fn parse_full_manifest() {
        let toml = r#"
action = "simulation"
sim_tool = "modelsim"
sim_top = "stream_upsize_tb"
sim_pre_cmd = "echo starting"
sim_post_cmd = "vsim -voptargs=+acc -do wave.do -i stream_upsize_tb"
library = "stream_lib"
files = ["stream_upsize.sv"]
include_dirs = ["include"]

[modules]
local = ["../../../tb/stream_upsize_tb"]
git = ["https://example.com/axi_lib.git"]
"#;
        let manifest = load_manifest_from_str(toml).unwrap();
        assert_eq!(manifest.sim_tool, "modelsim");
        assert_eq!(manifest.sim_top, "stream_upsize_tb");
        assert_eq!(manifest.sim_pre_cmd.as_deref(), Some("echo starting"));
        assert_eq!(
            manifest.sim_post_cmd.as_deref(),
            Some("vsim -voptargs=+acc -do wave.do -i stream_upsize_tb")
        );
        assert_eq!(manifest.library, "stream_lib");
        assert_eq!(manifest.files, vec!["stream_upsize.sv"]);
        assert_eq!(manifest.include_dirs, vec!["include"]);
        assert_eq!(manifest.modules.local, vec!["../../../tb/stream_upsize_tb"]);
        assert_eq!(manifest.modules.git, vec!["https://example.com/axi_lib.git"]);
    }

    #[test]
    fn missing_sim_tool_errors() {
        let toml = r#"
action = "simulation"
sim_top = "stream_upsize_tb"
"#;
        let err = load_manifest_from_str(toml).unwrap_err();
        match err {
            ManifestError::MissingField(field) => assert_eq!(field, "sim_tool"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn missing_sim_top_errors() {
        let toml = r#"
action = "simulation"
sim_tool = "modelsim"
"#;
        let err = load_manifest_from_str(toml).unwrap_err();
        match err {
            ManifestError::MissingField(field) => assert_eq!(field, "sim_top"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn missing_action_errors() {
        let toml = r#"
sim_tool = "modelsim"
sim_top = "stream_upsize_tb"
"#;
        let err = load_manifest_from_str(toml).unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
    }

    #[test]
    fn synthesis_manifest_needs_no_sim_fields() {
        let toml = r#"
action = "synthesis"
"#;
        let manifest = load_manifest_from_str(toml).unwrap();
        assert_eq!(manifest.action, Action::Synthesis);
        assert!(!manifest.is_simulation());
    }

    #[test]
    fn empty_library_errors() {
        let toml = r#"
action = "simulation"
sim_tool = "modelsim"
sim_top = "tb"
library = ""
"#;
        let err = load_manifest_from_str(toml).unwrap_err();
        assert!(matches!(err, ManifestError::Validation(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let toml = "this is not valid toml {{{}}}";
        let err = load_manifest_from_str(toml).unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
    }

    #[test]
    fn load_from_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(MANIFEST_FILE),
            "action = \"simulation\"\nsim_tool = \"ghdl\"\nsim_top = \"tb\"\n",
        )
        .unwrap();
        let manifest = load_manifest(tmp.path()).unwrap();
        assert_eq!(manifest.sim_tool, "ghdl");
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_manifest(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ManifestError::Io(_)));
    }
}
