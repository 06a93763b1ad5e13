//! Error types for tool resolution and flow execution.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors that can occur when resolving a simulator backend or running
/// a planned flow.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The manifest names a simulator this tool does not support.
    #[error("unknown simulation tool '{0}' (supported: modelsim, ghdl, icarus)")]
    UnknownTool(String),

    /// A gathered source file is in a language the backend cannot compile.
    #[error("{} cannot compile {}", .tool, .path.display())]
    UnsupportedSource {
        /// The backend that rejected the file.
        tool: &'static str,
        /// The offending source file.
        path: PathBuf,
    },

    /// The external program could not be spawned.
    #[error("failed to run {program}: {source}")]
    Io {
        /// The program that failed to start.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A flow step ran but exited with a nonzero status.
    #[error("step failed ({status}): {command}")]
    StepFailed {
        /// The rendered command line of the failing step.
        command: String,
        /// The exit status the step returned.
        status: ExitStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_tool_lists_supported() {
        let err = ToolError::UnknownTool("verilator".to_string());
        let display = format!("{err}");
        assert!(display.contains("verilator"));
        assert!(display.contains("modelsim"));
        assert!(display.contains("ghdl"));
        assert!(display.contains("icarus"));
    }

    #[test]
    fn display_unsupported_source() {
        let err = ToolError::UnsupportedSource {
            tool: "ghdl",
            path: PathBuf::from("rtl/top.sv"),
        };
        assert_eq!(format!("{err}"), "ghdl cannot compile rtl/top.sv");
    }
}
