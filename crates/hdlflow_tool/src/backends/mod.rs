//! Simulator backends.
//!
//! Each backend turns a [`SimRequest`](crate::flow::SimRequest) into the
//! ordered compile/run invocations its simulator expects. Backends never
//! spawn anything themselves.

mod ghdl;
mod icarus;
mod modelsim;

pub use ghdl::Ghdl;
pub use icarus::Icarus;
pub use modelsim::Modelsim;

use crate::error::ToolError;
use crate::flow::SimRequest;
use crate::invocation::Invocation;

/// Tool names accepted by [`resolve_tool`], canonical form.
pub const SUPPORTED_TOOLS: &[&str] = &["modelsim", "ghdl", "icarus"];

/// A simulator backend that can plan a compile-and-run flow.
pub trait ToolBackend: std::fmt::Debug {
    /// Canonical name of the backend.
    fn name(&self) -> &'static str;

    /// Plans the compile and run steps for a request, in execution order.
    fn plan(&self, request: &SimRequest) -> Result<Vec<Invocation>, ToolError>;
}

/// Resolves a manifest's `sim_tool` value to a backend.
///
/// Accepts the canonical names plus the common aliases `vsim` (ModelSim's
/// own binary) and `iverilog`. An unrecognized name is rejected here,
/// before any process is spawned.
pub fn resolve_tool(name: &str) -> Result<Box<dyn ToolBackend>, ToolError> {
    match name {
        "modelsim" | "vsim" => Ok(Box::new(Modelsim)),
        "ghdl" => Ok(Box::new(Ghdl)),
        "icarus" | "iverilog" => Ok(Box::new(Icarus)),
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}
