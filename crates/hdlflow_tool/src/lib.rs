//! Simulator tool backends for manifest-driven flows.
//!
//! This crate maps a manifest's `sim_tool` name to a backend, plans the
//! external process invocations that compile the gathered sources and run
//! the named top module, and wraps the manifest's pre/post shell commands
//! around them. Planning is pure data ([`Invocation`] values); nothing is
//! spawned until [`Invocation::run`] is called.

#![warn(missing_docs)]

pub mod backends;
pub mod error;
pub mod flow;
pub mod invocation;

pub use backends::{resolve_tool, ToolBackend, SUPPORTED_TOOLS};
pub use error::ToolError;
pub use flow::{plan_flow, SimRequest};
pub use invocation::Invocation;
