//! GHDL backend: analyze then elab-run. VHDL only.

use crate::backends::ToolBackend;
use crate::error::ToolError;
use crate::flow::SimRequest;
use crate::invocation::Invocation;

/// The GHDL open-source VHDL simulator.
#[derive(Debug)]
pub struct Ghdl;

impl ToolBackend for Ghdl {
    fn name(&self) -> &'static str {
        "ghdl"
    }

    fn plan(&self, request: &SimRequest) -> Result<Vec<Invocation>, ToolError> {
        if let Some(bad) = request.files.iter().find(|f| f.language.is_verilog_family()) {
            return Err(ToolError::UnsupportedSource {
                tool: self.name(),
                path: bad.path.clone(),
            });
        }

        let workdir = format!("--workdir={}", request.out_dir.display());

        let mut analyze = Invocation::new("ghdl", &request.work_dir)
            .arg("-a")
            .arg("--std=08")
            .arg(&workdir);
        for file in &request.files {
            analyze = analyze.arg(file.path.display().to_string());
        }

        let run = Invocation::new("ghdl", &request.work_dir)
            .arg("--elab-run")
            .arg("--std=08")
            .arg(&workdir)
            .arg(&request.top);

        Ok(vec![analyze, run])
    }
}
