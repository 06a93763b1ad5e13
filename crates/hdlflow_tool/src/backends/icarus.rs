//! Icarus Verilog backend: `iverilog` then `vvp`. Verilog family only.

use crate::backends::ToolBackend;
use crate::error::ToolError;
use crate::flow::SimRequest;
use crate::invocation::Invocation;
use hdlflow_manifest::HdlLanguage;

/// The Icarus Verilog open-source simulator.
#[derive(Debug)]
pub struct Icarus;

impl ToolBackend for Icarus {
    fn name(&self) -> &'static str {
        "icarus"
    }

    fn plan(&self, request: &SimRequest) -> Result<Vec<Invocation>, ToolError> {
        if let Some(bad) = request
            .files
            .iter()
            .find(|f| f.language == HdlLanguage::Vhdl)
        {
            return Err(ToolError::UnsupportedSource {
                tool: self.name(),
                path: bad.path.clone(),
            });
        }

        let image = request.out_dir.join(format!("{}.vvp", request.top));

        let mut compile = Invocation::new("iverilog", &request.work_dir)
            .arg("-g2012")
            .arg("-o")
            .arg(image.display().to_string())
            .arg("-s")
            .arg(&request.top);
        for dir in &request.include_dirs {
            compile = compile.arg("-I").arg(dir.display().to_string());
        }
        for file in &request.files {
            compile = compile.arg(file.path.display().to_string());
        }

        let run = Invocation::new("vvp", &request.work_dir).arg(image.display().to_string());

        Ok(vec![compile, run])
    }
}
