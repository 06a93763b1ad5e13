//! ModelSim backend: `vlib` / `vlog` / `vcom` / `vsim`.

use crate::backends::ToolBackend;
use crate::error::ToolError;
use crate::flow::SimRequest;
use crate::invocation::Invocation;
use hdlflow_manifest::HdlLanguage;

/// ModelSim (and compatible `vsim`-based simulators).
#[derive(Debug)]
pub struct Modelsim;

impl ToolBackend for Modelsim {
    fn name(&self) -> &'static str {
        "modelsim"
    }

    fn plan(&self, request: &SimRequest) -> Result<Vec<Invocation>, ToolError> {
        let mut steps = vec![Invocation::new("vlib", &request.work_dir).arg(&request.library)];

        let verilog: Vec<_> = request
            .files
            .iter()
            .filter(|f| f.language.is_verilog_family())
            .collect();
        let vhdl: Vec<_> = request
            .files
            .iter()
            .filter(|f| f.language == HdlLanguage::Vhdl)
            .collect();

        if !verilog.is_empty() {
            let mut vlog = Invocation::new("vlog", &request.work_dir)
                .arg("-work")
                .arg(&request.library);
            if verilog
                .iter()
                .any(|f| f.language == HdlLanguage::SystemVerilog)
            {
                vlog = vlog.arg("-sv");
            }
            for dir in &request.include_dirs {
                vlog = vlog.arg(format!("+incdir+{}", dir.display()));
            }
            for file in &verilog {
                vlog = vlog.arg(file.path.display().to_string());
            }
            steps.push(vlog);
        }

        if !vhdl.is_empty() {
            let mut vcom = Invocation::new("vcom", &request.work_dir)
                .arg("-2008")
                .arg("-work")
                .arg(&request.library);
            for file in &vhdl {
                vcom = vcom.arg(file.path.display().to_string());
            }
            steps.push(vcom);
        }

        steps.push(
            Invocation::new("vsim", &request.work_dir)
                .args(["-c", "-lib"])
                .arg(&request.library)
                .arg(&request.top)
                .arg("-do")
                .arg("run -all; quit -f"),
        );

        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdlflow_manifest::SourceFile;
    use std::path::PathBuf;

    fn request(files: Vec<SourceFile>) -> SimRequest {
        SimRequest {
            top: "stream_upsize_tb".to_string(),
            library: "work".to_string(),
            files,
            include_dirs: vec![PathBuf::from("include")],
            work_dir: PathBuf::from("."),
            out_dir: PathBuf::from("out"),
            pre_cmd: None,
            post_cmd: None,
        }
    }

    fn sv(path: &str) -> SourceFile {
        SourceFile {
            path: PathBuf::from(path),
            language: HdlLanguage::SystemVerilog,
        }
    }

    fn vhd(path: &str) -> SourceFile {
        SourceFile {
            path: PathBuf::from(path),
            language: HdlLanguage::Vhdl,
        }
    }

    #[test]
    fn plan_creates_library_first() {
        let steps = Modelsim.plan(&request(vec![sv("tb.sv")])).unwrap();
        assert_eq!(steps[0].command_line(), "vlib work");
    }

    #[test]
    fn plan_compiles_sv_with_incdirs() {
        let steps = Modelsim.plan(&request(vec![sv("tb.sv")])).unwrap();
        assert_eq!(
            steps[1].command_line(),
            "vlog -work work -sv +incdir+include tb.sv"
        );
    }

    #[test]
    fn plan_compiles_vhdl_with_vcom() {
        let steps = Modelsim.plan(&request(vec![vhd("adder.vhd")])).unwrap();
        assert_eq!(steps[1].command_line(), "vcom -2008 -work work adder.vhd");
    }

    #[test]
    fn plan_mixed_languages_compiles_both() {
        let steps = Modelsim
            .plan(&request(vec![sv("tb.sv"), vhd("adder.vhd")]))
            .unwrap();
        assert_eq!(steps.len(), 4);
        assert!(steps[1].command_line().starts_with("vlog"));
        assert!(steps[2].command_line().starts_with("vcom"));
    }

    #[test]
    fn plan_run_step_names_top_and_runs_all() {
        let steps = Modelsim.plan(&request(vec![sv("tb.sv")])).unwrap();
        let run = steps.last().unwrap();
        assert_eq!(
            run.command_line(),
            "vsim -c -lib work stream_upsize_tb -do 'run -all; quit -f'"
        );
    }

    #[test]
    fn plan_plain_verilog_omits_sv_flag() {
        let files = vec![SourceFile {
            path: PathBuf::from("top.v"),
            language: HdlLanguage::Verilog,
        }];
        let steps = Modelsim.plan(&request(files)).unwrap();
        assert!(!steps[1].args.contains(&"-sv".to_string()));
    }
}
