use sigpatch_model::Program;

use crate::config::PatchConfig;
use crate::context::PatchContext;
use crate::error::RunError;
use crate::patch::Patch;
use crate::report::{PatchReport, PatchStatus, RunReport};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Run patches even when the program's package is not listed as
    /// compatible.
    pub ignore_compatibility: bool,
}

/// Run `patches` in order over `program`.
///
/// Edits committed before a fatal error stay in `program`.
pub fn run(
    program: &mut Program,
    patches: &[Box<dyn Patch>],
    config: &PatchConfig,
    options: RunOptions,
) -> Result<RunReport, RunError> {
    let mut report = RunReport::default();
    for patch in patches {
        if !gate(patch.as_ref(), program, options) {
            report.patches.push(PatchReport {
                name: patch.name().to_string(),
                status: PatchStatus::Incompatible,
                blocks: Vec::new(),
            });
            continue;
        }
        log::debug!("running {}", patch.name());
        let mut ctx = PatchContext::new(patch.name(), program, config);
        patch.execute(&mut ctx)?;
        report.patches.push(PatchReport {
            name: patch.name().to_string(),
            status: PatchStatus::Executed,
            blocks: ctx.into_blocks(),
        });
    }
    Ok(report)
}

fn gate(patch: &dyn Patch, program: &Program, options: RunOptions) -> bool {
    let Some(package) = program.package() else {
        log::warn!("package unknown, running {} unchecked", patch.name());
        return true;
    };
    if patch.is_compatible_with(package) {
        return true;
    }
    if options.ignore_compatibility {
        log::warn!("{} does not target {package}, running anyway", patch.name());
        true
    } else {
        log::warn!("{} does not target {package}, not run", patch.name());
        false
    }
}

/// Keep the patches named in `names`, in their original order. An empty
/// selection keeps everything.
pub fn select(
    patches: Vec<Box<dyn Patch>>,
    names: &[String],
) -> Result<Vec<Box<dyn Patch>>, RunError> {
    if let Some(unknown) = names
        .iter()
        .find(|n| !patches.iter().any(|p| p.name().eq_ignore_ascii_case(n)))
    {
        return Err(RunError::UnknownPatch(unknown.clone()));
    }
    if names.is_empty() {
        return Ok(patches);
    }
    Ok(patches
        .into_iter()
        .filter(|p| names.iter().any(|n| p.name().eq_ignore_ascii_case(n)))
        .collect())
}
