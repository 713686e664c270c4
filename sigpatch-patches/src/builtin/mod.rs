//! Patches shipped with sigpatch.

mod premium;
mod telemetry;

pub use premium::UnlockPremium;
pub use telemetry::DisableTelemetry;

use sigpatch_analysis::{Fingerprint, PlannedEdit};
use sigpatch_model::{Class, ClassId, Program};
use sigpatch_rewrite::{Edit, force_return};

use crate::error::{BlockError, SkipReason};
use crate::patch::Patch;

/// Package identifiers of the application the built-ins target.
pub const PROTON_VPN: &[&str] = &["ch.protonvpn.android"];

/// Every built-in patch, in execution order.
pub fn all() -> Vec<Box<dyn Patch>> {
    vec![Box::new(UnlockPremium), Box::new(DisableTelemetry)]
}

/// The class defining the first method matched by `fingerprint`.
fn matched_class<'p>(
    program: &'p Program,
    fingerprint: &Fingerprint,
) -> Result<(ClassId, &'p Class), SkipReason> {
    fingerprint
        .find(program)
        .and_then(|m| Some((m.class, program.class(m.class)?)))
        .ok_or_else(|| SkipReason::NoMatch(fingerprint.name().to_string()))
}

/// Apply planned force-returns, counting the bodies actually changed.
fn apply(program: &mut Program, edits: &[PlannedEdit]) -> Result<usize, BlockError> {
    let mut changed = 0;
    for edit in edits {
        if force_return(program, edit.method, edit.value)? == Edit::Rewritten {
            changed += 1;
        }
    }
    Ok(changed)
}
