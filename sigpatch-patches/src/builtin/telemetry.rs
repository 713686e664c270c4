use sigpatch_analysis::Fingerprint;
use sigpatch_analysis::field::by_string_proximity;
use sigpatch_analysis::role::plan_disable_edits;
use sigpatch_rewrite::SubstitutionPlan;

use super::{PROTON_VPN, apply, matched_class};
use crate::context::PatchContext;
use crate::error::{RunError, SkipReason};
use crate::patch::Patch;

fn crash_reporter() -> Fingerprint {
    Fingerprint::new("SentryIntegration", ["sentry_installation_id", "sentry_is_enabled"])
}

/// Neutralizes the crash reporter and makes every read of the telemetry
/// preference yield false.
pub struct DisableTelemetry;

impl Patch for DisableTelemetry {
    fn name(&self) -> &'static str {
        "Disable telemetry"
    }

    fn description(&self) -> &'static str {
        "Disables telemetry and crash reporting."
    }

    fn compatible_packages(&self) -> &'static [&'static str] {
        PROTON_VPN
    }

    fn execute(&self, ctx: &mut PatchContext<'_>) -> Result<(), RunError> {
        ctx.block("crash reporter", |program, _| {
            let (class_id, _) = matched_class(program, &crash_reporter())?;
            let edits = plan_disable_edits(program, class_id);
            apply(program, &edits)
        })?;

        ctx.block("telemetry flag", |program, config| {
            let marker = config.telemetry_marker.as_str();
            let settings = Fingerprint::new("LocalUserSettings", [marker]);
            let (_, class) = matched_class(program, &settings)?;
            let field = by_string_proximity(class, marker, config.lookahead_window).map_err(
                |reason| SkipReason::Unresolved {
                    what: "telemetry field",
                    reason,
                },
            )?;
            let plan = SubstitutionPlan::collect(program, &field);
            Ok(plan.apply(program)?)
        })
    }
}
