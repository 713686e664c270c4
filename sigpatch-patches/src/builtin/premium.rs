use sigpatch_analysis::Fingerprint;
use sigpatch_analysis::field::identify_tier_field;
use sigpatch_analysis::role::{plan_delay_edits, plan_tier_edits};

use super::{PROTON_VPN, apply, matched_class};
use crate::context::PatchContext;
use crate::error::{RunError, SkipReason};
use crate::patch::Patch;

fn vpn_user() -> Fingerprint {
    Fingerprint::new("VpnUser", ["Proton VPN Account", "Proton Mail Account"])
}

fn app_config_response() -> Fingerprint {
    Fingerprint::new(
        "AppConfigResponse",
        ["ChangeServerShortDelayInSeconds", "ChangeServerLongDelayInSeconds"],
    )
}

/// Forces the subscription tier checks to report the elevated tier and
/// zeroes the server change delays.
pub struct UnlockPremium;

impl Patch for UnlockPremium {
    fn name(&self) -> &'static str {
        "Unlock Premium"
    }

    fn description(&self) -> &'static str {
        "Unlocks premium features and removes server delays."
    }

    fn compatible_packages(&self) -> &'static [&'static str] {
        PROTON_VPN
    }

    fn execute(&self, ctx: &mut PatchContext<'_>) -> Result<(), RunError> {
        ctx.block("subscription tier", |program, config| {
            let (class_id, class) = matched_class(program, &vpn_user())?;
            let field = identify_tier_field(class).map_err(|reason| SkipReason::Unresolved {
                what: "tier field",
                reason,
            })?;
            let edits = plan_tier_edits(program, class_id, &field, config.elevated_tier);
            apply(program, &edits)
        })?;

        ctx.block("server change delay", |program, config| {
            let (class_id, _) = matched_class(program, &app_config_response())?;
            let edits = plan_delay_edits(program, class_id, &config.delay_literals);
            apply(program, &edits)
        })
    }
}
