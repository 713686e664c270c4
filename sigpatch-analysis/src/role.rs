//! Method roles and the edits they call for.

use std::fmt;

use sigpatch_model::{ClassId, FieldRef, MethodId, Program, ReturnKind, ReturnValue};

use crate::evidence::Evidence;

/// The inferred purpose of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Boolean check for the maximal tier (compares against 3).
    TeamExclusive,
    /// Boolean check for inclusion in the elevated tier (compares against 2).
    ElevatedInclusion,
    /// Boolean check for the free tier (tests against zero).
    FreeTier,
    /// Boolean check for inclusion in the mid tier (compares against 1).
    MidInclusion,
    /// Integer accessor for the tier itself.
    TierAccessor,
    /// Integer accessor returning a server-change delay.
    ServerDelay,
    /// Boolean switch of a component being disabled.
    Switch,
    /// Void method of a component being disabled.
    Action,
}

impl Role {
    /// The value a method with this role is forced to return.
    pub fn forced_value(self, elevated_tier: i32) -> ReturnValue {
        match self {
            Role::TeamExclusive | Role::FreeTier | Role::Switch => ReturnValue::Boolean(false),
            Role::ElevatedInclusion | Role::MidInclusion => ReturnValue::Boolean(true),
            Role::TierAccessor => ReturnValue::Integer(elevated_tier),
            Role::ServerDelay => ReturnValue::Integer(0),
            Role::Action => ReturnValue::Void,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::TeamExclusive => "team-exclusive check",
            Role::ElevatedInclusion => "elevated-tier check",
            Role::FreeTier => "free-tier check",
            Role::MidInclusion => "mid-tier check",
            Role::TierAccessor => "tier accessor",
            Role::ServerDelay => "server delay",
            Role::Switch => "switch",
            Role::Action => "action",
        })
    }
}

/// Classify a boolean tier check by its strongest signal.
///
/// Literal 3 dominates literal 2, which dominates a zero test, which
/// dominates literal 1.
pub fn classify_boolean(evidence: Evidence) -> Option<Role> {
    if evidence.contains(Evidence::LITERAL_3) {
        Some(Role::TeamExclusive)
    } else if evidence.contains(Evidence::LITERAL_2) {
        Some(Role::ElevatedInclusion)
    } else if evidence.contains(Evidence::ZERO_TEST) {
        Some(Role::FreeTier)
    } else if evidence.contains(Evidence::LITERAL_1) {
        Some(Role::MidInclusion)
    } else {
        None
    }
}

/// A force-return decided by the classifier, not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedEdit {
    pub method: MethodId,
    pub role: Role,
    pub value: ReturnValue,
}

impl PlannedEdit {
    fn new(method: MethodId, role: Role, elevated_tier: i32) -> Self {
        Self {
            method,
            role,
            value: role.forced_value(elevated_tier),
        }
    }
}

/// Plan edits for every method of `class` that reads the tier `field`.
///
/// Boolean readers are classified by their evidence; only `int` readers
/// become tier accessors, narrower integral returns are left alone.
pub fn plan_tier_edits(
    program: &Program,
    class: ClassId,
    field: &FieldRef,
    elevated_tier: i32,
) -> Vec<PlannedEdit> {
    let mut plan = Vec::new();
    for (id, method) in program.class_methods(class) {
        if !method.reads_field(field) {
            continue;
        }
        let role = match method.return_kind() {
            ReturnKind::Boolean => classify_boolean(Evidence::collect(method.instructions())),
            ReturnKind::Integer if method.ret.is_int() => Some(Role::TierAccessor),
            _ => None,
        };
        match role {
            Some(role) => {
                log::debug!("{} reads {field}: {role}", method.name);
                plan.push(PlannedEdit::new(id, role, elevated_tier));
            }
            None => log::debug!("{} reads {field} but shows no role", method.name),
        }
    }
    plan
}

/// Plan a zero return for every `int` method of `class` that loads one
/// of the delay `literals`.
pub fn plan_delay_edits(program: &Program, class: ClassId, literals: &[i64]) -> Vec<PlannedEdit> {
    program
        .class_methods(class)
        .filter(|(_, m)| m.ret.is_int())
        .filter(|(_, m)| {
            m.instructions()
                .iter()
                .any(|i| i.literal().is_some_and(|v| literals.contains(&v)))
        })
        .map(|(id, m)| {
            log::debug!("{} loads a delay literal", m.name);
            PlannedEdit::new(id, Role::ServerDelay, 0)
        })
        .collect()
}

/// Plan edits disabling a component: boolean methods return false and void
/// methods return at once. Constructors and bodyless methods are left alone.
pub fn plan_disable_edits(program: &Program, class: ClassId) -> Vec<PlannedEdit> {
    program
        .class_methods(class)
        .filter(|(_, m)| m.body.is_some() && !m.is_abstract_or_native() && !m.is_constructor())
        .filter_map(|(id, m)| match m.return_kind() {
            ReturnKind::Boolean => Some(PlannedEdit::new(id, Role::Switch, 0)),
            ReturnKind::Void => Some(PlannedEdit::new(id, Role::Action, 0)),
            _ => None,
        })
        .collect()
}
