//! Field identification strategies.

mod common;

use common::*;
use sigpatch_analysis::Unresolved;
use sigpatch_analysis::field::{
    FieldTally, by_evidence_tally, by_string_proximity, by_unique_type, identify_tier_field,
};
use sigpatch_isa::{FieldRef, Label, Opcode, Reg, TypeDesc, insn};
use sigpatch_model::builder::ClassBuilder;

const OBF: &str = "Lo/a;";

fn int_field(name: &str) -> FieldRef {
    FieldRef::new(OBF, name, "I")
}

#[test]
fn unique_type_match() {
    assert_eq!(
        by_unique_type(&vpn_user(), &TypeDesc::boxed_integer()),
        Ok(max_tier())
    );
    assert_eq!(
        by_unique_type(&vpn_user(), &TypeDesc::new("J")),
        Err(Unresolved::NotFound)
    );
    let two = ClassBuilder::new(OBF)
        .field("a", TypeDesc::boxed_integer())
        .field("b", TypeDesc::boxed_integer())
        .build();
    assert_eq!(
        by_unique_type(&two, &TypeDesc::boxed_integer()),
        Err(Unresolved::Ambiguous(2))
    );
}

#[test]
fn tally_prefers_diagnostic_reader() {
    // Field A is read only by zero-score methods, B by one score-4 method.
    let class = ClassBuilder::new(OBF)
        .field("a", "I")
        .field("b", "I")
        .method(method(
            "plainA",
            "I",
            vec![insn::iget(Reg(0), Reg(1), int_field("a")), insn::ret(Reg(0))],
        ))
        .method(method(
            "plainA2",
            "I",
            vec![insn::iget(Reg(0), Reg(1), int_field("a")), insn::ret(Reg(0))],
        ))
        .method(method(
            "richB",
            "Z",
            vec![
                insn::iget(Reg(0), Reg(2), int_field("b")),
                insn::if_eqz(Reg(0), Label(5)),
                insn::const_int(Reg(1), 1),
                insn::const_int(Reg(1), 2),
                insn::const_int(Reg(1), 3),
                insn::ret(Reg(1)),
            ],
        ))
        .build();
    let tally = FieldTally::of_class(&class);
    assert_eq!(tally.get(&int_field("a")), 0);
    assert_eq!(tally.get(&int_field("b")), 4);
    assert_eq!(by_evidence_tally(&class), Ok(int_field("b")));
}

#[test]
fn tally_ignores_foreign_and_non_integer_fields() {
    let foreign = FieldRef::new("Lother;", "x", "I");
    let flag = FieldRef::new(OBF, "f", "Z");
    let class = ClassBuilder::new(OBF)
        .field("f", "Z")
        .method(method(
            "m",
            "Z",
            vec![
                insn::sget_as(Opcode::Sget, Reg(0), foreign),
                insn::iget_boolean(Reg(0), Reg(1), flag),
                insn::const_int(Reg(0), 3),
                insn::ret(Reg(0)),
            ],
        ))
        .build();
    assert!(FieldTally::of_class(&class).is_empty());
    assert_eq!(by_evidence_tally(&class), Err(Unresolved::NotFound));
}

#[test]
fn tally_tie_goes_to_first_read() {
    let early = FieldRef::new(OBF, "early", "S");
    let late = FieldRef::new(OBF, "late", "S");
    let class = ClassBuilder::new(OBF)
        .field("late", "S")
        .field("early", "S")
        .method(method(
            "m",
            "I",
            vec![
                insn::iget_as(Opcode::IgetShort, Reg(0), Reg(1), early.clone()),
                insn::iget_as(Opcode::IgetShort, Reg(0), Reg(1), late.clone()),
                insn::const_int(Reg(0), 1),
                insn::ret(Reg(0)),
            ],
        ))
        .build();
    let tally = FieldTally::of_class(&class);
    assert_eq!(tally.get(&late), 1);
    assert_eq!(by_evidence_tally(&class), Ok(early));
}

#[test]
fn tier_field_falls_back_to_tally() {
    assert_eq!(identify_tier_field(&vpn_user()), Ok(max_tier()));

    let boxed = |name: &str| FieldRef::new(OBF, name, TypeDesc::boxed_integer());
    let class = ClassBuilder::new(OBF)
        .field("a", TypeDesc::boxed_integer())
        .field("b", TypeDesc::boxed_integer())
        .method(tier_compare("x", boxed("b"), 3, true))
        .method(tier_compare("y", boxed("a"), 2, false))
        .build();
    // b scores 3 (1, 3, zero test); a scores 2 (1, 2).
    assert_eq!(identify_tier_field(&class), Ok(boxed("b")));
}

#[test]
fn proximity_finds_field_after_marker() {
    assert_eq!(
        by_string_proximity(&settings(), "Telemetry: ", 15),
        Ok(telemetry_field())
    );
}

#[test]
fn proximity_window_is_inclusive() {
    // The read sits two instructions after the marker.
    assert_eq!(
        by_string_proximity(&settings(), "Telemetry: ", 2),
        Ok(telemetry_field())
    );
    assert_eq!(
        by_string_proximity(&settings(), "Telemetry: ", 1),
        Err(Unresolved::NotFound)
    );
}

#[test]
fn proximity_missing_marker() {
    assert_eq!(
        by_string_proximity(&settings(), "Analytics: ", 15),
        Err(Unresolved::NotFound)
    );
}

#[test]
fn proximity_keeps_scanning_after_a_miss() {
    let flag = FieldRef::new(OBF, "flag", "Z");
    let mut far = vec![insn::const_string(Reg(0), "Telemetry: ")];
    far.extend((0..20).map(|_| insn::nop()));
    far.extend([
        insn::iget_boolean(Reg(1), Reg(2), FieldRef::new(OBF, "late", "Z")),
        insn::return_void(),
    ]);
    let class = ClassBuilder::new(OBF)
        .method(method("far", "V", far))
        .method(method(
            "near",
            "V",
            vec![
                insn::const_string(Reg(0), "Telemetry: "),
                insn::sget_boolean(Reg(1), flag.clone()),
                insn::return_void(),
            ],
        ))
        .build();
    assert_eq!(by_string_proximity(&class, "Telemetry: ", 15), Ok(flag));
}

#[test]
fn proximity_ignores_non_boolean_reads() {
    let class = ClassBuilder::new(OBF)
        .method(method(
            "m",
            "V",
            vec![
                insn::const_string(Reg(0), "Telemetry: "),
                insn::iget(Reg(1), Reg(2), int_field("count")),
                insn::return_void(),
            ],
        ))
        .build();
    assert_eq!(
        by_string_proximity(&class, "Telemetry: ", 15),
        Err(Unresolved::NotFound)
    );
}
