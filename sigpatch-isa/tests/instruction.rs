//! Instruction construction, validation and listing.

use sigpatch_isa::*;

fn flag() -> FieldRef {
    FieldRef::new("Lcom/example/Settings;", "a", "Z")
}

#[test]
fn const_int_picks_narrowest_form() {
    assert_eq!(insn::const_int(Reg(0), 1).opcode(), Opcode::Const4);
    assert_eq!(insn::const_int(Reg(15), -8).opcode(), Opcode::Const4);
    assert_eq!(insn::const_int(Reg(0), 8).opcode(), Opcode::Const16);
    assert_eq!(insn::const_int(Reg(16), 0).opcode(), Opcode::Const16);
    assert_eq!(insn::const_int(Reg(0), 1200).opcode(), Opcode::Const16);
    assert_eq!(insn::const_int(Reg(0), 70_000).opcode(), Opcode::Const);
}

#[test]
fn const_zero_is_valid_for_any_field_read_destination() {
    for r in [0u16, 7, 15, 16, 200, 255] {
        let z = insn::const_zero(Reg(r));
        assert_eq!(z.literal(), Some(0));
        assert_eq!(z.dest(), Some(Reg(r)));
        z.validate().unwrap();
    }
}

#[test]
fn new_rejects_wrong_register_count() {
    let err = Instruction::new(Opcode::Return, vec![], Payload::None).unwrap_err();
    assert!(matches!(err, InstructionError::RegisterCount { actual: 0, .. }));
}

#[test]
fn new_rejects_wide_register() {
    let err = Instruction::new(
        Opcode::IgetBoolean,
        vec![Reg(16), Reg(0)],
        Payload::Field(flag()),
    )
    .unwrap_err();
    assert_eq!(
        err,
        InstructionError::RegisterWidth {
            opcode: Opcode::IgetBoolean,
            reg: Reg(16),
            bits: 4
        }
    );
}

#[test]
fn new_rejects_payload_kind() {
    let err = Instruction::new(Opcode::ConstString, vec![Reg(0)], Payload::Literal(3)).unwrap_err();
    assert!(matches!(err, InstructionError::PayloadKind { .. }));
    assert!(err.to_string().contains("string"));
}

#[test]
fn new_rejects_literal_out_of_range() {
    let err = Instruction::new(Opcode::Const4, vec![Reg(0)], Payload::Literal(8)).unwrap_err();
    assert_eq!(
        err,
        InstructionError::LiteralRange {
            opcode: Opcode::Const4,
            value: 8,
            bits: 4
        }
    );
    Instruction::new(Opcode::Const4, vec![Reg(0)], Payload::Literal(-8)).unwrap();
}

#[test]
fn invoke_accepts_up_to_five_registers() {
    let m = MethodRef::new("La;", "f", vec![], "V");
    insn::invoke_static(vec![], m.clone()).validate().unwrap();
    insn::invoke_static((0..5).map(Reg).collect(), m.clone())
        .validate()
        .unwrap();
    assert!(
        insn::invoke_static((0..6).map(Reg).collect(), m)
            .validate()
            .is_err()
    );
}

#[test]
fn accessors() {
    let read = insn::iget_boolean(Reg(1), Reg(2), flag());
    assert_eq!(read.dest(), Some(Reg(1)));
    assert_eq!(read.field_read(), Some(&flag()));
    assert_eq!(read.class(), OpcodeClass::FieldRead);

    let write = insn::iput_as(Opcode::IputBoolean, Reg(1), Reg(2), flag());
    assert_eq!(write.dest(), None);
    assert_eq!(write.field_read(), None);
    assert_eq!(write.field(), Some(&flag()));

    let s = insn::const_string(Reg(0), "Telemetry: ");
    assert_eq!(s.string(), Some("Telemetry: "));
    assert_eq!(s.literal(), None);
}

#[test]
fn display_listing() {
    assert_eq!(
        insn::iget_boolean(Reg(1), Reg(2), flag()).to_string(),
        "iget-boolean v1, v2, Lcom/example/Settings;->a:Z"
    );
    assert_eq!(insn::const_int(Reg(0), -1).to_string(), "const/4 v0, -0x1");
    assert_eq!(
        insn::const_string(Reg(3), "x\"y").to_string(),
        "const-string v3, \"x\\\"y\""
    );
    assert_eq!(insn::if_eqz(Reg(0), Label(4)).to_string(), "if-eqz v0, @4");
    assert_eq!(insn::return_void().to_string(), "return-void");
    assert_eq!(
        insn::invoke_virtual(
            vec![Reg(0), Reg(1)],
            MethodRef::new("La;", "f", vec![TypeDesc::int()], "Z")
        )
        .to_string(),
        "invoke-virtual v0, v1, La;->f(I)Z"
    );
}

#[test]
fn type_desc_predicates() {
    assert!(TypeDesc::boolean().is_boolean());
    assert!(TypeDesc::int().is_narrow_integer());
    assert!(TypeDesc::new("S").is_narrow_integer());
    assert!(!TypeDesc::new("J").is_narrow_integer());
    assert!(TypeDesc::boxed_integer().is_boxed_integer());
    assert!(TypeDesc::boxed_integer().is_reference());
    assert!(TypeDesc::new("[I").is_reference());
    assert!(TypeDesc::void().is_void());
}

#[test]
fn method_descriptor() {
    let m = MethodRef::new(
        "LVpnUser;",
        "check",
        vec![TypeDesc::int(), TypeDesc::new("Ljava/lang/String;")],
        "Z",
    );
    assert_eq!(m.descriptor(), "(ILjava/lang/String;)Z");
    assert_eq!(m.to_string(), "LVpnUser;->check(ILjava/lang/String;)Z");
}
