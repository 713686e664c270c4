//! Consistency checks over every entry of opcode_table().

use sigpatch_isa::{Opcode, OpcodeClass, OpcodeFlags, PayloadKind, lookup, opcode_table};

#[test]
fn table_index_matches_discriminant() {
    for (i, info) in opcode_table().iter().enumerate() {
        assert_eq!(
            info.opcode() as usize,
            i,
            "'{}' is out of place in the table",
            info.mnemonic()
        );
    }
}

#[test]
fn lookup_roundtrip_for_all_opcodes() {
    for info in opcode_table() {
        let found = lookup(info.mnemonic()).expect("mnemonic should resolve");
        assert_eq!(found.opcode(), info.opcode());
        let parsed: Opcode = info.mnemonic().parse().unwrap();
        assert_eq!(parsed, info.opcode());
    }
}

#[test]
fn mnemonics_are_unique() {
    let mut seen = std::collections::HashSet::new();
    for info in opcode_table() {
        assert!(
            seen.insert(info.mnemonic()),
            "duplicate mnemonic '{}'",
            info.mnemonic()
        );
    }
}

#[test]
fn unknown_mnemonic_is_rejected() {
    assert!(lookup("iget-wide-quick").is_none());
    assert!("bogus".parse::<Opcode>().is_err());
}

#[test]
fn zero_test_only_on_eqz_and_nez() {
    let zero_tests: Vec<Opcode> = opcode_table()
        .iter()
        .filter(|info| info.flags().contains(OpcodeFlags::ZERO_TEST))
        .map(|info| info.opcode())
        .collect();
    assert_eq!(zero_tests, vec![Opcode::IfEqz, Opcode::IfNez]);
}

#[test]
fn field_reads_carry_field_payload_and_dest() {
    for info in opcode_table() {
        if info.flags().contains(OpcodeFlags::FIELD_READ) {
            assert_eq!(info.class(), OpcodeClass::FieldRead);
            assert_eq!(info.format().payload, PayloadKind::Field);
            assert!(info.flags().contains(OpcodeFlags::DEST));
        }
    }
}

#[test]
fn literal_flag_matches_literal_payload() {
    for info in opcode_table() {
        let has_literal = matches!(info.format().payload, PayloadKind::Literal { .. });
        assert_eq!(
            has_literal,
            info.flags().contains(OpcodeFlags::LITERAL),
            "'{}' literal flag disagrees with its format",
            info.mnemonic()
        );
    }
}

#[test]
fn boolean_field_reads() {
    assert!(Opcode::IgetBoolean.is_boolean_field_read());
    assert!(Opcode::SgetBoolean.is_boolean_field_read());
    assert!(!Opcode::Iget.is_boolean_field_read());
    assert!(!Opcode::IputBoolean.is_boolean_field_read());
}
