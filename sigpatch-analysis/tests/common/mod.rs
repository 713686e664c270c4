#![allow(dead_code)]

use sigpatch_isa::{FieldRef, Instruction, Label, MethodRef, Reg, TypeDesc, insn};
use sigpatch_model::builder::{ClassBuilder, MethodBuilder, ProgramBuilder};
use sigpatch_model::{Class, Method, Program};

pub const VPN_USER: &str = "Lcom/protonvpn/android/auth/data/VpnUser;";
pub const SETTINGS: &str = "Lcom/protonvpn/android/userstorage/LocalUserSettings;";

pub fn max_tier() -> FieldRef {
    FieldRef::new(VPN_USER, "b", TypeDesc::boxed_integer())
}

pub fn int_value() -> MethodRef {
    MethodRef::new(TypeDesc::boxed_integer(), "intValue", vec![], "I")
}

pub fn method(name: &str, ret: &str, code: Vec<Instruction>) -> Method {
    MethodBuilder::new(name, vec![], ret).code(code).build()
}

/// `return tier != null && tier.intValue() <op> literal`, with the
/// null check as a zero test when `null_check` is set.
pub fn tier_compare(name: &str, field: FieldRef, literal: i32, null_check: bool) -> Method {
    let mut code = vec![insn::iget_object(Reg(0), Reg(3), field)];
    if null_check {
        code.push(insn::if_eqz(Reg(0), Label(8)));
    } else {
        code.push(insn::nop());
    }
    code.extend([
        insn::invoke_virtual(vec![Reg(0)], int_value()),
        insn::move_result(Reg(0)),
        insn::const_int(Reg(1), literal),
        insn::if_ne(Reg(0), Reg(1), Label(8)),
        insn::const_int(Reg(2), 1),
        insn::ret(Reg(2)),
        insn::const_int(Reg(2), 0),
        insn::ret(Reg(2)),
    ]);
    method(name, "Z", code)
}

pub fn vpn_user() -> Class {
    ClassBuilder::new(VPN_USER)
        .field("a", "Ljava/lang/String;")
        .field("b", TypeDesc::boxed_integer())
        .method(method(
            "toString",
            "Ljava/lang/String;",
            vec![
                insn::const_string(Reg(0), "Proton VPN Account"),
                insn::const_string(Reg(0), "Proton Mail Account"),
                insn::return_object(Reg(0)),
            ],
        ))
        .method(tier_compare("isPMTeam", max_tier(), 3, true))
        .method(tier_compare("isPlus", max_tier(), 2, true))
        .method(method(
            "isFreeUser",
            "Z",
            vec![
                insn::iget_object(Reg(0), Reg(2), max_tier()),
                insn::if_eqz(Reg(0), Label(3)),
                insn::const_int(Reg(1), 1),
                insn::ret(Reg(1)),
            ],
        ))
        .method(tier_compare("isBasic", max_tier(), 1, false))
        .method(method(
            "userTier",
            "I",
            vec![
                insn::iget_object(Reg(0), Reg(1), max_tier()),
                insn::invoke_virtual(vec![Reg(0)], int_value()),
                insn::move_result(Reg(0)),
                insn::ret(Reg(0)),
            ],
        ))
        .method(method(
            "getName",
            "Ljava/lang/String;",
            vec![
                insn::iget_object(
                    Reg(0),
                    Reg(1),
                    FieldRef::new(VPN_USER, "a", "Ljava/lang/String;"),
                ),
                insn::return_object(Reg(0)),
            ],
        ))
        .build()
}

pub fn telemetry_field() -> FieldRef {
    FieldRef::new(SETTINGS, "telemetryEnabled", "Z")
}

pub fn settings() -> Class {
    let crash = FieldRef::new(SETTINGS, "crashReporting", "Z");
    ClassBuilder::new(SETTINGS)
        .field("crashReporting", "Z")
        .field("telemetryEnabled", "Z")
        .method(method(
            "toLogList",
            "Ljava/lang/String;",
            vec![
                insn::const_string(Reg(0), "Crash reporting: "),
                insn::iget_boolean(Reg(1), Reg(2), crash),
                insn::const_string(Reg(0), "Telemetry: "),
                insn::nop(),
                insn::iget_boolean(Reg(1), Reg(2), telemetry_field()),
                insn::return_object(Reg(0)),
            ],
        ))
        .build()
}

pub fn program(classes: impl IntoIterator<Item = Class>) -> Program {
    ProgramBuilder::new()
        .package("ch.protonvpn.android")
        .classes(classes)
        .build()
        .unwrap()
}
