#![allow(dead_code)]

use sigpatch_isa::{FieldRef, Instruction, Label, MethodRef, Reg, TypeDesc, insn};
use sigpatch_model::builder::{ClassBuilder, MethodBuilder, ProgramBuilder};
use sigpatch_model::{Class, Method, MethodId, Program};

pub const PACKAGE: &str = "ch.protonvpn.android";
pub const VPN_USER: &str = "Lcom/protonvpn/android/auth/data/VpnUser;";
pub const APP_CONFIG: &str = "Lcom/protonvpn/android/appconfig/AppConfigResponse;";
pub const SENTRY: &str = "Lcom/protonvpn/android/telemetry/SentryIntegration;";
pub const SETTINGS: &str = "Lcom/protonvpn/android/userstorage/LocalUserSettings;";

pub fn max_tier() -> FieldRef {
    FieldRef::new(VPN_USER, "maxTier", TypeDesc::boxed_integer())
}

pub fn telemetry() -> FieldRef {
    FieldRef::new(SETTINGS, "telemetryEnabled", "Z")
}

fn int_value() -> MethodRef {
    MethodRef::new(TypeDesc::boxed_integer(), "intValue", vec![], "I")
}

pub fn method(name: &str, ret: &str, code: Vec<Instruction>) -> Method {
    MethodBuilder::new(name, vec![], ret).code(code).build()
}

/// `maxTier != null && maxTier.intValue() == literal`
fn tier_equals(name: &str, literal: i32) -> Method {
    method(
        name,
        "Z",
        vec![
            insn::iget_object(Reg(0), Reg(3), max_tier()),
            insn::if_eqz(Reg(0), Label(8)),
            insn::invoke_virtual(vec![Reg(0)], int_value()),
            insn::move_result(Reg(0)),
            insn::const_int(Reg(1), literal),
            insn::if_ne(Reg(0), Reg(1), Label(8)),
            insn::const_int(Reg(2), 1),
            insn::ret(Reg(2)),
            insn::const_int(Reg(2), 0),
            insn::ret(Reg(2)),
        ],
    )
}

pub fn vpn_user() -> Class {
    ClassBuilder::new(VPN_USER)
        .field("name", "Ljava/lang/String;")
        .field("maxTier", TypeDesc::boxed_integer())
        .method(method(
            "getAccountLabel",
            "Ljava/lang/String;",
            vec![
                insn::const_string(Reg(0), "Proton VPN Account"),
                insn::const_string(Reg(0), "Proton Mail Account"),
                insn::return_object(Reg(0)),
            ],
        ))
        .method(tier_equals("isPMTeam", 3))
        .method(tier_equals("isPlus", 2))
        .method(method(
            "isFreeUser",
            "Z",
            vec![
                insn::iget_object(Reg(0), Reg(2), max_tier()),
                insn::if_nez(Reg(0), Label(3)),
                insn::const_int(Reg(1), 1),
                insn::ret(Reg(1)),
            ],
        ))
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
        .build()
}

pub fn app_config() -> Class {
    ClassBuilder::new(APP_CONFIG)
        .method(method(
            "toString",
            "Ljava/lang/String;",
            vec![
                insn::const_string(Reg(0), "ChangeServerShortDelayInSeconds"),
                insn::const_string(Reg(0), "ChangeServerLongDelayInSeconds"),
                insn::return_object(Reg(0)),
            ],
        ))
        .method(method(
            "getDelay",
            "I",
            vec![insn::const_int(Reg(0), 1200), insn::ret(Reg(0))],
        ))
        .method(method(
            "getShortDelay",
            "I",
            vec![insn::const_int(Reg(0), 90), insn::ret(Reg(0))],
        ))
        .build()
}

pub fn sentry() -> Class {
    ClassBuilder::new(SENTRY)
        .method(method("<init>", "V", vec![insn::return_void()]))
        .method(method(
            "isEnabled",
            "Z",
            vec![
                insn::const_string(Reg(0), "sentry_installation_id"),
                insn::const_string(Reg(0), "sentry_is_enabled"),
                insn::const_int(Reg(1), 1),
                insn::ret(Reg(1)),
            ],
        ))
        .method(method(
            "init",
            "V",
            vec![
                insn::const_string(Reg(0), "sentry_installation_id"),
                insn::nop(),
                insn::return_void(),
            ],
        ))
        .build()
}

pub fn settings() -> Class {
    ClassBuilder::new(SETTINGS)
        .field("telemetryEnabled", "Z")
        .method(method(
            "toLogList",
            "Ljava/lang/String;",
            vec![
                insn::const_string(Reg(0), "Telemetry: "),
                insn::iget_boolean(Reg(1), Reg(2), telemetry()),
                insn::return_object(Reg(0)),
            ],
        ))
        .build()
}

/// Ten classes of five methods, each reading the telemetry flag once.
pub fn consumers() -> Vec<Class> {
    (0..10)
        .map(|c| {
            let mut class = ClassBuilder::new(format!("Lcom/protonvpn/android/ui/Screen{c};"));
            for m in 0..5 {
                let dest = Reg(((c + m) % 4) as u16);
                class = class.method(method(
                    &format!("render{m}"),
                    "V",
                    vec![
                        insn::const_int(Reg(4), 1),
                        insn::iget_boolean(dest, Reg(5), telemetry()),
                        insn::if_eqz(dest, Label(3)),
                        insn::return_void(),
                    ],
                ));
            }
            class.build()
        })
        .collect()
}

pub fn proton(package: Option<&str>) -> Program {
    let mut builder = ProgramBuilder::new()
        .class(settings())
        .class(vpn_user())
        .class(app_config())
        .class(sentry())
        .classes(consumers());
    if let Some(package) = package {
        builder = builder.package(package);
    }
    builder.build().unwrap()
}

pub fn find(program: &Program, class: &str, name: &str) -> MethodId {
    program
        .methods()
        .find(|(id, m)| program.class(id.class).unwrap().ty == class && m.name == name)
        .map(|(id, _)| id)
        .unwrap()
}

pub fn listing(program: &Program, class: &str, name: &str) -> Vec<String> {
    program
        .method(find(program, class, name))
        .unwrap()
        .instructions()
        .iter()
        .map(ToString::to_string)
        .collect()
}
