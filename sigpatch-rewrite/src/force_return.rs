use sigpatch_isa::{Reg, insn};
use sigpatch_model::{Body, Error, MethodId, Program, ReturnValue};

use crate::error::{Result, RewriteError};

/// Outcome of [`force_return`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Rewritten,
    /// The body already was the minimal body for the value.
    Unchanged,
}

/// The self-contained body returning `value`.
///
/// The frame keeps its size (growing to one register when a value must be
/// loaded) so incoming arguments stay where the caller put them.
pub fn minimal_body(value: ReturnValue, registers: u16, ins: u16) -> Body {
    let v0 = Reg(0);
    let instructions = match value {
        ReturnValue::Void => return Body::new(registers, ins, vec![insn::return_void()]),
        ReturnValue::Boolean(b) => vec![insn::const_int(v0, i32::from(b)), insn::ret(v0)],
        ReturnValue::Integer(v) => vec![insn::const_int(v0, v), insn::ret(v0)],
        ReturnValue::Null => vec![insn::const_zero(v0), insn::return_object(v0)],
    };
    Body::new(registers.max(1), ins, instructions)
}

/// Replace the body of `id` so that it returns `value` and does nothing else.
pub fn force_return(program: &mut Program, id: MethodId, value: ReturnValue) -> Result<Edit> {
    let Some((class, method)) = program
        .class(id.class)
        .and_then(|class| Some((class, class.methods.get(id.index)?)))
    else {
        return Err(Error::UnknownMethod(id).into());
    };
    let method_ref = method.reference(&class.ty);
    let expected = method.return_kind();
    if value.kind() != expected {
        return Err(RewriteError::ReturnKindMismatch {
            method: method_ref,
            expected,
            value,
        });
    }
    let Some(body) = &method.body else {
        return Err(RewriteError::MissingBody(method_ref));
    };

    let minimal = minimal_body(value, body.registers, body.ins);
    if &minimal == body {
        log::debug!("{method_ref} already returns {value}");
        return Ok(Edit::Unchanged);
    }
    program.replace_body(id, minimal)?;
    log::info!("{method_ref} now returns {value}");
    Ok(Edit::Rewritten)
}
