//! Opcodes that only touch the active wheel and the argument queue.

use crate::circular::Direction;
use crate::error::Fault;
use crate::queue::ArgQueue;
use crate::wheel::Wheel;
use twist_types::{ErrorKind, Instruction, Value};

/// `NEWV`: append the text argument if there is one, the integer otherwise.
pub(crate) fn newv(inst: &Instruction, wheel: &mut Wheel) {
    let value = if inst.has_text() {
        Value::Text(inst.text_arg.clone())
    } else {
        Value::Integer(inst.int_arg)
    };
    wheel.push(value);
}

/// `MOVVW`
pub(crate) fn movvw(inst: &Instruction, wheel: &mut Wheel) -> Result<(), Fault> {
    wheel.rotate(inst.int_arg)
}

/// `WHLDIRV`
pub(crate) fn whldirv(inst: &Instruction, wheel: &mut Wheel) -> Result<(), Fault> {
    wheel.set_direction(direction_arg(inst.int_arg)?);
    Ok(())
}

/// `ADDARG`: queue a copy of the cursor value.
pub(crate) fn addarg(wheel: &Wheel, queue: &mut ArgQueue) -> Result<(), Fault> {
    queue.push_back(wheel.current()?.clone());
    Ok(())
}

/// `CMP`: set the wheel's comparison flag.
///
/// With `%` the cursor value is compared against one queued value: integers
/// by `>`, text by equality. With a text argument the cursor value's
/// rendering is compared for equality. Otherwise the cursor integer is
/// compared by `>` against the integer argument.
pub(crate) fn cmp(inst: &Instruction, wheel: &mut Wheel, queue: &mut ArgQueue) -> Result<(), Fault> {
    wheel.ensure_not_empty()?;
    let flag = if inst.args_flag {
        let operand = queue.pop_front()?;
        match wheel.current()? {
            Value::Integer(n) => match operand {
                Value::Integer(m) => *n > m,
                other => return Err(Fault::non_numeric_data(&other)),
            },
            Value::Text(s) => operand.as_text() == Some(s.as_str()),
            float @ Value::Float(_) => return Err(Fault::non_numeric_data(float)),
        }
    } else if inst.has_text() {
        wheel.current()?.to_string() == inst.text_arg
    } else {
        wheel.current_integer()? > inst.int_arg
    };
    wheel.set_flag(flag);
    Ok(())
}

/// Decode a direction argument for `WHLDIRV` / `WHLDIRC`.
pub(crate) fn direction_arg(arg: i64) -> Result<Direction, Fault> {
    Direction::from_arg(arg).ok_or_else(|| {
        Fault::with_detail(
            ErrorKind::BadArgument,
            format!("direction must be 1 or -1, got {arg}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use twist_types::Opcode;

    fn cmp_with(inst: Instruction, current: Value, queued: Option<Value>) -> Result<bool, Fault> {
        let mut wheel = Wheel::from_values(vec![current]);
        let mut queue = ArgQueue::new();
        if let Some(v) = queued {
            queue.push_back(v);
        }
        cmp(&inst, &mut wheel, &mut queue)?;
        Ok(wheel.flag())
    }

    #[test]
    fn test_newv_prefers_text() {
        let mut w = Wheel::new();
        newv(&Instruction::new(Opcode::Newv).with_int(3), &mut w);
        newv(&Instruction::new(Opcode::Newv).with_int(3).with_text("Tom"), &mut w);
        assert_eq!(w.values(), &[Value::Integer(3), Value::from("Tom")]);
    }

    #[test]
    fn test_whldirv_rejects_other_values() {
        let mut w = Wheel::new();
        let err = whldirv(&Instruction::new(Opcode::Whldirv).with_int(2), &mut w).unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadArgument);
        whldirv(&Instruction::new(Opcode::Whldirv).with_int(-1), &mut w).unwrap();
        assert_eq!(w.direction(), Direction::Backward);
    }

    #[test]
    fn test_addarg_copies() {
        let w = Wheel::from_values(vec![Value::Integer(4)]);
        let mut q = ArgQueue::new();
        addarg(&w, &mut q).unwrap();
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![&Value::Integer(4)]);
        assert_eq!(w.len(), 1);
        assert_eq!(addarg(&Wheel::new(), &mut q).unwrap_err().kind, ErrorKind::EmptyWheel);
    }

    #[test]
    fn test_cmp_text_argument_matches_integer_rendering() {
        let inst = Instruction::new(Opcode::Cmp).with_text("42");
        assert_eq!(cmp_with(inst.clone(), Value::Integer(42), None), Ok(true));
        assert_eq!(cmp_with(inst, Value::Integer(43), None), Ok(false));
    }

    #[test]
    fn test_cmp_integer_argument_is_strict() {
        let inst = Instruction::new(Opcode::Cmp).with_int(5);
        assert_eq!(cmp_with(inst.clone(), Value::Integer(6), None), Ok(true));
        assert_eq!(cmp_with(inst.clone(), Value::Integer(5), None), Ok(false));
        assert_eq!(
            cmp_with(inst, Value::from("x"), None).unwrap_err().kind,
            ErrorKind::NumericDataRequired
        );
    }

    #[test]
    fn test_cmp_queue_mode() {
        let inst = Instruction::new(Opcode::Cmp).with_args();
        assert_eq!(cmp_with(inst.clone(), Value::Integer(3), Some(Value::Integer(2))), Ok(true));
        assert_eq!(cmp_with(inst.clone(), Value::from("a"), Some(Value::from("a"))), Ok(true));
        assert_eq!(cmp_with(inst.clone(), Value::from("1"), Some(Value::Integer(1))), Ok(false));
        assert_eq!(
            cmp_with(inst.clone(), Value::Integer(3), Some(Value::from("a"))).unwrap_err().kind,
            ErrorKind::NumericDataRequired
        );
        assert_eq!(
            cmp_with(inst.clone(), Value::Float(1.5), Some(Value::Integer(1))).unwrap_err().kind,
            ErrorKind::NumericDataRequired
        );
        assert_eq!(
            cmp_with(inst, Value::Integer(3), None).unwrap_err().kind,
            ErrorKind::NotEnoughArgs
        );
    }

    #[test]
    fn test_cmp_empty_wheel_checked_first() {
        let mut q = ArgQueue::new();
        let err = cmp(&Instruction::new(Opcode::Cmp).with_args(), &mut Wheel::new(), &mut q)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyWheel);
    }
}
