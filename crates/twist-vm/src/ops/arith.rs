//! `ADD`, `SUB`, `MUL` and `DIV`.
//!
//! Each opcode has a queue mode (`%` set: fold the first N queued values)
//! and a whole-wheel mode (fold every value on the active wheel). `ADD` and
//! `MUL` also take a literal shorthand that adjusts the cursor value.
//! Integer arithmetic wraps.

use crate::error::Fault;
use crate::queue::ArgQueue;
use crate::wheel::Wheel;
use twist_types::{ErrorKind, Instruction, Value};

pub(crate) fn add(inst: &Instruction, wheel: &mut Wheel, queue: &mut ArgQueue) -> Result<(), Fault> {
    if inst.args_flag {
        let operands = queue_operands(inst, queue, 0)?;
        let sum = operands.iter().fold(0i64, |acc, n| acc.wrapping_add(*n));
        return wheel.set_current(Value::Integer(sum));
    }
    if inst.int_arg != 0 {
        let current = wheel.current_integer()?;
        return wheel.set_current(Value::Integer(current.wrapping_add(inst.int_arg)));
    }
    let operands = wheel_operands(wheel, ErrorKind::EmptyWheel)?;
    let sum = operands.iter().fold(0i64, |acc, n| acc.wrapping_add(*n));
    wheel.set_current(Value::Integer(sum))
}

pub(crate) fn sub(inst: &Instruction, wheel: &mut Wheel, queue: &mut ArgQueue) -> Result<(), Fault> {
    let operands = if inst.args_flag {
        queue_operands(inst, queue, 1)?
    } else {
        wheel_operands(wheel, ErrorKind::NotEnoughArgs)?
    };
    let (first, rest) = split(&operands)?;
    let difference = rest.iter().fold(first, |acc, n| acc.wrapping_sub(*n));
    wheel.set_current(Value::Integer(difference))
}

pub(crate) fn mul(inst: &Instruction, wheel: &mut Wheel, queue: &mut ArgQueue) -> Result<(), Fault> {
    if inst.args_flag {
        let operands = queue_operands(inst, queue, 1)?;
        let product = operands.iter().fold(1i64, |acc, n| acc.wrapping_mul(*n));
        return wheel.set_current(Value::Integer(product));
    }
    if inst.int_arg != 0 {
        let current = wheel.current_integer()?;
        return wheel.set_current(Value::Integer(current.wrapping_mul(inst.int_arg)));
    }
    let operands = wheel_operands(wheel, ErrorKind::EmptyWheel)?;
    let product = operands.iter().fold(1i64, |acc, n| acc.wrapping_mul(*n));
    wheel.set_current(Value::Integer(product))
}

/// Queue mode divides as integers (truncating); whole-wheel mode divides
/// as floats and stores a `Float`.
pub(crate) fn div(inst: &Instruction, wheel: &mut Wheel, queue: &mut ArgQueue) -> Result<(), Fault> {
    if inst.args_flag {
        let operands = queue_operands(inst, queue, 1)?;
        let (first, rest) = split(&operands)?;
        check_divisors(rest)?;
        let quotient = rest.iter().fold(first, |acc, n| acc.wrapping_div(*n));
        return wheel.set_current(Value::Integer(quotient));
    }
    let operands = wheel_operands(wheel, ErrorKind::NotEnoughArgs)?;
    let (first, rest) = split(&operands)?;
    check_divisors(rest)?;
    let quotient = rest.iter().fold(first as f64, |acc, n| acc / *n as f64);
    wheel.set_current(Value::Float(quotient))
}

/// Drain `int_arg` integers from the queue front.
///
/// Argument-count errors leave the queue untouched. A non-integer operand
/// is reported after the values were drained. The wheel must be non-empty
/// once the operands are known to be valid.
fn queue_operands(inst: &Instruction, queue: &mut ArgQueue, minimum: usize) -> Result<Vec<i64>, Fault> {
    let count = usize::try_from(inst.int_arg).map_err(|_| {
        Fault::with_detail(
            ErrorKind::BadArgument,
            format!("negative argument count {}", inst.int_arg),
        )
    })?;
    if count < minimum {
        return Err(Fault::with_detail(
            ErrorKind::NotEnoughArgs,
            format!("{} needs at least {minimum} queued value", inst.opcode),
        ));
    }
    queue
        .drain_front(count)?
        .iter()
        .map(|value| value.as_integer().ok_or_else(|| Fault::non_numeric_operand(value)))
        .collect()
}

/// Every value on the wheel as an integer. `when_empty` is the fault kind
/// for a wheel with nothing to fold.
fn wheel_operands(wheel: &Wheel, when_empty: ErrorKind) -> Result<Vec<i64>, Fault> {
    if wheel.is_empty() {
        return Err(Fault::new(when_empty));
    }
    wheel
        .values()
        .iter()
        .map(|value| value.as_integer().ok_or_else(|| Fault::non_numeric_data(value)))
        .collect()
}

fn split(operands: &[i64]) -> Result<(i64, &[i64]), Fault> {
    operands
        .split_first()
        .map(|(first, rest)| (*first, rest))
        .ok_or_else(|| Fault::new(ErrorKind::NotEnoughArgs))
}

fn check_divisors(divisors: &[i64]) -> Result<(), Fault> {
    if divisors.contains(&0) {
        return Err(Fault::new(ErrorKind::DivisionByZero));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use twist_types::Opcode;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Integer).collect()
    }

    fn queued(values: &[i64]) -> ArgQueue {
        let mut q = ArgQueue::new();
        for v in ints(values) {
            q.push_back(v);
        }
        q
    }

    fn queue_mode(op: Opcode, n: i64) -> Instruction {
        Instruction::new(op).with_int(n).with_args()
    }

    #[test]
    fn test_add_whole_wheel() {
        let mut w = Wheel::from_values(ints(&[5, 3]));
        add(&Instruction::new(Opcode::Add), &mut w, &mut ArgQueue::new()).unwrap();
        assert_eq!(w.values(), ints(&[8, 3]).as_slice());
    }

    #[test]
    fn test_add_literal_shorthand() {
        let mut w = Wheel::from_values(ints(&[5, 3]));
        add(&Instruction::new(Opcode::Add).with_int(-2), &mut w, &mut ArgQueue::new()).unwrap();
        assert_eq!(w.current(), Ok(&Value::Integer(3)));
    }

    #[test]
    fn test_add_queue_zero_count_yields_zero() {
        let mut w = Wheel::from_values(ints(&[9]));
        let mut q = queued(&[4]);
        add(&queue_mode(Opcode::Add, 0), &mut w, &mut q).unwrap();
        assert_eq!(w.current(), Ok(&Value::Integer(0)));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_sub_queue_folds_left() {
        let mut w = Wheel::from_values(ints(&[0]));
        let mut q = queued(&[10, 3, 2]);
        sub(&queue_mode(Opcode::Sub, 3), &mut w, &mut q).unwrap();
        assert_eq!(w.current(), Ok(&Value::Integer(5)));
        assert!(q.is_empty());
    }

    #[test]
    fn test_sub_zero_count_is_not_enough() {
        let mut w = Wheel::from_values(ints(&[0]));
        let err = sub(&queue_mode(Opcode::Sub, 0), &mut w, &mut queued(&[1])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotEnoughArgs);
    }

    #[test]
    fn test_negative_count_is_bad_argument() {
        let mut w = Wheel::from_values(ints(&[0]));
        let err = mul(&queue_mode(Opcode::Mul, -1), &mut w, &mut ArgQueue::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadArgument);
    }

    #[test]
    fn test_short_queue_keeps_values() {
        let mut w = Wheel::from_values(ints(&[0]));
        let mut q = queued(&[1, 2]);
        let err = add(&queue_mode(Opcode::Add, 3), &mut w, &mut q).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotEnoughArgs);
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_text_operand_is_arithmetic_error() {
        let mut w = Wheel::from_values(ints(&[0]));
        let mut q = ArgQueue::new();
        q.push_back(Value::from("x"));
        let err = add(&queue_mode(Opcode::Add, 1), &mut w, &mut q).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ArithmeticError);
    }

    #[test]
    fn test_queue_mode_on_empty_wheel() {
        let mut w = Wheel::new();
        let err = add(&queue_mode(Opcode::Add, 1), &mut w, &mut queued(&[1])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyWheel);
    }

    #[test]
    fn test_empty_wheel_kinds_per_opcode() {
        let none = Instruction::new;
        let mut q = ArgQueue::new();
        let kind = |r: Result<(), Fault>| r.unwrap_err().kind;
        assert_eq!(kind(add(&none(Opcode::Add), &mut Wheel::new(), &mut q)), ErrorKind::EmptyWheel);
        assert_eq!(kind(mul(&none(Opcode::Mul), &mut Wheel::new(), &mut q)), ErrorKind::EmptyWheel);
        assert_eq!(kind(sub(&none(Opcode::Sub), &mut Wheel::new(), &mut q)), ErrorKind::NotEnoughArgs);
        assert_eq!(kind(div(&none(Opcode::Div), &mut Wheel::new(), &mut q)), ErrorKind::NotEnoughArgs);
    }

    #[test]
    fn test_whole_wheel_rejects_text() {
        let mut w = Wheel::from_values(vec![Value::Integer(1), Value::from("a")]);
        let err = mul(&Instruction::new(Opcode::Mul), &mut w, &mut ArgQueue::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NumericDataRequired);
    }

    #[test]
    fn test_div_result_type_depends_on_mode() {
        let mut w = Wheel::from_values(ints(&[7, 2]));
        div(&Instruction::new(Opcode::Div), &mut w, &mut ArgQueue::new()).unwrap();
        assert_eq!(w.current(), Ok(&Value::Float(3.5)));

        let mut w = Wheel::from_values(ints(&[0]));
        div(&queue_mode(Opcode::Div, 2), &mut w, &mut queued(&[7, 2])).unwrap();
        assert_eq!(w.current(), Ok(&Value::Integer(3)));
    }

    #[test]
    fn test_div_truncates_toward_zero() {
        let mut w = Wheel::from_values(ints(&[0]));
        div(&queue_mode(Opcode::Div, 2), &mut w, &mut queued(&[-7, 2])).unwrap();
        assert_eq!(w.current(), Ok(&Value::Integer(-3)));
    }

    #[test]
    fn test_div_by_zero_leaves_wheel_alone() {
        let mut w = Wheel::from_values(ints(&[5, 0]));
        let err = div(&Instruction::new(Opcode::Div), &mut w, &mut ArgQueue::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
        assert_eq!(w.values(), ints(&[5, 0]).as_slice());

        let mut w = Wheel::from_values(ints(&[9]));
        let err = div(&queue_mode(Opcode::Div, 2), &mut w, &mut queued(&[5, 0])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
        assert_eq!(w.values(), ints(&[9]).as_slice());
    }

    #[test]
    fn test_overflow_wraps() {
        let mut w = Wheel::from_values(ints(&[i64::MAX, 1]));
        add(&Instruction::new(Opcode::Add), &mut w, &mut ArgQueue::new()).unwrap();
        assert_eq!(w.current(), Ok(&Value::Integer(i64::MIN)));

        let mut w = Wheel::from_values(ints(&[0]));
        div(&queue_mode(Opcode::Div, 2), &mut w, &mut queued(&[i64::MIN, -1])).unwrap();
        assert_eq!(w.current(), Ok(&Value::Integer(i64::MIN)));
    }
}
