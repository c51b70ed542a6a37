//! Arithmetic and bitwise operations on numeric values.
//!
//! Operands follow one coercion table: `Int` and `Bool` are integral (`true`
//! is 1), `Float` is floating, every other kind is a type error. Integer
//! arithmetic wraps on overflow; integer division or remainder by zero and
//! shifts outside `0..64` are value errors.

use crate::error::{JsonError, Result};
use crate::value::Value;

#[derive(Debug, Clone, Copy)]
enum Operand {
    Integral(i64),
    Floating(f64),
}

impl Operand {
    fn of(value: &Value, op: &str) -> Result<Self> {
        match value {
            Value::Int(i) => Ok(Operand::Integral(*i)),
            Value::Bool(b) => Ok(Operand::Integral(i64::from(*b))),
            Value::Float(d) => Ok(Operand::Floating(*d)),
            other => Err(JsonError::type_error(format!(
                "Binary operator '{}' can be used only on integer, float or bool, not {}",
                op,
                other.type_name()
            ))),
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Operand::Integral(i) => i as f64,
            Operand::Floating(d) => d,
        }
    }
}

fn integral(value: &Value, op: &str) -> Result<i64> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::Bool(b) => Ok(i64::from(*b)),
        other => Err(JsonError::type_error(format!(
            "Binary operator '{}' can be used only on integer or bool, not {}",
            op,
            other.type_name()
        ))),
    }
}

fn shift_amount(amount: i64) -> Result<u32> {
    u32::try_from(amount)
        .ok()
        .filter(|bits| *bits < i64::BITS)
        .ok_or_else(|| JsonError::value_error(format!("Shift amount {} out of range", amount)))
}

fn apply_integral(op: &str, lhs: i64, rhs: i64) -> Result<i64> {
    match op {
        "/" | "%" if rhs == 0 => Err(JsonError::value_error(format!(
            "Integer '{}' by zero",
            op
        ))),
        "+" => Ok(lhs.wrapping_add(rhs)),
        "-" => Ok(lhs.wrapping_sub(rhs)),
        "*" => Ok(lhs.wrapping_mul(rhs)),
        "/" => Ok(lhs.wrapping_div(rhs)),
        "%" => Ok(lhs.wrapping_rem(rhs)),
        "&" => Ok(lhs & rhs),
        "|" => Ok(lhs | rhs),
        "^" => Ok(lhs ^ rhs),
        "<<" => shift_amount(rhs).map(|bits| lhs << bits),
        ">>" => shift_amount(rhs).map(|bits| lhs >> bits),
        _ => Err(JsonError::type_error(format!("Unknown operator '{}'", op))),
    }
}

fn apply_floating(op: &str, lhs: f64, rhs: f64) -> Result<f64> {
    match op {
        "+" => Ok(lhs + rhs),
        "-" => Ok(lhs - rhs),
        "*" => Ok(lhs * rhs),
        "/" => Ok(lhs / rhs),
        _ => Err(JsonError::type_error(format!("Unknown operator '{}'", op))),
    }
}

impl Value {
    fn numeric_op(&self, other: &Value, op: &str) -> Result<Value> {
        match (Operand::of(self, op)?, Operand::of(other, op)?) {
            (Operand::Integral(lhs), Operand::Integral(rhs)) => {
                apply_integral(op, lhs, rhs).map(Value::Int)
            }
            (lhs, rhs) => apply_floating(op, lhs.as_f64(), rhs.as_f64()).map(Value::Float),
        }
    }

    fn integral_op(&self, other: &Value, op: &str) -> Result<Value> {
        apply_integral(op, integral(self, op)?, integral(other, op)?).map(Value::Int)
    }

    /// Sum. Two integral operands give an `Int`, anything else a `Float`.
    ///
    /// # Examples
    ///
    /// ```
    /// use json_value::Value;
    ///
    /// assert_eq!(Value::from(33).add(&Value::from(22)).unwrap(), Value::Int(55));
    /// assert_eq!(Value::from(1).add(&Value::from(0.5)).unwrap(), Value::Float(1.5));
    /// assert!(Value::from("x").add(&Value::from(1)).unwrap_err().is_type());
    /// ```
    pub fn add(&self, other: &Value) -> Result<Value> {
        self.numeric_op(other, "+")
    }

    pub fn sub(&self, other: &Value) -> Result<Value> {
        self.numeric_op(other, "-")
    }

    pub fn mul(&self, other: &Value) -> Result<Value> {
        self.numeric_op(other, "*")
    }

    /// Quotient. Integer division truncates toward zero and fails on a zero
    /// divisor; float division follows IEEE-754.
    pub fn div(&self, other: &Value) -> Result<Value> {
        self.numeric_op(other, "/")
    }

    pub fn rem(&self, other: &Value) -> Result<Value> {
        self.integral_op(other, "%")
    }

    pub fn bit_and(&self, other: &Value) -> Result<Value> {
        self.integral_op(other, "&")
    }

    pub fn bit_or(&self, other: &Value) -> Result<Value> {
        self.integral_op(other, "|")
    }

    pub fn bit_xor(&self, other: &Value) -> Result<Value> {
        self.integral_op(other, "^")
    }

    pub fn shl(&self, other: &Value) -> Result<Value> {
        self.integral_op(other, "<<")
    }

    /// Arithmetic right shift.
    pub fn shr(&self, other: &Value) -> Result<Value> {
        self.integral_op(other, ">>")
    }

    /// Arithmetic negation; a `Bool` negates as an integer.
    pub fn negate(&self) -> Result<Value> {
        match self {
            Value::Int(i) => Ok(Value::Int(i.wrapping_neg())),
            Value::Bool(b) => Ok(Value::Int(-i64::from(*b))),
            Value::Float(d) => Ok(Value::Float(-d)),
            other => Err(JsonError::type_error(format!(
                "Unary '-' can be used only on integer, float or bool, not {}",
                other.type_name()
            ))),
        }
    }

    /// `true` exactly when the numeric value is zero.
    pub fn logical_not(&self) -> Result<Value> {
        match self {
            Value::Int(i) => Ok(Value::Bool(*i == 0)),
            Value::Bool(b) => Ok(Value::Bool(!b)),
            Value::Float(d) => Ok(Value::Bool(*d == 0.0)),
            other => Err(JsonError::type_error(format!(
                "Unary '!' can be used only on integer, float or bool, not {}",
                other.type_name()
            ))),
        }
    }

    pub fn bit_not(&self) -> Result<Value> {
        match self {
            Value::Int(i) => Ok(Value::Int(!i)),
            Value::Bool(b) => Ok(Value::Int(!i64::from(*b))),
            other => Err(JsonError::type_error(format!(
                "Unary '~' can be used only on integer or bool, not {}",
                other.type_name()
            ))),
        }
    }

    /// In-place arithmetic: an `Int` stays `Int` (a float operand is applied
    /// in double precision and truncated back), a `Float` stays `Float`.
    fn numeric_assign(&mut self, other: &Value, op: &str) -> Result<()> {
        let rhs = Operand::of(other, op)?;
        match (&mut *self, rhs) {
            (Value::Int(i), Operand::Integral(rhs)) => *i = apply_integral(op, *i, rhs)?,
            (Value::Int(i), Operand::Floating(rhs)) => {
                *i = apply_floating(op, *i as f64, rhs)? as i64;
            }
            (Value::Float(d), rhs) => *d = apply_floating(op, *d, rhs.as_f64())?,
            (other, _) => {
                return Err(JsonError::type_error(format!(
                    "Binary operator '{}=' can be used only on integer or double, not {}",
                    op,
                    other.type_name()
                )));
            }
        }
        Ok(())
    }

    /// In-place bitwise or remainder: an `Int` stays `Int`, a `Bool` stores
    /// whether the integral result is non-zero.
    fn integral_assign(&mut self, other: &Value, op: &str) -> Result<()> {
        let rhs = integral(other, op)?;
        match self {
            Value::Int(i) => *i = apply_integral(op, *i, rhs)?,
            Value::Bool(b) => *b = apply_integral(op, i64::from(*b), rhs)? != 0,
            other => {
                return Err(JsonError::type_error(format!(
                    "Binary operator '{}=' can be used only on integer or bool, not {}",
                    op,
                    other.type_name()
                )));
            }
        }
        Ok(())
    }

    pub fn add_assign(&mut self, other: &Value) -> Result<()> {
        self.numeric_assign(other, "+")
    }

    pub fn sub_assign(&mut self, other: &Value) -> Result<()> {
        self.numeric_assign(other, "-")
    }

    pub fn mul_assign(&mut self, other: &Value) -> Result<()> {
        self.numeric_assign(other, "*")
    }

    pub fn div_assign(&mut self, other: &Value) -> Result<()> {
        self.numeric_assign(other, "/")
    }

    pub fn rem_assign(&mut self, other: &Value) -> Result<()> {
        self.integral_assign(other, "%")
    }

    pub fn bit_and_assign(&mut self, other: &Value) -> Result<()> {
        self.integral_assign(other, "&")
    }

    pub fn bit_or_assign(&mut self, other: &Value) -> Result<()> {
        self.integral_assign(other, "|")
    }

    pub fn bit_xor_assign(&mut self, other: &Value) -> Result<()> {
        self.integral_assign(other, "^")
    }

    pub fn shl_assign(&mut self, other: &Value) -> Result<()> {
        self.integral_assign(other, "<<")
    }

    pub fn shr_assign(&mut self, other: &Value) -> Result<()> {
        self.integral_assign(other, ">>")
    }

    /// Adds one to an `Int` and returns the previous value.
    pub fn increment(&mut self) -> Result<i64> {
        self.step(1, "++")
    }

    /// Subtracts one from an `Int` and returns the previous value.
    pub fn decrement(&mut self) -> Result<i64> {
        self.step(-1, "--")
    }

    fn step(&mut self, delta: i64, op: &str) -> Result<i64> {
        match self {
            Value::Int(i) => {
                let previous = *i;
                *i = previous.wrapping_add(delta);
                Ok(previous)
            }
            other => Err(JsonError::type_error(format!(
                "Unary operator '{}' can be used only on integer, not {}",
                op,
                other.type_name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(i: i64) -> Value {
        Value::Int(i)
    }

    #[test]
    fn test_binary_int_ops() {
        let a = int(33);
        let b = int(22);
        assert_eq!(a.bit_and(&b).unwrap(), int(33 & 22));
        assert_eq!(a.bit_or(&b).unwrap(), int(33 | 22));
        assert_eq!(a.bit_xor(&b).unwrap(), int(33 ^ 22));
        assert_eq!(a.rem(&b).unwrap(), int(33 % 22));
        assert_eq!(a.shr(&int(2)).unwrap(), int(33 >> 2));
        assert_eq!(a.shl(&int(22)).unwrap(), int(33 << 22));
        assert_eq!(a.add(&b).unwrap(), int(55));
        assert_eq!(a.sub(&b).unwrap(), int(11));
        assert_eq!(a.mul(&b).unwrap(), int(726));
        assert_eq!(a.div(&b).unwrap(), int(1));
    }

    #[test]
    fn test_bool_operands_are_integral() {
        assert_eq!(Value::Bool(true).add(&int(1)).unwrap(), int(2));
        assert_eq!(Value::Bool(true).bit_or(&int(6)).unwrap(), int(7));
        assert_eq!(int(5).bit_and(&Value::Bool(true)).unwrap(), int(1));
    }

    #[test]
    fn test_mixed_operands_promote_to_float() {
        assert_eq!(int(1).div(&Value::Float(4.0)).unwrap(), Value::Float(0.25));
        assert_eq!(Value::Float(1.5).mul(&int(2)).unwrap(), Value::Float(3.0));
        assert_eq!(Value::Bool(true).sub(&Value::Float(0.5)).unwrap(), Value::Float(0.5));
    }

    #[test]
    fn test_float_operands_rejected_for_bitwise() {
        assert!(Value::Float(1.0).bit_and(&int(1)).unwrap_err().is_type());
        assert!(int(1).rem(&Value::Float(1.0)).unwrap_err().is_type());
    }

    #[test]
    fn test_non_numeric_operands_rejected() {
        assert!(Value::Null.add(&int(1)).unwrap_err().is_type());
        assert!(int(1).add(&Value::from("1")).unwrap_err().is_type());
        assert!(Value::Array(vec![]).negate().unwrap_err().is_type());
        assert!(Value::from("x").bit_not().unwrap_err().is_type());
    }

    #[test]
    fn test_division_by_zero() {
        assert!(int(1).div(&int(0)).unwrap_err().is_value());
        assert!(int(1).rem(&int(0)).unwrap_err().is_value());
        assert_eq!(int(1).div(&Value::Float(0.0)).unwrap(), Value::Float(f64::INFINITY));
        assert_eq!(int(i64::MIN).div(&int(-1)).unwrap(), int(i64::MIN));
    }

    #[test]
    fn test_shift_range() {
        assert!(int(1).shl(&int(64)).unwrap_err().is_value());
        assert!(int(1).shr(&int(-1)).unwrap_err().is_value());
        assert_eq!(int(-8).shr(&int(1)).unwrap(), int(-4));
    }

    #[test]
    fn test_integer_overflow_wraps() {
        assert_eq!(int(i64::MAX).add(&int(1)).unwrap(), int(i64::MIN));
    }

    #[test]
    fn test_unary_ops() {
        assert_eq!(int(5).negate().unwrap(), int(-5));
        assert_eq!(Value::Bool(true).negate().unwrap(), int(-1));
        assert_eq!(Value::Float(2.5).negate().unwrap(), Value::Float(-2.5));
        assert_eq!(int(0).logical_not().unwrap(), Value::Bool(true));
        assert_eq!(Value::Float(0.5).logical_not().unwrap(), Value::Bool(false));
        assert_eq!(int(0).bit_not().unwrap(), int(-1));
        assert_eq!(Value::Bool(false).bit_not().unwrap(), int(-1));
    }

    #[test]
    fn test_modifying_int_ops() {
        let mut v = int(123);
        assert_eq!(v.increment().unwrap(), 123);
        assert_eq!(v, int(124));
        assert_eq!(v.decrement().unwrap(), 124);
        assert_eq!(v, int(123));

        v.add_assign(&int(2)).unwrap();
        assert_eq!(v, int(125));
        v.sub_assign(&int(2)).unwrap();
        assert_eq!(v, int(123));
        v.mul_assign(&int(2)).unwrap();
        assert_eq!(v, int(246));
        v.div_assign(&int(2)).unwrap();
        assert_eq!(v, int(123));
        v.rem_assign(&int(100)).unwrap();
        assert_eq!(v, int(23));
        v.shl_assign(&int(1)).unwrap();
        assert_eq!(v, int(46));
        v.shr_assign(&int(1)).unwrap();
        assert_eq!(v, int(23));
        v.bit_and_assign(&int(7)).unwrap();
        assert_eq!(v, int(7));
        v.bit_or_assign(&int(8)).unwrap();
        assert_eq!(v, int(15));
        v.bit_xor_assign(&int(1)).unwrap();
        assert_eq!(v, int(14));
    }

    #[test]
    fn test_assignment_keeps_kind() {
        let mut v = int(7);
        v.mul_assign(&Value::Float(1.5)).unwrap();
        assert_eq!(v, int(10));

        let mut f = Value::Float(1.0);
        f.add_assign(&int(2)).unwrap();
        assert_eq!(f, Value::Float(3.0));

        let mut b = Value::Bool(true);
        b.bit_and_assign(&int(2)).unwrap();
        assert_eq!(b, Value::Bool(false));
        assert!(b.add_assign(&int(1)).unwrap_err().is_type());
    }

    #[test]
    fn test_increment_requires_int() {
        assert!(Value::Float(1.0).increment().unwrap_err().is_type());
        assert!(Value::Bool(true).decrement().unwrap_err().is_type());
    }
}
