//! Arithmetic operations: `+ - * / % max min`, all variadic reduce-left over
//! Numbers.

use crate::env::Environment;
use crate::error::LispError;
use crate::value::Value;
use std::rc::Rc;

/// Extracts every argument as `f64`, or a type-mismatch error naming the
/// first non-Number argument's position.
fn all_numbers(name: &str, args: &[Value]) -> Result<Vec<f64>, LispError> {
    args.iter()
        .enumerate()
        .map(|(i, v)| match v {
            Value::Number(n) => Ok(*n),
            other => Err(LispError::type_mismatch(name, i, other, "Number")),
        })
        .collect()
}

/// Reduces `nums` left to right with `op`, applying `unary` instead when
/// exactly one argument is given (so `-` can negate and `+`/`*` degenerate
/// to the identity function on a single argument via the fold itself).
fn reduce(name: &str, args: Vec<Value>, identity: f64, unary: Option<fn(f64) -> f64>, op: fn(f64, f64) -> Result<f64, LispError>) -> Value {
    let nums = match all_numbers(name, &args) {
        Ok(n) => n,
        Err(e) => return e.into(),
    };
    if nums.is_empty() {
        return Value::Number(identity);
    }
    if nums.len() == 1 {
        if let Some(f) = unary {
            return Value::Number(f(nums[0]));
        }
        return Value::Number(nums[0]);
    }
    let mut acc = nums[0];
    for &n in &nums[1..] {
        acc = match op(acc, n) {
            Ok(v) => v,
            Err(e) => return e.into(),
        };
    }
    Value::Number(acc)
}

pub fn builtin_add(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    reduce("+", args, 0.0, None, |a, b| Ok(a + b))
}

pub fn builtin_sub(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    reduce("-", args, 0.0, Some(|a| -a), |a, b| Ok(a - b))
}

pub fn builtin_mul(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    reduce("*", args, 1.0, None, |a, b| Ok(a * b))
}

pub fn builtin_div(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    reduce("/", args, 1.0, Some(|a| a), |a, b| {
        if b == 0.0 {
            Err(LispError::DivisionByZero)
        } else {
            Ok(a / b)
        }
    })
}

pub fn builtin_mod(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    reduce("%", args, 0.0, Some(|a| a), |a, b| {
        let b_int = b as i64;
        if b_int == 0 {
            Err(LispError::DivisionByZero)
        } else {
            Ok((a as i64 % b_int) as f64)
        }
    })
}

pub fn builtin_max(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    reduce("max", args, f64::NEG_INFINITY, None, |a, b| Ok(a.max(b)))
}

pub fn builtin_min(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    reduce("min", args, f64::INFINITY, None, |a, b| Ok(a.min(b)))
}

pub fn register(env: &Rc<Environment>) {
    env.put("+".to_string(), Value::builtin("+", builtin_add));
    env.put("-".to_string(), Value::builtin("-", builtin_sub));
    env.put("*".to_string(), Value::builtin("*", builtin_mul));
    env.put("/".to_string(), Value::builtin("/", builtin_div));
    env.put("%".to_string(), Value::builtin("%", builtin_mod));
    env.put("max".to_string(), Value::builtin("max", builtin_max));
    env.put("min".to_string(), Value::builtin("min", builtin_min));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Rc<Environment> {
        Environment::new()
    }

    #[test]
    fn test_add_variadic_and_identity() {
        let e = env();
        assert_eq!(
            builtin_add(&e, vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]),
            Value::Number(6.0)
        );
        assert_eq!(builtin_add(&e, vec![]), Value::Number(0.0));
    }

    #[test]
    fn test_sub_unary_negates() {
        let e = env();
        assert_eq!(builtin_sub(&e, vec![Value::Number(5.0)]), Value::Number(-5.0));
        assert_eq!(
            builtin_sub(&e, vec![Value::Number(10.0), Value::Number(3.0), Value::Number(2.0)]),
            Value::Number(5.0)
        );
    }

    #[test]
    fn test_mul_identity_and_product() {
        let e = env();
        assert_eq!(builtin_mul(&e, vec![]), Value::Number(1.0));
        assert_eq!(
            builtin_mul(&e, vec![Value::Number(2.0), Value::Number(3.0), Value::Number(4.0)]),
            Value::Number(24.0)
        );
    }

    #[test]
    fn test_div_by_zero_is_error() {
        let e = env();
        assert_eq!(
            builtin_div(&e, vec![Value::Number(10.0), Value::Number(0.0)]),
            Value::Error("Division by zero!".to_string())
        );
    }

    #[test]
    fn test_mod_truncates_to_integer() {
        let e = env();
        assert_eq!(
            builtin_mod(&e, vec![Value::Number(17.5), Value::Number(5.0)]),
            Value::Number(2.0)
        );
        assert_eq!(
            builtin_mod(&e, vec![Value::Number(10.0), Value::Number(0.0)]),
            Value::Error("Division by zero!".to_string())
        );
    }

    #[test]
    fn test_max_and_min() {
        let e = env();
        assert_eq!(
            builtin_max(&e, vec![Value::Number(3.0), Value::Number(9.0), Value::Number(2.0)]),
            Value::Number(9.0)
        );
        assert_eq!(
            builtin_min(&e, vec![Value::Number(3.0), Value::Number(9.0), Value::Number(2.0)]),
            Value::Number(2.0)
        );
    }

    #[test]
    fn test_non_number_argument_is_type_error() {
        let e = env();
        assert_eq!(
            builtin_add(&e, vec![Value::Number(1.0), Value::Symbol("x".to_string())]),
            Value::Error(
                "Function '+' passed incorrect type for argument 1. Got Symbol, expected Number."
                    .to_string()
            )
        );
    }
}
