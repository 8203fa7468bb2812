//! Comparison and branching: `> < >= <= == != if`.

use crate::env::Environment;
use crate::error::LispError;
use crate::eval::eval;
use crate::value::Value;
use std::rc::Rc;

fn as_number(name: &str, index: usize, v: &Value) -> Result<f64, LispError> {
    match v {
        Value::Number(n) => Ok(*n),
        other => Err(LispError::type_mismatch(name, index, other, "Number")),
    }
}

fn ordering(name: &str, args: Vec<Value>, op: fn(f64, f64) -> bool) -> Value {
    if args.len() != 2 {
        return LispError::arity(name, args.len(), "2").into();
    }
    let a = match as_number(name, 0, &args[0]) {
        Ok(n) => n,
        Err(e) => return e.into(),
    };
    let b = match as_number(name, 1, &args[1]) {
        Ok(n) => n,
        Err(e) => return e.into(),
    };
    Value::Number(if op(a, b) { 1.0 } else { 0.0 })
}

pub fn builtin_gt(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    ordering(">", args, |a, b| a > b)
}

pub fn builtin_lt(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    ordering("<", args, |a, b| a < b)
}

pub fn builtin_ge(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    ordering(">=", args, |a, b| a >= b)
}

pub fn builtin_le(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    ordering("<=", args, |a, b| a <= b)
}

fn compare(name: &str, args: Vec<Value>, negate: bool) -> Value {
    if args.len() != 2 {
        return LispError::arity(name, args.len(), "2").into();
    }
    let equal = args[0] == args[1];
    let result = if negate { !equal } else { equal };
    Value::Number(if result { 1.0 } else { 0.0 })
}

pub fn builtin_eq(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    compare("==", args, false)
}

pub fn builtin_neq(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    compare("!=", args, true)
}

/// `cond` is a Number; `then`/`else` are Q-Expressions, already evaluated to
/// themselves (Q-Expressions self-evaluate) by the time a builtin sees them.
/// Both branches are type-checked unconditionally before selecting one, per
/// `if`'s signature; the unselected branch is never retagged or passed to
/// `eval`, so it never runs.
pub fn builtin_if(env: &Rc<Environment>, mut args: Vec<Value>) -> Value {
    if args.len() != 3 {
        return LispError::arity("if", args.len(), "3").into();
    }
    let else_branch = args.remove(2);
    let then_branch = args.remove(1);
    let cond = match as_number("if", 0, &args[0]) {
        Ok(n) => n,
        Err(e) => return e.into(),
    };

    let then_items = match &then_branch {
        Value::QExpr(items) => items.clone(),
        other => return LispError::type_mismatch("if", 1, other, "Q-Expression").into(),
    };
    let else_items = match &else_branch {
        Value::QExpr(items) => items.clone(),
        other => return LispError::type_mismatch("if", 2, other, "Q-Expression").into(),
    };

    let items = if cond != 0.0 { then_items } else { else_items };
    eval(env, Value::SExpr(items))
}

pub fn register(env: &Rc<Environment>) {
    env.put(">".to_string(), Value::builtin(">", builtin_gt));
    env.put("<".to_string(), Value::builtin("<", builtin_lt));
    env.put(">=".to_string(), Value::builtin(">=", builtin_ge));
    env.put("<=".to_string(), Value::builtin("<=", builtin_le));
    env.put("==".to_string(), Value::builtin("==", builtin_eq));
    env.put("!=".to_string(), Value::builtin("!=", builtin_neq));
    env.put("if".to_string(), Value::builtin("if", builtin_if));
}
