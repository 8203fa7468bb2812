// ABOUTME: Evaluator: symbol lookup, S-Expression reduction, function call

use crate::env::Environment;
use crate::error::LispError;
use crate::value::{Function, Value};
use std::rc::Rc;

/// Reduces `expr` to a value in `env`. Never returns a Rust-level error —
/// any failure is folded into a `Value::Error` and returned as the result,
/// per the Language's error-as-value model.
pub fn eval(env: &Rc<Environment>, expr: Value) -> Value {
    match expr {
        Value::Symbol(name) => env.get(&name),
        Value::SExpr(items) => eval_sexpr(env, items),
        other => other,
    }
}

fn eval_sexpr(env: &Rc<Environment>, items: Vec<Value>) -> Value {
    let mut evaluated: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        let v = eval(env, item);
        if v.is_error() {
            return v;
        }
        evaluated.push(v);
    }

    if evaluated.is_empty() {
        return Value::SExpr(evaluated);
    }
    if evaluated.len() == 1 {
        return evaluated.pop().expect("checked non-empty above");
    }

    let first = evaluated.remove(0);
    let func = match first {
        Value::Function(f) => f,
        other => return LispError::NotAFunction { got: other.type_name().to_string() }.into(),
    };
    call(env, func, evaluated)
}

/// Applies `func` to the already-evaluated `args`. A builtin is called
/// directly; a lambda binds formals to args one at a time, handling
/// variadic `& rest` and partial application (see `spec.md` §4.5).
pub fn call(env: &Rc<Environment>, func: Function, mut args: Vec<Value>) -> Value {
    match func {
        Function::Builtin { func, .. } => func(env, args),
        Function::Lambda { formals, body, env: lambda_env } => {
            let given = args.len();
            let mut formals = match *formals {
                Value::QExpr(items) => items,
                other => other
                    .children()
                    .map(|c| c.to_vec())
                    .unwrap_or_default(),
            };
            let total = formals.len();

            while !args.is_empty() {
                if formals.is_empty() {
                    return LispError::TooManyArgs { got: given, expected: total }.into();
                }
                let sym = formals.remove(0);
                let sym_name = match &sym {
                    Value::Symbol(s) => s.clone(),
                    other => return LispError::NonSymbolFormal { got: other.type_name().to_string() }.into(),
                };

                if sym_name == "&" {
                    if formals.len() != 1 {
                        return LispError::VariadicFormat.into();
                    }
                    let rest_name = match formals.remove(0) {
                        Value::Symbol(s) => s,
                        other => return LispError::NonSymbolFormal { got: other.type_name().to_string() }.into(),
                    };
                    let rest_args = std::mem::take(&mut args);
                    lambda_env.put(rest_name, Value::QExpr(rest_args));
                    break;
                }

                let val = args.remove(0);
                lambda_env.put(sym_name, val);
            }

            if formals.first().map(|v| matches!(v, Value::Symbol(s) if s == "&")) == Some(true) {
                if formals.len() != 2 {
                    return LispError::VariadicFormat.into();
                }
                let rest_name = match formals.remove(1) {
                    Value::Symbol(s) => s,
                    other => return LispError::NonSymbolFormal { got: other.type_name().to_string() }.into(),
                };
                formals.remove(0);
                lambda_env.put(rest_name, Value::QExpr(vec![]));
            }

            if formals.is_empty() {
                lambda_env.set_parent(Rc::clone(env));
                let body_sexpr = match *body {
                    Value::QExpr(items) => Value::SExpr(items),
                    other => other,
                };
                eval(&lambda_env, body_sexpr)
            } else {
                Value::Function(Function::Lambda {
                    formals: Box::new(Value::QExpr(formals)),
                    body: Box::new(*body),
                    env: lambda_env,
                })
            }
        }
    }
}
