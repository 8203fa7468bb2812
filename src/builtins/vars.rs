//! Variable-binding builtins `def`/`=`, and lambda construction `\`.

use crate::env::Environment;
use crate::error::LispError;
use crate::value::{Function, Value};
use std::rc::Rc;

fn builtin_var(name: &str, env: &Rc<Environment>, mut args: Vec<Value>, at_root: bool) -> Value {
    if args.is_empty() {
        return LispError::arity(name, 0, "at least 1").into();
    }
    let formals = match args.remove(0) {
        Value::QExpr(items) => items,
        other => return LispError::type_mismatch(name, 0, &other, "Q-Expression").into(),
    };

    if formals.len() != args.len() {
        return LispError::arity(name, args.len(), formals.len().to_string()).into();
    }

    let names: Vec<String> = match formals
        .iter()
        .map(|v| match v {
            Value::Symbol(s) => Ok(s.clone()),
            other => Err(LispError::non_symbol_define(name, other)),
        })
        .collect()
    {
        Ok(n) => n,
        Err(e) => return e.into(),
    };

    for (sym, val) in names.into_iter().zip(args) {
        if at_root {
            env.def(sym, val);
        } else {
            env.put(sym, val);
        }
    }
    Value::SExpr(vec![])
}

pub fn builtin_def(env: &Rc<Environment>, args: Vec<Value>) -> Value {
    builtin_var("def", env, args, true)
}

pub fn builtin_put(env: &Rc<Environment>, args: Vec<Value>) -> Value {
    builtin_var("=", env, args, false)
}

/// `\ {formals} {body}` — produces a Lambda with a fresh, empty captured
/// environment; the caller's environment becomes its parent at call time
/// (`eval::call` step 4), not here.
pub fn builtin_lambda(_env: &Rc<Environment>, mut args: Vec<Value>) -> Value {
    if args.len() != 2 {
        return LispError::arity("\\", args.len(), "2").into();
    }
    let body = args.remove(1);
    let formals = args.remove(0);

    let formal_items = match &formals {
        Value::QExpr(items) => items,
        other => return LispError::type_mismatch("\\", 0, other, "Q-Expression").into(),
    };
    for item in formal_items {
        if !matches!(item, Value::Symbol(_)) {
            return LispError::NonSymbolFormal {
                got: item.type_name().to_string(),
            }
            .into();
        }
    }
    if !matches!(body, Value::QExpr(_)) {
        return LispError::type_mismatch("\\", 1, &body, "Q-Expression").into();
    }

    Value::Function(Function::Lambda {
        formals: Box::new(formals),
        body: Box::new(body),
        env: Environment::new(),
    })
}

pub fn register(env: &Rc<Environment>) {
    env.put("def".to_string(), Value::builtin("def", builtin_def));
    env.put("=".to_string(), Value::builtin("=", builtin_put));
    env.put("\\".to_string(), Value::builtin("\\", builtin_lambda));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Rc<Environment> {
        Environment::new()
    }

    #[test]
    fn test_def_installs_at_root_and_returns_empty_sexpr() {
        let e = env();
        let args = vec![
            Value::QExpr(vec![Value::Symbol("x".to_string())]),
            Value::Number(42.0),
        ];
        assert_eq!(builtin_def(&e, args), Value::SExpr(vec![]));
        assert_eq!(e.get("x"), Value::Number(42.0));
    }

    #[test]
    fn test_put_installs_locally() {
        let e = env();
        let child = Environment::with_parent(e.clone());
        let args = vec![
            Value::QExpr(vec![Value::Symbol("y".to_string())]),
            Value::Number(7.0),
        ];
        builtin_put(&child, args);
        assert_eq!(child.get("y"), Value::Number(7.0));
        assert_eq!(
            e.get("y"),
            Value::Error("Unbound symbol 'y'".to_string())
        );
    }

    #[test]
    fn test_var_arity_mismatch_between_symbols_and_values() {
        let e = env();
        let args = vec![
            Value::QExpr(vec![Value::Symbol("x".to_string()), Value::Symbol("y".to_string())]),
            Value::Number(1.0),
        ];
        assert_eq!(
            builtin_def(&e, args),
            Value::Error(
                "Function 'def' passed incorrect number of arguments. Got 1, expected 2."
                    .to_string()
            )
        );
    }

    #[test]
    fn test_var_non_symbol_formal_is_error() {
        let e = env();
        let args = vec![
            Value::QExpr(vec![Value::Number(1.0)]),
            Value::Number(2.0),
        ];
        assert_eq!(
            builtin_def(&e, args),
            Value::Error(
                "Function 'def' cannot define non-symbol. Got Number, Expected Symbol."
                    .to_string()
            )
        );
    }

    #[test]
    fn test_lambda_construction() {
        let e = env();
        let formals = Value::QExpr(vec![Value::Symbol("x".to_string())]);
        let body = Value::QExpr(vec![Value::Symbol("x".to_string())]);
        let result = builtin_lambda(&e, vec![formals, body]);
        assert!(matches!(result, Value::Function(Function::Lambda { .. })));
    }

    #[test]
    fn test_lambda_non_symbol_formal_is_error() {
        let e = env();
        let formals = Value::QExpr(vec![Value::Number(1.0)]);
        let body = Value::QExpr(vec![]);
        assert_eq!(
            builtin_lambda(&e, vec![formals, body]),
            Value::Error("Cannot define non-symbol. Got Number, Expected Symbol.".to_string())
        );
    }
}
