//! List-surgery operations: `list head tail eval join`, all operating on
//! Q-Expressions per `spec.md` §4.4.

use crate::env::Environment;
use crate::error::LispError;
use crate::eval::eval;
use crate::value::Value;
use std::rc::Rc;

fn expect_qexpr(name: &str, index: usize, v: Value) -> Result<Vec<Value>, LispError> {
    match v {
        Value::QExpr(items) => Ok(items),
        other => Err(LispError::type_mismatch(name, index, &other, "Q-Expression")),
    }
}

/// Re-tags the call-site S-Expression of arguments as a Q-Expression.
pub fn builtin_list(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    Value::QExpr(args)
}

pub fn builtin_head(_env: &Rc<Environment>, mut args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return LispError::arity("head", args.len(), "1").into();
    }
    let items = match expect_qexpr("head", 0, args.remove(0)) {
        Ok(items) => items,
        Err(e) => return e.into(),
    };
    if items.is_empty() {
        return LispError::empty_list("head", 0).into();
    }
    Value::QExpr(vec![items.into_iter().next().expect("checked non-empty")])
}

pub fn builtin_tail(_env: &Rc<Environment>, mut args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return LispError::arity("tail", args.len(), "1").into();
    }
    let mut items = match expect_qexpr("tail", 0, args.remove(0)) {
        Ok(items) => items,
        Err(e) => return e.into(),
    };
    if items.is_empty() {
        return LispError::empty_list("tail", 0).into();
    }
    items.remove(0);
    Value::QExpr(items)
}

/// Re-tags a single Q-Expression argument as an S-Expression and evaluates
/// it in `env`.
pub fn builtin_eval(env: &Rc<Environment>, mut args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return LispError::arity("eval", args.len(), "1").into();
    }
    let items = match expect_qexpr("eval", 0, args.remove(0)) {
        Ok(items) => items,
        Err(e) => return e.into(),
    };
    eval(env, Value::SExpr(items))
}

/// Concatenates any number of Q-Expressions in order.
pub fn builtin_join(_env: &Rc<Environment>, args: Vec<Value>) -> Value {
    let mut result = Value::QExpr(vec![]);
    for (i, arg) in args.into_iter().enumerate() {
        let items = match expect_qexpr("join", i, arg) {
            Ok(items) => items,
            Err(e) => return e.into(),
        };
        result = result.join(Value::QExpr(items));
    }
    result
}

pub fn register(env: &Rc<Environment>) {
    env.put("list".to_string(), Value::builtin("list", builtin_list));
    env.put("head".to_string(), Value::builtin("head", builtin_head));
    env.put("tail".to_string(), Value::builtin("tail", builtin_tail));
    env.put("eval".to_string(), Value::builtin("eval", builtin_eval));
    env.put("join".to_string(), Value::builtin("join", builtin_join));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Rc<Environment> {
        Environment::new()
    }

    #[test]
    fn test_list_quotes_arguments() {
        let e = env();
        assert_eq!(
            builtin_list(&e, vec![Value::Number(1.0), Value::Number(2.0)]),
            Value::QExpr(vec![Value::Number(1.0), Value::Number(2.0)])
        );
    }

    #[test]
    fn test_head_returns_first_wrapped_in_qexpr() {
        let e = env();
        let q = Value::QExpr(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]);
        assert_eq!(builtin_head(&e, vec![q]), Value::QExpr(vec![Value::Number(1.0)]));
    }

    #[test]
    fn test_head_of_empty_is_error() {
        let e = env();
        assert_eq!(
            builtin_head(&e, vec![Value::QExpr(vec![])]),
            Value::Error("Function 'head' passed {} for argument 0.".to_string())
        );
    }

    #[test]
    fn test_head_of_sexpr_is_type_error() {
        let e = env();
        assert_eq!(
            builtin_head(&e, vec![Value::SExpr(vec![Value::Number(1.0)])]),
            Value::Error(
                "Function 'head' passed incorrect type for argument 0. Got S-Expression, expected Q-Expression."
                    .to_string()
            )
        );
    }

    #[test]
    fn test_tail_removes_first() {
        let e = env();
        let q = Value::QExpr(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]);
        assert_eq!(
            builtin_tail(&e, vec![q]),
            Value::QExpr(vec![Value::Number(2.0), Value::Number(3.0)])
        );
    }

    #[test]
    fn test_eval_retags_and_evaluates() {
        let e = env();
        crate::builtins::register_builtins(&e);
        let q = Value::QExpr(vec![
            Value::Symbol("+".to_string()),
            Value::Number(1.0),
            Value::Number(2.0),
        ]);
        assert_eq!(builtin_eval(&e, vec![q]), Value::Number(3.0));
    }

    #[test]
    fn test_join_concatenates_multiple() {
        let e = env();
        let a = Value::QExpr(vec![Value::Number(1.0)]);
        let b = Value::QExpr(vec![Value::Number(2.0)]);
        let c = Value::QExpr(vec![Value::Number(3.0)]);
        assert_eq!(
            builtin_join(&e, vec![a, b, c]),
            Value::QExpr(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)])
        );
    }

    #[test]
    fn test_head_join_tail_law() {
        let e = env();
        let q = Value::QExpr(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]);
        let head = builtin_head(&e, vec![q.clone()]);
        let tail = builtin_tail(&e, vec![q.clone()]);
        assert_eq!(builtin_join(&e, vec![head, tail]), q);
    }
}
