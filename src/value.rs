// ABOUTME: Value types representing Lissp data: numbers, symbols, errors, functions and lists

use crate::env::Environment;
use std::fmt;
use std::rc::Rc;

/// A builtin primitive: takes the evaluation environment and the (already
/// evaluated) argument list, returns a result value directly — errors are
/// data (`Value::Error`), never a Rust-level `Err` that escapes this call.
pub type BuiltinFn = fn(&Rc<Environment>, Vec<Value>) -> Value;

/// Either a host primitive or a user-defined closure. A single type reflects
/// both, distinguished by variant rather than by an optional builtin slot.
#[derive(Clone)]
pub enum Function {
    Builtin {
        name: &'static str,
        func: BuiltinFn,
    },
    Lambda {
        /// Q-Expression of formal parameter symbols.
        formals: Box<Value>,
        /// Q-Expression body.
        body: Box<Value>,
        /// Environment captured at definition site; owned exclusively by
        /// this lambda. Cloning a lambda deep-clones this environment.
        env: Rc<Environment>,
    },
}

impl Function {
    pub fn name(&self) -> &'static str {
        match self {
            Function::Builtin { name, .. } => name,
            Function::Lambda { .. } => "\\",
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Builtin { name, .. } => write!(f, "Builtin({name})"),
            Function::Lambda { formals, body, .. } => {
                write!(f, "Lambda({formals:?}, {body:?})")
            }
        }
    }
}

#[derive(Debug)]
pub enum Value {
    Number(f64),
    Error(String),
    Symbol(String),
    Function(Function),
    /// Evaluated by reduction: apply the first child to the rest.
    SExpr(Vec<Value>),
    /// Inert unless explicitly re-tagged via `eval`.
    QExpr(Vec<Value>),
}

impl Value {
    pub fn sexpr(items: Vec<Value>) -> Value {
        Value::SExpr(items)
    }

    pub fn qexpr(items: Vec<Value>) -> Value {
        Value::QExpr(items)
    }

    pub fn builtin(name: &'static str, func: BuiltinFn) -> Value {
        Value::Function(Function::Builtin { name, func })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Error(_) => "Error",
            Value::Symbol(_) => "Symbol",
            Value::Function(_) => "Function",
            Value::SExpr(_) => "S-Expression",
            Value::QExpr(_) => "Q-Expression",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Children of an S/Q-Expression, or `None` for any other variant.
    pub fn children(&self) -> Option<&[Value]> {
        match self {
            Value::SExpr(items) | Value::QExpr(items) => Some(items),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::SExpr(items) | Value::QExpr(items) => Some(items),
            _ => None,
        }
    }

    /// Appends `child`, transferring its ownership into this expression.
    /// Panics if called on a non-expression value — callers only do this
    /// on freshly-constructed S/Q-Expressions.
    pub fn add_child(&mut self, child: Value) {
        self.children_mut()
            .expect("add_child on non-expression value")
            .push(child);
    }

    /// Removes and returns the i-th child, preserving the order of the rest.
    pub fn pop(&mut self, i: usize) -> Value {
        self.children_mut()
            .expect("pop on non-expression value")
            .remove(i)
    }

    /// `pop(i)` followed by discarding the (now-shorter) parent.
    pub fn take(mut self, i: usize) -> Value {
        self.pop(i)
    }

    /// Appends every child of `other` onto `self`, in order, consuming
    /// `other`. Returns `self`.
    pub fn join(mut self, mut other: Value) -> Value {
        let other_items = std::mem::take(
            other
                .children_mut()
                .expect("join on non-expression value"),
        );
        self.children_mut()
            .expect("join on non-expression value")
            .extend(other_items);
        self
    }

    /// Re-tags an S-Expression as a Q-Expression, keeping the same
    /// children. Panics on any other variant.
    pub fn retag_as_qexpr(self) -> Value {
        match self {
            Value::SExpr(items) | Value::QExpr(items) => Value::QExpr(items),
            other => panic!("retag_as_qexpr on {}", other.type_name()),
        }
    }

    /// Re-tags a Q-Expression as an S-Expression, keeping the same
    /// children. Panics on any other variant.
    pub fn retag_as_sexpr(self) -> Value {
        match self {
            Value::SExpr(items) | Value::QExpr(items) => Value::SExpr(items),
            other => panic!("retag_as_sexpr on {}", other.type_name()),
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Number(n) => Value::Number(*n),
            Value::Error(s) => Value::Error(s.clone()),
            Value::Symbol(s) => Value::Symbol(s.clone()),
            Value::SExpr(items) => Value::SExpr(items.clone()),
            Value::QExpr(items) => Value::QExpr(items.clone()),
            Value::Function(Function::Builtin { name, func }) => {
                Value::Function(Function::Builtin { name, func: *func })
            }
            Value::Function(Function::Lambda { formals, body, env }) => {
                Value::Function(Function::Lambda {
                    formals: formals.clone(),
                    body: body.clone(),
                    env: env.deep_clone(),
                })
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::SExpr(a), Value::SExpr(b)) | (Value::QExpr(a), Value::QExpr(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => match (a, b) {
                (Function::Builtin { func: f1, .. }, Function::Builtin { func: f2, .. }) => {
                    std::ptr::eq(*f1 as *const (), *f2 as *const ())
                }
                (
                    Function::Lambda {
                        formals: f1, body: b1, ..
                    },
                    Function::Lambda {
                        formals: f2, body: b2, ..
                    },
                ) => f1 == f2 && b1 == b2,
                _ => false,
            },
            _ => false,
        }
    }
}

fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return if n.is_nan() {
            "nan".to_string()
        } else if n > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    let mut buf = ryu::Buffer::new();
    let formatted = buf.format_finite(n);
    // ryu always emits a decimal point (e.g. "6.0"); Lissp prints whole
    // numbers without one, matching the original's `%g` output for them.
    match formatted.strip_suffix(".0") {
        Some(stripped) => stripped.to_string(),
        None => formatted.to_string(),
    }
}

fn write_expr(f: &mut fmt::Formatter<'_>, items: &[Value], open: char, close: char) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Error(msg) => write!(f, "Error: {msg}"),
            Value::Symbol(s) => write!(f, "{s}"),
            Value::Function(Function::Builtin { .. }) => write!(f, "<builtin>"),
            Value::Function(Function::Lambda { formals, body, .. }) => {
                write!(f, "(\\ {formals} {body})")
            }
            Value::SExpr(items) => write_expr(f, items, '(', ')'),
            Value::QExpr(items) => write_expr(f, items, '{', '}'),
        }
    }
}
