// ABOUTME: Environment module: symbol bindings with a mutable parent chain

use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A mapping from symbol name to value, with an optional parent. The parent
/// link is mutable (`RefCell`) because function application re-parents a
/// lambda's captured environment to the caller's environment at call time
/// (see `eval::call`), not at construction time.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: RefCell<Option<Rc<Environment>>>,
}

impl Environment {
    /// A fresh environment with no parent and no bindings — used both for
    /// the root environment and for a lambda's freshly captured scope.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: RefCell::new(None),
        })
    }

    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: RefCell::new(Some(parent)),
        })
    }

    /// Sets (or replaces) this environment's parent link in place.
    pub fn set_parent(&self, parent: Rc<Environment>) {
        *self.parent.borrow_mut() = Some(parent);
    }

    /// Looks up `name` in this environment, then recursively in parents.
    /// Returns a *clone* of the bound value, or an `Unbound symbol` Error
    /// value if no environment in the chain binds it — the miss is data,
    /// not a Rust-level `Option::None`/`Err`, per the Language's model.
    pub fn get(&self, name: &str) -> Value {
        if let Some(value) = self.bindings.borrow().get(name) {
            return value.clone();
        }
        if let Some(parent) = self.parent.borrow().as_ref() {
            return parent.get(name);
        }
        Value::Error(format!("Unbound symbol '{name}'"))
    }

    /// Binds `name` to a clone of `value` in *this* environment only,
    /// replacing any existing binding. This is the Language's `=`.
    pub fn put(&self, name: String, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Walks to the root environment via parent links, then `put`s there.
    /// This is the Language's `def`.
    pub fn def(self: &Rc<Self>, name: String, value: Value) {
        let mut current = Rc::clone(self);
        loop {
            let next = current.parent.borrow().clone();
            match next {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current.put(name, value);
    }

    /// Deep-clones this environment: a new environment sharing the same
    /// parent pointer (shallow) but with every binding deep-cloned, per
    /// the Language's value-semantics-on-write rule. Used whenever a
    /// `Value::Function::Lambda` is cloned, so the clone's captured scope
    /// is exclusively owned by it.
    pub fn deep_clone(self: &Rc<Self>) -> Rc<Environment> {
        let bindings = self
            .bindings
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let parent = self.parent.borrow().clone();
        Rc::new(Environment {
            bindings: RefCell::new(bindings),
            parent: RefCell::new(parent),
        })
    }
}
