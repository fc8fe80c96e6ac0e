use crate::error::{Result, RuntimeErrorKind, SprigError};
use crate::token::Position;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a scope. Held by the interpreter, by child scopes and by
/// every closure created while the scope was current.
pub type Env = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Env>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Env) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// A fresh global scope, ready to share.
    pub fn global() -> Env {
        Rc::new(RefCell::new(Environment::new()))
    }

    /// A fresh child of `parent`, ready to share.
    pub fn child(parent: &Env) -> Env {
        Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(parent))))
    }

    /// Bind (or rebind) `name` in this scope only.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Walk the chain outward; `None` if no scope binds `name`.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.get(name) {
            Some(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().lookup(name)
        } else {
            None
        }
    }

    pub fn get(&self, name: &str, position: Position) -> Result<Value> {
        self.lookup(name).ok_or_else(|| {
            SprigError::runtime(
                RuntimeErrorKind::UndefinedVariable,
                position,
                format!("Undefined variable '{}'.", name),
            )
        })
    }

    /// Update the nearest existing binding of `name`.
    pub fn assign(&mut self, name: &str, value: Value, position: Position) -> Result<()> {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value, position)
        } else {
            Err(SprigError::runtime(
                RuntimeErrorKind::UndefinedVariable,
                position,
                format!("Undefined variable '{}'.", name),
            ))
        }
    }
}
