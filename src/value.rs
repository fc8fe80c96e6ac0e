use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::ast::FunctionDecl;
use crate::environment::Env;

/// A user function paired with the scope it was declared in.
pub struct Function {
    pub declaration: Rc<FunctionDecl>,
    pub closure: Env,
}

impl Function {
    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}

// The closure can reach this function again, so never print it.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.declaration.name)
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    String(String),
    Bool(bool),
    Null,

    /// Immutable ordered container, shared on copy.
    List(Rc<Vec<Value>>),

    Function(Rc<Function>),
}

impl Value {
    /// `null`, `false`, `0`, `""` and `[]` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        let result: bool = match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Function(_) => true,
        };

        debug!("Truthiness of {} is {}", self, result);

        result
    }

    /// Same kind and same contents. Functions compare by identity.
    pub fn is_equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.is_equal(y))
            }
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Kind name used in runtime error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Null => "null",
            Value::List(_) => "list",
            Value::Function(_) => "function",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // 3.0 → "3", 2.5 → "2.5"
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                let mut buf: itoa::Buffer = itoa::Buffer::new();
                f.write_str(buf.format(*n as i64))
            }

            Value::Number(n) => write!(f, "{}", n),

            Value::String(s) => f.write_str(s),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Null => f.write_str("null"),

            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }

            Value::Function(function) => write!(f, "<fn {}>", function.name()),
        }
    }
}
