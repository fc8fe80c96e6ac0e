//! Tree‑walking evaluator for Sprig programs.
//!
//! Statements execute against a chain of [`Environment`]s. `return` travels
//! back up as [`Flow::Return`] in the `Ok` channel, so every error in the `Err`
//! channel is a genuine [`SprigError`] and aborts the run.
//!
//! Output goes through a [`Sink`]. `Vec<String>` captures lines for tests and
//! the [`crate::run`] entry point; `io::Stdout` streams them for the CLI.

use std::cmp::Ordering;
use std::io::{self, Write};
use std::mem;
use std::ops::Range;
use std::rc::Rc;

use log::{debug, info};

use crate::ast::{
    BinaryOp, ElifClause, Expr, IncDecOp, ListMethod, LiteralValue, LogicalOp, Stmt, UnaryOp,
};
use crate::environment::{Env, Environment};
use crate::error::{Result, RuntimeErrorKind, SprigError};
use crate::token::Position;
use crate::value::{Function, Value};

/// Call depth allowed when none is configured.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 200;

/// Destination for the lines produced by `print`.
pub trait Sink {
    fn emit(&mut self, line: &str) -> Result<()>;
}

impl Sink for Vec<String> {
    fn emit(&mut self, line: &str) -> Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

impl Sink for io::Stdout {
    fn emit(&mut self, line: &str) -> Result<()> {
        let mut handle: io::StdoutLock<'_> = self.lock();
        writeln!(handle, "{}", line)?;
        handle.flush()?;
        Ok(())
    }
}

/// Host-imposed execution limits. Neither is part of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Maximum statements executed per [`Interpreter::interpret`] call.
    pub step_limit: Option<u64>,

    /// Maximum nesting of active function calls.
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            step_limit: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// Outcome of executing a statement.
#[derive(Debug)]
pub enum Flow {
    Normal,
    Return(Value),
}

pub struct Interpreter<S: Sink> {
    globals: Env,
    environment: Env,
    sink: S,
    config: InterpreterConfig,
    call_depth: usize,
    steps: u64,
}

impl<S: Sink> Interpreter<S> {
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, InterpreterConfig::default())
    }

    pub fn with_config(sink: S, config: InterpreterConfig) -> Self {
        info!("Initializing Interpreter with {:?}", config);

        let globals: Env = Environment::global();

        Self {
            environment: Rc::clone(&globals),
            globals,
            sink,
            config,
            call_depth: 0,
            steps: 0,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// The persistent top-level scope.
    pub fn globals(&self) -> &Env {
        &self.globals
    }

    /// Interprets a list of statements (a "program") against the global
    /// scope. After an error the interpreter is back at the global scope and
    /// can run further programs.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        debug!("Interpreting {} statements", statements.len());

        self.steps = 0;

        if let Err(e) = self.execute_statements(statements) {
            debug!("Interpretation aborted: {}", e);
            self.environment = Rc::clone(&self.globals);
            self.call_depth = 0;
            return Err(e);
        }

        info!("Interpretation completed successfully");

        Ok(())
    }

    // ───────────────────────── statements ─────────────────────────

    fn execute_statements(&mut self, statements: &[Stmt]) -> Result<Flow> {
        for stmt in statements {
            if let Flow::Return(value) = self.execute(stmt)? {
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal)
    }

    /// Run `statements` with `scope` as the current environment, restoring the
    /// previous one afterwards whether or not they succeed.
    fn execute_block(&mut self, statements: &[Stmt], scope: Env) -> Result<Flow> {
        let previous: Env = mem::replace(&mut self.environment, scope);
        let result: Result<Flow> = self.execute_statements(statements);
        self.environment = previous;

        result
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<Flow> {
        self.tick(stmt)?;

        match stmt {
            Stmt::Function(declaration) => {
                debug!("Defining function '{}'", declaration.name);

                let function: Function = Function {
                    declaration: Rc::clone(declaration),
                    closure: Rc::clone(&self.environment),
                };

                self.environment
                    .borrow_mut()
                    .define(&declaration.name, Value::Function(Rc::new(function)));

                Ok(Flow::Normal)
            }

            Stmt::Var { name, initializer } => {
                let value: Value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Null,
                };

                debug!("Variable '{}' defined with value: {}", name, value);
                self.environment.borrow_mut().define(name, value);

                Ok(Flow::Normal)
            }

            Stmt::Expression(expr) => {
                self.evaluate(expr)?;

                Ok(Flow::Normal)
            }

            Stmt::Print(expr) => {
                let value: Value = self.evaluate(expr)?;
                let line: String = value.to_string();

                debug!("Printed value: {}", line);
                self.sink.emit(&line)?;

                Ok(Flow::Normal)
            }

            Stmt::If {
                condition,
                then_branch,
                elif_branches,
                else_branch,
            } => self.execute_if(condition, then_branch, elif_branches, else_branch.as_deref()),

            Stmt::While { condition, body } => {
                debug!("Entering while loop");

                while self.evaluate(condition)?.is_truthy() {
                    let scope: Env = Environment::child(&self.environment);

                    if let Flow::Return(value) = self.execute_block(body, scope)? {
                        return Ok(Flow::Return(value));
                    }
                }

                debug!("Exited while loop");

                Ok(Flow::Normal)
            }

            Stmt::For {
                variable,
                iterable,
                step,
                body,
                position,
            } => self.execute_for(variable, iterable, step.as_ref(), body, *position),

            Stmt::Return { value, position } => {
                if self.call_depth == 0 {
                    return Err(SprigError::runtime(
                        RuntimeErrorKind::ReturnOutsideFunction,
                        *position,
                        "Cannot return from outside a function.",
                    ));
                }

                let value: Value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Null,
                };

                debug!("Returning value: {}", value);

                Ok(Flow::Return(value))
            }
        }
    }

    /// The selected branch runs in a child scope of the current one.
    fn execute_if(
        &mut self,
        condition: &Expr,
        then_branch: &[Stmt],
        elif_branches: &[ElifClause],
        else_branch: Option<&[Stmt]>,
    ) -> Result<Flow> {
        let mut selected: Option<&[Stmt]> = None;

        if self.evaluate(condition)?.is_truthy() {
            selected = Some(then_branch);
        } else {
            for clause in elif_branches {
                if self.evaluate(&clause.condition)?.is_truthy() {
                    selected = Some(clause.body.as_slice());
                    break;
                }
            }
        }

        match selected.or(else_branch) {
            Some(body) => {
                let scope: Env = Environment::child(&self.environment);

                self.execute_block(body, scope)
            }
            None => Ok(Flow::Normal),
        }
    }

    fn execute_for(
        &mut self,
        variable: &str,
        iterable: &Expr,
        step: Option<&Expr>,
        body: &[Stmt],
        position: Position,
    ) -> Result<Flow> {
        let subject: Value = self.evaluate(iterable)?;

        let step: Option<f64> = match step {
            Some(expr) => match self.evaluate(expr)? {
                Value::Number(n) => Some(n),
                other => {
                    return Err(SprigError::runtime(
                        RuntimeErrorKind::TypeMismatch,
                        expr.position().unwrap_or(position),
                        format!("Loop step must be a number, got {}.", other.kind_name()),
                    ))
                }
            },
            None => None,
        };

        if step == Some(0.0) {
            return Err(SprigError::runtime(
                RuntimeErrorKind::ZeroStep,
                position,
                "Loop step cannot be zero.",
            ));
        }

        debug!("Entering for loop over {}", subject.kind_name());

        match subject {
            Value::Number(bound) => {
                let step: f64 = step.unwrap_or(if bound < 0.0 { -1.0 } else { 1.0 });
                let mut current: f64 = 0.0;

                while (step > 0.0 && current < bound) || (step < 0.0 && current > bound) {
                    if let Flow::Return(value) =
                        self.run_iteration(variable, Value::Number(current), body)?
                    {
                        return Ok(Flow::Return(value));
                    }

                    current += step;
                }

                Ok(Flow::Normal)
            }

            Value::List(items) => self.iterate_sequence(variable, &items, step, body, position),

            Value::String(s) => {
                let chars: Vec<Value> = s.chars().map(|c| Value::String(c.to_string())).collect();

                self.iterate_sequence(variable, &chars, step, body, position)
            }

            other => Err(SprigError::runtime(
                RuntimeErrorKind::NotIterable,
                iterable.position().unwrap_or(position),
                format!("Cannot iterate over a {}.", other.kind_name()),
            )),
        }
    }

    /// Walk `items` by a whole-number stride: forward from the first element
    /// for positive steps, backward from the last for negative ones.
    fn iterate_sequence(
        &mut self,
        variable: &str,
        items: &[Value],
        step: Option<f64>,
        body: &[Stmt],
        position: Position,
    ) -> Result<Flow> {
        let step: f64 = step.unwrap_or(1.0);

        if step.fract() != 0.0 {
            return Err(SprigError::runtime(
                RuntimeErrorKind::TypeMismatch,
                position,
                format!("Step over a sequence must be a whole number, got {}.", step),
            ));
        }

        let stride: i64 = step as i64;
        let len: i64 = items.len() as i64;
        let mut index: i64 = if stride > 0 { 0 } else { len - 1 };

        while (0..len).contains(&index) {
            let item: Value = items[index as usize].clone();

            if let Flow::Return(value) = self.run_iteration(variable, item, body)? {
                return Ok(Flow::Return(value));
            }

            index += stride;
        }

        Ok(Flow::Normal)
    }

    /// One loop pass in a fresh child scope holding the loop variable.
    fn run_iteration(&mut self, variable: &str, value: Value, body: &[Stmt]) -> Result<Flow> {
        let scope: Env = Environment::child(&self.environment);
        scope.borrow_mut().define(variable, value);

        self.execute_block(body, scope)
    }

    fn tick(&mut self, stmt: &Stmt) -> Result<()> {
        self.steps += 1;

        match self.config.step_limit {
            Some(limit) if self.steps > limit => Err(SprigError::runtime(
                RuntimeErrorKind::StepLimitExceeded,
                stmt.position().unwrap_or_default(),
                format!("Step limit of {} exceeded.", limit),
            )),
            _ => Ok(()),
        }
    }

    // ───────────────────────── expressions ────────────────────────

    /// Evaluates an expression and returns a Value.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::String(s.clone()),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Null => Value::Null,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Variable { name, position } => {
                let value: Value = self.environment.borrow().get(name, *position)?;

                Ok(value)
            }

            Expr::Assign {
                name,
                value,
                position,
            } => {
                let value: Value = self.evaluate(value)?;

                self.environment
                    .borrow_mut()
                    .assign(name, value.clone(), *position)?;

                debug!("Assigned value {} to '{}'", value, name);

                Ok(value)
            }

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left: Value = self.evaluate(left)?;

                let decided: bool = match operator {
                    LogicalOp::Or => left.is_truthy(),
                    LogicalOp::And => !left.is_truthy(),
                };

                if decided {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Unary {
                operator,
                right,
                position,
            } => {
                let right: Value = self.evaluate(right)?;

                match (operator, right) {
                    (UnaryOp::Not, value) => Ok(Value::Bool(!value.is_truthy())),
                    (UnaryOp::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
                    (UnaryOp::Negate, other) => Err(SprigError::runtime(
                        RuntimeErrorKind::TypeMismatch,
                        *position,
                        format!("Operand of '-' must be a number, got {}.", other.kind_name()),
                    )),
                }
            }

            Expr::Binary {
                left,
                operator,
                right,
                position,
            } => {
                let left: Value = self.evaluate(left)?;
                let right: Value = self.evaluate(right)?;

                binary(*operator, left, right, *position)
            }

            Expr::PostfixIncDec {
                name,
                operator,
                position,
            } => self.evaluate_inc_dec(name, *operator, *position),

            Expr::Membership {
                left,
                negated,
                right,
                position,
            } => {
                let needle: Value = self.evaluate(left)?;
                let haystack: Value = self.evaluate(right)?;
                let found: bool = contains(&haystack, &needle, *negated, *position)?;

                Ok(Value::Bool(found != *negated))
            }

            Expr::Call {
                callee,
                arguments,
                position,
            } => self.evaluate_call(callee, arguments, *position),

            Expr::Index {
                object,
                index,
                position,
            } => {
                let object: Value = self.evaluate(object)?;
                let index: Value = self.evaluate(index)?;

                index_value(&object, &index, *position)
            }

            Expr::Slice {
                object,
                start,
                end,
                position,
            } => {
                let object: Value = self.evaluate(object)?;
                let start: Option<Value> = match start {
                    Some(expr) => Some(self.evaluate(expr)?),
                    None => None,
                };
                let end: Option<Value> = match end {
                    Some(expr) => Some(self.evaluate(expr)?),
                    None => None,
                };

                slice_value(&object, start.as_ref(), end.as_ref(), *position)
            }

            Expr::MethodCall {
                receiver,
                method,
                arguments,
                position,
            } => self.evaluate_method(receiver, *method, arguments, *position),

            Expr::List { items, .. } => {
                let mut values: Vec<Value> = Vec::with_capacity(items.len());

                for item in items {
                    values.push(self.evaluate(item)?);
                }

                Ok(Value::List(Rc::new(values)))
            }
        }
    }

    /// Write `old ± 1` back to the owning scope and yield `old`.
    fn evaluate_inc_dec(&mut self, name: &str, operator: IncDecOp, position: Position) -> Result<Value> {
        let old: Value = self.environment.borrow().get(name, position)?;

        let n: f64 = match old {
            Value::Number(n) => n,
            ref other => {
                return Err(SprigError::runtime(
                    RuntimeErrorKind::TypeMismatch,
                    position,
                    format!(
                        "Operand of '{}' must be a number, got {}.",
                        operator.symbol(),
                        other.kind_name()
                    ),
                ))
            }
        };

        self.environment
            .borrow_mut()
            .assign(name, Value::Number(n + operator.delta()), position)?;

        Ok(old)
    }

    /// List methods work on the list bound to `receiver`. Mutating methods
    /// bind a new list to the name; other holders of the old list keep it.
    fn evaluate_method(
        &mut self,
        receiver: &str,
        method: ListMethod,
        arguments: &[Expr],
        position: Position,
    ) -> Result<Value> {
        let target: Value = self.environment.borrow().get(receiver, position)?;

        let items: Rc<Vec<Value>> = match target {
            Value::List(items) => items,
            other => {
                return Err(SprigError::runtime(
                    RuntimeErrorKind::TypeMismatch,
                    position,
                    format!(
                        "Method '{}' needs a list, but '{}' is a {}.",
                        method.name(),
                        receiver,
                        other.kind_name()
                    ),
                ))
            }
        };

        let mut args: Vec<Value> = Vec::with_capacity(arguments.len());

        for argument in arguments {
            args.push(self.evaluate(argument)?);
        }

        debug!("Calling list method '{}' on '{}'", method.name(), receiver);

        match (method, args.as_slice()) {
            (ListMethod::Len, []) => return Ok(Value::Number(items.len() as f64)),
            (ListMethod::Index, [needle]) => {
                let found: Option<usize> = items.iter().position(|item| item.is_equal(needle));

                return Ok(Value::Number(found.map_or(-1.0, |i| i as f64)));
            }
            _ => {}
        }

        let mut list: Vec<Value> = items.to_vec();

        let result: Value = match (method, args.as_slice()) {
            (ListMethod::Push, [value]) => {
                list.push(value.clone());
                Value::Null
            }
            (ListMethod::Pop, []) => list.pop().ok_or_else(|| {
                SprigError::runtime(
                    RuntimeErrorKind::IndexOutOfRange,
                    position,
                    "Cannot pop from an empty list.",
                )
            })?,
            (ListMethod::Remove, [index]) => {
                let index: usize = index_within(index, list.len(), position)?;
                list.remove(index)
            }
            (ListMethod::InsertAt, [index, value]) => {
                let index: usize = index_within(index, list.len() + 1, position)?;
                list.insert(index, value.clone());
                Value::Null
            }
            (ListMethod::Sort, []) => {
                sort_values(&mut list, position)?;
                Value::List(Rc::new(list.clone()))
            }
            _ => {
                return Err(SprigError::runtime(
                    RuntimeErrorKind::ArityMismatch,
                    position,
                    format!(
                        "Method '{}' expects {} arguments but got {}.",
                        method.name(),
                        method.arity(),
                        args.len()
                    ),
                ))
            }
        };

        self.environment
            .borrow_mut()
            .assign(receiver, Value::List(Rc::new(list)), position)?;

        Ok(result)
    }

    fn evaluate_call(&mut self, callee: &Expr, arguments: &[Expr], position: Position) -> Result<Value> {
        let callee_value: Value = match callee {
            Expr::Variable { name, .. } => {
                let found: Option<Value> = self.environment.borrow().lookup(name);

                found.ok_or_else(|| {
                    SprigError::runtime(
                        RuntimeErrorKind::UndefinedFunction,
                        position,
                        format!("Undefined function '{}'.", name),
                    )
                })?
            }
            other => self.evaluate(other)?,
        };

        let function: Rc<Function> = match callee_value {
            Value::Function(function) => function,
            other => {
                return Err(SprigError::runtime(
                    RuntimeErrorKind::NotCallable,
                    position,
                    format!("Can only call functions, got {}.", other.kind_name()),
                ))
            }
        };

        let mut args: Vec<Value> = Vec::with_capacity(arguments.len());

        for argument in arguments {
            args.push(self.evaluate(argument)?);
        }

        self.call_function(function, args, position)
    }

    fn call_function(&mut self, function: Rc<Function>, args: Vec<Value>, position: Position) -> Result<Value> {
        debug!("Calling function '{}'", function.name());

        if args.len() != function.arity() {
            return Err(SprigError::runtime(
                RuntimeErrorKind::ArityMismatch,
                position,
                format!(
                    "Function '{}' expects {} arguments but got {}.",
                    function.name(),
                    function.arity(),
                    args.len()
                ),
            ));
        }

        if self.call_depth >= self.config.max_call_depth {
            return Err(SprigError::runtime(
                RuntimeErrorKind::CallDepthExceeded,
                position,
                format!(
                    "Maximum call depth of {} exceeded.",
                    self.config.max_call_depth
                ),
            ));
        }

        // Parented to the closure, not the caller.
        let scope: Env = Environment::child(&function.closure);
        {
            let mut frame = scope.borrow_mut();
            for (param, arg) in function.declaration.params.iter().zip(args) {
                frame.define(param, arg);
            }
        }

        self.call_depth += 1;
        let result: Result<Flow> = self.execute_block(&function.declaration.body, scope);
        self.call_depth -= 1;

        let value: Value = match result? {
            Flow::Normal => Value::Null,
            Flow::Return(value) => value,
        };

        debug!("Function '{}' returned: {}", function.name(), value);

        Ok(value)
    }
}

fn binary(operator: BinaryOp, left: Value, right: Value, position: Position) -> Result<Value> {
    match operator {
        BinaryOp::Equal => return Ok(Value::Bool(left.is_equal(&right))),
        BinaryOp::NotEqual => return Ok(Value::Bool(!left.is_equal(&right))),
        _ => {}
    }

    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match operator {
            BinaryOp::Add => Ok(Value::Number(a + b)),
            BinaryOp::Subtract => Ok(Value::Number(a - b)),
            BinaryOp::Multiply => Ok(Value::Number(a * b)),
            BinaryOp::Divide if b == 0.0 => Err(SprigError::runtime(
                RuntimeErrorKind::DivisionByZero,
                position,
                "Division by zero.",
            )),
            BinaryOp::Divide => Ok(Value::Number(a / b)),
            BinaryOp::Greater => Ok(Value::Bool(a > b)),
            BinaryOp::GreaterEqual => Ok(Value::Bool(a >= b)),
            BinaryOp::Less => Ok(Value::Bool(a < b)),
            BinaryOp::LessEqual => Ok(Value::Bool(a <= b)),
            BinaryOp::Equal | BinaryOp::NotEqual => Ok(Value::Bool(false)),
        },

        (Value::String(a), Value::String(b)) => match operator {
            BinaryOp::Add => Ok(Value::String(a + &b)),
            BinaryOp::Greater => Ok(Value::Bool(a > b)),
            BinaryOp::GreaterEqual => Ok(Value::Bool(a >= b)),
            BinaryOp::Less => Ok(Value::Bool(a < b)),
            BinaryOp::LessEqual => Ok(Value::Bool(a <= b)),
            _ => Err(mismatch(operator, "numbers", "string", "string", position)),
        },

        (a, b) => {
            let expected: &str = match operator {
                BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide => "numbers",
                _ => "two numbers or two strings",
            };

            Err(mismatch(operator, expected, a.kind_name(), b.kind_name(), position))
        }
    }
}

fn mismatch(operator: BinaryOp, expected: &str, left: &str, right: &str, position: Position) -> SprigError {
    SprigError::runtime(
        RuntimeErrorKind::TypeMismatch,
        position,
        format!(
            "Operands of '{}' must be {}, got {} and {}.",
            operator.symbol(),
            expected,
            left,
            right
        ),
    )
}

/// Substring test for strings, element test for lists.
fn contains(haystack: &Value, needle: &Value, negated: bool, position: Position) -> Result<bool> {
    let operator: &str = if negated { "not in" } else { "in" };

    match haystack {
        Value::String(text) => match needle {
            Value::String(part) => Ok(text.contains(part.as_str())),
            other => Err(SprigError::runtime(
                RuntimeErrorKind::TypeMismatch,
                position,
                format!(
                    "Left operand of '{}' must be a string when searching a string, got {}.",
                    operator,
                    other.kind_name()
                ),
            )),
        },

        Value::List(items) => Ok(items.iter().any(|item| item.is_equal(needle))),

        other => Err(SprigError::runtime(
            RuntimeErrorKind::TypeMismatch,
            position,
            format!(
                "Right operand of '{}' must be a string or a list, got {}.",
                operator,
                other.kind_name()
            ),
        )),
    }
}

/// A whole-number `index` in `0..len`.
fn index_within(index: &Value, len: usize, position: Position) -> Result<usize> {
    let n: f64 = match index {
        Value::Number(n) if n.fract() == 0.0 => *n,
        Value::Number(n) => {
            return Err(SprigError::runtime(
                RuntimeErrorKind::TypeMismatch,
                position,
                format!("Index must be a whole number, got {}.", n),
            ))
        }
        other => {
            return Err(SprigError::runtime(
                RuntimeErrorKind::TypeMismatch,
                position,
                format!("Index must be a number, got {}.", other.kind_name()),
            ))
        }
    };

    if n < 0.0 || n >= len as f64 {
        return Err(SprigError::runtime(
            RuntimeErrorKind::IndexOutOfRange,
            position,
            format!("Index {} is out of range for length {}.", index, len),
        ));
    }

    Ok(n as usize)
}

/// `object[index]`: one list element or one character of a string.
fn index_value(object: &Value, index: &Value, position: Position) -> Result<Value> {
    match object {
        Value::List(items) => Ok(items[index_within(index, items.len(), position)?].clone()),

        Value::String(text) => {
            let chars: Vec<char> = text.chars().collect();
            let at: usize = index_within(index, chars.len(), position)?;

            Ok(Value::String(chars[at].to_string()))
        }

        other => Err(SprigError::runtime(
            RuntimeErrorKind::TypeMismatch,
            position,
            format!("Only lists and strings can be indexed, got {}.", other.kind_name()),
        )),
    }
}

/// `object[start:end]` with both bounds inclusive. A missing bound reaches the
/// matching end of the sequence; `start > end` selects nothing.
fn slice_value(
    object: &Value,
    start: Option<&Value>,
    end: Option<&Value>,
    position: Position,
) -> Result<Value> {
    let bounds = |len: usize| -> Result<Range<usize>> {
        let from: usize = match start {
            Some(start) => index_within(start, len, position)?,
            None => 0,
        };
        let to: usize = match end {
            Some(end) => index_within(end, len, position)? + 1,
            None => len,
        };

        Ok(from..to.max(from))
    };

    match object {
        Value::List(items) => Ok(Value::List(Rc::new(items[bounds(items.len())?].to_vec()))),

        Value::String(text) => {
            let chars: Vec<char> = text.chars().collect();

            Ok(Value::String(chars[bounds(chars.len())?].iter().collect()))
        }

        other => Err(SprigError::runtime(
            RuntimeErrorKind::TypeMismatch,
            position,
            format!("Only lists and strings can be sliced, got {}.", other.kind_name()),
        )),
    }
}

/// Ascending sort of a list holding only numbers or only strings.
fn sort_values(items: &mut [Value], position: Position) -> Result<()> {
    let numbers: bool = items.iter().all(|v| matches!(v, Value::Number(_)));
    let strings: bool = items.iter().all(|v| matches!(v, Value::String(_)));

    if !numbers && !strings {
        return Err(SprigError::runtime(
            RuntimeErrorKind::TypeMismatch,
            position,
            "Only lists of numbers or of strings can be sorted.",
        ));
    }

    items.sort_by(|a, b| match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.total_cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => Ordering::Equal,
    });

    Ok(())
}
