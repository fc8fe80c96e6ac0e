pub mod ast;
pub mod ast_printer;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod token;
pub mod value;

use std::panic;
use std::thread;

use log::info;

use crate::ast::Stmt;
use crate::error::{Result, SprigError};
use crate::interpreter::{Interpreter, InterpreterConfig};
use crate::parser::Parser;
use crate::scanner::Scanner;
use crate::token::Token;

/// Stack reserved for the thread that parses and evaluates a program. Deep
/// recursion in Sprig code is deep recursion in the evaluator, so the default
/// call depth is sized against this rather than the caller's stack.
pub const INTERPRETER_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Everything a run produced: the printed lines, in order, and the error that
/// stopped it, if any. Lines printed before a runtime error are kept.
#[derive(Debug)]
pub struct RunOutput {
    pub lines: Vec<String>,
    pub error: Option<SprigError>,
}

impl RunOutput {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Scan and parse `source` into a program.
pub fn parse_source(source: &str) -> Result<Vec<Stmt>> {
    let tokens: Vec<Token<'_>> = Scanner::tokenize(source)?;

    Parser::new(&tokens).parse()
}

/// Lex, parse and evaluate `source` with the default limits.
pub fn run(source: &str) -> RunOutput {
    run_with_config(source, InterpreterConfig::default())
}

/// Like [`run`], with explicit limits. Evaluation happens on a thread with an
/// [`INTERPRETER_STACK_SIZE`] stack.
pub fn run_with_config(source: &str, config: InterpreterConfig) -> RunOutput {
    match with_interpreter_stack(|| run_here(source, config)) {
        Ok(output) => output,
        Err(error) => RunOutput {
            lines: Vec::new(),
            error: Some(error),
        },
    }
}

/// Run `task` to completion on a scoped thread with an
/// [`INTERPRETER_STACK_SIZE`] stack. A panic in `task` resumes on the caller.
pub fn with_interpreter_stack<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    thread::scope(|scope| -> Result<T> {
        let handle = thread::Builder::new()
            .name("sprig-interpreter".to_string())
            .stack_size(INTERPRETER_STACK_SIZE)
            .spawn_scoped(scope, task)?;

        match handle.join() {
            Ok(value) => Ok(value),
            Err(payload) => panic::resume_unwind(payload),
        }
    })
}

fn run_here(source: &str, config: InterpreterConfig) -> RunOutput {
    let program: Vec<Stmt> = match parse_source(source) {
        Ok(program) => program,
        Err(error) => {
            return RunOutput {
                lines: Vec::new(),
                error: Some(error),
            }
        }
    };

    let mut interpreter: Interpreter<Vec<String>> = Interpreter::with_config(Vec::new(), config);
    let error: Option<SprigError> = interpreter.interpret(&program).err();

    info!("Run finished with {} output lines", interpreter.sink().len());

    RunOutput {
        lines: interpreter.into_sink(),
        error,
    }
}
