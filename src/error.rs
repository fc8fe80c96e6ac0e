//! Centralised error hierarchy for the **Sprig interpreter**.
//!
//! Every stage (scanner, parser, interpreter) converts its failure modes into
//! one of the variants defined here, so the whole crate shares a single
//! `Result<T>` alias and the binary can map each kind to an exit code.
//!
//! The three language-level kinds are disjoint and each is fatal to the run in
//! which it occurs. The module **does not** print diagnostics itself.

use std::fmt;
use std::io;

use log::info;
use thiserror::Error;

use crate::token::{Position, Token, TokenType};

/// Classification of a [`SprigError::Runtime`] failure.
///
/// The `Display` form is a stable kebab-case name used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    UndefinedVariable,
    UndefinedFunction,
    TypeMismatch,
    ArityMismatch,
    DivisionByZero,
    ZeroStep,
    ReturnOutsideFunction,
    NotCallable,
    NotIterable,
    IndexOutOfRange,
    CallDepthExceeded,
    StepLimitExceeded,
}

impl fmt::Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: &'static str = match self {
            RuntimeErrorKind::UndefinedVariable => "undefined-variable",
            RuntimeErrorKind::UndefinedFunction => "undefined-function",
            RuntimeErrorKind::TypeMismatch => "type-mismatch",
            RuntimeErrorKind::ArityMismatch => "arity-mismatch",
            RuntimeErrorKind::DivisionByZero => "division-by-zero",
            RuntimeErrorKind::ZeroStep => "zero-step",
            RuntimeErrorKind::ReturnOutsideFunction => "return-outside-function",
            RuntimeErrorKind::NotCallable => "not-callable",
            RuntimeErrorKind::NotIterable => "not-iterable",
            RuntimeErrorKind::IndexOutOfRange => "index-out-of-range",
            RuntimeErrorKind::CallDepthExceeded => "call-depth-exceeded",
            RuntimeErrorKind::StepLimitExceeded => "step-limit-exceeded",
        };

        f.write_str(name)
    }
}

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SprigError {
    /// Malformed token stream: bad character, unterminated string, bad indentation.
    #[error("[line {line}:{column}] LexError: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,

        /// 1‑based byte column.
        column: usize,
    },

    /// Token stream does not match the grammar.
    #[error("[line {line}:{column}] ParseError: {message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    /// A well-formed program violated a dynamic contract.
    #[error("[line {line}:{column}] RuntimeError ({kind}): {message}")]
    Runtime {
        kind: RuntimeErrorKind,
        message: String,
        line: usize,
        column: usize,
    },

    /// Failure writing program output.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl SprigError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(position: Position, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: at={}, msg={}", position, message);

        SprigError::Lex {
            message,
            line: position.line,
            column: position.column,
        }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(position: Position, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: at={}, msg={}", position, message);

        SprigError::Parse {
            message,
            line: position.line,
            column: position.column,
        }
    }

    /// Parse error of the form `expected X, found Y` at `found`.
    pub fn expected(found: &Token<'_>, expected: &str) -> Self {
        Self::parse(
            found.position(),
            format!("expected {}, found {}", expected, describe(found)),
        )
    }

    /// Helper constructor for the **interpreter**.
    pub fn runtime<S: Into<String>>(kind: RuntimeErrorKind, position: Position, msg: S) -> Self {
        let message: String = msg.into();

        info!(
            "Creating Runtime error: kind={}, at={}, msg={}",
            kind, position, message
        );

        SprigError::Runtime {
            kind,
            message,
            line: position.line,
            column: position.column,
        }
    }

    /// The runtime classification, if this is a runtime error.
    pub fn runtime_kind(&self) -> Option<RuntimeErrorKind> {
        match self {
            SprigError::Runtime { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_lex(&self) -> bool {
        matches!(self, SprigError::Lex { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, SprigError::Parse { .. })
    }

    /// Source position the error points at (if it carries one).
    pub fn position(&self) -> Option<Position> {
        match self {
            SprigError::Lex { line, column, .. }
            | SprigError::Parse { line, column, .. }
            | SprigError::Runtime { line, column, .. } => Some(Position::new(*line, *column)),
            SprigError::Io(_) => None,
        }
    }
}

/// How a token is named in "found ..." messages.
fn describe(token: &Token<'_>) -> String {
    match token.token_type {
        TokenType::NEWLINE => "end of line".to_string(),
        TokenType::INDENT => "indent".to_string(),
        TokenType::DEDENT => "dedent".to_string(),
        TokenType::EOF => "end of input".to_string(),
        _ => format!("'{}'", token.lexeme),
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, SprigError>;
