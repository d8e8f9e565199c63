//! Typed errors for parsing, evaluation and operator registration.
//!
//! Each variant carries the offending fragment of the source expression so a
//! top-level failure message points at the exact text that caused it. A call
//! fails with a single terminal error; nothing is accumulated or retried.

use thiserror::Error;

/// Top-level error type, for callers that parse and evaluate in one step.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors produced while turning a source string into a term tree.
/// Always fatal to that parse; no partial tree is returned.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("empty expression")]
    Empty,

    #[error("expected operator before \"...{rest}\"")]
    ExpectedOperator { rest: String },

    #[error("missing operand next to operator ({symbol}) in ({expr})")]
    MissingOperand { symbol: String, expr: String },

    #[error("expected ')' to close group before \"...{rest}\"")]
    UnclosedGroup { rest: String },

    #[error("text remains after expression: {rest}")]
    TrailingText { rest: String },

    #[error("unrecognized argument ({token})")]
    UnrecognizedArgument { token: String },

    #[error("no operator in ({expr}), expecting one of ({expected})")]
    NoOperatorFound { expr: String, expected: String },

    #[error("invalid expression ({expr})")]
    Invalid {
        expr: String,
        #[source]
        source: Box<ParseError>,
    },
}

/// Errors produced while folding a term tree into a value.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("identifier ({name}) not found in context")]
    UnknownIdentifier { name: String },

    #[error("cannot evaluate {left} {symbol} {right}")]
    TypeMismatch {
        left: &'static str,
        symbol: String,
        right: &'static str,
    },

    #[error("cannot evaluate group ({expr})")]
    Group {
        expr: String,
        #[source]
        source: Box<EvalError>,
    },

    #[error("nothing to evaluate")]
    Empty,
}

/// Errors produced by operator registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate operator ({symbol})")]
    Duplicate { symbol: String },

    #[error("invalid operator symbol ({symbol})")]
    Invalid { symbol: String },
}
