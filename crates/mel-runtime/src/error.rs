//! Runtime errors and the C ABI error slot.

use std::cell::Cell;
use std::fmt;
use thiserror::Error;

/// Numeric type a conversion was targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Int,
    Float,
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericKind::Int => write!(f, "integer"),
            NumericKind::Float => write!(f, "float"),
        }
    }
}

/// An error surfaced to generated code.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("end of input")]
    EndOfInput,

    #[error("invalid {kind} literal: {text:?}")]
    Parse { kind: NumericKind, text: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RuntimeError {
    pub(crate) fn parse(kind: NumericKind, text: impl Into<String>) -> Self {
        RuntimeError::Parse {
            kind,
            text: text.into(),
        }
    }

    /// Code stored in the thread-local error slot for this error.
    ///
    /// I/O faults have no code: the C ABI treats them as fatal.
    pub fn code(&self) -> Option<i64> {
        match self {
            RuntimeError::EndOfInput => Some(ERR_END_OF_INPUT),
            RuntimeError::Parse { .. } => Some(ERR_PARSE),
            RuntimeError::Io(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// No error pending.
pub const ERR_NONE: i64 = 0;
/// A read call hit end of input.
pub const ERR_END_OF_INPUT: i64 = 1;
/// A numeric conversion rejected its text.
pub const ERR_PARSE: i64 = 2;

thread_local! {
    static CURRENT_ERROR: Cell<i64> = const { Cell::new(ERR_NONE) };
}

pub(crate) fn set_error(code: i64) {
    CURRENT_ERROR.with(|e| e.set(code));
}

/// Hand a result to C ABI code: errors become the slot code and a default
/// return value. I/O faults end the process.
pub(crate) fn settle<T: Default>(result: Result<T>) -> T {
    result.unwrap_or_else(|err| match err.code() {
        Some(code) => {
            tracing::debug!(%err, code, "error returned to caller");
            set_error(code);
            T::default()
        }
        None => fatal(&err),
    })
}

pub(crate) fn fatal(err: &RuntimeError) -> ! {
    eprintln!("fatal: {}", err);
    std::process::exit(1);
}

/// Get and clear current error
#[no_mangle]
pub extern "C" fn mel_get_error() -> i64 {
    CURRENT_ERROR.with(|e| e.replace(ERR_NONE))
}

/// Check if there's an error
#[no_mangle]
pub extern "C" fn mel_has_error() -> i64 {
    CURRENT_ERROR.with(|e| (e.get() != ERR_NONE) as i64)
}

/// Clear error
#[no_mangle]
pub extern "C" fn mel_clear_error() {
    CURRENT_ERROR.with(|e| e.set(ERR_NONE));
}
