use std::fmt;

/// A compile error from a remap expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileError {
    pub message: String,
    /// 1-based source column where the error occurred.
    pub col: usize,
}

impl CompileError {
    pub(crate) fn new(msg: impl Into<String>, col: usize) -> Self {
        Self { message: msg.into(), col }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expression error at column {}: {}", self.col, self.message)
    }
}

impl std::error::Error for CompileError {}
