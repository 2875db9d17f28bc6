use std::fmt;

/// A format error from a persisted gradient file.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatError {
    pub message: String,
    /// 1-based line number where the error occurred.
    pub line: usize,
}

impl FormatError {
    pub(crate) fn new(msg: impl Into<String>, line: usize) -> Self {
        Self { message: msg.into(), line }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gradient file error at line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for FormatError {}
