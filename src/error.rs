use std::fmt;

/// Errors that can occur while preparing or running a program.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Loops were not balanced; a matching `[` or `]` was not found.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Encountered a character outside the instruction set `><+-.,[]`.
    #[error("Invalid character: '{ch}' at position {ip}")]
    InvalidCharacter { ch: char, ip: usize },

    /// An input source or output sink failed.
    #[error("I/O error at position {ip}: {source}")]
    Io {
        ip: usize,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    /// Position in the sanitized program the error refers to.
    pub fn position(&self) -> usize {
        match self {
            EngineError::Syntax(err) => err.ip,
            EngineError::InvalidCharacter { ip, .. } => *ip,
            EngineError::Io { ip, .. } => *ip,
        }
    }
}

/// An unmatched loop delimiter found while resolving jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Unmatched {kind} at position {ip}")]
pub struct SyntaxError {
    pub ip: usize,
    pub kind: UnmatchedBracketKind,
}

/// Which side of the loop was unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedBracketKind {
    Open,
    Close,
}

impl fmt::Display for UnmatchedBracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmatchedBracketKind::Open => write!(f, "'['"),
            UnmatchedBracketKind::Close => write!(f, "']'"),
        }
    }
}

/// The number of static input entries did not match the number of `,` instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid input size (expected {expected}, got {got})")]
pub struct InputCountError {
    pub expected: usize,
    pub got: usize,
}

/// A config or flag value that names no I/O mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown I/O mode '{0}'")]
pub struct UnknownIoMode(pub String);
