use std::fmt::Display;

/// Errors which can be encountered while inserting markup into a line
#[derive(Clone, Debug, PartialEq)]
pub enum MarkupError {
    /// The offset is past the end of the line
    OutOfBounds { offset: usize, len: usize },
    /// The offset would split a multi-byte character
    NotCharBoundary(usize),
    /// The segment refused the insertion for a reason of its own
    Rejected(String),
}

impl Display for MarkupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use MarkupError::*;
        match self {
            OutOfBounds { offset, len } => write!(
                f,
                "Offset {} is past the end of a line of length {}",
                offset, len
            ),
            NotCharBoundary(offset) => write!(f, "Offset {} is not on a character boundary", offset),
            Rejected(msg) => write!(f, "Markup rejected: {}", msg),
        }
    }
}

impl std::error::Error for MarkupError {}
