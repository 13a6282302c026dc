use std::fmt::Display;

use crate::markup::MarkupError;

/// Raised when an annotator could not add its markup to a line.
///
/// The error carries the line number that was being inserted so the log
/// shows exactly which line is missing its prefix.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationError {
    line: u64,
    inner: MarkupError,
}

impl AnnotationError {
    pub fn new(line: u64, inner: MarkupError) -> Self {
        AnnotationError { line, inner }
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn inner(&self) -> &MarkupError {
        &self.inner
    }
}

impl Display for AnnotationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}: {}", self.line, self.inner)
    }
}

impl std::error::Error for AnnotationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}
