//! Annotators decorate each line of a console output stream.
//!
//! An annotator is created by an [`AnnotatorFactory`] once for every stream
//! of output and is then handed each line of that stream, in order, one line
//! at a time.  Annotators never share state with each other, so streams can
//! be processed concurrently without any coordination.

mod context;
mod error;
mod factory;
mod linenumber;

pub use context::Context;
pub use error::AnnotationError;
pub use factory::{AnnotatorFactory, LineNumberFactory};
pub use linenumber::{format_line_number, LineNumberAnnotator, LINE_NUMBER_WIDTH};

use crate::{markup::Segment, result::AnnotationResult};

/// Decorates the lines of a single stream of output.
pub trait Annotator: Send {
    /// Annotate the next line of the stream.
    ///
    /// A failure only affects the given line: the annotator must remain
    /// usable for every line which follows it.
    fn annotate(
        &mut self,
        context: &Context,
        segment: &mut dyn Segment,
    ) -> AnnotationResult;
}
