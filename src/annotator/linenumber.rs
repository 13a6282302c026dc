use log::debug;

use crate::{markup::Segment, result::AnnotationResult};

use super::{AnnotationError, Annotator, Context};

/// The minimum number of columns a line number occupies.  Larger numbers
/// widen the field rather than being truncated.
pub const LINE_NUMBER_WIDTH: usize = 5;

/// Formats a line number as the prefix that is added to the start of a line:
/// right aligned to [`LINE_NUMBER_WIDTH`] and followed by a single space.
pub fn format_line_number(line: u64) -> String {
    format!("{:>width$} ", line, width = LINE_NUMBER_WIDTH)
}

/// Prefixes every line of a stream with its line number.
///
/// Whether numbering is enabled is decided once, when the annotator is
/// created, and does not change for the life of the annotator.  A disabled
/// annotator passes every line through untouched and its counter stays at 0.
#[derive(Debug)]
pub struct LineNumberAnnotator {
    /// The number of the last line that was annotated
    line_number: u64,
    enabled: bool,
}

impl LineNumberAnnotator {
    pub fn new(enabled: bool) -> LineNumberAnnotator {
        debug!("Create line number annotator (enabled: {})", enabled);
        LineNumberAnnotator {
            line_number: 0,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The number of the last line that was annotated, or 0 if no line has
    /// been annotated yet.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }
}

impl Annotator for LineNumberAnnotator {
    fn annotate(
        &mut self,
        _context: &Context,
        segment: &mut dyn Segment,
    ) -> AnnotationResult {
        if !self.enabled {
            return Ok(());
        }

        // The counter advances even if the insertion fails, so that one bad
        // line does not shift the numbering of every line after it.
        self.line_number = self.line_number.saturating_add(1);
        let prefix = format_line_number(self.line_number);
        segment
            .insert(0, &prefix)
            .map_err(|e| AnnotationError::new(self.line_number, e))
    }
}
