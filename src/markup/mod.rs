//! A single line of console output and the markup inserted into it.
//!
//! Markup is recorded against offsets in the *original* line rather than
//! being spliced in immediately, so that independent annotators can each
//! insert at offsets they computed from the raw text without having to know
//! what other annotators have already added.  The line is only assembled
//! when it is rendered through [`Display`].

use std::borrow::Cow;
use std::fmt::Display;

mod error;

pub use error::MarkupError;

/// Something a line annotator can insert text into.
pub trait Segment {
    /// Insert `text` at byte `offset` of the segment's original content.
    fn insert(&mut self, offset: usize, text: &str) -> Result<(), MarkupError>;
}

/// One line of output along with every piece of markup that has been added
/// to it.
///
/// The line is kept as the raw bytes it was received as, so a line which is
/// not valid UTF-8 is written back out exactly as it came in.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkupText {
    /// The line as it was received, without a line terminator.
    text: Vec<u8>,

    /// Pending insertions, sorted by offset.  Insertions which share an
    /// offset are kept in the order they were added.
    tags: Vec<Tag>,
}

#[derive(Clone, Debug, PartialEq)]
struct Tag {
    offset: usize,
    markup: String,
}

impl MarkupText {
    pub fn new(text: &str) -> MarkupText {
        MarkupText::from_bytes(text.as_bytes())
    }

    /// Creates a line from raw bytes, which need not be valid UTF-8.
    pub fn from_bytes(text: &[u8]) -> MarkupText {
        MarkupText {
            text: text.into(),
            tags: vec![],
        }
    }

    /// The original line without any markup applied.  Invalid UTF-8 is
    /// replaced with U+FFFD; use [`MarkupText::as_bytes`] for the exact line.
    pub fn text(&self) -> Cow<str> {
        String::from_utf8_lossy(&self.text)
    }

    /// The original line, byte for byte, without any markup applied.
    pub fn as_bytes(&self) -> &[u8] {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns true if any markup has been added to this line.
    pub fn has_markup(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Adds `markup` at byte `offset` of the original line.
    ///
    /// The offset must be within the line (the end of the line is allowed)
    /// and must not fall inside a multi-byte character.  If it does, the
    /// line is left unchanged and an error is returned.
    pub fn add_markup(&mut self, offset: usize, markup: &str) -> Result<(), MarkupError> {
        if offset > self.text.len() {
            return Err(MarkupError::OutOfBounds {
                offset,
                len: self.text.len(),
            });
        }

        if !self.is_char_boundary(offset) {
            return Err(MarkupError::NotCharBoundary(offset));
        }

        let idx = self
            .tags
            .iter()
            .position(|t| t.offset > offset)
            .unwrap_or(self.tags.len());
        self.tags.insert(
            idx,
            Tag {
                offset,
                markup: markup.into(),
            },
        );

        Ok(())
    }

    /// Assembles the line with every piece of markup applied.  Bytes of the
    /// original line are copied through untouched.
    pub fn render(&self) -> Vec<u8> {
        let extra: usize = self.tags.iter().map(|t| t.markup.len()).sum();
        let mut out = Vec::with_capacity(self.text.len() + extra);

        let mut last = 0;
        for tag in &self.tags {
            out.extend_from_slice(&self.text[last..tag.offset]);
            out.extend_from_slice(tag.markup.as_bytes());
            last = tag.offset;
        }
        out.extend_from_slice(&self.text[last..]);
        out
    }

    /// An offset is a boundary unless it points at a UTF-8 continuation
    /// byte.  For valid UTF-8 this matches [`str::is_char_boundary`].
    fn is_char_boundary(&self, offset: usize) -> bool {
        match self.text.get(offset) {
            None => offset == self.text.len(),
            Some(b) => b & 0b1100_0000 != 0b1000_0000,
        }
    }
}

impl Display for MarkupText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.render()))
    }
}

impl Segment for MarkupText {
    fn insert(&mut self, offset: usize, text: &str) -> Result<(), MarkupError> {
        self.add_markup(offset, text)
    }
}

impl Segment for String {
    fn insert(&mut self, offset: usize, text: &str) -> Result<(), MarkupError> {
        if offset > self.len() {
            return Err(MarkupError::OutOfBounds {
                offset,
                len: self.len(),
            });
        }

        if !self.is_char_boundary(offset) {
            return Err(MarkupError::NotCharBoundary(offset));
        }

        self.insert_str(offset, text);
        Ok(())
    }
}
