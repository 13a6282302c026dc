pub mod result;

pub mod annotator;
pub mod cli;
pub mod config;
pub mod console;
pub mod diagnostics;
pub mod markup;

pub use annotator::{
    format_line_number, AnnotationError, Annotator, AnnotatorFactory, Context,
    LineNumberAnnotator, LineNumberFactory,
};
pub use cli::*;
pub use config::{ConfigError, Settings, SettingsStore};
pub use console::{annotate_stream, ConsoleStream};
pub use markup::{MarkupError, MarkupText, Segment};
