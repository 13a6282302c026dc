//! Tools for watching what the annotators do to individual lines of a
//! stream while debugging.

pub mod config;
mod tracer;

pub use config::{Tracing, TracingConfig};
