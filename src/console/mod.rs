//! Runs a stream of console output through an annotator.
//!
//! Every stream gets its own [`ConsoleStream`], and with it its own
//! annotator, so separate streams never affect each other's numbering.
//! Annotation is best effort: a line which cannot be annotated is logged and
//! written out as it was received.

use std::io::{BufRead, Write};

use log::{debug, warn};

use crate::{
    annotator::{Annotator, AnnotatorFactory, Context},
    diagnostics::{Tracing, TracingConfig},
    markup::{MarkupText, Segment},
};

/// The processing state for a single stream of output.
pub struct ConsoleStream {
    context: Context,
    annotator: Box<dyn Annotator>,

    /// The number of lines this stream has received, whether or not they
    /// were annotated
    line: u64,

    tracing: TracingConfig,
}

impl ConsoleStream {
    /// Creates a new stream with a fresh annotator from `factory`.
    pub fn new(factory: &dyn AnnotatorFactory, context: Context) -> ConsoleStream {
        debug!("Open console stream {}", context);
        let annotator = factory.new_instance(&context);
        ConsoleStream {
            context,
            annotator,
            line: 0,
            tracing: TracingConfig::Off,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The number of lines this stream has processed
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Run the annotator over the next line of the stream.  Any annotation
    /// error is logged and then dropped.
    pub fn process_segment(&mut self, segment: &mut dyn Segment) {
        self.line += 1;
        if let Err(e) = self.annotator.annotate(&self.context, segment) {
            warn!("annotation is fail: {}: {}", self.context, e);
        }
    }

    /// Annotates one line of output (without its line terminator) and
    /// returns the rendered result.
    pub fn process_line(&mut self, line: &str) -> String {
        String::from_utf8_lossy(&self.process_bytes(line.as_bytes())).into_owned()
    }

    /// Annotates one raw line of output (without its line terminator).  The
    /// bytes of the line are passed through exactly, whether or not they are
    /// valid UTF-8; only the inserted markup is added.
    pub fn process_bytes(&mut self, line: &[u8]) -> Vec<u8> {
        let mut text = MarkupText::from_bytes(line);
        self.process_segment(&mut text);
        let rendered = text.render();
        crate::trace_line!(self, String::from_utf8_lossy(&rendered));
        rendered
    }

    /// Annotates every line read from `reader` and writes the results to
    /// `writer`, preserving each line's terminator.  Returns the number of
    /// lines processed.
    ///
    /// Only I/O errors from the reader or writer are returned; a line which
    /// could not be annotated is still written out.
    pub fn annotate_all<R: BufRead, W: Write>(
        &mut self,
        mut reader: R,
        writer: &mut W,
    ) -> std::io::Result<u64> {
        let start = self.line;
        let mut buf = vec![];
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let (content, ending) = split_line_ending(&buf);
            let rendered = self.process_bytes(content);

            writer.write_all(&rendered)?;
            writer.write_all(ending)?;
        }
        writer.flush()?;

        debug!(
            "Console stream {} processed {} lines",
            self.context,
            self.line - start
        );
        Ok(self.line - start)
    }
}

impl Tracing for ConsoleStream {
    fn set_tracing(&mut self, config: TracingConfig) {
        self.tracing = config;
    }
}

/// Annotates a whole stream with a fresh annotator from `factory`.
pub fn annotate_stream<R: BufRead, W: Write>(
    factory: &dyn AnnotatorFactory,
    context: Context,
    reader: R,
    writer: &mut W,
) -> std::io::Result<u64> {
    ConsoleStream::new(factory, context).annotate_all(reader, writer)
}

/// Splits a raw line into its content and its terminator (`\n`, `\r\n`, or
/// nothing for the final line of a stream).
fn split_line_ending(buf: &[u8]) -> (&[u8], &[u8]) {
    if buf.ends_with(b"\r\n") {
        buf.split_at(buf.len() - 2)
    } else if buf.ends_with(b"\n") {
        buf.split_at(buf.len() - 1)
    } else {
        (buf, &buf[buf.len()..])
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        annotator::{AnnotationError, LineNumberFactory},
        config::Settings,
        markup::MarkupError,
    };

    use super::*;

    use log::Level;

    /// Logger which records every message on the thread that logged it, so
    /// that tests running in parallel only see their own records.
    mod capture {
        use std::cell::RefCell;
        use std::sync::Once;

        use log::{Level, LevelFilter, Log, Metadata, Record};

        struct CaptureLogger;

        static LOGGER: CaptureLogger = CaptureLogger;
        static INIT: Once = Once::new();

        thread_local! {
            static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(vec![]);
        }

        impl Log for CaptureLogger {
            fn enabled(&self, _metadata: &Metadata) -> bool {
                true
            }

            fn log(&self, record: &Record) {
                RECORDS.with(|r| {
                    r.borrow_mut()
                        .push((record.level(), format!("{}", record.args())))
                });
            }

            fn flush(&self) {}
        }

        /// Installs the logger (once per process) and clears any records this
        /// thread has already collected.
        pub fn start() {
            INIT.call_once(|| {
                log::set_logger(&LOGGER).expect("Failed to install test logger");
                log::set_max_level(LevelFilter::Trace);
            });
            RECORDS.with(|r| r.borrow_mut().clear());
        }

        /// Removes and returns the messages this thread logged at `level`.
        pub fn take(level: Level) -> Vec<String> {
            RECORDS.with(|r| {
                r.borrow_mut()
                    .drain(..)
                    .filter(|(l, _)| *l == level)
                    .map(|(_, msg)| msg)
                    .collect()
            })
        }
    }

    fn annotate(enabled: bool, input: &str) -> (String, u64) {
        let settings = Settings::new(enabled);
        let factory = LineNumberFactory::new(&settings);
        let mut out = vec![];
        let n = annotate_stream(&factory, Context::new("test"), input.as_bytes(), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), n)
    }

    /// Annotator that fails on chosen lines, to check that failures do not
    /// escape the stream.
    struct FailOn {
        lines: Vec<u64>,
        line: u64,
    }

    impl Annotator for FailOn {
        fn annotate(
            &mut self,
            _context: &Context,
            segment: &mut dyn Segment,
        ) -> Result<(), AnnotationError> {
            self.line += 1;
            if self.lines.contains(&self.line) {
                Err(AnnotationError::new(
                    self.line,
                    MarkupError::Rejected("simulated failure".into()),
                ))
            } else {
                segment
                    .insert(0, "# ")
                    .map_err(|e| AnnotationError::new(self.line, e))
            }
        }
    }

    #[test]
    fn test_enabled_stream() {
        let (out, n) = annotate(true, "build start\n\nstep 2\n");
        assert_eq!(out, "    1 build start\n    2 \n    3 step 2\n");
        assert_eq!(n, 3);
    }

    #[test]
    fn test_disabled_stream() {
        let (out, n) = annotate(false, "a\nb\n");
        assert_eq!(out, "a\nb\n");
        assert_eq!(n, 2);
    }

    #[test]
    fn test_no_trailing_newline() {
        let (out, n) = annotate(true, "a\nb");
        assert_eq!(out, "    1 a\n    2 b");
        assert_eq!(n, 2);
    }

    #[test]
    fn test_crlf() {
        let (out, _) = annotate(true, "a\r\nb\r\n");
        assert_eq!(out, "    1 a\r\n    2 b\r\n");
    }

    #[test]
    fn test_empty_stream() {
        let (out, n) = annotate(true, "");
        assert_eq!(out, "");
        assert_eq!(n, 0);
    }

    #[test]
    fn test_invalid_utf8_is_kept() {
        let settings = Settings::new(true);
        let factory = LineNumberFactory::new(&settings);
        let mut out = vec![];
        annotate_stream(&factory, Context::new("test"), &b"a\xffb\n"[..], &mut out).unwrap();
        assert_eq!(out, b"    1 a\xffb\n".to_vec());
    }

    #[test]
    fn test_disabled_passes_bytes_through() {
        let settings = Settings::new(false);
        let factory = LineNumberFactory::new(&settings);
        let input = &b"caf\xe9 latin1\r\n\xff\xfe\n"[..];
        let mut out = vec![];
        let n = annotate_stream(&factory, Context::new("test"), input, &mut out).unwrap();
        assert_eq!(out, input.to_vec());
        assert_eq!(n, 2);
    }

    #[test]
    fn test_failure_does_not_abort_stream() {
        let factory = |_: &Context| -> Box<dyn Annotator> {
            Box::new(FailOn {
                lines: vec![2],
                line: 0,
            })
        };
        let mut out = vec![];
        let n = annotate_stream(&factory, Context::new("test"), "a\nb\nc\n".as_bytes(), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "# a\nb\n# c\n");
        assert_eq!(n, 3);
    }

    #[test]
    fn test_failure_is_logged_as_warning() {
        let factory = |_: &Context| -> Box<dyn Annotator> {
            Box::new(FailOn {
                lines: vec![2],
                line: 0,
            })
        };
        let mut stream = ConsoleStream::new(&factory, Context::new("job"));

        capture::start();
        let mut out = vec![];
        stream.annotate_all("a\nb\nc\n".as_bytes(), &mut out).unwrap();
        let warnings = capture::take(Level::Warn);

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("annotation is fail"));
        assert!(warnings[0].contains("L2: Markup rejected: simulated failure"));
        assert_eq!(String::from_utf8(out).unwrap(), "# a\nb\n# c\n");
    }

    #[test]
    fn test_process_segment() {
        let settings = Settings::new(true);
        let factory = LineNumberFactory::new(&settings);
        let mut stream = ConsoleStream::new(&factory, Context::new("job"));

        let mut first = String::from("first");
        let mut second = MarkupText::new("second");
        stream.process_segment(&mut first);
        stream.process_segment(&mut second);

        assert_eq!(first, "    1 first");
        assert_eq!(second.to_string(), "    2 second");
        assert_eq!(stream.line(), 2);
        assert_eq!(stream.context().name(), "job");
    }

    #[test]
    fn test_streams_are_independent() {
        let enabled = Settings::new(true);
        let disabled = Settings::new(false);
        let enabled_factory = LineNumberFactory::new(&enabled);
        let disabled_factory = LineNumberFactory::new(&disabled);

        let mut a = ConsoleStream::new(&enabled_factory, Context::new("a"));
        let mut b = ConsoleStream::new(&disabled_factory, Context::new("b"));
        let mut c = ConsoleStream::new(&enabled_factory, Context::new("c"));

        assert_eq!(a.process_line("x"), "    1 x");
        assert_eq!(b.process_line("x"), "x");
        assert_eq!(a.process_line("y"), "    2 y");
        assert_eq!(c.process_line("x"), "    1 x");
        assert_eq!(b.process_line("y"), "y");
    }

    #[test]
    fn test_tracing_only_one_line() {
        let settings = Settings::new(true);
        let factory = LineNumberFactory::new(&settings);
        let mut stream = ConsoleStream::new(&factory, Context::new("test"));
        stream.set_tracing(TracingConfig::Only(2));

        capture::start();
        let mut out = vec![];
        stream.annotate_all("a\nb\nc\n".as_bytes(), &mut out).unwrap();
        let traces = capture::take(Level::Trace);

        assert_eq!(traces.len(), 1);
        assert!(traces[0].contains("L2"));
        assert!(traces[0].contains("    2 b"));
    }

    #[test]
    fn test_tracing_off() {
        let settings = Settings::new(true);
        let factory = LineNumberFactory::new(&settings);
        let mut stream = ConsoleStream::new(&factory, Context::new("test"));
        stream.set_tracing(TracingConfig::Off);

        capture::start();
        let mut out = vec![];
        stream.annotate_all("a\nb\nc\n".as_bytes(), &mut out).unwrap();
        assert!(capture::take(Level::Trace).is_empty());
    }

    #[test]
    fn test_tracing_does_not_change_output() {
        let settings = Settings::new(true);
        let factory = LineNumberFactory::new(&settings);
        let mut stream = ConsoleStream::new(&factory, Context::new("test"));
        stream.set_tracing(TracingConfig::All);

        let mut out = vec![];
        stream.annotate_all("a\nb\n".as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "    1 a\n    2 b\n");
    }
}
