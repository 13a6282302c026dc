/// Emits a trace record for the current line of a stream if the stream's
/// [`TracingConfig`](crate::diagnostics::TracingConfig) includes that line.
///
/// `$ts` must have a `tracing` field and a `line()` method.
#[macro_export]
macro_rules! trace_line {
    ($ts:expr, $text:expr) => {
        if $ts.tracing.includes($ts.line() as usize) {
            log::trace!(
                "{} <- L{}:{:?}",
                stdext::function_name!(),
                $ts.line(),
                $text
            )
        }
    };
}
