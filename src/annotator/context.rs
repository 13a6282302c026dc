/// Identifies the stream of output that an annotator is working on.
///
/// The context is threaded through every call to an [`Annotator`](super::Annotator)
/// so that annotators which care where a line came from can find out; the
/// line number annotator ignores it.
#[derive(Clone, Debug, PartialEq)]
pub struct Context {
    name: String,
}

impl Context {
    pub fn new(name: &str) -> Context {
        Context { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
