use crate::config::Settings;

use super::{Annotator, Context, LineNumberAnnotator};

/// Creates a fresh [`Annotator`] for every new stream of output.
pub trait AnnotatorFactory {
    fn new_instance(&self, context: &Context) -> Box<dyn Annotator>;
}

/// Any function from a [`Context`] to an [`Annotator`] can act as a factory.
impl<F> AnnotatorFactory for F
where
    F: Fn(&Context) -> Box<dyn Annotator>,
{
    fn new_instance(&self, context: &Context) -> Box<dyn Annotator> {
        self(context)
    }
}

/// Creates [`LineNumberAnnotator`]s whose enabled flag is taken from the
/// [`Settings`] at the moment each annotator is created.
pub struct LineNumberFactory<'a> {
    settings: &'a Settings,
}

impl<'a> LineNumberFactory<'a> {
    pub fn new(settings: &'a Settings) -> LineNumberFactory<'a> {
        LineNumberFactory { settings }
    }
}

impl<'a> AnnotatorFactory for LineNumberFactory<'a> {
    fn new_instance(&self, _context: &Context) -> Box<dyn Annotator> {
        Box::new(LineNumberAnnotator::new(self.settings.enable_linenumber()))
    }
}
