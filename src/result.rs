use crate::{annotator::AnnotationError, config::ConfigError};

pub type Result<T> = std::result::Result<T, String>;
pub type AnnotationResult = std::result::Result<(), AnnotationError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
