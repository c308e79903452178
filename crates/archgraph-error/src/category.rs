//! Error categories, one per failure phase

use std::fmt;

/// The phase an error comes from.
///
/// - `Configuration`: the builder was driven incorrectly; fix the calling code
/// - `Validation`: the finished graph or request is inconsistent; nothing was
///   handed to the engine and the builder is untouched
/// - `Resource`: the filesystem refused the output location
/// - `Engine`: the external layout engine failed; its diagnostic is preserved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Resource,
    Engine,
    #[default]
    Internal,
}

impl ErrorCategory {
    /// Get category as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Resource => "resource",
            ErrorCategory::Engine => "engine",
            ErrorCategory::Internal => "internal",
        }
    }

    /// True if the external engine was never reached.
    pub fn is_pre_engine(&self) -> bool {
        !matches!(self, ErrorCategory::Engine)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
