//! Sources of readable signatures, which are attached to parse diagnostics so
//! the offending part of the input can be highlighted.

use std::path::PathBuf;

#[derive(Hash, Debug, Eq, PartialEq, Clone)]
pub enum SourceName {
    /// The input was given directly, e.g. on the command line or in tests.
    Internal,

    /// The input was read from a file on the file system.
    Real(PathBuf),
}

impl std::fmt::Display for SourceName {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceName::Internal => write!(fmt, "<internal>"),
            SourceName::Real(name) => write!(fmt, "{}", name.to_string_lossy()),
        }
    }
}

/// A single piece of input, containing one or more readable signatures.
#[derive(Debug, PartialEq, Eq)]
pub struct SignatureSource {
    /// Defines where the content of the source came from.
    pub name: SourceName,

    /// Defines the content of the source.
    pub content: String,
}

impl SignatureSource {
    /// Creates a new [`SignatureSource`] read from the given path.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            name: SourceName::Real(path.into()),
            content: content.into(),
        }
    }

    /// Creates a new internal [`SignatureSource`] with the given content.
    pub fn internal(content: impl Into<String>) -> Self {
        Self {
            name: SourceName::Internal,
            content: content.into(),
        }
    }
}

impl error_snippet::Source for SignatureSource {
    fn name(&self) -> Option<&str> {
        match &self.name {
            SourceName::Internal => None,
            SourceName::Real(name) => name.as_os_str().to_str(),
        }
    }

    fn content(&self) -> Box<&str> {
        Box::new(&self.content)
    }
}
