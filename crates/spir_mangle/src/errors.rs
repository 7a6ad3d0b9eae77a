use error_snippet_derive::Diagnostic;
use spir_types::{FunctionDescriptor, SpirVersion};

/// Reasons for why a function could not be mangled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MangleError {
    /// The null descriptor was given, which has no mangled form.
    NullDescriptor,

    /// A parameter type has no encoding in the active SPIR version.
    TypeNotSupported {
        /// Rendering of the offending parameter, as declared in the function.
        ty: String,

        version: SpirVersion,
    },
}

impl MangleError {
    /// Gets the kind of the error, without any of its details.
    pub fn kind(&self) -> MangleErrorKind {
        match self {
            MangleError::NullDescriptor => MangleErrorKind::NullDescriptor,
            MangleError::TypeNotSupported { .. } => MangleErrorKind::TypeNotSupported,
        }
    }

    /// Converts the error into a diagnostic, so it can be reported through a
    /// diagnostics context.
    pub fn into_diagnostic(self) -> error_snippet::Error {
        match self {
            MangleError::NullDescriptor => NullDescriptorError {
                descriptor: String::from(FunctionDescriptor::NULL_STRING),
            }
            .into(),
            MangleError::TypeNotSupported { ty, version } => TypeNotSupportedError { ty, version }.into(),
        }
    }
}

impl std::fmt::Display for MangleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MangleError::NullDescriptor => f.write_str(FunctionDescriptor::NULL_STRING),
            MangleError::TypeNotSupported { ty, version } => {
                write!(f, "Type {ty} is not supported in {version}")
            }
        }
    }
}

/// Outcome of a single mangling call, without any of its details.
#[derive(Hash, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MangleErrorKind {
    Success,
    NullDescriptor,
    TypeNotSupported,
}

impl MangleErrorKind {
    /// Gets the outcome of the given mangling result.
    pub fn of<T>(result: &Result<T, MangleError>) -> MangleErrorKind {
        match result {
            Ok(_) => MangleErrorKind::Success,
            Err(err) => err.kind(),
        }
    }
}

#[derive(Diagnostic, Debug)]
#[diagnostic(
    message = "{descriptor}",
    code = "MANGLE0001",
    help = "the null descriptor has no mangled name; give the function a name"
)]
pub struct NullDescriptorError {
    pub descriptor: String,
}

#[derive(Diagnostic, Debug)]
#[diagnostic(
    message = "Type {ty} is not supported in {version}",
    code = "MANGLE0002",
    help = "try mangling for a later SPIR version, such as `--spir-version 2.0`"
)]
pub struct TypeNotSupportedError {
    pub ty: String,
    pub version: SpirVersion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let unsupported = MangleError::TypeNotSupported {
            ty: String::from("queue_t"),
            version: SpirVersion::Spir12,
        };

        assert_eq!(unsupported.kind(), MangleErrorKind::TypeNotSupported);
        assert_eq!(MangleError::NullDescriptor.kind(), MangleErrorKind::NullDescriptor);

        assert_eq!(MangleErrorKind::of(&Ok::<_, MangleError>(())), MangleErrorKind::Success);
        assert_eq!(MangleErrorKind::of::<()>(&Err(unsupported)), MangleErrorKind::TypeNotSupported);
    }

    #[test]
    fn test_display() {
        let unsupported = MangleError::TypeNotSupported {
            ty: String::from("__global atomic_int *"),
            version: SpirVersion::Spir12,
        };

        assert_eq!(
            unsupported.to_string(),
            "Type __global atomic_int * is not supported in SPIR 1.2"
        );
        assert_eq!(MangleError::NullDescriptor.to_string(), "<invalid>");
    }

    #[test]
    fn test_diagnostic_message_matches_display() {
        let unsupported = MangleError::TypeNotSupported {
            ty: String::from("pipe_ro_t"),
            version: SpirVersion::Spir12,
        };

        let message = unsupported.to_string();
        let diag = unsupported.into_diagnostic();

        assert_eq!(diag.message(), message);
        assert_eq!(MangleError::NullDescriptor.into_diagnostic().message(), "<invalid>");
    }
}
