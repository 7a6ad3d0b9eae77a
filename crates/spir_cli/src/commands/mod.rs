pub(crate) mod batch;
pub(crate) mod check;
pub(crate) mod mangle;

use std::path::PathBuf;
use std::sync::Arc;

pub(crate) use batch::BatchCommand;
pub(crate) use check::CheckCommand;
pub(crate) use mangle::MangleCommand;
use spir_errors::Result;
use spir_mangle::NameMangler;
use spir_types::parse::SignatureParser;
use spir_types::source::SignatureSource;
use spir_types::{FunctionDescriptor, SpirVersion};

use crate::error::*;

/// Creates the source of a single signature, which was either read from the
/// given path or given directly on the command line.
pub(crate) fn signature_source(path: Option<&PathBuf>, signature: &str) -> Arc<SignatureSource> {
    let source = match path {
        Some(path) => SignatureSource::new(path.clone(), signature),
        None => SignatureSource::internal(signature),
    };

    Arc::new(source)
}

/// Parses the signature in the given source.
pub(crate) fn parse_signature(source: Arc<SignatureSource>) -> Result<FunctionDescriptor> {
    SignatureParser::new(source).parse_signature()
}

/// Parses and mangles the signature in the given source.
pub(crate) fn mangle_signature(source: Arc<SignatureSource>, version: SpirVersion) -> Result<String> {
    let signature = source.content.trim().to_string();
    let desc = parse_signature(source)?;

    NameMangler::new(version).mangle(&desc).map_err(|err| {
        CouldNotMangle {
            signature,
            inner: vec![err.into_diagnostic()],
        }
        .into()
    })
}
