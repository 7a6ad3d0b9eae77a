use std::ops::Range;
use std::sync::Arc;

use error_snippet_derive::Diagnostic;

use crate::source::SignatureSource;

#[derive(Diagnostic, Debug)]
#[diagnostic(message = "Unexpected character", code = "PARSE0001", help = "Check your signature syntax")]
pub struct UnexpectedCharacter {
    #[span]
    pub source: Arc<SignatureSource>,

    #[label("Unexpected character '{char}'")]
    pub range: Range<usize>,

    pub char: char,
}

#[derive(Diagnostic, Debug)]
#[diagnostic(message = "End of signature", code = "PARSE0002", help = "Has the signature been fully written?")]
pub struct UnexpectedEndOfInput {
    #[span]
    pub source: Arc<SignatureSource>,

    #[label("expected {expected} before the end of the signature")]
    pub range: Range<usize>,

    pub expected: String,
}

#[derive(Diagnostic, Debug)]
#[diagnostic(message = "unexpected token", code = "PARSE0003")]
pub struct UnexpectedToken {
    #[span]
    pub source: Arc<SignatureSource>,

    #[label("expected {expected}, found {actual:?}")]
    pub range: Range<usize>,

    pub expected: String,
    pub actual: String,
}

#[derive(Diagnostic, Debug)]
#[diagnostic(
    message = "qualifier without address space",
    code = "PARSE0004",
    help = "pointer qualifiers must be followed by an address space, such as `__private`"
)]
pub struct DanglingQualifier {
    #[span]
    pub source: Arc<SignatureSource>,

    #[label("qualifier is not followed by an address space")]
    pub range: Range<usize>,
}

#[derive(Diagnostic, Debug)]
#[diagnostic(message = "pointer attributes without pointer", code = "PARSE0005")]
pub struct AttributesWithoutPointer {
    #[span]
    pub source: Arc<SignatureSource>,

    #[label("found {groups} address spaces, but only {pointers} pointer levels")]
    pub range: Range<usize>,

    pub groups: usize,
    pub pointers: usize,
}

#[derive(Diagnostic, Debug)]
#[diagnostic(message = "invalid vector length", code = "PARSE0006")]
pub struct InvalidVectorLength {
    #[span]
    pub source: Arc<SignatureSource>,

    #[label("vector length must be a positive integer")]
    pub range: Range<usize>,
}

#[derive(Diagnostic, Debug)]
#[diagnostic(message = "trailing input after signature", code = "PARSE0007")]
pub struct TrailingInput {
    #[span]
    pub source: Arc<SignatureSource>,

    #[label("unexpected input after the end of the signature")]
    pub range: Range<usize>,
}
