use error_snippet_derive::Diagnostic;

#[derive(Diagnostic, Debug)]
#[diagnostic(
    message = "could not read signatures from {path}",
    code = "CLI0001",
    help = "Is the input path correct?"
)]
pub struct CouldNotReadInput {
    pub path: String,

    #[related(collection)]
    pub inner: Vec<error_snippet::Error>,
}

#[derive(Diagnostic, Debug)]
#[diagnostic(message = "could not mangle {signature:?}", code = "CLI0002")]
pub struct CouldNotMangle {
    pub signature: String,

    #[related(collection)]
    pub inner: Vec<error_snippet::Error>,
}

#[derive(Diagnostic, Debug)]
#[diagnostic(
    message = "{signature:?} cannot be mangled in any of the checked versions",
    code = "CLI0003",
    help = "remove or replace the unsupported parameters"
)]
pub struct NotEncodable {
    pub signature: String,

    #[related(collection)]
    pub inner: Vec<error_snippet::Error>,
}

#[derive(Diagnostic, Debug)]
#[diagnostic(
    message = "stopped at line {line}, after the first failing signature",
    code = "CLI0004",
    help = "use `--keep-going` to mangle all signatures"
)]
pub struct BatchAborted {
    pub line: usize,
}

#[cfg(test)]
mod tests {
    use error_snippet::{Diagnostic, SimpleDiagnostic};

    use super::*;

    #[test]
    fn test_related_collection() {
        let diag = NotEncodable {
            signature: String::from("foo(queue_t)"),
            inner: vec![
                SimpleDiagnostic::new("Type queue_t is not supported in SPIR 1.2").into(),
                SimpleDiagnostic::new("Type queue_t is not supported in SPIR 2.0").into(),
            ],
        };

        let related = diag.related().map(|diag| diag.message()).collect::<Vec<_>>();

        assert_eq!(
            related,
            [
                "Type queue_t is not supported in SPIR 1.2",
                "Type queue_t is not supported in SPIR 2.0"
            ]
        );
    }
}
