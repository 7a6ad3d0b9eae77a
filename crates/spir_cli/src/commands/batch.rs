use std::io::Write;
use std::path::{Path, PathBuf};

use clap::ValueHint;
use spir_errors::*;
use spir_types::SpirVersion;

use crate::commands::{mangle_signature, signature_source};
use crate::error::*;

#[derive(Debug, clap::Parser)]
#[command(
    name = "batch",
    about = "Mangles one signature per line, printing each next to its mangled name",
    long_about = None
)]
pub struct BatchCommand {
    #[arg(
        help = "File to read signatures from; reads standard input if omitted or `-`",
        value_hint = ValueHint::FilePath
    )]
    pub file: Option<PathBuf>,

    #[arg(
        short = 's',
        long = "spir-version",
        default_value = "2.0",
        help = "SPIR version to mangle for (`1.2` or `2.0`)"
    )]
    pub spir_version: SpirVersion,

    #[arg(long, help = "Continue with the remaining signatures after a failure")]
    pub keep_going: bool,
}

impl BatchCommand {
    #[allow(clippy::needless_pass_by_value)]
    pub(crate) fn run(&self, dcx: DiagCtxHandle) {
        let path = self.file.as_ref().filter(|path| path.as_path() != Path::new("-"));

        let content = match read_input(path) {
            Ok(content) => content,
            Err(err) => {
                dcx.emit(err);
                return;
            }
        };

        let mut stdout = std::io::stdout().lock();

        if let Err(err) = self.mangle_lines(path, &content, &mut stdout, &dcx) {
            dcx.emit(err);
        }
    }

    /// Mangles every signature in the given content, writing the results into
    /// `out`. Failing signatures are emitted into `dcx`.
    fn mangle_lines(
        &self,
        path: Option<&PathBuf>,
        content: &str,
        out: &mut impl Write,
        dcx: &DiagCtxHandle,
    ) -> Result<()> {
        for (idx, line) in content.lines().enumerate() {
            let signature = line.trim();

            if signature.is_empty() || signature.starts_with('#') {
                continue;
            }

            tracing::debug!(target: "spir_cli", line = idx + 1, signature);

            match mangle_signature(signature_source(path, signature), self.spir_version) {
                Ok(mangled) => writeln!(out, "{signature}\t{mangled}").map_diagnostic()?,
                Err(err) => {
                    dcx.emit(err);

                    if !self.keep_going {
                        dcx.emit(BatchAborted { line: idx + 1 }.into());
                        break;
                    }
                }
            }
        }

        out.flush().map_diagnostic()
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    let res = match path {
        Some(path) => std::fs::read_to_string(path),
        None => std::io::read_to_string(std::io::stdin()),
    };

    res.map_err(|err| {
        CouldNotReadInput {
            path: path.map_or_else(|| String::from("<stdin>"), |path| path.display().to_string()),
            inner: vec![err.into_diagnostic()],
        }
        .into()
    })
}
