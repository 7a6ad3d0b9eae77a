use std::io::IsTerminal;

use owo_colors::OwoColorize;
use spir_errors::DiagCtxHandle;
use spir_mangle::NameMangler;
use spir_types::{FunctionDescriptor, SpirVersion};

use crate::commands::{parse_signature, signature_source};
use crate::error::*;

#[derive(Debug, clap::Parser)]
#[command(
    name = "check",
    about = "Reports which SPIR versions are able to mangle a signature",
    long_about = None
)]
pub struct CheckCommand {
    #[arg(help = "Signature to check, such as `foo(__global atomic_int *)`")]
    pub signature: String,

    #[arg(
        short = 's',
        long = "spir-version",
        help = "Only check the given SPIR version, instead of all of them"
    )]
    pub spir_version: Option<SpirVersion>,
}

/// Outcome of mangling a signature for a single version.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct VersionReport {
    pub version: SpirVersion,
    pub result: Result<String, spir_mangle::MangleError>,
}

impl CheckCommand {
    #[allow(clippy::needless_pass_by_value)]
    pub(crate) fn run(&self, dcx: DiagCtxHandle) {
        let desc = match parse_signature(signature_source(None, &self.signature)) {
            Ok(desc) => desc,
            Err(err) => {
                dcx.emit(err);
                return;
            }
        };

        let reports = check_versions(&desc, self.versions());
        let color = std::io::stdout().is_terminal();

        for report in &reports {
            match &report.result {
                Ok(mangled) if color => println!("{}\t{}", report.version, mangled.green()),
                Ok(mangled) => println!("{}\t{mangled}", report.version),
                Err(err) if color => println!("{}\t{}", report.version, format!("unsupported: {err}").red()),
                Err(err) => println!("{}\tunsupported: {err}", report.version),
            }
        }

        if reports.iter().all(|report| report.result.is_err()) {
            let inner = reports
                .into_iter()
                .filter_map(|report| report.result.err())
                .map(spir_mangle::MangleError::into_diagnostic)
                .collect();

            dcx.emit(
                NotEncodable {
                    signature: self.signature.trim().to_string(),
                    inner,
                }
                .into(),
            );
        }
    }

    fn versions(&self) -> Vec<SpirVersion> {
        match self.spir_version {
            Some(version) => vec![version],
            None => SpirVersion::ALL.to_vec(),
        }
    }
}

/// Mangles the descriptor for each of the given versions, in order.
pub(crate) fn check_versions(desc: &FunctionDescriptor, versions: Vec<SpirVersion>) -> Vec<VersionReport> {
    versions
        .into_iter()
        .map(|version| VersionReport {
            version,
            result: NameMangler::new(version).mangle(desc),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use spir_errors::Result;
    use spir_mangle::MangleErrorKind;

    use super::*;

    fn check(signature: &str) -> Result<Vec<(SpirVersion, MangleErrorKind)>> {
        let desc = parse_signature(signature_source(None, signature))?;

        let reports = check_versions(&desc, SpirVersion::ALL.to_vec())
            .into_iter()
            .map(|report| (report.version, MangleErrorKind::of(&report.result)))
            .collect();

        Ok(reports)
    }

    #[test]
    fn test_portable_signature() -> Result<()> {
        assert_eq!(
            check("vload4(ulong, const __global float *)")?,
            [
                (SpirVersion::Spir12, MangleErrorKind::Success),
                (SpirVersion::Spir20, MangleErrorKind::Success),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_spir20_only_signature() -> Result<()> {
        assert_eq!(
            check("foo(__generic atomic_int *)")?,
            [
                (SpirVersion::Spir12, MangleErrorKind::TypeNotSupported),
                (SpirVersion::Spir20, MangleErrorKind::Success),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_null_signature() -> Result<()> {
        assert_eq!(
            check("<invalid>")?,
            [
                (SpirVersion::Spir12, MangleErrorKind::NullDescriptor),
                (SpirVersion::Spir20, MangleErrorKind::NullDescriptor),
            ]
        );

        Ok(())
    }
}
