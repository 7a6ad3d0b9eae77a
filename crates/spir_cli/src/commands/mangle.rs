use spir_errors::DiagCtxHandle;
use spir_types::SpirVersion;

use crate::commands::{mangle_signature, signature_source};

#[derive(Debug, clap::Parser)]
#[command(name = "mangle", about = "Prints the mangled name of a single signature", long_about = None)]
pub struct MangleCommand {
    #[arg(help = "Signature to mangle, such as `vload4(ulong, const __global float *)`")]
    pub signature: String,

    #[arg(
        short = 's',
        long = "spir-version",
        default_value = "2.0",
        help = "SPIR version to mangle for (`1.2` or `2.0`)"
    )]
    pub spir_version: SpirVersion,
}

impl MangleCommand {
    #[allow(clippy::needless_pass_by_value)]
    pub(crate) fn run(&self, dcx: DiagCtxHandle) {
        let source = signature_source(None, &self.signature);

        match mangle_signature(source, self.spir_version) {
            Ok(mangled) => println!("{mangled}"),
            Err(err) => dcx.emit(err),
        }
    }
}
