pub(crate) mod commands;
pub(crate) mod error;
mod tracing;

use std::process::ExitCode;

use clap::Parser;
use spir_errors::{DiagCtx, GraphicalRenderer};

#[derive(Debug, Parser)]
#[clap(
    name = "spirm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Mangles OpenCL C function signatures into SPIR symbol names",
    long_about = None
)]
#[command(subcommand_required(true), arg_required_else_help(true))]
pub(crate) struct SpirmCli {
    #[clap(subcommand)]
    pub subcommand: SpirmSubcommands,

    #[arg(long = "trace", global = true, help = "Enables tracing of the mangler")]
    pub trace: bool,

    #[arg(value_enum, long = "tracer", global = true, help = "Defines which tracer to use")]
    pub tracer: Option<tracing::Tracer>,
}

#[derive(Debug, clap::Parser)]
pub(crate) enum SpirmSubcommands {
    Mangle(commands::MangleCommand),
    Batch(commands::BatchCommand),
    Check(commands::CheckCommand),
}

pub fn spirm_cli_entry() -> ExitCode {
    let matches = SpirmCli::parse();

    if matches.trace || matches.tracer.is_some() {
        tracing::register_global_tracer(matches.tracer.unwrap_or_default(), matches.trace);
    }

    let dcx = DiagCtx::new();

    dcx.with_none(|dcx| match matches.subcommand {
        SpirmSubcommands::Mangle(cmd) => cmd.run(dcx),
        SpirmSubcommands::Batch(cmd) => cmd.run(dcx),
        SpirmSubcommands::Check(cmd) => cmd.run(dcx),
    });

    let mut renderer = GraphicalRenderer::new();
    dcx.render_stderr(&mut renderer);

    if dcx.is_tainted() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
