use std::process::ExitCode;

fn main() -> ExitCode {
    spir_cli::spirm_cli_entry()
}
