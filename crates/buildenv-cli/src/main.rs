//! CLI entry point.

use std::io::Write;

use clap::Parser;

use buildenv_cli::{Cli, CliConfig, CliError, build_probes, handlers, init_logging};

fn run(config: &CliConfig) -> anyhow::Result<()> {
    let probes = build_probes(config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    handlers::dispatch(config, &probes, &mut out)?;
    out.flush()?;
    Ok(())
}

fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = CliConfig::from(Cli::parse());
    init_logging(config.verbose);

    if let Err(err) = run(&config) {
        eprintln!("Error: {err:#}");
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(code);
    }
}
