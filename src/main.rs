use color_eyre::eyre::WrapErr;
use color_eyre::Result;

use guru_stream::cli::{parse_args, run_cli_command, usage, CliCommand};
use guru_stream::config::GuidanceConfig;
use guru_stream::logging::init_logging;

fn main() -> Result<()> {
    color_eyre::install()?;

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, usage());
            std::process::exit(2);
        }
    };

    // Informational commands need no configuration
    if matches!(command, CliCommand::Version | CliCommand::Help | CliCommand::List) {
        return run_cli_command(command, GuidanceConfig::default());
    }

    let config = GuidanceConfig::from_env().wrap_err("Invalid GURU_* environment")?;
    init_logging(&config.log_level);

    run_cli_command(command, config)
}
