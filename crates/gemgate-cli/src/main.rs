//! CLI entry point - the composition root.
//!
//! Loads the environment, parses arguments, initializes logging, and
//! dispatches to a handler. Errors are reported here and mapped to exit
//! codes.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use gemgate_cli::{Cli, CliError, Commands, handlers, init_logging, load_env};

#[tokio::main]
async fn main() -> ExitCode {
    // Before parsing, so .env values back the flags' env fallbacks
    load_env();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        // No command provided - show help
        if let Err(e) = Cli::command().print_help() {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    };

    let result = match command {
        Commands::Serve(args) => handlers::serve::execute(args).await,
        Commands::Ask(args) => handlers::ask::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}
