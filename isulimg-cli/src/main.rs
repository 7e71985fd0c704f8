mod cli;
mod commands;

use std::process;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Keep the guard until the command finishes so buffered logs are flushed
    let log_guard =
        isulimg::util::init_tracing(cli.global.log.as_deref(), &cli.global.log_level);

    let result = match cli.command {
        cli::Commands::Prepare(args) => commands::prepare::execute(args, &cli.global),
        cli::Commands::Mount(args) => commands::mount::execute(args, &cli.global, true),
        cli::Commands::Umount(args) => commands::mount::execute(args, &cli.global, false),
        cli::Commands::Rm(args) => commands::rm::execute(args, &cli.global),
    };

    if let Err(error) = result {
        tracing::error!(error = %error, "Command failed");
        drop(log_guard);
        eprintln!("Error: {}", error);
        process::exit(1);
    }
}
