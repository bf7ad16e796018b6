pub mod types;
pub mod commands;
pub mod logging;

use clap::Parser;

/// Run the command-line interface
pub fn run() {
    let cli = types::Cli::parse();

    // Initialize logging system
    logging::init_logging(cli.debug, cli.quiet);

    // Configure backtrace
    logging::configure_backtrace(cli.trace);

    if let Err(e) = commands::handle_extract_command(&cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
