//! Survey wave merger CLI.

use clap::Parser;
use wave_cli::cli::Cli;
use wave_cli::commands::run;
use wave_cli::logging::init_logging;
use wave_cli::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(summary) => {
            print_summary(&summary, cli.styled_output());
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}
