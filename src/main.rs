use clap::Parser;
use datavault::cli::{init_logging, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Shell => datavault::cli::commands::shell::execute(&cli),
        Commands::Keygen => datavault::cli::commands::keygen::execute(),
    };

    if let Err(e) = result {
        datavault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
