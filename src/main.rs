use clap::{CommandFactory, Parser};

use mini_crm::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    };

    if let Err(e) = cli::run(cli.config.as_deref(), command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
