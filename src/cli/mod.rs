pub mod context;
pub mod contact_commands;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::db;
use crate::error::CrmResult;
use crate::logging;
use crate::model::ContactId;
use crate::ops::ContactService;
use context::CLIContext;

#[derive(Parser, Debug)]
#[command(
    name = "mini-crm",
    version,
    about = "Mini-CRM CLI provides contact management commands"
)]
pub struct Cli {
    /// Path to the configuration file (default is ./config.toml)
    #[arg(long, global = true, env = "MINI_CRM_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new contact
    Add {
        /// Name of the contact
        #[arg(short, long)]
        name: Option<String>,

        /// Email of the contact
        #[arg(short, long)]
        email: Option<String>,
    },
    /// List all contacts
    List,
    /// Show a single contact by ID
    Show {
        /// Identifier of the contact to show
        #[arg(short, long)]
        id: Option<ContactId>,
    },
    /// Update an existing contact
    Update {
        /// Identifier of the contact to update
        #[arg(short, long)]
        id: Option<ContactId>,

        /// New name value
        #[arg(long)]
        name: Option<String>,

        /// New email value
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a contact by ID
    Delete {
        /// Identifier of the contact to delete
        #[arg(short, long)]
        id: Option<ContactId>,
    },
}

/// Load configuration, start logging, open storage, and run one command
/// against the standard streams.
pub fn run(config_path: Option<&Path>, command: Command) -> CrmResult<()> {
    let config = Config::load(config_path)?;
    let _logger = logging::init(&config.log)?;
    let repo = db::open(&config.storage)?;
    let mut ctx = CLIContext::stdio(ContactService::new(repo));
    execute(&mut ctx, command)
}

/// Dispatch a parsed command.
pub fn execute(ctx: &mut CLIContext, command: Command) -> CrmResult<()> {
    match command {
        Command::Add { name, email } => {
            contact_commands::add(ctx, name.as_deref(), email.as_deref())
        }
        Command::List => contact_commands::list(ctx),
        Command::Show { id } => contact_commands::show(ctx, id),
        Command::Update { id, name, email } => {
            contact_commands::update(ctx, id, name.as_deref(), email.as_deref())
        }
        Command::Delete { id } => contact_commands::delete(ctx, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_short_flags() {
        let cli = Cli::try_parse_from(["mini-crm", "add", "-n", "Ada", "-e", "ada@example.com"]).unwrap();
        match cli.command {
            Some(Command::Add { name, email }) => {
                assert_eq!(name.as_deref(), Some("Ada"));
                assert_eq!(email.as_deref(), Some("ada@example.com"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_update_flags() {
        let cli = Cli::try_parse_from(["mini-crm", "update", "-i", "4", "--email", "x@y.io"]).unwrap();
        match cli.command {
            Some(Command::Update { id, name, email }) => {
                assert_eq!(id, Some(ContactId::new(4)));
                assert_eq!(name, None);
                assert_eq!(email.as_deref(), Some("x@y.io"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_non_numeric_id_flag() {
        assert!(Cli::try_parse_from(["mini-crm", "delete", "--id", "abc"]).is_err());
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["mini-crm", "list", "--config", "alt.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["mini-crm"]).unwrap();
        assert!(cli.command.is_none());
    }
}
