//! Main CLI application structure

use std::net::SocketAddr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{adr, serve};
use crate::storage::{DEFAULT_TEMPLATE, DEFAULT_TEMPLATE_FILE};

#[derive(Parser)]
#[command(name = "adr")]
#[command(author, version, about = "A tool for managing Architecture Decision Records")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize an ADR directory with a template
    Init {
        /// ADR directory to create (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Template format (nygard, madr-minimal, madr-full)
        #[arg(long, short = 't', default_value = DEFAULT_TEMPLATE)]
        template: String,

        /// File name for the template inside the ADR directory
        #[arg(long, default_value = DEFAULT_TEMPLATE_FILE)]
        template_file: String,

        /// Overwrite an existing config and template
        #[arg(long)]
        force: bool,
    },

    /// Create a new ADR
    New {
        /// ADR title
        title: String,

        /// ID of an ADR this one supersedes (repeatable, or comma separated)
        #[arg(long, short = 's', value_delimiter = ',', allow_negative_numbers = true)]
        supersedes: Vec<i64>,
    },

    /// Update the status of an existing ADR
    Update {
        /// ADR ID
        #[arg(allow_negative_numbers = true)]
        id: String,

        /// New status; prompts when omitted
        status: Option<String>,
    },

    /// List all ADRs
    List {
        /// Disable colored output
        #[arg(long)]
        plain: bool,

        /// Filter by title or number
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Show status counts instead of listing ADRs
        #[arg(long)]
        count: bool,
    },

    /// Display an ADR in the terminal
    Show {
        /// ADR ID
        #[arg(allow_negative_numbers = true)]
        id: String,

        /// Disable colored output
        #[arg(long)]
        plain: bool,
    },

    /// Serve the JSON API
    Serve {
        /// Listen address
        #[arg(long, env = "ADR_ADDR", default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    if output.is_verbose() {
        serve::init_tracing(true);
    }
    output.verbose("adr starting");

    match cli.command {
        Commands::Init {
            path,
            template,
            template_file,
            force,
        } => adr::init(&output, &path, &template, &template_file, force)?,

        Commands::New { title, supersedes } => adr::new(&output, &title, &supersedes)?,

        Commands::Update { id, status } => adr::update(&output, &id, status.as_deref())?,

        Commands::List { plain, search, count } => adr::list(&output, plain, search.as_deref(), count)?,

        Commands::Show { id, plain } => adr::show(&output, &id, plain)?,

        Commands::Serve { addr } => serve::run(&output, addr)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
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
    fn supersedes_accepts_repeats_and_commas() {
        let cli = Cli::try_parse_from(["adr", "new", "Use Rust", "-s", "1,3", "--supersedes", "2"]).unwrap();
        match cli.command {
            Commands::New { title, supersedes } => {
                assert_eq!(title, "Use Rust");
                assert_eq!(supersedes, vec![1, 3, 2]);
            }
            _ => panic!("expected new"),
        }
    }

    #[test]
    fn global_format_after_subcommand() {
        let cli = Cli::try_parse_from(["adr", "list", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn negative_id_reaches_handler() {
        let cli = Cli::try_parse_from(["adr", "show", "-1"]).unwrap();
        assert!(matches!(cli.command, Commands::Show { ref id, .. } if id == "-1"));
    }
}
