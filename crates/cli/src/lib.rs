mod cache;
mod fetch;
mod schema;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vtscope_api::DisplayLanguage;
use vtscope_core::Settings;

#[derive(Parser)]
#[command(
    name = "vtscope",
    version,
    about = "Schema-aware completion and hover for Vertec Python scripts",
    long_about = "vtscope loads the Vertec class model (classes, members, associations and \
                  their translations), caches it on disk and uses it to infer what a dotted \
                  expression in a Vertec script refers to. It runs as a language server or \
                  answers one-off questions from the command line."
)]
pub struct Cli {
    /// Display language for names (overrides the configured one)
    #[arg(long, global = true, value_name = "de|en")]
    pub lang: Option<DisplayLanguage>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the Language Server Protocol (LSP) server
    Lsp,
    /// Load the schema and translations, filling the cache
    #[command(
        long_about = "Loads the class model from the configured source. A cached copy younger \
                            than the cache lifetime is used unless --force is given."
    )]
    Fetch {
        /// Ignore the cache and fetch from the source
        #[arg(long)]
        force: bool,
    },
    /// Inspect or clear the schema cache
    Cache {
        #[command(subcommand)]
        command: cache::CacheCommands,
    },
    /// Show the members and associations of a class, inherited ones included
    Class {
        /// Class name in either language
        #[arg(value_name = "CLASS")]
        name: String,
    },
    /// Resolve a dotted chain as seen from a line of a script
    #[command(
        long_about = "Infers the type of CHAIN using the variable bindings above LINE in FILE, \
                            e.g. `vtscope resolve script.py --line 12 projekt.phasen`."
    )]
    Resolve {
        /// Script file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// One-based line the chain appears on
        #[arg(long)]
        line: u32,
        /// Chain such as `projekt.phasen[0].bearbeiter`
        #[arg(value_name = "CHAIN")]
        chain: String,
    },
    /// Translate a class, member or association name between German and English
    Translate {
        #[arg(value_name = "WORD")]
        word: String,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The LSP owns stdout, so it logs to file only
    let (component, to_stderr) = match &cli.command {
        Commands::Lsp => ("lsp", false),
        _ => ("cli", true),
    };
    let _guard = vtscope_core::logging::init_logging(component, to_stderr);

    let rt = tokio::runtime::Runtime::new()?;

    if let Commands::Lsp = cli.command {
        return rt.block_on(vtscope_lsp::run_server());
    }

    let mut settings = Settings::load()?;
    if let Some(lang) = cli.lang {
        settings.language = lang;
    }

    match cli.command {
        Commands::Lsp => Ok(()),
        Commands::Fetch { force } => rt.block_on(fetch::run(&settings, force)),
        Commands::Cache { command } => cache::run(&settings, command),
        Commands::Class { name } => rt.block_on(schema::show_class(&settings, &name)),
        Commands::Resolve { file, line, chain } => {
            rt.block_on(schema::resolve(&settings, &file, line, &chain))
        }
        Commands::Translate { word } => rt.block_on(fetch::translate(&settings, &word)),
    }
}
