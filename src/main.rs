//! snipkit - Snippet extraction and project template assembly
//!
//! This is the binary entry point. All logic lives in the library.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use snipkit::commands;
use snipkit::config::{load_settings, write_default_config};
use snipkit::core::{logging, SnippetManager, TemplateCatalog};
use tracing::{error, info};

/// snipkit - inspect snippet corpora and validate project templates
#[derive(Parser, Debug)]
#[command(name = "snipkit")]
#[command(about = "Snippet extraction and project template assembly", long_about = None)]
struct Args {
    /// Snippets root directory (overrides .snipkit/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    root: Option<PathBuf>,

    /// Project directory holding .snipkit/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List snippet groups
    Groups,

    /// List the snippets of a group
    List { group: String },

    /// Print a snippet with section markers removed
    Show { group: String, name: String },

    /// Print one section of a snippet
    Section {
        group: String,
        name: String,
        section: String,
    },

    /// List project templates
    Templates {
        /// Include the Empty template (`--include-empty=false` overrides the config)
        #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
        include_empty: Option<bool>,

        /// Print one JSON object per template
        #[arg(long)]
        json: bool,
    },

    /// Assemble every project template and run authoring checks
    Check {
        /// Include the Empty template (`--include-empty=false` overrides the config)
        #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
        include_empty: Option<bool>,
    },

    /// Write a default .snipkit/config.toml
    Init,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    logging::init()?;

    let project_dir = args
        .project
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if let Command::Init = args.command {
        let path = write_default_config(&project_dir)?;
        eprintln!("Config: {}", path.display());
        return Ok(());
    }

    let settings = load_settings(&project_dir)?;
    let root = args
        .root
        .unwrap_or_else(|| settings.snippets_root(&project_dir));
    info!("Snippets root: {}", root.display());

    let catalog = TemplateCatalog::new(SnippetManager::new(root));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match args.command {
        Command::Groups => commands::groups(&catalog, &mut out),
        Command::List { group } => commands::list(&catalog, &group, &mut out),
        Command::Show { group, name } => commands::show(&catalog, &group, &name, &mut out),
        Command::Section {
            group,
            name,
            section,
        } => commands::section(&catalog, &group, &name, &section, &mut out),
        Command::Templates {
            include_empty,
            json,
        } => commands::templates(&catalog, settings.include_empty(include_empty), json, &mut out),
        Command::Check { include_empty } => {
            let report = commands::check(&catalog, settings.include_empty(include_empty), &mut out)?;
            if !report.is_clean() {
                out.flush()?;
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Init => Ok(()),
    };

    if let Err(ref e) = result {
        error!("Command failed: {:?}", e);
        eprintln!("Logs: {}", logging::get_log_directory().display());
    }
    Ok(result?)
}
