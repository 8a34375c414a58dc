// ABOUTME: Entry point for winsession — vim-style session commands over saved window layouts.
// ABOUTME: Parses CLI args, loads config, and runs one command against the session store.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use winsession::app::{App, render_listing};
use winsession::commands::{Command, CommandParser, session_name};
use winsession::config::Config;
use winsession::layout::{FileLayout, LayoutHost, StdioLayout};
use winsession::prompt::{AssumeYes, Prompter, TerminalPrompt};
use winsession::session::{SessionStore, StorageMode};

#[derive(Parser)]
#[command(
    name = "winsession",
    version,
    about = "Save and restore window layouts as named sessions"
)]
struct Cli {
    /// Path to config file (default: ~/.winsession/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Storage directory for centralized sessions (overrides config)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Treat session names as paths for this invocation
    #[arg(long, global = true, conflicts_with = "centralized")]
    ad_hoc: bool,

    /// Store sessions in the storage directory for this invocation
    #[arg(long, global = true)]
    centralized: bool,

    /// File holding the live layout; stdin/stdout are used without it
    #[arg(short, long, global = true)]
    layout: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save the current layout as a session
    Mksession {
        /// Overwrite an existing session without asking
        #[arg(short, long)]
        force: bool,
        /// Session name, or a path in ad-hoc mode
        name: Option<String>,
    },
    /// Restore a session
    Source {
        /// Session name, or a path in ad-hoc mode
        name: Option<String>,
    },
    /// Choose a stored session and restore it
    Sourcelist,
    /// Choose a stored session and delete it
    Delsession,
    /// Choose a stored session and rename it
    Renamesession,
    /// Run an ex-command line such as ":mks work"
    Ex {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },
    /// List stored sessions
    List {
        /// Glob pattern to filter session names
        pattern: Option<String>,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or persist the storage mode
    StorageMode {
        mode: Option<ModeArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Centralized,
    AdHoc,
}

impl From<ModeArg> for StorageMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Centralized => StorageMode::Centralized,
            ModeArg::AdHoc => StorageMode::AdHoc,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("WINSESSION_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let persisted = Config::load_from(&config_path)?;
    let mut config = persisted.clone();

    if let Some(dir) = &cli.storage_dir {
        config.session.storage_directory = dir.to_string_lossy().to_string();
    }
    if cli.ad_hoc {
        config.session.set_storage_mode(StorageMode::AdHoc);
    } else if cli.centralized {
        config.session.set_storage_mode(StorageMode::Centralized);
    }
    let store = SessionStore::new(config.session.settings());

    let command = match cli.command {
        Commands::Mksession { force, name } => Command::MkSession {
            name: session_name(name),
            force,
        },
        Commands::Source { name } => Command::Source {
            name: session_name(name),
        },
        Commands::Sourcelist => Command::SourceList,
        Commands::Delsession => Command::DelSession,
        Commands::Renamesession => Command::RenameSession,
        Commands::Ex { line } => CommandParser::parse(&line.join(" "))?,
        Commands::List { pattern, json } => {
            let entries = store.entries_matching(pattern.as_deref())?;
            print!("{}", render_listing(&entries, json)?);
            return Ok(());
        }
        Commands::StorageMode { mode: None } => {
            println!("{}", persisted.session.storage_mode());
            return Ok(());
        }
        Commands::StorageMode { mode: Some(mode) } => {
            let updated = Config::persist_storage_mode(&config_path, mode.into())?;
            println!("Storage mode set to {}", updated.session.storage_mode());
            return Ok(());
        }
    };

    let layout: Box<dyn LayoutHost> = match &cli.layout {
        Some(path) => Box::new(FileLayout::new(path)),
        None => Box::new(StdioLayout),
    };
    if cli.yes {
        execute(store, layout, AssumeYes(TerminalPrompt::stdio()), &command)
    } else {
        execute(store, layout, TerminalPrompt::stdio(), &command)
    }
}

fn execute<P: Prompter>(
    store: SessionStore,
    layout: Box<dyn LayoutHost>,
    prompt: P,
    command: &Command,
) -> anyhow::Result<()> {
    let mut app = App::new(store, layout, prompt);
    let outcome = app.execute(command)?;
    eprintln!("{outcome}");
    Ok(())
}
