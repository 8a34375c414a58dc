// ABOUTME: App orchestrator — runs session ex-commands against the store, layout, and prompts.
// ABOUTME: Informational store errors become notices; everything else propagates.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::commands::{Command, CommandParser};
use crate::layout::LayoutHost;
use crate::prompt::Prompter;
use crate::session::{SessionEntry, SessionError, SessionStore};

/// What a command did, ready to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Saved(PathBuf),
    Restored(PathBuf),
    Deleted(PathBuf),
    Renamed { from: PathBuf, to: PathBuf },
    /// The command stopped without changing anything.
    Notice(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Saved(path) => write!(f, "Session saved to {}", path.display()),
            Outcome::Restored(path) => write!(f, "Session restored from {}", path.display()),
            Outcome::Deleted(path) => write!(f, "Deleted session {}", path.display()),
            Outcome::Renamed { from, to } => {
                write!(f, "Renamed {} to {}", from.display(), to.display())
            }
            Outcome::Notice(message) => f.write_str(message),
        }
    }
}

/// Render a session listing as aligned text lines, or as pretty JSON.
pub fn render_listing(entries: &[SessionEntry], json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(entries)? + "\n");
    }
    let mut out = String::new();
    for entry in entries {
        let modified = entry
            .modified
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let line = format!("{:<32} {:>10}  {}", entry.name, entry.size, modified);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    Ok(out)
}

/// Result of asking the user to choose a stored session.
enum Pick {
    Chosen(String),
    Nothing(Outcome),
}

/// Runs session commands.
pub struct App<L, P> {
    store: SessionStore,
    layout: L,
    prompt: P,
}

impl<L: LayoutHost, P: Prompter> App<L, P> {
    pub fn new(store: SessionStore, layout: L, prompt: P) -> Self {
        Self {
            store,
            layout,
            prompt,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Parse and run one ex-command line.
    pub fn execute_line(&mut self, line: &str) -> anyhow::Result<Outcome> {
        let command = CommandParser::parse(line)?;
        self.execute(&command)
    }

    /// Run a parsed command.
    pub fn execute(&mut self, command: &Command) -> anyhow::Result<Outcome> {
        info!(?command, "executing session command");
        match self.dispatch(command) {
            Err(err) => match err.downcast::<SessionError>() {
                Ok(session_err) if session_err.is_informational() => {
                    debug!(error = %session_err, "command stopped");
                    Ok(Outcome::Notice(session_err.to_string()))
                }
                Ok(session_err) => Err(session_err.into()),
                Err(other) => Err(other),
            },
            ok => ok,
        }
    }

    fn dispatch(&mut self, command: &Command) -> anyhow::Result<Outcome> {
        match command {
            Command::MkSession { name, force } => self.mksession(name.as_deref(), *force),
            Command::Source { name } => self.source(name.as_deref()),
            Command::SourceList => self.source_list(),
            Command::DelSession => self.delete_session(),
            Command::RenameSession => self.rename_session(),
        }
    }

    fn mksession(&mut self, name: Option<&str>, force: bool) -> anyhow::Result<Outcome> {
        let payload = self.layout.capture()?;
        let path = if force {
            self.store.save_forced(name, &payload, &mut self.prompt)?
        } else {
            self.store.save(name, &payload, &mut self.prompt)?
        };
        Ok(Outcome::Saved(path))
    }

    fn source(&mut self, name: Option<&str>) -> anyhow::Result<Outcome> {
        let path = self.store.resolve(name);
        let payload = self.store.read(&path)?;
        self.layout.apply(&payload)?;
        Ok(Outcome::Restored(path))
    }

    fn source_list(&mut self) -> anyhow::Result<Outcome> {
        let name = match self.pick_session("Source session")? {
            Pick::Chosen(name) => name,
            Pick::Nothing(outcome) => return Ok(outcome),
        };
        let path = self.store.entry_path(&name);
        let payload = self.store.read(&path)?;
        self.layout.apply(&payload)?;
        Ok(Outcome::Restored(path))
    }

    fn delete_session(&mut self) -> anyhow::Result<Outcome> {
        let name = match self.pick_session("Delete session")? {
            Pick::Chosen(name) => name,
            Pick::Nothing(outcome) => return Ok(outcome),
        };
        let path = self.store.entry_path(&name);
        if !self.prompt.confirm(&format!("Delete session {name}?"))? {
            return Err(SessionError::UserDeclined {
                action: "Delete",
                path,
            }
            .into());
        }
        self.store.delete(&path)?;
        Ok(Outcome::Deleted(path))
    }

    fn rename_session(&mut self) -> anyhow::Result<Outcome> {
        let name = match self.pick_session("Rename session")? {
            Pick::Chosen(name) => name,
            Pick::Nothing(outcome) => return Ok(outcome),
        };
        let from = self.store.entry_path(&name);
        let Some(new_name) = self.prompt.read_line(&format!("New name for {name}"))? else {
            return Ok(Outcome::Notice("Rename cancelled".to_string()));
        };
        let to = self.store.rename(&from, &new_name, &mut self.prompt)?;
        Ok(Outcome::Renamed { from, to })
    }

    fn pick_session(&mut self, prompt: &str) -> anyhow::Result<Pick> {
        let names = self.store.list()?;
        if names.is_empty() {
            let dir = &self.store.settings().storage_directory;
            return Ok(Pick::Nothing(Outcome::Notice(format!(
                "No sessions in {}",
                dir.display()
            ))));
        }
        Ok(match self.prompt.pick(prompt, &names)? {
            Some(name) => Pick::Chosen(name),
            None => Pick::Nothing(Outcome::Notice("No session selected".to_string())),
        })
    }
}
