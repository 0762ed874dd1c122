//! Interactive demo of the selection and bulk-delete workflow.
//!
//! Reads one command per line from stdin and prints the list view after every
//! change. Deletes run in the background through the simulated transport, so
//! commands keep being read (and ignored by the workflow) while one is in flight.
//!
//! # Commands
//!
//! - `select <id>` / `deselect <id>` / `toggle <id>`: change one row
//! - `all`: select every item
//! - `reset`: clear the selection
//! - `delete` / `retry`: delete the selection
//! - `dismiss`: close the error prompt
//! - `show`: print the current view
//! - `quit`: exit
//!
//! # Example
//!
//! ```text
//! $ printf 'select 1\nselect 4\ndelete\n' | pruneflow --latency-ms 200 --fail
//! ```

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use pruneflow::delete::SimulatedDelete;
use pruneflow::observability::init_tracing;
use pruneflow::runtime::Coordinator;
use pruneflow::{initialize, Config, Event, ItemId, Snapshot};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Command-line flags. Flags override values from the configuration file.
#[derive(Debug, Parser)]
#[command(name = "pruneflow", version, about = "Select items and delete them in bulk")]
struct Args {
    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Make every delete fail.
    #[arg(long)]
    fail: bool,

    /// Latency of the simulated delete, in milliseconds.
    #[arg(long, value_name = "MS")]
    latency_ms: Option<u64>,

    /// Print JSON snapshots instead of the text view.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> pruneflow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if self.fail {
            config.fail_deletes = true;
        }
        if let Some(latency) = self.latency_ms {
            config.delete_latency_ms = latency;
        }
        config.validate()?;
        Ok(config)
    }
}

/// A parsed stdin command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Select(ItemId),
    Deselect(ItemId),
    Toggle(ItemId),
    All,
    Reset,
    Delete,
    Dismiss,
    Show,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or_else(|| "empty command".to_string())?;
        let id = |arg: Option<&str>| -> Result<ItemId, String> {
            let raw = arg.ok_or_else(|| format!("`{verb}` needs an item id"))?;
            raw.parse::<u64>()
                .map(ItemId)
                .map_err(|_| format!("invalid item id `{raw}`"))
        };

        let command = match verb {
            "select" => Self::Select(id(words.next())?),
            "deselect" => Self::Deselect(id(words.next())?),
            "toggle" => Self::Toggle(id(words.next())?),
            "all" => Self::All,
            "reset" => Self::Reset,
            "delete" | "retry" => Self::Delete,
            "dismiss" | "ok" => Self::Dismiss,
            "show" => Self::Show,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command `{other}`")),
        };

        if words.next().is_some() {
            return Err(format!("too many arguments for `{verb}`"));
        }
        Ok(command)
    }

    /// Maps the command to a workflow event against the current snapshot.
    fn event(self, snapshot: &Snapshot) -> Result<Option<Event>, String> {
        let unknown = |id: ItemId| format!("no item with id {id}");
        let event = match self {
            Self::Select(id) => Event::select(snapshot.item(id).ok_or_else(|| unknown(id))?),
            Self::Deselect(id) => Event::deselect(snapshot.item(id).ok_or_else(|| unknown(id))?),
            Self::Toggle(id) => snapshot.toggle_item_event(id).ok_or_else(|| unknown(id))?,
            Self::All => Event::SelectAllItems,
            Self::Reset => Event::ResetSelection,
            Self::Delete => Event::DeleteSelection,
            Self::Dismiss => Event::DismissPrompt,
            Self::Show | Self::Quit => return Ok(None),
        };
        Ok(Some(event))
    }
}

fn print_snapshot(snapshot: &Snapshot, json: bool) {
    if json {
        match serde_json::to_string(snapshot) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::error!(error = %e, "failed to serialize snapshot"),
        }
    } else {
        print!("{}", pruneflow::ui::render(snapshot));
    }
}

#[tokio::main]
async fn main() -> pruneflow::Result<()> {
    let args = Args::parse();
    let config = args.config()?;
    init_tracing(&config);

    let workflow = initialize(&config)?;
    let deleter = Arc::new(SimulatedDelete::from_config(&config));
    let (mut coordinator, mut signals) = Coordinator::new(workflow, deleter);

    print_snapshot(&coordinator.snapshot(), args.json);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    if !coordinator.is_busy() {
                        break;
                    }
                    continue;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let command = match Command::parse(&line) {
                    Ok(command) => command,
                    Err(message) => {
                        eprintln!("{message}");
                        continue;
                    }
                };
                if command == Command::Quit {
                    break;
                }

                let current = coordinator.snapshot();
                match command.event(&current) {
                    Ok(Some(event)) => {
                        let kind = event.kind();
                        let next = coordinator.send(event);
                        if next.revision == current.revision {
                            eprintln!("{kind} ignored in {}", next.state);
                        } else {
                            print_snapshot(&next, args.json);
                        }
                    }
                    Ok(None) => print_snapshot(&current, args.json),
                    Err(message) => eprintln!("{message}"),
                }
            }
            Some(event) = signals.recv() => {
                let snapshot = coordinator.send(event);
                print_snapshot(&snapshot, args.json);
                if !stdin_open && !coordinator.is_busy() {
                    break;
                }
            }
        }
    }

    Ok(())
}
