#![deny(unsafe_code)]

mod addon;
mod config;
mod constants;
mod tags;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use addon::{Host, HostState, MemoryHost, MenuSurface, QuickTags, Toggle, ToggleOrigin};
use config::ConfigStore;

#[derive(Parser)]
#[command(name = "anki-quick-tags")]
#[command(version)]
#[command(about = "Quick-tag menus and shortcuts for flashcard review", long_about = None)]
struct Cli {
    /// Path to tags.json (defaults to the add-on's user files directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Host window state to simulate
#[derive(Clone, Copy, ValueEnum)]
enum StateArg {
    Review,
    DeckBrowser,
    Other,
}

impl From<StateArg> for HostState {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Review => HostState::Review,
            StateArg::DeckBrowser => HostState::DeckBrowser,
            StateArg::Other => HostState::Other,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Validate tags.json and print the quick tags and display settings
    Check,

    /// Print the context menu that would be shown for a note
    Menu {
        /// Every tag name known to the collection
        #[arg(long, value_delimiter = ',')]
        all_tags: Vec<String>,

        /// Tags on the note being reviewed
        #[arg(long, value_delimiter = ',')]
        note_tags: Vec<String>,

        /// Build the editor's menu instead of the reviewer's
        #[arg(long)]
        editor: bool,

        /// Host state (defaults to deck-browser with --editor, review otherwise)
        #[arg(long, value_enum)]
        state: Option<StateArg>,
    },

    /// Print the shortcuts that would be registered in a host state
    Shortcuts {
        #[arg(long, value_enum, default_value = "review")]
        state: StateArg,
    },

    /// Toggle a tag on a note and print the note's resulting tags
    Toggle {
        tag: String,

        /// Tags on the note before toggling
        #[arg(long, value_delimiter = ',')]
        note_tags: Vec<String>,

        /// Toggle from the editor's context menu
        #[arg(long, conflicts_with = "shortcut")]
        editor: bool,

        /// Toggle through a review shortcut
        #[arg(long)]
        shortcut: bool,
    },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
    }

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", constants::app::NAME, e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let path = cli.config.unwrap_or_else(ConfigStore::default_path);

    let mut host = MemoryHost::new(HostState::Review);
    let Some(mut addon) = QuickTags::start(&path, &mut host) else {
        // Same as the add-on refusing to register its hooks
        for info in &host.infos {
            eprintln!("{info}");
        }
        return Ok(ExitCode::FAILURE);
    };

    match cli.command {
        Command::Check => {
            let store = addon.store();
            let document = store.document();
            println!("Config: {}", store.path().display());
            println!("Quick tags ({}):", document.quick_tags.len());
            for tag in &document.quick_tags {
                if tag.has_shortcut() {
                    println!("  {} [{}]", tag.name(), tag.shortcut());
                } else {
                    println!("  {}", tag.name());
                }
            }
            let display = document.display;
            println!(
                "Other tags: {} (limit {})",
                if display.other_tags_visible { "visible" } else { "hidden" },
                display.other_tags_limit
            );
        }
        Command::Menu {
            all_tags,
            note_tags,
            editor,
            state,
        } => {
            let note = host.add_note(note_tags);
            host.register_tags(all_tags);

            let surface = if editor {
                host.state = HostState::DeckBrowser;
                MenuSurface::Editor(note)
            } else {
                host.reviewing = Some(note);
                MenuSurface::Reviewer
            };
            if let Some(state) = state {
                host.state = state.into();
            }

            match addon.on_build_menu(&host, surface)? {
                Some(menu) => print!("{menu}"),
                None => println!("(no menu)"),
            }
        }
        Command::Shortcuts { state } => {
            for binding in addon.on_build_shortcuts(state.into())? {
                println!("{binding}");
            }
        }
        Command::Toggle {
            tag,
            note_tags,
            editor,
            shortcut,
        } => {
            let note = host.add_note(note_tags);
            host.reviewing = Some(note);

            let origin = if editor {
                ToggleOrigin::Editor(note)
            } else if shortcut {
                ToggleOrigin::Shortcut
            } else {
                ToggleOrigin::Reviewer
            };

            let toggle = addon
                .on_toggle_tag(&mut host, &tag, origin)?
                .context("No note to toggle")?;
            for tooltip in &host.tooltips {
                println!("{tooltip}");
            }
            let tags = host.note_tags(note).unwrap_or_default();
            match toggle {
                Toggle::Added(id) | Toggle::Removed(id) => {
                    println!("Note {}: {}", id, tags.join(" "));
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
