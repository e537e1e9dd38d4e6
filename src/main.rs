//! # Peek - A Small File Viewer
//!
//! Views text with lightweight syntax highlighting and reads image dimensions,
//! keeping a recents list and display preferences between runs.
//!
//! ## Quick Start
//!
//! ```bash
//! # Render a file as highlighted markup
//! cargo run -- render src/main.rs
//!
//! # Highlight matches and emphasize the third one
//! cargo run -- render src/main.rs --find viewer --current 2
//!
//! # List match positions as JSON
//! cargo run -- find src/main.rs viewer --json
//!
//! # Reopen the most recent file
//! cargo run -- recent 1
//!
//! # Show the next source file in the same folder, as a themed page
//! cargo run -- --ephemeral prefs --theme dracula
//! cargo run -- next src/main.rs
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use peek_buffer::Direction;
use peek_core::{
    Config, Content, FileStore, MAX_HOTKEY_SLOT, MemoryStore, OpenOutcome, Recents, Store, Viewer,
};
use peek_platform::{NativeResolver, SystemClipboard, SystemRevealer};
use peek_syntax::{LanguageTag, Theme};

/// Peek - a small, fast file viewer
#[derive(Parser, Debug)]
#[command(name = "peek")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Read limits from this config file instead of the default location
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Keep preferences and recents in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Print a file as highlighted markup
    Render {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Language override (js, py, rs, toml, none)
        #[arg(short, long, value_name = "LANG")]
        lang: Option<LanguageTag>,

        /// Mark case-insensitive matches of this text
        #[arg(short, long, value_name = "QUERY")]
        find: Option<String>,

        /// Emphasize this match (0-based)
        #[arg(long, value_name = "N", requires = "find")]
        current: Option<usize>,

        /// Leave the gutter empty
        #[arg(long)]
        no_line_numbers: bool,

        /// Wrap the markup in an HTML page styled with the current theme
        #[arg(long)]
        standalone: bool,
    },

    /// Print the next file of the same kind in FILE's folder
    Next {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Step backwards instead
        #[arg(short, long)]
        previous: bool,
    },

    /// List case-insensitive matches in a file
    Find {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(value_name = "QUERY")]
        query: String,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pick a file with the system dialog and print it
    Open,

    /// List recent files, or reopen the one in slot N (1 = most recent)
    Recent {
        #[arg(value_name = "N")]
        slot: Option<usize>,
    },

    /// Forget all recent files
    RecentsClear,

    /// Show preferences, toggling any that are named
    Prefs {
        #[arg(long)]
        dark: bool,

        #[arg(long)]
        wrap: bool,

        #[arg(long)]
        line_numbers: bool,

        #[arg(long)]
        fit: bool,

        /// Switch the code theme
        #[arg(long, value_name = "THEME")]
        theme: Option<Theme>,
    },

    /// List the code themes
    Themes,

    /// Copy a file's path to the clipboard
    CopyPath {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Show a file in the system file manager
    Reveal {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Peek v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    let mut resolver = NativeResolver::new(config.files.clone());
    let mut viewer = Viewer::new(open_store(args.ephemeral), config);

    run(args.command, &mut viewer, &mut resolver)
}

fn open_store(ephemeral: bool) -> Box<dyn Store> {
    if ephemeral {
        return Box::new(MemoryStore::new());
    }
    match FileStore::open_default() {
        Ok(store) => {
            tracing::debug!("State file: {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!("No state directory, nothing will be remembered: {}", e);
            Box::new(MemoryStore::new())
        }
    }
}

fn run<S: Store>(
    command: Command,
    viewer: &mut Viewer<S>,
    resolver: &mut NativeResolver,
) -> anyhow::Result<()> {
    match command {
        Command::Render {
            file,
            lang,
            find,
            current,
            no_line_numbers,
            standalone,
        } => {
            open_file(viewer, resolver, &file)?;
            if let Some(tag) = lang {
                viewer.set_language(tag);
            }
            if let Some(query) = find {
                viewer.set_query(&query);
            }
            if let Some(idx) = current
                && viewer.select_match(idx).is_none()
            {
                anyhow::bail!(
                    "Match {} out of range ({} found)",
                    idx,
                    viewer.match_count()
                );
            }
            let mut options = viewer.render_options();
            if no_line_numbers {
                options.line_numbers = false;
            }
            let markup = viewer
                .render_with(options)
                .map(|m| if standalone { html_page(viewer, &m) } else { m });
            print_view(viewer, markup);
        }
        Command::Next { file, previous } => {
            open_file(viewer, resolver, &file)?;
            let direction = if previous {
                Direction::Backward
            } else {
                Direction::Forward
            };
            match viewer.open_neighbor(resolver, direction) {
                OpenOutcome::Opened => print_view(viewer, viewer.render()),
                OpenOutcome::Cancelled => {
                    anyhow::bail!("No other file like {} in its folder", file.display())
                }
                OpenOutcome::Failed(message) => anyhow::bail!(message),
            }
        }
        Command::Find { file, query, json } => {
            open_file(viewer, resolver, &file)?;
            viewer.set_query(&query);
            print_matches(viewer, json)?;
        }
        Command::Open => match viewer.open(resolver) {
            OpenOutcome::Opened => print_view(viewer, viewer.render()),
            OpenOutcome::Cancelled => {}
            OpenOutcome::Failed(message) => anyhow::bail!(message),
        },
        Command::Recent { slot: None } => {
            for row in recent_rows(viewer.recents()) {
                println!("{}", row);
            }
        }
        Command::Recent { slot: Some(slot) } => match viewer.open_recent(resolver, slot)? {
            OpenOutcome::Opened => print_view(viewer, viewer.render()),
            OpenOutcome::Cancelled => anyhow::bail!("No recent file in slot {}", slot),
            OpenOutcome::Failed(message) => anyhow::bail!(message),
        },
        Command::RecentsClear => viewer.clear_recents(),
        Command::Prefs {
            dark,
            wrap,
            line_numbers,
            fit,
            theme,
        } => {
            if dark {
                viewer.toggle_dark();
            }
            if wrap {
                viewer.toggle_wrap();
            }
            if line_numbers {
                viewer.toggle_line_numbers();
            }
            if fit {
                let on = !viewer.preferences().fit;
                viewer.set_fit(on);
            }
            if let Some(theme) = theme {
                viewer.set_theme(theme);
            }
            println!("{}", serde_json::to_string_pretty(viewer.preferences())?);
        }
        Command::Themes => {
            let active = viewer.preferences().theme;
            for theme in Theme::all() {
                let marker = if *theme == active { "*" } else { " " };
                println!("{} {:<18} {}", marker, theme.as_str(), theme.name());
            }
        }
        Command::CopyPath { file } => {
            open_file(viewer, resolver, &file)?;
            viewer.copy_path(&mut SystemClipboard::new())?;
            println!("{}", viewer.status());
        }
        Command::Reveal { file } => {
            open_file(viewer, resolver, &file)?;
            viewer.reveal(&SystemRevealer)?;
        }
    }
    Ok(())
}

fn open_file<S: Store>(
    viewer: &mut Viewer<S>,
    resolver: &mut NativeResolver,
    file: &Path,
) -> anyhow::Result<()> {
    match viewer.open_path(resolver, file) {
        OpenOutcome::Failed(message) => Err(anyhow::anyhow!(message)),
        _ => Ok(()),
    }
}

/// Prints the markup for text, or the status line for images.
fn print_view<S: Store>(viewer: &Viewer<S>, markup: Option<String>) {
    match markup {
        Some(markup) => print!("{}", markup),
        None => println!("{}", viewer.status()),
    }
    let summary = viewer.match_summary();
    if !summary.is_empty() {
        eprintln!("{}", summary);
    }
}

/// Wraps rendered lines in a page using the theme's stylesheet.
fn html_page<S: Store>(viewer: &Viewer<S>, markup: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n{}</style>\n</head>\n<body><pre>{}</pre></body>\n</html>\n",
        viewer.stylesheet(),
        markup
    )
}

/// Numbered rows for the slots `recent N` accepts; older entries are
/// listed unnumbered.
fn recent_rows(recents: &Recents) -> Vec<String> {
    recents
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            if i < MAX_HOTKEY_SLOT {
                format!("{}: {}", i + 1, entry.display_label())
            } else {
                format!("   {}", entry.display_label())
            }
        })
        .collect()
}

#[derive(serde::Serialize)]
struct MatchRow {
    offset: usize,
    len: usize,
    line: usize,
}

fn print_matches<S: Store>(viewer: &Viewer<S>, json: bool) -> anyhow::Result<()> {
    let rows = match_rows(viewer);
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    println!("{}", viewer.match_count());
    for row in rows {
        println!("{}:{}", row.line + 1, row.offset);
    }
    Ok(())
}

fn match_rows<S: Store>(viewer: &Viewer<S>) -> Vec<MatchRow> {
    let Some(Content::Text { document, .. }) = viewer.content() else {
        return Vec::new();
    };
    viewer
        .match_index()
        .matches()
        .iter()
        .map(|m| MatchRow {
            offset: m.start,
            len: m.len,
            line: document.char_to_line(m.start).unwrap_or(0),
        })
        .collect()
}
