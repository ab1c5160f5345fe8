//! Scriptdown - screenplay formatting and editing-session replay.
//!
//! # Usage
//!
//! ```bash
//! scriptdown format scene.txt
//! scriptdown format --markdown --standalone --title "Pilot" scene.md > pilot.html
//! scriptdown replay session.json
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use scriptdown::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use scriptdown::replay::{self, Script};
use scriptdown::screenplay::{self, Screenplay, paragraphs};

/// Markdown-style authoring helpers and a screenplay formatter
#[derive(Parser, Debug)]
#[command(name = "scriptdown", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Format paragraphs (separated by blank lines) as a screenplay
    Format {
        /// Text file to format (reads stdin when omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Render inline markdown (bold, italic, code) before formatting
        #[arg(long)]
        markdown: bool,

        /// Emit a complete HTML document with the stylesheet
        #[arg(long)]
        standalone: bool,

        /// Emit the parsed blocks as JSON
        #[arg(long)]
        json: bool,

        /// Document title for --standalone output
        #[arg(long)]
        title: Option<String>,

        /// Save current command-line flags as defaults
        #[arg(long)]
        save: bool,

        /// Clear saved defaults
        #[arg(long)]
        clear: bool,
    },

    /// Replay a recorded editing session and print the result
    Replay {
        /// JSON script with text, selection and steps
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the companion stylesheet
    Stylesheet,
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Produce the text to print. Rendered output ends with one newline; the
/// fallback returns `text` byte-for-byte.
fn run_format(text: &str, flags: &ConfigFlags) -> Result<String> {
    let paragraphs = if flags.markdown {
        paragraphs::split_rendered(text)
    } else {
        paragraphs::split(text)
    };
    let play = Screenplay::parse(&paragraphs);

    if flags.json {
        let json = serde_json::to_string_pretty(&play).context("Failed to serialize screenplay")?;
        return Ok(format!("{json}\n"));
    }
    if !play.is_productive() {
        tracing::warn!("no dialogue or scene headings found, printing input unchanged");
        return Ok(text.to_string());
    }
    let markup = play.to_markup();
    if flags.standalone {
        let title = flags.title.as_deref().unwrap_or("Screenplay");
        return Ok(screenplay::export_document(title, &markup));
    }
    Ok(format!("{markup}\n"))
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();

    match cli.command {
        Command::Format {
            file, save, clear, ..
        } => {
            let global_path = global_config_path();
            let local_path = local_override_path();
            let cli_flags = parse_flag_tokens(&raw_args);

            if clear {
                clear_config_flags(&global_path)?;
            }
            if save {
                save_config_flags(&global_path, &cli_flags)?;
            }

            let file_flags = if clear {
                ConfigFlags::default()
            } else {
                let global_flags = load_config_flags(&global_path)?;
                let local_flags = load_config_flags(&local_path)?;
                global_flags.union(&local_flags)
            };
            let effective = file_flags.union(&cli_flags);

            let text = read_input(file.as_deref())?;
            let output = run_format(&text, &effective)?;
            print!("{output}");
        }
        Command::Replay { script, json } => {
            let source = std::fs::read_to_string(&script)
                .with_context(|| format!("Failed to read {}", script.display()))?;
            let script = Script::from_json(&source)
                .with_context(|| format!("Failed to parse {}", script.display()))?;
            let outcome = replay::run(&script).context("Replay failed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", outcome.text);
                eprintln!(
                    "selection {}..{} ({} keys handled)",
                    outcome.selection.start, outcome.selection.end, outcome.handled
                );
            }
        }
        Command::Stylesheet => print!("{}", screenplay::stylesheet()),
    }

    Ok(())
}
