use clap::{CommandFactory, FromArgMatches, Parser};
use colored::Colorize;

use crate::resources::EngineCatalog;

/// Command-line flags. All optional; documented ranges are advisory and not
/// enforced, out-of-range values are handed to the remote API unchanged.
#[derive(Debug, Parser)]
#[command(
    name = "sentai",
    version,
    about = "sentAI ChatGPT Terminal",
    long_about = "sentAI ChatGPT Terminal\n\nExample commands:\n  sentai -h  # Display help message\n  sentai -i -e davinci  # Start in interactive"
)]
pub struct Cli {
    /// Enable interactive mode selection
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// OpenAI engine
    #[arg(short = 'e', long, default_value = "text-davinci-003")]
    pub engine: String,

    /// Max tokens for response (maximum: 4096)
    #[arg(short = 't', long = "max_tokens", default_value_t = 800)]
    pub max_tokens: u32,

    /// Temperature for response (range: 0.0 to 1.0)
    #[arg(short = 'T', long, default_value_t = 0.8)]
    pub temperature: f32,

    /// Mode selection: 1 for chat, 2 for programming assist
    #[arg(short = 'm', long, default_value_t = 1)]
    pub mode: i64,

    /// Logging verbosity: 1 DEBUG, 2 INFO, 3 WARNING, 4 ERROR, 5 CRITICAL
    #[arg(short = 'v', long, default_value_t = 2)]
    pub verbosity: u8,

    /// Top-p sampling for response
    #[arg(short = 'P', long = "top_p", default_value_t = 1.0)]
    pub top_p: f32,

    /// Number of suggestions to generate in programming assist mode
    #[arg(short = 'n', long = "num-suggestions", default_value_t = 5)]
    pub num_suggestions: u32,
}

impl Cli {
    /// Parses the process arguments with the engine list from the loaded
    /// catalog spliced into `--engine`'s long help. Exits the process on
    /// `-h`/`--help` (code 0) or on invalid input (usage error).
    pub fn parse_with_catalog(catalog: &EngineCatalog) -> Self {
        let command = Self::command()
            .mut_arg("engine", |arg| arg.long_help(engine_long_help(catalog)));
        let matches = command.get_matches();
        match Self::from_arg_matches(&matches) {
            Ok(cli) => cli,
            Err(err) => err.exit(),
        }
    }
}

fn engine_long_help(catalog: &EngineCatalog) -> String {
    let listing = catalog
        .entries()
        .iter()
        .map(|entry| {
            if entry.description.is_empty() {
                entry.name.clone()
            } else {
                format!("{} {}", entry.name, entry.description)
            }
        })
        .collect::<Vec<_>>()
        .join(" - ");
    format!("OpenAI engine\nAvailable options: {}", listing.red())
}
