use std::env;

use crate::cli::Cli;

const DEFAULT_API_BASE_URL: &str = "https://api.openai.com";

/// Resolved runtime configuration: the parsed flags plus the environment
/// pieces (API key, endpoint override). Immutable after startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub interactive: bool,
    pub engine: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub mode: i64,
    pub verbosity: u8,
    pub top_p: f32,
    pub num_suggestions: u32,
    /// Missing key is not a startup error; requests fail at the remote call.
    pub api_key: Option<String>,
    pub api_base_url: String,
}

impl Config {
    pub fn resolve(args: &Cli) -> Self {
        Self::resolve_with(args, |key| env::var(key).ok())
    }

    fn resolve_with(args: &Cli, mut get_var: impl FnMut(&str) -> Option<String>) -> Self {
        let api_key = get_var("OPENAI_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let api_base_url =
            get_var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Self {
            interactive: args.interactive,
            engine: args.engine.clone(),
            max_tokens: args.max_tokens,
            temperature: args.temperature,
            mode: args.mode,
            verbosity: args.verbosity,
            top_p: args.top_p,
            num_suggestions: args.num_suggestions,
            api_key,
            api_base_url,
        }
    }
}
