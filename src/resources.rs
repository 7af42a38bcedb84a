use anyhow::{Context, Result, bail};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_RESOURCE_DIR: &str = "resources";

const ENGINE_CATALOG_FILE: &str = "engines.json";
const HAIKU_FILE: &str = "haikus.json";
const QUOTE_FILE: &str = "quotes.json";
const ASCII_ART_FILE: &str = "ascii.txt";

/// One engine the remote API accepts, with an optional human-readable blurb
/// for the help text.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EngineEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Ordered engine-name catalog. Only consulted when rendering help text;
/// `--engine` values are passed through to the API unvalidated.
#[derive(Debug, Clone)]
pub struct EngineCatalog {
    entries: Vec<EngineEntry>,
}

impl EngineCatalog {
    pub fn entries(&self) -> &[EngineEntry] {
        &self.entries
    }
}

/// The two display-string pools, kept disjoint so one pool is picked at
/// random before picking an entry.
#[derive(Debug, Clone)]
pub struct QuoteSet {
    haikus: Vec<String>,
    quotes: Vec<String>,
}

impl QuoteSet {
    pub fn choose<R: Rng>(&self, rng: &mut R) -> &str {
        let pool = if rng.gen_bool(0.5) {
            &self.haikus
        } else {
            &self.quotes
        };
        pool.choose(rng).map(String::as_str).unwrap_or_default()
    }
}

/// Everything loaded from the resource directory at startup. Read-only for
/// the rest of the process.
#[derive(Debug, Clone)]
pub struct ResourceSet {
    pub engines: EngineCatalog,
    pub quotes: QuoteSet,
    pub ascii_art: String,
}

impl ResourceSet {
    /// Loads all four resource files. Any missing or malformed file is a
    /// startup-fatal error.
    pub fn load(dir: &Path) -> Result<Self> {
        let entries: Vec<EngineEntry> = load_json(&dir.join(ENGINE_CATALOG_FILE))?;
        if entries.is_empty() {
            bail!(
                "Engine catalog '{}' contains no entries",
                dir.join(ENGINE_CATALOG_FILE).display()
            );
        }

        let haikus: Vec<String> = load_json(&dir.join(HAIKU_FILE))?;
        if haikus.is_empty() {
            bail!("Haiku list '{}' contains no entries", dir.join(HAIKU_FILE).display());
        }

        let quotes: Vec<String> = load_json(&dir.join(QUOTE_FILE))?;
        if quotes.is_empty() {
            bail!("Quote list '{}' contains no entries", dir.join(QUOTE_FILE).display());
        }

        let ascii_path = dir.join(ASCII_ART_FILE);
        let ascii_art = fs::read_to_string(&ascii_path)
            .with_context(|| format!("Failed to read ASCII art from '{}'", ascii_path.display()))?;

        Ok(Self {
            engines: EngineCatalog { entries },
            quotes: QuoteSet { haikus, quotes },
            ascii_art,
        })
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read resource file '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse resource file '{}'", path.display()))
}

pub fn resource_dir_from_env() -> PathBuf {
    resource_dir_from(env::var("RESOURCES_DIR").ok().as_deref())
}

fn resource_dir_from(raw: Option<&str>) -> PathBuf {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RESOURCE_DIR))
}
