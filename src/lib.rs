pub mod cli;
pub mod config;
pub mod display;
pub mod input;
pub mod logging;
pub mod modes;
pub mod providers;
pub mod resources;
pub mod session;

use anyhow::{Context, Result};
use reqwest::Client;
use std::io;
use tracing::debug;

use cli::Cli;
use config::Config;
use resources::ResourceSet;
use session::Session;

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    let resource_dir = resources::resource_dir_from_env();
    let res = ResourceSet::load(&resource_dir)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    display::show_ascii_art(&mut out, &res.ascii_art).context("Failed to write to stdout")?;

    let args = Cli::parse_with_catalog(&res.engines);
    let cfg = Config::resolve(&args);
    logging::init(cfg.verbosity);
    debug!(
        engine = %cfg.engine,
        mode = cfg.mode,
        interactive = cfg.interactive,
        "resolved configuration"
    );

    let mut rng = rand::thread_rng();
    display::show_quote(&mut out, res.quotes.choose(&mut rng))
        .context("Failed to write to stdout")?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let mode = if cfg.interactive {
        display::show_interactive_header(&mut out).context("Failed to write to stdout")?;
        modes::select_mode(&mut input, &mut out)?
    } else {
        cfg.mode
    };

    let client = Client::builder()
        .build()
        .context("Failed to initialize HTTP client")?;
    let mut session = Session::new(&client, &cfg);

    if mode == 2 {
        display::show_programming_assist_banner(&mut out).context("Failed to write to stdout")?;
        modes::run_programming_assist(&mut session, &mut input, &mut out).await?;
    } else {
        modes::run_chat(&mut session, &mut input, &mut out).await?;
    }

    display::show_program_exit(&mut out).context("Failed to write to stdout")?;
    Ok(())
}
