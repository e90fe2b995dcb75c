mod app;
mod config;
mod error;
mod ui;

use std::{fs::OpenOptions, sync::Mutex};

use suggest::{AnySuggester, GeminiSuggester, StaticSuggester};
use tracing_subscriber::EnvFilter;

use crate::{config::AppConfig, error::Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;

    let gemini = GeminiSuggester::new(config.gemini());
    let suggester = if gemini.has_credential() {
        tracing::info!("smart suggestions enabled");
        AnySuggester::Gemini(gemini)
    } else {
        tracing::info!("no Gemini API key, smart suggestions disabled");
        AnySuggester::Static(StaticSuggester::default())
    };

    let mut app = app::App::new(config, suggester)?;
    app.run().await?;
    Ok(())
}

/// Logs go to a file: stdout belongs to the terminal UI.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "jizhang_tui={level},engine={level},suggest={level}",
            level = config.log_level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
