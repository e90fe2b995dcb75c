use chrono_tz::Tz;
use clap::Parser;
use engine::WeekStart;
use serde::Deserialize;
use suggest::GeminiConfig;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/jizhang.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub timezone: String,
    pub week_start: WeekStart,
    pub gemini_api_key: Option<String>,
    pub tag_model: String,
    pub place_model: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub suggest_delay_ms: u64,
    pub min_note_chars: usize,
    pub seed_mock_data: bool,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let gemini = GeminiConfig::default();
        Self {
            timezone: "Asia/Shanghai".to_string(),
            week_start: WeekStart::Sunday,
            gemini_api_key: None,
            tag_model: gemini.tag_model,
            place_model: gemini.place_model,
            latitude: None,
            longitude: None,
            suggest_delay_ms: suggest::DEFAULT_DELAY_MS,
            min_note_chars: suggest::DEFAULT_MIN_NOTE_CHARS,
            seed_mock_data: true,
            log_file: "jizhang.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AppError::InvalidTimezone(self.timezone.clone()))
    }

    /// Position for place suggestions; both coordinates must be set.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.gemini_api_key.clone(),
            tag_model: self.tag_model.clone(),
            place_model: self.place_model.clone(),
            ..GeminiConfig::default()
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "jizhang_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// First column of the history calendar: sunday or monday.
    #[arg(long)]
    week_start: Option<String>,
    /// Gemini API key.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    load_from(Args::parse())
}

fn load_from(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("JIZHANG").try_parsing(true));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }
    if let Some(week_start) = args.week_start {
        settings.week_start = WeekStart::try_from(week_start.as_str())?;
    }
    if let Some(api_key) = args.api_key {
        settings.gemini_api_key = Some(api_key);
    }

    settings.tz()?;
    Ok(settings)
}
