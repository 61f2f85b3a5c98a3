use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::domain::directory::Locale;
use crate::domain::listing::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

const DEFAULT_AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";
const DEFAULT_DEEPL_API_URL: &str = "https://api-free.deepl.com/v2/translate";

/// Runtime configuration for the directory API server
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Airtable
    pub airtable_api_url: String,
    pub airtable_api_key: String,
    pub airtable_base_id: String,
    pub listing_page_size: usize,
}

/// Configuration for the build-time `translate-locales` binary
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub environment: Environment,
    pub log_format: LogFormat,
    pub deepl_api_url: String,
    pub deepl_auth_key: String,
    pub source_path: PathBuf,
    pub source_locale: Locale,
    pub out_dir: PathBuf,
    pub overrides_dir: PathBuf,
    pub target_locales: Vec<Locale>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: environment_from_env(),
            log_format: log_format_from_env(),
            airtable_api_url: env::var("AIRTABLE_API_URL")
                .unwrap_or_else(|_| DEFAULT_AIRTABLE_API_URL.to_string()),
            airtable_api_key: required("AIRTABLE_API_KEY")?,
            airtable_base_id: required("AIRTABLE_BASE_ID")?,
            listing_page_size: env::var("LISTING_PAGE_SIZE")
                .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
                .parse::<usize>()?
                .clamp(1, MAX_PAGE_SIZE),
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

impl TranslateConfig {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = TranslateConfig {
            environment: environment_from_env(),
            log_format: log_format_from_env(),
            deepl_api_url: env::var("DEEPL_API_URL")
                .unwrap_or_else(|_| DEFAULT_DEEPL_API_URL.to_string()),
            deepl_auth_key: required("DEEPL_AUTH_KEY")?,
            source_path: env::var("LOCALES_SOURCE")
                .unwrap_or_else(|_| "public/locales/en/translation.json".to_string())
                .into(),
            source_locale: env::var("LOCALES_SOURCE_LOCALE")
                .unwrap_or_else(|_| "en".to_string())
                .parse()?,
            out_dir: env::var("LOCALES_OUT_DIR")
                .unwrap_or_else(|_| "public/locales".to_string())
                .into(),
            overrides_dir: env::var("LOCALES_OVERRIDES_DIR")
                .unwrap_or_else(|_| "locales/overrides".to_string())
                .into(),
            target_locales: parse_locales(
                &env::var("TARGET_LOCALES").unwrap_or_else(|_| "ar,fr,es".to_string()),
            )?,
        };

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

/// Missing and blank values are both configuration errors
fn required(key: &str) -> Result<String, Box<dyn std::error::Error>> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{} is missing. Set it in the environment or in a .env file", key).into()),
    }
}

fn environment_from_env() -> Environment {
    match env::var("ENVIRONMENT").unwrap_or_default().as_str() {
        "production" => Environment::Production,
        _ => Environment::Development,
    }
}

fn log_format_from_env() -> LogFormat {
    match env::var("LOG_FORMAT").unwrap_or_default().as_str() {
        "json" => LogFormat::Json,
        _ => LogFormat::Pretty,
    }
}

fn parse_locales(raw: &str) -> Result<Vec<Locale>, Box<dyn std::error::Error>> {
    let mut locales = Vec::new();
    for code in raw.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let locale: Locale = code.parse()?;
        if !locales.contains(&locale) {
            locales.push(locale);
        }
    }
    Ok(locales)
}
