use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::evaluation::{RequiredSectionSet, StylePolicy};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if any present variable is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Newline-delimited word list; spelling is not judged when unset.
    pub dictionary_path: Option<PathBuf>,
    pub style: StylePolicy,
    pub required_sections: RequiredSectionSet,
    pub lenient_extraction: bool,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = StylePolicy::default();
        let style = StylePolicy {
            font_family: optional_env("REQUIRED_FONT").unwrap_or(defaults.font_family),
            body_font_size_pt: parse_env("BODY_FONT_SIZE_PT", defaults.body_font_size_pt)?,
        };

        let required_sections = match optional_env("REQUIRED_SECTIONS") {
            Some(raw) => parse_section_list(&raw)
                .context("REQUIRED_SECTIONS must list at least one ';'-separated section")?,
            None => RequiredSectionSet::standard(),
        };

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            dictionary_path: optional_env("DICTIONARY_PATH").map(PathBuf::from),
            style,
            required_sections,
            lenient_extraction: parse_env("LENIENT_EXTRACTION", false)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

/// Splits `Introduction;Budget;Work Plan` into a section set.
pub fn parse_section_list(raw: &str) -> Result<RequiredSectionSet> {
    let labels: Vec<&str> = raw
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    Ok(RequiredSectionSet::new(labels)?)
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}
