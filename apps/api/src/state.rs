use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::evaluation::spelling::{DictionarySpellChecker, PermissiveSpellChecker};
use crate::evaluation::{RequiredSectionSet, SpellChecker, StylePolicy};
use crate::extraction::TextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is immutable; concurrent evaluations share no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Fixed organizational checklist used by fixed-policy evaluations.
    pub standard_sections: Arc<RequiredSectionSet>,
    pub style: Arc<StylePolicy>,
    /// Pluggable spell checker. Default: dictionary if configured, else permissive.
    pub spell_checker: Arc<dyn SpellChecker>,
    pub extractor: TextExtractor,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let spell_checker: Arc<dyn SpellChecker> = match &config.dictionary_path {
            Some(path) => Arc::new(DictionarySpellChecker::load(path)?),
            None => {
                warn!("DICTIONARY_PATH not set; spelling will not be checked");
                Arc::new(PermissiveSpellChecker)
            }
        };
        info!(
            "Style policy: {} {}pt, {} standard sections",
            config.style.font_family,
            config.style.body_font_size_pt,
            config.required_sections.len()
        );

        Ok(Self {
            standard_sections: Arc::new(config.required_sections.clone()),
            style: Arc::new(config.style.clone()),
            spell_checker,
            extractor: TextExtractor::new(config.lenient_extraction),
            config,
        })
    }
}
