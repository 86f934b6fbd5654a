//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub decoder: DecoderSettings,
    pub scoring: ScoringSettings,
    pub penalty: PenaltySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecoderSettings {
    pub sigma: f64,
    pub beam_width: usize,
    pub idle_penalty: f64,
    pub min_points: usize,
    pub max_results: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    pub length_bonus_weight: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PenaltySettings {
    pub vowelless: f64,
    pub double_letter: f64,
    pub consonant_run: f64,
    pub common_word_bonus: f64,
    common_words: Vec<String>,
    /// Lowercased `common_words`, built after parsing.
    #[serde(skip)]
    common_set: HashSet<String>,
}

impl PenaltySettings {
    pub fn is_common_word(&self, lowercase_word: &str) -> bool {
        self.common_set.contains(lowercase_word)
    }

    pub fn common_words(&self) -> &[String] {
        &self.common_words
    }

    /// Replace the allow-list, keeping the lookup set in sync.
    pub fn set_common_words(&mut self, words: Vec<String>) {
        self.common_set = words.iter().map(|w| w.to_lowercase()).collect();
        self.common_words = words;
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let mut s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    let words = std::mem::take(&mut s.penalty.common_words);
    s.penalty.set_common_words(words);
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_negative {
        ($section:ident . $field:ident) => {
            if !s.$section.$field.is_finite() || s.$section.$field < 0.0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be a non-negative finite number".to_string(),
                });
            }
        };
    }
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    if !s.decoder.sigma.is_finite() || s.decoder.sigma <= 0.0 {
        return Err(SettingsError::InvalidValue {
            field: "decoder.sigma".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    check_positive_usize!(decoder.beam_width);
    check_positive_usize!(decoder.max_results);
    check_non_negative!(decoder.idle_penalty);

    check_non_negative!(scoring.length_bonus_weight);

    check_non_negative!(penalty.vowelless);
    check_non_negative!(penalty.double_letter);
    check_non_negative!(penalty.consonant_run);
    check_non_negative!(penalty.common_word_bonus);

    if let Some(w) = s.penalty.common_words.iter().find(|w| w.is_empty()) {
        return Err(SettingsError::InvalidValue {
            field: "penalty.common_words".to_string(),
            reason: format!("empty entry {w:?}"),
        });
    }

    // min_points = 0 is allowed: every non-empty path is decoded.

    Ok(())
}
