//! Decoder settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files.  Missing keys fall back
//! to their defaults, so a settings file only needs the values it changes.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::decoder::BeamSearchDecoder;
use crate::error::CtcError;
use crate::text::{Vocabulary, DEFAULT_ALPHABET};

// ---------------------------------------------------------------------------
// DecodeStrategy
// ---------------------------------------------------------------------------

/// Selects how a probability table is turned into text.
///
/// | Variant    | Output                                   | Cost            |
/// |------------|------------------------------------------|-----------------|
/// | Greedy     | best single path, collapsed              | `O(T·V)`        |
/// | BeamSearch | up to `beam_size` texts with path mass   | `O(T·B·V·log)`  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodeStrategy {
    Greedy,
    BeamSearch,
}

impl Default for DecodeStrategy {
    fn default() -> Self {
        Self::BeamSearch
    }
}

// ---------------------------------------------------------------------------
// OutputFormat
// ---------------------------------------------------------------------------

/// How the `ctc-decode` binary prints hypotheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// One `<probability>\t<text>` line per hypothesis.
    Text,
    /// A JSON array of `{ "text", "probability" }` objects.
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Text
    }
}

// ---------------------------------------------------------------------------
// VocabularyConfig
// ---------------------------------------------------------------------------

/// Symbol set of the model producing the probability tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Every `char` is one symbol, in model column order (after the blank,
    /// which is always column 0 and must not be listed).
    pub alphabet: String,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// DecoderConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub strategy: DecodeStrategy,
    /// States kept per timestep in beam search (≥ 1).
    pub beam_size: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            strategy: DecodeStrategy::default(),
            beam_size: BeamSearchDecoder::DEFAULT_BEAM_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Maximum number of hypotheses printed (≥ 1).
    pub n_best: usize,
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            n_best: 5,
            format: OutputFormat::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level configuration, serialised as `settings.toml`.
///
/// ```toml
/// [vocabulary]
/// alphabet = "abcdefghijklmnopqrstuvwxyz "
///
/// [decoder]
/// strategy = "BeamSearch"
/// beam_size = 100
///
/// [output]
/// n_best = 5
/// format = "Text"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub vocabulary: VocabularyConfig,
    pub decoder: DecoderConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("{} not found; using default settings", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build the configured [`Vocabulary`].
    pub fn vocabulary(&self) -> Result<Vocabulary, CtcError> {
        Vocabulary::from_alphabet(&self.vocabulary.alphabet)
    }

    /// Reject settings no decoder could run with.
    pub fn validate(&self) -> Result<(), CtcError> {
        self.vocabulary()?;
        if self.decoder.beam_size == 0 {
            return Err(CtcError::Configuration(
                "decoder.beam_size must be at least 1".into(),
            ));
        }
        if self.output.n_best == 0 {
            return Err(CtcError::Configuration(
                "output.n_best must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
