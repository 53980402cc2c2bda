//! Configuration module for the CTC decoder.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the
//! vocabulary, decoder and output, `AppPaths` for the platform config
//! directory, and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, DecodeStrategy, DecoderConfig, OutputConfig, OutputFormat, VocabularyConfig,
};
