//! CTC decoders.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     Decoder (trait)                       │
//! │                                                           │
//! │   probs [T, V] ──┬──▶ GreedyDecoder ──▶ argmax + collapse │
//! │                  │                                        │
//! │                  └──▶ BeamSearchDecoder                   │
//! │                         extend & merge ─▶ prune (×T)      │
//! │                         merge by text  ─▶ Vec<Hypothesis> │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```
//! use ctc_decoder::decoder::{BeamSearchDecoder, Decoder};
//! use ctc_decoder::text::Vocabulary;
//! use ndarray::array;
//!
//! let vocab = Vocabulary::new(['c', 'a', 't']).unwrap();
//! let decoder = BeamSearchDecoder::new(vocab, 3).unwrap();
//!
//! let probs = array![[0.0, 0.3, 0.5, 0.2], [0.0, 0.3, 0.3, 0.4]];
//! let best = &decoder.decode(probs.view()).unwrap()[0];
//! assert_eq!(best.text, "at");
//! ```

pub mod beam;
pub mod greedy;
pub mod hypothesis;
pub mod table;

use ndarray::ArrayView2;

use crate::config::{AppConfig, DecodeStrategy};
use crate::error::CtcError;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use beam::BeamSearchDecoder;
pub use greedy::GreedyDecoder;
pub use hypothesis::{sort_hypotheses, Hypothesis};
pub use table::{argmax_path, load_table, table_from_rows, ProbabilityTable};

// ---------------------------------------------------------------------------
// Decoder trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface over decoding strategies.
///
/// # Contract
///
/// - `probs` has one row per timestep and one column per vocabulary symbol;
///   anything else fails with [`CtcError::ShapeMismatch`] before decoding.
/// - The result is non-empty and sorted most probable first.
/// - A call owns all of its intermediate state, so one decoder can serve
///   many threads at once.
pub trait Decoder: Send + Sync {
    fn decode(&self, probs: ArrayView2<'_, f64>) -> Result<Vec<Hypothesis>, CtcError>;
}

// Compile-time assertion: Box<dyn Decoder> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn Decoder>) {}
};

/// Build the decoder selected by `config.decoder.strategy`.
///
/// # Errors
///
/// [`CtcError::Configuration`] for an invalid alphabet or a zero beam.
pub fn build_decoder(config: &AppConfig) -> Result<Box<dyn Decoder>, CtcError> {
    let vocabulary = config.vocabulary()?;
    let decoder: Box<dyn Decoder> = match config.decoder.strategy {
        DecodeStrategy::Greedy => Box::new(GreedyDecoder::new(vocabulary)),
        DecodeStrategy::BeamSearch => Box::new(BeamSearchDecoder::new(
            vocabulary,
            config.decoder.beam_size,
        )?),
    };
    Ok(decoder)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
