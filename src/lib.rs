//! CTC (Connectionist Temporal Classification) decoding.
//!
//! Turns a per-timestep probability table produced by an acoustic model into
//! text, either greedily (best single path) or with a bounded beam search
//! that sums the probability of every path collapsing to the same text.
//!
//! * [`text`] — [`Vocabulary`](text::Vocabulary) and the collapse rule.
//! * [`decoder`] — [`GreedyDecoder`](decoder::GreedyDecoder),
//!   [`BeamSearchDecoder`](decoder::BeamSearchDecoder) and table helpers.
//! * [`metric`] — character and word error rates.
//! * [`config`] — TOML settings used by the `ctc-decode` binary.

pub mod config;
pub mod decoder;
pub mod error;
pub mod metric;
pub mod text;

pub use error::CtcError;
