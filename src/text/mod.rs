//! Text side of CTC: the symbol vocabulary and the path collapse rule.
//!
//! * [`Vocabulary`] — `char <-> index` mapping with the blank at index 0.
//! * [`collapse_path`] — turns a raw per-timestep index path into text.

pub mod collapse;
pub mod vocabulary;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use collapse::collapse_path;
pub use vocabulary::{Vocabulary, BLANK, BLANK_INDEX, DEFAULT_ALPHABET};
