//! CTC beam search.
//!
//! # Algorithm
//!
//! The beam maps a state `(collapsed text, last raw symbol)` to the summed
//! probability of every path that reaches it.  For each timestep:
//!
//! ```text
//! for each (text, last) -> p in beam:
//!     for each symbol s with probability q:
//!         text' = text          if s == last   (repeat collapses)
//!               = text + s      otherwise
//!         next[(text' without blanks, s)] += p * q
//! beam = top beam_size entries of next
//! ```
//!
//! After the last timestep, states that share a text are summed into a
//! single [`Hypothesis`].
//!
//! # Ordering
//!
//! Pruning and the final output both order by probability (descending),
//! then by text, then by last-symbol index.  The order is total, so results
//! do not depend on hash iteration order or on the platform.  Accumulation
//! always walks the previous (sorted) beam in order, so floating-point sums
//! are reproducible too.

use std::cmp::Ordering;
use std::collections::HashMap;

use ndarray::{ArrayView1, ArrayView2};

use crate::decoder::hypothesis::{sort_hypotheses, Hypothesis};
use crate::decoder::table::check_width;
use crate::decoder::Decoder;
use crate::error::CtcError;
use crate::text::{Vocabulary, BLANK, BLANK_INDEX};

// ---------------------------------------------------------------------------
// Beam state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BeamKey {
    /// Collapsed text emitted so far; never contains [`BLANK`].
    text: String,
    /// Raw symbol index of the previous timestep, blank included.
    last: usize,
}

type Beam = Vec<(BeamKey, f64)>;

fn rank_state(a: &(BeamKey, f64), b: &(BeamKey, f64)) -> Ordering {
    b.1.total_cmp(&a.1)
        .then_with(|| a.0.text.cmp(&b.0.text))
        .then_with(|| a.0.last.cmp(&b.0.last))
}

fn validate_beam_size(beam_size: usize) -> Result<(), CtcError> {
    if beam_size == 0 {
        return Err(CtcError::Configuration(
            "beam size must be at least 1".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// BeamSearchDecoder
// ---------------------------------------------------------------------------

/// Approximates the CTC marginal over paths with a bounded beam.
///
/// A beam of 1 behaves much like greedy decoding, but can still differ
/// because paths that re-converge onto the same state are summed.
#[derive(Debug, Clone)]
pub struct BeamSearchDecoder {
    vocabulary: Vocabulary,
    beam_size: usize,
}

impl BeamSearchDecoder {
    /// Beam width used when none is configured.
    pub const DEFAULT_BEAM_SIZE: usize = 100;

    /// # Errors
    ///
    /// [`CtcError::Configuration`] when `beam_size` is zero.
    pub fn new(vocabulary: Vocabulary, beam_size: usize) -> Result<Self, CtcError> {
        validate_beam_size(beam_size)?;
        Ok(Self {
            vocabulary,
            beam_size,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn beam_size(&self) -> usize {
        self.beam_size
    }

    /// Decode `probs` (shape `[T, V]`) keeping at most `beam_size` states per
    /// timestep.
    ///
    /// Returns one hypothesis per distinct text among the surviving states,
    /// most probable first.  An empty table yields `("", 1.0)`.
    ///
    /// # Errors
    ///
    /// - [`CtcError::Configuration`] — `beam_size` is zero.
    /// - [`CtcError::ShapeMismatch`] — `probs` does not have `V` columns.
    pub fn decode_with_beam(
        &self,
        probs: ArrayView2<'_, f64>,
        beam_size: usize,
    ) -> Result<Vec<Hypothesis>, CtcError> {
        validate_beam_size(beam_size)?;
        check_width(&probs, self.vocabulary.size())?;

        let mut beam: Beam = vec![(
            BeamKey {
                text: String::new(),
                last: BLANK_INDEX,
            },
            1.0,
        )];

        for (t, row) in probs.rows().into_iter().enumerate() {
            let candidates = self.extend_and_merge(&beam, row);
            let considered = candidates.len();
            beam = cut_beams(candidates, beam_size);
            log::trace!("t={t}: kept {} of {considered} states", beam.len());
        }

        let hypotheses = merge_by_text(beam);
        log::debug!(
            "beam search: {} timesteps, beam {beam_size}, {} hypotheses",
            probs.nrows(),
            hypotheses.len()
        );
        Ok(hypotheses)
    }

    fn extend_and_merge(&self, beam: &[(BeamKey, f64)], row: ArrayView1<'_, f64>) -> Beam {
        let symbols = self.vocabulary.symbols();
        let mut next: HashMap<BeamKey, f64> = HashMap::with_capacity(beam.len() * symbols.len());

        for (key, prob) in beam {
            for (s, (&symbol, &q)) in symbols.iter().zip(row.iter()).enumerate() {
                let mut text = key.text.clone();
                if s != key.last {
                    text.push(symbol);
                }
                if text.contains(BLANK) {
                    text.retain(|c| c != BLANK);
                }
                *next.entry(BeamKey { text, last: s }).or_insert(0.0) += prob * q;
            }
        }

        next.into_iter().collect()
    }
}

impl Decoder for BeamSearchDecoder {
    fn decode(&self, probs: ArrayView2<'_, f64>) -> Result<Vec<Hypothesis>, CtcError> {
        self.decode_with_beam(probs, self.beam_size)
    }
}

/// Keep the `beam_size` best states, sorted.
fn cut_beams(mut candidates: Beam, beam_size: usize) -> Beam {
    if candidates.len() > beam_size {
        candidates.select_nth_unstable_by(beam_size - 1, rank_state);
        candidates.truncate(beam_size);
    }
    candidates.sort_by(rank_state);
    candidates
}

/// Sum states that differ only in their last symbol.
fn merge_by_text(beam: Beam) -> Vec<Hypothesis> {
    let mut totals: HashMap<String, f64> = HashMap::with_capacity(beam.len());
    for (key, prob) in beam {
        *totals.entry(key.text).or_insert(0.0) += prob;
    }

    let mut hypotheses: Vec<Hypothesis> = totals
        .into_iter()
        .map(|(text, probability)| Hypothesis { text, probability })
        .collect();
    sort_hypotheses(&mut hypotheses);
    hypotheses
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
