//! Decoded text candidates and their ranking.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A decoded text with the probability mass of every path that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub text: String,
    pub probability: f64,
}

impl Hypothesis {
    pub fn new(text: impl Into<String>, probability: f64) -> Self {
        Self {
            text: text.into(),
            probability,
        }
    }

    /// Output order: higher probability first, equal probabilities by text.
    pub fn rank(&self, other: &Self) -> Ordering {
        other
            .probability
            .total_cmp(&self.probability)
            .then_with(|| self.text.cmp(&other.text))
    }
}

/// Sort `hypotheses` into output order (see [`Hypothesis::rank`]).
pub fn sort_hypotheses(hypotheses: &mut [Hypothesis]) {
    hypotheses.sort_by(Hypothesis::rank);
}
