//! Best-path (greedy) decoding.

use ndarray::ArrayView2;

use crate::decoder::hypothesis::Hypothesis;
use crate::decoder::table::{argmax_path, check_width};
use crate::decoder::Decoder;
use crate::error::CtcError;
use crate::text::{collapse_path, Vocabulary};

/// Takes the most likely symbol at every timestep and collapses the path.
///
/// The single returned [`Hypothesis`] carries the probability of that one
/// path, not the marginal of its text.
#[derive(Debug, Clone)]
pub struct GreedyDecoder {
    vocabulary: Vocabulary,
}

impl GreedyDecoder {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Decode `probs` and return only the text.
    pub fn decode_text(&self, probs: ArrayView2<'_, f64>) -> Result<String, CtcError> {
        check_width(&probs, self.vocabulary.size())?;
        collapse_path(&self.vocabulary, &argmax_path(probs))
    }
}

impl Decoder for GreedyDecoder {
    fn decode(&self, probs: ArrayView2<'_, f64>) -> Result<Vec<Hypothesis>, CtcError> {
        check_width(&probs, self.vocabulary.size())?;

        let path = argmax_path(probs);
        let probability = path
            .iter()
            .enumerate()
            .map(|(t, &i)| probs[[t, i]])
            .product::<f64>();
        let text = collapse_path(&self.vocabulary, &path)?;

        log::debug!("greedy decode: {} timesteps -> {text:?}", path.len());
        Ok(vec![Hypothesis { text, probability }])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn cat_decoder() -> GreedyDecoder {
        GreedyDecoder::new(Vocabulary::new(['c', 'a', 't']).unwrap())
    }

    #[test]
    fn follows_argmax_and_collapses() {
        // argmax path: a a ^ a t
        let probs = array![
            [0.1, 0.1, 0.7, 0.1],
            [0.1, 0.1, 0.6, 0.2],
            [0.5, 0.2, 0.2, 0.1],
            [0.0, 0.0, 1.0, 0.0],
            [0.2, 0.1, 0.2, 0.5],
        ];
        let decoder = cat_decoder();
        assert_eq!(decoder.decode_text(probs.view()).unwrap(), "aat");

        let hypos = decoder.decode(probs.view()).unwrap();
        assert_eq!(hypos.len(), 1);
        assert_eq!(hypos[0].text, "aat");
        let expected = 0.7 * 0.6 * 0.5 * 1.0 * 0.5;
        assert!((hypos[0].probability - expected).abs() < 1e-12);
    }

    #[test]
    fn empty_table_decodes_to_empty_text() {
        let probs = Array2::<f64>::zeros((0, 4));
        let hypos = cat_decoder().decode(probs.view()).unwrap();
        assert_eq!(hypos, vec![Hypothesis::new("", 1.0)]);
    }

    #[test]
    fn wrong_width_is_a_shape_mismatch() {
        let probs = array![[0.5, 0.5]];
        assert_eq!(
            cat_decoder().decode(probs.view()),
            Err(CtcError::ShapeMismatch { expected: 4, found: 2 })
        );
    }
}
