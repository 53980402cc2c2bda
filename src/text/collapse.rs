//! The CTC collapse rule over a raw symbol path.

use crate::error::CtcError;
use crate::text::vocabulary::{Vocabulary, BLANK_INDEX};

/// Collapse a raw index path (one index per timestep) into text.
///
/// Consecutive duplicates are merged and blanks are dropped in a single
/// pass.  The comparison uses the raw previous index, so a blank between two
/// equal symbols keeps both of them:
///
/// ```
/// use ctc_decoder::text::{collapse_path, Vocabulary};
///
/// let vocab = Vocabulary::new(['a']).unwrap();
/// assert_eq!(collapse_path(&vocab, &[1, 1, 0, 1]).unwrap(), "aa");
/// assert_eq!(collapse_path(&vocab, &[1, 1, 1]).unwrap(), "a");
/// ```
///
/// # Errors
///
/// [`CtcError::IndexOutOfRange`] if any index is not a vocabulary index.
/// Nothing is returned for a partially valid path.
pub fn collapse_path(vocab: &Vocabulary, indices: &[usize]) -> Result<String, CtcError> {
    let symbols = indices
        .iter()
        .map(|&i| vocab.symbol_of(i))
        .collect::<Result<Vec<_>, _>>()?;

    let mut text = String::with_capacity(symbols.len());
    let mut previous: Option<usize> = None;

    for (&index, &symbol) in indices.iter().zip(&symbols) {
        // The first symbol is skipped iff it is the blank; later ones also
        // need to differ from the raw previous symbol.
        if index != BLANK_INDEX && previous != Some(index) {
            text.push(symbol);
        }
        previous = Some(index);
    }

    Ok(text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
