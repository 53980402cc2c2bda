//! Probability table construction and inspection.
//!
//! A probability table has one row per timestep and one column per
//! vocabulary symbol.  Decoders borrow it as an [`ArrayView2`]; the helpers
//! here build validated tables from untrusted input (nested vectors or a
//! JSON file).

use std::path::Path;

use anyhow::Context;
use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::error::CtcError;

/// Owned `[timesteps, vocabulary size]` table of probabilities.
pub type ProbabilityTable = Array2<f64>;

/// Build a table from nested rows, each of which must be `width` long.
///
/// # Errors
///
/// - [`CtcError::ShapeMismatch`] — a row has the wrong length.
/// - [`CtcError::InvalidProbability`] — an entry is negative or not finite.
pub fn table_from_rows(rows: Vec<Vec<f64>>, width: usize) -> Result<ProbabilityTable, CtcError> {
    let mut table = Array2::zeros((rows.len(), width));

    for (row_idx, (row, mut dest)) in rows.iter().zip(table.rows_mut()).enumerate() {
        if row.len() != width {
            return Err(CtcError::ShapeMismatch {
                expected: width,
                found: row.len(),
            });
        }
        if let Some((col, &value)) = row
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(CtcError::InvalidProbability {
                row: row_idx,
                col,
                value,
            });
        }
        dest.assign(&ArrayView1::from(row.as_slice()));
    }

    Ok(table)
}

/// Read a JSON array of rows (`[[0.1, 0.9], …]`) from `path`.
pub fn load_table(path: &Path, width: usize) -> anyhow::Result<ProbabilityTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let rows: Vec<Vec<f64>> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of rows", path.display()))?;
    let table = table_from_rows(rows, width)?;
    log::debug!(
        "loaded probability table {}: {} timesteps × {} symbols",
        path.display(),
        table.nrows(),
        table.ncols()
    );
    Ok(table)
}

/// Index of the largest entry of every row; the lowest index wins a tie.
pub fn argmax_path(probs: ArrayView2<'_, f64>) -> Vec<usize> {
    probs
        .rows()
        .into_iter()
        .map(|row| {
            let mut best = 0;
            for (i, &p) in row.iter().enumerate() {
                if p > row[best] {
                    best = i;
                }
            }
            best
        })
        .collect()
}

/// Fail with [`CtcError::ShapeMismatch`] unless every row has `width` columns.
pub(crate) fn check_width(probs: &ArrayView2<'_, f64>, width: usize) -> Result<(), CtcError> {
    if probs.ncols() != width {
        return Err(CtcError::ShapeMismatch {
            expected: width,
            found: probs.ncols(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use tempfile::tempdir;

    #[test]
    fn builds_row_major_table() {
        let table = table_from_rows(vec![vec![0.1, 0.9], vec![0.7, 0.3]], 2).expect("table");
        assert_eq!(table, array![[0.1, 0.9], [0.7, 0.3]]);
    }

    #[test]
    fn no_rows_gives_empty_table_of_requested_width() {
        let table = table_from_rows(Vec::new(), 4).expect("table");
        assert_eq!(table.shape(), &[0, 4]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = table_from_rows(vec![vec![0.5, 0.5], vec![1.0]], 2).unwrap_err();
        assert_eq!(err, CtcError::ShapeMismatch { expected: 2, found: 1 });
    }

    #[test]
    fn negative_and_nan_entries_are_rejected() {
        let err = table_from_rows(vec![vec![0.5, 0.5], vec![1.5, -0.5]], 2).unwrap_err();
        assert_eq!(
            err,
            CtcError::InvalidProbability { row: 1, col: 1, value: -0.5 }
        );
        assert!(matches!(
            table_from_rows(vec![vec![f64::NAN, 1.0]], 2),
            Err(CtcError::InvalidProbability { row: 0, col: 0, .. })
        ));
    }

    #[test]
    fn argmax_prefers_lowest_index_on_ties() {
        let probs = array![[0.2, 0.4, 0.4], [0.6, 0.2, 0.2], [0.1, 0.1, 0.8]];
        assert_eq!(argmax_path(probs.view()), vec![1, 0, 2]);
    }

    #[test]
    fn loads_table_from_json_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("probs.json");
        std::fs::write(&path, "[[0.0, 0.3, 0.7], [1.0, 0.0, 0.0]]").expect("write");

        let table = load_table(&path, 3).expect("load");
        assert_eq!(table.shape(), &[2, 3]);
        assert_eq!(table[[0, 2]], 0.7);

        assert!(load_table(&path, 4).is_err());
        assert!(load_table(&dir.path().join("missing.json"), 3).is_err());
    }
}
