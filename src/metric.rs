//! Transcription quality metrics.
//!
//! | Metric | Unit       | Normalised by              |
//! |--------|------------|----------------------------|
//! | CER    | characters | characters in the target   |
//! | WER    | words      | words in the target        |
//!
//! An empty target would divide by zero, so the denominator is floored at
//! [`EMPTY_TARGET_FLOOR`]: any insertion against an empty target yields a
//! very large rate, and an empty prediction yields `0.0`.

/// Smallest denominator used when the target is empty.
pub const EMPTY_TARGET_FLOOR: f64 = 1e-5;

/// Levenshtein distance between two sequences (unit cost insert, delete and
/// substitute).
pub fn edit_distance<T: PartialEq>(source: &[T], target: &[T]) -> usize {
    if source.is_empty() {
        return target.len();
    }

    // Single rolling row over `target`.
    let mut row: Vec<usize> = (0..=target.len()).collect();
    for (i, s) in source.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, t) in target.iter().enumerate() {
            let substitution = diagonal + usize::from(s != t);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }
    row[target.len()]
}

/// Character error rate of `predicted_text` against `target_text`.
pub fn calc_cer(target_text: &str, predicted_text: &str) -> f64 {
    let target: Vec<char> = target_text.chars().collect();
    let predicted: Vec<char> = predicted_text.chars().collect();
    rate(edit_distance(&target, &predicted), target.len())
}

/// Word error rate; words are whitespace-separated.
pub fn calc_wer(target_text: &str, predicted_text: &str) -> f64 {
    let target: Vec<&str> = target_text.split_whitespace().collect();
    let predicted: Vec<&str> = predicted_text.split_whitespace().collect();
    rate(edit_distance(&target, &predicted), target.len())
}

fn rate(distance: usize, target_len: usize) -> f64 {
    distance as f64 / (target_len as f64).max(EMPTY_TARGET_FLOOR)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn edit_distance_classic_cases() {
        assert_eq!(edit_distance(&chars("kitten"), &chars("sitting")), 3);
        assert_eq!(edit_distance(&chars("flaw"), &chars("lawn")), 2);
        assert_eq!(edit_distance(&chars(""), &chars("abc")), 3);
        assert_eq!(edit_distance(&chars("abc"), &chars("")), 3);
        assert_eq!(edit_distance(&chars("same"), &chars("same")), 0);
    }

    #[test]
    fn cer_counts_characters() {
        assert_eq!(calc_cer("cat", "cat"), 0.0);
        assert!((calc_cer("cat", "cut") - 1.0 / 3.0).abs() < 1e-12);
        assert!((calc_cer("abcd", "") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn wer_counts_words() {
        let target = "i wish i started doing this hw earlier";
        assert_eq!(calc_wer(target, target), 0.0);
        assert!((calc_wer(target, "i wish i started this hw earlier") - 1.0 / 8.0).abs() < 1e-12);
        assert!((calc_wer("hello world", "hello  there world") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty_target_uses_floor() {
        assert_eq!(calc_cer("", ""), 0.0);
        assert_eq!(calc_wer("", ""), 0.0);
        assert!((calc_cer("", "ab") - 2.0 / EMPTY_TARGET_FLOOR).abs() < 1e-6);
        assert!((calc_wer("", "one") - 1.0 / EMPTY_TARGET_FLOOR).abs() < 1e-6);
    }
}
