//! Character vocabulary with a reserved CTC blank.
//!
//! [`Vocabulary`] maps every symbol of an alphabet to a dense index.  The
//! blank symbol [`BLANK`] is always prepended at [`BLANK_INDEX`], so a
//! vocabulary built from `n` symbols has size `n + 1`.
//!
//! | Index | Symbol            |
//! |-------|-------------------|
//! | 0     | `^` (blank)       |
//! | 1..   | alphabet, in order |

use std::collections::HashMap;

use crate::error::CtcError;

/// Reserved "no emission" symbol.
pub const BLANK: char = '^';

/// Index of [`BLANK`] in every vocabulary.
pub const BLANK_INDEX: usize = 0;

/// Alphabet used when none is configured: lowercase latin letters and space.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz ";

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Immutable, bijective `symbol <-> index` mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// `symbols[0]` is always [`BLANK`].
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Vocabulary {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Build a vocabulary from an ordered alphabet.  The blank is prepended
    /// automatically.
    ///
    /// # Errors
    ///
    /// [`CtcError::Configuration`] when the alphabet is empty, contains the
    /// blank symbol, or lists a symbol twice.
    ///
    /// ```
    /// use ctc_decoder::text::Vocabulary;
    ///
    /// let vocab = Vocabulary::new(['c', 'a', 't']).unwrap();
    /// assert_eq!(vocab.size(), 4);
    /// assert_eq!(vocab.index_of('c').unwrap(), 1);
    /// ```
    pub fn new<I>(alphabet: I) -> Result<Self, CtcError>
    where
        I: IntoIterator<Item = char>,
    {
        let mut symbols = vec![BLANK];
        let mut index = HashMap::from([(BLANK, BLANK_INDEX)]);

        for symbol in alphabet {
            if symbol == BLANK {
                return Err(CtcError::Configuration(format!(
                    "alphabet must not contain the blank symbol {BLANK:?}"
                )));
            }
            if index.insert(symbol, symbols.len()).is_some() {
                return Err(CtcError::Configuration(format!(
                    "alphabet lists symbol {symbol:?} more than once"
                )));
            }
            symbols.push(symbol);
        }

        if symbols.len() == 1 {
            return Err(CtcError::Configuration("alphabet is empty".into()));
        }

        Ok(Self { symbols, index })
    }

    /// Build a vocabulary where every `char` of `alphabet` is one symbol.
    pub fn from_alphabet(alphabet: &str) -> Result<Self, CtcError> {
        Self::new(alphabet.chars())
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Index of `symbol`.
    pub fn index_of(&self, symbol: char) -> Result<usize, CtcError> {
        self.index
            .get(&symbol)
            .copied()
            .ok_or(CtcError::UnknownSymbol(symbol))
    }

    /// Symbol stored at `index`.
    pub fn symbol_of(&self, index: usize) -> Result<char, CtcError> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(CtcError::IndexOutOfRange {
                index,
                size: self.symbols.len(),
            })
    }

    /// Number of symbols, blank included.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// All symbols in index order, blank first.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// The configured alphabet without the blank.
    pub fn alphabet(&self) -> &[char] {
        &self.symbols[BLANK_INDEX + 1..]
    }

    /// Whether `symbol` (blank included) has an index.
    pub fn contains(&self, symbol: char) -> bool {
        self.index.contains_key(&symbol)
    }

    // -----------------------------------------------------------------------
    // Text helpers
    // -----------------------------------------------------------------------

    /// Lower-case `text`, drop characters the vocabulary cannot represent
    /// and squeeze whitespace runs into a single space.
    ///
    /// When the alphabet has no space, words are concatenated.
    ///
    /// ```
    /// use ctc_decoder::text::Vocabulary;
    ///
    /// let vocab = Vocabulary::default();
    /// assert_eq!(vocab.normalize_text("  Hello,   World! "), "hello world");
    /// ```
    pub fn normalize_text(&self, text: &str) -> String {
        let separator = if self.contains(' ') { " " } else { "" };
        text.to_lowercase()
            .split_whitespace()
            .map(|word| {
                word.chars()
                    .filter(|&c| c != BLANK && self.contains(c))
                    .collect::<String>()
            })
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Map every character of `text` to its index, without any collapsing.
    pub fn encode(&self, text: &str) -> Result<Vec<usize>, CtcError> {
        text.chars().map(|c| self.index_of(c)).collect()
    }

    /// Join the symbols of `indices` verbatim, blanks and repeats included.
    pub fn decode_raw(&self, indices: &[usize]) -> Result<String, CtcError> {
        indices.iter().map(|&i| self.symbol_of(i)).collect()
    }
}

impl Default for Vocabulary {
    /// Vocabulary over [`DEFAULT_ALPHABET`].
    fn default() -> Self {
        let symbols: Vec<char> = std::iter::once(BLANK)
            .chain(DEFAULT_ALPHABET.chars())
            .collect();
        let index = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { symbols, index }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_prepended_at_index_zero() {
        let vocab = Vocabulary::new(['c', 'a', 't']).expect("vocab");
        assert_eq!(vocab.size(), 4);
        assert_eq!(vocab.symbol_of(BLANK_INDEX).unwrap(), BLANK);
        assert_eq!(vocab.index_of(BLANK).unwrap(), BLANK_INDEX);
        assert_eq!(vocab.symbols(), &['^', 'c', 'a', 't']);
        assert_eq!(vocab.alphabet(), &['c', 'a', 't']);
    }

    #[test]
    fn indices_round_trip_through_symbols() {
        let vocab = Vocabulary::default();
        for index in 0..vocab.size() {
            let symbol = vocab.symbol_of(index).unwrap();
            assert_eq!(vocab.index_of(symbol).unwrap(), index);
        }
    }

    #[test]
    fn default_vocabulary_has_letters_and_space() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.size(), 28);
        assert_eq!(vocab.index_of('a').unwrap(), 1);
        assert_eq!(vocab.index_of(' ').unwrap(), 27);
        assert_eq!(vocab, Vocabulary::from_alphabet(DEFAULT_ALPHABET).unwrap());
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.index_of('Z'), Err(CtcError::UnknownSymbol('Z')));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let vocab = Vocabulary::new(['a']).unwrap();
        assert_eq!(
            vocab.symbol_of(2),
            Err(CtcError::IndexOutOfRange { index: 2, size: 2 })
        );
    }

    #[test]
    fn empty_alphabet_is_a_configuration_error() {
        assert!(matches!(
            Vocabulary::from_alphabet(""),
            Err(CtcError::Configuration(_))
        ));
    }

    #[test]
    fn duplicate_or_blank_symbols_are_configuration_errors() {
        assert!(matches!(
            Vocabulary::from_alphabet("aba"),
            Err(CtcError::Configuration(_))
        ));
        assert!(matches!(
            Vocabulary::from_alphabet("a^b"),
            Err(CtcError::Configuration(_))
        ));
    }

    #[test]
    fn encode_and_decode_raw_are_symbol_by_symbol() {
        let vocab = Vocabulary::new(['a', 'b']).unwrap();
        let encoded = vocab.encode("aa^b").unwrap();
        assert_eq!(encoded, vec![1, 1, 0, 2]);
        assert_eq!(vocab.decode_raw(&encoded).unwrap(), "aa^b");
        assert_eq!(vocab.encode("abc"), Err(CtcError::UnknownSymbol('c')));
    }

    #[test]
    fn normalize_strips_unsupported_characters() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.normalize_text("I Wish, I   STARTED!"), "i wish i started");
        assert_eq!(vocab.normalize_text("^^^"), "");

        let no_space = Vocabulary::from_alphabet("ab").unwrap();
        assert_eq!(no_space.normalize_text("Ab ba"), "abba");
    }
}
