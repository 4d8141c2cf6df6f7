use itertools::Itertools;

use crate::Show;

/// A symbol is a single character. Epsilon moves are not symbols, they are stored separately
/// by the automata that have them and never appear in an alphabet.
pub type Symbol = char;

/// Represents an alphabet where a [`Symbol`] is just a single `char`. The symbols are kept
/// sorted and free of duplicates, so iterating over the alphabet always yields the same order.
/// This order is what the algorithms rely on whenever they need a fixed symbol order, for
/// example when computing signatures during minimization or when enumerating words.
///
/// # Example
/// ```
/// use regular_automata::prelude::*;
///
/// let alphabet = CharAlphabet::from_iter(['b', 'a', 'b']);
/// assert_eq!(alphabet.universe().collect::<Vec<_>>(), vec!['a', 'b']);
/// assert!(alphabet.contains('a'));
/// assert!(!alphabet.contains('c'));
/// ```
#[derive(Clone, Hash, PartialEq, Eq, Debug, PartialOrd, Ord, Default)]
pub struct CharAlphabet(Vec<char>);

impl CharAlphabet {
    /// Creates a new [`CharAlphabet`] alphabet of the given size. The symbols are just the first `size` letters
    /// of the alphabet, i.e. 'a' to 'z'.
    pub fn of_size(size: usize) -> Self {
        assert!(size <= 26, "Alphabet is too large");
        Self((0..size).map(|i| (b'a' + i as u8) as char).collect())
    }

    /// Returns the number of symbols in the alphabet.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the alphabet has no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over all symbols of the alphabet in ascending order.
    pub fn universe(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.0.iter().cloned()
    }

    /// Returns true if `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.0.binary_search(&symbol).is_ok()
    }

    /// Returns the position of `symbol` in the alphabet, if it is present.
    pub fn position(&self, symbol: Symbol) -> Option<usize> {
        self.0.binary_search(&symbol).ok()
    }

    /// Gives the symbols as a slice.
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// Enumerates all words over the alphabet with length at most `max_length`, shorter words
    /// first and words of equal length in lexicographic order. The empty word is always part of
    /// the result.
    pub fn words_up_to(&self, max_length: usize) -> Vec<String> {
        let mut words = vec![String::new()];
        let mut last_layer = vec![String::new()];
        for _ in 0..max_length {
            if self.is_empty() {
                break;
            }
            last_layer = last_layer
                .iter()
                .cartesian_product(self.0.iter().cloned())
                .map(|(prefix, sym)| format!("{prefix}{sym}"))
                .collect();
            words.extend(last_layer.iter().cloned());
        }
        words
    }
}

impl std::ops::Index<usize> for CharAlphabet {
    type Output = char;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl FromIterator<char> for CharAlphabet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self(iter.into_iter().unique().sorted().collect())
    }
}

impl From<Vec<char>> for CharAlphabet {
    fn from(value: Vec<char>) -> Self {
        value.into_iter().collect()
    }
}

impl std::fmt::Display for CharAlphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join(", "))
    }
}

impl Show for CharAlphabet {
    fn show(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::CharAlphabet;

    #[test]
    fn alphabet_is_sorted_and_unique() {
        let alphabet: CharAlphabet = vec!['c', 'a', 'c', 'b'].into();
        assert_eq!(alphabet.symbols(), &['a', 'b', 'c']);
        assert_eq!(alphabet.position('c'), Some(2));
        assert_eq!(alphabet.position('d'), None);
        assert_eq!(alphabet.to_string(), "{a, b, c}");
        assert_eq!(CharAlphabet::of_size(2), CharAlphabet::from_iter(['b', 'a']));
    }

    #[test]
    fn words_are_enumerated_length_lexicographically() {
        let alphabet = CharAlphabet::of_size(2);
        assert_eq!(
            alphabet.words_up_to(2),
            vec!["", "a", "b", "aa", "ab", "ba", "bb"]
        );
        assert_eq!(alphabet.words_up_to(3).len(), 15);
        assert_eq!(CharAlphabet::default().words_up_to(4), vec![""]);
    }
}
