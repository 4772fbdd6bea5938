//! Symbol types for automata transitions.

use indexmap::IndexSet;
use std::fmt;

/// A symbol identifier: the position of a symbol in its alphabet.
/// The special value `EPSILON` represents an epsilon (empty) transition.
pub type SymbolId = u32;

/// Special symbol ID representing epsilon (empty) transitions.
/// We use u32::MAX as the epsilon marker.
pub const EPSILON: SymbolId = u32::MAX;

/// Check if a symbol is an epsilon transition.
#[inline]
pub fn is_epsilon(symbol: SymbolId) -> bool {
    symbol == EPSILON
}

/// An ordered, duplicate-free set of input characters.
///
/// The declaration order is significant: it fixes the `SymbolId` of every
/// character, the order of transition rows in the text format, and the order
/// in which subset construction explores successors.
#[derive(Clone, Default)]
pub struct Alphabet {
    symbols: IndexSet<char>,
}

impl Alphabet {
    /// Create an empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a symbol. Returns `false` if it was already present.
    pub fn push(&mut self, symbol: char) -> bool {
        self.symbols.insert(symbol)
    }

    /// Look up the id of a character, `None` if it is not part of the alphabet.
    #[inline]
    pub fn id_of(&self, symbol: char) -> Option<SymbolId> {
        self.symbols.get_index_of(&symbol).map(|i| i as SymbolId)
    }

    /// The character behind a symbol id.
    pub fn symbol(&self, id: SymbolId) -> Option<char> {
        self.symbols.get_index(id as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol ids in declaration order.
    pub fn ids(&self) -> std::ops::Range<SymbolId> {
        0..self.symbols.len() as SymbolId
    }

    /// Characters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }
}

// Order-sensitive, unlike `IndexSet` equality.
impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols.iter().eq(other.symbols.iter())
    }
}

impl Eq for Alphabet {}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.symbols.iter()).finish()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.symbols.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

impl FromIterator<char> for Alphabet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon() {
        assert!(is_epsilon(EPSILON));
        assert!(!is_epsilon(0));
        assert!(!is_epsilon(100));
    }

    #[test]
    fn test_alphabet_order() {
        let alphabet: Alphabet = "cab".chars().collect();
        assert_eq!(alphabet.id_of('c'), Some(0));
        assert_eq!(alphabet.id_of('a'), Some(1));
        assert_eq!(alphabet.id_of('b'), Some(2));
        assert_eq!(alphabet.id_of('z'), None);
        assert_eq!(alphabet.symbol(2), Some('b'));
        assert_eq!(alphabet.ids().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(alphabet.to_string(), "c,a,b");
    }

    #[test]
    fn test_alphabet_rejects_duplicates() {
        let mut alphabet = Alphabet::new();
        assert!(alphabet.push('a'));
        assert!(!alphabet.push('a'));
        assert_eq!(alphabet.len(), 1);
    }

    #[test]
    fn test_alphabet_equality_is_ordered() {
        let ab: Alphabet = "ab".chars().collect();
        let ba: Alphabet = "ba".chars().collect();
        assert_ne!(ab, ba);
        assert_eq!(ab, "ab".chars().collect::<Alphabet>());
    }
}
