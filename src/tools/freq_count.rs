use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Occurrence count of every distinct symbol in an input sequence.
///
/// Entries are kept in the order each symbol first appeared. The tree builder relies on that
/// order to break ties between equal counts, so two tables counted from the same input always
/// produce the same tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S: Eq + Hash> {
    entries: Vec<(S, u64)>,
    index: FxHashMap<S, usize>,
}

impl<S: Eq + Hash + Clone> FrequencyTable<S> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Returns a frequency count of the symbols in `symbols`. Empty input gives an empty table.
    pub fn count<I: IntoIterator<Item = S>>(symbols: I) -> Self {
        let mut table = Self::new();
        symbols.into_iter().for_each(|symbol| table.add(symbol));
        table
    }

    /// Count one more occurrence of `symbol`.
    pub fn add(&mut self, symbol: S) {
        match self.index.get(&symbol) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(symbol.clone(), self.entries.len());
                self.entries.push((symbol, 1));
            }
        }
    }

    /// Count of `symbol`, or None if it never occurred.
    pub fn get(&self, symbol: &S) -> Option<u64> {
        self.index.get(symbol).map(|&slot| self.entries[slot].1)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the length of the counted input.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Iterate over (symbol, count) in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, u64)> + '_ {
        self.entries.iter().map(|(symbol, count)| (symbol, *count))
    }
}

impl<S: Eq + Hash + Clone> Default for FrequencyTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Eq + Hash + Clone> FromIterator<S> for FrequencyTable<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::count(iter)
    }
}

impl<S: Eq + Hash + Clone> Extend<S> for FrequencyTable<S> {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        iter.into_iter().for_each(|symbol| self.add(symbol));
    }
}
