//! Derivation of per-symbol bit codes from a built tree.
//!
//! Codes are root-to-leaf paths: a '0' for every zero branch and a '1' for every one branch.
//! A tree that is a single leaf has no path at all, so its only symbol gets the one-bit
//! code "0" instead of an empty code that could never be decoded.

use std::fmt::{self, Display, Formatter};
use std::hash::Hash;
use std::str::FromStr;

use log::{debug, trace};
use rustc_hash::FxHashMap;

use super::tree::{HuffmanTree, Node};
use crate::error::{HuffError, Result};
use crate::tools::freq_count::FrequencyTable;

/// The bit code of one symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// True if `self` is a prefix of `other` (every code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.bits
            .iter()
            .try_for_each(|&bit| f.write_str(if bit { "1" } else { "0" }))
    }
}

impl FromStr for Code {
    type Err = HuffError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(HuffError::InvalidBit { found, position }),
            })
            .collect::<Result<Vec<bool>>>()
            .map(Code::from_bits)
    }
}

/// Mapping from symbol to code.
///
/// Entries keep the depth-first leaf order of the tree they came from (zero branch first),
/// which is also the order `iter` returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S: Eq + Hash> {
    entries: Vec<(S, Code)>,
    index: FxHashMap<S, usize>,
}

impl<S: Eq + Hash + Clone> CodeTable<S> {
    /// Derive the code of every leaf of the tree rooted at `root`.
    pub fn derive(root: &Node<S>) -> Self {
        let mut entries = vec![];
        match root {
            Node::Leaf { symbol, .. } => {
                entries.push((symbol.clone(), Code::from_bits(vec![false])));
            }
            Node::Internal { .. } => {
                let mut path = Code::new();
                return_codes(root, &mut path, &mut entries);
            }
        }
        let table = Self::from_entries(entries);
        debug!(
            "Derived {} codes, longest {} bits",
            table.len(),
            table.max_code_len()
        );
        table
    }

    /// Build a table from explicit (symbol, code) pairs, e.g. ones read from a container.
    /// Rejects empty codes, repeated symbols and codes that are prefixes of other codes.
    pub fn from_pairs<I: IntoIterator<Item = (S, Code)>>(pairs: I) -> Result<Self> {
        let entries = pairs.into_iter().collect::<Vec<_>>();
        if let Some(pos) = entries.iter().position(|(_, code)| code.is_empty()) {
            return Err(HuffError::InvalidCodeTable(format!(
                "entry {} has an empty code",
                pos
            )));
        }
        let table = Self::from_entries(entries);
        if table.index.len() != table.entries.len() {
            return Err(HuffError::InvalidCodeTable(
                "a symbol appears more than once".to_string(),
            ));
        }
        if let Some((short, long)) = table.prefix_conflict() {
            return Err(HuffError::InvalidCodeTable(format!(
                "code {} is a prefix of code {}",
                short, long
            )));
        }
        Ok(table)
    }

    fn from_entries(entries: Vec<(S, Code)>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(slot, (symbol, _))| (symbol.clone(), slot))
            .collect();
        Self { entries, index }
    }
}

impl<S: Eq + Hash> CodeTable<S> {
    /// The code for `symbol`, or None if the symbol is not in the table.
    pub fn get(&self, symbol: &S) -> Option<&Code> {
        self.index.get(symbol).map(|&slot| &self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &Code)> + '_ {
        self.entries.iter().map(|(symbol, code)| (symbol, code))
    }

    /// Length of the longest code, 0 for an empty table.
    pub fn max_code_len(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, code)| code.len())
            .max()
            .unwrap_or(0)
    }

    /// True if no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        self.prefix_conflict().is_none()
    }

    /// Finds a pair (short, long) where short is a prefix of long. After sorting, any such
    /// pair shows up between neighbours.
    fn prefix_conflict(&self) -> Option<(&Code, &Code)> {
        let mut codes = self.entries.iter().map(|(_, code)| code).collect::<Vec<_>>();
        codes.sort_unstable();
        codes
            .windows(2)
            .find(|pair| pair[0].is_prefix_of(pair[1]))
            .map(|pair| (pair[0], pair[1]))
    }

    /// Number of bits needed to encode input with the counts in `freqs`, or None if the
    /// table lacks one of its symbols.
    pub fn encoded_len(&self, freqs: &FrequencyTable<S>) -> Option<u64>
    where
        S: Clone,
    {
        freqs
            .iter()
            .map(|(symbol, count)| self.get(symbol).map(|code| code.len() as u64 * count))
            .sum()
    }
}

impl<S: Eq + Hash + Clone> From<&HuffmanTree<S>> for CodeTable<S> {
    fn from(tree: &HuffmanTree<S>) -> Self {
        Self::derive(tree.root())
    }
}

/// Recursively walk the tree and push the path to every leaf into `codes`.
fn return_codes<S: Clone>(node: &Node<S>, path: &mut Code, codes: &mut Vec<(S, Code)>) {
    match node {
        Node::Internal { zero, one, .. } => {
            path.push(false);
            return_codes(zero, path, codes);
            path.bits.pop();
            path.push(true);
            return_codes(one, path, codes);
            path.bits.pop();
        }
        Node::Leaf { symbol, weight } => {
            trace!("leaf weight {} -> {}", weight, path);
            codes.push((symbol.clone(), path.clone()));
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Code, CodeTable};
    use crate::error::HuffError;
    use crate::huffman_coding::tree::HuffmanTree;
    use crate::tools::freq_count::FrequencyTable;

    fn codes_for(text: &str) -> CodeTable<char> {
        let tree = HuffmanTree::from_symbols(text.chars()).unwrap();
        CodeTable::derive(tree.root())
    }

    #[test]
    fn aaabbc_codes_test() {
        let codes = codes_for("aaabbc");
        assert_eq!(codes.get(&'a').unwrap().to_string(), "0");
        assert_eq!(codes.get(&'c').unwrap().to_string(), "10");
        assert_eq!(codes.get(&'b').unwrap().to_string(), "11");

        let freqs = FrequencyTable::count("aaabbc".chars());
        assert_eq!(codes.encoded_len(&freqs), Some(9));
        assert!(codes.encoded_len(&freqs).unwrap() <= 12);

        // Kraft: 2^-1 + 2^-2 + 2^-2 <= 1
        let kraft: f64 = codes.iter().map(|(_, c)| 0.5_f64.powi(c.len() as i32)).sum();
        assert!(kraft <= 1.0);
    }

    #[test]
    fn single_symbol_gets_one_bit_test() {
        let codes = codes_for("aaaa");
        assert_eq!(codes.len(), 1);
        assert_eq!(codes.get(&'a').unwrap().to_string(), "0");
    }

    #[test]
    fn iteration_follows_tree_order_test() {
        let codes = codes_for("aaabbc");
        let order = codes.iter().map(|(s, _)| *s).collect::<Vec<_>>();
        assert_eq!(order, vec!['a', 'c', 'b']);
    }

    #[test]
    fn prefix_free_test() {
        let codes = codes_for("this is an example of a huffman tree");
        assert!(codes.is_prefix_free());
        assert!(codes.iter().all(|(_, c)| !c.is_empty()));
    }

    #[test]
    fn encoded_len_unknown_symbol_test() {
        let codes = codes_for("abc");
        let freqs = FrequencyTable::count("abz".chars());
        assert_eq!(codes.encoded_len(&freqs), None);
    }

    #[test]
    fn from_pairs_test() {
        let table = CodeTable::from_pairs(vec![
            ('x', "0".parse::<Code>().unwrap()),
            ('y', "10".parse().unwrap()),
            ('z', "11".parse().unwrap()),
        ])
        .unwrap();
        assert_eq!(table.max_code_len(), 2);

        let err = CodeTable::from_pairs(vec![
            ('x', "1".parse::<Code>().unwrap()),
            ('y', "10".parse().unwrap()),
        ])
        .unwrap_err();
        assert!(matches!(err, HuffError::InvalidCodeTable(_)));

        let err = CodeTable::from_pairs(vec![('x', Code::new())]).unwrap_err();
        assert!(matches!(err, HuffError::InvalidCodeTable(_)));

        let err = CodeTable::from_pairs(vec![
            ('x', "0".parse::<Code>().unwrap()),
            ('x', "1".parse().unwrap()),
        ])
        .unwrap_err();
        assert!(matches!(err, HuffError::InvalidCodeTable(_)));
    }

    #[test]
    fn code_prefix_test() {
        let short: Code = "10".parse().unwrap();
        let long: Code = "101".parse().unwrap();
        assert!(short.is_prefix_of(&long));
        assert!(!long.is_prefix_of(&short));
        assert!("12".parse::<Code>().is_err());
    }
}
