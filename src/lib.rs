//! Huffman coding of symbol sequences.
//!
//! Builds a huffman tree from symbol frequencies, derives a prefix-free bit code for every
//! symbol, encodes sequences into bits and decodes the bits back by walking the tree.
//!
//! Basic usage:
//!
//! ```
//! let text = "aaabbc";
//! let tree = huffman::build_tree(text.chars())?;
//! let codes = huffman::derive_codes(tree.root());
//! let bits = huffman::encode(text.chars(), &codes)?;
//! assert_eq!(bits.to_string(), "000111110");
//!
//! let decoded: String = huffman::decode(&bits, tree.root())?.into_iter().collect();
//! assert_eq!(decoded, text);
//! # Ok::<(), huffman::HuffError>(())
//! ```
//!
//! Ties between equal counts are broken by first appearance in the input, so the same input
//! always gives the same tree and the same codes. An alphabet of one symbol codes that symbol
//! as a single `0` bit.
//!
//! The `huffman` binary wraps this in a command line tool.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

use std::borrow::Borrow;
use std::hash::Hash;

pub use bitstream::encoded_stream::EncodedStream;
pub use error::{HuffError, Result};
pub use huffman_coding::code_table::{Code, CodeTable};
pub use huffman_coding::codec::{decode_to_string, decode_with_codes, encode_str};
pub use huffman_coding::tree::{Branch, HuffmanTree, Node};
pub use tools::freq_count::FrequencyTable;

/// Count `symbols` and build their huffman tree. Fails with EmptyInput on an empty sequence.
pub fn build_tree<S, I>(symbols: I) -> Result<HuffmanTree<S>>
where
    S: Eq + Hash + Clone,
    I: IntoIterator<Item = S>,
{
    HuffmanTree::from_symbols(symbols)
}

/// Derive the code of every symbol in the tree rooted at `root`.
pub fn derive_codes<S: Eq + Hash + Clone>(root: &Node<S>) -> CodeTable<S> {
    CodeTable::derive(root)
}

/// Encode `symbols` with `codes`. Fails with UnknownSymbol if a symbol has no code.
pub fn encode<S, I>(symbols: I, codes: &CodeTable<S>) -> Result<EncodedStream>
where
    S: Eq + Hash,
    I: IntoIterator,
    I::Item: Borrow<S>,
{
    huffman_coding::codec::encode(symbols, codes)
}

/// Decode `stream` with the tree rooted at `root`. Fails with MalformedStream if the stream
/// ends mid-codeword.
pub fn decode<S: Clone>(stream: &EncodedStream, root: &Node<S>) -> Result<Vec<S>> {
    huffman_coding::codec::decode(stream, root)
}
