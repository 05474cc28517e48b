//! Encoding symbol sequences to bits and decoding them back.
//!
//! Decoding walks the tree one bit at a time and restarts at the root whenever a leaf is
//! reached. A stream that runs out while the walk is below the root was cut mid-codeword
//! and is rejected rather than returning a silently shortened result.

use std::borrow::Borrow;
use std::hash::Hash;

use log::{debug, trace};
use rustc_hash::FxHashMap;

use super::code_table::{Code, CodeTable};
use super::tree::{Branch, HuffmanTree, Node};
use crate::bitstream::encoded_stream::EncodedStream;
use crate::error::{HuffError, Result};

/// Encode `symbols` in order with `codes`. Fails with UnknownSymbol at the first symbol that
/// has no code; no partial stream is returned.
pub fn encode<S, I>(symbols: I, codes: &CodeTable<S>) -> Result<EncodedStream>
where
    S: Eq + Hash,
    I: IntoIterator,
    I::Item: Borrow<S>,
{
    let mut stream = EncodedStream::new();
    for (position, symbol) in symbols.into_iter().enumerate() {
        let code = codes
            .get(symbol.borrow())
            .ok_or(HuffError::UnknownSymbol { position })?;
        stream.extend_bits(code.bits());
    }
    debug!("Encoded {} bits", stream.len());
    Ok(stream)
}

/// Decode `stream` by walking the tree rooted at `root`.
pub fn decode<S: Clone>(stream: &EncodedStream, root: &Node<S>) -> Result<Vec<S>> {
    // A lone leaf has no branches to walk: every bit is one occurrence of its symbol.
    if let Node::Leaf { symbol, .. } = root {
        return Ok(vec![symbol.clone(); stream.len()]);
    }

    let mut output = Vec::new();
    let mut current = root;
    let mut consumed = 0;
    for (i, bit) in stream.iter().enumerate() {
        current = match current.child(Branch::from_bit(bit)) {
            Some(child) => child,
            None => unreachable!("the walk restarts at the root after every leaf"),
        };
        if let Node::Leaf { symbol, .. } = current {
            output.push(symbol.clone());
            current = root;
            consumed = i + 1;
        }
    }

    if consumed != stream.len() {
        return Err(HuffError::MalformedStream {
            decoded: output.len(),
            consumed,
        });
    }
    trace!("Decoded {} symbols from {} bits", output.len(), consumed);
    Ok(output)
}

/// Decode `stream` with only a code table to go on.
///
/// Bits are gathered until they match a code. If the gathered bits grow longer than the
/// longest code, or the stream ends with bits left over, the stream is malformed.
pub fn decode_with_codes<S: Eq + Hash + Clone>(
    stream: &EncodedStream,
    codes: &CodeTable<S>,
) -> Result<Vec<S>> {
    let lookup: FxHashMap<&Code, &S> = codes.iter().map(|(symbol, code)| (code, symbol)).collect();
    let max_len = codes.max_code_len();

    let mut output = Vec::new();
    let mut pending = Code::new();
    let mut consumed = 0;
    for (i, bit) in stream.iter().enumerate() {
        pending.push(bit);
        if let Some(&symbol) = lookup.get(&pending) {
            output.push(symbol.clone());
            pending.clear();
            consumed = i + 1;
        } else if pending.len() >= max_len {
            break;
        }
    }

    if consumed != stream.len() {
        return Err(HuffError::MalformedStream {
            decoded: output.len(),
            consumed,
        });
    }
    Ok(output)
}

/// Build the tree and codes for `text` and encode it.
pub fn encode_str(text: &str) -> Result<(HuffmanTree<char>, CodeTable<char>, EncodedStream)> {
    let tree = HuffmanTree::from_symbols(text.chars())?;
    let codes = CodeTable::derive(tree.root());
    let stream = encode(text.chars(), &codes)?;
    Ok((tree, codes, stream))
}

/// Decode `stream` against a tree of chars and collect the result into a String.
pub fn decode_to_string(stream: &EncodedStream, root: &Node<char>) -> Result<String> {
    decode(stream, root).map(|chars| chars.into_iter().collect())
}

#[cfg(test)]
mod test {
    use super::{decode, decode_to_string, decode_with_codes, encode, encode_str};
    use crate::bitstream::encoded_stream::EncodedStream;
    use crate::error::HuffError;
    use crate::huffman_coding::code_table::CodeTable;
    use crate::huffman_coding::tree::HuffmanTree;

    #[test]
    fn aaabbc_test() {
        let (tree, _, bits) = encode_str("aaabbc").unwrap();
        assert_eq!(bits.to_string(), "000111110");
        assert_eq!(decode_to_string(&bits, tree.root()).unwrap(), "aaabbc");
    }

    #[test]
    fn single_symbol_test() {
        let (tree, codes, bits) = encode_str("aaaa").unwrap();
        assert_eq!(codes.get(&'a').unwrap().to_string(), "0");
        assert_eq!(bits.to_string(), "0000");
        let parsed: EncodedStream = "0000".parse().unwrap();
        assert_eq!(decode_to_string(&parsed, tree.root()).unwrap(), "aaaa");
        assert_eq!(decode_with_codes(&parsed, &codes).unwrap(), vec!['a'; 4]);
    }

    #[test]
    fn single_symbol_any_bit_test() {
        let tree = HuffmanTree::from_symbols("zz".chars()).unwrap();
        let bits: EncodedStream = "101".parse().unwrap();
        assert_eq!(decode_to_string(&bits, tree.root()).unwrap(), "zzz");
    }

    #[test]
    fn empty_stream_test() {
        let tree = HuffmanTree::from_symbols("abc".chars()).unwrap();
        assert!(decode(&EncodedStream::new(), tree.root()).unwrap().is_empty());
    }

    #[test]
    fn truncated_stream_test() {
        let (tree, codes, mut bits) = encode_str("aaabbc").unwrap();
        bits.pop();
        let err = decode(&bits, tree.root()).unwrap_err();
        assert!(matches!(
            err,
            HuffError::MalformedStream {
                decoded: 5,
                consumed: 7
            }
        ));
        let err = decode_with_codes(&bits, &codes).unwrap_err();
        assert!(matches!(err, HuffError::MalformedStream { decoded: 5, .. }));
    }

    #[test]
    fn unknown_symbol_test() {
        let (_, codes, _) = encode_str("abc").unwrap();
        let err = encode("abxc".chars(), &codes).unwrap_err();
        assert!(matches!(err, HuffError::UnknownSymbol { position: 2 }));
    }

    #[test]
    fn encode_by_reference_test() {
        let words = vec!["to", "be", "or", "not", "to", "be"];
        let tree = HuffmanTree::from_symbols(words.iter().copied()).unwrap();
        let codes = CodeTable::derive(tree.root());
        let bits = encode(&words, &codes).unwrap();
        assert_eq!(decode(&bits, tree.root()).unwrap(), words);
    }

    #[test]
    fn codes_decode_matches_tree_decode_test() {
        let text = "she sells sea shells by the sea shore";
        let (tree, codes, bits) = encode_str(text).unwrap();
        let by_tree = decode(&bits, tree.root()).unwrap();
        let by_codes = decode_with_codes(&bits, &codes).unwrap();
        assert_eq!(by_tree, by_codes);
        assert_eq!(by_tree.into_iter().collect::<String>(), text);
    }

    #[test]
    fn unmatched_bits_test() {
        // 'x' = 0, 'y' = 10; nothing starts with 11.
        let codes =
            CodeTable::from_pairs(vec![('x', "0".parse().unwrap()), ('y', "10".parse().unwrap())])
                .unwrap();
        let bits: EncodedStream = "01100".parse().unwrap();
        let err = decode_with_codes(&bits, &codes).unwrap_err();
        assert!(matches!(
            err,
            HuffError::MalformedStream {
                decoded: 1,
                consumed: 1
            }
        ));
    }

    #[test]
    fn nul_symbol_test() {
        let text = "\0a\0\0b";
        let (tree, _, bits) = encode_str(text).unwrap();
        assert_eq!(decode_to_string(&bits, tree.root()).unwrap(), text);
    }
}
