//! The huffman_coding module holds the core of the library: the tree builder and the codec.
//!
//! - tree: greedy least-weight-first construction of the huffman tree, with a fixed tie-break.
//! - code_table: root-to-leaf paths turned into per-symbol bit codes.
//! - codec: encoding symbol sequences into an EncodedStream and decoding them back.
//!
//! Everything here is pure and synchronous. Trees and tables are built once per input and
//! never change afterwards.
//!

pub mod code_table;
pub mod codec;
pub mod tree;
