//! The tools module provides the helpers around the huffman core.
//!
//! The tools are:
//! - cli: Command line interface and the options the binary runs from.
//! - freq_count: Frequency count of the symbols in an input sequence.
//! - tree_view: Outline and Graphviz DOT renderings of a built tree.
//!
pub mod cli;
pub mod freq_count;
pub mod tree_view;
