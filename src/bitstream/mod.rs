//! The bitstream module holds the bit-level plumbing of the huffman library.
//!
//! - encoded_stream: the packed bit sequence produced by encoding and consumed by decoding.
//! - bitwriter / bitreader: MSB-first word and bit I/O used to write and read containers.
//!
//! These are built for the container layout and the codec. They have not been generalized
//! beyond that.
//!
pub mod bitreader;
pub mod bitwriter;
pub mod encoded_stream;
