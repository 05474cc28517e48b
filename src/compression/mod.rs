//! The compression module stores huffman coded text in a small container.
//!
//! Layout (big endian, bits packed MSB-first):
//! - magic "HUF1"
//! - u32 number of code table entries
//! - per entry: u32 Unicode scalar value, u8 code length, then the code bits
//! - u64 number of encoded bits
//! - the encoded bits, zero padded to a byte boundary
//!
//! The container stores the codes rather than the tree, so decompression decodes with the code
//! table alone.
//!

pub mod compress;
pub mod decompress;
