use std::io::Write;

use log::{debug, info};

use crate::bitstream::bitwriter::BitWriter;
use crate::bitstream::encoded_stream::EncodedStream;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::codec::encode_str;

/// First four bytes of every container.
pub const MAGIC: [u8; 4] = *b"HUF1";

/// Sizes reported after compressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressReport {
    /// Symbols in the input text.
    pub symbols: usize,
    /// Distinct symbols, i.e. entries in the code table.
    pub distinct: usize,
    /// Length of the encoded payload in bits.
    pub encoded_bits: usize,
    /// Total container size in bytes.
    pub container_bytes: usize,
}

/// Pack a code table and an encoded stream into container bytes.
pub fn pack(codes: &CodeTable<char>, stream: &EncodedStream) -> Result<Vec<u8>> {
    let mut bw = BitWriter::new(16 + codes.len() * 8 + stream.as_bytes().len());

    MAGIC.iter().for_each(|&byte| bw.out8(byte));
    bw.out32(codes.len() as u32);
    for (symbol, code) in codes.iter() {
        let length =
            u8::try_from(code.len()).map_err(|_| HuffError::CodeTooLong { length: code.len() })?;
        bw.out32(*symbol as u32);
        bw.out8(length);
        bw.out_code(code);
    }
    debug!("Code table ends at {}", bw.loc());

    bw.out64(stream.len() as u64);
    bw.out_stream(stream);
    bw.flush();
    Ok(bw.output)
}

/// Huffman code `text` and write it to `out` as a container. Empty text is rejected with
/// EmptyInput before anything is written.
pub fn compress<W: Write>(text: &str, out: &mut W) -> Result<CompressReport> {
    let (_, codes, stream) = encode_str(text)?;
    let packed = pack(&codes, &stream)?;
    out.write_all(&packed)?;
    out.flush()?;

    let report = CompressReport {
        symbols: text.chars().count(),
        distinct: codes.len(),
        encoded_bits: stream.len(),
        container_bytes: packed.len(),
    };
    info!(
        "Compressed {} symbols ({} distinct) into {} bits, {} bytes with table",
        report.symbols, report.distinct, report.encoded_bits, report.container_bytes
    );
    Ok(report)
}

#[cfg(test)]
mod test {
    use super::{compress, pack, MAGIC};
    use crate::error::HuffError;
    use crate::huffman_coding::codec::encode_str;

    #[test]
    fn pack_layout_test() {
        let (_, codes, stream) = encode_str("aaaa").unwrap();
        let packed = pack(&codes, &stream).unwrap();
        let mut expected = MAGIC.to_vec();
        expected.extend_from_slice(&[0, 0, 0, 1]); // one entry
        expected.extend_from_slice(&[0, 0, 0, b'a']); // symbol
        expected.push(1); // code length
        // code "0", then the 64 bit count (4) and the bits "0000", packed after a one bit offset
        expected.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 0b0000_0010, 0]);
        assert_eq!(packed, expected);
    }

    #[test]
    fn compress_report_test() {
        let mut out = vec![];
        let report = compress("aaabbc", &mut out).unwrap();
        assert_eq!(report.symbols, 6);
        assert_eq!(report.distinct, 3);
        assert_eq!(report.encoded_bits, 9);
        assert_eq!(report.container_bytes, out.len());
        assert!(out.starts_with(&MAGIC));
    }

    #[test]
    fn compress_empty_test() {
        let mut out = vec![];
        let err = compress("", &mut out).unwrap_err();
        assert!(matches!(err, HuffError::EmptyInput));
        assert!(out.is_empty());
    }
}
