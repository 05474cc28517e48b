use std::io::Read;

use log::{debug, info};

use super::compress::MAGIC;
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::encoded_stream::EncodedStream;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::{Code, CodeTable};
use crate::huffman_coding::codec::decode_with_codes;

/// Turn a short read into a CorruptContainer error naming the missing field.
fn need<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| HuffError::CorruptContainer(format!("truncated while reading {}", what)))
}

/// Read a container and return its code table and encoded stream.
pub fn unpack<R: Read>(source: R) -> Result<(CodeTable<char>, EncodedStream)> {
    let mut br = BitReader::new(source);

    let magic = need(br.bytes(MAGIC.len())?, "magic")?;
    if magic != MAGIC {
        return Err(HuffError::CorruptContainer(format!(
            "bad magic {:02x?}",
            magic
        )));
    }

    let count = need(br.bint(32)?, "entry count")? as usize;
    if count == 0 {
        return Err(HuffError::CorruptContainer("empty code table".to_string()));
    }

    let mut pairs = Vec::with_capacity(count.min(0x11_0000));
    for entry in 0..count {
        let scalar = need(br.bint(32)?, "symbol")? as u32;
        let symbol = char::from_u32(scalar).ok_or_else(|| {
            HuffError::CorruptContainer(format!(
                "entry {} holds invalid scalar value {:#x}",
                entry, scalar
            ))
        })?;
        let length = need(br.byte()?, "code length")?;
        if length == 0 {
            return Err(HuffError::CorruptContainer(format!(
                "entry {} has a zero length code",
                entry
            )));
        }
        let mut code = Code::new();
        for _ in 0..length {
            code.push(need(br.bit()?, "code bits")?);
        }
        pairs.push((symbol, code));
    }
    let codes = CodeTable::from_pairs(pairs)?;
    debug!("Read {} codes, table ends at {}", codes.len(), br.loc());

    let bit_count = need(br.bint(64)?, "bit count")? as usize;
    let mut stream = EncodedStream::with_capacity(bit_count.min(1 << 24));
    for _ in 0..bit_count {
        stream.push(need(br.bit()?, "payload")?);
    }
    Ok((codes, stream))
}

/// Read a container and decode it back into text.
pub fn decompress<R: Read>(source: R) -> Result<String> {
    let (codes, stream) = unpack(source)?;
    let text = decode_with_codes(&stream, &codes)?
        .into_iter()
        .collect::<String>();
    info!(
        "Decompressed {} bits into {} symbols",
        stream.len(),
        text.chars().count()
    );
    Ok(text)
}
