//! EncodedStream: the bit sequence produced by huffman encoding.
//!
//! Bits are packed most significant bit first, the same order the BitWriter puts them on the
//! wire, and the exact bit length is kept beside the bytes so trailing padding is never read
//! as data.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::{HuffError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EncodedStream {
    bytes: Vec<u8>,
    len: usize,
}

impl EncodedStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty stream with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity((bits + 7) / 8),
            len: 0,
        }
    }

    /// Wrap pre-packed bytes holding `len` bits. Bits past `len` are cleared.
    pub fn from_bytes(mut bytes: Vec<u8>, len: usize) -> Result<Self> {
        if len > bytes.len() * 8 {
            return Err(HuffError::CorruptContainer(format!(
                "{} bits do not fit in {} bytes",
                len,
                bytes.len()
            )));
        }
        bytes.truncate((len + 7) / 8);
        if len % 8 != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= 0xff << (8 - len % 8);
            }
        }
        Ok(Self { bytes, len })
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.len += 1;
    }

    /// Append a run of bits, in order.
    pub fn extend_bits(&mut self, bits: &[bool]) {
        bits.iter().for_each(|&bit| self.push(bit));
    }

    /// Remove and return the last bit.
    pub fn pop(&mut self) -> Option<bool> {
        if self.len == 0 {
            return None;
        }
        let bit = self.get(self.len - 1)?;
        self.len -= 1;
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.pop();
        } else if let Some(last) = self.bytes.last_mut() {
            *last &= !(0x80 >> offset);
        }
        Some(bit)
    }

    /// The bit at `index`, or None past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bytes[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The packed bytes. The final byte is zero padded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn iter(&self) -> Bits<'_> {
        Bits {
            stream: self,
            index: 0,
        }
    }
}

/// Iterator over the bits of an EncodedStream.
#[derive(Debug, Clone)]
pub struct Bits<'a> {
    stream: &'a EncodedStream,
    index: usize,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let bit = self.stream.get(self.index)?;
        self.index += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.stream.len - self.index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Bits<'_> {}

impl<'a> IntoIterator for &'a EncodedStream {
    type Item = bool;
    type IntoIter = Bits<'a>;

    fn into_iter(self) -> Bits<'a> {
        self.iter()
    }
}

impl FromIterator<bool> for EncodedStream {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut stream = EncodedStream::new();
        iter.into_iter().for_each(|bit| stream.push(bit));
        stream
    }
}

impl Display for EncodedStream {
    /// Writes the bits as '0' and '1' characters.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.iter()
            .try_for_each(|bit| f.write_str(if bit { "1" } else { "0" }))
    }
}

impl FromStr for EncodedStream {
    type Err = HuffError;

    /// Parse a string of '0' and '1'. ASCII whitespace is skipped.
    fn from_str(s: &str) -> Result<Self> {
        let mut stream = EncodedStream::with_capacity(s.len());
        for (position, c) in s.chars().enumerate() {
            match c {
                '0' => stream.push(false),
                '1' => stream.push(true),
                c if c.is_ascii_whitespace() => continue,
                found => return Err(HuffError::InvalidBit { found, position }),
            }
        }
        Ok(stream)
    }
}

#[cfg(test)]
mod test {
    use super::EncodedStream;
    use crate::error::HuffError;

    #[test]
    fn push_and_pack_test() {
        let mut bits = EncodedStream::new();
        for c in "0010000100100".chars() {
            bits.push(c == '1');
        }
        assert_eq!(bits.len(), 13);
        assert_eq!(bits.as_bytes(), &[0b0010_0001, 0b0010_0000]);
        assert_eq!(bits.to_string(), "0010000100100");
    }

    #[test]
    fn parse_test() {
        let bits: EncodedStream = "0101 1\n0".parse().unwrap();
        assert_eq!(bits.to_string(), "010110");
        assert_eq!(bits.get(1), Some(true));
        assert_eq!(bits.get(6), None);
    }

    #[test]
    fn parse_invalid_bit_test() {
        let err = "0102".parse::<EncodedStream>().unwrap_err();
        assert!(matches!(
            err,
            HuffError::InvalidBit {
                found: '2',
                position: 3
            }
        ));
    }

    #[test]
    fn pop_test() {
        let mut bits: EncodedStream = "100000001".parse().unwrap();
        assert_eq!(bits.pop(), Some(true));
        assert_eq!(bits.as_bytes(), &[0b1000_0000]);
        assert_eq!(bits.pop(), Some(false));
        assert_eq!(bits.as_bytes(), &[0b1000_0000]);
        assert_eq!(bits.len(), 7);
        assert_eq!(EncodedStream::new().pop(), None);
    }

    #[test]
    fn from_bytes_test() {
        let bits = EncodedStream::from_bytes(vec![0b1011_1111, 0xff], 4).unwrap();
        assert_eq!(bits.to_string(), "1011");
        assert_eq!(bits.as_bytes(), &[0b1011_0000]);
        assert!(EncodedStream::from_bytes(vec![0], 9).is_err());
    }

    #[test]
    fn iter_test() {
        let bits: EncodedStream = [true, false, true].into_iter().collect();
        assert_eq!(bits.iter().len(), 3);
        assert_eq!(bits.iter().collect::<Vec<_>>(), vec![true, false, true]);
    }
}
