//! BitReader: reads a packed MSB-first bitstream, such as a huffman container.
//!
//! NOTE: This module can read from any I/O source that supports the read() call.
//!

use std::io::{self, Read};

const BUFFER_SIZE: usize = 64 * 1024;

/// Reads bits and words from a byte source.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    source: R,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader (with a 64k buffer).
    pub fn new(source: R) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            cursor: BUFFER_SIZE,
            bit_index: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> io::Result<bool> {
        if self.cursor < self.buffer.len() {
            return Ok(true);
        }
        self.buffer.resize(BUFFER_SIZE, 0);
        let size = loop {
            match self.source.read(&mut self.buffer) {
                Ok(size) => break size,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        self.buffer.truncate(size);
        self.cursor = 0;
        self.bit_index = 0;
        Ok(size > 0)
    }

    /// Return the next bit, or None if there is no more data to read
    pub fn bit(&mut self) -> io::Result<Option<bool>> {
        if self.bit_index == 0 && !self.have_data()? {
            return Ok(None);
        }
        let bit = self.buffer[self.cursor] & (0x80 >> self.bit_index) != 0;
        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
        Ok(Some(bit))
    }

    /// Return the next n bits (n <= 64) as a number, or None if the data runs out first.
    pub fn bint(&mut self, n: usize) -> io::Result<Option<u64>> {
        debug_assert!(n <= 64);
        let mut result = 0_u64;
        for _ in 0..n {
            match self.bit()? {
                Some(bit) => result = result << 1 | bit as u64,
                None => return Ok(None),
            }
        }
        Ok(Some(result))
    }

    /// Returns a byte, or None if there is no more data to read.
    pub fn byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.bint(8)?.map(|byte| byte as u8))
    }

    /// Returns n bytes, or None if the data runs out first.
    pub fn bytes(&mut self, n: usize) -> io::Result<Option<Vec<u8>>> {
        let mut result = Vec::with_capacity(n);
        for _ in 0..n {
            match self.byte()? {
                Some(byte) => result.push(byte),
                None => return Ok(None),
            }
        }
        Ok(Some(result))
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}
