use log::error;

use super::encoded_stream::EncodedStream;
use crate::huffman_coding::code_table::Code;

/// Packs bits and words MSB-first into a byte buffer for a container.
pub struct BitWriter {
    /// Packed output.
    pub output: Vec<u8>,
    /// Bits waiting to be put into the output as bytes.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,
}

impl BitWriter {
    /// Create a new BitWriter with an output buffer of the given size. Call flush() before
    /// taking the output so the last partial byte is written.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            queue: 0,
            q_bits: 0,
        }
    }

    /// Move every complete byte from the queue to the output.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte);
            self.q_bits -= 8;
        }
    }

    /// Puts a single bit on the stream.
    pub fn out_bit(&mut self, bit: bool) {
        self.queue <<= 1;
        self.queue |= bit as u64;
        self.q_bits += 1;
        self.write_stream();
    }

    /// Puts a byte on the stream.
    pub fn out8(&mut self, data: u8) {
        self.queue <<= 8;
        self.queue |= data as u64;
        self.q_bits += 8;
        self.write_stream();
    }

    /// Puts a 16 bit word on the stream.
    pub fn out16(&mut self, data: u16) {
        self.queue <<= 16;
        self.queue |= data as u64;
        self.q_bits += 16;
        self.write_stream();
    }

    /// Puts a 32 bit word on the stream.
    pub fn out32(&mut self, data: u32) {
        self.queue <<= 32;
        self.queue |= data as u64;
        self.q_bits += 32;
        self.write_stream();
    }

    /// Puts a 64 bit word on the stream, high half first.
    pub fn out64(&mut self, data: u64) {
        self.out32((data >> 32) as u32);
        self.out32(data as u32);
    }

    /// Puts the bits of a huffman code on the stream.
    pub fn out_code(&mut self, code: &Code) {
        code.bits().iter().for_each(|&bit| self.out_bit(bit));
    }

    /// Puts every bit of an encoded stream on the stream. Byte aligned streams are copied
    /// a byte at a time.
    pub fn out_stream(&mut self, stream: &EncodedStream) {
        let whole = stream.len() / 8;
        if self.q_bits == 0 {
            stream.as_bytes()[..whole]
                .iter()
                .for_each(|&byte| self.out8(byte));
            (whole * 8..stream.len())
                .filter_map(|i| stream.get(i))
                .for_each(|bit| self.out_bit(bit));
        } else {
            stream.iter().for_each(|bit| self.out_bit(bit));
        }
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// significant bits.
    pub fn flush(&mut self) {
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits;
            self.q_bits += 8 - self.q_bits;
            self.write_stream();
            if self.q_bits > 0 {
                error!("Stuff left in the BitWriter queue.");
            }
        }
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        let bits = self.output.len() * 8 + self.q_bits as usize;
        format!("[{}.{}]", bits / 8, bits % 8)
    }
}
