use crate::error::{FrameError, Result};

/// Reads a payload as a sequence of bits, most significant bit of each byte first.
///
/// The reader is finished once the last bit of the last byte has been
/// returned; an empty payload is finished from the start.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    remaining_in_byte: u8,
}

impl<'a> BitReader<'a> {
    /// Create a reader over `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            remaining_in_byte: 8,
        }
    }

    /// Read the next bit.
    ///
    /// Returns `Err(FrameError::ReadExhausted)` once the reader is finished.
    pub fn next_bit(&mut self) -> Result<bool> {
        if self.is_finished() {
            return Err(FrameError::ReadExhausted {
                len: self.bytes.len(),
            });
        }

        self.remaining_in_byte -= 1;
        let bit = (self.bytes[self.pos] >> self.remaining_in_byte) & 1 == 1;

        if self.remaining_in_byte == 0 {
            self.pos += 1;
            self.remaining_in_byte = 8;
        }

        Ok(bit)
    }

    /// Returns true once every bit has been read.
    pub fn is_finished(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.pos as u64 * 8 + u64::from(8 - self.remaining_in_byte)
    }

    /// Number of bits left to read.
    pub fn bits_remaining(&self) -> u64 {
        self.bytes.len() as u64 * 8 - self.bits_read()
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.next_bit().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits_remaining() as usize;
        (remaining, Some(remaining))
    }
}
