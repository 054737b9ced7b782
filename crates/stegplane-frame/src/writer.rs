use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Collects bits into a payload buffer of fixed length.
///
/// Bits arrive most significant first; every eighth bit commits a byte.
/// The writer is finished once `len` bytes have been committed.
#[derive(Debug)]
pub struct BitWriter {
    buf: BytesMut,
    len: usize,
    pending: u8,
    pending_bits: u8,
}

impl BitWriter {
    /// Create a writer that accepts exactly `len` bytes worth of bits.
    pub fn new(len: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(len),
            len,
            pending: 0,
            pending_bits: 0,
        }
    }

    /// Append one bit.
    ///
    /// Returns `Err(FrameError::WriteExhausted)` once the writer is finished.
    pub fn set_next(&mut self, bit: bool) -> Result<()> {
        if self.is_finished() {
            return Err(FrameError::WriteExhausted { len: self.len });
        }

        self.pending = (self.pending << 1) | u8::from(bit);
        self.pending_bits += 1;

        if self.pending_bits == 8 {
            self.buf.put_u8(self.pending);
            self.pending = 0;
            self.pending_bits = 0;
        }

        Ok(())
    }

    /// Returns true once `len` bytes have been filled.
    pub fn is_finished(&self) -> bool {
        self.buf.len() >= self.len
    }

    /// Declared payload length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bytes committed so far.
    pub fn filled(&self) -> usize {
        self.buf.len()
    }

    /// Consume the writer and return the committed bytes.
    ///
    /// Bits of an incomplete trailing byte are discarded.
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}
