use crate::error::{FrameError, Result};

/// Number of bits occupied by the length prefix.
pub const LENGTH_PREFIX_BITS: u64 = 32;

/// Largest payload the 32-bit prefix can describe.
pub const MAX_PAYLOAD_LEN: usize = u32::MAX as usize;

/// Bit layout of a hidden message:
///
/// ```text
/// ┌──────────────────────────────┬──────────────────────────────────┐
/// │ Length (32 bits)             │ Payload (Length × 8 bits)        │
/// │ bit i = (length >> i) & 1    │ each byte most-significant first │
/// └──────────────────────────────┴──────────────────────────────────┘
/// ```
///
/// Returns the total number of bits needed to frame `len` payload bytes.
pub fn framed_bits(len: u32) -> u64 {
    u64::from(len) * 8 + LENGTH_PREFIX_BITS
}

/// Check that a payload length fits the 32-bit prefix.
pub fn prefix_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| FrameError::PayloadTooLarge {
        size: len,
        max: MAX_PAYLOAD_LEN,
    })
}

/// The 32 prefix bits for a payload length, in embedding order.
///
/// Bit `i` of the sequence is bit `i` of the length, so the least
/// significant bit is embedded first.
pub fn write_length_prefix_bits(len: u32) -> LengthPrefixBits {
    LengthPrefixBits { len, next: 0 }
}

/// Reassemble a payload length from the 32 prefix bits in embedding order.
///
/// The bits are first accumulated most-significant first, then bit-reversed;
/// the result is the exact inverse of [`write_length_prefix_bits`].
pub fn read_length_prefix_bits(bits: &[bool; LENGTH_PREFIX_BITS as usize]) -> u32 {
    let retrieved = bits
        .iter()
        .fold(0u32, |acc, bit| (acc << 1) | u32::from(*bit));
    retrieved.reverse_bits()
}

/// Iterator over the prefix bits of a payload length.
#[derive(Debug, Clone)]
pub struct LengthPrefixBits {
    len: u32,
    next: u32,
}

impl Iterator for LengthPrefixBits {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if u64::from(self.next) >= LENGTH_PREFIX_BITS {
            return None;
        }
        let bit = (self.len >> self.next) & 1 == 1;
        self.next += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (LENGTH_PREFIX_BITS - u64::from(self.next)) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LengthPrefixBits {}
