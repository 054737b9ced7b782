//! Bit addressing across a raster.
//!
//! The raster is treated as a flat array of `width * height` cells, each
//! offering `bits_per_layer * layers` bits. A bit index first cycles through
//! the bit window of layer 0, then layer 1 and so on, before moving to the
//! next pixel in row-major order. Every index in `0..capacity` maps to a
//! distinct coordinate.

use stegplane_raster::{BitCoordinate, Raster};

use crate::capacity::Capacity;
use crate::config::BitRange;

/// Map a bit index to the coordinate it addresses.
///
/// Returns `None` once `bit_index` reaches `capacity`.
pub fn next_shot(
    bit_index: u64,
    width: u32,
    start_bit: u8,
    bits_per_layer: u8,
    layer_count: u8,
    capacity: u64,
) -> Option<BitCoordinate> {
    if bit_index >= capacity {
        return None;
    }
    let cell_bits = u64::from(bits_per_layer) * u64::from(layer_count);
    if cell_bits == 0 || width == 0 {
        return None;
    }

    let position_in_cell = bit_index % cell_bits;
    let cell = (bit_index - position_in_cell) / cell_bits;
    let x = cell % u64::from(width);
    let y = (cell - x) / u64::from(width);
    let layer = position_in_cell / u64::from(bits_per_layer);
    let bit_position = u64::from(start_bit) + position_in_cell % u64::from(bits_per_layer);

    Some(BitCoordinate::new(
        x as u32,
        y as u32,
        layer as u8,
        bit_position as u8,
    ))
}

/// Stateless bit sequencer for one raster geometry and bit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequencer {
    width: u32,
    start_bit: u8,
    bits_per_layer: u8,
    layers: u8,
    capacity: u64,
}

impl Sequencer {
    pub fn new(capacity: Capacity, range: BitRange) -> Self {
        Self {
            width: capacity.width,
            start_bit: range.start(),
            bits_per_layer: range.bits_per_layer(),
            layers: capacity.layers,
            capacity: capacity.bits,
        }
    }

    pub fn for_raster(raster: &Raster, range: BitRange) -> Self {
        Self::new(Capacity::of(raster, range), range)
    }

    /// Total number of addressable bits.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// The coordinate for `index`, or `None` past the end.
    pub fn shot(&self, index: u64) -> Option<BitCoordinate> {
        next_shot(
            index,
            self.width,
            self.start_bit,
            self.bits_per_layer,
            self.layers,
            self.capacity,
        )
    }

    /// Iterate over every coordinate from index 0.
    pub fn shots(&self) -> Shots {
        self.shots_from(0)
    }

    /// Iterate over coordinates starting at `index`.
    pub fn shots_from(&self, index: u64) -> Shots {
        Shots {
            sequencer: *self,
            next: index,
        }
    }
}

/// Finite, restartable sequence of coordinates produced by a [`Sequencer`].
#[derive(Debug, Clone)]
pub struct Shots {
    sequencer: Sequencer,
    next: u64,
}

impl Shots {
    /// Index of the next coordinate to be produced.
    pub fn next_index(&self) -> u64 {
        self.next
    }

    /// Total number of addressable bits of the underlying sequencer.
    pub fn capacity(&self) -> u64 {
        self.sequencer.capacity
    }
}

impl Iterator for Shots {
    type Item = BitCoordinate;

    fn next(&mut self) -> Option<BitCoordinate> {
        let shot = self.sequencer.shot(self.next)?;
        self.next += 1;
        Some(shot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sequencer.capacity.saturating_sub(self.next);
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}
