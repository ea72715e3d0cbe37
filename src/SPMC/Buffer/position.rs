// Position arithmetic for the ring.
//
// Every cursor is a plain monotonically increasing u64 byte counter. The low
// `log2(capacity)` bits select the physical slot; the bit directly above them
// flips each time the counter crosses a full pass over the storage, which is
// what distinguishes "same slot, same pass" from "same slot, one pass apart".

/// The smallest capacity a ring can be built with.
pub const MIN_CAPACITY: usize = 2;

/// Capacity used by `RingBuilder::default()`.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Offset of `pos` inside a storage array of `capacity` bytes.
///
/// `capacity` must be a power of two.
#[inline]
pub fn physical_slot(pos: u64, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    (pos & (capacity as u64 - 1)) as usize
}

/// The pass bit of `pos`: `(pos / capacity) % 2`.
///
/// `capacity` must be a power of two.
#[inline]
pub fn generation_parity(pos: u64, capacity: usize) -> bool {
    debug_assert!(capacity.is_power_of_two());
    pos & (capacity as u64) != 0
}

/// True when `a` and `b` sit on the same pass of the ring, i.e. they agree
/// on both the physical slot bits and the pass bit.
#[inline]
pub fn same_generation(a: u64, b: u64, capacity: usize) -> bool {
    let window = (capacity as u64) << 1;
    (a ^ b) & (window - 1) == 0
}

/// Round a requested capacity up to the next power of two.
///
/// Returns `None` for requests below [`MIN_CAPACITY`] or too large to round.
pub fn next_capacity(requested: usize) -> Option<usize> {
    if requested < MIN_CAPACITY {
        return None;
    }
    requested.checked_next_power_of_two()
}

/// Fixed geometry of one ring: capacity and the mask derived from it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RingGeometry {
    capacity: usize,
    mask: u64,
}

impl RingGeometry {
    /// Geometry for `requested` bytes rounded up to a power of two.
    ///
    /// Returns `None` when [`next_capacity`] does.
    pub fn for_capacity(requested: usize) -> Option<Self> {
        next_capacity(requested).map(|capacity| Self {
            capacity,
            mask: capacity as u64 - 1,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn slot(&self, pos: u64) -> usize {
        (pos & self.mask) as usize
    }

    /// Split a run of `len` bytes starting at `pos` into the segment that fits
    /// before the end of storage and the segment that wraps to the front.
    ///
    /// Returns `(start_slot, tail_len, head_len)`; `tail_len + head_len == len`.
    #[inline]
    pub fn split(&self, pos: u64, len: usize) -> (usize, usize, usize) {
        debug_assert!(len <= self.capacity);
        let start = self.slot(pos);
        let tail = len.min(self.capacity - start);
        (start, tail, len - tail)
    }

    /// Where a cursor at `read_pos` must be after the writer reached
    /// `write_pos`, plus the number of bytes it lost to the move.
    ///
    /// A cursor at most one capacity behind is left alone.
    #[inline]
    pub fn correct(&self, read_pos: u64, write_pos: u64) -> (u64, u64) {
        let cap = self.capacity as u64;
        let lag = write_pos - read_pos;
        if lag <= cap {
            return (read_pos, 0);
        }
        let snapped = write_pos - cap;
        // The snapped cursor lands on the writer's slot, one pass behind.
        debug_assert_eq!(self.slot(snapped), self.slot(write_pos));
        debug_assert_ne!(
            generation_parity(snapped, self.capacity),
            generation_parity(write_pos, self.capacity)
        );
        (snapped, lag - cap)
    }
}
