use super::error::{Result, RingError};
use super::Buffer::position::{RingGeometry, DEFAULT_CAPACITY};
use super::Buffer::RingBuffer;
use super::Writer;

pub struct RingBuilder {
    capacity: usize,
    channel_id: u32,
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY, // 4KB default
            channel_id: 0, // Default channel ID
        }
    }
}

impl RingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested capacity in bytes; rounded up to a power of two on build.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_channel_id(mut self, channel_id: u32) -> Self {
        self.channel_id = channel_id;
        self
    }

    /// Builds the ring and returns its writer.
    ///
    /// # Panics
    /// If the requested capacity is below 2 or too large to round up.
    pub fn build(self) -> Writer {
        match self.try_build() {
            Ok(writer) => writer,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_build(self) -> Result<Writer> {
        let geometry = RingGeometry::for_capacity(self.capacity)
            .ok_or(RingError::InvalidCapacity(self.capacity))?;
        tracing::debug!(
            channel_id = self.channel_id,
            requested = self.capacity,
            capacity = geometry.capacity(),
            "ring created"
        );
        Ok(Writer::new(RingBuffer::new(geometry, self.channel_id)))
    }
}

/// Creates a ring of at least `capacity` bytes and returns its writer.
///
/// # Panics
/// If `capacity` is below 2 or too large to round up.
pub fn new_ring_buffer(capacity: usize) -> Writer {
    RingBuilder::new().with_capacity(capacity).build()
}
