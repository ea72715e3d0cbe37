// In src/SPMC/writer.rs
use crate::SPMC::error::{Result, RingError};
use crate::SPMC::Buffer::RingBuffer;
use crate::SPMC::Reader;
use std::io;
use std::sync::Arc;
use tracing::warn;

/// The single writer of a ring.
///
/// There is exactly one `Writer` per ring and `write` takes `&mut self`, so
/// writes are totally ordered. Readers are created from it with
/// [`Writer::new_reader`] and keep the ring alive on their own.
///
/// Dropping the writer ends the stream: readers drain what is left and then
/// see `Ok(0)`.
pub struct Writer {
    ring: Arc<RingBuffer>,
}

impl Writer {
    pub(crate) fn new(ring: RingBuffer) -> Self {
        Self {
            ring: Arc::new(ring),
        }
    }

    /// Appends `data` to the ring and wakes every blocked reader.
    ///
    /// The writer never waits for readers; a reader that falls more than one
    /// capacity behind has its cursor moved forward and loses the bytes in
    /// between.
    ///
    /// # Returns
    /// * `Ok(n)` with `n == data.len()` when `data` fits in the ring
    /// * `Err(RingError::Truncated { .. })` when `data` is longer than the
    ///   capacity; the last `capacity` bytes were still written
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        let written = self.ring.publish(data);
        if written < data.len() {
            warn!(
                channel_id = self.ring.channel_id,
                written,
                requested = data.len(),
                "write truncated to ring capacity"
            );
            return Err(RingError::Truncated {
                written,
                requested: data.len(),
            });
        }
        Ok(written)
    }

    /// Creates a reader that starts at the current write position.
    ///
    /// Bytes written before this call are never delivered to it.
    pub fn new_reader(&self) -> Reader {
        let id = self.ring.register_reader();
        Reader::new(Arc::clone(&self.ring), id)
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Total bytes written so far.
    pub fn position(&self) -> u64 {
        self.ring.write_pos()
    }

    /// Number of readers that have not been closed.
    pub fn reader_count(&self) -> usize {
        self.ring.reader_count()
    }

    pub fn channel_id(&self) -> u32 {
        self.ring.channel_id
    }

    pub(crate) fn ring(&self) -> &RingBuffer {
        &self.ring
    }
}

impl io::Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Writer::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for Writer {
    fn drop(&mut self) {
        self.ring.finish();
    }
}
