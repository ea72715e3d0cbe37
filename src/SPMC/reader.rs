// src/SPMC/reader.rs

use crate::SPMC::error::Result;
use crate::SPMC::Buffer::{ReaderId, RingBuffer, Wait};
use crate::SPMC::Structs::Buffer_Structs::CursorStats;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One independent read cursor over a ring.
///
/// Every method takes `&self`, so a reader can be shared between threads:
/// one thread may block in [`Reader::read`] while another calls
/// [`Reader::close`], which wakes the blocked call with
/// `RingError::ReaderClosed`.
pub struct Reader {
    ring: Arc<RingBuffer>,
    id: ReaderId,
}

impl Reader {
    pub(crate) fn new(ring: Arc<RingBuffer>, id: ReaderId) -> Self {
        Self { ring, id }
    }

    /// Reads the bytes written since this reader last read, blocking while
    /// there are none.
    ///
    /// Returns as soon as at least one byte was copied; fewer than
    /// `buf.len()` bytes is normal.
    ///
    /// # Returns
    /// * `Ok(n)` with `n > 0` bytes copied into `buf`
    /// * `Ok(0)` if `buf` is empty, or the writer was dropped and everything
    ///   has been read
    /// * `Err(RingError::ReaderClosed)` once [`Reader::close`] has been called
    pub fn read(&self, buf: &mut [u8]) -> Result<usize> {
        self.ring
            .read_into(self.id, buf, Wait::Forever)
            .map(|n| n.unwrap_or(0))
    }

    /// Reads without blocking.
    ///
    /// # Returns
    /// * `Ok(Some(n))` same as [`Reader::read`]
    /// * `Ok(None)` if nothing is available yet
    pub fn try_read(&self, buf: &mut [u8]) -> Result<Option<usize>> {
        self.ring.read_into(self.id, buf, Wait::Never)
    }

    /// Reads, waiting at most `timeout` for data.
    ///
    /// # Returns
    /// * `Ok(Some(n))` same as [`Reader::read`]
    /// * `Ok(None)` if the timeout was reached
    pub fn read_timeout(&self, buf: &mut [u8], timeout: Duration) -> Result<Option<usize>> {
        let wait = match Instant::now().checked_add(timeout) {
            Some(deadline) => Wait::Until(deadline),
            None => Wait::Forever,
        };
        self.ring.read_into(self.id, buf, wait)
    }

    /// Closes the reader. Idempotent.
    ///
    /// The writer stops tracking the cursor, and every pending or future read
    /// fails with `RingError::ReaderClosed`.
    pub fn close(&self) {
        self.ring.release_reader(self.id);
    }

    pub fn is_closed(&self) -> bool {
        !self.ring.is_registered(self.id)
    }

    /// Bytes that could be read right now without blocking.
    pub fn available(&self) -> Result<u64> {
        self.ring.available(self.id)
    }

    /// Snapshot of this reader's position and counters.
    pub fn stats(&self) -> Result<CursorStats> {
        self.ring.stats(self.id)
    }

    /// Returns the id of this reader, unique within its ring
    pub fn id(&self) -> ReaderId {
        self.id
    }

    pub(crate) fn ring(&self) -> &RingBuffer {
        &self.ring
    }
}

impl io::Read for Reader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Reader::read(self, buf).map_err(io::Error::from)
    }
}

impl io::Read for &Reader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Reader::read(*self, buf).map_err(io::Error::from)
    }
}

impl Drop for Reader {
    fn drop(&mut self) {
        self.close();
    }
}
