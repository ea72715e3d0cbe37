// Snapshot types handed out by the ring; plain values, no locks inside

/// Point-in-time view of one reader's cursor.
///
/// `write_pos - read_pos` is what the reader could consume right now and
/// never exceeds the ring capacity.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CursorStats {
    pub reader_id: u64,
    pub read_pos: u64,
    pub write_pos: u64,
    /// Bytes copied out by `read` calls.
    pub bytes_read: u64,
    /// Bytes the writer overwrote before this reader got to them.
    pub bytes_skipped: u64,
}

impl CursorStats {
    /// Bytes waiting for this reader.
    pub fn lag(&self) -> u64 {
        self.write_pos - self.read_pos
    }

    pub fn is_caught_up(&self) -> bool {
        self.read_pos == self.write_pos
    }
}
