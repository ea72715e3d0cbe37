use std::fmt;
use crate::SPMC::Buffer::RingBuffer;
use crate::SPMC::{Reader, Writer};

/// Debug function for RingBuffer
///
/// Shows geometry and cursor bookkeeping; never the stored bytes.
/// Uses `try_lock` so formatting from inside a held lock cannot deadlock.
pub fn debug_ring_buffer(buffer: &RingBuffer, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut s = f.debug_struct("RingBuffer");
    s.field("channel_id", &buffer.channel_id)
        .field("capacity", &buffer.capacity());
    match buffer.table.try_lock() {
        Some(table) => s
            .field("write_pos", &table.write_pos)
            .field("readers", &table.cursors.len())
            .field("writer_alive", &table.writer_alive)
            .finish(),
        None => s.finish_non_exhaustive(),
    }
}

/// Debug function for Writer
pub fn debug_writer(writer: &Writer, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Writer")
        .field("ring", writer.ring())
        .finish()
}

/// Debug function for Reader
///
/// Shows:
/// - Reader ID
/// - Channel ID of the ring it reads
/// - Cursor position, if the reader is still open
pub fn debug_reader(reader: &Reader, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut s = f.debug_struct("Reader");
    s.field("id", &reader.id())
        .field("channel_id", &reader.ring().channel_id);
    match reader.ring().table.try_lock() {
        Some(table) => match table.cursors.get(&reader.id()) {
            Some(cursor) => s.field("read_pos", &cursor.read_pos).finish(),
            None => s.field("closed", &true).finish(),
        },
        None => s.finish_non_exhaustive(),
    }
}
