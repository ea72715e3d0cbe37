use std::collections::HashMap;

use crossbeam_utils::CachePadded;
use parking_lot::{Condvar, Mutex, RwLock};
use tracing::{debug, trace};

use super::position::RingGeometry;
use super::Buffer::{Cursor, CursorTable, ReaderId, RingBuffer, Wait};
use crate::SPMC::error::{Result, RingError};
use crate::SPMC::Structs::Buffer_Structs::CursorStats;

impl RingBuffer {
    /// Create a zeroed ring with the given geometry.
    pub(crate) fn new(geometry: RingGeometry, channel_id: u32) -> Self {
        let capacity = geometry.capacity();
        Self {
            geometry,
            channel_id,
            storage: CachePadded::new(RwLock::new(vec![0u8; capacity].into_boxed_slice())),
            table: CachePadded::new(Mutex::new(CursorTable {
                write_pos: 0,
                writer_alive: true,
                next_reader_id: 0,
                cursors: HashMap::new(),
            })),
            data_ready: Condvar::new(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.geometry.capacity()
    }

    /// Current write position.
    pub fn write_pos(&self) -> u64 {
        self.table.lock().write_pos
    }

    pub fn reader_count(&self) -> usize {
        self.table.lock().cursors.len()
    }

    /// Copy `data` into the ring, correct lapped cursors and wake readers.
    ///
    /// Only the last `capacity` bytes of `data` are stored. Returns the number
    /// of bytes stored. An empty `data` is a no-op and wakes nobody.
    pub(crate) fn publish(&self, data: &[u8]) -> usize {
        let capacity = self.capacity();
        let kept = if data.len() > capacity {
            &data[data.len() - capacity..]
        } else {
            data
        };
        if kept.is_empty() {
            return 0;
        }
        let len = kept.len();

        let mut storage = self.storage.write();
        let mut table = self.table.lock();

        let (start, tail, head) = self.geometry.split(table.write_pos, len);
        storage[start..start + tail].copy_from_slice(&kept[..tail]);
        storage[..head].copy_from_slice(&kept[tail..]);

        table.write_pos += len as u64;
        let write_pos = table.write_pos;

        for (id, cursor) in table.cursors.iter_mut() {
            let (read_pos, skipped) = self.geometry.correct(cursor.read_pos, write_pos);
            if skipped > 0 {
                debug!(
                    channel_id = self.channel_id,
                    reader_id = *id,
                    skipped,
                    "reader overwritten"
                );
                cursor.read_pos = read_pos;
                cursor.bytes_skipped += skipped;
            }
        }

        self.data_ready.notify_all();
        trace!(channel_id = self.channel_id, len, write_pos, "published");
        len
    }

    /// Add a cursor positioned at the current write position.
    pub(crate) fn register_reader(&self) -> ReaderId {
        let mut table = self.table.lock();
        let id = table.next_reader_id;
        table.next_reader_id += 1;
        let read_pos = table.write_pos;
        table.cursors.insert(
            id,
            Cursor {
                read_pos,
                bytes_read: 0,
                bytes_skipped: 0,
            },
        );
        debug!(channel_id = self.channel_id, reader_id = id, read_pos, "reader registered");
        id
    }

    /// Drop a cursor and wake its blocked reads. Returns false if it was
    /// already gone.
    pub(crate) fn release_reader(&self, id: ReaderId) -> bool {
        let mut table = self.table.lock();
        let removed = table.cursors.remove(&id).is_some();
        if removed {
            // Waiters share one condvar; each rechecks its own cursor.
            self.data_ready.notify_all();
            debug!(channel_id = self.channel_id, reader_id = id, "reader closed");
        }
        removed
    }

    pub(crate) fn is_registered(&self, id: ReaderId) -> bool {
        self.table.lock().cursors.contains_key(&id)
    }

    /// Mark the writer gone so caught-up readers see end of stream.
    pub(crate) fn finish(&self) {
        let mut table = self.table.lock();
        table.writer_alive = false;
        self.data_ready.notify_all();
        debug!(
            channel_id = self.channel_id,
            write_pos = table.write_pos,
            "writer finished"
        );
    }

    /// Bytes `id` could read right now without blocking.
    pub(crate) fn available(&self, id: ReaderId) -> Result<u64> {
        let table = self.table.lock();
        let cursor = table.cursors.get(&id).ok_or(RingError::ReaderClosed)?;
        Ok(table.write_pos - cursor.read_pos)
    }

    pub(crate) fn stats(&self, id: ReaderId) -> Result<CursorStats> {
        let table = self.table.lock();
        let cursor = table.cursors.get(&id).ok_or(RingError::ReaderClosed)?;
        Ok(CursorStats {
            reader_id: id,
            read_pos: cursor.read_pos,
            write_pos: table.write_pos,
            bytes_read: cursor.bytes_read,
            bytes_skipped: cursor.bytes_skipped,
        })
    }

    /// Read into `buf` for reader `id`.
    ///
    /// Returns `Ok(None)` when the cursor is caught up and `wait` ran out,
    /// `Ok(Some(0))` at end of stream or for an empty `buf`, and otherwise the
    /// number of bytes copied.
    pub(crate) fn read_into(
        &self,
        id: ReaderId,
        buf: &mut [u8],
        wait: Wait,
    ) -> Result<Option<usize>> {
        if buf.is_empty() {
            return if self.is_registered(id) {
                Ok(Some(0))
            } else {
                Err(RingError::ReaderClosed)
            };
        }

        let mut expired = false;
        let (storage, start, len) = loop {
            {
                let mut table = self.table.lock();
                loop {
                    let cursor = table.cursors.get(&id).ok_or(RingError::ReaderClosed)?;
                    if cursor.read_pos != table.write_pos {
                        break;
                    }
                    if !table.writer_alive {
                        return Ok(Some(0));
                    }
                    if expired {
                        return Ok(None);
                    }
                    match wait {
                        Wait::Never => return Ok(None),
                        Wait::Forever => self.data_ready.wait(&mut table),
                        Wait::Until(deadline) => {
                            expired = self.data_ready.wait_until(&mut table, deadline).timed_out();
                        }
                    }
                }
            }

            // The cursor mutex is released before taking the storage lock to
            // keep the storage -> cursors order the writer uses. A write may
            // land in between; the range is recomputed below from whatever it
            // left behind.
            let storage = self.storage.read();
            let mut table = self.table.lock();
            let write_pos = table.write_pos;
            let cursor = table.cursors.get_mut(&id).ok_or(RingError::ReaderClosed)?;
            let start = cursor.read_pos;
            let len = buf.len().min((write_pos - start) as usize);
            if len == 0 {
                // Another thread reading through this handle claimed the bytes
                // first; go back to waiting.
                continue;
            }
            // Claim the range before copying so concurrent reads through the
            // same handle never hand out the same bytes twice.
            cursor.read_pos += len as u64;
            cursor.bytes_read += len as u64;
            break (storage, start, len);
        };

        // The writer cannot run while `storage` is held, so [start, start+len)
        // stays intact for the copy.
        let (slot, tail, head) = self.geometry.split(start, len);
        buf[..tail].copy_from_slice(&storage[slot..slot + tail]);
        buf[tail..len].copy_from_slice(&storage[..head]);
        drop(storage);

        trace!(channel_id = self.channel_id, reader_id = id, start, len, "read");
        Ok(Some(len))
    }
}
