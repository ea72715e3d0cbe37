// This is the shared byte ring behind one writer and all of its readers

use super::position::RingGeometry;

use crossbeam_utils::CachePadded;
use parking_lot::{Condvar, Mutex, RwLock};
use std::collections::HashMap;

/// Identifier handed out to each reader, unique within one ring.
pub type ReaderId = u64;

/// Per-reader cursor state.
///
/// Lives in the ring's cursor table rather than in the `Reader` handle so the
/// writer can correct it under the same lock it publishes `write_pos` with.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Cursor {
    /// Next byte this reader will consume, in the writer's counter space.
    pub read_pos: u64,
    pub bytes_read: u64,
    /// Bytes lost because the writer lapped this cursor.
    pub bytes_skipped: u64,
}

/// Everything guarded by the cursor mutex.
///
/// A cursor that is not in `cursors` belongs to a closed reader.
pub(crate) struct CursorTable {
    /// Total bytes ever written. Only advanced while the storage write lock
    /// is held, so a reader holding the storage read lock sees it frozen.
    pub write_pos: u64,
    /// Cleared when the `Writer` is dropped.
    pub writer_alive: bool,
    pub next_reader_id: ReaderId,
    pub cursors: HashMap<ReaderId, Cursor>,
}

/// The shared ring.
///
/// ### Concurrency Design:
/// - **Storage** sits behind a shared/exclusive lock. The writer copies and
///   corrects cursors while holding it exclusively; readers copy while holding
///   it shared, so any number of readers copy at once.
/// - **Cursors** sit behind one mutex paired with `data_ready`. Readers wait
///   on the condvar while caught up; the writer and `close` broadcast on it.
/// - Lock order is always storage first, then cursors.
pub struct RingBuffer {
    pub(crate) geometry: RingGeometry,

    /// Label carried in logs and `Debug` output.
    pub(crate) channel_id: u32,

    /// Backing bytes, exactly `geometry.capacity()` long.
    pub(crate) storage: CachePadded<RwLock<Box<[u8]>>>,

    pub(crate) table: CachePadded<Mutex<CursorTable>>,

    /// Broadcast after every non-empty write, every close, and writer drop.
    pub(crate) data_ready: Condvar,
}

/// How long a read may park while its cursor is caught up.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Wait {
    Never,
    Forever,
    Until(std::time::Instant),
}
