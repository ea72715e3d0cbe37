mod builder;
mod debug;
mod reader;
mod writer;

pub mod error;

pub use builder::{new_ring_buffer, RingBuilder};
pub use error::RingError;
pub use reader::Reader;
pub use writer::Writer;

pub mod Buffer {
    pub mod Buffer;
    pub mod Buffer_impl;
    pub mod position;
    pub use Buffer::{ReaderId, RingBuffer}; // re-export for stable path
    pub(crate) use Buffer::Wait;
}

pub mod Structs {
    pub mod Buffer_Structs;
    pub use Buffer_Structs::CursorStats; // re-export for stable path
}
