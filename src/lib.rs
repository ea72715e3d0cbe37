//! A fixed-capacity byte ring with one writer and any number of independent
//! readers. Each reader keeps its own cursor; a reader that falls more than
//! one capacity behind is moved forward and loses the overwritten bytes.
//!
//! ```
//! use dmxp_ringcast::new_ring_buffer;
//!
//! let mut writer = new_ring_buffer(8);
//! let reader = writer.new_reader();
//!
//! writer.write(b"1234").unwrap();
//! let mut buf = [0u8; 8];
//! let n = reader.read(&mut buf).unwrap();
//! assert_eq!(&buf[..n], b"1234");
//! ```

// Module naming follows project convention (SPMC = Single-Producer Multi-Consumer)
#[allow(non_snake_case)]
pub mod SPMC;

#[allow(non_snake_case)]
pub(crate) mod Debug {
    pub mod StructDebug;
}

pub use SPMC::error::Result;
pub use SPMC::Structs::CursorStats;
pub use SPMC::{new_ring_buffer, Reader, RingBuilder, RingError, Writer};
