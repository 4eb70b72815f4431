//! Partial-framebuffer display path
//!
//! The engine renders into a single [`DisplayBuffer`] one band at a
//! time and hands each band to a [`DisplayFlush`] as a [`Tile`]. The
//! buffer is reused for the next band only after the flush has signalled
//! [`FlushReady`].

pub mod buffer;
pub mod flush;

pub use buffer::DisplayBuffer;
pub use flush::{DisplayFlush, FlushDriver, FlushReady, Tile, SWAP_BYTES};
