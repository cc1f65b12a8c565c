//! # OxiZlib Stream
//!
//! Stateful zlib, gzip and raw DEFLATE streams over the system zlib.
//!
//! ## Features
//!
//! - **Stream handle**: caller-owned output buffer, loaded input that
//!   persists across bounded transform steps, in-place reset
//! - **Allocator bridge**: route every codec allocation through
//!   caller-supplied hooks that identify blocks by id
//!   - [`FnHooks`] for a context plus two callables
//!   - [`BlockTable`] for a tracking host-side allocator
//! - **Driver**: [`ZlibWriter`] pushes chunks into any [`std::io::Write`]
//! - **One-shot helpers**: `deflate_sync`, `gunzip_sync` and friends
//!
//! ## Example
//!
//! ```rust
//! use oxizlib_core::StreamOptions;
//! use oxizlib_stream::{deflate_sync, inflate_sync};
//!
//! let opts = StreamOptions::default();
//! let compressed = deflate_sync(b"Hello, World! Hello, World!", &opts).unwrap();
//! let restored = inflate_sync(&compressed, &opts).unwrap();
//! assert_eq!(&restored, b"Hello, World! Hello, World!");
//! ```
//!
//! ## Framing
//!
//! The mode selects the framing by transforming the window bits handed to
//! the codec:
//!
//! - Deflate / Inflate: zlib header and Adler-32 trailer
//! - DeflateRaw / InflateRaw: bare bitstream
//! - Gzip / Gunzip: gzip header and CRC-32 trailer

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod alloc;
pub mod codec;
pub mod oneshot;
pub mod stream;
pub mod write;

// Re-exports
pub use alloc::{AllocHooks, AllocStats, AllocationHeader, BlockTable, FnHooks, HEADER_SIZE};
pub use codec::Codec;
pub use oneshot::{
    deflate_raw_sync, deflate_sync, gunzip_sync, gzip_sync, inflate_raw_sync, inflate_sync,
    process_sync,
};
pub use stream::Stream;
pub use write::ZlibWriter;
