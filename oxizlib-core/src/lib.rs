//! # OxiZlib Core
//!
//! Core components for the OxiZlib streaming engine.
//!
//! This crate provides the vocabulary shared by every stream:
//!
//! - [`constants`]: Flush, strategy, level, bound and status constants
//! - [`mode`]: Stream modes and the window-bits framing transform
//! - [`traits`]: Flush modes, strategies, statuses and the [`Transform`] trait
//! - [`options`]: Stream configuration
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI                                                     │
//! │     oxizlib compress / decompress / constants          │
//! ├─────────────────────────────────────────────────────────┤
//! │ Driver                                                  │
//! │     ZlibWriter, one-shot helpers                        │
//! ├─────────────────────────────────────────────────────────┤
//! │ Engine                                                  │
//! │     Stream handle, codec lifecycle, allocator bridge    │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate)                                       │
//! │     Constants, Mode, FlushMode, StreamOptions, errors   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxizlib_core::{Mode, StreamOptions};
//!
//! let opts = StreamOptions::new().with_level(9);
//! assert!(opts.validate().is_ok());
//! assert_eq!(Mode::Gzip.effective_window_bits(opts.window_bits), 31);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod constants;
pub mod error;
pub mod mode;
pub mod options;
pub mod traits;

// Re-exports for convenience
pub use error::{ErrorCode, Result, UNKNOWN_ERROR_MESSAGE, ZlibError};
pub use mode::Mode;
pub use options::StreamOptions;
pub use traits::{FlushMode, Status, Strategy, Transform};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ErrorCode, Result, ZlibError};
    pub use crate::mode::Mode;
    pub use crate::options::StreamOptions;
    pub use crate::traits::{FlushMode, Strategy, Transform};
}
