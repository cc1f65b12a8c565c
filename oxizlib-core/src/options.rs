//! Stream configuration.

use crate::constants::*;
use crate::error::{Result, ZlibError};
use crate::traits::{FlushMode, Strategy};

/// Parameters for creating a stream and for driving it in chunks.
///
/// The codec fields (`level`, `window_bits`, `mem_level`, `strategy`) are
/// passed to the codec untouched; decompression modes only read
/// `window_bits`. `chunk_size`, `flush` and `finish_flush` are used by the
/// chunked stream driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamOptions {
    /// Compression level, `-1..=9`.
    pub level: i32,
    /// Base-two logarithm of the window size, `8..=15`.
    pub window_bits: i32,
    /// Memory used for internal compression state, `1..=9`.
    pub mem_level: i32,
    /// Compression strategy.
    pub strategy: Strategy,
    /// Size of the output chunk buffer used by stream drivers.
    pub chunk_size: usize,
    /// Flush mode used for ordinary writes.
    pub flush: FlushMode,
    /// Flush mode used when finishing the stream.
    pub finish_flush: FlushMode,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            level: Z_DEFAULT_LEVEL,
            window_bits: Z_DEFAULT_WINDOWBITS,
            mem_level: Z_DEFAULT_MEMLEVEL,
            strategy: Strategy::Default,
            chunk_size: Z_DEFAULT_CHUNK as usize,
            flush: FlushMode::None,
            finish_flush: FlushMode::Finish,
        }
    }
}

impl StreamOptions {
    /// Create options with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression level.
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Set the window bits.
    pub fn with_window_bits(mut self, window_bits: i32) -> Self {
        self.window_bits = window_bits;
        self
    }

    /// Set the memory level.
    pub fn with_mem_level(mut self, mem_level: i32) -> Self {
        self.mem_level = mem_level;
        self
    }

    /// Set the compression strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the driver chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the flush mode used for writes.
    pub fn with_flush(mut self, flush: FlushMode) -> Self {
        self.flush = flush;
        self
    }

    /// Set the flush mode used when finishing.
    pub fn with_finish_flush(mut self, finish_flush: FlushMode) -> Self {
        self.finish_flush = finish_flush;
        self
    }

    /// Check every field against its documented bounds.
    pub fn validate(&self) -> Result<()> {
        check("level", self.level.into(), Z_MIN_LEVEL, Z_MAX_LEVEL)?;
        check(
            "window_bits",
            self.window_bits.into(),
            Z_MIN_WINDOWBITS,
            Z_MAX_WINDOWBITS,
        )?;
        check(
            "mem_level",
            self.mem_level.into(),
            Z_MIN_MEMLEVEL,
            Z_MAX_MEMLEVEL,
        )?;
        let chunk_size = i64::try_from(self.chunk_size).unwrap_or(i64::MAX);
        check("chunk_size", chunk_size, Z_MIN_CHUNK, Z_MAX_CHUNK)
    }
}

fn check(name: &'static str, value: i64, min: i32, max: i32) -> Result<()> {
    if (i64::from(min)..=i64::from(max)).contains(&value) {
        Ok(())
    } else {
        Err(ZlibError::invalid_parameter(
            name,
            value,
            min.into(),
            max.into(),
        ))
    }
}
