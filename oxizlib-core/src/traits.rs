//! Core traits and codec parameter types.
//!
//! This module defines the flush, strategy and status vocabulary
//! shared by every stream, and the [`Transform`] trait implemented by codecs.

use crate::constants::*;
use crate::error::{Result, ZlibError};
use crate::mode::Mode;

/// Flush mode for a transform step.
///
/// Discriminants match the codec's numeric flush constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum FlushMode {
    /// No flush - let the codec buffer for best compression.
    #[default]
    None = Z_NO_FLUSH,
    /// Partial flush - emit pending output without aligning to a byte.
    Partial = Z_PARTIAL_FLUSH,
    /// Sync flush - emit all pending output aligned to a byte boundary.
    Sync = Z_SYNC_FLUSH,
    /// Full flush - sync flush and reset the compression dictionary.
    Full = Z_FULL_FLUSH,
    /// Finish - complete the stream.
    Finish = Z_FINISH,
    /// Block - stop at the next deflate block boundary.
    Block = Z_BLOCK,
    /// Trees - like `Block`, also stopping after a block header.
    Trees = Z_TREES,
}

impl FlushMode {
    /// Numeric flush value passed to the codec.
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }
}

impl TryFrom<i32> for FlushMode {
    type Error = ZlibError;

    fn try_from(value: i32) -> Result<Self> {
        Ok(match value {
            Z_NO_FLUSH => Self::None,
            Z_PARTIAL_FLUSH => Self::Partial,
            Z_SYNC_FLUSH => Self::Sync,
            Z_FULL_FLUSH => Self::Full,
            Z_FINISH => Self::Finish,
            Z_BLOCK => Self::Block,
            Z_TREES => Self::Trees,
            other => {
                return Err(ZlibError::invalid_parameter(
                    "flush",
                    other.into(),
                    Z_NO_FLUSH.into(),
                    Z_TREES.into(),
                ));
            }
        })
    }
}

/// Compression strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum Strategy {
    /// Normal data.
    #[default]
    Default = Z_DEFAULT_STRATEGY,
    /// Data produced by a filter (small values, somewhat random).
    Filtered = Z_FILTERED,
    /// Huffman coding only, no string matching.
    HuffmanOnly = Z_HUFFMAN_ONLY,
    /// Match distances limited to one (run-length encoding).
    Rle = Z_RLE,
    /// No dynamic Huffman codes.
    Fixed = Z_FIXED,
}

impl Strategy {
    /// Numeric strategy value passed to the codec.
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }
}

impl TryFrom<i32> for Strategy {
    type Error = ZlibError;

    fn try_from(value: i32) -> Result<Self> {
        Ok(match value {
            Z_DEFAULT_STRATEGY => Self::Default,
            Z_FILTERED => Self::Filtered,
            Z_HUFFMAN_ONLY => Self::HuffmanOnly,
            Z_RLE => Self::Rle,
            Z_FIXED => Self::Fixed,
            other => {
                return Err(ZlibError::invalid_parameter(
                    "strategy",
                    other.into(),
                    Z_DEFAULT_STRATEGY.into(),
                    Z_FIXED.into(),
                ));
            }
        })
    }
}

/// Non-error codec status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Progress was made.
    Ok,
    /// The end of the stream was reached.
    StreamEnd,
    /// A preset dictionary is required to continue.
    NeedDict,
}

impl Status {
    /// Split a codec return value into a status or an error.
    ///
    /// Negative values are errors; the message is attached by the caller,
    /// who has access to the codec's diagnostic string.
    pub fn from_code(code: i32) -> std::result::Result<Self, i32> {
        match code {
            Z_OK => Ok(Self::Ok),
            Z_STREAM_END => Ok(Self::StreamEnd),
            Z_NEED_DICT => Ok(Self::NeedDict),
            c if c > Z_OK => Ok(Self::Ok),
            c => Err(c),
        }
    }
}

/// A codec that turns input bytes into output bytes in bounded steps.
pub trait Transform {
    /// Run one codec step.
    ///
    /// # Arguments
    ///
    /// * `input` - Bytes available to the codec
    /// * `output` - Buffer the codec may fill completely
    /// * `flush` - Flush mode for this step
    ///
    /// # Returns
    ///
    /// A tuple of (bytes consumed from input, bytes written to output).
    fn step(&mut self, input: &[u8], output: &mut [u8], flush: FlushMode)
    -> Result<(usize, usize)>;

    /// Return the codec to its freshly-initialized state.
    fn reset(&mut self) -> Result<()>;

    /// Mode the codec was created with.
    fn mode(&self) -> Mode;

    /// Status returned by the most recent successful step, if the codec
    /// reports one. Cleared by a reset.
    fn last_status(&self) -> Option<Status> {
        None
    }

    /// Finalize the codec and release its resources.
    fn end(self) -> Result<()>
    where
        Self: Sized;
}
