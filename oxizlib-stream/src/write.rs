//! Chunked stream driver.
//!
//! [`ZlibWriter`] feeds written bytes through a codec and forwards every
//! produced chunk to an inner [`Write`] sink.

use crate::alloc::AllocHooks;
use crate::codec::Codec;
use oxizlib_core::constants::{Z_BUF_ERROR, Z_NEED_DICT};
use oxizlib_core::{FlushMode, Mode, Result, Status, StreamOptions, Transform, ZlibError};
use std::io::{self, Write};
use tracing::debug;

/// A writer that compresses or decompresses into an inner sink.
///
/// Each write runs the codec with the configured flush mode until a chunk
/// comes back less than full. A step that can make no progress
/// (`BUF_ERROR`) ends a write or flush pass without error; the finishing
/// pass reports it, so truncated compressed input is detected. A
/// decompressor must also have reached the end of its stream by then; one
/// stopped at a preset dictionary fails with `NEED_DICT`.
///
/// Call [`finish`](Self::finish) or [`try_finish`](Self::try_finish) to
/// complete the stream. Dropping an unfinished writer finishes it and
/// ignores any error.
///
/// # Example
///
/// ```rust
/// use oxizlib_core::StreamOptions;
/// use oxizlib_stream::ZlibWriter;
/// use std::io::Write;
///
/// let mut writer = ZlibWriter::gzip(Vec::new(), &StreamOptions::default())?;
/// writer.write_all(b"hello\n")?;
/// let compressed = writer.finish()?;
/// assert_eq!(&compressed[..2], &[0x1f, 0x8b]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ZlibWriter<W: Write, T: Transform = Codec> {
    sink: Option<W>,
    codec: Option<T>,
    chunk: Vec<u8>,
    options: StreamOptions,
}

impl<W: Write> ZlibWriter<W, Codec> {
    /// Create a writer for `mode` using the default allocator.
    pub fn new(sink: W, mode: Mode, options: &StreamOptions) -> Result<Self> {
        options.validate()?;
        Self::from_transform(sink, Codec::new(mode, options)?, options)
    }

    /// Create a writer whose codec memory comes from `hooks`.
    pub fn with_hooks<H>(sink: W, mode: Mode, options: &StreamOptions, hooks: H) -> Result<Self>
    where
        H: AllocHooks + 'static,
    {
        options.validate()?;
        Self::from_transform(sink, Codec::with_hooks(mode, options, hooks)?, options)
    }

    /// zlib-wrapped compressor.
    pub fn deflate(sink: W, options: &StreamOptions) -> Result<Self> {
        Self::new(sink, Mode::Deflate, options)
    }

    /// zlib-wrapped decompressor.
    pub fn inflate(sink: W, options: &StreamOptions) -> Result<Self> {
        Self::new(sink, Mode::Inflate, options)
    }

    /// Raw DEFLATE compressor.
    pub fn deflate_raw(sink: W, options: &StreamOptions) -> Result<Self> {
        Self::new(sink, Mode::DeflateRaw, options)
    }

    /// Raw DEFLATE decompressor.
    pub fn inflate_raw(sink: W, options: &StreamOptions) -> Result<Self> {
        Self::new(sink, Mode::InflateRaw, options)
    }

    /// gzip compressor.
    pub fn gzip(sink: W, options: &StreamOptions) -> Result<Self> {
        Self::new(sink, Mode::Gzip, options)
    }

    /// gzip decompressor.
    pub fn gunzip(sink: W, options: &StreamOptions) -> Result<Self> {
        Self::new(sink, Mode::Gunzip, options)
    }

    /// Total bytes consumed by the codec, or `None` once finished.
    pub fn total_in(&self) -> Option<u64> {
        self.codec.as_ref().map(Codec::total_in)
    }

    /// Total bytes produced by the codec, or `None` once finished.
    pub fn total_out(&self) -> Option<u64> {
        self.codec.as_ref().map(Codec::total_out)
    }
}

impl<W: Write, T: Transform> ZlibWriter<W, T> {
    /// Drive an existing transform.
    pub fn from_transform(sink: W, transform: T, options: &StreamOptions) -> Result<Self> {
        options.validate()?;
        debug!(
            mode = transform.mode().name(),
            chunk_size = options.chunk_size,
            "stream driver created"
        );
        Ok(Self {
            sink: Some(sink),
            codec: Some(transform),
            chunk: vec![0; options.chunk_size],
            options: options.clone(),
        })
    }

    /// Options the writer was created with.
    pub fn options(&self) -> &StreamOptions {
        &self.options
    }

    /// Whether the stream has been finished.
    pub fn is_finished(&self) -> bool {
        self.codec.is_none()
    }

    /// Reference to the sink.
    pub fn get_ref(&self) -> Option<&W> {
        self.sink.as_ref()
    }

    /// Mutable reference to the sink.
    pub fn get_mut(&mut self) -> Option<&mut W> {
        self.sink.as_mut()
    }

    /// Feed `data` through the codec and return how many bytes it consumed.
    ///
    /// Fewer than `data.len()` bytes are consumed only when a decompressor
    /// reaches the end of its stream; the rest is trailing data.
    pub fn feed(&mut self, data: &[u8]) -> Result<usize> {
        self.pass(data, self.options.flush, true)
    }

    /// Run a pass with `flush`, then flush the sink.
    pub fn flush_with(&mut self, flush: FlushMode) -> Result<()> {
        self.pass(&[], flush, true)?;
        if let Some(sink) = self.sink.as_mut() {
            sink.flush()?;
        }
        Ok(())
    }

    /// Return the codec to its initial state without finishing the stream.
    pub fn reset(&mut self) -> Result<()> {
        match self.codec.as_mut() {
            Some(codec) => codec.reset(),
            None => Err(closed()),
        }
    }

    /// Complete the stream and release the codec. Later writes fail with
    /// `STREAM_CLOSED`; calling this again does nothing.
    pub fn try_finish(&mut self) -> Result<()> {
        if self.codec.is_none() {
            return Ok(());
        }
        self.pass(&[], self.options.finish_flush, false)?;
        if let Some(codec) = self.codec.as_ref() {
            check_complete(codec)?;
        }

        if let Some(codec) = self.codec.take() {
            let mode = codec.mode();
            codec.end()?;
            debug!(mode = mode.name(), "stream finished");
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.flush()?;
        }
        Ok(())
    }

    /// Complete the stream and return the sink.
    pub fn finish(mut self) -> Result<W> {
        self.try_finish()?;
        self.sink.take().ok_or_else(closed)
    }

    fn pass(&mut self, mut input: &[u8], flush: FlushMode, tolerate_buf_error: bool) -> Result<usize> {
        let (Some(codec), Some(sink)) = (self.codec.as_mut(), self.sink.as_mut()) else {
            return Err(closed());
        };

        let total = input.len();
        loop {
            let (consumed, written) = match codec.step(input, &mut self.chunk, flush) {
                Ok(progress) => progress,
                Err(err) if tolerate_buf_error && err.is_buf_error() && input.is_empty() => break,
                Err(err) => return Err(err),
            };
            input = &input[consumed..];
            if written > 0 {
                sink.write_all(&self.chunk[..written])?;
            }
            if written < self.chunk.len() {
                break;
            }
        }
        Ok(total - input.len())
    }
}

fn check_complete<T: Transform>(codec: &T) -> Result<()> {
    if codec.mode().is_compress() {
        return Ok(());
    }
    match codec.last_status() {
        Some(Status::NeedDict) => Err(ZlibError::codec(Z_NEED_DICT, "Missing dictionary")),
        Some(Status::Ok) => Err(ZlibError::codec(Z_BUF_ERROR, "unexpected end of file")),
        Some(Status::StreamEnd) | None => Ok(()),
    }
}

fn closed() -> ZlibError {
    ZlibError::stream_closed("write after end")
}

impl<W: Write, T: Transform> Write for ZlibWriter<W, T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.feed(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(self.flush_with(FlushMode::Sync)?)
    }
}

impl<W: Write, T: Transform> Drop for ZlibWriter<W, T> {
    fn drop(&mut self) {
        if self.sink.is_some() {
            let _ = self.try_finish();
        }
    }
}
