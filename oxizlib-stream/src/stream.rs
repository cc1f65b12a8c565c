//! Caller-facing stream handle.

use crate::alloc::AllocHooks;
use crate::codec::Codec;
use oxizlib_core::{FlushMode, Mode, Result, StreamOptions, Transform};
use std::mem;

/// A compression or decompression session bound to a caller-owned output
/// buffer.
///
/// Input is loaded with [`load`](Self::load) and consumed by successive
/// [`transform`](Self::transform) calls; bytes the codec did not consume stay
/// loaded for the next call. Every call writes from the start of the output
/// buffer.
///
/// # Example
///
/// ```rust
/// use oxizlib_core::{FlushMode, Mode, StreamOptions};
/// use oxizlib_stream::Stream;
///
/// let mut out = [0u8; 64];
/// let mut stream = Stream::init(Mode::Deflate, &mut out, &StreamOptions::default())?;
/// stream.load(b"hello world");
/// let written = stream.transform(FlushMode::Finish)?;
/// assert_eq!(&stream.output()[..2], &[0x78, 0x9c]);
/// assert!(written > 0);
/// stream.end()?;
/// # Ok::<(), oxizlib_core::ZlibError>(())
/// ```
#[derive(Debug)]
pub struct Stream<'a> {
    codec: Codec,
    output: &'a mut [u8],
    input: &'a [u8],
}

impl<'a> Stream<'a> {
    /// Initialize a stream using the default allocator.
    ///
    /// Options are passed to the codec as given; call
    /// [`StreamOptions::validate`] first to reject out-of-range values early.
    pub fn init(mode: Mode, output: &'a mut [u8], options: &StreamOptions) -> Result<Self> {
        Ok(Self::from_codec(Codec::new(mode, options)?, output))
    }

    /// Initialize a stream whose codec memory comes from `hooks`.
    pub fn init_with_hooks<H>(
        mode: Mode,
        output: &'a mut [u8],
        options: &StreamOptions,
        hooks: H,
    ) -> Result<Self>
    where
        H: AllocHooks + 'static,
    {
        Ok(Self::from_codec(
            Codec::with_hooks(mode, options, hooks)?,
            output,
        ))
    }

    fn from_codec(codec: Codec, output: &'a mut [u8]) -> Self {
        Self {
            codec,
            output,
            input: &[],
        }
    }

    /// Bind `input` for the next transform, replacing any unconsumed input.
    pub fn load(&mut self, input: &'a [u8]) {
        self.input = input;
    }

    /// Run one codec step and return the number of bytes written to the
    /// start of the output buffer.
    pub fn transform(&mut self, flush: FlushMode) -> Result<usize> {
        let (consumed, written) = self.codec.step(self.input, self.output, flush)?;
        self.input = &self.input[consumed..];
        Ok(written)
    }

    /// Input loaded but not yet consumed.
    pub fn pending_input(&self) -> &'a [u8] {
        self.input
    }

    /// Return the codec to its initial state, keeping mode, options, hooks
    /// and output buffer. Unconsumed input is dropped.
    pub fn reset(&mut self) -> Result<()> {
        self.input = &[];
        self.codec.reset()
    }

    /// Finalize the codec and release the allocation hooks.
    pub fn end(self) -> Result<()> {
        self.codec.end()
    }

    /// Replace the output buffer, returning the previous one.
    pub fn bind_output(&mut self, output: &'a mut [u8]) -> &'a mut [u8] {
        mem::replace(&mut self.output, output)
    }

    /// The bound output buffer.
    pub fn output(&self) -> &[u8] {
        self.output
    }

    /// Mode the stream was created with.
    pub fn mode(&self) -> Mode {
        self.codec.mode()
    }

    /// Total bytes consumed since initialization or the last reset.
    pub fn total_in(&self) -> u64 {
        self.codec.total_in()
    }

    /// Total bytes produced since initialization or the last reset.
    pub fn total_out(&self) -> u64 {
        self.codec.total_out()
    }
}
