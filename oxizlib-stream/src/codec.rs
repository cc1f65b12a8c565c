//! Codec lifecycle over the system zlib.
//!
//! A [`Codec`] owns one `z_stream` and runs it through initialization,
//! bounded transform steps, in-place resets and finalization.

use crate::alloc::{self, AllocHooks, Bridge};
use libc::{c_char, c_int, c_void};
use libz_sys as zlib;
use oxizlib_core::{
    FlushMode, Mode, Result, Status, StreamOptions, Transform, UNKNOWN_ERROR_MESSAGE, ZlibError,
};
use std::ffi::CStr;
use std::fmt;
use std::mem;
use std::ptr::{self, NonNull};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Active,
    /// A reset failed; only `end` is still meaningful.
    Closed,
    Ended,
}

/// One compression or decompression session.
///
/// The `z_stream` is boxed because zlib keeps a pointer back to it in its
/// internal state, so its address must not change after initialization.
/// The bridge is held as a raw pointer for the same reason: zlib stores it as
/// its opaque value, and it is released only in `finalize`.
pub struct Codec {
    raw: Box<zlib::z_stream>,
    mode: Mode,
    bridge: Option<NonNull<Bridge>>,
    state: State,
    last_status: Option<Status>,
}

impl Codec {
    /// Initialize a codec using the default allocator.
    pub fn new(mode: Mode, options: &StreamOptions) -> Result<Self> {
        Self::init(mode, options, None)
    }

    /// Initialize a codec whose memory is obtained through `hooks`.
    ///
    /// The hooks are kept until the codec ends.
    pub fn with_hooks<H>(mode: Mode, options: &StreamOptions, hooks: H) -> Result<Self>
    where
        H: AllocHooks + 'static,
    {
        let hooks: Box<dyn AllocHooks> = Box::new(hooks);
        Self::init(mode, options, Some(hooks))
    }

    fn init(mode: Mode, options: &StreamOptions, hooks: Option<Box<dyn AllocHooks>>) -> Result<Self> {
        let window_bits = mode.effective_window_bits(options.window_bits);
        let bridged = hooks.is_some();
        debug!(
            mode = mode.name(),
            level = options.level,
            window_bits,
            mem_level = options.mem_level,
            strategy = options.strategy.as_i32(),
            bridged,
            "initializing codec"
        );

        let mut raw = Box::new(zlib::z_stream {
            next_in: ptr::null_mut(),
            avail_in: 0,
            total_in: 0,
            next_out: ptr::null_mut(),
            avail_out: 0,
            total_out: 0,
            msg: ptr::null_mut(),
            state: ptr::null_mut(),
            zalloc: alloc::default_alloc,
            zfree: alloc::default_free,
            opaque: ptr::null_mut(),
            data_type: 0,
            adler: 0,
            reserved: 0,
        });

        let bridge = hooks.map(|hooks| NonNull::from(Box::leak(Bridge::new(hooks))));
        if let Some(bridge) = bridge {
            raw.zalloc = alloc::bridge_alloc;
            raw.zfree = alloc::bridge_free;
            raw.opaque = bridge.as_ptr().cast::<c_void>();
        }

        let stream_size = mem::size_of::<zlib::z_stream>() as c_int;
        // SAFETY: `raw` is fully initialized with valid allocator callbacks,
        // and `bridge` (if any) stays at a fixed address until released.
        let ret = unsafe {
            if mode.is_compress() {
                zlib::deflateInit2_(
                    &mut *raw,
                    options.level,
                    zlib::Z_DEFLATED,
                    window_bits,
                    options.mem_level,
                    options.strategy.as_i32(),
                    zlib::zlibVersion(),
                    stream_size,
                )
            } else {
                zlib::inflateInit2_(&mut *raw, window_bits, zlib::zlibVersion(), stream_size)
            }
        };

        if ret != zlib::Z_OK {
            let message = message_of(raw.msg);
            debug!(mode = mode.name(), status = ret, %message, "codec rejected parameters");
            // zlib frees anything it allocated before failing.
            if let Some(bridge) = bridge {
                // SAFETY: zlib no longer refers to the bridge.
                unsafe { release_bridge(bridge) };
            }
            return Err(ZlibError::construction(ret, message));
        }

        Ok(Self {
            raw,
            mode,
            bridge,
            state: State::Active,
            last_status: None,
        })
    }

    /// Total bytes consumed since initialization or the last reset.
    pub fn total_in(&self) -> u64 {
        self.raw.total_in as u64
    }

    /// Total bytes produced since initialization or the last reset.
    pub fn total_out(&self) -> u64 {
        self.raw.total_out as u64
    }

    /// The codec's current diagnostic message, if any.
    pub fn message(&self) -> Option<String> {
        if self.raw.msg.is_null() {
            None
        } else {
            Some(message_of(self.raw.msg))
        }
    }

    /// Whether allocations are routed through caller hooks.
    pub fn is_bridged(&self) -> bool {
        self.bridge.is_some()
    }

    /// Whether a failed reset left the codec unusable.
    pub fn is_closed(&self) -> bool {
        self.state != State::Active
    }

    fn ensure_active(&self, operation: &str) -> Result<()> {
        match self.state {
            State::Active => Ok(()),
            _ => Err(ZlibError::stream_closed(format!(
                "{operation} on a {} stream left unusable by a failed reset",
                self.mode
            ))),
        }
    }

    /// Finalize once. Hooks are released whether or not zlib reports success.
    fn finalize(&mut self) -> Result<()> {
        if self.state == State::Ended {
            return Ok(());
        }
        self.state = State::Ended;

        // SAFETY: the stream was initialized and has not been ended.
        let ret = unsafe {
            if self.mode.is_compress() {
                zlib::deflateEnd(&mut *self.raw)
            } else {
                zlib::inflateEnd(&mut *self.raw)
            }
        };
        let result = if ret < zlib::Z_OK {
            Err(ZlibError::resource(ret, message_of(self.raw.msg)))
        } else {
            Ok(())
        };

        let bridge = self.bridge.take();
        let bridged = bridge.is_some();
        if let Some(bridge) = bridge {
            // SAFETY: the stream is ended, so zlib makes no further calls
            // through the opaque pointer.
            unsafe { release_bridge(bridge) };
        }
        debug!(mode = self.mode.name(), status = ret, bridged, "codec ended");
        result
    }
}

impl Transform for Codec {
    fn step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
    ) -> Result<(usize, usize)> {
        self.ensure_active("transform")?;

        let avail_in = input.len().min(zlib::uInt::MAX as usize);
        let avail_out = output.len().min(zlib::uInt::MAX as usize);
        let raw = &mut *self.raw;
        raw.next_in = input.as_ptr().cast_mut();
        raw.avail_in = avail_in as zlib::uInt;
        raw.next_out = output.as_mut_ptr();
        raw.avail_out = avail_out as zlib::uInt;

        // SAFETY: the cursors point into live slices for the duration of the
        // call and zlib only reads through `next_in`.
        let ret = unsafe {
            if self.mode.is_compress() {
                zlib::deflate(raw, flush.as_i32())
            } else {
                zlib::inflate(raw, flush.as_i32())
            }
        };

        let consumed = avail_in - raw.avail_in as usize;
        let written = avail_out - raw.avail_out as usize;
        raw.next_in = ptr::null_mut();
        raw.avail_in = 0;
        raw.next_out = ptr::null_mut();
        raw.avail_out = 0;

        trace!(
            mode = self.mode.name(),
            flush = flush.as_i32(),
            status = ret,
            consumed,
            written,
            "transform step"
        );

        match Status::from_code(ret) {
            Ok(status) => {
                self.last_status = Some(status);
                Ok((consumed, written))
            }
            Err(code) => Err(ZlibError::codec(code, message_of(raw.msg))),
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.ensure_active("reset")?;

        // SAFETY: the stream is initialized and active.
        let ret = unsafe {
            if self.mode.is_compress() {
                zlib::deflateReset(&mut *self.raw)
            } else {
                zlib::inflateReset(&mut *self.raw)
            }
        };

        if ret != zlib::Z_OK {
            self.state = State::Closed;
            debug!(mode = self.mode.name(), status = ret, "reset failed, stream closed");
            return Err(ZlibError::codec(ret, message_of(self.raw.msg)));
        }
        self.last_status = None;
        debug!(mode = self.mode.name(), "codec reset");
        Ok(())
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn last_status(&self) -> Option<Status> {
        self.last_status
    }

    fn end(mut self) -> Result<()> {
        self.finalize()
    }
}

impl Drop for Codec {
    fn drop(&mut self) {
        if self.state == State::Ended {
            return;
        }
        if let Err(err) = self.finalize() {
            warn!(mode = self.mode.name(), error = %err, "codec dropped without end");
        }
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("last_status", &self.last_status)
            .field("bridged", &self.bridge.is_some())
            .field("total_in", &self.total_in())
            .field("total_out", &self.total_out())
            .finish()
    }
}

/// # Safety
///
/// `bridge` must come from `Box::leak` in `Codec::init`, and zlib must hold
/// no further use of it.
unsafe fn release_bridge(bridge: NonNull<Bridge>) {
    // SAFETY: upheld by the caller.
    drop(unsafe { Box::from_raw(bridge.as_ptr()) });
}

fn message_of(msg: *const c_char) -> String {
    if msg.is_null() {
        return UNKNOWN_ERROR_MESSAGE.to_string();
    }
    // SAFETY: zlib only stores pointers to static NUL-terminated strings.
    unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned()
}
