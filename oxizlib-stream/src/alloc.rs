//! Allocator bridge between the codec and caller-supplied hooks.
//!
//! The codec requests memory through a `zalloc(opaque, items, size)` /
//! `zfree(opaque, ptr)` pair. Its free callback receives no size, so every
//! block handed to the codec is prefixed with an [`AllocationHeader`] that
//! carries the block's identifier:
//!
//! ```text
//! +------------------+---------------------------------+
//! | AllocationHeader |  usable region (seen by codec)  |
//! |   id, padding    |                                 |
//! +------------------+---------------------------------+
//! ^ hook returns     ^ codec receives
//! ```
//!
//! On free the bridge steps back over the header, reads the identifier and
//! passes only that identifier to the free hook. The codec never learns
//! about the header.
//!
//! Hooks run synchronously inside codec calls and may be invoked several
//! times before any matching free. Both callbacks are `extern "C"`, so a
//! panicking hook aborts the process.

use libc::{c_uint, c_void};
use std::alloc::{self, Layout};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::mem;
use std::ptr;
use std::rc::Rc;
use tracing::trace;

/// Header placed in front of every block handed to the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C, align(16))]
pub struct AllocationHeader {
    /// Identifier passed back to the free hook.
    pub id: u32,
}

/// Bytes reserved in front of the usable region.
pub const HEADER_SIZE: usize = mem::size_of::<AllocationHeader>();

/// Alignment every block must have. The usable region keeps it too, since
/// `HEADER_SIZE` is a multiple of it.
pub const BLOCK_ALIGN: usize = mem::align_of::<AllocationHeader>();

/// Caller-supplied allocation hooks.
///
/// The implementor is the allocation context: it is held by the stream for
/// the stream's whole lifetime and dropped when the stream ends.
///
/// # Safety
///
/// `alloc` must return either null or a pointer to at least `size` writable
/// bytes aligned to [`BLOCK_ALIGN`], whose first [`HEADER_SIZE`] bytes hold an
/// initialized [`AllocationHeader`] with an identifier unique among live
/// blocks. The block must stay valid and untouched by the implementor until
/// `free` is called with that identifier.
pub unsafe trait AllocHooks {
    /// Allocate a block of `size` bytes, header included.
    fn alloc(&mut self, size: usize) -> *mut u8;

    /// Release the block carrying `id`.
    fn free(&mut self, id: u32);
}

/// Hooks built from a context value and two callables.
pub struct FnHooks<C, A, F> {
    ctx: C,
    on_alloc: A,
    on_free: F,
}

impl<C, A, F> FnHooks<C, A, F>
where
    A: FnMut(&mut C, usize) -> *mut u8,
    F: FnMut(&mut C, u32),
{
    /// Bundle a context with its allocate and free callables.
    ///
    /// # Safety
    ///
    /// `on_alloc` must uphold the contract of [`AllocHooks::alloc`], and
    /// `on_free` must release exactly the block carrying the given id.
    pub unsafe fn new(ctx: C, on_alloc: A, on_free: F) -> Self {
        Self {
            ctx,
            on_alloc,
            on_free,
        }
    }

    /// The context value.
    pub fn context(&self) -> &C {
        &self.ctx
    }
}

// SAFETY: the contract was accepted by the caller of `FnHooks::new`.
unsafe impl<C, A, F> AllocHooks for FnHooks<C, A, F>
where
    A: FnMut(&mut C, usize) -> *mut u8,
    F: FnMut(&mut C, u32),
{
    fn alloc(&mut self, size: usize) -> *mut u8 {
        (self.on_alloc)(&mut self.ctx, size)
    }

    fn free(&mut self, id: u32) {
        (self.on_free)(&mut self.ctx, id)
    }
}

impl<C: fmt::Debug, A, F> fmt::Debug for FnHooks<C, A, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHooks").field("ctx", &self.ctx).finish()
    }
}

/// Allocation counters kept by a [`BlockTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Blocks handed out.
    pub allocations: u64,
    /// Blocks released.
    pub frees: u64,
    /// Free requests naming an identifier that was not live.
    pub unknown_frees: u64,
    /// Blocks currently live.
    pub live_blocks: usize,
    /// Bytes currently live, headers included.
    pub live_bytes: usize,
    /// Highest value `live_bytes` reached.
    pub peak_bytes: usize,
}

/// One 16-byte, 16-aligned storage unit.
#[derive(Clone, Copy)]
#[repr(C, align(16))]
struct Unit([u8; BLOCK_ALIGN]);

#[derive(Default)]
struct TableInner {
    next_id: u32,
    blocks: HashMap<u32, (Box<[Unit]>, usize)>,
    stats: AllocStats,
}

/// Host-side allocator tracking blocks by identifier.
///
/// Blocks live in an id → block side table and carry their id in the
/// header area. Clones share the same table, so a caller can keep one clone
/// to inspect [`AllocStats`] after handing another to a stream.
#[derive(Clone, Default)]
pub struct BlockTable {
    inner: Rc<RefCell<TableInner>>,
}

impl BlockTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> AllocStats {
        self.inner.borrow().stats
    }

    /// Identifiers of the blocks currently live, in ascending order.
    pub fn live_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.inner.borrow().blocks.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl fmt::Debug for BlockTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockTable")
            .field("stats", &self.stats())
            .finish()
    }
}

// SAFETY: blocks are 16-aligned units owned by the table until freed, and the
// header is written before the pointer is returned. Ids skip zero and any id
// that is still live.
unsafe impl AllocHooks for BlockTable {
    fn alloc(&mut self, size: usize) -> *mut u8 {
        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;

        let units = size.max(HEADER_SIZE).div_ceil(BLOCK_ALIGN);
        let mut block = vec![Unit([0; BLOCK_ALIGN]); units].into_boxed_slice();

        let mut id = inner.next_id;
        loop {
            id = id.wrapping_add(1);
            if id != 0 && !inner.blocks.contains_key(&id) {
                break;
            }
        }
        inner.next_id = id;

        // SAFETY: the block is at least HEADER_SIZE bytes and 16-aligned.
        unsafe {
            block
                .as_mut_ptr()
                .cast::<AllocationHeader>()
                .write(AllocationHeader { id })
        };

        // Moving the box into the map does not move its heap storage.
        let (stored, _) = inner.blocks.entry(id).or_insert((block, size));
        let base = stored.as_mut_ptr().cast::<u8>();
        inner.stats.allocations += 1;
        inner.stats.live_blocks += 1;
        inner.stats.live_bytes += size;
        inner.stats.peak_bytes = inner.stats.peak_bytes.max(inner.stats.live_bytes);
        base
    }

    fn free(&mut self, id: u32) {
        let mut inner = self.inner.borrow_mut();
        match inner.blocks.remove(&id) {
            Some((_, size)) => {
                inner.stats.frees += 1;
                inner.stats.live_blocks -= 1;
                inner.stats.live_bytes -= size;
            }
            None => inner.stats.unknown_frees += 1,
        }
    }
}

/// Installed as the codec's opaque pointer when hooks are supplied.
pub(crate) struct Bridge {
    hooks: Box<dyn AllocHooks>,
}

impl Bridge {
    pub(crate) fn new(hooks: Box<dyn AllocHooks>) -> Box<Self> {
        Box::new(Self { hooks })
    }
}

/// Total block size for a codec request, header included.
fn block_size(items: c_uint, size: c_uint) -> Option<usize> {
    (items as usize)
        .checked_mul(size as usize)?
        .checked_add(HEADER_SIZE)
}

/// # Safety
///
/// `opaque` must point to a live `Bridge` that nothing else borrows.
pub(crate) unsafe extern "C" fn bridge_alloc(opaque: *mut c_void, items: c_uint, size: c_uint) -> *mut c_void {
    let Some(total) = block_size(items, size) else {
        return ptr::null_mut();
    };

    // SAFETY: `opaque` is the `Bridge` installed at init; it outlives every
    // codec call and no other reference to it exists during one.
    let bridge = unsafe { &mut *opaque.cast::<Bridge>() };
    let block = bridge.hooks.alloc(total);
    if block.is_null() {
        trace!(size = total, "allocation hook returned null");
        return ptr::null_mut();
    }

    if tracing::enabled!(tracing::Level::TRACE) {
        // SAFETY: the hook contract guarantees an initialized header.
        let id = unsafe { block.cast::<AllocationHeader>().read().id };
        trace!(id, size = total, "codec allocation");
    }

    // SAFETY: the block is at least HEADER_SIZE bytes long.
    unsafe { block.add(HEADER_SIZE).cast() }
}

/// # Safety
///
/// As for [`bridge_alloc`]; `address` must be null or a live block returned
/// by it through the same bridge.
pub(crate) unsafe extern "C" fn bridge_free(opaque: *mut c_void, address: *mut c_void) {
    if address.is_null() {
        return;
    }

    // SAFETY: `address` came from `bridge_alloc`, so a header precedes it.
    let id = unsafe {
        address
            .cast::<u8>()
            .sub(HEADER_SIZE)
            .cast::<AllocationHeader>()
            .read()
            .id
    };
    trace!(id, "codec free");

    // SAFETY: see `bridge_alloc`.
    let bridge = unsafe { &mut *opaque.cast::<Bridge>() };
    bridge.hooks.free(id);
}

// Default allocator used when no hooks are supplied. The header slot stores
// the block size instead of an id so the block can be deallocated.

/// # Safety
///
/// Always sound to call; it is `unsafe` to match the codec's callback type.
pub(crate) unsafe extern "C" fn default_alloc(_opaque: *mut c_void, items: c_uint, size: c_uint) -> *mut c_void {
    let Some(total) = block_size(items, size) else {
        return ptr::null_mut();
    };
    let Ok(layout) = Layout::from_size_align(total, BLOCK_ALIGN) else {
        return ptr::null_mut();
    };

    // SAFETY: the layout has a non-zero size.
    unsafe {
        let base = alloc::alloc(layout);
        if base.is_null() {
            return ptr::null_mut();
        }
        base.cast::<usize>().write(total);
        base.add(HEADER_SIZE).cast()
    }
}

/// # Safety
///
/// `address` must be null or a live block returned by [`default_alloc`].
pub(crate) unsafe extern "C" fn default_free(_opaque: *mut c_void, address: *mut c_void) {
    if address.is_null() {
        return;
    }

    // SAFETY: `address` came from `default_alloc`, which recorded the block
    // size in front of it using a layout it accepted.
    unsafe {
        let base = address.cast::<u8>().sub(HEADER_SIZE);
        let total = base.cast::<usize>().read();
        alloc::dealloc(base, Layout::from_size_align_unchecked(total, BLOCK_ALIGN));
    }
}
