//! Granule pool
//!
//! Fixed-granule bitmap allocator over a caller-provided region. Spin-lock
//! synchronized so allocation can be mixed between task and interrupt
//! context; hold times are a bitmap scan, never a blocking call.
//!
//! Every live allocation is tracked in a bounded table so a free can be
//! checked against what was actually handed out.

use super::AllocError;
use core::cell::UnsafeCell;
use core::ptr::NonNull;
use core::sync::atomic::{AtomicBool, Ordering};

/// Maximum granules a single pool manages; larger regions are clamped
pub const MAX_GRANULES: usize = 1024;

const BITMAP_WORDS: usize = MAX_GRANULES / 64;

/// Maximum live allocations per pool
pub const MAX_ALLOCATIONS: usize = 64;

/// Smallest supported granule size
pub const MIN_GRANULE: usize = 8;

/// Align a value up to the given alignment (power of two)
#[inline]
pub const fn align_up(val: usize, align: usize) -> usize {
    (val + align - 1) & !(align - 1)
}

/// A caller-provided backing region
#[derive(Debug, Clone, Copy)]
pub struct PoolRegion {
    base: NonNull<u8>,
    size: usize,
}

impl PoolRegion {
    /// Region backed by a static buffer
    pub fn from_slice(buf: &'static mut [u8]) -> Self {
        let size = buf.len();
        Self {
            base: NonNull::from(buf).cast(),
            size,
        }
    }

    /// Region from raw parts, e.g. a linker-placed section
    ///
    /// # Safety
    ///
    /// `base..base+size` must be valid, writable, unaliased memory that
    /// outlives the pool.
    pub unsafe fn from_raw(base: NonNull<u8>, size: usize) -> Self {
        Self { base, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

#[derive(Clone, Copy)]
struct AllocEntry {
    /// First granule of the allocation
    offset: u16,
    /// Granules spanned
    count: u16,
    in_use: bool,
}

impl AllocEntry {
    const fn empty() -> Self {
        Self {
            offset: 0,
            count: 0,
            in_use: false,
        }
    }
}

struct PoolState {
    /// One bit per granule; set = allocated
    bitmap: [u64; BITMAP_WORDS],
    entries: [AllocEntry; MAX_ALLOCATIONS],
    free_granules: usize,
}

/// Bitmap granule pool over a fixed region
pub struct GranulePool {
    base: NonNull<u8>,
    granule: usize,
    granules: usize,
    lock: AtomicBool,
    state: UnsafeCell<PoolState>,
}

// State is guarded by the spin lock; the base pointer is never mutated.
unsafe impl Sync for GranulePool {}
unsafe impl Send for GranulePool {}

impl GranulePool {
    /// Create a pool carving `region` into `granule`-sized units
    ///
    /// None when the granule is not a power of two, is below [`MIN_GRANULE`],
    /// or the region holds no complete granule.
    pub fn new(region: PoolRegion, granule: usize) -> Option<Self> {
        if granule < MIN_GRANULE || !granule.is_power_of_two() {
            return None;
        }
        let granules = (region.size / granule).min(MAX_GRANULES);
        if granules == 0 {
            return None;
        }
        Some(Self {
            base: region.base,
            granule,
            granules,
            lock: AtomicBool::new(false),
            state: UnsafeCell::new(PoolState {
                bitmap: [0; BITMAP_WORDS],
                entries: [AllocEntry::empty(); MAX_ALLOCATIONS],
                free_granules: granules,
            }),
        })
    }

    #[inline]
    fn acquire(&self) {
        while self
            .lock
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            core::hint::spin_loop();
        }
    }

    #[inline]
    fn release(&self) {
        self.lock.store(false, Ordering::Release);
    }

    fn granules_for(&self, size: usize) -> usize {
        align_up(size, self.granule) / self.granule
    }

    /// Allocate `size` bytes, zeroed. None on exhaustion or when no
    /// tracking slot is free.
    pub fn allocate(&self, size: usize) -> Option<NonNull<u8>> {
        if size == 0 {
            return None;
        }
        let count = self.granules_for(size);
        if count > self.granules {
            return None;
        }

        self.acquire();
        // Lock held; no other accessor until release
        let state = unsafe { &mut *self.state.get() };

        let Some(offset) = Self::find_run(&state.bitmap, self.granules, count) else {
            self.release();
            return None;
        };
        let Some(entry) = state.entries.iter_mut().find(|e| !e.in_use) else {
            self.release();
            return None;
        };

        *entry = AllocEntry {
            offset: offset as u16,
            count: count as u16,
            in_use: true,
        };
        Self::set_run(&mut state.bitmap, offset, count, true);
        state.free_granules -= count;
        self.release();

        let ptr = unsafe { self.base.as_ptr().add(offset * self.granule) };
        unsafe { core::ptr::write_bytes(ptr, 0, count * self.granule) };
        NonNull::new(ptr)
    }

    /// Release an allocation previously returned by [`allocate`](Self::allocate)
    ///
    /// The pointer and size must match the original request exactly.
    pub fn free(&self, ptr: NonNull<u8>, size: usize) -> Result<(), AllocError> {
        let byte_offset = (ptr.as_ptr() as usize).wrapping_sub(self.base.as_ptr() as usize);
        if byte_offset % self.granule != 0 || byte_offset / self.granule >= self.granules {
            debug_assert!(false, "free of pointer outside pool");
            return Err(AllocError::ForeignPointer);
        }
        let offset = byte_offset / self.granule;
        let count = self.granules_for(size);

        self.acquire();
        let state = unsafe { &mut *self.state.get() };

        let entry = state
            .entries
            .iter_mut()
            .find(|e| e.in_use && e.offset as usize == offset);
        let result = match entry {
            Some(entry) if entry.count as usize == count => {
                Self::set_run(&mut state.bitmap, offset, count, false);
                state.free_granules += count;
                entry.in_use = false;
                Ok(())
            }
            Some(_) => Err(AllocError::MismatchedFree),
            None => Err(AllocError::MismatchedFree),
        };
        self.release();

        debug_assert!(result.is_ok(), "mismatched free");
        result
    }

    /// Whether `ptr` points into this pool's region
    pub fn contains(&self, ptr: NonNull<u8>) -> bool {
        let addr = ptr.as_ptr() as usize;
        let base = self.base.as_ptr() as usize;
        addr >= base && addr < base + self.granules * self.granule
    }

    /// Advisory free bytes; a run of that size may not be contiguous
    pub fn available(&self) -> usize {
        self.acquire();
        let free = unsafe { &*self.state.get() }.free_granules;
        self.release();
        free * self.granule
    }

    pub fn granule(&self) -> usize {
        self.granule
    }

    pub fn capacity(&self) -> usize {
        self.granules * self.granule
    }

    fn bit(bitmap: &[u64; BITMAP_WORDS], idx: usize) -> bool {
        bitmap[idx / 64] & (1 << (idx % 64)) != 0
    }

    /// First-fit scan for a free run of `count` granules
    fn find_run(bitmap: &[u64; BITMAP_WORDS], granules: usize, count: usize) -> Option<usize> {
        let mut run = 0;
        for idx in 0..granules {
            if Self::bit(bitmap, idx) {
                run = 0;
            } else {
                run += 1;
                if run == count {
                    return Some(idx + 1 - count);
                }
            }
        }
        None
    }

    fn set_run(bitmap: &mut [u64; BITMAP_WORDS], offset: usize, count: usize, set: bool) {
        for idx in offset..offset + count {
            if set {
                bitmap[idx / 64] |= 1 << (idx % 64);
            } else {
                bitmap[idx / 64] &= !(1 << (idx % 64));
            }
        }
    }
}
