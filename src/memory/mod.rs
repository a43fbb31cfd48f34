//! Typed Memory Allocation
//!
//! Allocation requests carry a [`MemoryTag`] naming the kind of memory they
//! need, and each tag is served by its own [`GranulePool`] over a dedicated
//! region. A request is satisfied from its tag's pool or not at all: a
//! DMA-safe request is never silently handed cached general RAM.

pub mod pool;

pub use pool::{GranulePool, PoolRegion};

use core::ptr::NonNull;

/// The kind of memory an allocation requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MemoryTag {
    /// Ordinary working memory
    General,
    /// Safe for peripheral DMA engines (placement and cache behavior)
    DmaSafe,
    /// Fastest available RAM, typically small and tightly coupled
    FastAccess,
}

impl MemoryTag {
    /// Granule size for this tag's pool
    ///
    /// DMA granules are cache-line sized so neighboring allocations never
    /// share a line; fast RAM is scarce, so its granule is the smallest.
    pub const fn granule(&self) -> usize {
        match self {
            MemoryTag::General => 16,
            MemoryTag::DmaSafe => 64,
            MemoryTag::FastAccess => 8,
        }
    }

    const fn index(&self) -> usize {
        *self as usize
    }
}

const TAG_COUNT: usize = 3;

/// Allocation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// No pool registered for the requested tag
    UnregisteredTag,
    /// A pool is already registered for the tag
    AlreadyRegistered,
    /// The region cannot back a pool (too small, bad granule)
    InvalidRegion,
    /// Freed pointer does not belong to the tag's pool
    ForeignPointer,
    /// Freed pointer or size does not match a live allocation
    MismatchedFree,
}

impl core::fmt::Display for AllocError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AllocError::UnregisteredTag => write!(f, "no pool for tag"),
            AllocError::AlreadyRegistered => write!(f, "pool already registered"),
            AllocError::InvalidRegion => write!(f, "invalid pool region"),
            AllocError::ForeignPointer => write!(f, "pointer outside pool"),
            AllocError::MismatchedFree => write!(f, "free does not match allocation"),
        }
    }
}

/// Tag-routed allocator over per-kind granule pools
///
/// Pools are registered once at startup from linker-placed regions; after
/// that, allocation and free are lock-per-pool and safe from any context.
pub struct TypedAllocator {
    pools: [Option<GranulePool>; TAG_COUNT],
}

impl TypedAllocator {
    pub const fn new() -> Self {
        Self {
            pools: [None, None, None],
        }
    }

    /// Register the backing region for a tag
    ///
    /// One region per tag; the granule size comes from the tag.
    pub fn register_pool(&mut self, tag: MemoryTag, region: PoolRegion) -> Result<(), AllocError> {
        let slot = &mut self.pools[tag.index()];
        if slot.is_some() {
            return Err(AllocError::AlreadyRegistered);
        }
        let pool = GranulePool::new(region, tag.granule()).ok_or(AllocError::InvalidRegion)?;
        crate::log_info!("Memory pool {:?}: {} bytes", tag, pool.capacity());
        *slot = Some(pool);
        Ok(())
    }

    /// Allocate `size` bytes of `tag` memory, zeroed
    ///
    /// None when the tag has no pool or its pool cannot satisfy the request.
    /// Exhaustion of one pool never spills into another.
    pub fn allocate(&self, size: usize, tag: MemoryTag) -> Option<NonNull<u8>> {
        self.pools[tag.index()].as_ref()?.allocate(size)
    }

    /// Free an allocation; `size` and `tag` must match the original request
    pub fn free(&self, ptr: NonNull<u8>, size: usize, tag: MemoryTag) -> Result<(), AllocError> {
        let pool = self.pools[tag.index()]
            .as_ref()
            .ok_or(AllocError::UnregisteredTag)?;
        if !pool.contains(ptr) {
            return Err(AllocError::ForeignPointer);
        }
        pool.free(ptr, size)
    }

    /// Advisory free bytes for a tag; 0 when no pool is registered
    pub fn available(&self, tag: MemoryTag) -> usize {
        self.pools[tag.index()]
            .as_ref()
            .map_or(0, GranulePool::available)
    }
}

impl Default for TypedAllocator {
    fn default() -> Self {
        Self::new()
    }
}
