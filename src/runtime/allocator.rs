//! Memory allocator traits and default implementation
//!
//! Operations allocate their temporaries (staging buffers, reduction scratch,
//! pointer tables) through the client's allocator. [`ScratchBuffer`] ties such
//! an allocation to a scope so it is released on every exit path.

use crate::error::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Memory allocator trait for runtime backends
pub trait Allocator: Clone + Send + Sync {
    /// Allocate memory of given size
    ///
    /// Returns a device pointer (u64) that can be used for operations.
    fn allocate(&self, size_bytes: usize) -> Result<u64>;

    /// Deallocate memory
    fn deallocate(&self, ptr: u64, size_bytes: usize);

    /// Get the total bytes currently allocated through this allocator
    fn allocated_bytes(&self) -> usize {
        0 // Default: tracking not supported
    }
}

/// Default allocator that delegates to Runtime methods
///
/// Calls the runtime's allocate/deallocate and tracks the number of live
/// bytes. Clones share the counter.
#[derive(Clone, Debug)]
pub struct DefaultAllocator<D> {
    device: D,
    allocate_fn: fn(usize, &D) -> Result<u64>,
    deallocate_fn: fn(u64, usize, &D),
    live_bytes: Arc<AtomicUsize>,
}

impl<D: Clone + Send + Sync> DefaultAllocator<D> {
    /// Create a new default allocator
    pub fn new(
        device: D,
        allocate_fn: fn(usize, &D) -> Result<u64>,
        deallocate_fn: fn(u64, usize, &D),
    ) -> Self {
        Self {
            device,
            allocate_fn,
            deallocate_fn,
            live_bytes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the device this allocator is associated with
    pub fn device(&self) -> &D {
        &self.device
    }
}

impl<D: Clone + Send + Sync> Allocator for DefaultAllocator<D> {
    fn allocate(&self, size_bytes: usize) -> Result<u64> {
        let ptr = (self.allocate_fn)(size_bytes, &self.device)?;
        self.live_bytes.fetch_add(size_bytes, Ordering::Relaxed);
        Ok(ptr)
    }

    fn deallocate(&self, ptr: u64, size_bytes: usize) {
        (self.deallocate_fn)(ptr, size_bytes, &self.device);
        self.live_bytes.fetch_sub(size_bytes, Ordering::Relaxed);
    }

    fn allocated_bytes(&self) -> usize {
        self.live_bytes.load(Ordering::Relaxed)
    }
}

/// Scoped allocation released through its allocator on drop
///
/// A zero-byte scratch buffer holds a null pointer and never touches the
/// allocator.
pub struct ScratchBuffer<A: Allocator> {
    allocator: A,
    ptr: u64,
    size_bytes: usize,
}

impl<A: Allocator> ScratchBuffer<A> {
    /// Allocate `size_bytes` from `allocator`
    pub fn new(allocator: &A, size_bytes: usize) -> Result<Self> {
        let ptr = if size_bytes == 0 {
            0
        } else {
            allocator.allocate(size_bytes)?
        };
        Ok(Self {
            allocator: allocator.clone(),
            ptr,
            size_bytes,
        })
    }

    /// Device pointer of the allocation
    #[inline]
    pub fn ptr(&self) -> u64 {
        self.ptr
    }

    /// Size of the allocation in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.size_bytes
    }
}

impl<A: Allocator> Drop for ScratchBuffer<A> {
    fn drop(&mut self) {
        if self.ptr != 0 {
            self.allocator.deallocate(self.ptr, self.size_bytes);
        }
    }
}

impl<A: Allocator> std::fmt::Debug for ScratchBuffer<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchBuffer")
            .field("ptr", &format!("0x{:x}", self.ptr))
            .field("size_bytes", &self.size_bytes)
            .finish()
    }
}
