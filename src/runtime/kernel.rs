//! Indexable kernel inputs
//!
//! Scan kernels read their input through [`ScanInput`] rather than through a
//! bare pointer, so the same kernel code scans a plain sequence
//! ([`ValuePtr`]) or a table of element addresses ([`DerefPtr`]). The element
//! type the view yields is advertised at the type level through
//! [`ScanInput::Item`].
//!
//! ```text
//! ValuePtr<T>:  input[i] = *(base + i)
//! DerefPtr<T>:  input[i] = **(table + i)
//! ```
//!
//! Both views are plain addresses (`Copy + Send + Sync`), so they can be moved
//! into kernels that run on other threads.

use crate::dtype::Element;
use std::marker::PhantomData;

/// Random-access view consumed by scan kernels
pub trait ScanInput: Copy + Send + Sync + 'static {
    /// Element type produced by the view
    type Item: Element;

    /// Read element `i`
    ///
    /// # Safety
    /// `i` must address a valid, initialized element of the view.
    unsafe fn get(&self, i: usize) -> Self::Item;

    /// View starting `n` elements further on
    fn offset(self, n: usize) -> Self;
}

/// View over a contiguous sequence of `T` starting at a device address
pub struct ValuePtr<T> {
    addr: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Element> ValuePtr<T> {
    /// Wrap the device address of the first element
    #[inline]
    pub fn new(addr: u64) -> Self {
        Self {
            addr,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for ValuePtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ValuePtr<T> {}

impl<T: Element> ScanInput for ValuePtr<T> {
    type Item = T;

    #[inline]
    unsafe fn get(&self, i: usize) -> T {
        unsafe { *(self.addr as *const T).add(i) }
    }

    #[inline]
    fn offset(self, n: usize) -> Self {
        Self::new(self.addr + (n * std::mem::size_of::<T>()) as u64)
    }
}

/// View over a table of element addresses, yielding the pointed-to values
pub struct DerefPtr<T> {
    table: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Element> DerefPtr<T> {
    /// Wrap the device address of the first table entry
    #[inline]
    pub fn new(table: u64) -> Self {
        Self {
            table,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for DerefPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DerefPtr<T> {}

impl<T: Element> ScanInput for DerefPtr<T> {
    type Item = T;

    #[inline]
    unsafe fn get(&self, i: usize) -> T {
        unsafe {
            let addr = *(self.table as *const u64).add(i);
            *(addr as *const T)
        }
    }

    #[inline]
    fn offset(self, n: usize) -> Self {
        Self::new(self.table + (n * std::mem::size_of::<u64>()) as u64)
    }
}
