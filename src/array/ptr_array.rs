//! Tables of element addresses

use super::array1::Array1;
use super::region::Region;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::runtime::{Device, Runtime};
use std::marker::PhantomData;

/// Device array of addresses of `T` elements, input of the dereferencing scan
///
/// Entries can only be taken from live arrays; the table keeps their regions
/// alive for as long as it exists. The table region holds one spare trailing
/// entry so it can feed a scan that writes a trailing total.
pub struct PtrArray<R: Runtime, T: Element> {
    addrs: Array1<R, u64>,
    owners: Vec<Region<R>>,
    _marker: PhantomData<T>,
}

impl<R: Runtime, T: Element> PtrArray<R, T> {
    /// Build a table pointing at `array[index]` for every `(array, index)` entry
    pub fn from_elements(entries: &[(&Array1<R, T>, usize)], device: &R::Device) -> Result<Self> {
        let mut addrs = Vec::with_capacity(entries.len());
        let mut owners: Vec<Region<R>> = Vec::new();
        for &(array, index) in entries {
            if !array.device().is_same(device) {
                return Err(Error::DeviceMismatch {
                    op: "PtrArray::from_elements",
                });
            }
            addrs.push(array.element_addr(index)?);
            if !owners.iter().any(|r| r.same_region(array.region())) {
                owners.push(array.region().clone());
            }
        }

        let table = Array1::<R, u64>::with_capacity(addrs.len(), addrs.len() + 1, device)?;
        if !addrs.is_empty() {
            R::copy_to_device(bytemuck::cast_slice(&addrs), table.data_ptr(), device)?;
        }
        Ok(Self {
            addrs: table,
            owners,
            _marker: PhantomData,
        })
    }

    /// Number of entries
    #[inline]
    pub fn dim(&self) -> usize {
        self.addrs.dim()
    }

    /// The address table itself
    #[inline]
    pub fn addrs(&self) -> &Array1<R, u64> {
        &self.addrs
    }

    /// Device of the table
    #[inline]
    pub fn device(&self) -> &R::Device {
        self.addrs.device()
    }

    /// Regions kept alive by the table
    #[inline]
    pub fn num_owners(&self) -> usize {
        self.owners.len()
    }

    /// Read every pointed-to value back to the host
    pub fn to_values(&self) -> Result<Vec<T>> {
        let addrs = self.addrs.to_vec()?;
        let mut out = vec![T::zero(); addrs.len()];
        for (slot, addr) in out.iter_mut().zip(addrs) {
            R::copy_from_device(
                addr,
                bytemuck::cast_slice_mut(std::slice::from_mut(slot)),
                self.device(),
            )?;
        }
        Ok(out)
    }
}

impl<R: Runtime, T: Element> Clone for PtrArray<R, T> {
    fn clone(&self) -> Self {
        Self {
            addrs: self.addrs.clone(),
            owners: self.owners.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R: Runtime, T: Element> std::fmt::Debug for PtrArray<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PtrArray")
            .field("dtype", &T::DTYPE)
            .field("dim", &self.dim())
            .field("owners", &self.owners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    #[test]
    fn test_table_keeps_sources_alive() {
        let device = CpuDevice::new();
        let table = {
            let a = Array1::<CpuRuntime, i32>::from_slice(&[10, 20, 30], &device).unwrap();
            let b = Array1::<CpuRuntime, i32>::from_slice(&[7], &device).unwrap();
            PtrArray::from_elements(&[(&a, 2), (&b, 0), (&a, 0)], &device).unwrap()
        };
        assert_eq!(table.dim(), 3);
        assert_eq!(table.num_owners(), 2);
        assert_eq!(table.addrs().capacity(), 4);
        assert_eq!(table.to_values().unwrap(), vec![30, 7, 10]);
    }

    #[test]
    fn test_out_of_range_entry_rejected() {
        let device = CpuDevice::new();
        let a = Array1::<CpuRuntime, f64>::from_slice(&[1.0], &device).unwrap();
        assert!(matches!(
            PtrArray::from_elements(&[(&a, 1)], &device),
            Err(Error::IndexOutOfBounds { .. })
        ));
    }
}
