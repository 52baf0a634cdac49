//! Ragged arrays: variable-length rows over a flat values array

use super::array1::Array1;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::runtime::{Device, Runtime};

/// Row partition of a flat index space
///
/// Holds `num_rows + 1` row splits: `row_splits[0] == 0`, non-decreasing,
/// and row `i` is the half-open range `[row_splits[i], row_splits[i + 1])`.
pub struct RaggedShape<R: Runtime> {
    row_splits: Array1<R, i32>,
    num_elements: usize,
}

impl<R: Runtime> RaggedShape<R> {
    /// Validate and adopt a row-splits array
    ///
    /// The splits are read back to the host once for validation.
    pub fn new(row_splits: Array1<R, i32>) -> Result<Self> {
        let splits = row_splits.to_vec()?;
        let num_elements = validate_row_splits(&splits)?;
        Ok(Self {
            row_splits,
            num_elements,
        })
    }

    /// Build a shape from host row splits
    pub fn from_row_splits(row_splits: &[i32], device: &R::Device) -> Result<Self> {
        let num_elements = validate_row_splits(row_splits)?;
        Ok(Self {
            row_splits: Array1::from_slice(row_splits, device)?,
            num_elements,
        })
    }

    /// Build a shape from row lengths
    pub fn from_lengths(lengths: &[usize], device: &R::Device) -> Result<Self> {
        let mut splits = Vec::with_capacity(lengths.len() + 1);
        let mut total = 0usize;
        splits.push(0i32);
        for &len in lengths {
            total += len;
            let split = i32::try_from(total).map_err(|_| {
                Error::invalid_argument("lengths", format!("{total} elements overflow i32 row splits"))
            })?;
            splits.push(split);
        }
        Ok(Self {
            row_splits: Array1::from_slice(&splits, device)?,
            num_elements: total,
        })
    }

    /// Number of rows
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.row_splits.dim() - 1
    }

    /// Total elements over all rows
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    /// Number of logical axes (rows, then elements)
    #[inline]
    pub fn num_axes(&self) -> usize {
        2
    }

    /// Row splits, `num_rows + 1` entries
    #[inline]
    pub fn row_splits(&self) -> &Array1<R, i32> {
        &self.row_splits
    }

    /// Device of the row splits
    #[inline]
    pub fn device(&self) -> &R::Device {
        self.row_splits.device()
    }
}

fn validate_row_splits(splits: &[i32]) -> Result<usize> {
    match splits.first() {
        None => {
            return Err(Error::invalid_argument(
                "row_splits",
                "row splits need at least one entry",
            ));
        }
        Some(&first) if first != 0 => {
            return Err(Error::invalid_argument(
                "row_splits",
                format!("first row split is {first}, expected 0"),
            ));
        }
        Some(_) => {}
    }
    if let Some(i) = splits.windows(2).position(|w| w[1] < w[0]) {
        return Err(Error::invalid_argument(
            "row_splits",
            format!("row splits decrease at row {i}"),
        ));
    }
    Ok(splits[splits.len() - 1] as usize)
}

impl<R: Runtime> Clone for RaggedShape<R> {
    fn clone(&self) -> Self {
        Self {
            row_splits: self.row_splits.clone(),
            num_elements: self.num_elements,
        }
    }
}

impl<R: Runtime> std::fmt::Debug for RaggedShape<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaggedShape")
            .field("num_rows", &self.num_rows())
            .field("num_elements", &self.num_elements)
            .finish()
    }
}

/// Ragged array: a [`RaggedShape`] over a flat values array
pub struct Ragged<R: Runtime, T: Element> {
    shape: RaggedShape<R>,
    values: Array1<R, T>,
}

impl<R: Runtime, T: Element> Ragged<R, T> {
    /// Compose a shape with its values
    ///
    /// `values.dim()` must equal the shape's element count and both must live
    /// on the same device.
    pub fn new(shape: RaggedShape<R>, values: Array1<R, T>) -> Result<Self> {
        if !shape.device().is_same(values.device()) {
            return Err(Error::DeviceMismatch { op: "Ragged::new" });
        }
        if values.dim() != shape.num_elements() {
            return Err(Error::shape_mismatch(
                &[shape.num_elements()],
                &[values.dim()],
            ));
        }
        Ok(Self { shape, values })
    }

    /// Build a ragged array from host rows
    pub fn from_rows<V: AsRef<[T]>>(rows: &[V], device: &R::Device) -> Result<Self> {
        let lengths: Vec<usize> = rows.iter().map(|r| r.as_ref().len()).collect();
        let shape = RaggedShape::from_lengths(&lengths, device)?;
        let flat: Vec<T> = rows
            .iter()
            .flat_map(|r| r.as_ref().iter().copied())
            .collect();
        let values = Array1::from_slice(&flat, device)?;
        Ok(Self { shape, values })
    }

    /// Row partition
    #[inline]
    pub fn shape(&self) -> &RaggedShape<R> {
        &self.shape
    }

    /// Flat values
    #[inline]
    pub fn values(&self) -> &Array1<R, T> {
        &self.values
    }

    /// Number of rows
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.shape.num_rows()
    }

    /// Number of logical axes
    #[inline]
    pub fn num_axes(&self) -> usize {
        self.shape.num_axes()
    }

    /// Device of the array
    #[inline]
    pub fn device(&self) -> &R::Device {
        self.values.device()
    }

    /// Copy every row to the host
    pub fn to_rows(&self) -> Result<Vec<Vec<T>>> {
        let splits = self.shape.row_splits().to_vec()?;
        let values = self.values.to_vec()?;
        Ok(splits
            .windows(2)
            .map(|w| values[w[0] as usize..w[1] as usize].to_vec())
            .collect())
    }
}

impl<R: Runtime, T: Element> Clone for Ragged<R, T> {
    fn clone(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            values: self.values.clone(),
        }
    }
}

impl<R: Runtime, T: Element> std::fmt::Debug for Ragged<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ragged")
            .field("dtype", &T::DTYPE)
            .field("shape", &self.shape)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    #[test]
    fn test_from_rows() {
        let device = CpuDevice::new();
        let rows: Vec<Vec<i64>> = vec![vec![1, 2], vec![], vec![3]];
        let r = Ragged::<CpuRuntime, i64>::from_rows(&rows, &device).unwrap();
        assert_eq!(r.num_rows(), 3);
        assert_eq!(r.num_axes(), 2);
        assert_eq!(r.shape().row_splits().to_vec().unwrap(), vec![0, 2, 2, 3]);
        assert_eq!(r.to_rows().unwrap(), rows);
    }

    #[test]
    fn test_invalid_row_splits() {
        let device = CpuDevice::new();
        assert!(RaggedShape::<CpuRuntime>::from_row_splits(&[], &device).is_err());
        assert!(RaggedShape::<CpuRuntime>::from_row_splits(&[1, 2], &device).is_err());
        assert!(RaggedShape::<CpuRuntime>::from_row_splits(&[0, 3, 2], &device).is_err());
        let empty = RaggedShape::<CpuRuntime>::from_row_splits(&[0], &device).unwrap();
        assert_eq!(empty.num_rows(), 0);
    }

    #[test]
    fn test_values_must_match_shape() {
        let device = CpuDevice::new();
        let shape = RaggedShape::<CpuRuntime>::from_row_splits(&[0, 2, 5], &device).unwrap();
        let values = Array1::<CpuRuntime, f32>::new(4, &device).unwrap();
        assert!(matches!(
            Ragged::new(shape, values),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
