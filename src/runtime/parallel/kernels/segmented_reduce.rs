//! Segmented reduction over ragged rows
//!
//! Plan-then-execute: [`DeviceSegmentedReduce::plan`] reports the scratch
//! bytes the reduction needs, the caller allocates them, and
//! [`DeviceSegmentedReduce::execute`] enqueues two launches:
//!
//! ```text
//! segmented_reduce_lanes    one block per row, REDUCE_LANES work items
//!                           lane l folds elements l, l + LANES, ... of the row
//! segmented_reduce_combine  one work item per row folds its lane partials
//! ```
//!
//! Every fold starts from the caller's initial value, so empty rows produce
//! it unchanged.

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::runtime::ScratchBuffer;
use crate::runtime::parallel::launch::LaunchConfig;
use crate::runtime::parallel::{ParallelAllocator, ParallelClient};
use std::marker::PhantomData;

/// Work items cooperating on one row
pub const REDUCE_LANES: usize = 32;

/// Binary combiner of a segmented reduction
pub trait CombineOp<T>: Copy + Send + Sync + 'static {
    /// Fold `elem` into the running value `acc`
    fn combine(&self, acc: T, elem: T) -> T;
}

/// Maximum combiner: keeps `acc` unless `elem` compares strictly greater
#[derive(Copy, Clone, Debug, Default)]
pub struct MaxOp;

impl<T: Element> CombineOp<T> for MaxOp {
    #[inline]
    fn combine(&self, acc: T, elem: T) -> T {
        if elem > acc { elem } else { acc }
    }
}

/// Planned segmented reduction of `values` by `row_splits`
#[derive(Debug)]
pub struct DeviceSegmentedReduce<T, Op> {
    values: u64,
    row_splits: u64,
    num_segments: usize,
    out: u64,
    op: Op,
    init: T,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Element, Op: CombineOp<T>> DeviceSegmentedReduce<T, Op> {
    /// Describe a reduction of `num_segments` rows into `out`
    ///
    /// # Safety
    /// - `row_splits` must hold `num_segments + 1` non-decreasing `i32` offsets
    /// - `values` must be readable over every row range
    /// - `out` must be valid for `num_segments` writes
    ///
    /// All three must stay valid until the stream has drained after `execute`.
    pub unsafe fn new(
        values: u64,
        row_splits: u64,
        num_segments: usize,
        out: u64,
        op: Op,
        init: T,
    ) -> Self {
        Self {
            values,
            row_splits,
            num_segments,
            out,
            op,
            init,
            _marker: PhantomData,
        }
    }

    /// Scratch bytes required by [`execute`](Self::execute)
    pub fn plan(&self) -> usize {
        self.num_segments * REDUCE_LANES * std::mem::size_of::<T>()
    }

    /// Enqueue the reduction using `scratch` for lane partials
    pub fn execute(
        &self,
        client: &ParallelClient,
        scratch: &ScratchBuffer<ParallelAllocator>,
    ) -> Result<()> {
        let needed = self.plan();
        if scratch.size_in_bytes() < needed {
            return Err(Error::InsufficientCapacity {
                op: "segmented_reduce",
                needed,
                available: scratch.size_in_bytes(),
            });
        }
        if self.num_segments == 0 {
            return Ok(());
        }

        let Self {
            values,
            row_splits,
            num_segments,
            out,
            op,
            init,
            ..
        } = *self;
        let partials = scratch.ptr();

        client.launch(
            "segmented_reduce_lanes",
            LaunchConfig::linear("segmented_reduce_lanes", num_segments, REDUCE_LANES)?,
            move |ctx| {
                let seg = ctx.block_idx.x as usize;
                let splits = row_splits as *const i32;
                let (begin, end) =
                    unsafe { (*splits.add(seg) as usize, *splits.add(seg + 1) as usize) };
                let values = values as *const T;
                let partials = partials as *mut T;
                for thread in ctx.threads() {
                    let lane = thread.x as usize;
                    let mut acc = init;
                    let mut k = begin + lane;
                    while k < end {
                        acc = op.combine(acc, unsafe { *values.add(k) });
                        k += REDUCE_LANES;
                    }
                    unsafe { *partials.add(seg * REDUCE_LANES + lane) = acc };
                }
            },
        )?;

        client.eval("segmented_reduce_combine", num_segments, move |seg| {
            let partials = partials as *const T;
            let mut acc = init;
            for lane in 0..REDUCE_LANES {
                acc = op.combine(acc, unsafe { *partials.add(seg * REDUCE_LANES + lane) });
            }
            unsafe { *(out as *mut T).add(seg) = acc };
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::RuntimeClient;
    use crate::runtime::parallel::ParallelDevice;

    #[test]
    fn test_max_per_row_with_empty_rows() {
        let client = ParallelClient::new(ParallelDevice::with_workers(90, 2));
        let row_splits = [0i32, 3, 3, 70, 71];
        let mut values: Vec<f32> = (0..71).map(|i| ((i * 37) % 101) as f32 - 50.0).collect();
        values[40] = 500.0;
        let mut out = [0f32; 4];

        let reduce = unsafe {
            DeviceSegmentedReduce::new(
                values.as_ptr() as u64,
                row_splits.as_ptr() as u64,
                4,
                out.as_mut_ptr() as u64,
                MaxOp,
                -1.0f32,
            )
        };
        let scratch = ScratchBuffer::new(client.allocator(), reduce.plan()).unwrap();
        reduce.execute(&client, &scratch).unwrap();
        client.synchronize().unwrap();

        let expect = |r: std::ops::Range<usize>| {
            values[r].iter().fold(-1.0f32, |m, &v| if v > m { v } else { m })
        };
        assert_eq!(out[0], expect(0..3));
        assert_eq!(out[1], -1.0);
        assert_eq!(out[2], 500.0);
        assert_eq!(out[3], expect(70..71));
    }

    #[test]
    fn test_undersized_scratch_rejected() {
        let client = ParallelClient::new(ParallelDevice::with_workers(91, 1));
        let row_splits = [0i32, 1];
        let values = [1i64];
        let mut out = [0i64];
        let reduce = unsafe {
            DeviceSegmentedReduce::new(
                values.as_ptr() as u64,
                row_splits.as_ptr() as u64,
                1,
                out.as_mut_ptr() as u64,
                MaxOp,
                0,
            )
        };
        let scratch = ScratchBuffer::new(client.allocator(), 8).unwrap();
        assert!(matches!(
            reduce.execute(&client, &scratch),
            Err(Error::InsufficientCapacity { .. })
        ));
    }
}
