//! Launch geometry for bulk-parallel kernels
//!
//! A launch is a 2-D grid of work-groups ("blocks"); each block is a 2-D
//! arrangement of work items. Blocks are independent and run concurrently on
//! the device's worker pool. The work items of one block run on the same
//! worker, in launch order, so a kernel body may stage data in block-local
//! memory and treat the end of a loop over [`BlockCtx::threads`] as a barrier.

use crate::error::{Error, Result};
use crate::runtime::num_blocks;

/// Upper bound on work items per block
pub const MAX_THREADS_PER_BLOCK: usize = 1024;

/// Work items per block for 1-D element-wise launches
pub const ELEMENTWISE_BLOCK_SIZE: usize = 256;

/// Block shape for 2-D element-wise launches (x = columns, y = rows)
pub const EVAL2_BLOCK: Dim2 = Dim2::new(32, 8);

/// Two-dimensional extent or index
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dim2 {
    /// Fastest-varying component
    pub x: u32,
    /// Slowest-varying component
    pub y: u32,
}

impl Dim2 {
    /// Create a 2-D extent
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// One-dimensional extent `(x, 1)`
    pub const fn linear(x: u32) -> Self {
        Self { x, y: 1 }
    }

    /// Number of points covered
    #[inline]
    pub const fn count(self) -> usize {
        self.x as usize * self.y as usize
    }
}

/// Grid and block shape of a launch
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Blocks in the grid
    pub grid: Dim2,
    /// Work items per block
    pub block: Dim2,
}

impl LaunchConfig {
    /// Launch of `num_blocks` one-dimensional blocks of `block_size` items
    pub fn linear(kernel: &'static str, num_blocks: usize, block_size: usize) -> Result<Self> {
        Ok(Self {
            grid: Dim2::linear(grid_extent(kernel, num_blocks)?),
            block: Dim2::linear(grid_extent(kernel, block_size)?),
        })
    }

    /// One work item per element of a length-`n` sequence
    pub fn elementwise(kernel: &'static str, n: usize) -> Result<Self> {
        Self::linear(
            kernel,
            num_blocks(n, ELEMENTWISE_BLOCK_SIZE),
            ELEMENTWISE_BLOCK_SIZE,
        )
    }

    /// Blocks of shape `block` tiling a `rows x cols` index space
    pub fn tiled(kernel: &'static str, rows: usize, cols: usize, block: Dim2) -> Result<Self> {
        if block.count() == 0 {
            return Err(Error::launch_failed(kernel, "empty block shape"));
        }
        Ok(Self {
            grid: Dim2::new(
                grid_extent(kernel, num_blocks(cols, block.x as usize))?,
                grid_extent(kernel, num_blocks(rows, block.y as usize))?,
            ),
            block,
        })
    }

    /// Check the block shape against device limits
    pub fn validate(&self, kernel: &'static str) -> Result<()> {
        let threads = self.block.count();
        if threads == 0 || threads > MAX_THREADS_PER_BLOCK {
            return Err(Error::launch_failed(
                kernel,
                format!(
                    "block of {}x{} work items (limit {})",
                    self.block.x, self.block.y, MAX_THREADS_PER_BLOCK
                ),
            ));
        }
        Ok(())
    }
}

fn grid_extent(kernel: &'static str, n: usize) -> Result<u32> {
    u32::try_from(n)
        .map_err(|_| Error::launch_failed(kernel, format!("extent {n} exceeds grid limits")))
}

/// Position of one block within its launch
#[derive(Copy, Clone, Debug)]
pub struct BlockCtx {
    /// Index of this block in the grid
    pub block_idx: Dim2,
    /// Work items per block
    pub block_dim: Dim2,
    /// Blocks in the grid
    pub grid_dim: Dim2,
}

impl BlockCtx {
    /// Work-item indices of this block, x fastest
    pub fn threads(&self) -> impl Iterator<Item = Dim2> + use<> {
        let dim = self.block_dim;
        (0..dim.y).flat_map(move |y| (0..dim.x).map(move |x| Dim2::new(x, y)))
    }

    /// Global x coordinate of work item `thread`
    #[inline]
    pub fn global_x(&self, thread: Dim2) -> usize {
        self.block_idx.x as usize * self.block_dim.x as usize + thread.x as usize
    }

    /// Global y coordinate of work item `thread`
    #[inline]
    pub fn global_y(&self, thread: Dim2) -> usize {
        self.block_idx.y as usize * self.block_dim.y as usize + thread.y as usize
    }
}
