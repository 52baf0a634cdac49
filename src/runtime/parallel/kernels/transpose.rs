//! Tiled matrix transpose

use crate::dtype::Element;
use crate::error::Result;
use crate::runtime::parallel::ParallelClient;
use crate::runtime::parallel::launch::{BlockCtx, Dim2, LaunchConfig};

/// Side of the square tile staged by each block
pub const TRANSPOSE_TILE_DIM: usize = 32;

/// Rows of work items per block; each item moves `TILE_DIM / BLOCK_ROWS` elements
pub const TRANSPOSE_BLOCK_ROWS: usize = 8;

/// Enqueue `dest = src^T`
///
/// `src` is `rows x cols` with row stride `src_stride0`; `dest` is
/// `cols x rows` with row stride `dest_stride0` (all in elements).
///
/// # Safety
/// Both addresses must cover their strided footprints until the stream has
/// drained, and the footprints must not overlap.
pub unsafe fn launch_transpose<T: Element>(
    client: &ParallelClient,
    rows: usize,
    cols: usize,
    src: u64,
    src_stride0: usize,
    dest: u64,
    dest_stride0: usize,
) -> Result<()> {
    const KERNEL: &str = "transpose";
    if rows == 0 || cols == 0 {
        return Ok(());
    }

    let tile = TRANSPOSE_TILE_DIM as u32;
    let mut config = LaunchConfig::tiled(KERNEL, rows, cols, Dim2::new(tile, tile))?;
    config.block = Dim2::new(tile, TRANSPOSE_BLOCK_ROWS as u32);

    client.launch(KERNEL, config, move |ctx| unsafe {
        transpose_tile::<T>(ctx, rows, cols, src, src_stride0, dest, dest_stride0);
    })
}

unsafe fn transpose_tile<T: Element>(
    ctx: BlockCtx,
    rows: usize,
    cols: usize,
    src: u64,
    src_stride0: usize,
    dest: u64,
    dest_stride0: usize,
) {
    const TILE: usize = TRANSPOSE_TILE_DIM;
    let src = src as *const T;
    let dest = dest as *mut T;

    // One padding column keeps column reads from striding on a power of two
    let mut tile = [[T::zero(); TILE + 1]; TILE];

    let tile_col = ctx.block_idx.x as usize * TILE;
    let tile_row = ctx.block_idx.y as usize * TILE;

    // Stage: consecutive work items read consecutive source columns
    for thread in ctx.threads() {
        let tx = thread.x as usize;
        let ty = thread.y as usize;
        let x = tile_col + tx;
        for k in (0..TILE).step_by(TRANSPOSE_BLOCK_ROWS) {
            let y = tile_row + ty + k;
            if x < cols && y < rows {
                tile[ty + k][tx] = unsafe { *src.add(y * src_stride0 + x) };
            }
        }
    }

    // Every work item of the block has staged its elements here

    // Write back: consecutive work items write consecutive destination columns
    for thread in ctx.threads() {
        let tx = thread.x as usize;
        let ty = thread.y as usize;
        let x = tile_row + tx;
        for k in (0..TILE).step_by(TRANSPOSE_BLOCK_ROWS) {
            let y = tile_col + ty + k;
            if x < rows && y < cols {
                unsafe { *dest.add(y * dest_stride0 + x) = tile[tx][ty + k] };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::RuntimeClient;
    use crate::runtime::parallel::ParallelDevice;

    #[test]
    fn test_transpose_across_tile_edges() {
        let client = ParallelClient::new(ParallelDevice::with_workers(70, 3));
        let (rows, cols) = (45usize, 37usize);
        let src: Vec<i64> = (0..(rows * cols) as i64).collect();
        let mut dest = vec![0i64; rows * cols];
        unsafe {
            launch_transpose::<i64>(
                &client,
                rows,
                cols,
                src.as_ptr() as u64,
                cols,
                dest.as_mut_ptr() as u64,
                rows,
            )
            .unwrap();
        }
        client.synchronize().unwrap();
        for i in 0..rows {
            for j in 0..cols {
                assert_eq!(dest[j * rows + i], src[i * cols + j]);
            }
        }
    }
}
