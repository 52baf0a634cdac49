//! Concatenation kernels and launch-strategy selection
//!
//! Two launch shapes copy `num_arrays` sources into one output:
//!
//! - **Rectangular**: one work item per `(array, position)` over a
//!   `num_arrays x max_dim` index space. Cheap to set up, but every array
//!   pays for the longest one.
//! - **Blocked**: sources are cut into `block_dim`-element blocks; a host-side
//!   index map lists every block as `(block_index << 32) | array_index`, and
//!   one work-group row copies one block.
//!
//! [`choose_append_strategy`] picks rectangular unless the longest source is
//! far beyond the average.

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::runtime::num_blocks;
use crate::runtime::parallel::ParallelClient;

/// Skew multiplier: blocked copy is used once `max_dim >= FACTOR * avg + SLACK`
pub const APPEND_SKEW_FACTOR: usize = 2;

/// Additive slack of the skew threshold
pub const APPEND_SKEW_SLACK: usize = 512;

/// Smallest block of the blocked strategy
pub const APPEND_MIN_BLOCK_DIM: usize = 256;

/// Largest block of the blocked strategy
pub const APPEND_MAX_BLOCK_DIM: usize = 8192;

/// Launch shape used by [`launch_append`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AppendStrategy {
    /// `num_arrays x max_dim` element grid
    Rectangular {
        /// Length of the longest source
        max_dim: usize,
    },
    /// Fixed-size blocks listed by an index map
    Blocked {
        /// Elements per block
        block_dim: usize,
    },
}

/// Choose the launch shape for sources of the given lengths
pub fn choose_append_strategy(lengths: &[usize]) -> AppendStrategy {
    let total: usize = lengths.iter().sum();
    let max_dim = lengths.iter().copied().max().unwrap_or(0);
    let avg = if lengths.is_empty() {
        0
    } else {
        total / lengths.len()
    };

    if max_dim < APPEND_SKEW_FACTOR * avg + APPEND_SKEW_SLACK {
        return AppendStrategy::Rectangular { max_dim };
    }

    let mut block_dim = APPEND_MIN_BLOCK_DIM;
    while block_dim * 4 < avg && block_dim < APPEND_MAX_BLOCK_DIM {
        block_dim *= 2;
    }
    AppendStrategy::Blocked { block_dim }
}

/// Build the block list of the blocked strategy
///
/// Entry order is array-major, block-minor. Fails when an array index or a
/// block index does not fit in 32 bits.
pub fn block_index_map(lengths: &[usize], block_dim: usize) -> Result<Vec<u64>> {
    if u32::try_from(lengths.len()).is_err() {
        return Err(Error::invalid_argument(
            "srcs",
            format!("{} arrays exceed the block index map", lengths.len()),
        ));
    }

    let mut map = Vec::with_capacity(
        lengths
            .iter()
            .map(|&len| num_blocks(len, block_dim))
            .sum(),
    );
    for (i, &len) in lengths.iter().enumerate() {
        let blocks = num_blocks(len, block_dim);
        if u32::try_from(blocks).is_err() {
            return Err(Error::invalid_argument(
                "srcs",
                format!("array {i} has {blocks} blocks of {block_dim}"),
            ));
        }
        for b in 0..blocks {
            map.push(((b as u64) << 32) | i as u64);
        }
    }
    Ok(map)
}

/// Enqueue the copy of every source into `out`
///
/// - `offsets`: `num_arrays + 1` output offsets (exclusive scan of lengths)
/// - `src_ptrs`: `num_arrays` source element addresses
/// - `index_map`: `(address, entries)` of the block list, blocked strategy only
///
/// # Safety
/// Every address must stay valid until the stream drains; sources must not
/// overlap `out`.
pub unsafe fn launch_append<T: Element>(
    client: &ParallelClient,
    num_arrays: usize,
    offsets: u64,
    src_ptrs: u64,
    out: u64,
    strategy: AppendStrategy,
    index_map: Option<(u64, usize)>,
) -> Result<()> {
    match strategy {
        AppendStrategy::Rectangular { max_dim } => {
            log::trace!("append: rectangular {} x {}", num_arrays, max_dim);
            client.eval2("append_rectangular", num_arrays, max_dim, move |i, j| unsafe {
                let offsets = offsets as *const u64;
                let begin = *offsets.add(i) as usize;
                let len = *offsets.add(i + 1) as usize - begin;
                if j < len {
                    let src = *(src_ptrs as *const u64).add(i) as *const T;
                    *(out as *mut T).add(begin + j) = *src.add(j);
                }
            })
        }
        AppendStrategy::Blocked { block_dim } => {
            let (map, num_entries) = index_map.ok_or_else(|| {
                Error::launch_failed("append_blocked", "blocked strategy without an index map")
            })?;
            log::trace!(
                "append: blocked, {} blocks of {} over {} arrays",
                num_entries,
                block_dim,
                num_arrays
            );
            client.eval2(
                "append_blocked",
                num_entries,
                block_dim,
                move |b, j| unsafe {
                    let key = *(map as *const u64).add(b);
                    let i = (key & 0xFFFF_FFFF) as usize;
                    let pos = (key >> 32) as usize * block_dim + j;
                    let offsets = offsets as *const u64;
                    let begin = *offsets.add(i) as usize;
                    let len = *offsets.add(i + 1) as usize - begin;
                    if pos < len {
                        let src = *(src_ptrs as *const u64).add(i) as *const T;
                        *(out as *mut T).add(begin + pos) = *src.add(pos);
                    }
                },
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_lengths_use_rectangular() {
        assert_eq!(
            choose_append_strategy(&[100, 120, 90]),
            AppendStrategy::Rectangular { max_dim: 120 }
        );
        assert_eq!(
            choose_append_strategy(&[]),
            AppendStrategy::Rectangular { max_dim: 0 }
        );
    }

    #[test]
    fn test_skewed_lengths_use_blocked() {
        // avg = 1008, threshold = 2528
        let lengths = [10_000, 10, 10, 10, 10, 10, 10, 10, 10, 1];
        assert_eq!(
            choose_append_strategy(&lengths),
            AppendStrategy::Blocked { block_dim: 256 }
        );
    }

    #[test]
    fn test_block_dim_grows_with_average() {
        // avg = 250_000: doubles up to the cap
        let lengths = [999_000, 1000, 0, 0];
        assert_eq!(
            choose_append_strategy(&lengths),
            AppendStrategy::Blocked { block_dim: 8192 }
        );
        // avg = 2500: 256 -> 512 -> 1024
        let lengths = [9_000, 1_000, 0, 0];
        assert_eq!(
            choose_append_strategy(&lengths),
            AppendStrategy::Blocked { block_dim: 1024 }
        );
    }

    #[test]
    fn test_block_index_map_layout() {
        let map = block_index_map(&[5, 0, 2], 2).unwrap();
        assert_eq!(map, vec![0, 1 << 32, 2 << 32, 2]);
    }
}
