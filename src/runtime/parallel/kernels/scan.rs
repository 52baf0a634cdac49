//! Device-wide exclusive prefix sum
//!
//! Three launches over fixed-size tiles of the input:
//!
//! ```text
//! 1. scan_tile_reduce     one block per tile   partials[t] = sum of tile t
//! 2. scan_tile_prefix     one block            partials    = exclusive scan of partials
//! 3. scan_tile_downsweep  one block per tile   out[k]      = partials[t] + local prefix
//! ```
//!
//! Inputs that fit in one tile skip straight to a single sequential block.

use crate::dtype::Element;
use crate::error::Result;
use crate::runtime::cpu::kernels::exclusive_sum_kernel;
use crate::runtime::kernel::{ScanInput, ValuePtr};
use crate::runtime::parallel::ParallelClient;
use crate::runtime::parallel::launch::LaunchConfig;
use crate::runtime::{RuntimeClient, ScratchBuffer, num_blocks};

/// Items scanned by one block
pub const SCAN_TILE_ITEMS: usize = 2048;

/// Enqueue `out[k] = input[0] + ... + input[k - 1]` for every `k < num_items`
///
/// Only `input[0..num_items - 1]` is read. `out` may alias the input when
/// the input is a [`ValuePtr`] over the same elements.
///
/// # Safety
/// - `input` must be readable at `0..num_items - 1` until the stream drains
/// - `out` must be valid for `num_items` writes of `I::Item`
pub unsafe fn exclusive_sum<I: ScanInput>(
    client: &ParallelClient,
    input: I,
    num_items: usize,
    out: u64,
) -> Result<()> {
    if num_items == 0 {
        return Ok(());
    }

    let num_tiles = num_blocks(num_items, SCAN_TILE_ITEMS);
    if num_tiles == 1 {
        return client.launch(
            "scan_single_tile",
            LaunchConfig::linear("scan_single_tile", 1, 1)?,
            move |_| unsafe { exclusive_sum_kernel(input, num_items, out as *mut I::Item) },
        );
    }

    let num_inputs = num_items - 1;
    let scratch = ScratchBuffer::new(
        client.allocator(),
        num_tiles * std::mem::size_of::<I::Item>(),
    )?;
    let partials = scratch.ptr();
    log::trace!(
        "exclusive_sum: {} items in {} tiles, {} scratch bytes",
        num_items,
        num_tiles,
        scratch.size_in_bytes()
    );

    client.launch(
        "scan_tile_reduce",
        LaunchConfig::linear("scan_tile_reduce", num_tiles, 1)?,
        move |ctx| {
            let t = ctx.block_idx.x as usize;
            let begin = t * SCAN_TILE_ITEMS;
            let end = (begin + SCAN_TILE_ITEMS).min(num_inputs);
            let mut acc = <I::Item as Element>::zero();
            for k in begin..end {
                acc = acc + unsafe { input.get(k) };
            }
            unsafe { *(partials as *mut I::Item).add(t) = acc };
        },
    )?;

    client.launch(
        "scan_tile_prefix",
        LaunchConfig::linear("scan_tile_prefix", 1, 1)?,
        move |_| unsafe {
            exclusive_sum_kernel(
                ValuePtr::<I::Item>::new(partials),
                num_tiles,
                partials as *mut I::Item,
            );
        },
    )?;

    client.launch(
        "scan_tile_downsweep",
        LaunchConfig::linear("scan_tile_downsweep", num_tiles, 1)?,
        move |ctx| {
            let t = ctx.block_idx.x as usize;
            let begin = t * SCAN_TILE_ITEMS;
            let end = (begin + SCAN_TILE_ITEMS).min(num_items);
            let out = out as *mut I::Item;
            let mut acc = unsafe { *(partials as *const I::Item).add(t) };
            for k in begin..end {
                // Read before write so an in-place scan stays correct
                let next = if k < num_inputs {
                    Some(unsafe { input.get(k) })
                } else {
                    None
                };
                unsafe { *out.add(k) = acc };
                if let Some(v) = next {
                    acc = acc + v;
                }
            }
        },
    )?;

    // The scratch free is queued behind the downsweep
    drop(scratch);
    Ok(())
}
