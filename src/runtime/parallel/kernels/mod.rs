//! Bulk-parallel kernels
//!
//! Each `launch_*` function enqueues one or more launches on the client's
//! stream and returns without waiting. Buffers are passed as device
//! addresses; callers validate shapes, devices and capacities first, and
//! keep every referenced region alive until the stream has drained (regions
//! free through the stream, so dropping them early is also safe).

pub mod append;
pub mod fill;
pub mod scan;
pub mod segmented_reduce;
pub mod transpose;

pub use append::{
    APPEND_MAX_BLOCK_DIM, APPEND_MIN_BLOCK_DIM, APPEND_SKEW_FACTOR, APPEND_SKEW_SLACK,
    AppendStrategy, block_index_map, choose_append_strategy, launch_append,
};
pub use fill::{launch_range, launch_strided_copy};
pub use scan::{SCAN_TILE_ITEMS, exclusive_sum};
pub use segmented_reduce::{CombineOp, DeviceSegmentedReduce, MaxOp, REDUCE_LANES};
pub use transpose::{TRANSPOSE_BLOCK_ROWS, TRANSPOSE_TILE_DIM, launch_transpose};
