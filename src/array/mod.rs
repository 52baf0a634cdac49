//! Array views over shared device regions
//!
//! ```text
//! Region ◄── Array1 (offset, dim)
//!        ◄── Array2 (offset, dim0, dim1, elem_stride0)
//!        ◄── Ragged = RaggedShape (i32 row splits) + Array1 values
//! ```
//!
//! Views are cheap to clone and share their region. Nothing here launches
//! work; operations live in [`crate::ops`].

mod array1;
mod array2;
mod ptr_array;
mod ragged;
mod region;

pub use array1::Array1;
pub use array2::Array2;
pub use ptr_array::PtrArray;
pub use ragged::{Ragged, RaggedShape};
pub use region::Region;

pub(crate) use array2::footprint_elems;
