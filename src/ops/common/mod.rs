//! Common utilities and validation logic shared across operation backends.

pub mod validate;

pub use validate::{
    ensure_compatible, ensure_disjoint, ensure_region_holds, scan_has_total,
    validate_append, validate_exclusive_sum, validate_exclusive_sum_2d,
    validate_exclusive_sum_deref, validate_max_per_sublist, validate_rand_bounds,
    validate_transpose,
};
