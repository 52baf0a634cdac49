//! Uniform random fill kernel
//!
//! Random generation always runs sequentially on a host staging buffer; the
//! parallel backend transfers the staged values afterwards.

use crate::dtype::Element;
use rand::Rng;

/// Largest raw draw of the generator (`2^31 - 1`)
pub const RAND_MAX: u32 = i32::MAX as u32;

/// Fill `out` with independent values drawn uniformly from `[min_value, max_value]`
///
/// Floating-point types, and integer ranges that are wider than [`RAND_MAX`]
/// or have an endpoint beyond it in magnitude, scale a raw draw
/// multiplicatively. Other integer ranges reduce the raw draw modulo the
/// range width.
///
/// Callers must ensure `min_value <= max_value`.
pub fn rand_uniform_kernel<T: Element, G: Rng + ?Sized>(
    rng: &mut G,
    out: &mut [T],
    min_value: T,
    max_value: T,
) {
    if max_value == min_value {
        out.fill(min_value);
        return;
    }

    let lo = min_value.to_f64();
    let hi = max_value.to_f64();
    let rand_max = RAND_MAX as f64;

    if T::DTYPE.is_float() || hi - lo > rand_max || lo.abs() > rand_max || hi.abs() > rand_max {
        for x in out.iter_mut() {
            let r = rng.random_range(0..=RAND_MAX) as f64;
            *x = T::from_f64((lo + r * (hi - lo) / rand_max).clamp(lo, hi));
        }
    } else {
        // Width is at most RAND_MAX + 1, so every residue is reachable
        let width = (hi - lo) as u64 + 1;
        for x in out.iter_mut() {
            let r = rng.random_range(0..=RAND_MAX) as u64;
            *x = T::from_f64(lo + (r % width) as f64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_integer_modulo_path_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut out = [0i32; 1000];
        rand_uniform_kernel(&mut rng, &mut out, -3, 4);
        assert!(out.iter().all(|&v| (-3..=4).contains(&v)));
        // every value of a width-8 range shows up in 1000 draws
        for v in -3..=4 {
            assert!(out.contains(&v));
        }
    }

    #[test]
    fn test_float_scaling_path_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut out = [0.0f64; 500];
        rand_uniform_kernel(&mut rng, &mut out, -1.5, 2.5);
        assert!(out.iter().all(|&v| (-1.5..=2.5).contains(&v)));
    }

    #[test]
    fn test_wide_integer_range_uses_scaling() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut out = [0i64; 200];
        let hi = 10 * RAND_MAX as i64;
        rand_uniform_kernel(&mut rng, &mut out, 0, hi);
        assert!(out.iter().all(|&v| (0..=hi).contains(&v)));
    }

    #[test]
    fn test_range_wider_than_raw_draw_reaches_both_ends() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut out = vec![0i32; 10_000];
        rand_uniform_kernel(&mut rng, &mut out, -2_000_000_000, 2_000_000_000);
        assert!(out.iter().any(|&v| v > 1_000_000_000));
        assert!(out.iter().any(|&v| v < -1_000_000_000));
    }

    #[test]
    fn test_degenerate_range_fills_min() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut out = [0u32; 8];
        rand_uniform_kernel(&mut rng, &mut out, 9, 9);
        assert_eq!(out, [9; 8]);
    }
}
