//! Generic implementations of utility operations.

use crate::array::Array1;
use crate::dtype::Element;
use crate::error::Result;
use crate::ops::common::validate_rand_bounds;
use crate::runtime::cpu::kernels::rand_uniform_kernel;
use crate::runtime::{Runtime, RuntimeClient};
use rand::Rng;

/// Uniform draw staged on the host, then copied to the client's device
///
/// Generation is sequential on every backend, so the same seeded `rng`
/// yields the same values everywhere.
pub fn rand_uniform_impl<R, C, T, G>(
    client: &C,
    rng: &mut G,
    dim: usize,
    min_value: T,
    max_value: T,
) -> Result<Array1<R, T>>
where
    R: Runtime,
    C: RuntimeClient<R>,
    T: Element,
    G: Rng + ?Sized,
{
    validate_rand_bounds(min_value, max_value)?;
    let mut staging = vec![min_value; dim];
    rand_uniform_kernel(rng, &mut staging, min_value, max_value);
    Array1::from_slice(&staging, client.device())
}
