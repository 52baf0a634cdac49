//! Parallel client: kernel launches onto the device stream

use super::device::ParallelDevice;
use super::launch::{BlockCtx, Dim2, EVAL2_BLOCK, LaunchConfig};
use super::runtime::ParallelRuntime;
use super::stream::Stream;
use crate::error::Result;
use crate::runtime::{DefaultAllocator, Device, Runtime, RuntimeClient};
use rayon::prelude::*;

/// Parallel-specific allocator type alias
pub type ParallelAllocator = DefaultAllocator<ParallelDevice>;

/// Client for the bulk-parallel backend
///
/// Launches are validated on the calling thread and then enqueued on the
/// device stream; they complete asynchronously. Operations call
/// [`RuntimeClient::synchronize`] before returning.
#[derive(Clone, Debug)]
pub struct ParallelClient {
    device: ParallelDevice,
    allocator: ParallelAllocator,
}

impl ParallelClient {
    /// Create a client for `device`
    pub fn new(device: ParallelDevice) -> Self {
        let allocator = DefaultAllocator::new(
            device.clone(),
            ParallelRuntime::allocate,
            ParallelRuntime::deallocate,
        );
        Self { device, allocator }
    }

    /// Execution stream this client submits to
    pub fn stream(&self) -> &Stream {
        self.device.stream()
    }

    /// Enqueue `body` once per block of `config.grid`
    ///
    /// Fails immediately with `LaunchFailed` if the geometry is invalid or
    /// the stream cannot accept work. An empty grid launches nothing.
    pub fn launch<F>(&self, kernel: &'static str, config: LaunchConfig, body: F) -> Result<()>
    where
        F: Fn(BlockCtx) + Send + Sync + 'static,
    {
        config.validate(kernel)?;
        let total_blocks = config.grid.count();
        if total_blocks == 0 {
            return Ok(());
        }

        let pool = self.device.context().pool()?;
        let grid = config.grid;
        let block = config.block;
        log::trace!(
            "{}: launch '{}' grid={}x{} block={}x{}",
            self.device.name(),
            kernel,
            grid.x,
            grid.y,
            block.x,
            block.y
        );

        self.stream().enqueue(kernel, move || {
            pool.install(|| {
                (0..total_blocks).into_par_iter().for_each(|b| {
                    let gx = grid.x as usize;
                    body(BlockCtx {
                        block_idx: Dim2::new((b % gx) as u32, (b / gx) as u32),
                        block_dim: block,
                        grid_dim: grid,
                    });
                });
            });
        })
    }

    /// Run `f(i)` for every `i < n`
    pub fn eval<F>(&self, kernel: &'static str, n: usize, f: F) -> Result<()>
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        if n == 0 {
            return Ok(());
        }
        let config = LaunchConfig::elementwise(kernel, n)?;
        self.launch(kernel, config, move |ctx| {
            for thread in ctx.threads() {
                let i = ctx.global_x(thread);
                if i < n {
                    f(i);
                }
            }
        })
    }

    /// Run `f(i, j)` for every `i < m`, `j < n`
    pub fn eval2<F>(&self, kernel: &'static str, m: usize, n: usize, f: F) -> Result<()>
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        if m == 0 || n == 0 {
            return Ok(());
        }
        let config = LaunchConfig::tiled(kernel, m, n, EVAL2_BLOCK)?;
        self.launch(kernel, config, move |ctx| {
            for thread in ctx.threads() {
                let i = ctx.global_y(thread);
                let j = ctx.global_x(thread);
                if i < m && j < n {
                    f(i, j);
                }
            }
        })
    }
}

impl RuntimeClient<ParallelRuntime> for ParallelClient {
    fn device(&self) -> &ParallelDevice {
        &self.device
    }

    fn synchronize(&self) -> Result<()> {
        self.device.stream().synchronize()
    }

    fn allocator(&self) -> &ParallelAllocator {
        &self.allocator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn client(id: usize) -> ParallelClient {
        ParallelClient::new(ParallelDevice::with_workers(id, 4))
    }

    #[test]
    fn test_eval_visits_every_index_once() {
        let client = client(50);
        let hits: Arc<Vec<AtomicUsize>> = Arc::new((0..1000).map(|_| AtomicUsize::new(0)).collect());
        let h = Arc::clone(&hits);
        client
            .eval("count", 1000, move |i| {
                h[i].fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();
        client.synchronize().unwrap();
        assert!(hits.iter().all(|c| c.load(Ordering::Relaxed) == 1));
    }

    #[test]
    fn test_eval2_covers_ragged_edges() {
        let client = client(51);
        let total = Arc::new(AtomicUsize::new(0));
        let t = Arc::clone(&total);
        client
            .eval2("sum", 9, 70, move |i, j| {
                t.fetch_add(i * 100 + j, Ordering::Relaxed);
            })
            .unwrap();
        client.synchronize().unwrap();
        let expected: usize = (0..9).flat_map(|i| (0..70).map(move |j| i * 100 + j)).sum();
        assert_eq!(total.load(Ordering::Relaxed), expected);
    }

    #[test]
    fn test_invalid_launch_fails_immediately() {
        let client = client(52);
        let config = LaunchConfig {
            grid: Dim2::linear(1),
            block: Dim2::new(2048, 1),
        };
        let result = client.launch("too_big", config, |_| {});
        assert!(matches!(result, Err(Error::LaunchFailed { kernel: "too_big", .. })));
    }

    #[test]
    fn test_kernel_panic_surfaces_on_synchronize() {
        let client = client(53);
        client
            .eval("faulty", 4, |i| {
                if i == 2 {
                    panic!("bad index");
                }
            })
            .unwrap();
        assert!(matches!(
            client.synchronize(),
            Err(Error::KernelFailed { kernel: "faulty", .. })
        ));
        assert!(client.synchronize().is_ok());
    }
}
