//! Parallel device and its process-wide context registry

use super::stream::Stream;
use crate::error::{Error, Result};
use crate::runtime::Device;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Per-device state shared by every handle to the same device id
///
/// Created on first use of an id and kept for the life of the process. The
/// worker pool is built lazily by the first launch.
pub(crate) struct DeviceContext {
    id: usize,
    num_workers: usize,
    pool: OnceLock<Arc<rayon::ThreadPool>>,
    stream: Stream,
}

impl DeviceContext {
    fn new(id: usize, num_workers: usize) -> Self {
        Self {
            id,
            num_workers,
            pool: OnceLock::new(),
            stream: Stream::new(format!("ragarray-dev{id}-stream")),
        }
    }

    /// Worker pool of this device, built on first call
    pub(crate) fn pool(&self) -> Result<Arc<rayon::ThreadPool>> {
        if let Some(pool) = self.pool.get() {
            return Ok(Arc::clone(pool));
        }

        let id = self.id;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.num_workers)
            .thread_name(move |i| format!("ragarray-dev{id}-worker{i}"))
            .build()
            .map_err(|e| Error::Internal(format!("cannot build worker pool for device {id}: {e}")))?;

        log::debug!(
            "parallel device {}: worker pool started with {} workers",
            id,
            self.num_workers
        );
        Ok(Arc::clone(self.pool.get_or_init(|| Arc::new(pool))))
    }

    pub(crate) fn stream(&self) -> &Stream {
        &self.stream
    }
}

// Registry of device contexts, keyed by device id.
static DEVICE_REGISTRY: OnceLock<Mutex<HashMap<usize, Arc<DeviceContext>>>> = OnceLock::new();

fn get_or_create_context(id: usize, num_workers: usize) -> Arc<DeviceContext> {
    let registry = DEVICE_REGISTRY.get_or_init(|| Mutex::new(HashMap::new()));
    let mut contexts = registry.lock();
    let context = contexts.entry(id).or_insert_with(|| {
        log::debug!("parallel device {}: context created", id);
        Arc::new(DeviceContext::new(id, num_workers.max(1)))
    });
    Arc::clone(context)
}

fn default_num_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Bulk-parallel device
///
/// Handles with the same id share one worker pool and one execution stream.
/// The worker count is fixed by whichever handle first touches an id.
#[derive(Clone)]
pub struct ParallelDevice {
    id: usize,
    context: Arc<DeviceContext>,
}

impl ParallelDevice {
    /// Device `id` with one worker per available hardware thread
    pub fn new(id: usize) -> Self {
        Self::with_workers(id, default_num_workers())
    }

    /// Device `id` with an explicit worker count (minimum 1)
    pub fn with_workers(id: usize, num_workers: usize) -> Self {
        Self {
            id,
            context: get_or_create_context(id, num_workers),
        }
    }

    /// Number of workers executing this device's blocks
    pub fn num_workers(&self) -> usize {
        self.context.num_workers
    }

    /// Execution stream of this device
    pub fn stream(&self) -> &Stream {
        self.context.stream()
    }

    pub(crate) fn context(&self) -> &DeviceContext {
        &self.context
    }
}

impl Default for ParallelDevice {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Device for ParallelDevice {
    fn id(&self) -> usize {
        self.id
    }

    fn name(&self) -> String {
        format!("parallel:{}", self.id)
    }
}

impl std::fmt::Debug for ParallelDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelDevice")
            .field("id", &self.id)
            .field("num_workers", &self.num_workers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_id_shares_context() {
        let a = ParallelDevice::with_workers(41, 3);
        let b = ParallelDevice::with_workers(41, 7);
        assert!(a.is_same(&b));
        assert!(std::ptr::eq(a.context(), b.context()));
        assert_eq!(b.num_workers(), 3);
    }

    #[test]
    fn test_zero_workers_clamped() {
        let dev = ParallelDevice::with_workers(42, 0);
        assert_eq!(dev.num_workers(), 1);
        assert_eq!(dev.name(), "parallel:42");
    }
}
