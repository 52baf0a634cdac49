//! Error types for ragarray

use thiserror::Error;

/// Result type alias using ragarray's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ragarray operations
///
/// Every variant is terminal for the call that produced it: operations check
/// their preconditions before issuing any work and never retry.
#[derive(Error, Debug)]
pub enum Error {
    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Device mismatch between operands or between an operand and the executing client
    #[error("Device mismatch: arrays must live on the client's device ({op})")]
    DeviceMismatch {
        /// The operation that detected the mismatch
        op: &'static str,
    },

    /// A view needs more bytes than its region provides from its byte offset
    #[error("Insufficient capacity for '{op}': need {needed} bytes, {available} available")]
    InsufficientCapacity {
        /// The operation (or constructor) that performed the check
        op: &'static str,
        /// Bytes required
        needed: usize,
        /// Bytes available in the region from the view's offset
        available: usize,
    },

    /// Index out of bounds
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Size of the dimension
        size: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// A write destination overlaps a read source
    #[error("Destination of '{op}' overlaps its source")]
    Aliasing {
        /// The operation that rejected the overlap
        op: &'static str,
    },

    /// Out of memory
    #[error("Out of memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },

    /// A kernel could not be launched (bad geometry, stream unavailable)
    #[error("Failed to launch kernel '{kernel}': {reason}")]
    LaunchFailed {
        /// Kernel name
        kernel: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// A launched kernel failed while executing on the device
    #[error("Kernel '{kernel}' failed on device: {reason}")]
    KernelFailed {
        /// Kernel name
        kernel: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Feature not yet implemented
    #[error("Not implemented: {feature}")]
    NotImplemented {
        /// Description of the unimplemented feature
        feature: &'static str,
    },
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create a launch failure error
    pub fn launch_failed(kernel: &'static str, reason: impl Into<String>) -> Self {
        Self::LaunchFailed {
            kernel,
            reason: reason.into(),
        }
    }
}
