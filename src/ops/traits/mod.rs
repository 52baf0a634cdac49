//! Operation traits implemented by every runtime client

mod append;
mod cumulative;
mod reduce;
mod transpose;
mod utility;

pub use append::AppendOps;
pub use cumulative::CumulativeOps;
pub use reduce::ReduceOps;
pub use transpose::TransposeOps;
pub use utility::UtilityOps;
