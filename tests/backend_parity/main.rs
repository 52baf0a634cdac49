//! Backend parity tests
//!
//! Every operation must produce identical results on the sequential CPU
//! backend and on the parallel backend.
#![cfg(feature = "parallel")]

#[path = "../common/mod.rs"]
mod common;

mod helpers;

mod append;
mod cumulative;
mod reduce;
mod transpose;
mod utility;
