//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under `blockfall::{core,input,term,types}` and
//! adds the pieces the binary is assembled from: command-line [`config`],
//! file [`logging`] and the async [`driver`] loop.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod config;
pub mod driver;
pub mod logging;
