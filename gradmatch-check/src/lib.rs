//! Checks hand-derived gradients of `c = sum(x * y + z)` against the
//! `gradmatch-core` autograd engine.

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod report;

pub use config::CheckConfig;
pub use error::CheckError;
pub use pipeline::{run, GradCheckRun, Verification};
