//! Bayline core - configuration, errors, constants, and pure utilities
//! shared across the workspace.

pub mod config;
pub mod constants;
pub mod error;
pub mod util;
