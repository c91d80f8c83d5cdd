//! This crate exposes a minimal mixed-integer programming layer: an immutable
//! problem record, a solve contract with a small set of delegate backends, and
//! metadata describing how a solve run terminated.

#![warn(missing_docs)]

mod backend;
pub use self::backend::*;

mod problem;
pub use self::problem::*;

mod solution;
pub use self::solution::*;

/// Alias to a scalar floating type.
pub type Float = f64;
