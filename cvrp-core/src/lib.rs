//! Core crate with an exact formulation of the ***Capacitated Vehicle Routing
//! Problem***: domain entities with a feasibility pre-check, an integer
//! programming model builder and the reconstruction of ordered per-vehicle
//! routes from a solved edge selection.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod algorithms;
pub mod construction;
pub mod models;
pub mod prelude;
pub mod solver;
pub mod utils;
