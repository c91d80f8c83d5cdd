//! Translates a delivery network into an integer programming formulation.

mod model;
pub use self::model::*;
