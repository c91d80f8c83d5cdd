//! A collection of domain models to represent a single-depot delivery network.

mod network;
pub use self::network::*;
