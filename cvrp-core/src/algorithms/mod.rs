//! A collection of foundational algorithms used by the domain models.

pub mod geometry;
