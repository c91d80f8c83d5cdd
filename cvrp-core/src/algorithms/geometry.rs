//! Geographic primitives.

#[cfg(test)]
#[path = "../../tests/unit/algorithms/geometry_test.rs"]
mod geometry_test;

use milp::Float;

/// An approximate mean Earth radius, in kilometers.
pub const EARTH_RADIUS_KM: Float = 6.371E+3;

/// Computes a great-circle distance between two (latitude, longitude) points
/// using the haversine formula, in kilometers.
///
/// The function is symmetric in its arguments and returns zero for coincident
/// points; non-finite input propagates through the floating point math
/// instead of being swallowed.
pub fn haversine_distance(lat_a: Float, lon_a: Float, lat_b: Float, lon_b: Float) -> Float {
    let phi_a = lat_a.to_radians();
    let phi_b = lat_b.to_radians();

    let half_delta_phi = (lat_b - lat_a).to_radians() * 0.5;
    let half_delta_lambda = (lon_b - lon_a).to_radians() * 0.5;

    let a = half_delta_phi.sin().powi(2) + phi_a.cos() * phi_b.cos() * half_delta_lambda.sin().powi(2);
    let c = 2. * a.sqrt().atan2((1. - a).sqrt());

    EARTH_RADIUS_KM * c
}
