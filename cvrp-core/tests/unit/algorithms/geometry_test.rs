use super::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[test]
fn can_match_known_haversine_reference() {
    let distance = haversine_distance(50.0559, 5.4253, 58.3838, 3.0412);

    assert!((distance - 938.74).abs() < 0.01, "unexpected distance: {distance}");
}

#[test]
fn can_return_zero_for_coincident_points() {
    assert_eq!(haversine_distance(52.2297, 21.0122, 52.2297, 21.0122), 0.);
    assert_eq!(haversine_distance(0., 0., 0., 0.), 0.);
}

#[test]
fn can_stay_symmetric_and_non_negative() {
    let mut rng = SmallRng::seed_from_u64(42);

    for _ in 0..100 {
        let (lat_a, lon_a) = (rng.gen_range(-90.0..90.0), rng.gen_range(-180.0..180.0));
        let (lat_b, lon_b) = (rng.gen_range(-90.0..90.0), rng.gen_range(-180.0..180.0));

        let there = haversine_distance(lat_a, lon_a, lat_b, lon_b);
        let back = haversine_distance(lat_b, lon_b, lat_a, lon_a);

        assert!(there >= 0.);
        assert!((there - back).abs() < 1e-9);
    }
}

#[test]
fn can_propagate_non_finite_input() {
    assert!(haversine_distance(Float::NAN, 0., 0., 0.).is_nan());
}
