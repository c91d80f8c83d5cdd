//! Builders of small reference networks.

use crate::models::{Network, Place, Vehicle};
use milp::Float;

/// Creates a client place at the given coordinates.
pub fn test_place(name: &str, latitude: Float, longitude: Float, demand: Float) -> Place {
    Place::new(name, latitude, longitude, demand).expect("cannot create a test place")
}

/// Creates the reference depot.
pub fn test_depot() -> Place {
    test_place("Central depot", 52.2297, 21.0122, 0.)
}

/// Creates a vehicle with the given capacity.
pub fn test_vehicle(name: &str, max_capacity: Float) -> Vehicle {
    Vehicle::new(name, max_capacity).expect("cannot create a test vehicle")
}

/// Builds the reference network: clients spread around the depot with demands
/// alternating between 20 and 25, and a fleet with capacities alternating
/// between 30 and 35, scaled so that each vehicle can carry its equal share of
/// clients.
pub fn test_network(client_count: usize, vehicle_count: usize) -> Network {
    let mut network = Network::new(test_depot());

    for i in 0..client_count {
        let angle = i as Float / client_count as Float * std::f64::consts::TAU;
        network.add_client(test_place(
            &format!("Client {}", i + 1),
            52.2297 + angle.sin(),
            21.0122 + angle.cos(),
            20. + 5. * ((i % 2) as Float),
        ));
    }

    let share = if vehicle_count == 0 { 0 } else { client_count / vehicle_count };
    for k in 0..vehicle_count {
        network.add_vehicle(test_vehicle(
            &format!("Vehicle {}", k + 1),
            (30. + 5. * ((k % 2) as Float)) * share as Float,
        ));
    }

    network
}
