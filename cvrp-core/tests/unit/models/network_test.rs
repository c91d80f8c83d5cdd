use super::*;
use crate::helpers::models::*;

#[test]
fn can_clamp_place_fields_on_creation() {
    let place = Place::new("Far away", 120., -200., -5.).unwrap();

    assert_eq!(place.latitude(), 90.);
    assert_eq!(place.longitude(), -180.);
    assert_eq!(place.demand(), 0.);
}

#[test]
fn can_clamp_vehicle_capacity() {
    let mut vehicle = test_vehicle("Truck", 30.);
    vehicle.set_max_capacity(-10.);

    assert_eq!(vehicle.max_capacity(), 0.);
}

parameterized_test! {can_reject_empty_name, factory, {
    assert_eq!(factory(), Err(ValidationError::EmptyName));
}}

can_reject_empty_name! {
    case_01_place: (|| Place::new("", 0., 0., 0.).map(|_| ())),
    case_02_vehicle: (|| Vehicle::new("", 10.).map(|_| ())),
}

#[test]
fn can_force_depot_demand_to_zero() {
    let mut network = Network::new(test_place("Depot", 0., 0., 15.));
    assert_eq!(network.depot().demand(), 0.);

    network.set_depot(test_place("Other depot", 1., 1., 7.));
    assert_eq!(network.depot().demand(), 0.);
}

#[test]
fn can_keep_places_unique_by_name() {
    let mut network = Network::new(test_depot());

    network.add_client(test_place("Client 1", 1., 1., 10.));
    network.add_client(test_place("Client 1", 2., 2., 20.));
    network.add_client(test_place("Central depot", 3., 3., 30.));

    assert_eq!(network.clients().len(), 1);
    assert_eq!(network.clients()[0].demand(), 10.);
}

#[test]
fn can_keep_vehicles_unique_by_name() {
    let mut network = Network::new(test_depot());

    network.add_vehicle(test_vehicle("Vehicle 1", 30.));
    network.add_vehicle(test_vehicle("Vehicle 1", 60.));

    assert_eq!(network.vehicles().len(), 1);
    assert_eq!(network.vehicles()[0].max_capacity(), 30.);
}

#[test]
fn can_remove_entities_by_name() {
    let mut network = test_network(2, 2);

    network.remove_client("Client 1");
    network.remove_vehicle("Vehicle 2");
    network.remove_client("Unknown");

    assert_eq!(network.clients().len(), 1);
    assert_eq!(network.clients()[0].name(), "Client 2");
    assert_eq!(network.vehicles().len(), 1);
    assert_eq!(network.vehicles()[0].name(), "Vehicle 1");
}

#[test]
fn can_iterate_all_places_with_depot_first() {
    let network = test_network(3, 1);

    let names = network.all_places().map(Place::name).collect::<Vec<_>>();

    assert_eq!(names, vec!["Central depot", "Client 1", "Client 2", "Client 3"]);
}

fn overloaded_network(demands: &[f64], capacities: &[f64]) -> Network {
    let mut network = Network::new(test_depot());
    demands.iter().enumerate().for_each(|(i, &demand)| {
        network.add_client(test_place(&format!("Client {}", i + 1), 1., 1., demand));
    });
    capacities.iter().enumerate().for_each(|(k, &capacity)| {
        network.add_vehicle(test_vehicle(&format!("Vehicle {}", k + 1), capacity));
    });

    network
}

parameterized_test! {can_detect_feasibility_errors, (demands, capacities, expected), {
    let network = overloaded_network(&demands, &capacities);

    assert_eq!(network.check_solvability(), Err(expected));
    assert!(!network.is_solvable());
}}

can_detect_feasibility_errors! {
    case_01_no_clients: (vec![], vec![30.], FeasibilityError::NoClients),
    case_02_no_clients_takes_precedence: (vec![], vec![], FeasibilityError::NoClients),
    case_03_no_vehicles: (vec![10.], vec![], FeasibilityError::NoVehicles),
    case_04_sum_overload: (vec![20., 25.], vec![30.],
        FeasibilityError::SumCapacityOverload { total_demand: 45., total_capacity: 30. }),
    case_05_max_overload: (vec![40., 5.], vec![30., 30.],
        FeasibilityError::MaxCapacityOverload { max_demand: 40., max_capacity: 30. }),
}

#[test]
fn can_accept_solvable_network() {
    let network = test_network(8, 4);

    assert_eq!(network.check_solvability(), Ok(()));
    assert!(network.is_solvable());
}
