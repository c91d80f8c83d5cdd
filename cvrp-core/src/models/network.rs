#[cfg(test)]
#[path = "../../tests/unit/models/network_test.rs"]
mod network_test;

use crate::algorithms::geometry::haversine_distance;
use milp::Float;
use std::fmt;

/// An error raised when an entity field is mutated with structurally invalid
/// data. Raised at the point of mutation, so invalid data never reaches the
/// model builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// An entity name must not be empty.
    EmptyName,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyName => write!(f, "name can not be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A reason why a network cannot be solved as given.
///
/// These are expected, recoverable conditions: callers are supposed to catch
/// them and present the explanation, not to treat them as crashes.
#[derive(Clone, Debug, PartialEq)]
pub enum FeasibilityError {
    /// There are no clients to serve.
    NoClients,
    /// There are no vehicles to serve clients with.
    NoVehicles,
    /// Total demand of all clients exceeds total capacity of the fleet.
    SumCapacityOverload {
        /// Summed demand of all clients.
        total_demand: Float,
        /// Summed capacity of all vehicles.
        total_capacity: Float,
    },
    /// The single largest client demand exceeds every vehicle's capacity.
    MaxCapacityOverload {
        /// The largest single client demand.
        max_demand: Float,
        /// The largest single vehicle capacity.
        max_capacity: Float,
    },
}

impl fmt::Display for FeasibilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeasibilityError::NoClients => write!(f, "no clients are added to the network"),
            FeasibilityError::NoVehicles => write!(f, "no vehicles are added to the network"),
            FeasibilityError::SumCapacityOverload { total_demand, total_capacity } => write!(
                f,
                "total demand of all clients ({total_demand}) is greater than total capacity of all vehicles ({total_capacity})"
            ),
            FeasibilityError::MaxCapacityOverload { max_demand, max_capacity } => write!(
                f,
                "the largest client demand ({max_demand}) is greater than the largest vehicle capacity ({max_capacity})"
            ),
        }
    }
}

impl std::error::Error for FeasibilityError {}

/// A location on the map, possibly with a demand to be served.
#[derive(Clone, Debug, PartialEq)]
pub struct Place {
    name: String,
    latitude: Float,
    longitude: Float,
    demand: Float,
}

impl Place {
    /// Creates a new place. Out-of-range coordinates and a negative demand are
    /// clamped, an empty name is rejected.
    pub fn new(name: impl Into<String>, latitude: Float, longitude: Float, demand: Float) -> Result<Self, ValidationError> {
        let mut place = Self { name: String::new(), latitude: 0., longitude: 0., demand: 0. };
        place.set_name(name)?;
        place.set_latitude(latitude);
        place.set_longitude(longitude);
        place.set_demand(demand);

        Ok(place)
    }

    /// Returns a place name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns a latitude, in degrees.
    pub fn latitude(&self) -> Float {
        self.latitude
    }

    /// Returns a longitude, in degrees.
    pub fn longitude(&self) -> Float {
        self.longitude
    }

    /// Returns a demand of the place.
    pub fn demand(&self) -> Float {
        self.demand
    }

    /// Renames the place, rejecting an empty name.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        self.name = name;

        Ok(())
    }

    /// Sets a latitude clamped to the [-90, 90] degrees range.
    pub fn set_latitude(&mut self, value: Float) {
        self.latitude = value.clamp(-90., 90.);
    }

    /// Sets a longitude clamped to the [-180, 180] degrees range.
    pub fn set_longitude(&mut self, value: Float) {
        self.longitude = value.clamp(-180., 180.);
    }

    /// Sets a demand, a negative value clamps to zero.
    pub fn set_demand(&mut self, value: Float) {
        self.demand = value.max(0.);
    }

    /// Returns a geographic distance to another place, in kilometers.
    pub fn distance_to(&self, other: &Place) -> Float {
        haversine_distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// A vehicle of the fleet with a limited carrying capacity.
#[derive(Clone, Debug, PartialEq)]
pub struct Vehicle {
    name: String,
    max_capacity: Float,
}

impl Vehicle {
    /// Creates a new vehicle. A negative capacity is clamped, an empty name is
    /// rejected.
    pub fn new(name: impl Into<String>, max_capacity: Float) -> Result<Self, ValidationError> {
        let mut vehicle = Self { name: String::new(), max_capacity: 0. };
        vehicle.set_name(name)?;
        vehicle.set_max_capacity(max_capacity);

        Ok(vehicle)
    }

    /// Returns a vehicle name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns a maximum carrying capacity.
    pub fn max_capacity(&self) -> Float {
        self.max_capacity
    }

    /// Renames the vehicle, rejecting an empty name.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        self.name = name;

        Ok(())
    }

    /// Sets a maximum carrying capacity, a negative value clamps to zero.
    pub fn set_max_capacity(&mut self, value: Float) {
        self.max_capacity = value.max(0.);
    }
}

/// A single-depot delivery network: one depot, client places and a fleet of
/// vehicles. The depot is never a member of the client collection, clients and
/// vehicles are unique by name.
#[derive(Clone, Debug)]
pub struct Network {
    depot: Place,
    clients: Vec<Place>,
    vehicles: Vec<Vehicle>,
}

impl Network {
    /// Creates a network around the given depot. The depot never carries a
    /// demand of its own.
    pub fn new(depot: Place) -> Self {
        let mut network = Self { depot, clients: Default::default(), vehicles: Default::default() };
        network.depot.set_demand(0.);

        network
    }

    /// Returns the depot.
    pub fn depot(&self) -> &Place {
        &self.depot
    }

    /// Replaces the depot, forcing its demand to zero.
    pub fn set_depot(&mut self, depot: Place) {
        self.depot = depot;
        self.depot.set_demand(0.);
    }

    /// Returns all clients in insertion order.
    pub fn clients(&self) -> &[Place] {
        self.clients.as_slice()
    }

    /// Returns all vehicles in insertion order.
    pub fn vehicles(&self) -> &[Vehicle] {
        self.vehicles.as_slice()
    }

    /// Returns the depot followed by all clients.
    pub fn all_places(&self) -> impl Iterator<Item = &Place> {
        std::iter::once(&self.depot).chain(self.clients.iter())
    }

    /// Adds a client unless a place with the same name is already present,
    /// either as a client or as the depot.
    pub fn add_client(&mut self, client: Place) {
        let duplicate =
            client.name() == self.depot.name() || self.clients.iter().any(|other| other.name() == client.name());
        if !duplicate {
            self.clients.push(client);
        }
    }

    /// Removes a client with the given name, if present.
    pub fn remove_client(&mut self, name: &str) {
        self.clients.retain(|client| client.name() != name);
    }

    /// Adds a vehicle unless one with the same name is already present.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) {
        if !self.vehicles.iter().any(|other| other.name() == vehicle.name()) {
            self.vehicles.push(vehicle);
        }
    }

    /// Removes a vehicle with the given name, if present.
    pub fn remove_vehicle(&mut self, name: &str) {
        self.vehicles.retain(|vehicle| vehicle.name() != name);
    }

    /// Checks whether the network can be solved at all, reporting the first
    /// failed condition: clients present, vehicles present, enough total fleet
    /// capacity, enough single-vehicle capacity for the largest demand.
    pub fn check_solvability(&self) -> Result<(), FeasibilityError> {
        if self.clients.is_empty() {
            return Err(FeasibilityError::NoClients);
        }

        if self.vehicles.is_empty() {
            return Err(FeasibilityError::NoVehicles);
        }

        let total_demand = self.clients.iter().map(Place::demand).sum::<Float>();
        let total_capacity = self.vehicles.iter().map(Vehicle::max_capacity).sum::<Float>();
        if total_capacity < total_demand {
            return Err(FeasibilityError::SumCapacityOverload { total_demand, total_capacity });
        }

        let max_demand = self.clients.iter().map(Place::demand).fold(0., Float::max);
        let max_capacity = self.vehicles.iter().map(Vehicle::max_capacity).fold(0., Float::max);
        if max_capacity < max_demand {
            return Err(FeasibilityError::MaxCapacityOverload { max_demand, max_capacity });
        }

        Ok(())
    }

    /// Reports overall feasibility without distinguishing the cause.
    pub fn is_solvable(&self) -> bool {
        self.check_solvability().is_ok()
    }
}
