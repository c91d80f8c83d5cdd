#[cfg(test)]
#[path = "../../tests/unit/solver/extraction_test.rs"]
mod extraction_test;

use crate::construction::CvrpModel;
use milp::{Float, VariableValues};
use rustc_hash::FxHashMap;
use std::fmt;

/// A solved variable value above this threshold counts as a selected edge.
///
/// Backends report binary variables as floats with possible rounding residue
/// on both sides of the exact 0 and 1, so selection uses the midpoint instead
/// of an exact comparison.
pub const SELECTED_THRESHOLD: Float = 0.5;

/// An internal consistency failure of a solved assignment: the selected edges
/// do not decompose into exactly one depot-anchored cycle per vehicle.
///
/// This signals a formulation or backend bug (e.g. a non-integral relaxation
/// leaking through), not a valid problem state, so it must fail loudly rather
/// than be guessed around.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    /// No selected edge continues the route at the given place.
    NoContinuation {
        /// A vehicle identifier.
        vehicle: String,
        /// An identifier of the place the route stopped at.
        place: String,
    },
    /// More than one selected edge continues the route at the given place.
    AmbiguousContinuation {
        /// A vehicle identifier.
        vehicle: String,
        /// An identifier of the place with multiple continuations.
        place: String,
    },
    /// Selected edges remain after the route has closed at the depot.
    UnusedEdges {
        /// A vehicle identifier.
        vehicle: String,
    },
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionError::NoContinuation { vehicle, place } => {
                write!(f, "route of vehicle '{vehicle}' has no continuation at '{place}'")
            }
            ExtractionError::AmbiguousContinuation { vehicle, place } => {
                write!(f, "route of vehicle '{vehicle}' has multiple continuations at '{place}'")
            }
            ExtractionError::UnusedEdges { vehicle } => {
                write!(f, "route of vehicle '{vehicle}' left selected edges outside the depot cycle")
            }
        }
    }
}

impl std::error::Error for ExtractionError {}

/// Ordered routes per vehicle: an identifier mapped to (from, to) identifier
/// pairs which start and end at the depot.
pub type VehicleRoutes = FxHashMap<String, Vec<(String, String)>>;

/// Reassembles the unordered edge selection of a solved assignment into
/// ordered per-vehicle routes.
///
/// For each vehicle the walk starts at the depot and repeatedly follows the
/// single selected edge leaving the current place until the route closes at
/// the depot again. The walk is deterministic for a fixed assignment, so
/// extraction is idempotent.
pub fn extract_routes(model: &CvrpModel, values: &VariableValues) -> Result<VehicleRoutes, ExtractionError> {
    let mut routes = VehicleRoutes::default();

    for (vehicle, mut edges) in selected_edges(model, values) {
        let vehicle_id = model.vehicle_ids()[vehicle].clone();
        let mut ordered = Vec::with_capacity(edges.len());
        // the depot is always place index 0
        let mut current = 0;

        loop {
            let mut continuations = edges.iter().enumerate().filter(|&(_, &(from, _))| from == current);
            let found = continuations.next().map(|(position, &edge)| (position, edge));
            if continuations.next().is_some() {
                return Err(ExtractionError::AmbiguousContinuation {
                    vehicle: vehicle_id,
                    place: model.place_ids()[current].clone(),
                });
            }

            let Some((position, (_, to))) = found else {
                return Err(ExtractionError::NoContinuation {
                    vehicle: vehicle_id,
                    place: model.place_ids()[current].clone(),
                });
            };

            edges.swap_remove(position);
            ordered.push((model.place_ids()[current].clone(), model.place_ids()[to].clone()));
            current = to;

            if current == 0 {
                break;
            }
        }

        if !edges.is_empty() {
            return Err(ExtractionError::UnusedEdges { vehicle: vehicle_id });
        }

        routes.insert(vehicle_id, ordered);
    }

    Ok(routes)
}

/// Finds client-only cycles of the assignment: vertex sets of closed walks
/// which never touch the depot. A valid final solution has none; the lazy cut
/// loop turns every found set into a new constraint.
pub fn detect_subtours(model: &CvrpModel, values: &VariableValues) -> Vec<Vec<usize>> {
    let mut subtours: Vec<Vec<usize>> = Vec::default();

    for (_, edges) in selected_edges(model, values) {
        let mut successors = edges.iter().copied().collect::<FxHashMap<_, _>>();

        // peel closed walks one by one, smallest origin first to stay
        // deterministic
        while let Some(start) = successors.keys().copied().min() {
            let mut cycle = Vec::default();
            let mut touches_depot = false;
            let mut current = start;

            loop {
                cycle.push(current);
                touches_depot |= current == 0;

                match successors.remove(&current) {
                    Some(next) if next == start => break,
                    Some(next) => current = next,
                    // a broken chain is reported by extraction, not here
                    None => break,
                }
            }

            if !touches_depot {
                cycle.sort_unstable();
                subtours.push(cycle);
            }
        }
    }

    subtours.sort();
    subtours.dedup();

    subtours
}

/// Groups selected edges of the assignment by vehicle index.
fn selected_edges(model: &CvrpModel, values: &VariableValues) -> FxHashMap<usize, Vec<(usize, usize)>> {
    let mut grouped: FxHashMap<usize, Vec<(usize, usize)>> = FxHashMap::default();

    for (from, to, vehicle, var) in model.decision_variables() {
        if values.value(var) > SELECTED_THRESHOLD {
            grouped.entry(vehicle).or_default().push((from, to));
        }
    }

    grouped
}
