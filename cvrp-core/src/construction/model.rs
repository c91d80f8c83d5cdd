#[cfg(test)]
#[path = "../../tests/unit/construction/model_test.rs"]
mod model_test;

use crate::models::Network;
use crate::utils::{derive_identifiers, parallel_collect};
use milp::{Float, IpConstraint, IpProblem, IpProblemBuilder, LinearExpr, RelOp, VarId};
use rustc_hash::FxHashMap;

/// The largest client count for which all subtour elimination subsets are
/// materialized into the base model.
///
/// The subset family grows as `2^n` with the client count, so the exact
/// enumeration is kept only for this documented range; larger networks get a
/// base model without subtour rows and rely on lazy cut generation in the
/// solve pipeline instead.
pub const SUBTOUR_ENUMERATION_LIMIT: usize = 10;

/// Tells how subtour elimination is enforced for a built model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubtourMode {
    /// Every client subset of size two and more is a row of the base model.
    Materialized,
    /// The base model carries no subtour rows; violated subsets are added as
    /// cuts between solve rounds.
    LazyCuts,
}

/// An integer programming formulation of a network: sets, parameters, the
/// binary edge-per-vehicle decision space and the constraint families.
///
/// Built fresh from a network snapshot per solve call, consumed once by a
/// backend and read back by the route extractor; never persisted or reused
/// across solves. Place index 0 is always the depot.
pub struct CvrpModel {
    place_ids: Vec<String>,
    vehicle_ids: Vec<String>,
    demands: Vec<Float>,
    capacities: Vec<Float>,
    costs: Vec<Vec<Float>>,
    var_lookup: FxHashMap<(usize, usize, usize), VarId>,
    edges: Vec<(usize, usize, usize)>,
    subtour_mode: SubtourMode,
    problem: IpProblem,
}

impl CvrpModel {
    /// Builds a fresh formulation from a network snapshot, materializing all
    /// subtour subsets when the client count is within
    /// [`SUBTOUR_ENUMERATION_LIMIT`].
    ///
    /// The caller is expected to run the feasibility check first: a model
    /// built on an infeasible network is still well formed, but the backend
    /// will report it as infeasible instead of failing structurally.
    pub fn new(network: &Network) -> Self {
        let mode = if network.clients().len() <= SUBTOUR_ENUMERATION_LIMIT {
            SubtourMode::Materialized
        } else {
            SubtourMode::LazyCuts
        };

        Self::with_subtour_mode(network, mode)
    }

    /// Builds a fresh formulation with an explicitly chosen subtour mode.
    ///
    /// Materialized mode enumerates client subsets over a 64 bit mask, so it
    /// supports at most 63 clients; [`CvrpModel::new`] switches to lazy cuts
    /// far below that bound.
    pub fn with_subtour_mode(network: &Network, subtour_mode: SubtourMode) -> Self {
        let place_ids = derive_identifiers(network.all_places().map(|place| place.name()));
        let vehicle_ids = derive_identifiers(network.vehicles().iter().map(|vehicle| vehicle.name()));

        let demands = network.all_places().map(|place| place.demand()).collect::<Vec<_>>();
        let capacities = network.vehicles().iter().map(|vehicle| vehicle.max_capacity()).collect::<Vec<_>>();
        let costs = cost_matrix(network);

        let place_count = place_ids.len();
        let vehicle_count = vehicle_ids.len();
        let client_count = place_count - 1;

        debug_assert!(
            subtour_mode == SubtourMode::LazyCuts || client_count < u64::BITS as usize,
            "materialized subtour enumeration supports at most 63 clients"
        );

        let mut builder = IpProblemBuilder::new();
        let mut var_lookup = FxHashMap::default();
        let mut edges = Vec::with_capacity(place_count * client_count * vehicle_count);

        // x[i,j,k]: vehicle k travels directly from place i to place j. No
        // variable exists for i == j, which keeps self loops out of every sum.
        for i in 0..place_count {
            for j in 0..place_count {
                if i == j {
                    continue;
                }
                for k in 0..vehicle_count {
                    let name = format!("x[{},{},{}]", place_ids[i], place_ids[j], vehicle_ids[k]);
                    var_lookup.insert((i, j, k), builder.add_binary(name));
                    edges.push((i, j, k));
                }
            }
        }

        let objective =
            edges.iter().map(|&(i, j, k)| (costs[i][j], var_lookup[&(i, j, k)])).collect::<LinearExpr>();
        builder.minimize(objective);

        // each client must be served by exactly one vehicle
        for j in 1..place_count {
            let mut expr = LinearExpr::new();
            for i in (0..place_count).filter(|&i| i != j) {
                for k in 0..vehicle_count {
                    expr.push(1., var_lookup[&(i, j, k)]);
                }
            }
            builder.constraint(format!("serve[{}]", place_ids[j]), expr, RelOp::Eq, 1.);
        }

        // each vehicle must leave the depot exactly once
        for k in 0..vehicle_count {
            let mut expr = LinearExpr::new();
            for j in 1..place_count {
                expr.push(1., var_lookup[&(0, j, k)]);
            }
            builder.constraint(format!("depart[{}]", vehicle_ids[k]), expr, RelOp::Eq, 1.);
        }

        // arrivals and departures must be equal for each vehicle at each
        // place, so the selected edges form closed walks
        for k in 0..vehicle_count {
            for j in 0..place_count {
                let mut expr = LinearExpr::new();
                for i in (0..place_count).filter(|&i| i != j) {
                    expr.push(1., var_lookup[&(i, j, k)]);
                    expr.push(-1., var_lookup[&(j, i, k)]);
                }
                builder.constraint(format!("flow[{},{}]", vehicle_ids[k], place_ids[j]), expr, RelOp::Eq, 0.);
            }
        }

        // demand served by a vehicle must fit into its capacity
        for k in 0..vehicle_count {
            let mut expr = LinearExpr::new();
            for j in 1..place_count {
                for i in (0..place_count).filter(|&i| i != j) {
                    expr.push(demands[j], var_lookup[&(i, j, k)]);
                }
            }
            builder.constraint(format!("load[{}]", vehicle_ids[k]), expr, RelOp::Le, capacities[k]);
        }

        if subtour_mode == SubtourMode::Materialized {
            for subset in client_subsets(client_count) {
                let IpConstraint { label, expr, op, rhs } = subtour_constraint(&subset, vehicle_count, &var_lookup);
                builder.constraint(label, expr, op, rhs);
            }
        }

        Self {
            place_ids,
            vehicle_ids,
            demands,
            capacities,
            costs,
            var_lookup,
            edges,
            subtour_mode,
            problem: builder.build(),
        }
    }

    /// Returns stable place identifiers, the depot first.
    pub fn place_ids(&self) -> &[String] {
        self.place_ids.as_slice()
    }

    /// Returns stable vehicle identifiers.
    pub fn vehicle_ids(&self) -> &[String] {
        self.vehicle_ids.as_slice()
    }

    /// Returns the depot identifier.
    pub fn depot_id(&self) -> &str {
        self.place_ids[0].as_str()
    }

    /// Returns demands per place index, the depot's fixed at zero.
    pub fn demands(&self) -> &[Float] {
        self.demands.as_slice()
    }

    /// Returns vehicle capacities per vehicle index.
    pub fn capacities(&self) -> &[Float] {
        self.capacities.as_slice()
    }

    /// Returns the symmetric travel cost matrix with a zero diagonal.
    pub fn costs(&self) -> &[Vec<Float>] {
        self.costs.as_slice()
    }

    /// Returns how subtour elimination is enforced.
    pub fn subtour_mode(&self) -> SubtourMode {
        self.subtour_mode
    }

    /// Returns the underlying immutable problem record.
    pub fn problem(&self) -> &IpProblem {
        &self.problem
    }

    /// Returns the variable of the directed edge (from, to) for the vehicle.
    /// Panics for a self loop, which has no variable by construction.
    pub fn var(&self, from: usize, to: usize, vehicle: usize) -> VarId {
        self.var_lookup[&(from, to, vehicle)]
    }

    /// Iterates over all (from, to, vehicle, variable) tuples in registration
    /// order.
    pub fn decision_variables(&self) -> impl Iterator<Item = (usize, usize, usize, VarId)> + '_ {
        self.edges.iter().map(move |&(i, j, k)| (i, j, k, self.var_lookup[&(i, j, k)]))
    }

    /// Builds a subtour elimination cut for the given set of client place
    /// indices: edges fully inside the set must not form a closed loop.
    pub fn subtour_cut(&self, subset: &[usize]) -> IpConstraint {
        subtour_constraint(subset, self.vehicle_ids.len(), &self.var_lookup)
    }
}

fn cost_matrix(network: &Network) -> Vec<Vec<Float>> {
    let places = network.all_places().collect::<Vec<_>>();

    // distances are assumed to be symmetrical: both directions are computed
    // from the same pure function
    parallel_collect(&places, |from| places.iter().map(|to| from.distance_to(to)).collect())
}

fn subtour_constraint(
    subset: &[usize],
    vehicle_count: usize,
    var_lookup: &FxHashMap<(usize, usize, usize), VarId>,
) -> IpConstraint {
    let mut expr = LinearExpr::new();
    for &i in subset {
        for &j in subset.iter().filter(|&&j| j != i) {
            for k in 0..vehicle_count {
                expr.push(1., var_lookup[&(i, j, k)]);
            }
        }
    }

    let label = subset.iter().map(|index| index.to_string()).collect::<Vec<_>>().join("-");

    IpConstraint { label: format!("subtour[{label}]"), expr, op: RelOp::Le, rhs: subset.len() as Float - 1. }
}

/// Enumerates all client place index subsets of size two and more.
fn client_subsets(client_count: usize) -> impl Iterator<Item = Vec<usize>> {
    // place index 0 is the depot, clients start at 1
    (1u64..(1u64 << client_count)).filter(|mask| mask.count_ones() >= 2).map(move |mask| {
        (0..client_count).filter(|&bit| mask & (1u64 << bit) != 0).map(|bit| bit + 1).collect()
    })
}
