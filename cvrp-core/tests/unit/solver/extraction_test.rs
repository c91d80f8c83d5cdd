use super::*;
use crate::construction::SubtourMode;
use crate::helpers::models::*;
use milp::VariableValues;

fn assignment(model: &CvrpModel, edges: &[(usize, usize, usize)]) -> VariableValues {
    let mut values = vec![0.; model.problem().variable_count()];
    edges.iter().for_each(|&(from, to, vehicle)| values[model.var(from, to, vehicle).index()] = 1.);

    VariableValues::new(values)
}

#[test]
fn can_order_route_from_unordered_edges() {
    let model = CvrpModel::new(&test_network(3, 1));
    let values = assignment(&model, &[(1, 3, 0), (3, 0, 0), (0, 2, 0), (2, 1, 0)]);

    let routes = extract_routes(&model, &values).unwrap();

    assert_eq!(routes.len(), 1);
    assert_eq!(
        routes["vehicle-1"],
        vec![
            ("central-depot".to_string(), "client-2".to_string()),
            ("client-2".to_string(), "client-1".to_string()),
            ("client-1".to_string(), "client-3".to_string()),
            ("client-3".to_string(), "central-depot".to_string()),
        ]
    );
}

#[test]
fn can_extract_routes_idempotently() {
    let model = CvrpModel::new(&test_network(4, 2));
    let values = assignment(&model, &[(0, 1, 0), (1, 2, 0), (2, 0, 0), (0, 3, 1), (3, 4, 1), (4, 0, 1)]);

    let first = extract_routes(&model, &values).unwrap();
    let second = extract_routes(&model, &values).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn can_report_missing_continuation() {
    let model = CvrpModel::new(&test_network(2, 1));
    let values = assignment(&model, &[(0, 1, 0)]);

    let result = extract_routes(&model, &values);

    assert_eq!(
        result,
        Err(ExtractionError::NoContinuation { vehicle: "vehicle-1".to_string(), place: "client-1".to_string() })
    );
}

#[test]
fn can_report_ambiguous_continuation() {
    let model = CvrpModel::new(&test_network(2, 1));
    let values = assignment(&model, &[(0, 1, 0), (0, 2, 0), (1, 0, 0), (2, 0, 0)]);

    let result = extract_routes(&model, &values);

    assert_eq!(
        result,
        Err(ExtractionError::AmbiguousContinuation {
            vehicle: "vehicle-1".to_string(),
            place: "central-depot".to_string()
        })
    );
}

#[test]
fn can_report_edges_outside_depot_cycle() {
    let model = CvrpModel::new(&test_network(3, 1));
    let values = assignment(&model, &[(0, 1, 0), (1, 0, 0), (2, 3, 0), (3, 2, 0)]);

    let result = extract_routes(&model, &values);

    assert_eq!(result, Err(ExtractionError::UnusedEdges { vehicle: "vehicle-1".to_string() }));
}

#[test]
fn can_detect_client_only_cycles() {
    let model = CvrpModel::with_subtour_mode(&test_network(3, 1), SubtourMode::LazyCuts);
    let values = assignment(&model, &[(0, 1, 0), (1, 0, 0), (2, 3, 0), (3, 2, 0)]);

    assert_eq!(detect_subtours(&model, &values), vec![vec![2, 3]]);
}

#[test]
fn can_ignore_depot_anchored_cycles() {
    let model = CvrpModel::new(&test_network(3, 1));
    let values = assignment(&model, &[(0, 1, 0), (1, 2, 0), (2, 3, 0), (3, 0, 0)]);

    assert!(detect_subtours(&model, &values).is_empty());
}

#[test]
fn can_apply_selection_threshold() {
    let model = CvrpModel::new(&test_network(2, 1));
    let mut raw = vec![0.; model.problem().variable_count()];
    raw[model.var(0, 1, 0).index()] = 0.4;
    raw[model.var(1, 0, 0).index()] = 0.6;
    let values = VariableValues::new(raw);

    let result = extract_routes(&model, &values);

    // only the 0.6 edge counts as selected, so the depot has no departure
    assert_eq!(
        result,
        Err(ExtractionError::NoContinuation { vehicle: "vehicle-1".to_string(), place: "central-depot".to_string() })
    );
}
