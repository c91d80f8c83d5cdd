use super::*;

parameterized_test! {can_slugify_names, (name, expected), {
    assert_eq!(slugify(name), expected);
}}

can_slugify_names! {
    case_01_simple: ("Depot", "depot"),
    case_02_spaces: ("Central depot", "central-depot"),
    case_03_punctuation_runs: ("Main St.? 5", "main-st-5"),
    case_04_leading_and_trailing: ("  Client #7! ", "client-7"),
    case_05_unicode: ("Łódź", "łódź"),
    case_06_digits_only: ("42", "42"),
    case_07_empty: ("", ""),
    case_08_symbols_only: ("+?!", ""),
}

#[test]
fn can_keep_identifiers_in_input_order() {
    let ids = derive_identifiers(["Depot", "Client 1", "Client 2"].into_iter());

    assert_eq!(ids, ["depot", "client-1", "client-2"]);
}

#[test]
fn can_suffix_colliding_identifiers() {
    let ids = derive_identifiers(["Main St. 5", "Main St? 5", "main st 5"].into_iter());

    assert_eq!(ids, ["main-st-5", "main-st-5-2", "main-st-5-3"]);
}

#[test]
fn can_fall_back_for_unnameable_input() {
    let ids = derive_identifiers(["?!", "--"].into_iter());

    assert_eq!(ids, ["unnamed", "unnamed-2"]);
}

#[test]
fn can_suffix_around_existing_suffixed_name() {
    let ids = derive_identifiers(["Stop", "Stop 2", "Stop"].into_iter());

    assert_eq!(ids, ["stop", "stop-2", "stop-3"]);
}
