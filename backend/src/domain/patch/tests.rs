//! Tests for patch document parsing and application.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn working_copy() -> PointUpdateInput {
    PointUpdateInput {
        name: Some("A".to_owned()),
        description: Some("B".to_owned()),
    }
}

fn document(value: Value) -> PatchDocument {
    serde_json::from_value(value).expect("valid patch document")
}

#[rstest]
fn replace_sets_the_targeted_field(mut working_copy: PointUpdateInput) {
    document(json!([{ "op": "replace", "path": "/description", "value": "C" }]))
        .apply_to(&mut working_copy)
        .expect("patch applies");

    assert_eq!(working_copy.name.as_deref(), Some("A"));
    assert_eq!(working_copy.description.as_deref(), Some("C"));
}

#[rstest]
#[case("/Name")]
#[case("/NAME")]
#[case("/name")]
fn paths_match_case_insensitively(mut working_copy: PointUpdateInput, #[case] path: &str) {
    PatchDocument::new(vec![PatchOperation::replace(path, "Z")])
        .apply_to(&mut working_copy)
        .expect("patch applies");
    assert_eq!(working_copy.name.as_deref(), Some("Z"));
}

#[rstest]
fn explicit_null_clears_and_remove_clears(mut working_copy: PointUpdateInput) {
    document(json!([
        { "op": "add", "path": "/description", "value": null },
        { "op": "remove", "path": "/name" }
    ]))
    .apply_to(&mut working_copy)
    .expect("patch applies");

    assert_eq!(working_copy, PointUpdateInput::default());
}

#[rstest]
fn copy_and_move_transfer_values(mut working_copy: PointUpdateInput) {
    document(json!([{ "op": "copy", "from": "/name", "path": "/description" }]))
        .apply_to(&mut working_copy)
        .expect("copy applies");
    assert_eq!(working_copy.description.as_deref(), Some("A"));

    let mut moved = PointUpdateInput {
        name: Some("A".to_owned()),
        description: Some("B".to_owned()),
    };
    document(json!([{ "op": "move", "from": "/description", "path": "/name" }]))
        .apply_to(&mut moved)
        .expect("move applies");
    assert_eq!(moved.name.as_deref(), Some("B"));
    assert!(moved.description.is_none());
}

#[rstest]
fn passing_test_operation_allows_later_operations(mut working_copy: PointUpdateInput) {
    document(json!([
        { "op": "test", "path": "/name", "value": "A" },
        { "op": "replace", "path": "/name", "value": "D" }
    ]))
    .apply_to(&mut working_copy)
    .expect("patch applies");
    assert_eq!(working_copy.name.as_deref(), Some("D"));
}

#[rstest]
#[case(json!([{ "op": "increment", "path": "/name", "value": "x" }]), PatchError::UnsupportedOperation { index: 0, op: "increment".to_owned() })]
#[case(json!([{ "op": "replace", "path": "/city", "value": "x" }]), PatchError::UnknownPath { index: 0, path: "/city".to_owned() })]
#[case(json!([{ "op": "replace", "path": "name", "value": "x" }]), PatchError::UnknownPath { index: 0, path: "name".to_owned() })]
#[case(json!([{ "op": "replace", "path": "/name" }]), PatchError::MissingValue { index: 0 })]
#[case(json!([{ "op": "copy", "path": "/name" }]), PatchError::MissingFrom { index: 0 })]
#[case(json!([{ "op": "replace", "path": "/name", "value": 42 }]), PatchError::InvalidValue { index: 0, path: "/name".to_owned() })]
#[case(json!([{ "op": "test", "path": "/name", "value": "nope" }]), PatchError::TestFailed { index: 0, path: "/name".to_owned() })]
fn malformed_operations_are_rejected(
    mut working_copy: PointUpdateInput,
    #[case] patch: Value,
    #[case] expected: PatchError,
) {
    let err = document(patch)
        .apply_to(&mut working_copy)
        .expect_err("patch must fail");
    assert_eq!(err, expected);
}

#[rstest]
fn failing_operation_leaves_working_copy_untouched(mut working_copy: PointUpdateInput) {
    let before = working_copy.clone();
    let err = document(json!([
        { "op": "replace", "path": "/name", "value": "changed" },
        { "op": "replace", "path": "/unknown", "value": "x" }
    ]))
    .apply_to(&mut working_copy)
    .expect_err("second operation fails");

    assert_eq!(err.index(), 1);
    assert_eq!(working_copy, before);
}

#[rstest]
fn applying_the_same_absolute_patch_twice_is_idempotent(mut working_copy: PointUpdateInput) {
    let patch = PatchDocument::new(vec![
        PatchOperation::replace("/name", "Jamtli"),
        PatchOperation::remove("/description"),
    ]);

    patch.apply_to(&mut working_copy).expect("first application");
    let once = working_copy.clone();
    patch.apply_to(&mut working_copy).expect("second application");

    assert_eq!(working_copy, once);
}

#[rstest]
fn absent_value_differs_from_explicit_null() {
    let absent: PatchOperation =
        serde_json::from_value(json!({ "op": "remove", "path": "/name" })).expect("parse");
    let null: PatchOperation =
        serde_json::from_value(json!({ "op": "add", "path": "/name", "value": null }))
            .expect("parse");

    assert!(absent.value.is_none());
    assert_eq!(null.value, Some(Value::Null));
}
