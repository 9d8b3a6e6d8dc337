mod common;

use json_delta::json_equal::deep_equal;
use json_delta::json_patch::{apply_patch, from_json_patch, to_json_patch};
use json_delta::{create_patch, diff, diff_with_options, ArrayStrategy, DiffOptions, PatchService};
use proptest::prelude::*;
use serde_json::{Number, Value};

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        (-1.0e6f64..1.0e6).prop_map(|f| Number::from_f64(f).map_or(Value::Null, Value::Number)),
        "[a-z ]{0,6}".prop_map(Value::String),
    ]
}

/// Integer-only leaves, for laws that go through serialized bytes.
fn arb_exact_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| Value::Number(n.into())),
        "[a-z]{0,4}".prop_map(Value::String),
    ]
}

fn arb_tree(leaf: impl Strategy<Value = Value> + 'static) -> impl Strategy<Value = Value> {
    leaf.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            // Keys include pointer escape characters and the empty key.
            prop::collection::btree_map("[a-c/~0-9]{0,3}", inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_json() -> impl Strategy<Value = Value> {
    arb_tree(arb_leaf())
}

fn lcs() -> DiffOptions {
    DiffOptions::default().with_arrays(ArrayStrategy::Lcs)
}

proptest! {
    #[test]
    fn apply_of_diff_reproduces_target(a in arb_json(), b in arb_json()) {
        let ops = diff(&a, &b);
        let out = apply_patch(&a, &ops).unwrap();
        prop_assert!(deep_equal(&out, &b), "{} -> {}: {:?}", a, b, ops);
    }

    #[test]
    fn apply_of_lcs_diff_reproduces_target(a in arb_json(), b in arb_json()) {
        let ops = diff_with_options(&a, &b, &lcs());
        let out = apply_patch(&a, &ops).unwrap();
        prop_assert!(deep_equal(&out, &b), "{} -> {}: {:?}", a, b, ops);
    }

    #[test]
    fn diff_of_equal_documents_is_empty(a in arb_json()) {
        prop_assert!(diff(&a, &a).is_empty());
        prop_assert!(diff_with_options(&a, &a.clone(), &lcs()).is_empty());
    }

    #[test]
    fn empty_patch_is_identity(a in arb_json()) {
        prop_assert_eq!(apply_patch(&a, &[]).unwrap(), a);
    }

    #[test]
    fn patches_survive_the_wire_format(a in arb_json(), b in arb_json()) {
        let ops = diff_with_options(&a, &b, &lcs());
        prop_assert_eq!(from_json_patch(&to_json_patch(&ops)).unwrap(), ops);
    }

    #[test]
    fn byte_facade_round_trips(a in arb_tree(arb_exact_leaf()), b in arb_tree(arb_exact_leaf())) {
        let src = serde_json::to_vec(&a).unwrap();
        let dst = serde_json::to_vec(&b).unwrap();
        for service in [PatchService::default(), PatchService::with_options(lcs())] {
            let patch = service.create_patch(&src, &dst).unwrap();
            let out = service.apply_patch(&src, &patch).unwrap();
            prop_assert_eq!(common::parse(&out), b.clone());
        }
        prop_assert_eq!(create_patch(&src, &dst).unwrap(), create_patch(&src, &dst).unwrap());
    }
}
