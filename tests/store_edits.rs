// tests/store_edits.rs

use rungraph::dag::{RunnableField, RunnableId, RunnableStore};
use rungraph::errors::RungraphError;
use rungraph::types::ScheduleKind;
use rungraph_test_utils::builders::{StoreBuilder, id, ids};
use rungraph_test_utils::init_tracing;

#[test]
fn add_allocates_fresh_ids_with_defaults() {
    init_tracing();
    let mut store = RunnableStore::new();

    let a = store.add();
    let b = store.add();

    assert_ne!(a, b);
    assert_eq!(store.len(), 2);

    let runnable = store.get(a).unwrap();
    assert_eq!(runnable.name, "Runnable0");
    assert!(runnable.deps.is_empty());
    assert_eq!(runnable.attrs.kind, ScheduleKind::Periodic);
    assert_eq!(runnable.attrs.criticality, 0);
    assert_eq!(runnable.attrs.affinity, 0);
}

#[test]
fn ids_are_not_reused_after_removal() {
    let mut store = RunnableStore::new();
    let a = store.add();
    let b = store.add();
    assert!(store.remove(b));

    let c = store.add();
    assert_ne!(c, b);
    assert!(c > a);
}

#[test]
fn add_avoids_names_already_in_use() {
    let mut store = RunnableStore::new();
    let first = store.add();
    store.rename(first, "Runnable1").unwrap();

    let second = store.add();
    assert_eq!(store.get(second).unwrap().name, "Runnable1_1");
}

#[test]
fn remove_purges_every_reference() {
    init_tracing();
    let mut store = StoreBuilder::new()
        .runnable("A", &[])
        .runnable("B", &["A"])
        .runnable("C", &["A", "B"])
        .build();
    let a = id(&store, "A");

    assert!(store.remove(a));

    assert!(store.get(a).is_none());
    for runnable in store.iter() {
        assert!(!runnable.deps.contains(&a), "{} still references A", runnable.name);
    }
    assert_eq!(store.dependency_names(id(&store, "C")), vec!["B".to_string()]);
}

#[test]
fn remove_unknown_id_is_silent_noop() {
    let mut store = StoreBuilder::new().runnable("A", &[]).build();

    assert!(!store.remove(RunnableId(999)));
    assert_eq!(store.len(), 1);
}

#[test]
fn rename_empty_or_unchanged_is_noop() {
    let mut store = StoreBuilder::new().runnable("A", &[]).build();
    let a = id(&store, "A");

    assert!(!store.rename(a, "").unwrap());
    assert!(!store.rename(a, "   ").unwrap());
    assert!(!store.rename(a, "A").unwrap());
    assert_eq!(store.get(a).unwrap().name, "A");
}

#[test]
fn rename_keeps_edges_and_updates_name_views() {
    let mut store = StoreBuilder::new()
        .runnable("A", &[])
        .runnable("B", &["A"])
        .runnable("C", &["A"])
        .build();
    let a = id(&store, "A");

    assert!(store.rename(a, "X").unwrap());

    assert_eq!(store.id_of("X"), Some(a));
    assert!(store.id_of("A").is_none());
    for dependent in ["B", "C"] {
        let names = store.dependency_names(id(&store, dependent));
        assert_eq!(names, vec!["X".to_string()]);
    }
}

#[test]
fn rename_to_name_in_use_is_rejected() {
    let mut store = StoreBuilder::new().runnable("A", &[]).runnable("B", &[]).build();
    let a = id(&store, "A");

    match store.rename(a, "B") {
        Err(RungraphError::DuplicateName(name)) => assert_eq!(name, "B"),
        other => panic!("expected DuplicateName, got {other:?}"),
    }
    assert_eq!(store.get(a).unwrap().name, "A");
}

#[test]
fn set_field_replaces_single_attribute_without_cross_checks() {
    let mut store = StoreBuilder::new().runnable("A", &[]).build();
    let a = id(&store, "A");

    store.set_field(a, RunnableField::Kind(ScheduleKind::Event)).unwrap();
    store.set_field(a, RunnableField::Period(25)).unwrap();
    store.set_field(a, RunnableField::Criticality(4)).unwrap();
    store.set_field(a, RunnableField::Affinity(3)).unwrap();
    store.set_field(a, RunnableField::ExecutionTime(9)).unwrap();

    let attrs = store.get(a).unwrap().attrs;
    assert_eq!(attrs.kind, ScheduleKind::Event);
    assert_eq!(attrs.period, 25);
    assert_eq!(attrs.criticality, 4);
    assert_eq!(attrs.affinity, 3);
    assert_eq!(attrs.execution_time, 9);
}

#[test]
fn set_field_rejects_out_of_range_values() {
    let mut store = StoreBuilder::new().runnable("A", &[]).build();
    let a = id(&store, "A");
    let before = store.get(a).unwrap().attrs;

    for field in [
        RunnableField::Criticality(5),
        RunnableField::ExecutionTime(0),
        RunnableField::Period(0),
    ] {
        match store.set_field(a, field) {
            Err(RungraphError::InvalidField { .. }) => {}
            other => panic!("expected InvalidField for {field:?}, got {other:?}"),
        }
    }
    assert_eq!(store.get(a).unwrap().attrs, before);
}

#[test]
fn set_field_on_unknown_id_is_not_found() {
    let mut store = RunnableStore::new();
    let result = store.set_field(RunnableId(7), RunnableField::Affinity(1));
    assert!(matches!(result, Err(RungraphError::RunnableNotFound(_))));
}

#[test]
fn set_dependencies_strips_self_and_duplicates() {
    let mut store = StoreBuilder::new()
        .runnable("A", &[])
        .runnable("B", &[])
        .runnable("C", &[])
        .build();
    let abc = ids(&store, &["A", "B", "C"]);
    let (a, b, c) = (abc[0], abc[1], abc[2]);

    store.set_dependencies(c, &[b, c, a, b]).unwrap();

    assert_eq!(store.get(c).unwrap().deps, vec![b, a]);
}

#[test]
fn set_dependencies_rejects_unknown_ids() {
    let mut store = StoreBuilder::new().runnable("A", &[]).build();
    let a = id(&store, "A");

    let result = store.set_dependencies(a, &[RunnableId(42)]);

    assert!(matches!(result, Err(RungraphError::RunnableNotFound(_))));
    assert!(store.get(a).unwrap().deps.is_empty());
}

#[test]
fn set_dependencies_rejects_cycles_and_leaves_store_unchanged() {
    let mut store = StoreBuilder::new()
        .runnable("A", &[])
        .runnable("B", &["A"])
        .runnable("C", &["B"])
        .build();
    let a = id(&store, "A");
    let c = id(&store, "C");

    match store.set_dependencies(a, &[c]) {
        Err(RungraphError::DagCycle(msg)) => assert!(msg.contains("cycle detected")),
        other => panic!("expected DagCycle, got {other:?}"),
    }
    assert!(store.get(a).unwrap().deps.is_empty());
}

#[test]
fn add_and_remove_single_dependency() {
    let mut store = StoreBuilder::new().runnable("A", &[]).runnable("B", &[]).build();
    let a = id(&store, "A");
    let b = id(&store, "B");

    assert!(store.add_dependency(b, a).unwrap());
    assert!(!store.add_dependency(b, a).unwrap());
    assert!(!store.add_dependency(b, b).unwrap());
    assert!(store.add_dependency(a, b).is_err());

    assert_eq!(store.dependents_of(a), vec![b]);
    assert_eq!(store.roots(), vec![a]);

    assert!(store.remove_dependency(b, a).unwrap());
    assert!(!store.remove_dependency(b, a).unwrap());
    assert_eq!(store.roots(), vec![a, b]);
}
