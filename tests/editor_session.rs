// tests/editor_session.rs

use rungraph::dag::{LayoutOptions, Position, RunnableField, RunnableId};
use rungraph::engine::{Edit, EditorSession};
use rungraph::errors::RungraphError;
use rungraph::types::{LayoutPolicy, ScheduleKind};
use rungraph_test_utils::builders::{StoreBuilder, id};
use rungraph_test_utils::init_tracing;

fn session() -> EditorSession {
    let store = StoreBuilder::new()
        .runnable("A", &[])
        .runnable("B", &["A"])
        .build();
    EditorSession::new(store, LayoutOptions::default()).unwrap()
}

#[test]
fn every_edit_recomputes_layout() {
    init_tracing();
    let mut session = session();
    let a = id(session.store(), "A");
    let b = id(session.store(), "B");
    assert_eq!(session.layout().depth(b), Some(1));

    let step = session.apply(Edit::Add).unwrap();
    let c = step.added.expect("add allocates an id");
    assert!(step.changed);
    assert_eq!(session.layout().depth(c), Some(0));
    assert_eq!(session.layout().position(a), Position::new(-60.0, 0.0));
    assert_eq!(session.layout().position(c), Position::new(60.0, 0.0));

    session.apply(Edit::SetDependencies(c, vec![b])).unwrap();
    assert_eq!(session.layout().depth(c), Some(2));
    assert_eq!(session.layout().position(c), Position::new(0.0, 240.0));

    session.apply(Edit::Remove(b)).unwrap();
    assert_eq!(session.layout().depth(c), Some(0));
    assert_eq!(session.layout().depth(b), None);
}

#[test]
fn rejected_edit_keeps_previous_state() {
    let mut session = session();
    let a = id(session.store(), "A");
    let b = id(session.store(), "B");
    let before_layout = session.layout().clone();

    let result = session.apply(Edit::SetDependencies(a, vec![b]));

    assert!(matches!(result, Err(RungraphError::DagCycle(_))));
    assert!(session.store().get(a).unwrap().deps.is_empty());
    assert_eq!(session.layout(), &before_layout);
}

#[test]
fn noop_edits_report_unchanged() {
    let mut session = session();
    let a = id(session.store(), "A");

    assert!(!session.apply(Edit::Remove(RunnableId(99))).unwrap().changed);
    assert!(!session.apply(Edit::Rename(a, String::new())).unwrap().changed);
    assert!(!session.apply(Edit::Rename(a, "A".into())).unwrap().changed);
    assert!(session.apply(Edit::Rename(a, "Root".into())).unwrap().changed);
    assert_eq!(session.store().get(a).unwrap().name, "Root");
}

#[test]
fn field_edits_show_up_in_diagram() {
    let mut session = session();
    let b = id(session.store(), "B");

    session
        .apply(Edit::SetField(b, RunnableField::Kind(ScheduleKind::Event)))
        .unwrap();
    session
        .apply(Edit::SetField(b, RunnableField::Criticality(3)))
        .unwrap();

    let diagram = session.diagram();
    let node = diagram.node(b).unwrap();
    assert_eq!(node.kind, ScheduleKind::Event);
    assert_eq!(node.criticality, 3);
    assert_eq!(node.period, None);
    assert_eq!(node.depth, 1);
    assert_eq!(diagram.edges.len(), 1);
    assert_eq!(diagram.edges[0].source, id(session.store(), "A"));
    assert_eq!(diagram.edges[0].target, b);
}

#[test]
fn switching_policy_relayouts_current_store() {
    let mut session = session();
    let a = id(session.store(), "A");

    session
        .set_options(LayoutOptions {
            policy: LayoutPolicy::Radial,
            radius: 50.0,
            ..LayoutOptions::default()
        })
        .unwrap();

    assert_eq!(session.layout().position(a), Position::new(50.0, 0.0));
}
