// tests/config_loading.rs

use std::io::Write;

use tempfile::NamedTempFile;
use rungraph::config::{ConfigFile, load_and_validate};
use rungraph::dag::{Layout, LayoutOptions, Position, RunnableStore};
use rungraph::errors::RungraphError;
use rungraph::types::{LayoutPolicy, ScheduleKind};
use rungraph_test_utils::builders::{ConfigFileBuilder, RunnableConfigBuilder, id};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn loads_runnable_set_with_defaults() {
    let file = write_config(
        r#"
[config]
num_cores = 2

[runnable.CameraCapture]
execution_time = 7
type = "periodic"
period = 50

[runnable.SensorFusion]
criticality = 1
affinity = 1
execution_time = 6
type = "event"
after = ["CameraCapture"]
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.config.num_cores, 2);
    assert_eq!(cfg.config.simulation_time, 400);
    assert_eq!(cfg.layout.vertical_spacing, 120.0);
    assert_eq!(cfg.layout.horizontal_spacing, 120.0);
    assert_eq!(cfg.layout.policy, LayoutPolicy::Layered);

    let fusion = &cfg.runnable["SensorFusion"];
    assert_eq!(fusion.kind, ScheduleKind::Event);
    assert_eq!(fusion.after, vec!["CameraCapture".to_string()]);
    assert_eq!(fusion.period, None);
}

#[test]
fn store_from_config_resolves_dependencies_by_name() {
    let cfg = ConfigFileBuilder::new()
        .with_runnable("RadarCapture", RunnableConfigBuilder::periodic(2, 75).build())
        .with_runnable("CameraCapture", RunnableConfigBuilder::periodic(7, 50).build())
        .with_runnable(
            "SensorFusion",
            RunnableConfigBuilder::event(6)
                .after("RadarCapture")
                .after("CameraCapture")
                .criticality(1)
                .build(),
        )
        .build();

    let store = RunnableStore::from_config(&cfg).unwrap();

    assert_eq!(store.len(), 3);
    let fusion = id(&store, "SensorFusion");
    assert_eq!(
        store.dependency_names(fusion),
        vec!["RadarCapture".to_string(), "CameraCapture".to_string()]
    );
    let names: Vec<&str> = store.names().collect();
    assert_eq!(names, vec!["RadarCapture", "CameraCapture", "SensorFusion"]);
}

#[test]
fn store_follows_file_order_not_name_order() {
    let file = write_config(
        r#"
[runnable.Zeta]
execution_time = 1
type = "event"

[runnable.Alpha]
execution_time = 1
type = "event"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    let keys: Vec<&str> = cfg.runnable.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Zeta", "Alpha"]);

    let store = RunnableStore::from_config(&cfg).unwrap();
    let names: Vec<&str> = store.names().collect();
    assert_eq!(names, vec!["Zeta", "Alpha"]);

    let layout = Layout::compute(&store, &LayoutOptions::from(&cfg.layout)).unwrap();
    assert_eq!(layout.position(id(&store, "Zeta")), Position::new(-60.0, 0.0));
    assert_eq!(layout.position(id(&store, "Alpha")), Position::new(60.0, 0.0));
}

#[test]
fn names_with_surrounding_whitespace_are_rejected() {
    let file = write_config(
        r#"
[runnable." A"]
execution_time = 1
type = "event"

[runnable.A]
execution_time = 1
type = "event"
"#,
    );

    match load_and_validate(file.path()) {
        Err(RungraphError::ConfigError(msg)) => assert!(msg.contains("whitespace")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn cycle_returns_structured_error() {
    let file = write_config(
        r#"
[runnable.A]
execution_time = 1
type = "event"
after = ["B"]

[runnable.B]
execution_time = 1
type = "event"
after = ["A"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(RungraphError::DagCycle(msg)) => {
            assert!(msg.contains("cycle detected"));
            assert!(msg.contains("A") || msg.contains("B"));
        }
        Err(e) => panic!("Expected DagCycle error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn unknown_dependency_returns_config_error() {
    let file = write_config(
        r#"
[runnable.A]
execution_time = 1
period = 10
after = ["NonExistent"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(RungraphError::ConfigError(msg)) => {
            assert!(msg.contains("unknown dependency"));
            assert!(msg.contains("NonExistent"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn attribute_bounds_are_checked() {
    let cases = [
        (
            RunnableConfigBuilder::periodic(1, 10).criticality(5).build(),
            "criticality",
        ),
        (RunnableConfigBuilder::periodic(1, 10).affinity(1).build(), "affinity"),
        (RunnableConfigBuilder::periodic(0, 10).build(), "execution_time"),
        (RunnableConfigBuilder::periodic(1, 0).build(), "period"),
    ];

    for (runnable, expected) in cases {
        let raw = ConfigFileBuilder::new().with_runnable("A", runnable).raw();
        match ConfigFile::try_from(raw) {
            Err(RungraphError::ConfigError(msg)) => {
                assert!(msg.contains(expected), "'{msg}' should mention {expected}")
            }
            other => panic!("expected ConfigError for {expected}, got {other:?}"),
        }
    }
}

#[test]
fn periodic_without_period_is_rejected() {
    let file = write_config(
        r#"
[runnable.A]
execution_time = 3
type = "periodic"
"#,
    );

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, RungraphError::ConfigError(ref msg) if msg.contains("period")));
}

#[test]
fn self_dependency_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_runnable("A", RunnableConfigBuilder::event(1).after("A").build())
        .raw();

    match ConfigFile::try_from(raw) {
        Err(RungraphError::ConfigError(msg)) => assert!(msg.contains("itself")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn empty_set_and_zero_cores_are_rejected() {
    let raw = ConfigFileBuilder::new().raw();
    assert!(matches!(ConfigFile::try_from(raw), Err(RungraphError::ConfigError(_))));

    let raw = ConfigFileBuilder::new()
        .with_num_cores(0)
        .with_runnable("A", RunnableConfigBuilder::event(1).build())
        .raw();
    assert!(matches!(ConfigFile::try_from(raw), Err(RungraphError::ConfigError(_))));
}

#[test]
fn invalid_toml_is_reported() {
    let file = write_config("[runnable.A\nexecution_time = ");
    assert!(matches!(load_and_validate(file.path()), Err(RungraphError::TomlError(_))));
}

#[test]
fn missing_file_is_io_error() {
    let result = load_and_validate("/definitely/not/here/Runnables.toml");
    assert!(matches!(result, Err(RungraphError::IoError(_))));
}
