use std::sync::Arc;

use pivision::telemetry::{self, TelemetryStore, table_key};
use pivision::{PointF, TargetPublisher, TargetResult, TelemetryTable, Value};

fn key(entry: &str) -> String {
    table_key(telemetry::TABLE_NAME, entry)
}

#[test]
fn test_publisher_sets_zero_defaults() {
    let table = Arc::new(TelemetryTable::new());
    let _publisher = TargetPublisher::new(table.clone());

    assert_eq!(table.get(&key(telemetry::TARGET_COUNT)), Some(Value::Int(0)));
    for entry in [
        telemetry::CENTER_X,
        telemetry::CENTER_Y,
        telemetry::OFFSET_X,
        telemetry::OFFSET_Y,
    ] {
        assert_eq!(table.get(&key(entry)), Some(Value::Double(0.0)));
    }
    assert_eq!(table.entries(telemetry::TABLE_NAME).len(), 5);
}

#[test]
fn test_defaults_do_not_overwrite_existing_values() {
    let table = Arc::new(TelemetryTable::new());
    table.set(&key(telemetry::TARGET_COUNT), Value::Int(3));

    let _publisher = TargetPublisher::new(table.clone());
    assert_eq!(table.get(&key(telemetry::TARGET_COUNT)), Some(Value::Int(3)));
}

#[test]
fn test_publish_writes_every_entry() {
    let table = Arc::new(TelemetryTable::new());
    let publisher = TargetPublisher::new(table.clone());

    publisher.publish(&TargetResult {
        count: 1,
        center: PointF::new(170.5, 100.0),
        offset: PointF::new(10.5, -20.0),
    });

    assert_eq!(table.get(&key(telemetry::TARGET_COUNT)), Some(Value::Int(1)));
    assert_eq!(table.get(&key(telemetry::CENTER_X)), Some(Value::Double(170.5)));
    assert_eq!(table.get(&key(telemetry::CENTER_Y)), Some(Value::Double(100.0)));
    assert_eq!(table.get(&key(telemetry::OFFSET_X)), Some(Value::Double(10.5)));
    assert_eq!(table.get(&key(telemetry::OFFSET_Y)), Some(Value::Double(-20.0)));
}

#[test]
fn test_custom_table_name() {
    let table = Arc::new(TelemetryTable::new());
    let publisher = TargetPublisher::with_table(table.clone(), "Shooter");
    publisher.publish(&TargetResult::none(2));

    assert_eq!(table.get("Shooter/targetCount"), Some(Value::Int(2)));
    assert!(table.entries(telemetry::TABLE_NAME).is_empty());
}

#[test]
fn test_subscribers_see_current_then_new_values() {
    let table = TelemetryTable::new();
    table.set("mode", Value::String("auto".into()));

    let rx = table.subscribe("mode");
    table.set("mode", Value::String("teleop".into()));
    table.set("other", Value::Bool(true));

    assert_eq!(rx.try_recv().unwrap(), Value::String("auto".into()));
    assert_eq!(rx.try_recv().unwrap(), Value::String("teleop".into()));
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_batches_are_never_seen_partially() {
    let table = Arc::new(TelemetryTable::new());
    let publisher = TargetPublisher::new(table.clone());

    let reader = {
        let table = table.clone();
        std::thread::spawn(move || {
            for _ in 0..2_000 {
                let entries = table.entries(telemetry::TABLE_NAME);
                let values: Vec<f64> = entries.iter().filter_map(|(_, v)| v.as_f64()).collect();
                // Every entry of a batch carries the same number
                assert!(values.windows(2).all(|w| w[0] == w[1]), "{:?}", entries);
            }
        })
    };

    for i in 0..2_000 {
        let v = i as f64;
        table.set_batch(
            [
                telemetry::TARGET_COUNT,
                telemetry::CENTER_X,
                telemetry::CENTER_Y,
                telemetry::OFFSET_X,
                telemetry::OFFSET_Y,
            ]
            .iter()
            .map(|e| (key(e), Value::Double(v)))
            .collect(),
        );
    }
    drop(publisher);
    reader.join().unwrap();
}

#[test]
fn test_value_accessors() {
    assert_eq!(Value::Int(4).as_f64(), Some(4.0));
    assert_eq!(Value::Double(1.5).as_f64(), Some(1.5));
    assert_eq!(Value::String("x".into()).as_f64(), None);
    assert_eq!(Value::String("x".into()).as_str(), Some("x"));
    assert_eq!(Value::Bool(true).as_str(), None);
}
