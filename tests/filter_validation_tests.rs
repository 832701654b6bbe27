//! Tests for filter and parameter validation


use test_helpers::{assert_sample_close, create_test_filter};
use tremor_stabilizer::{
    filters::{create_filter, NoFilter, PointerFilter},
    parameters::Parameters,
    Error,
};

#[test]
fn test_create_filter_validation() {
    assert!(create_filter("stabilizer:0:5").is_err());
    assert!(create_filter("stabilizer:21:5").is_err());
    assert!(create_filter("stabilizer:5:0").is_err());
    assert!(create_filter("stabilizer:5:21").is_err());
    assert!(create_filter("stabilizer:-1:5").is_err());
    assert!(create_filter("stabilizer:5:5:5").is_err());
    assert!(create_filter("none:5").is_err());

    // Valid parameters should work
    assert!(create_filter("stabilizer:1:1").is_ok());
    assert!(create_filter("stabilizer:20:20").is_ok());
    assert!(create_filter("TREMOR:5:5").is_ok());
}

#[test]
fn test_create_filter_error_kind() {
    match create_filter("kalman") {
        Err(Error::FilterError(msg)) => assert!(msg.contains("kalman")),
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("unknown filter accepted"),
    }
}

#[test]
fn test_parameters_validation_messages() {
    let err = Parameters::new(0, 5).unwrap_err();
    assert!(err.to_string().contains("History capacity"));

    let err = Parameters::new(5, 99).unwrap_err();
    assert!(err.to_string().contains("Tremor threshold"));
}

#[test]
fn test_configure_updates_stabilizer() {
    let mut filter = create_test_filter("stabilizer").unwrap();
    filter.configure(&Parameters::new(2, 20).unwrap());

    filter.apply(0.0, 0.0, 0);
    filter.apply(0.0, 0.0, 1);
    // Capacity 2: the third sample evicts the first
    let pos = filter.apply(100.0, 0.0, 10_000);
    assert_sample_close(pos, (0.7 * 50.0 + 0.3 * 100.0, 0.0));
}

#[test]
fn test_filter_names() {
    assert_eq!(create_test_filter("stabilizer").unwrap().name(), "Stabilizer");
    assert_eq!(create_test_filter("none").unwrap().name(), "NoFilter");
}

#[test]
fn test_no_filter_ignores_configure() {
    let mut filter = NoFilter;
    filter.configure(&Parameters::new(20, 20).unwrap());
    let pos = filter.apply(3.0, 4.0, 0);
    assert_eq!((pos.x, pos.y), (3.0, 4.0));
    assert_eq!(filter.name(), "NoFilter");
}
