use std::sync::Arc;

use dxm_core::{Beam, DxmError, Experiment, Scan};
use dxm_model::ExperimentList;

fn record(wavelength: f64) -> Experiment {
    Experiment::new().with_beam(Arc::new(Beam::new(wavelength, [0.0, 0.0, -1.0])))
}

#[test]
fn append_grows_by_one_and_lands_at_the_end() {
    let mut list = ExperimentList::new();
    assert!(list.is_empty());

    let beam = Arc::new(Beam::new(0.9795, [0.0, 0.0, -1.0]));
    list.append(Experiment::new().with_beam(beam.clone()));

    assert_eq!(list.len(), 1);
    let stored = list.get(0).unwrap();
    assert!(Arc::ptr_eq(stored.beam.as_ref().unwrap(), &beam));
}

#[test]
fn set_overwrites_one_position_only() {
    let mut list = ExperimentList::from_records((0..4).map(|i| record(1.0 + i as f64)));
    let untouched = list.get(2).unwrap().beam.clone().unwrap();

    let replacement = Arc::new(Scan::new([1, 10], [0.0, 0.1]));
    list.set(1, Experiment::new().with_scan(replacement.clone()))
        .unwrap();

    let stored = list.get(1).unwrap();
    assert!(stored.beam.is_none());
    assert!(Arc::ptr_eq(stored.scan.as_ref().unwrap(), &replacement));
    assert!(Arc::ptr_eq(
        list.get(2).unwrap().beam.as_ref().unwrap(),
        &untouched
    ));
}

#[test]
fn out_of_range_access_fails_and_leaves_collection_unmodified() {
    let mut list = ExperimentList::from_records((0..3).map(|i| record(i as f64)));

    let err = list.get(3).unwrap_err();
    assert!(matches!(&err, DxmError::Index(info) if info.code == "index-out-of-range"));

    let err = list.set(7, Experiment::new()).unwrap_err();
    assert_eq!(err.info().code, "index-out-of-range");
    let err = list.remove(3).unwrap_err();
    assert_eq!(err.info().code, "index-out-of-range");

    assert_eq!(list.len(), 3);
    for position in 0..3 {
        assert!(list.get(position).unwrap().beam.is_some());
    }
}

#[test]
fn remove_shifts_later_records_left() {
    let mut list = ExperimentList::from_records((0..4).map(|i| record(i as f64)));
    let last = list.get(3).unwrap().beam.clone().unwrap();

    let removed = list.remove(1).unwrap();
    assert_eq!(removed.beam.unwrap().wavelength, 1.0);
    assert_eq!(list.len(), 3);
    assert!(Arc::ptr_eq(list.get(2).unwrap().beam.as_ref().unwrap(), &last));
}

#[test]
fn extend_preserves_order_and_identity() {
    let shared = Arc::new(Beam::new(0.72, [0.0, 0.0, -1.0]));
    let mut left = ExperimentList::from_records([record(1.0), record(2.0)]);
    let right =
        ExperimentList::from_records([Experiment::new().with_beam(shared.clone()), record(3.0)]);

    left.extend_from(&right);

    assert_eq!(left.len(), 4);
    assert!(Arc::ptr_eq(left.get(2).unwrap().beam.as_ref().unwrap(), &shared));
    // the source list still references the same instance
    assert!(Arc::ptr_eq(right.get(0).unwrap().beam.as_ref().unwrap(), &shared));
}

#[test]
fn clear_empties_but_external_holders_keep_components_alive() {
    let beam = Arc::new(Beam::new(1.0, [0.0, 0.0, -1.0]));
    let mut list = ExperimentList::from_records([Experiment::new().with_beam(beam.clone())]);

    list.clear();

    assert!(list.is_empty());
    assert_eq!(Arc::strong_count(&beam), 1);
    assert_eq!(beam.wavelength, 1.0);
}

#[test]
fn iteration_is_in_order_and_restartable() {
    let list = ExperimentList::from_records((0..5).map(|i| record(i as f64)));

    let first: Vec<f64> = list
        .iter()
        .map(|r| r.beam.as_ref().unwrap().wavelength)
        .collect();
    let second: Vec<f64> = (&list)
        .into_iter()
        .map(|r| r.beam.as_ref().unwrap().wavelength)
        .collect();

    assert_eq!(first, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_eq!(first, second);
}

#[test]
fn get_mut_mutates_the_stored_record() {
    let mut list = ExperimentList::from_records([record(1.0)]);
    let scan = Arc::new(Scan::new([1, 90], [0.0, 0.5]));

    list.get_mut(0).unwrap().scan = Some(scan.clone());

    assert!(Arc::ptr_eq(list.get(0).unwrap().scan.as_ref().unwrap(), &scan));
}

#[test]
fn collect_and_extend_trait_impls() {
    let mut list: ExperimentList = (0..3).map(|i| record(i as f64)).collect();
    list.extend((3..5).map(|i| record(i as f64)));
    assert_eq!(list.len(), 5);

    let wavelengths: Vec<f64> = list
        .into_iter()
        .map(|r| r.beam.unwrap().wavelength)
        .collect();
    assert_eq!(wavelengths, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
}
