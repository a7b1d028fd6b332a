use std::sync::Arc;

use dxm_core::{Beam, ComponentRef, Crystal, DxmError, Experiment, Goniometer, Scan};
use dxm_model::ExperimentList;

fn shared_beam_fixture() -> (ExperimentList, Arc<Beam>, Arc<Beam>) {
    let old = Arc::new(Beam::new(0.9795, [0.0, 0.0, -1.0]));
    let other = Arc::new(Beam::new(1.0332, [0.0, 0.0, -1.0]));
    let list = ExperimentList::from_records([
        Experiment::new().with_beam(other.clone()),
        Experiment::new().with_beam(old.clone()),
        Experiment::new(),
        Experiment::new().with_beam(old.clone()),
    ]);
    (list, old, other)
}

#[test]
fn replace_rebinds_every_matching_slot_and_nothing_else() {
    let (mut list, old, other) = shared_beam_fixture();
    let scan = Arc::new(Scan::new([1, 90], [0.0, 0.5]));
    list.get_mut(1).unwrap().scan = Some(scan.clone());

    let new = Arc::new(Beam::new(0.72, [0.0, 0.0, -1.0]));
    let rebound = list.replace_beam(&old, new.clone());

    assert_eq!(rebound, 2);
    assert!(list.indices_beam(&old).is_empty());
    assert_eq!(list.indices_beam(&new), vec![1, 3]);
    // untouched: other records and other slots of the matching records
    assert_eq!(list.indices_beam(&other), vec![0]);
    assert!(Arc::ptr_eq(list.get(1).unwrap().scan.as_ref().unwrap(), &scan));
    assert!(list.get(2).unwrap().beam.is_none());
}

#[test]
fn replace_via_generic_interface_counts_rebound_slots() {
    let (mut list, old, _) = shared_beam_fixture();
    let new = Arc::new(Beam::new(0.72, [0.0, 0.0, -1.0]));

    let rebound = list
        .replace(
            &ComponentRef::Beam(old.clone()),
            &ComponentRef::Beam(new.clone()),
        )
        .unwrap();

    assert_eq!(rebound, 2);
    assert_eq!(list.indices(&ComponentRef::Beam(new)), vec![1, 3]);
}

#[test]
fn replace_with_no_matches_is_a_noop() {
    let (mut list, _, _) = shared_beam_fixture();
    let stranger = Arc::new(Beam::new(2.0, [0.0, 0.0, -1.0]));
    let new = Arc::new(Beam::new(3.0, [0.0, 0.0, -1.0]));

    let rebound = list.replace_beam(&stranger, new.clone());

    assert_eq!(rebound, 0);
    assert!(!list.contains_beam(&new));
}

#[test]
fn kind_mismatch_is_rejected_before_any_state_is_touched() {
    let (mut list, old, _) = shared_beam_fixture();
    let before = dxm_model::canonical_hash(&list).unwrap();
    let scan = Arc::new(Scan::new([1, 10], [0.0, 0.1]));

    let err = list
        .replace(&ComponentRef::Beam(old.clone()), &ComponentRef::Scan(scan))
        .unwrap_err();

    assert!(matches!(&err, DxmError::Kind(info) if info.code == "kind-mismatch"));
    assert_eq!(err.info().context.get("old").map(String::as_str), Some("beam"));
    assert_eq!(dxm_model::canonical_hash(&list).unwrap(), before);
    assert_eq!(list.indices_beam(&old), vec![1, 3]);
}

#[test]
fn typed_replace_covers_every_named_kind() {
    let goniometer_old = Arc::new(Goniometer::new([1.0, 0.0, 0.0]));
    let crystal_old = Arc::new(Crystal::new([40.0, 50.0, 60.0, 90.0, 90.0, 90.0], "P 1"));
    let mut list = ExperimentList::from_records([Experiment::new()
        .with_goniometer(goniometer_old.clone())
        .with_crystal(crystal_old.clone())]);

    let goniometer_new = Arc::new(Goniometer::new([0.0, 1.0, 0.0]));
    let crystal_new = Arc::new(Crystal::new([41.0, 51.0, 61.0, 90.0, 90.0, 90.0], "P 1"));
    assert_eq!(list.replace_goniometer(&goniometer_old, goniometer_new.clone()), 1);
    assert_eq!(list.replace_crystal(&crystal_old, crystal_new.clone()), 1);

    let record = list.get(0).unwrap();
    assert!(Arc::ptr_eq(record.goniometer.as_ref().unwrap(), &goniometer_new));
    assert!(Arc::ptr_eq(record.crystal.as_ref().unwrap(), &crystal_new));
}

#[test]
fn replaced_component_survives_while_externally_held() {
    let (mut list, old, _) = shared_beam_fixture();
    let new = Arc::new(Beam::new(0.72, [0.0, 0.0, -1.0]));
    list.replace_beam(&old, new);

    // the collection dropped its references, ours remains
    assert_eq!(Arc::strong_count(&old), 1);
    assert_eq!(old.wavelength, 0.9795);
}
