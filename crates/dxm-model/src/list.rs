use dxm_core::errors::{DxmError, ErrorInfo};
use dxm_core::{
    BeamHandle, ComponentRef, ConsistencyPolicy, CrystalHandle, DetectorHandle, Experiment,
    GoniometerHandle, ScanHandle,
};

use crate::filter::ExperimentFilter;

/// Ordered, randomly indexable collection of [`Experiment`] records.
///
/// Positions are 0-based and follow insertion order except where deletion
/// or slicing reorders explicitly. Membership, lookup and substitution
/// all compare component handles by instance identity; an equal-valued
/// payload in a distinct allocation never matches.
#[derive(Debug, Clone, Default)]
pub struct ExperimentList {
    records: Vec<Experiment>,
}

impl ExperimentList {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Builds a collection from an ordered sequence of records.
    ///
    /// The collection owns its record sequence; component identities are
    /// shared with the caller's handles.
    pub fn from_records(records: impl IntoIterator<Item = Experiment>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True iff the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record at the end. No validation is performed.
    pub fn append(&mut self, record: Experiment) {
        self.records.push(record);
    }

    /// Appends every record of `other`, in `other`'s order, sharing
    /// component identities with `other`.
    pub fn extend_from(&mut self, other: &ExperimentList) {
        self.records.extend(other.records.iter().cloned());
    }

    /// Removes all records. Components referenced elsewhere stay alive.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Returns the record at `index`.
    pub fn get(&self, index: usize) -> Result<&Experiment, DxmError> {
        self.records
            .get(index)
            .ok_or_else(|| index_error(index, self.records.len()))
    }

    /// Mutable access to the record at `index`.
    ///
    /// Mutation through the returned reference mutates the stored record;
    /// this is the documented aliasing path.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Experiment, DxmError> {
        let len = self.records.len();
        self.records
            .get_mut(index)
            .ok_or_else(|| index_error(index, len))
    }

    /// Overwrites the record at `index`.
    pub fn set(&mut self, index: usize, record: Experiment) -> Result<(), DxmError> {
        *self.get_mut(index)? = record;
        Ok(())
    }

    /// Removes and returns the record at `index`, shifting later records
    /// one position left.
    pub fn remove(&mut self, index: usize) -> Result<Experiment, DxmError> {
        if index >= self.records.len() {
            return Err(index_error(index, self.records.len()));
        }
        Ok(self.records.remove(index))
    }

    /// Returns a fresh collection of the records selected by the slice.
    ///
    /// Follows the Python slice convention: negative `start`/`stop` count
    /// from the end, a negative `step` walks backward, and the effective
    /// range is clamped to the collection bounds rather than erroring.
    /// The returned records share component identities with the source.
    pub fn slice(&self, start: i64, stop: i64, step: i64) -> Result<ExperimentList, DxmError> {
        if step == 0 {
            return Err(DxmError::Index(ErrorInfo::new(
                "zero-step",
                "slice step must be non-zero",
            )));
        }
        let len = self.records.len() as i64;
        let mut out = ExperimentList::new();
        if step > 0 {
            let begin = resolve_index(start, len).clamp(0, len);
            let end = resolve_index(stop, len).clamp(0, len);
            let mut position = begin;
            while position < end {
                out.append(self.records[position as usize].clone());
                position += step;
            }
        } else {
            let begin = resolve_index(start, len).clamp(-1, len - 1);
            let end = resolve_index(stop, len).clamp(-1, len - 1);
            let mut position = begin;
            while position > end {
                out.append(self.records[position as usize].clone());
                position += step;
            }
        }
        Ok(out)
    }

    /// In-order iteration over the records. Each call restarts at
    /// position 0.
    pub fn iter(&self) -> std::slice::Iter<'_, Experiment> {
        self.records.iter()
    }

    /// In-order mutable iteration over the records.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Experiment> {
        self.records.iter_mut()
    }

    /// True iff at least one record's matching slot denotes the same
    /// instance as `component`.
    pub fn contains(&self, component: &ComponentRef) -> bool {
        self.records.iter().any(|record| record.references(component))
    }

    /// Ascending positions of every record whose matching slot denotes
    /// the same instance as `component`.
    pub fn indices(&self, component: &ComponentRef) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.references(component))
            .map(|(position, _)| position)
            .collect()
    }

    /// Rebinds every slot identity-equal to `old` to `new`, leaving all
    /// other slots and all other records untouched.
    ///
    /// `old` and `new` must target the same slot kind; a mismatch is
    /// rejected before any slot is rebound. Returns the number of rebound
    /// slots; zero matches is a no-op, not an error.
    pub fn replace(&mut self, old: &ComponentRef, new: &ComponentRef) -> Result<usize, DxmError> {
        if old.kind() != new.kind() {
            return Err(DxmError::Kind(
                ErrorInfo::new(
                    "kind-mismatch",
                    "substitution requires matching component kinds",
                )
                .with_context("old", old.kind().label())
                .with_context("new", new.kind().label()),
            ));
        }
        Ok(self.rebind(old, new))
    }

    /// True iff some record's beam slot holds this exact beam instance.
    pub fn contains_beam(&self, beam: &BeamHandle) -> bool {
        self.contains(&ComponentRef::Beam(beam.clone()))
    }

    /// True iff some record's detector slot holds this exact instance.
    pub fn contains_detector(&self, detector: &DetectorHandle) -> bool {
        self.contains(&ComponentRef::Detector(detector.clone()))
    }

    /// True iff some record's goniometer slot holds this exact instance.
    pub fn contains_goniometer(&self, goniometer: &GoniometerHandle) -> bool {
        self.contains(&ComponentRef::Goniometer(goniometer.clone()))
    }

    /// True iff some record's scan slot holds this exact instance.
    pub fn contains_scan(&self, scan: &ScanHandle) -> bool {
        self.contains(&ComponentRef::Scan(scan.clone()))
    }

    /// True iff some record's crystal slot holds this exact instance.
    pub fn contains_crystal(&self, crystal: &CrystalHandle) -> bool {
        self.contains(&ComponentRef::Crystal(crystal.clone()))
    }

    /// Positions of records whose beam slot holds this exact instance.
    pub fn indices_beam(&self, beam: &BeamHandle) -> Vec<usize> {
        self.indices(&ComponentRef::Beam(beam.clone()))
    }

    /// Positions of records whose detector slot holds this exact instance.
    pub fn indices_detector(&self, detector: &DetectorHandle) -> Vec<usize> {
        self.indices(&ComponentRef::Detector(detector.clone()))
    }

    /// Positions of records whose goniometer slot holds this exact
    /// instance.
    pub fn indices_goniometer(&self, goniometer: &GoniometerHandle) -> Vec<usize> {
        self.indices(&ComponentRef::Goniometer(goniometer.clone()))
    }

    /// Positions of records whose scan slot holds this exact instance.
    pub fn indices_scan(&self, scan: &ScanHandle) -> Vec<usize> {
        self.indices(&ComponentRef::Scan(scan.clone()))
    }

    /// Positions of records whose crystal slot holds this exact instance.
    pub fn indices_crystal(&self, crystal: &CrystalHandle) -> Vec<usize> {
        self.indices(&ComponentRef::Crystal(crystal.clone()))
    }

    /// Rebinds every beam slot holding `old` to `new`; returns the count.
    pub fn replace_beam(&mut self, old: &BeamHandle, new: BeamHandle) -> usize {
        self.rebind(
            &ComponentRef::Beam(old.clone()),
            &ComponentRef::Beam(new),
        )
    }

    /// Rebinds every detector slot holding `old` to `new`; returns the
    /// count.
    pub fn replace_detector(&mut self, old: &DetectorHandle, new: DetectorHandle) -> usize {
        self.rebind(
            &ComponentRef::Detector(old.clone()),
            &ComponentRef::Detector(new),
        )
    }

    /// Rebinds every goniometer slot holding `old` to `new`; returns the
    /// count.
    pub fn replace_goniometer(&mut self, old: &GoniometerHandle, new: GoniometerHandle) -> usize {
        self.rebind(
            &ComponentRef::Goniometer(old.clone()),
            &ComponentRef::Goniometer(new),
        )
    }

    /// Rebinds every scan slot holding `old` to `new`; returns the count.
    pub fn replace_scan(&mut self, old: &ScanHandle, new: ScanHandle) -> usize {
        self.rebind(
            &ComponentRef::Scan(old.clone()),
            &ComponentRef::Scan(new),
        )
    }

    /// Rebinds every crystal slot holding `old` to `new`; returns the
    /// count.
    pub fn replace_crystal(&mut self, old: &CrystalHandle, new: CrystalHandle) -> usize {
        self.rebind(
            &ComponentRef::Crystal(old.clone()),
            &ComponentRef::Crystal(new),
        )
    }

    /// Ascending positions of records satisfying every criterion of
    /// `filter` by identity. Omitted criteria are wildcards; the empty
    /// filter selects every position.
    pub fn query(&self, filter: &ExperimentFilter) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| filter.matches(record))
            .map(|(position, _)| position)
            .collect()
    }

    /// Evaluates `policy` against every record and reports the
    /// conjunction of the verdicts.
    ///
    /// Every record is visited even after a failing verdict, so policies
    /// may accumulate their own diagnostics. Performs no mutation. A
    /// `false` result is a normal verdict, not an error.
    pub fn is_consistent(&self, policy: &dyn ConsistencyPolicy) -> bool {
        self.records
            .iter()
            .fold(true, |verdict, record| policy.check(record) && verdict)
    }

    fn rebind(&mut self, old: &ComponentRef, new: &ComponentRef) -> usize {
        let mut rebound = 0;
        for record in &mut self.records {
            if record.references(old) {
                record.set_slot(new.clone());
                rebound += 1;
            }
        }
        rebound
    }
}

impl From<Vec<Experiment>> for ExperimentList {
    fn from(records: Vec<Experiment>) -> Self {
        Self { records }
    }
}

impl FromIterator<Experiment> for ExperimentList {
    fn from_iter<I: IntoIterator<Item = Experiment>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}

impl Extend<Experiment> for ExperimentList {
    fn extend<I: IntoIterator<Item = Experiment>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl IntoIterator for ExperimentList {
    type Item = Experiment;
    type IntoIter = std::vec::IntoIter<Experiment>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExperimentList {
    type Item = &'a Experiment;
    type IntoIter = std::slice::Iter<'a, Experiment>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a mut ExperimentList {
    type Item = &'a mut Experiment;
    type IntoIter = std::slice::IterMut<'a, Experiment>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter_mut()
    }
}

/// Resolves a possibly negative position against the collection length.
fn resolve_index(position: i64, len: i64) -> i64 {
    if position < 0 {
        position + len
    } else {
        position
    }
}

fn index_error(index: usize, len: usize) -> DxmError {
    DxmError::Index(
        ErrorInfo::new("index-out-of-range", "position is outside the collection")
            .with_context("index", index.to_string())
            .with_context("len", len.to_string()),
    )
}
