//! Pluggable structural-consistency validation.
//!
//! The concrete rule set relating slots to one another (for example,
//! whether a scan demands a compatible goniometer) is domain policy and
//! lives outside this workspace. The collection only guarantees that the
//! supplied policy sees every record.

use crate::experiment::Experiment;

/// Strategy judging whether a single experiment record is structurally
/// sound.
pub trait ConsistencyPolicy {
    /// Judges one record.
    fn check(&self, record: &Experiment) -> bool;
}

impl<F> ConsistencyPolicy for F
where
    F: Fn(&Experiment) -> bool,
{
    fn check(&self, record: &Experiment) -> bool {
        self(record)
    }
}

/// Policy that accepts every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConsistent;

impl ConsistencyPolicy for AlwaysConsistent {
    fn check(&self, _record: &Experiment) -> bool {
        true
    }
}
