use std::sync::Arc;

use dxm_core::{
    BeamHandle, CrystalHandle, DetectorHandle, Experiment, GoniometerHandle, ImageSetHandle,
    ProfileHandle, ScanHandle,
};

/// Optional per-slot criteria for [`ExperimentList::query`].
///
/// Each criterion names the exact component instance a record must hold
/// in the corresponding slot. Omitted criteria are wildcards and match
/// any record, including one whose slot is empty.
///
/// [`ExperimentList::query`]: crate::ExperimentList::query
#[derive(Debug, Clone, Default)]
pub struct ExperimentFilter {
    beam: Option<BeamHandle>,
    detector: Option<DetectorHandle>,
    goniometer: Option<GoniometerHandle>,
    scan: Option<ScanHandle>,
    crystal: Option<CrystalHandle>,
    profile: Option<ProfileHandle>,
    imageset: Option<ImageSetHandle>,
}

impl ExperimentFilter {
    /// Creates a filter with no criteria; it matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the beam slot to hold this exact instance.
    pub fn with_beam(mut self, beam: BeamHandle) -> Self {
        self.beam = Some(beam);
        self
    }

    /// Requires the detector slot to hold this exact instance.
    pub fn with_detector(mut self, detector: DetectorHandle) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Requires the goniometer slot to hold this exact instance.
    pub fn with_goniometer(mut self, goniometer: GoniometerHandle) -> Self {
        self.goniometer = Some(goniometer);
        self
    }

    /// Requires the scan slot to hold this exact instance.
    pub fn with_scan(mut self, scan: ScanHandle) -> Self {
        self.scan = Some(scan);
        self
    }

    /// Requires the crystal slot to hold this exact instance.
    pub fn with_crystal(mut self, crystal: CrystalHandle) -> Self {
        self.crystal = Some(crystal);
        self
    }

    /// Requires the profile slot to hold this exact instance.
    pub fn with_profile(mut self, profile: ProfileHandle) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Requires the imageset slot to hold this exact instance.
    pub fn with_imageset(mut self, imageset: ImageSetHandle) -> Self {
        self.imageset = Some(imageset);
        self
    }

    /// True iff `record` satisfies every supplied criterion.
    pub fn matches(&self, record: &Experiment) -> bool {
        slot_matches(&self.beam, &record.beam)
            && slot_matches(&self.detector, &record.detector)
            && slot_matches(&self.goniometer, &record.goniometer)
            && slot_matches(&self.scan, &record.scan)
            && slot_matches(&self.crystal, &record.crystal)
            && slot_matches(&self.profile, &record.profile)
            && slot_matches(&self.imageset, &record.imageset)
    }
}

fn slot_matches<T>(criterion: &Option<Arc<T>>, slot: &Option<Arc<T>>) -> bool {
    match criterion {
        None => true,
        Some(want) => slot.as_ref().map_or(false, |held| Arc::ptr_eq(want, held)),
    }
}
