//! The experiment record: one measurement's component configuration.

use crate::handle::{
    BeamHandle, ComponentKind, ComponentRef, CrystalHandle, DetectorHandle, GoniometerHandle,
    ImageSetHandle, ProfileHandle, ScanHandle,
};

/// A single measurement's configuration: up to seven shared component
/// slots, each either empty or holding a handle.
///
/// Records are created by the caller and appended into a collection; the
/// slot set is fixed but slot contents are replaceable. Cloning a record
/// clones its handles, so the clone shares every component identity with
/// the original.
#[derive(Debug, Clone, Default)]
pub struct Experiment {
    /// Beam used for the measurement.
    pub beam: Option<BeamHandle>,
    /// Detector that recorded the measurement.
    pub detector: Option<DetectorHandle>,
    /// Goniometer moving the sample, if any.
    pub goniometer: Option<GoniometerHandle>,
    /// Scan parameters, if the measurement is a sweep.
    pub scan: Option<ScanHandle>,
    /// Crystal model, if one has been assigned.
    pub crystal: Option<CrystalHandle>,
    /// Profile model payload.
    pub profile: Option<ProfileHandle>,
    /// Raw image data handle.
    pub imageset: Option<ImageSetHandle>,
}

impl Experiment {
    /// Creates a record with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the beam slot.
    pub fn with_beam(mut self, beam: BeamHandle) -> Self {
        self.beam = Some(beam);
        self
    }

    /// Sets the detector slot.
    pub fn with_detector(mut self, detector: DetectorHandle) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Sets the goniometer slot.
    pub fn with_goniometer(mut self, goniometer: GoniometerHandle) -> Self {
        self.goniometer = Some(goniometer);
        self
    }

    /// Sets the scan slot.
    pub fn with_scan(mut self, scan: ScanHandle) -> Self {
        self.scan = Some(scan);
        self
    }

    /// Sets the crystal slot.
    pub fn with_crystal(mut self, crystal: CrystalHandle) -> Self {
        self.crystal = Some(crystal);
        self
    }

    /// Sets the profile slot.
    pub fn with_profile(mut self, profile: ProfileHandle) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Sets the imageset slot.
    pub fn with_imageset(mut self, imageset: ImageSetHandle) -> Self {
        self.imageset = Some(imageset);
        self
    }

    /// Returns the slot for `kind`, if populated.
    pub fn slot(&self, kind: ComponentKind) -> Option<ComponentRef> {
        match kind {
            ComponentKind::Beam => self.beam.clone().map(ComponentRef::Beam),
            ComponentKind::Detector => self.detector.clone().map(ComponentRef::Detector),
            ComponentKind::Goniometer => self.goniometer.clone().map(ComponentRef::Goniometer),
            ComponentKind::Scan => self.scan.clone().map(ComponentRef::Scan),
            ComponentKind::Crystal => self.crystal.clone().map(ComponentRef::Crystal),
            ComponentKind::Profile => self.profile.clone().map(ComponentRef::Profile),
            ComponentKind::ImageSet => self.imageset.clone().map(ComponentRef::ImageSet),
        }
    }

    /// Rebinds the slot matching `component`'s kind.
    pub fn set_slot(&mut self, component: ComponentRef) {
        match component {
            ComponentRef::Beam(h) => self.beam = Some(h),
            ComponentRef::Detector(h) => self.detector = Some(h),
            ComponentRef::Goniometer(h) => self.goniometer = Some(h),
            ComponentRef::Scan(h) => self.scan = Some(h),
            ComponentRef::Crystal(h) => self.crystal = Some(h),
            ComponentRef::Profile(h) => self.profile = Some(h),
            ComponentRef::ImageSet(h) => self.imageset = Some(h),
        }
    }

    /// Empties the slot for `kind`.
    pub fn clear_slot(&mut self, kind: ComponentKind) {
        match kind {
            ComponentKind::Beam => self.beam = None,
            ComponentKind::Detector => self.detector = None,
            ComponentKind::Goniometer => self.goniometer = None,
            ComponentKind::Scan => self.scan = None,
            ComponentKind::Crystal => self.crystal = None,
            ComponentKind::Profile => self.profile = None,
            ComponentKind::ImageSet => self.imageset = None,
        }
    }

    /// True iff the slot matching `component`'s kind denotes the same
    /// underlying instance as `component`.
    pub fn references(&self, component: &ComponentRef) -> bool {
        self.slot(component.kind())
            .map_or(false, |held| held.same_instance(component))
    }
}
