//! Shared-ownership component handles and identity comparison.
//!
//! A handle is an [`Arc`] onto a component payload. Two handles are equal
//! iff they reference the same underlying instance; equal-valued payloads
//! in distinct allocations never compare equal. Components stay live as
//! long as any record in any collection, or any external holder, still
//! references them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::components::{Beam, Crystal, Detector, Goniometer, ImageSet, Profile, Scan};

/// Shared reference to a [`Beam`].
pub type BeamHandle = Arc<Beam>;
/// Shared reference to a [`Detector`].
pub type DetectorHandle = Arc<Detector>;
/// Shared reference to a [`Goniometer`].
pub type GoniometerHandle = Arc<Goniometer>;
/// Shared reference to a [`Scan`].
pub type ScanHandle = Arc<Scan>;
/// Shared reference to a [`Crystal`].
pub type CrystalHandle = Arc<Crystal>;
/// Shared reference to a [`Profile`].
pub type ProfileHandle = Arc<Profile>;
/// Shared reference to an [`ImageSet`].
pub type ImageSetHandle = Arc<ImageSet>;

/// Discriminates the seven component slots of an experiment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// The beam slot.
    Beam,
    /// The detector slot.
    Detector,
    /// The goniometer slot.
    Goniometer,
    /// The scan slot.
    Scan,
    /// The crystal slot.
    Crystal,
    /// The profile slot.
    Profile,
    /// The imageset slot.
    ImageSet,
}

impl ComponentKind {
    /// Stable lowercase label used in error context and digests.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Beam => "beam",
            ComponentKind::Detector => "detector",
            ComponentKind::Goniometer => "goniometer",
            ComponentKind::Scan => "scan",
            ComponentKind::Crystal => "crystal",
            ComponentKind::Profile => "profile",
            ComponentKind::ImageSet => "imageset",
        }
    }
}

/// Kind-tagged shared reference to a single component instance.
///
/// This is the generic entry point for queries that work across any slot
/// kind; the five named kinds also have dedicated typed accessors on the
/// collection. Cloning clones the handle, not the payload, so a clone
/// still denotes the same instance.
#[derive(Debug, Clone)]
pub enum ComponentRef {
    /// Reference to a beam instance.
    Beam(BeamHandle),
    /// Reference to a detector instance.
    Detector(DetectorHandle),
    /// Reference to a goniometer instance.
    Goniometer(GoniometerHandle),
    /// Reference to a scan instance.
    Scan(ScanHandle),
    /// Reference to a crystal instance.
    Crystal(CrystalHandle),
    /// Reference to a profile instance.
    Profile(ProfileHandle),
    /// Reference to an image set instance.
    ImageSet(ImageSetHandle),
}

impl ComponentRef {
    /// Returns the slot kind this reference targets.
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentRef::Beam(_) => ComponentKind::Beam,
            ComponentRef::Detector(_) => ComponentKind::Detector,
            ComponentRef::Goniometer(_) => ComponentKind::Goniometer,
            ComponentRef::Scan(_) => ComponentKind::Scan,
            ComponentRef::Crystal(_) => ComponentKind::Crystal,
            ComponentRef::Profile(_) => ComponentKind::Profile,
            ComponentRef::ImageSet(_) => ComponentKind::ImageSet,
        }
    }

    /// True iff both references denote the same underlying instance.
    ///
    /// References of different kinds are never the same instance.
    pub fn same_instance(&self, other: &ComponentRef) -> bool {
        match (self, other) {
            (ComponentRef::Beam(a), ComponentRef::Beam(b)) => Arc::ptr_eq(a, b),
            (ComponentRef::Detector(a), ComponentRef::Detector(b)) => Arc::ptr_eq(a, b),
            (ComponentRef::Goniometer(a), ComponentRef::Goniometer(b)) => Arc::ptr_eq(a, b),
            (ComponentRef::Scan(a), ComponentRef::Scan(b)) => Arc::ptr_eq(a, b),
            (ComponentRef::Crystal(a), ComponentRef::Crystal(b)) => Arc::ptr_eq(a, b),
            (ComponentRef::Profile(a), ComponentRef::Profile(b)) => Arc::ptr_eq(a, b),
            (ComponentRef::ImageSet(a), ComponentRef::ImageSet(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Address of the referenced instance.
    ///
    /// Incidental identity token used purely for serialization
    /// deduplication; it is only meaningful while the instance is alive.
    pub fn instance_key(&self) -> usize {
        match self {
            ComponentRef::Beam(h) => Arc::as_ptr(h) as usize,
            ComponentRef::Detector(h) => Arc::as_ptr(h) as usize,
            ComponentRef::Goniometer(h) => Arc::as_ptr(h) as usize,
            ComponentRef::Scan(h) => Arc::as_ptr(h) as usize,
            ComponentRef::Crystal(h) => Arc::as_ptr(h) as usize,
            ComponentRef::Profile(h) => Arc::as_ptr(h) as usize,
            ComponentRef::ImageSet(h) => Arc::as_ptr(h) as usize,
        }
    }
}

impl From<BeamHandle> for ComponentRef {
    fn from(handle: BeamHandle) -> Self {
        ComponentRef::Beam(handle)
    }
}

impl From<DetectorHandle> for ComponentRef {
    fn from(handle: DetectorHandle) -> Self {
        ComponentRef::Detector(handle)
    }
}

impl From<GoniometerHandle> for ComponentRef {
    fn from(handle: GoniometerHandle) -> Self {
        ComponentRef::Goniometer(handle)
    }
}

impl From<ScanHandle> for ComponentRef {
    fn from(handle: ScanHandle) -> Self {
        ComponentRef::Scan(handle)
    }
}

impl From<CrystalHandle> for ComponentRef {
    fn from(handle: CrystalHandle) -> Self {
        ComponentRef::Crystal(handle)
    }
}

impl From<ProfileHandle> for ComponentRef {
    fn from(handle: ProfileHandle) -> Self {
        ComponentRef::Profile(handle)
    }
}

impl From<ImageSetHandle> for ComponentRef {
    fn from(handle: ImageSetHandle) -> Self {
        ComponentRef::ImageSet(handle)
    }
}
