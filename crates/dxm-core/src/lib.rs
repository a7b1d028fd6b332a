#![deny(missing_docs)]
#![doc = "Core data types for the DXM experiment model toolbox: component payloads, shared-ownership handles, the experiment record, and the validation seam."]

pub mod components;
pub mod errors;
pub mod experiment;
pub mod handle;
pub mod policy;
pub mod schema;

pub use components::{Beam, Crystal, Detector, Goniometer, ImageSet, Panel, Profile, Scan};
pub use errors::{DxmError, ErrorInfo};
pub use experiment::Experiment;
pub use handle::{
    BeamHandle, ComponentKind, ComponentRef, CrystalHandle, DetectorHandle, GoniometerHandle,
    ImageSetHandle, ProfileHandle, ScanHandle,
};
pub use policy::{AlwaysConsistent, ConsistencyPolicy};
pub use schema::SchemaVersion;
