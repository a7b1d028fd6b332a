//! Alias-preserving serialization of experiment collections.
//!
//! Shared components are deduplicated into a table keyed by synthetic
//! identity tokens assigned once per distinct instance, in first-use
//! order; records reference tokens instead of embedding payload copies.
//! Two records sharing a component before a round-trip share exactly one
//! reconstructed instance afterwards. Reconstruction is all-or-nothing:
//! a dangling or repeated token, or a token of the wrong kind for its
//! slot, fails before any collection is returned.

use std::collections::BTreeMap;
use std::sync::Arc;

use dxm_core::errors::{DxmError, ErrorInfo};
use dxm_core::{
    Beam, ComponentKind, ComponentRef, Crystal, Detector, Experiment, Goniometer, ImageSet,
    Profile, Scan, SchemaVersion,
};
use serde::{Deserialize, Serialize};

use crate::list::ExperimentList;

/// Serializes the collection to a JSON string.
pub fn list_to_json(list: &ExperimentList) -> Result<String, DxmError> {
    let mirror = SerializableList::from_list(list);
    serde_json::to_string_pretty(&mirror)
        .map_err(|err| DxmError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a collection from its JSON representation.
pub fn list_from_json(json: &str) -> Result<ExperimentList, DxmError> {
    let mirror: SerializableList = serde_json::from_str(json)
        .map_err(|err| DxmError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    mirror.into_list()
}

/// Serializes the collection to a compact binary representation using
/// `bincode`.
pub fn list_to_bytes(list: &ExperimentList) -> Result<Vec<u8>, DxmError> {
    let mirror = SerializableList::from_list(list);
    bincode::serialize(&mirror)
        .map_err(|err| DxmError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a collection from its binary representation.
pub fn list_from_bytes(bytes: &[u8]) -> Result<ExperimentList, DxmError> {
    let mirror: SerializableList = bincode::deserialize(bytes)
        .map_err(|err| DxmError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    mirror.into_list()
}

impl Serialize for ExperimentList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        SerializableList::from_list(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ExperimentList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mirror = SerializableList::deserialize(deserializer)?;
        mirror.into_list().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SerializableList {
    schema_version: SchemaVersion,
    components: Vec<SerializableComponent>,
    experiments: Vec<SerializableExperiment>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableComponent {
    id: u64,
    payload: ComponentPayload,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ComponentPayload {
    Beam(Beam),
    Detector(Detector),
    Goniometer(Goniometer),
    Scan(Scan),
    Crystal(Crystal),
    Profile(Profile),
    ImageSet(ImageSet),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SerializableExperiment {
    #[serde(default)]
    beam: Option<u64>,
    #[serde(default)]
    detector: Option<u64>,
    #[serde(default)]
    goniometer: Option<u64>,
    #[serde(default)]
    scan: Option<u64>,
    #[serde(default)]
    crystal: Option<u64>,
    #[serde(default)]
    profile: Option<u64>,
    #[serde(default)]
    imageset: Option<u64>,
}

impl SerializableList {
    pub(crate) fn from_list(list: &ExperimentList) -> Self {
        let mut interner = ComponentInterner::default();
        let experiments = list
            .iter()
            .map(|record| SerializableExperiment {
                beam: record
                    .beam
                    .as_ref()
                    .map(|h| interner.intern(ComponentRef::Beam(h.clone()))),
                detector: record
                    .detector
                    .as_ref()
                    .map(|h| interner.intern(ComponentRef::Detector(h.clone()))),
                goniometer: record
                    .goniometer
                    .as_ref()
                    .map(|h| interner.intern(ComponentRef::Goniometer(h.clone()))),
                scan: record
                    .scan
                    .as_ref()
                    .map(|h| interner.intern(ComponentRef::Scan(h.clone()))),
                crystal: record
                    .crystal
                    .as_ref()
                    .map(|h| interner.intern(ComponentRef::Crystal(h.clone()))),
                profile: record
                    .profile
                    .as_ref()
                    .map(|h| interner.intern(ComponentRef::Profile(h.clone()))),
                imageset: record
                    .imageset
                    .as_ref()
                    .map(|h| interner.intern(ComponentRef::ImageSet(h.clone()))),
            })
            .collect();
        Self {
            schema_version: SchemaVersion::default(),
            components: interner.table,
            experiments,
        }
    }

    pub(crate) fn into_list(self) -> Result<ExperimentList, DxmError> {
        let mut by_id: BTreeMap<u64, ComponentRef> = BTreeMap::new();
        for entry in self.components {
            let id = entry.id;
            if by_id.insert(id, entry.payload.into_ref()).is_some() {
                return Err(DxmError::Serde(
                    ErrorInfo::new(
                        "duplicate-component",
                        "component table repeats an identity token",
                    )
                    .with_context("id", id.to_string()),
                ));
            }
        }
        let mut records = Vec::with_capacity(self.experiments.len());
        for (position, entry) in self.experiments.into_iter().enumerate() {
            let mut record = Experiment::new();
            for (id, kind) in [
                (entry.beam, ComponentKind::Beam),
                (entry.detector, ComponentKind::Detector),
                (entry.goniometer, ComponentKind::Goniometer),
                (entry.scan, ComponentKind::Scan),
                (entry.crystal, ComponentKind::Crystal),
                (entry.profile, ComponentKind::Profile),
                (entry.imageset, ComponentKind::ImageSet),
            ] {
                if let Some(id) = id {
                    record.set_slot(resolve(&by_id, id, kind, position)?);
                }
            }
            records.push(record);
        }
        Ok(ExperimentList::from_records(records))
    }
}

/// Assigns one token per distinct component instance, in first-use order.
#[derive(Default)]
struct ComponentInterner {
    tokens: BTreeMap<usize, u64>,
    table: Vec<SerializableComponent>,
}

impl ComponentInterner {
    fn intern(&mut self, component: ComponentRef) -> u64 {
        let key = component.instance_key();
        if let Some(id) = self.tokens.get(&key) {
            return *id;
        }
        let id = self.table.len() as u64;
        self.tokens.insert(key, id);
        self.table.push(SerializableComponent {
            id,
            payload: ComponentPayload::from_ref(&component),
        });
        id
    }
}

impl ComponentPayload {
    fn from_ref(component: &ComponentRef) -> Self {
        match component {
            ComponentRef::Beam(h) => ComponentPayload::Beam(h.as_ref().clone()),
            ComponentRef::Detector(h) => ComponentPayload::Detector(h.as_ref().clone()),
            ComponentRef::Goniometer(h) => ComponentPayload::Goniometer(h.as_ref().clone()),
            ComponentRef::Scan(h) => ComponentPayload::Scan(h.as_ref().clone()),
            ComponentRef::Crystal(h) => ComponentPayload::Crystal(h.as_ref().clone()),
            ComponentRef::Profile(h) => ComponentPayload::Profile(h.as_ref().clone()),
            ComponentRef::ImageSet(h) => ComponentPayload::ImageSet(h.as_ref().clone()),
        }
    }

    fn into_ref(self) -> ComponentRef {
        match self {
            ComponentPayload::Beam(value) => ComponentRef::Beam(Arc::new(value)),
            ComponentPayload::Detector(value) => ComponentRef::Detector(Arc::new(value)),
            ComponentPayload::Goniometer(value) => ComponentRef::Goniometer(Arc::new(value)),
            ComponentPayload::Scan(value) => ComponentRef::Scan(Arc::new(value)),
            ComponentPayload::Crystal(value) => ComponentRef::Crystal(Arc::new(value)),
            ComponentPayload::Profile(value) => ComponentRef::Profile(Arc::new(value)),
            ComponentPayload::ImageSet(value) => ComponentRef::ImageSet(Arc::new(value)),
        }
    }
}

fn resolve(
    table: &BTreeMap<u64, ComponentRef>,
    id: u64,
    expected: ComponentKind,
    position: usize,
) -> Result<ComponentRef, DxmError> {
    let component = table.get(&id).ok_or_else(|| {
        DxmError::Serde(
            ErrorInfo::new(
                "unknown-component",
                "record references a token missing from the component table",
            )
            .with_context("id", id.to_string())
            .with_context("experiment", position.to_string()),
        )
    })?;
    if component.kind() != expected {
        return Err(DxmError::Serde(
            ErrorInfo::new(
                "component-kind-mismatch",
                "token resolves to a component of the wrong kind for its slot",
            )
            .with_context("id", id.to_string())
            .with_context("expected", expected.label())
            .with_context("found", component.kind().label()),
        ));
    }
    Ok(component.clone())
}
