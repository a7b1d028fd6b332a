use dxm_core::errors::{DxmError, ErrorInfo};
use sha2::{Digest, Sha256};

use crate::list::ExperimentList;
use crate::serialization::SerializableList;

/// Computes the canonical structural hash for the provided collection.
///
/// The digest covers record order, slot occupancy, component payloads and
/// the sharing pattern between records: two equal-valued but distinct
/// components hash differently from one shared component. Collections
/// that round-trip faithfully hash identically, which makes this the
/// cheap equivalence check for persistence tests.
pub fn canonical_hash(list: &ExperimentList) -> Result<String, DxmError> {
    let mirror = SerializableList::from_list(list);
    let bytes = bincode::serialize(&mirror)
        .map_err(|err| DxmError::Serde(ErrorInfo::new("canonical-hash", err.to_string())))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}
