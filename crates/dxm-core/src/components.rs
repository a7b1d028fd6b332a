//! Component payload models referenced by experiment records.
//!
//! The collection layer treats every value here as opaque: membership,
//! lookup and substitution compare handle identity, never the fields
//! below. The fields exist so that payloads survive serialization intact.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Monochromatic beam description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    /// Wavelength in angstroms.
    pub wavelength: f64,
    /// Unit vector pointing from the sample towards the source.
    pub direction: [f64; 3],
    /// Beam divergence in radians.
    pub divergence: f64,
}

impl Beam {
    /// Creates a beam with zero divergence.
    pub fn new(wavelength: f64, direction: [f64; 3]) -> Self {
        Self {
            wavelength,
            direction,
            divergence: 0.0,
        }
    }
}

/// A single flat sensor area within a detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// Panel label, unique within its detector.
    pub label: String,
    /// Sensor extent in pixels along the fast and slow axes.
    pub image_size: [u32; 2],
    /// Pixel extent in millimetres along the fast and slow axes.
    pub pixel_size: [f64; 2],
    /// Position of the panel corner in the lab frame, millimetres.
    pub origin: [f64; 3],
}

/// Detector description as an ordered set of panels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Detector {
    /// Panels in readout order.
    pub panels: Vec<Panel>,
}

impl Detector {
    /// Creates a detector from its panels.
    pub fn new(panels: Vec<Panel>) -> Self {
        Self { panels }
    }
}

/// Rotation hardware moving the sample during a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goniometer {
    /// Rotation axis as a unit vector in the lab frame.
    pub rotation_axis: [f64; 3],
}

impl Goniometer {
    /// Creates a goniometer rotating about the given axis.
    pub fn new(rotation_axis: [f64; 3]) -> Self {
        Self { rotation_axis }
    }
}

/// Sweep parameters for a sequence of images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scan {
    /// First and last image number, inclusive.
    pub image_range: [i32; 2],
    /// Oscillation start and per-image width in degrees.
    pub oscillation: [f64; 2],
}

impl Scan {
    /// Creates a scan covering the given image range.
    pub fn new(image_range: [i32; 2], oscillation: [f64; 2]) -> Self {
        Self {
            image_range,
            oscillation,
        }
    }
}

/// Crystal lattice model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crystal {
    /// Unit cell parameters (a, b, c, alpha, beta, gamma).
    pub unit_cell: [f64; 6],
    /// Space group symbol in Hermann-Mauguin notation.
    pub space_group: String,
}

impl Crystal {
    /// Creates a crystal model from cell parameters and a space group.
    pub fn new(unit_cell: [f64; 6], space_group: impl Into<String>) -> Self {
        Self {
            unit_cell,
            space_group: space_group.into(),
        }
    }
}

/// Opaque profile model payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Name of the modelling algorithm the payload belongs to.
    pub algorithm: String,
    /// Algorithm parameters keyed by name.
    pub parameters: BTreeMap<String, f64>,
}

impl Profile {
    /// Creates an empty profile payload for the named algorithm.
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            parameters: BTreeMap::new(),
        }
    }
}

/// Handle onto a sequence of raw images on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSet {
    /// Filename template with a numeric placeholder, e.g. `scan_####.cbf`.
    pub template: String,
    /// Number of images reachable through the template.
    pub images: u32,
}

impl ImageSet {
    /// Creates an image set descriptor.
    pub fn new(template: impl Into<String>, images: u32) -> Self {
        Self {
            template: template.into(),
            images,
        }
    }
}
