use bear_geom::GeometryValue;

use super::provider::{ForeignKey, Provider};

/// A record from a conformed provider frame, or a row produced by a
/// correspondence/conflation stage. Geometry is always a single point or a
/// single polygon (never a multi-geometry or line) in the working
/// projection (EPSG:5070).
#[derive(Debug, Clone)]
pub struct Feature {
    pub id: String,
    pub provider: Provider,
    pub classification: Option<String>,
    pub address: Option<String>,
    pub height: Option<f64>,
    pub levels: Option<i32>,
    pub geometry: GeometryValue,
    pub foreign: Vec<ForeignKey>,
}

impl Feature {
    pub fn new(id: impl Into<String>, provider: Provider, geometry: GeometryValue) -> Self {
        Self {
            id: id.into(),
            provider,
            classification: None,
            address: None,
            height: None,
            levels: None,
            geometry,
            foreign: Vec::new(),
        }
    }
}

/// Clamp an out-of-range building height to `None` rather than erroring: a
/// negative height is a per-record data-quality issue, not a schema fault.
pub fn sanitize_height(height: Option<f64>) -> Option<f64> {
    height.filter(|h| *h >= 0.0)
}

/// Clamp an implausible story count to `None`; 110 is taller than any
/// building in the continental U.S. as of this dataset's vintage.
pub fn sanitize_levels(levels: Option<i32>) -> Option<i32> {
    levels.filter(|l| *l <= 110)
}
