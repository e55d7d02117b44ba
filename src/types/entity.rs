use super::provider::Provider;

/// A row of the `entities` output: one surviving building/address entity
/// after the full conflation pipeline, keyed by its Plus Code id.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: String,
    pub classification: Option<String>,
    pub address: Option<String>,
    pub height: Option<f64>,
    pub levels: Option<i32>,
    pub x: f64,
    pub y: f64,
}

/// A row of the `crossref` output: one `(entity, source record)` link.
#[derive(Debug, Clone)]
pub struct CrossrefRow {
    pub entity_id: String,
    pub provider: Provider,
    pub provider_id: String,
}

/// A row of the `footprints` output: the pre-merge building footprint,
/// captured before the Footprint-Address Merge stage runs.
#[derive(Debug, Clone)]
pub struct FootprintRecord {
    pub provider: Provider,
    pub id: String,
    pub geometry: geo::Polygon<f64>,
}
