//! Output Projector (spec §4.6): splits the final merged frame into the
//! three fixed-schema outputs.

use crate::types::{CrossrefRow, Entity, Feature, FootprintRecord};

/// Project the merged frame into `entities`. Geometry is assumed
/// centroid-collapsed already (spec §4.5 step 6), so `x`/`y` are simply its
/// coordinates; a missing centroid (degenerate geometry) falls back to
/// `(f64::NAN, f64::NAN)` rather than dropping the row.
pub fn project_entities(merged: &[Feature]) -> Vec<Entity> {
    merged
        .iter()
        .map(|f| {
            let (x, y) = f
                .geometry
                .centroid()
                .map(|p| (p.x(), p.y()))
                .unwrap_or((f64::NAN, f64::NAN));
            Entity {
                id: f.id.clone(),
                classification: f.classification.clone(),
                address: f.address.clone(),
                height: f.height,
                levels: f.levels,
                x,
                y,
            }
        })
        .collect()
}

/// Project the merged frame into `crossref`: explode `foreign`, sorted by
/// `(entity_id, provider)`.
pub fn project_crossref(merged: &[Feature]) -> Vec<CrossrefRow> {
    let mut rows: Vec<CrossrefRow> = merged
        .iter()
        .flat_map(|f| {
            f.foreign.iter().map(move |fk| CrossrefRow {
                entity_id: f.id.clone(),
                provider: fk.provider,
                provider_id: fk.key.clone(),
            })
        })
        .collect();
    rows.sort_by(|a, b| a.entity_id.cmp(&b.entity_id).then(a.provider.cmp(&b.provider)));
    rows
}

/// Project the pre-merge footprint frame into `footprints`. Must be called
/// on the frame captured before `merge_footprints_and_addresses` collapses
/// geometry to centroids.
pub fn project_footprints(footprints: &[Feature]) -> Vec<FootprintRecord> {
    footprints
        .iter()
        .filter_map(|f| {
            f.geometry.as_polygon().map(|polygon| FootprintRecord {
                provider: f.provider,
                id: f.id.clone(),
                geometry: polygon.clone(),
            })
        })
        .collect()
}
