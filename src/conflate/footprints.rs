//! Footprint-Footprint Conflation (spec §4.3): two successive applications
//! of the correspondence operator across the three footprint providers.

use anyhow::Result;

use crate::correspond::{correspond, CorrespondMode};
use crate::types::Feature;

/// Fold the available footprint providers (OSM preferred as the initial
/// left, then Microsoft, then USA Structures) through overlap-mode
/// correspondence. Absent providers (empty slices) are skipped entirely.
pub fn conflate_footprints(
    openstreetmap: &[Feature],
    microsoft: &[Feature],
    usa_structures: &[Feature],
) -> Result<Vec<Feature>> {
    let mut available = [openstreetmap, microsoft, usa_structures]
        .into_iter()
        .filter(|frame| !frame.is_empty());

    let Some(first) = available.next() else {
        return Ok(Vec::new());
    };

    let mut accumulated = first.to_vec();
    for next in available {
        accumulated = correspond(&accumulated, next, CorrespondMode::Overlap)?;
    }
    Ok(accumulated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Provider;
    use bear_geom::GeometryValue;
    use geo::polygon;

    fn footprint(id: &str, provider: Provider, x0: f64, y0: f64, side: f64) -> Feature {
        Feature::new(
            id,
            provider,
            GeometryValue::Polygon(polygon![
                (x: x0, y: y0),
                (x: x0 + side, y: y0),
                (x: x0 + side, y: y0 + side),
                (x: x0, y: y0 + side),
                (x: x0, y: y0),
            ]),
        )
    }

    #[test]
    fn no_providers_is_empty() {
        let result = conflate_footprints(&[], &[], &[]).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn osm_only_passes_through() {
        let osm = vec![footprint("osm1", Provider::OpenStreetMap, 0.0, 0.0, 10.0)];
        let result = conflate_footprints(&osm, &[], &[]).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "osm1");
    }

    #[test]
    fn absent_osm_falls_back_to_microsoft_as_left() {
        let ms = vec![footprint("ms1", Provider::Microsoft, 0.0, 0.0, 10.0)];
        let usa = vec![footprint("usa1", Provider::UsaStructures, 6.0, 0.0, 10.0)];
        let result = conflate_footprints(&[], &ms, &usa).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "ms1");
        assert_eq!(result[0].foreign.len(), 1);
        assert_eq!(result[0].foreign[0].key, "usa1");
    }

    #[test]
    fn all_three_accumulate_foreign_keys() {
        let osm = vec![footprint("osm1", Provider::OpenStreetMap, 0.0, 0.0, 10.0)];
        let ms = vec![footprint("ms1", Provider::Microsoft, 1.0, 0.0, 10.0)];
        let usa = vec![footprint("usa1", Provider::UsaStructures, 2.0, 0.0, 10.0)];
        let result = conflate_footprints(&osm, &ms, &usa).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "osm1");
        assert_eq!(result[0].foreign.len(), 2);
        assert_eq!(result[0].foreign[0].key, "ms1");
        assert_eq!(result[0].foreign[1].key, "usa1");
    }
}
