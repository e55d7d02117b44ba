//! Footprint-Address Merge (spec §4.5): nearest-neighbor correspondence of
//! address points to footprints, address normalization, centroid collapse,
//! de-duplication and canonical Plus-Code id assignment.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use bear_geom::GeometryValue;

use crate::conflate::address_normalize;
use crate::frame::anti_join;
use crate::frame::coalesce::first_some;
use crate::frame::foreign::{append, concat};
use crate::types::{Feature, ForeignKey, Provider};

struct MergeCandidate {
    address_idx: usize,
    footprint_idx: usize,
    metric: f64,
}

fn candidate_pairs(addresses: &[Feature], footprints: &[Feature]) -> Vec<MergeCandidate> {
    let address_geoms: Vec<GeometryValue> = addresses.iter().map(|f| f.geometry.clone()).collect();
    let footprint_geoms: Vec<GeometryValue> = footprints.iter().map(|f| f.geometry.clone()).collect();

    let candidate_lists = bear_geom::nearest(&address_geoms, &footprint_geoms);

    let mut pairs = Vec::new();
    for (address_idx, footprint_indices) in candidate_lists.into_iter().enumerate() {
        for footprint_idx in footprint_indices {
            let footprint_idx = footprint_idx as usize;
            let metric = bear_geom::distance(&address_geoms[address_idx], &footprint_geoms[footprint_idx]);
            if metric < 10.0 {
                pairs.push(MergeCandidate { address_idx, footprint_idx, metric });
            }
        }
    }
    pairs
}

/// Keep only rows whose distance equals the per-address minimum.
fn apply_tie_policy(mut pairs: Vec<MergeCandidate>) -> Vec<MergeCandidate> {
    let mut min_by_address: HashMap<usize, f64> = HashMap::new();
    for c in &pairs {
        min_by_address
            .entry(c.address_idx)
            .and_modify(|m| {
                if c.metric < *m {
                    *m = c.metric;
                }
            })
            .or_insert(c.metric);
    }
    pairs.retain(|c| c.metric == min_by_address[&c.address_idx]);
    pairs
}

fn merge_one(address: &Feature, footprint: &Feature, metric: f64) -> Feature {
    let geometry = if metric == 0.0 {
        address.geometry.clone()
    } else {
        footprint.geometry.clone()
    };

    Feature {
        id: address.id.clone(),
        provider: address.provider,
        classification: first_some(&address.classification, &footprint.classification),
        address: first_some(&address.address, &footprint.address),
        height: first_some(&address.height, &footprint.height),
        levels: first_some(&address.levels, &footprint.levels),
        geometry,
        foreign: append(
            &concat(&address.foreign, &footprint.foreign),
            ForeignKey {
                provider: footprint.provider,
                key: footprint.id.clone(),
            },
        ),
    }
}

/// Partition by normalized address, keep the first row ordered by
/// `Provider`'s canonical `Ord` within each partition, then enforce
/// `(id, provider)` uniqueness. `None`-addressed rows form singleton
/// partitions and are always kept.
fn dedup_by_normalized_address(rows: Vec<Feature>) -> Vec<Feature> {
    let normalized: Vec<Option<String>> =
        rows.iter().map(|r| address_normalize::normalize(r.address.as_deref())).collect();

    // Winning row index per normalized-address key: the lowest-provider row
    // in the partition.
    let mut winner_by_key: HashMap<&str, usize> = HashMap::new();
    for (i, key) in normalized.iter().enumerate() {
        let Some(k) = key.as_deref() else { continue };
        winner_by_key
            .entry(k)
            .and_modify(|best| {
                if rows[i].provider < rows[*best].provider {
                    *best = i;
                }
            })
            .or_insert(i);
    }

    // Emit in original order: every `None`-addressed row (singleton), and
    // each keyed partition's winner at the position of its first member.
    let mut emitted_keys: HashSet<&str> = HashSet::new();
    let mut ordered_indices: Vec<usize> = Vec::new();
    for (i, key) in normalized.iter().enumerate() {
        match key.as_deref() {
            None => ordered_indices.push(i),
            Some(k) if emitted_keys.insert(k) => ordered_indices.push(winner_by_key[k]),
            Some(_) => {}
        }
    }

    let mut seen_id_provider: HashSet<(String, Provider)> = HashSet::new();
    let mut out = Vec::with_capacity(ordered_indices.len());
    for i in ordered_indices {
        let row = &rows[i];
        if seen_id_provider.insert((row.id.clone(), row.provider)) {
            out.push(row.clone());
        }
    }
    out
}

/// Merge `footprints` (polygons) and `addresses` (points) into the final
/// conflated frame consumed by the Output Projector.
pub fn merge_footprints_and_addresses(footprints: &[Feature], addresses: &[Feature]) -> Result<Vec<Feature>> {
    if addresses.is_empty() {
        let collapsed: Vec<Feature> = footprints
            .iter()
            .cloned()
            .map(|mut f| {
                if let Some(c) = bear_geom::centroid(&f.geometry) {
                    f.geometry = GeometryValue::Point(c);
                }
                f
            })
            .collect();
        return finalize(collapsed);
    }

    let pairs = apply_tie_policy(candidate_pairs(addresses, footprints));

    let matched_footprint_ids: HashSet<&str> =
        pairs.iter().map(|c| footprints[c.footprint_idx].id.as_str()).collect();
    let matched_address_ids: HashSet<&str> = pairs.iter().map(|c| addresses[c.address_idx].id.as_str()).collect();

    let mut sorted_pairs = pairs;
    sorted_pairs.sort_by(|a, b| a.address_idx.cmp(&b.address_idx).then(a.footprint_idx.cmp(&b.footprint_idx)));

    let mut merged = Vec::with_capacity(sorted_pairs.len() + footprints.len() + addresses.len());
    for c in &sorted_pairs {
        merged.push(merge_one(&addresses[c.address_idx], &footprints[c.footprint_idx], c.metric));
    }

    for f in anti_join::by_id(footprints, &matched_footprint_ids) {
        merged.push(f.clone());
    }
    for a in anti_join::by_id(addresses, &matched_address_ids) {
        merged.push(a.clone());
    }

    let normalized: Vec<Feature> = merged
        .into_iter()
        .map(|mut f| {
            f.address = address_normalize::normalize(f.address.as_deref());
            f
        })
        .collect();

    let collapsed: Vec<Feature> = normalized
        .into_iter()
        .map(|mut f| {
            if let Some(c) = bear_geom::centroid(&f.geometry) {
                f.geometry = GeometryValue::Point(c);
            }
            f
        })
        .collect();

    finalize(collapsed)
}

fn finalize(rows: Vec<Feature>) -> Result<Vec<Feature>> {
    let deduped = dedup_by_normalized_address(rows);

    let closed: Vec<Feature> = deduped
        .into_iter()
        .map(|mut f| {
            f.foreign = append(&f.foreign, ForeignKey { provider: f.provider, key: f.id.clone() });
            f
        })
        .collect();

    let with_canonical_ids = closed
        .into_iter()
        .map(|mut f| {
            f.id = bear_geom::pluscodes(&f.geometry)?;
            Ok(f)
        })
        .collect::<Result<Vec<Feature>>>()?;

    Ok(with_canonical_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, Point};

    fn footprint(id: &str, provider: Provider, cx: f64, cy: f64, side: f64) -> Feature {
        let half = side / 2.0;
        Feature::new(
            id,
            provider,
            GeometryValue::Polygon(polygon![
                (x: cx - half, y: cy - half),
                (x: cx + half, y: cy - half),
                (x: cx + half, y: cy + half),
                (x: cx - half, y: cy + half),
                (x: cx - half, y: cy - half),
            ]),
        )
    }

    fn address(id: &str, provider: Provider, x: f64, y: f64) -> Feature {
        Feature::new(id, provider, GeometryValue::Point(Point::new(x, y)))
    }

    #[test]
    fn s5_address_on_footprint_uses_address_point() {
        let footprints = vec![footprint("f1", Provider::OpenStreetMap, 5.0, 5.0, 10.0)];
        let addresses = vec![address("a1", Provider::Nad, 5.0, 5.0)];
        let out = merge_footprints_and_addresses(&footprints, &addresses).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn s6_address_off_footprint_uses_footprint_centroid() {
        let footprints = vec![footprint("f1", Provider::OpenStreetMap, 5.0, 5.0, 10.0)];
        let addresses = vec![address("a1", Provider::Nad, 5.0, 8.0)];
        let out = merge_footprints_and_addresses(&footprints, &addresses).unwrap();
        assert_eq!(out.len(), 1);
        let centroid = out[0].geometry.centroid().unwrap();
        assert!((centroid.x() - 5.0).abs() < 1e-9);
        assert!((centroid.y() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn no_addresses_collapses_footprints_to_centroid() {
        let footprints = vec![footprint("f1", Provider::OpenStreetMap, 5.0, 5.0, 10.0)];
        let out = merge_footprints_and_addresses(&footprints, &[]).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].geometry.as_point().is_some());
    }

    #[test]
    fn s7_dedup_keeps_lowest_provider_for_equivalent_addresses() {
        let mut a = address("a1", Provider::OpenAddresses, 0.0, 0.0);
        a.address = Some("123 Main St".to_string());
        let mut b = address("a2", Provider::Nad, 100.0, 100.0);
        b.address = Some("123 main street".to_string());

        let footprints: Vec<Feature> = Vec::new();
        let out = merge_footprints_and_addresses(&footprints, &[a, b]).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn unmatched_footprints_and_addresses_pass_through() {
        let footprints = vec![footprint("f1", Provider::OpenStreetMap, 0.0, 0.0, 2.0)];
        let addresses = vec![address("a1", Provider::Nad, 1000.0, 1000.0)];
        let out = merge_footprints_and_addresses(&footprints, &addresses).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn merge_preserves_footprint_foreign_keys_alongside_address_foreign_keys() {
        let mut f = footprint("f1", Provider::OpenStreetMap, 5.0, 5.0, 10.0);
        f.foreign = vec![
            ForeignKey { provider: Provider::Microsoft, key: "ms1".to_string() },
            ForeignKey { provider: Provider::UsaStructures, key: "usa1".to_string() },
        ];
        let mut a = address("a1", Provider::Nad, 5.0, 5.0);
        a.foreign = vec![ForeignKey { provider: Provider::OpenAddresses, key: "oa1".to_string() }];

        let out = merge_footprints_and_addresses(&[f], &[a]).unwrap();
        assert_eq!(out.len(), 1);
        let keys: Vec<&str> = out[0].foreign.iter().map(|k| k.key.as_str()).collect();
        assert!(keys.contains(&"ms1"));
        assert!(keys.contains(&"usa1"));
        assert!(keys.contains(&"oa1"));
        assert!(keys.contains(&"f1"));
    }

    #[test]
    fn foreign_closure_includes_self_reference() {
        let footprints = vec![footprint("f1", Provider::OpenStreetMap, 0.0, 0.0, 2.0)];
        let out = merge_footprints_and_addresses(&footprints, &[]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].foreign.len(), 1);
        assert_eq!(out[0].foreign[0].key, "f1");
    }
}
