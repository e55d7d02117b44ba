//! Spatial Correspondence Operator: the core primitive both conflation
//! stages (footprint-footprint, address-address) and the merge stage are
//! built from.

use std::collections::HashSet;

use anyhow::Result;
use bear_geom::GeometryValue;

use crate::frame::coalesce::first_some;
use crate::frame::foreign::append;
use crate::types::{Feature, ForeignKey};

/// Which geometric predicate decides whether `left[i]` and `right[j]`
/// correspond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrespondMode {
    /// `area(intersection(l, r)) / min(area(l), area(r)) > 0.3`.
    Overlap,
    /// `distance(l, r) < 10`.
    Distance,
}

const OVERLAP_THRESHOLD: f64 = 0.3;
const DISTANCE_THRESHOLD: f64 = 10.0;

struct Candidate {
    left: usize,
    right: usize,
    metric: f64,
}

fn candidate_pairs(left: &[Feature], right: &[Feature], mode: CorrespondMode) -> Vec<Candidate> {
    let left_geoms: Vec<GeometryValue> = left.iter().map(|f| f.geometry.clone()).collect();
    let right_geoms: Vec<GeometryValue> = right.iter().map(|f| f.geometry.clone()).collect();

    let candidate_lists = match mode {
        CorrespondMode::Overlap => bear_geom::intersects(&left_geoms, &right_geoms),
        CorrespondMode::Distance => bear_geom::nearest(&left_geoms, &right_geoms),
    };

    let mut pairs = Vec::new();
    for (i, right_indices) in candidate_lists.into_iter().enumerate() {
        for j in right_indices {
            let j = j as usize;
            let (metric, passes) = match mode {
                CorrespondMode::Overlap => {
                    let l = &left_geoms[i];
                    let r = &right_geoms[j];
                    let relative = bear_geom::area(l).min(bear_geom::area(r));
                    let metric = if relative == 0.0 {
                        0.0
                    } else {
                        bear_geom::intersection_area(l, r) / relative
                    };
                    (metric, metric > OVERLAP_THRESHOLD)
                }
                CorrespondMode::Distance => {
                    let metric = bear_geom::distance(&left_geoms[i], &right_geoms[j]);
                    (metric, metric < DISTANCE_THRESHOLD)
                }
            };
            if passes {
                pairs.push(Candidate { left: i, right: j, metric });
            }
        }
    }
    pairs
}

/// Reduce candidate pairs to the per-left minimum metric when `mode` is
/// `Distance`; pass through unchanged for `Overlap` (spec §9's binding tie
/// policy).
fn apply_tie_policy(mut pairs: Vec<Candidate>, mode: CorrespondMode) -> Vec<Candidate> {
    if mode != CorrespondMode::Distance {
        return pairs;
    }

    let mut min_by_left: std::collections::HashMap<usize, f64> = std::collections::HashMap::new();
    for c in &pairs {
        min_by_left
            .entry(c.left)
            .and_modify(|m| {
                if c.metric < *m {
                    *m = c.metric;
                }
            })
            .or_insert(c.metric);
    }
    pairs.retain(|c| c.metric == min_by_left[&c.left]);
    pairs
}

/// Correspond `right` onto `left`: geometry and scalar attributes take
/// priority from `left`, `right` supplies foreign-key back-references.
pub fn correspond(left: &[Feature], right: &[Feature], mode: CorrespondMode) -> Result<Vec<Feature>> {
    let mut pairs = candidate_pairs(left, right, mode);
    pairs.sort_by(|a, b| a.left.cmp(&b.left).then(a.right.cmp(&b.right)));
    pairs = apply_tie_policy(pairs, mode);
    pairs.sort_by(|a, b| a.left.cmp(&b.left).then(a.right.cmp(&b.right)));

    let matched_left: HashSet<usize> = pairs.iter().map(|c| c.left).collect();
    let matched_right: HashSet<usize> = pairs.iter().map(|c| c.right).collect();

    let mut out = Vec::with_capacity(pairs.len() + left.len() + right.len());

    for c in &pairs {
        let l = &left[c.left];
        let r = &right[c.right];
        out.push(Feature {
            id: l.id.clone(),
            provider: l.provider,
            classification: first_some(&l.classification, &r.classification),
            address: first_some(&l.address, &r.address),
            height: first_some(&l.height, &r.height),
            levels: first_some(&l.levels, &r.levels),
            geometry: l.geometry.clone(),
            foreign: append(
                &l.foreign,
                ForeignKey {
                    provider: r.provider,
                    key: r.id.clone(),
                },
            ),
        });
    }

    for (i, l) in left.iter().enumerate() {
        if !matched_left.contains(&i) {
            out.push(l.clone());
        }
    }

    for (j, r) in right.iter().enumerate() {
        if !matched_right.contains(&j) {
            out.push(r.clone());
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Provider;
    use geo::{polygon, Point};

    fn square_feature(id: &str, provider: Provider, x0: f64, y0: f64, side: f64) -> Feature {
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

    fn point_feature(id: &str, provider: Provider, x: f64, y: f64) -> Feature {
        Feature::new(id, provider, GeometryValue::Point(Point::new(x, y)))
    }

    #[test]
    fn empty_left_passes_right_through_unchanged() {
        let left: Vec<Feature> = Vec::new();
        let right = vec![square_feature("r1", Provider::Microsoft, 0.0, 0.0, 10.0)];
        let out = correspond(&left, &right, CorrespondMode::Overlap).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "r1");
        assert!(out[0].foreign.is_empty());
    }

    #[test]
    fn overlap_mode_merges_and_tracks_foreign_key() {
        let left = vec![square_feature("l1", Provider::OpenStreetMap, 0.0, 0.0, 10.0)];
        let right = vec![square_feature("r1", Provider::Microsoft, 6.0, 0.0, 10.0)];
        let out = correspond(&left, &right, CorrespondMode::Overlap).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "l1");
        assert_eq!(out[0].provider, Provider::OpenStreetMap);
        assert_eq!(out[0].foreign.len(), 1);
        assert_eq!(out[0].foreign[0].key, "r1");
    }

    #[test]
    fn overlap_mode_does_not_reduce_multiple_matches() {
        let left = vec![square_feature("l1", Provider::OpenStreetMap, 0.0, 0.0, 10.0)];
        let right = vec![
            square_feature("r1", Provider::Microsoft, 0.0, 0.0, 10.0),
            square_feature("r2", Provider::Microsoft, 1.0, 0.0, 10.0),
        ];
        let out = correspond(&left, &right, CorrespondMode::Overlap).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].foreign.len(), 2);
    }

    #[test]
    fn distance_mode_keeps_only_the_nearest_tie_set() {
        let left = vec![point_feature("l1", Provider::Nad, 0.0, 0.0)];
        let right = vec![
            point_feature("r1", Provider::OpenAddresses, 3.0, 0.0),
            point_feature("r2", Provider::OpenAddresses, 3.0, 0.0),
            point_feature("r3", Provider::OpenAddresses, 9.0, 0.0),
        ];
        let out = correspond(&left, &right, CorrespondMode::Distance).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].foreign.len(), 1);
        assert_eq!(out[0].foreign[0].key, "r1");
    }

    #[test]
    fn unmatched_rows_on_both_sides_pass_through() {
        let left = vec![
            point_feature("l1", Provider::Nad, 0.0, 0.0),
            point_feature("l2", Provider::Nad, 1000.0, 1000.0),
        ];
        let right = vec![
            point_feature("r1", Provider::OpenAddresses, 3.0, 0.0),
            point_feature("r2", Provider::OpenAddresses, -1000.0, -1000.0),
        ];
        let out = correspond(&left, &right, CorrespondMode::Distance).unwrap();
        let ids: Vec<&str> = out.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["l1", "l2", "r2"]);
    }

    #[test]
    fn distance_threshold_excludes_far_points() {
        let left = vec![point_feature("l1", Provider::Nad, 0.0, 0.0)];
        let right = vec![point_feature("r1", Provider::OpenAddresses, 50.0, 0.0)];
        let out = correspond(&left, &right, CorrespondMode::Distance).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|f| f.foreign.is_empty()));
    }
}
