//! Aggregate spatial-index operators: `intersects` and `nearest`, each
//! evaluated for every row of a left-hand collection against a right-hand
//! collection, backed by an R-tree bulk-loaded once per call so the search
//! only visits candidates whose bounding box could possibly qualify.

use geo::{BoundingRect, Intersects, Rect};
use rstar::{Envelope as RTreeEnvelope, RTree, RTreeObject, AABB};

use crate::elementwise;
use crate::geometry::GeometryValue;

/// A geometry's bounding box in an R-tree, associated with the geometry's
/// index in the right-hand collection.
#[derive(Debug, Clone)]
struct Indexed {
    idx: usize,
    bbox: Rect<f64>,
}

impl RTreeObject for Indexed {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

fn build_rtree(geoms: &[GeometryValue]) -> RTree<Indexed> {
    RTree::bulk_load(
        geoms
            .iter()
            .enumerate()
            .filter_map(|(idx, g)| g.bounding_rect().map(|bbox| Indexed { idx, bbox }))
            .collect(),
    )
}

/// For every geometry in `left`, the indices of `right` geometries it
/// intersects (bounding-box query, followed by a precise `geo::Intersects`
/// check). `right` geometries with no bounding box (degenerate polygons)
/// never match.
pub fn intersects(left: &[GeometryValue], right: &[GeometryValue]) -> Vec<Vec<u64>> {
    let rtree = build_rtree(right);

    left.iter()
        .map(|query| {
            let Some(query_bbox) = query.bounding_rect() else {
                return Vec::new();
            };
            let envelope = AABB::from_corners(query_bbox.min().into(), query_bbox.max().into());
            let query_geom: geo::Geometry<f64> = query.into();
            let mut hits: Vec<u64> = rtree
                .locate_in_envelope_intersecting(&envelope)
                .filter(|candidate| {
                    let candidate_geom: geo::Geometry<f64> = (&right[candidate.idx]).into();
                    query_geom.intersects(&candidate_geom)
                })
                .map(|candidate| candidate.idx as u64)
                .collect();
            hits.sort_unstable();
            hits
        })
        .collect()
}

/// For every geometry in `left`, the single nearest `right` geometry by
/// planar distance, as a length-0-or-1 candidate list (empty iff `right` is
/// empty or none of its geometries have a bounding box). Ties break on the
/// lowest right-hand index.
///
/// Walks `right`'s R-tree in order of increasing bounding-box distance from
/// `query`'s bbox center and stops as soon as that lower bound exceeds the
/// best true distance found so far, so it never visits a candidate that
/// couldn't possibly win.
pub fn nearest(left: &[GeometryValue], right: &[GeometryValue]) -> Vec<Vec<u64>> {
    let rtree = build_rtree(right);

    left.iter()
        .map(|query| nearest_one(query, right, &rtree))
        .collect()
}

fn nearest_one(query: &GeometryValue, right: &[GeometryValue], rtree: &RTree<Indexed>) -> Vec<u64> {
    let Some(query_bbox) = query.bounding_rect() else {
        return Vec::new();
    };
    let center = query_bbox.center();
    let point = [center.x, center.y];

    let mut best: Option<(usize, f64)> = None;
    for candidate in rtree.nearest_neighbor_iter(&point) {
        if let Some((_, best_distance)) = best {
            let lower_bound_sq = candidate.envelope().distance_2(&point);
            if lower_bound_sq > best_distance * best_distance {
                break;
            }
        }
        let distance = elementwise::distance(query, &right[candidate.idx]);
        let improves = match best {
            Some((best_idx, best_distance)) => {
                distance < best_distance || (distance == best_distance && candidate.idx < best_idx)
            }
            None => true,
        };
        if improves {
            best = Some((candidate.idx, distance));
        }
    }

    best.map(|(idx, _)| vec![idx as u64]).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, Point};

    fn square(x0: f64, y0: f64, side: f64) -> GeometryValue {
        GeometryValue::Polygon(polygon![
            (x: x0, y: y0),
            (x: x0 + side, y: y0),
            (x: x0 + side, y: y0 + side),
            (x: x0, y: y0 + side),
            (x: x0, y: y0),
        ])
    }

    #[test]
    fn intersects_finds_overlapping_squares_only() {
        let right = vec![square(0.0, 0.0, 10.0), square(20.0, 20.0, 10.0)];
        let left = vec![square(5.0, 5.0, 10.0)];
        let hits = intersects(&left, &right);
        assert_eq!(hits, vec![vec![0]]);
    }

    #[test]
    fn intersects_excludes_bbox_overlap_without_geometry_overlap() {
        let right = vec![square(0.0, 0.0, 1.0)];
        let left = vec![square(5.0, 5.0, 1.0)];
        assert_eq!(intersects(&left, &right), vec![Vec::<u64>::new()]);
    }

    #[test]
    fn intersects_on_empty_right_yields_empty_lists() {
        let right: Vec<GeometryValue> = Vec::new();
        let left = vec![square(0.0, 0.0, 1.0)];
        assert_eq!(intersects(&left, &right), vec![Vec::<u64>::new()]);
    }

    #[test]
    fn nearest_returns_closest_point() {
        let right = vec![
            GeometryValue::Point(Point::new(0.0, 0.0)),
            GeometryValue::Point(Point::new(100.0, 0.0)),
        ];
        let left = vec![GeometryValue::Point(Point::new(5.0, 0.0))];
        assert_eq!(nearest(&left, &right), vec![vec![0]]);
    }

    #[test]
    fn nearest_on_empty_right_is_empty() {
        let right: Vec<GeometryValue> = Vec::new();
        let left = vec![GeometryValue::Point(Point::new(0.0, 0.0))];
        assert_eq!(nearest(&left, &right), vec![Vec::<u64>::new()]);
    }

    #[test]
    fn nearest_breaks_ties_on_lower_index() {
        let right = vec![
            GeometryValue::Point(Point::new(0.0, 5.0)),
            GeometryValue::Point(Point::new(0.0, -5.0)),
        ];
        let left = vec![GeometryValue::Point(Point::new(0.0, 0.0))];
        assert_eq!(nearest(&left, &right), vec![vec![0]]);
    }

    #[test]
    fn evaluates_one_candidate_list_per_left_row() {
        let right = vec![square(0.0, 0.0, 10.0)];
        let left = vec![square(5.0, 5.0, 10.0), square(1000.0, 1000.0, 1.0)];
        let hits = intersects(&left, &right);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0], vec![0]);
        assert!(hits[1].is_empty());
    }
}
