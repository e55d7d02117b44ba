//! Row-multiplying operators: unlike the elementwise operators, these can
//! turn one input row into zero, one, or many output rows (spec §4.1).

use geo::{MultiPoint, MultiPolygon, Point, Polygon};

use crate::geometry::GeometryValue;

/// Explodes a multipoint into one `GeometryValue::Point` per member point.
/// A plain point explodes to itself; a polygon has no multipoint reading
/// and explodes to nothing.
pub fn explode_multipoint(mp: &MultiPoint<f64>) -> Vec<GeometryValue> {
    mp.0.iter().map(|p| GeometryValue::Point(*p)).collect()
}

/// Explodes a multipolygon into one `GeometryValue::Polygon` per member
/// polygon, dropping polygons with an empty exterior ring.
pub fn explode_multipolygon(mp: &MultiPolygon<f64>) -> Vec<GeometryValue> {
    mp.0.iter()
        .filter(|p| !p.exterior().0.is_empty())
        .cloned()
        .map(GeometryValue::Polygon)
        .collect()
}

/// Explodes a `GeometryValue` in place: a lone point or polygon explodes to
/// a single-element vector of itself, mirroring how the multi- variants
/// degrade to their singular counterparts.
pub fn explode(g: &GeometryValue) -> Vec<GeometryValue> {
    match g {
        GeometryValue::Point(p) => explode_multipoint(&MultiPoint(vec![*p])),
        GeometryValue::Polygon(p) => explode_multipolygon(&MultiPolygon(vec![p.clone()])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn explode_multipoint_yields_one_row_per_point() {
        let mp = MultiPoint(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        let out = explode_multipoint(&mp);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].as_point(), Some(&Point::new(0.0, 0.0)));
        assert_eq!(out[1].as_point(), Some(&Point::new(1.0, 1.0)));
    }

    #[test]
    fn explode_multipoint_empty_yields_nothing() {
        let mp: MultiPoint<f64> = MultiPoint(Vec::new());
        assert!(explode_multipoint(&mp).is_empty());
    }

    #[test]
    fn explode_multipolygon_drops_empty_members() {
        let square: Polygon<f64> = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 0.0),
        ];
        let empty = Polygon::new(geo::LineString(Vec::new()), vec![]);
        let mp = MultiPolygon(vec![square.clone(), empty]);
        let out = explode_multipolygon(&mp);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].as_polygon(), Some(&square));
    }

    #[test]
    fn explode_of_lone_point_is_itself() {
        let g = GeometryValue::Point(Point::new(2.0, 3.0));
        let out = explode(&g);
        assert_eq!(out, vec![g]);
    }
}
