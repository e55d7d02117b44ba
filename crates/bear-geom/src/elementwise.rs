//! Elementwise geometry operators: row `i` of the output depends only on
//! row `i` of the input(s) (spec §4.1).

use anyhow::{Context, Result};
use geo::{Area, BooleanOps, Distance, Euclidean, MultiPolygon, Point};
use open_location_code::OpenLocationCode;

use crate::geometry::GeometryValue;
use crate::proj;

/// Planar area in working-projection units²; 0 for points.
pub fn area(g: &GeometryValue) -> f64 {
    match g {
        GeometryValue::Point(_) => 0.0,
        GeometryValue::Polygon(p) => p.unsigned_area(),
    }
}

/// Polygon-polygon intersection; empty (zero-ring) for any pairing
/// involving a point, since points never contribute area.
pub fn intersection(a: &GeometryValue, b: &GeometryValue) -> MultiPolygon<f64> {
    match (a, b) {
        (GeometryValue::Polygon(pa), GeometryValue::Polygon(pb)) => pa.intersection(pb),
        _ => MultiPolygon(Vec::new()),
    }
}

/// `area(intersection(a, b))`, the quantity the overlap predicate (§4.2) needs.
pub fn intersection_area(a: &GeometryValue, b: &GeometryValue) -> f64 {
    intersection(a, b).unsigned_area()
}

/// Planar distance; 0 iff the geometries intersect.
pub fn distance(a: &GeometryValue, b: &GeometryValue) -> f64 {
    match (a, b) {
        (GeometryValue::Point(pa), GeometryValue::Point(pb)) => Euclidean.distance(*pa, *pb),
        (GeometryValue::Point(pa), GeometryValue::Polygon(pb)) => Euclidean.distance(pa, pb),
        (GeometryValue::Polygon(pa), GeometryValue::Point(pb)) => Euclidean.distance(pb, pa),
        (GeometryValue::Polygon(pa), GeometryValue::Polygon(pb)) => Euclidean.distance(pa, pb),
    }
}

pub fn centroid(g: &GeometryValue) -> Option<Point<f64>> {
    g.centroid()
}

pub fn centroid_x(g: &GeometryValue) -> Option<f64> {
    centroid(g).map(|p| p.x())
}

pub fn centroid_y(g: &GeometryValue) -> Option<f64> {
    centroid(g).map(|p| p.y())
}

/// Open Location Code (Plus Code) of the geometry's representative point,
/// at full precision (10-character code, no short-code area removal).
pub fn pluscodes(g: &GeometryValue) -> Result<String> {
    let rep = g.representative_point();
    let (lon, lat) = proj::to_wgs84_lon_lat(rep.x(), rep.y())
        .context("[bear-geom::elementwise::pluscodes] reprojection to WGS84 failed")?;
    let code = OpenLocationCode::new(lat, lon, 10)
        .context("[bear-geom::elementwise::pluscodes] Open Location Code encoding failed")?;
    Ok(code.code)
}
