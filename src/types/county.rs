/// A county, as produced by the FIPS collaborator (§6). Geometry and
/// bounds are optional since a `County` may be constructed before its
/// dataset row is resolved.
#[derive(Debug, Clone)]
pub struct County {
    pub fips: String,
    pub geometry: Option<geo::MultiPolygon<f64>>,
    pub bounds: Option<geo::Rect<f64>>,
}
