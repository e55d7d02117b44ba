use geo::{BoundingRect, Centroid, Geometry, Point, Polygon, Rect};

/// A Feature's geometry is always a single point or a single polygon
/// (spec §3: WKB POINT or POLYGON in the working projection). Wrapping the
/// two cases in one small enum avoids threading `geo::Geometry`'s full
/// variant set (lines, collections, ...) through the kernel.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryValue {
    Point(Point<f64>),
    Polygon(Polygon<f64>),
}

impl GeometryValue {
    #[inline]
    pub fn as_point(&self) -> Option<&Point<f64>> {
        match self {
            GeometryValue::Point(p) => Some(p),
            GeometryValue::Polygon(_) => None,
        }
    }

    #[inline]
    pub fn as_polygon(&self) -> Option<&Polygon<f64>> {
        match self {
            GeometryValue::Point(_) => None,
            GeometryValue::Polygon(p) => Some(p),
        }
    }

    #[inline]
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        match self {
            GeometryValue::Point(p) => p.bounding_rect(),
            GeometryValue::Polygon(p) => p.bounding_rect(),
        }
    }

    /// The geometry's representative point: itself if already a point,
    /// otherwise its centroid (falling back to the exterior ring's first
    /// coordinate if the centroid is undefined, e.g. a degenerate polygon).
    pub fn representative_point(&self) -> Point<f64> {
        match self {
            GeometryValue::Point(p) => *p,
            GeometryValue::Polygon(poly) => poly.centroid().unwrap_or_else(|| {
                poly.exterior()
                    .points()
                    .next()
                    .unwrap_or_else(|| Point::new(0.0, 0.0))
            }),
        }
    }

    pub fn centroid(&self) -> Option<Point<f64>> {
        match self {
            GeometryValue::Point(p) => Some(*p),
            GeometryValue::Polygon(poly) => poly.centroid(),
        }
    }
}

impl From<Point<f64>> for GeometryValue {
    fn from(p: Point<f64>) -> Self {
        GeometryValue::Point(p)
    }
}

impl From<Polygon<f64>> for GeometryValue {
    fn from(p: Polygon<f64>) -> Self {
        GeometryValue::Polygon(p)
    }
}

impl From<&GeometryValue> for Geometry<f64> {
    fn from(g: &GeometryValue) -> Self {
        match g {
            GeometryValue::Point(p) => Geometry::Point(*p),
            GeometryValue::Polygon(p) => Geometry::Polygon(p.clone()),
        }
    }
}
