pub mod elementwise;
pub mod explode;
pub mod geometry;
pub mod index;
pub mod proj;

pub use elementwise::{
    area, centroid, centroid_x, centroid_y, distance, intersection, intersection_area, pluscodes,
};
pub use explode::{explode, explode_multipoint, explode_multipolygon};
pub use geometry::GeometryValue;
pub use index::{intersects, nearest};
