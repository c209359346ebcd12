mod aabb;
mod color;
pub mod curve;
mod ray;

pub use aabb::AABB;
pub use color::{hex_to_rgb, hsv_to_rgb, scale_rgb};
pub use curve::{CatmullRomCurve, CurveType};
pub use ray::{intersect_aabb, intersect_triangle, Ray};
