pub mod bisector_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Default relative tolerance for floating-point predicates.
///
/// Predicates take an explicit `eps`; callers scale this value by the
/// extent of the input so that the same setting works for millimetres and
/// for map coordinates.
pub const TOLERANCE: f64 = 1e-9;

/// Default relative distance under which two wavefront vertices are merged.
pub const MERGE_DISTANCE: f64 = 1e-7;
