pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod manager;
pub mod math;
pub mod operations;

pub use config::SkeletonConfig;
pub use error::{Result, SkeletonError};
pub use geometry::Polygon2;
pub use graph::{Direction, SkeletonGraph};
pub use manager::SkeletonManager;
pub use operations::query::SkeletonInfo;
