use thiserror::Error;

use crate::graph::Direction;

/// Top-level error type for the skeleton kernel.
#[derive(Debug, Error)]
pub enum SkeletonError {
    #[error(transparent)]
    Polygon(#[from] PolygonError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Reasons an input point sequence is rejected as a simple polygon.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolygonError {
    #[error("a polygon needs at least 3 points, got {count}")]
    TooFewPoints { count: usize },

    #[error("point {index} has a non-finite coordinate")]
    NonFinite { index: usize },

    #[error("consecutive points {index} and {next} coincide")]
    DuplicatePoint { index: usize, next: usize },

    #[error("edges {first} and {second} intersect")]
    SelfIntersection { first: usize, second: usize },

    #[error("polygon has zero area")]
    ZeroArea,
}

/// Errors related to geometric computations.
#[derive(Debug, Clone, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised while reading or assembling a skeleton graph.
#[derive(Debug, Clone, Error)]
pub enum GraphError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("invalid graph: {0}")]
    InvalidGraph(String),
}

/// Errors related to offset and skeleton queries.
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    #[error("offset distance must be finite and non-negative, got {value}")]
    InvalidDistance { value: f64 },

    #[error("{direction} skeleton is unavailable: {reason}")]
    SkeletonUnavailable { direction: Direction, reason: String },
}

/// Errors related to kernel configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("exterior margin must be finite and positive, got {value}")]
    InvalidMargin { value: f64 },

    #[error("tolerance must be finite and positive, got {value}")]
    InvalidTolerance { value: f64 },

    #[error("merge distance must be finite and at least the tolerance, got {value}")]
    InvalidMergeDistance { value: f64 },
}

/// Convenience type alias for results using [`SkeletonError`].
pub type Result<T> = std::result::Result<T, SkeletonError>;
