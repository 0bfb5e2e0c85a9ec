//! Error types for the visualization domain model.

use thiserror::Error;

use crate::topology::Layer;

/// Result type alias for visualization operations.
pub type VizResult<T> = Result<T, VizError>;

/// Errors that can occur while validating or loading a visualization.
#[derive(Debug, Error)]
pub enum VizError {
    /// A spacing parameter must be strictly positive.
    #[error("spacing parameter {name} must be positive, got {value}")]
    NonPositiveSpacing { name: &'static str, value: f32 },

    /// An edge references a node id outside the topology.
    #[error("edge ({from} -> {to}) references a node outside 0..{node_count}")]
    EdgeOutOfRange {
        from: usize,
        to: usize,
        node_count: usize,
    },

    /// A node beyond the input layer is not the target of any edge.
    #[error("node {node} in layer {layer:?} has no incoming edge")]
    UncoveredNode { node: usize, layer: Layer },

    /// The particle pool must contain at least one particle.
    #[error("particle count must be at least 1")]
    EmptyParticlePool,

    /// Configuration failed to parse.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
