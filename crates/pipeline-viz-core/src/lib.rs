//! Domain model for the animated data-pipeline visualization.
//!
//! This crate is renderer-agnostic: it defines the fixed network topology
//! (layers, nodes, edges), the deterministic layout math, the particle
//! progress/color simulation, and the configuration surface. A renderer
//! (see `pipeline-viz-bevy`) materializes these into meshes and drives the
//! per-frame updates.

mod color;
mod config;
mod error;
mod particle;
mod topology;

pub use color::Rgb;
pub use config::VizConfig;
pub use error::{VizError, VizResult};
pub use particle::{ParticleState, ParticleStep, BASE_SPEED, SPEED_RANGE};
pub use topology::{
    edge_list, node_position, EdgeSpec, Layer, LayoutParams, NodeSpec, Topology, NODE_COUNT,
};

/// A point in 3D space.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}
