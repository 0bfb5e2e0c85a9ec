//! Reactive reposition: re-derive node and line positions when the config
//! changes, without rebuilding any geometry.
//!
//! The layout math lives in `pipeline_viz_core::Topology`, shared with the
//! initial build, so the two paths cannot drift. Applying this system
//! repeatedly with an unchanged config is a no-op by construction.

use bevy::prelude::*;
use tracing::debug;

use crate::geometry::line_positions;
use crate::{to_vec3, EdgeLines, NodeCube, VizSettings, VizTopology};

pub fn apply_layout_changes(
    settings: Res<VizSettings>,
    topology: Option<ResMut<VizTopology>>,
    mut nodes: Query<(&NodeCube, &mut Transform)>,
    lines: Query<&Mesh3d, With<EdgeLines>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    if !settings.is_changed() {
        return;
    }
    let Some(mut topology) = topology else {
        return;
    };
    topology.0.apply_layout(&settings.layout());

    for (cube, mut transform) in &mut nodes {
        transform.translation = to_vec3(topology.0.nodes[cube.id].position);
    }
    if let Ok(line_mesh) = lines.single() {
        if let Some(mesh) = meshes.get_mut(&line_mesh.0) {
            mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, line_positions(&topology.0));
        }
    }
    debug!("layout reapplied from updated config");
}
