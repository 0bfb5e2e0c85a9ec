//! Per-frame animation: particle flow, node rotation hold, cinematic orbit.

use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;
use rand::Rng;

use pipeline_viz_core::ParticleStep;

use crate::geometry::NodeEntities;
use crate::{to_color, NodeCube, ParticleBody, VizSettings, VizTopology};

/// Progress is specified per 60 fps frame; scale wall-clock deltas to that.
const REFERENCE_FPS: f32 = 60.0;

/// Sparkle spin rates (radians per reference frame), no semantic meaning.
const SPIN_X: f32 = 0.02;
const SPIN_Y: f32 = 0.03;

/// Node cuboids stay axis-aligned: any rotation is zeroed every frame so
/// the grid reads cleanly regardless of camera motion.
pub fn hold_node_rotation(mut nodes: Query<&mut Transform, With<NodeCube>>) {
    for mut transform in &mut nodes {
        transform.rotation = Quat::IDENTITY;
    }
}

/// Advance every particle along its edge, interpolating position between
/// the live node transforms (so an in-flight reposition is reflected
/// immediately) and color between the endpoint node colors. Arrivals jump
/// to a fresh uniformly random edge.
pub fn advance_particles(
    time: Res<Time>,
    topology: Option<Res<VizTopology>>,
    node_entities: Option<Res<NodeEntities>>,
    nodes: Query<&Transform, (With<NodeCube>, Without<ParticleBody>)>,
    mut particles: Query<
        (
            &mut ParticleBody,
            &mut Transform,
            &MeshMaterial3d<StandardMaterial>,
        ),
        Without<NodeCube>,
    >,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let (Some(topology), Some(node_entities)) = (topology, node_entities) else {
        return;
    };
    let topology = &topology.0;
    if topology.edges.is_empty() {
        return;
    }
    let dt_frames = time.delta_secs() * REFERENCE_FPS;
    let mut rng = rand::thread_rng();

    for (mut body, mut transform, material) in &mut particles {
        match body.state.tick(dt_frames) {
            ParticleStep::Arrived => {
                let edge = topology.edges[rng.gen_range(0..topology.edges.len())];
                body.state.restart(edge);
                if let Ok(source) = nodes.get(node_entities.0[edge.from]) {
                    transform.translation = source.translation;
                }
                if let Some(mat) = materials.get_mut(&material.0) {
                    mat.base_color = to_color(topology.nodes[edge.from].color);
                }
            }
            ParticleStep::Advanced(t) => {
                let edge = body.state.edge;
                let (Ok(source), Ok(target)) = (
                    nodes.get(node_entities.0[edge.from]),
                    nodes.get(node_entities.0[edge.to]),
                ) else {
                    continue;
                };
                transform.translation = source.translation.lerp(target.translation, t);
                transform.rotate_x(SPIN_X * dt_frames);
                transform.rotate_y(SPIN_Y * dt_frames);
                if let Some(mat) = materials.get_mut(&material.0) {
                    let color = topology.nodes[edge.from]
                        .color
                        .lerp(topology.nodes[edge.to].color, t);
                    mat.base_color = to_color(color);
                }
            }
        }
    }
}

/// Slow automatic yaw orbit around the topology for background embeds.
/// Cameras driven by the orbit controller are skipped; it owns their
/// transform and would snap back any motion written here.
pub fn cinematic_orbit(
    settings: Res<VizSettings>,
    time: Res<Time>,
    mut cameras: Query<&mut Transform, (With<Camera3d>, Without<PanOrbitCamera>)>,
) {
    if !settings.cinematic_mode {
        return;
    }
    let angle = 0.12 * time.delta_secs();
    for mut transform in &mut cameras {
        transform.rotate_around(Vec3::ZERO, Quat::from_rotation_y(angle));
        transform.look_at(Vec3::ZERO, Vec3::Y);
    }
}
