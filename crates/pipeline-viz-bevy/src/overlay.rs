//! Gizmo overlays: topology bounding box and origin marker.

use bevy::prelude::*;

use crate::{VizRoot, VizSettings, VizTopology};

pub fn draw_overlays(
    settings: Res<VizSettings>,
    topology: Option<Res<VizTopology>>,
    roots: Query<&Transform, With<VizRoot>>,
    mut gizmos: Gizmos,
) {
    if settings.show_origin_marker {
        gizmos.axes(Transform::IDENTITY, 1.5);
    }
    if !settings.show_bounding_box {
        return;
    }
    let (Some(topology), Ok(root)) = (topology, roots.single()) else {
        return;
    };

    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    for node in &topology.0.nodes {
        let p = Vec3::new(node.position.x, node.position.y, node.position.z);
        min = min.min(p);
        max = max.max(p);
    }
    // Pad by the node cuboid extent so the box encloses the meshes.
    min -= Vec3::splat(0.6);
    max += Vec3::splat(0.6);
    let center = root.transform_point((min + max) / 2.0);
    gizmos.cuboid(
        Transform::from_translation(center)
            .with_rotation(root.rotation)
            .with_scale(max - min),
        Color::srgba(1.0, 1.0, 1.0, 0.3),
    );
}
