//! Geometry instantiation: node cuboids with glow shells, the edge line
//! mesh, and the particle pool.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Face, PrimitiveTopology};
use rand::Rng;
use tracing::{error, info};

use pipeline_viz_core::{Layer, ParticleState, Topology};

use crate::{
    to_color, to_vec3, EdgeLines, NodeCube, NodeGlow, ParticleBody, VizRoot, VizSettings,
    VizTopology,
};

const NODE_SIZE: f32 = 1.0;
const GLOW_SCALE: f32 = 1.1;
const GLOW_ALPHA: f32 = 0.25;
const PARTICLE_RADIUS: f32 = 0.09;
const EDGE_OPACITY: f32 = 0.4;

/// Requests a fresh build after a teardown.
#[derive(Event, Debug, Default)]
pub struct RebuildViz;

/// Handles of every asset this renderer created, retained for explicit
/// release at teardown.
#[derive(Resource, Debug, Default)]
pub struct VizAssets {
    pub meshes: Vec<Handle<Mesh>>,
    pub materials: Vec<Handle<StandardMaterial>>,
}

/// Node entity per global node id, in id order. Particle interpolation
/// reads live transforms through this table.
#[derive(Resource, Debug)]
pub struct NodeEntities(pub Vec<Entity>);

/// Build the scene graph on the first frame, and again on [`RebuildViz`]
/// once the previous instance is gone.
pub fn spawn_visualization(
    mut commands: Commands,
    settings: Res<VizSettings>,
    mut rebuild: EventReader<RebuildViz>,
    roots: Query<Entity, With<VizRoot>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut assets: ResMut<VizAssets>,
    mut spawned_once: Local<bool>,
) {
    let rebuild_requested = !rebuild.is_empty();
    rebuild.clear();
    if *spawned_once && !rebuild_requested {
        return;
    }
    if !roots.is_empty() {
        return;
    }
    *spawned_once = true;

    if let Err(err) = settings.validate() {
        error!(%err, "refusing to build visualization from invalid config");
        return;
    }

    let topology = Topology::build(&settings.layout());
    if let Err(err) = topology.validate() {
        error!(%err, "topology failed validation");
        return;
    }

    // Shared primitives: one cube, one sphere, one material pair per layer.
    let cube_mesh = meshes.add(Cuboid::from_length(NODE_SIZE));
    let sphere_mesh = meshes.add(Sphere::new(PARTICLE_RADIUS));
    let line_mesh = meshes.add(edge_line_mesh(&topology));
    assets.meshes.extend([
        cube_mesh.clone(),
        sphere_mesh.clone(),
        line_mesh.clone(),
    ]);

    let mut cube_materials = Vec::with_capacity(Layer::ALL.len());
    let mut glow_materials = Vec::with_capacity(Layer::ALL.len());
    for layer in Layer::ALL {
        let color = to_color(layer.color());
        let cube = materials.add(StandardMaterial {
            base_color: color,
            emissive: color.to_linear() * 0.15,
            ..default()
        });
        let glow = materials.add(StandardMaterial {
            base_color: color.with_alpha(GLOW_ALPHA),
            alpha_mode: AlphaMode::Blend,
            cull_mode: Some(Face::Front),
            unlit: true,
            ..default()
        });
        assets.materials.extend([cube.clone(), glow.clone()]);
        cube_materials.push(cube);
        glow_materials.push(glow);
    }
    let line_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.62, 0.62, 0.62, EDGE_OPACITY),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    assets.materials.push(line_material.clone());

    let root = commands
        .spawn((
            VizRoot,
            Transform::from_xyz(
                settings.position_x,
                settings.position_y,
                settings.position_z,
            )
            .with_rotation(Quat::from_euler(
                EulerRot::XYZ,
                settings.rotation_x,
                settings.rotation_y,
                settings.rotation_z,
            )),
            Visibility::default(),
        ))
        .id();

    let mut node_entities = Vec::with_capacity(topology.nodes.len());
    let mut rng = rand::thread_rng();
    commands.entity(root).with_children(|parent| {
        for node in &topology.nodes {
            let layer_index = Layer::ALL.iter().position(|&l| l == node.layer).unwrap_or(0);
            let entity = parent
                .spawn((
                    NodeCube { id: node.id },
                    Mesh3d(cube_mesh.clone()),
                    MeshMaterial3d(cube_materials[layer_index].clone()),
                    Transform::from_translation(to_vec3(node.position)),
                ))
                .with_children(|cube| {
                    cube.spawn((
                        NodeGlow,
                        Mesh3d(cube_mesh.clone()),
                        MeshMaterial3d(glow_materials[layer_index].clone()),
                        Transform::from_scale(Vec3::splat(GLOW_SCALE)),
                    ));
                })
                .id();
            node_entities.push(entity);
        }

        parent.spawn((
            EdgeLines,
            Mesh3d(line_mesh.clone()),
            MeshMaterial3d(line_material.clone()),
            Transform::IDENTITY,
        ));

        for _ in 0..settings.particle_count {
            let edge = topology.edges[rng.gen_range(0..topology.edges.len())];
            let state = ParticleState::new(
                edge,
                ParticleState::speed_from_unit(rng.gen()),
                rng.gen::<f32>(),
            );
            let source = &topology.nodes[edge.from];
            let material = materials.add(StandardMaterial {
                base_color: to_color(source.color),
                unlit: true,
                ..default()
            });
            assets.materials.push(material.clone());
            parent.spawn((
                ParticleBody { state },
                Mesh3d(sphere_mesh.clone()),
                MeshMaterial3d(material),
                Transform::from_translation(to_vec3(source.position)),
            ));
        }
    });

    info!(
        nodes = topology.nodes.len(),
        edges = topology.edges.len(),
        particles = settings.particle_count,
        "visualization built"
    );
    commands.insert_resource(NodeEntities(node_entities));
    commands.insert_resource(VizTopology(topology));
}

/// One retained `LineList` mesh with a segment per edge, in edge order.
pub(crate) fn edge_line_mesh(topology: &Topology) -> Mesh {
    Mesh::new(
        PrimitiveTopology::LineList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, line_positions(topology))
}

pub(crate) fn line_positions(topology: &Topology) -> Vec<[f32; 3]> {
    topology
        .edges
        .iter()
        .flat_map(|edge| {
            let a = topology.nodes[edge.from].position;
            let b = topology.nodes[edge.to].position;
            [[a.x, a.y, a.z], [b.x, b.y, b.z]]
        })
        .collect()
}
