//! Headless integration tests: build, reposition, and teardown lifecycle
//! without a window or GPU.

use bevy::asset::AssetPlugin;
use bevy::input::InputPlugin;
use bevy::prelude::*;

use pipeline_viz_bevy::{
    NodeCube, NodeEntities, ParticleBody, PipelineVizPlugin, RebuildViz, TeardownViz, VizAssets,
    VizRoot, VizSettings, VizTopology,
};
use pipeline_viz_core::{Topology, VizConfig};

fn test_app(config: VizConfig) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default(), InputPlugin));
    app.init_asset::<Mesh>();
    app.init_asset::<StandardMaterial>();
    app.insert_resource(VizSettings(config));
    app.add_plugins(PipelineVizPlugin);
    app
}

fn count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
    let mut query = app.world_mut().query_filtered::<Entity, F>();
    query.iter(app.world()).count()
}

#[test]
fn build_spawns_full_scene() {
    let mut app = test_app(VizConfig::default());
    app.update();

    assert_eq!(count::<With<VizRoot>>(&mut app), 1);
    assert_eq!(count::<With<NodeCube>>(&mut app), 44);
    assert_eq!(count::<With<ParticleBody>>(&mut app), 60);
    assert!(app.world().contains_resource::<VizTopology>());
    assert_eq!(app.world().resource::<NodeEntities>().0.len(), 44);

    let assets = app.world().resource::<VizAssets>();
    assert!(!assets.meshes.is_empty());
    assert!(!assets.materials.is_empty());
}

#[test]
fn teardown_releases_everything() {
    let mut app = test_app(VizConfig::default());
    app.update();
    assert_eq!(count::<With<NodeCube>>(&mut app), 44);

    app.world_mut().send_event(TeardownViz);
    app.update();
    app.update();

    assert_eq!(count::<With<VizRoot>>(&mut app), 0);
    assert_eq!(count::<With<NodeCube>>(&mut app), 0);
    assert_eq!(count::<With<ParticleBody>>(&mut app), 0);
    assert!(!app.world().contains_resource::<VizTopology>());
    assert!(!app.world().contains_resource::<NodeEntities>());

    let assets = app.world().resource::<VizAssets>();
    assert!(assets.meshes.is_empty());
    assert!(assets.materials.is_empty());
    assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 0);
    assert_eq!(app.world().resource::<Assets<StandardMaterial>>().len(), 0);
}

#[test]
fn rebuild_restores_scene_after_teardown() {
    let mut app = test_app(VizConfig::default());
    app.update();

    app.world_mut().send_event(TeardownViz);
    app.update();
    assert_eq!(count::<With<NodeCube>>(&mut app), 0);

    app.world_mut().send_event(RebuildViz);
    app.update();
    assert_eq!(count::<With<NodeCube>>(&mut app), 44);
    assert_eq!(count::<With<ParticleBody>>(&mut app), 60);
}

#[test]
fn config_change_repositions_nodes() {
    let mut app = test_app(VizConfig::default());
    app.update();

    {
        let mut settings = app.world_mut().resource_mut::<VizSettings>();
        settings.layer_spacing = 6.0;
        settings.node_spacing = 2.5;
        settings.x_offset = 1.0;
    }
    app.update();

    let expected = {
        let settings = app.world().resource::<VizSettings>();
        Topology::build(&settings.layout()).nodes[0].position
    };
    let node_zero = app.world().resource::<NodeEntities>().0[0];
    let transform = app.world().get::<Transform>(node_zero).unwrap();
    assert_eq!(transform.translation.x, expected.x);
    assert_eq!(transform.translation.y, expected.y);
    assert_eq!(transform.translation.z, expected.z);
}

#[test]
fn reposition_is_stable_across_frames() {
    let mut app = test_app(VizConfig::default());
    app.update();

    let node_zero = app.world().resource::<NodeEntities>().0[0];
    let first = *app.world().get::<Transform>(node_zero).unwrap();
    app.update();
    app.update();
    let later = *app.world().get::<Transform>(node_zero).unwrap();
    assert_eq!(first.translation, later.translation);
}

fn camera_translation(app: &mut App) -> Vec3 {
    let mut query = app
        .world_mut()
        .query_filtered::<&Transform, With<Camera3d>>();
    query.single(app.world()).unwrap().translation
}

#[test]
fn cinematic_orbit_yaws_fixed_camera() {
    let mut app = test_app(VizConfig {
        interactive: false,
        cinematic_mode: true,
        ..Default::default()
    });
    app.update();
    let start = camera_translation(&mut app);

    std::thread::sleep(std::time::Duration::from_millis(10));
    app.update();

    let moved = camera_translation(&mut app);
    assert_ne!(start, moved);
    assert!((start.length() - moved.length()).abs() < 1e-3);
}

#[test]
fn cinematic_orbit_leaves_orbit_camera_alone() {
    let mut app = test_app(VizConfig {
        cinematic_mode: true,
        ..Default::default()
    });
    app.update();
    app.update();
    let settled = camera_translation(&mut app);

    for _ in 0..3 {
        std::thread::sleep(std::time::Duration::from_millis(10));
        app.update();
    }
    assert_eq!(camera_translation(&mut app), settled);
}

#[test]
fn invalid_config_builds_nothing() {
    let mut app = test_app(VizConfig {
        layer_spacing: 0.0,
        ..Default::default()
    });
    app.update();

    assert_eq!(count::<With<VizRoot>>(&mut app), 0);
    assert_eq!(count::<With<NodeCube>>(&mut app), 0);
}
