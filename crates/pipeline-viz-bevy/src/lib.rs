//! Bevy renderer for the data-pipeline visualization.
//!
//! [`PipelineVizPlugin`] owns the full lifecycle: scene bootstrap, geometry
//! instantiation, per-frame particle animation, interaction, reactive
//! reposition on config change, and explicit teardown. It is headless-safe
//! (no gizmo or egui dependency) so integration tests can drive it with
//! `MinimalPlugins`. [`VizOverlayPlugin`] adds the gizmo overlays and
//! [`VizPanelPlugin`] the egui settings panel; both expect the usual
//! windowed `DefaultPlugins` stack.

mod animate;
mod geometry;
mod interact;
mod overlay;
mod panel;
mod reposition;
mod scene;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_panorbit_camera::PanOrbitCameraPlugin;

use pipeline_viz_core::{ParticleState, Point3, Rgb, Topology, VizConfig};

pub use geometry::{NodeEntities, RebuildViz, VizAssets};
pub use scene::TeardownViz;

/// Live configuration resource. Mutating it (sliders, drag panning, host
/// code) triggers the reposition system through change detection.
#[derive(Resource, Debug, Clone, Default, Deref, DerefMut)]
pub struct VizSettings(pub VizConfig);

/// Built topology kept alive for particle routing and repositioning.
#[derive(Resource, Debug, Clone)]
pub struct VizTopology(pub Topology);

/// Root of the spawned scene graph; despawning it takes every node, line,
/// and particle with it.
#[derive(Component)]
pub struct VizRoot;

/// Solid cuboid for one topology node.
#[derive(Component)]
pub struct NodeCube {
    pub id: usize,
}

/// Translucent back-face glow shell around a node cube.
#[derive(Component)]
pub struct NodeGlow;

/// The single retained line mesh holding every edge segment.
#[derive(Component)]
pub struct EdgeLines;

/// A moving sphere traveling along topology edges.
#[derive(Component)]
pub struct ParticleBody {
    pub state: ParticleState,
}

/// Core visualization lifecycle: bootstrap, geometry, animation,
/// interaction, reposition, teardown.
pub struct PipelineVizPlugin;

impl Plugin for PipelineVizPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanOrbitCameraPlugin)
            .init_resource::<VizSettings>()
            .init_resource::<VizAssets>()
            .add_event::<TeardownViz>()
            .add_event::<RebuildViz>()
            .add_systems(Startup, scene::setup_scene)
            .add_systems(
                Update,
                (
                    geometry::spawn_visualization,
                    reposition::apply_layout_changes.after(geometry::spawn_visualization),
                    animate::advance_particles.after(reposition::apply_layout_changes),
                    animate::hold_node_rotation,
                    animate::cinematic_orbit,
                    interact::drag_pan,
                    interact::mouse_parallax,
                    scene::handle_teardown,
                ),
            );
    }
}

/// Gizmo overlays: topology bounding box and origin axes marker.
pub struct VizOverlayPlugin;

impl Plugin for VizOverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, overlay::draw_overlays);
    }
}

/// egui side panel exposing the live configuration.
pub struct VizPanelPlugin;

impl Plugin for VizPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: false,
        })
        .add_systems(Update, panel::settings_panel);
    }
}

/// Convert a domain point to a render-space vector.
pub fn to_vec3(p: Point3) -> Vec3 {
    Vec3::new(p.x, p.y, p.z)
}

/// Convert a domain color to a Bevy sRGB color.
pub fn to_color(c: Rgb) -> Color {
    Color::srgb(c.r, c.g, c.b)
}
