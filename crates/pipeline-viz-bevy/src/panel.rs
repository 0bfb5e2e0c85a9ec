//! egui settings panel for exercising the live configuration.
//!
//! Edits are staged on a local copy and written back only when something
//! actually changed, so the reposition system is not retriggered every
//! frame by untouched sliders.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::geometry::RebuildViz;
use crate::scene::TeardownViz;
use crate::{VizRoot, VizSettings};

pub fn settings_panel(
    mut contexts: EguiContexts,
    mut settings: ResMut<VizSettings>,
    mut teardown: EventWriter<TeardownViz>,
    mut rebuild: EventWriter<RebuildViz>,
    mounted: Query<(), With<VizRoot>>,
) {
    let ctx = contexts.ctx_mut();
    egui::SidePanel::left("viz-settings")
        .default_width(230.0)
        .show(ctx, |ui| {
            ui.heading("Pipeline");
            ui.separator();

            let mut cfg = settings.0.clone();
            ui.label("Topology scale");
            ui.add(egui::Slider::new(&mut cfg.layer_spacing, 1.0..=8.0).text("layer spacing"));
            ui.add(egui::Slider::new(&mut cfg.node_spacing, 0.5..=4.0).text("node spacing"));

            ui.label("Offsets");
            ui.add(egui::Slider::new(&mut cfg.x_offset, -10.0..=10.0).text("x"));
            ui.add(egui::Slider::new(&mut cfg.y_offset, -10.0..=10.0).text("y"));
            ui.add(egui::Slider::new(&mut cfg.z_offset, -10.0..=10.0).text("z"));

            ui.separator();
            ui.checkbox(&mut cfg.cinematic_mode, "cinematic orbit");
            ui.checkbox(&mut cfg.show_bounding_box, "bounding box");
            ui.checkbox(&mut cfg.show_origin_marker, "origin marker");
            ui.checkbox(&mut cfg.enable_mouse_parallax, "mouse parallax");

            if cfg != settings.0 {
                settings.0 = cfg;
            }

            ui.separator();
            if mounted.is_empty() {
                if ui.button("Rebuild").clicked() {
                    rebuild.write(RebuildViz);
                }
            } else if ui.button("Tear down").clicked() {
                teardown.write(TeardownViz);
            }
        });
}
