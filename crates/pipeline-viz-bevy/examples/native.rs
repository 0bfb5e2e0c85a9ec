//! Native desktop runner for pipeline-viz-bevy development.
//!
//! Run with: cargo run --example native
//! Tweak spacing/offsets live from the side panel; "Tear down" exercises
//! the full resource-release path.

use bevy::log::LogPlugin;
use bevy::prelude::*;

use pipeline_viz_bevy::{PipelineVizPlugin, VizOverlayPlugin, VizPanelPlugin, VizSettings};
use pipeline_viz_core::VizConfig;

fn main() {
    #[cfg(debug_assertions)]
    {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(
                EnvFilter::from_default_env()
                    .add_directive("pipeline_viz_bevy=debug".parse().unwrap()),
            )
            .init();
    }

    let config = VizConfig {
        show_origin_marker: true,
        ..Default::default()
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Pipeline Viz - Development".into(),
                        resolution: (1280.0, 800.0).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(VizSettings(config))
        .add_plugins((PipelineVizPlugin, VizOverlayPlugin, VizPanelPlugin))
        .run();
}
