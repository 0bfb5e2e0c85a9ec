//! pviz - launch the animated data-pipeline visualization.
//!
//! Every configuration prop is exposed as a flag; flags override an
//! optional JSON config file, which overrides the built-in defaults.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use tracing::{info, Level};

use pipeline_viz_bevy::{PipelineVizPlugin, VizOverlayPlugin, VizPanelPlugin, VizSettings};
use pipeline_viz_core::VizConfig;

/// Animated 3D neural-network data-pipeline visualization.
#[derive(Parser, Debug)]
#[command(name = "pviz", author, version, about, long_about = None, allow_negative_numbers = true)]
struct Cli {
    /// Load configuration from a JSON file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    dump_config: bool,

    /// Disable all pointer interaction.
    #[arg(long)]
    no_interactive: bool,

    /// Disable orbit rotation; dragging pans the topology instead.
    #[arg(long)]
    no_rotation: bool,

    /// Horizontal spacing between layers.
    #[arg(long)]
    layer_spacing: Option<f32>,

    /// Grid spacing within a layer.
    #[arg(long)]
    node_spacing: Option<f32>,

    /// Override spacing for the input pixel grid.
    #[arg(long)]
    input_spacing: Option<f32>,

    /// Topology offsets.
    #[arg(long)]
    x_offset: Option<f32>,
    #[arg(long)]
    y_offset: Option<f32>,
    #[arg(long)]
    z_offset: Option<f32>,

    /// Whole-group placement overrides.
    #[arg(long)]
    position_x: Option<f32>,
    #[arg(long)]
    position_y: Option<f32>,
    #[arg(long)]
    position_z: Option<f32>,

    /// Whole-group rotation overrides, in radians.
    #[arg(long)]
    rotation_x: Option<f32>,
    #[arg(long)]
    rotation_y: Option<f32>,
    #[arg(long)]
    rotation_z: Option<f32>,

    /// Number of flowing particles.
    #[arg(long)]
    particles: Option<usize>,

    /// Slow automatic camera orbit.
    #[arg(long)]
    cinematic: bool,

    /// Draw the topology bounding box.
    #[arg(long)]
    bounding_box: bool,

    /// Draw the origin axes marker.
    #[arg(long)]
    origin_marker: bool,

    /// Camera parallax following the cursor (non-interactive mode).
    #[arg(long)]
    parallax: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

impl Cli {
    /// Fold the flags over a base configuration.
    fn apply(&self, mut config: VizConfig) -> VizConfig {
        if self.no_interactive {
            config.interactive = false;
        }
        if self.no_rotation {
            config.enable_rotation = false;
        }
        if let Some(v) = self.layer_spacing {
            config.layer_spacing = v;
        }
        if let Some(v) = self.node_spacing {
            config.node_spacing = v;
        }
        if let Some(v) = self.input_spacing {
            config.input_spacing = Some(v);
        }
        if let Some(v) = self.x_offset {
            config.x_offset = v;
        }
        if let Some(v) = self.y_offset {
            config.y_offset = v;
        }
        if let Some(v) = self.z_offset {
            config.z_offset = v;
        }
        if let Some(v) = self.position_x {
            config.position_x = v;
        }
        if let Some(v) = self.position_y {
            config.position_y = v;
        }
        if let Some(v) = self.position_z {
            config.position_z = v;
        }
        if let Some(v) = self.rotation_x {
            config.rotation_x = v;
        }
        if let Some(v) = self.rotation_y {
            config.rotation_y = v;
        }
        if let Some(v) = self.rotation_z {
            config.rotation_z = v;
        }
        if let Some(v) = self.particles {
            config.particle_count = v;
        }
        if self.cinematic {
            config.cinematic_mode = true;
        }
        if self.bounding_box {
            config.show_bounding_box = true;
        }
        if self.origin_marker {
            config.show_origin_marker = true;
        }
        if self.parallax {
            config.enable_mouse_parallax = true;
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let base = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            VizConfig::from_json(&json).context("parsing config file")?
        }
        None => VizConfig::default(),
    };
    let config = cli.apply(base);
    config.validate().context("invalid configuration")?;

    if cli.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    info!(
        particles = config.particle_count,
        interactive = config.interactive,
        "starting visualization"
    );

    App::new()
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Data Pipeline".into(),
                        resolution: (1280.0, 800.0).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(VizSettings(config))
        .add_plugins((PipelineVizPlugin, VizOverlayPlugin, VizPanelPlugin))
        .run();

    Ok(())
}
