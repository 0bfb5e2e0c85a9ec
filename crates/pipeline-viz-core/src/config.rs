//! The visualization's configuration surface.
//!
//! One immutable-by-convention struct covers everything a host can set:
//! interaction mode, topology scale, whole-topology placement, and the
//! cosmetic toggles. Renderers keep a live copy and re-derive layout from
//! it whenever it changes.

use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};
use crate::topology::LayoutParams;

/// Full configuration for one visualization instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Enables camera/drag interaction.
    pub interactive: bool,
    /// Orbit-style camera rotation. When off while `interactive` is on,
    /// pointer dragging pans the topology instead.
    pub enable_rotation: bool,

    /// Horizontal distance unit between consecutive layers.
    pub layer_spacing: f32,
    /// Grid cell size within a layer.
    pub node_spacing: f32,
    /// Optional override for the input grid's cell size.
    pub input_spacing: Option<f32>,
    pub x_offset: f32,
    pub y_offset: f32,
    pub z_offset: f32,

    /// Whole-topology placement overrides, for embedding the visualization
    /// as a background element.
    pub position_x: f32,
    pub position_y: f32,
    pub position_z: f32,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub rotation_z: f32,

    /// Size of the particle pool.
    pub particle_count: usize,

    pub cinematic_mode: bool,
    pub show_bounding_box: bool,
    pub show_origin_marker: bool,
    pub enable_mouse_parallax: bool,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            interactive: true,
            enable_rotation: true,
            layer_spacing: 3.6,
            node_spacing: 2.2,
            input_spacing: None,
            x_offset: 0.0,
            y_offset: 0.0,
            z_offset: 0.0,
            position_x: 0.0,
            position_y: 0.0,
            position_z: 0.0,
            rotation_x: 0.0,
            rotation_y: 0.0,
            rotation_z: 0.0,
            particle_count: 60,
            cinematic_mode: false,
            show_bounding_box: false,
            show_origin_marker: false,
            enable_mouse_parallax: false,
        }
    }
}

impl VizConfig {
    /// Project the layout-relevant subset.
    pub fn layout(&self) -> LayoutParams {
        LayoutParams {
            layer_spacing: self.layer_spacing,
            node_spacing: self.node_spacing,
            input_spacing: self.input_spacing,
            x_offset: self.x_offset,
            y_offset: self.y_offset,
            z_offset: self.z_offset,
        }
    }

    /// Validate spacings and the particle pool size.
    pub fn validate(&self) -> VizResult<()> {
        self.layout().validate()?;
        if self.particle_count == 0 {
            return Err(VizError::EmptyParticlePool);
        }
        Ok(())
    }

    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> VizResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> VizResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        VizConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_particles_rejected() {
        let config = VizConfig {
            particle_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(VizError::EmptyParticlePool)
        ));
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let config = VizConfig {
            layer_spacing: 6.0,
            node_spacing: 2.5,
            cinematic_mode: true,
            ..Default::default()
        };
        let json = config.to_json_pretty().unwrap();
        assert_eq!(VizConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = VizConfig::from_json(r#"{"layer_spacing": 5.0}"#).unwrap();
        assert_eq!(config.layer_spacing, 5.0);
        assert_eq!(config.particle_count, 60);
        assert!(config.interactive);
    }
}
