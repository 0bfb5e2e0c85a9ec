//! Pointer interaction: drag panning and mouse parallax.
//!
//! Drag panning is active only when the camera's orbit rotation is off;
//! the two interaction modes are mutually exclusive. Dragging feeds the
//! layout offsets on the live config, which the reposition system picks up
//! through change detection.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::scene::CAMERA_START;
use crate::VizSettings;

/// Pointer delta to offset-units factor.
const DRAG_SCALE: f32 = 0.1;
/// Maximum camera displacement from parallax, in world units.
const PARALLAX_RANGE: Vec2 = Vec2::new(1.5, 1.0);

/// Accumulate pointer drags into the x/y layout offsets. The y axis is
/// inverted to map screen-down onto world-down.
pub fn drag_pan(
    mut settings: ResMut<VizSettings>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    mut motion: EventReader<MouseMotion>,
) {
    if !settings.interactive || settings.enable_rotation {
        motion.clear();
        return;
    }
    let Some(buttons) = buttons else {
        return;
    };
    if !buttons.pressed(MouseButton::Left) {
        motion.clear();
        return;
    }
    let mut delta = Vec2::ZERO;
    for event in motion.read() {
        delta += event.delta;
    }
    if delta == Vec2::ZERO {
        return;
    }
    settings.x_offset += delta.x * DRAG_SCALE;
    settings.y_offset -= delta.y * DRAG_SCALE;
}

/// Nudge the camera toward the cursor when the visualization is embedded
/// as a non-interactive background.
pub fn mouse_parallax(
    settings: Res<VizSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    if !settings.enable_mouse_parallax || settings.interactive {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    // Cursor position normalized to [-1, 1] on both axes.
    let nx = cursor.x / window.width() * 2.0 - 1.0;
    let ny = cursor.y / window.height() * 2.0 - 1.0;
    let target = CAMERA_START + Vec3::new(nx * PARALLAX_RANGE.x, -ny * PARALLAX_RANGE.y, 0.0);
    for mut transform in &mut cameras {
        transform.translation = transform.translation.lerp(target, 0.05);
        transform.look_at(Vec3::ZERO, Vec3::Y);
    }
}
