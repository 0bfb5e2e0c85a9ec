//! Particle progress simulation along topology edges.
//!
//! A particle travels from the source node of its edge to the target,
//! advancing `progress` by `speed` once per reference frame. On arrival the
//! renderer assigns it a fresh random edge via [`ParticleState::restart`].
//! All randomness stays with the caller so this module is deterministic.

use serde::{Deserialize, Serialize};

use crate::topology::EdgeSpec;

/// Slowest per-frame progress increment.
pub const BASE_SPEED: f32 = 0.002;
/// Width of the random speed range above [`BASE_SPEED`].
pub const SPEED_RANGE: f32 = 0.004;

/// Mutable state of one particle in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleState {
    /// Edge the particle is currently traveling along.
    pub edge: EdgeSpec,
    /// Travel progress in `[0, 1]` from source to target.
    pub progress: f32,
    /// Per-frame progress increment, fixed at creation.
    pub speed: f32,
}

/// Outcome of one animation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleStep {
    /// Still in transit; carries the interpolation factor to apply.
    Advanced(f32),
    /// Progress crossed 1.0; the particle needs a new edge.
    Arrived,
}

impl ParticleState {
    pub fn new(edge: EdgeSpec, speed: f32, progress: f32) -> Self {
        Self {
            edge,
            progress,
            speed,
        }
    }

    /// Map a unit random value to a travel speed. At 60 fps the resulting
    /// range of 0.002..0.006 crosses one edge in roughly 3 to 8 seconds.
    pub fn speed_from_unit(r: f32) -> f32 {
        BASE_SPEED + r.clamp(0.0, 1.0) * SPEED_RANGE
    }

    /// Advance by `dt_frames` reference frames (1.0 = one 60 fps frame).
    pub fn tick(&mut self, dt_frames: f32) -> ParticleStep {
        self.progress += self.speed * dt_frames;
        if self.progress > 1.0 {
            ParticleStep::Arrived
        } else {
            ParticleStep::Advanced(self.progress)
        }
    }

    /// Begin traveling a new edge from its source, with progress reset to
    /// exactly zero.
    pub fn restart(&mut self, edge: EdgeSpec) {
        self.edge = edge;
        self.progress = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn speed_mapping_covers_documented_range() {
        assert_eq!(ParticleState::speed_from_unit(0.0), BASE_SPEED);
        assert_eq!(ParticleState::speed_from_unit(1.0), BASE_SPEED + SPEED_RANGE);
    }

    #[test]
    fn progress_cycle_arrives_after_ceil_inverse_speed_ticks() {
        let speed = 0.003;
        let ticks = (1.0f32 / speed).ceil() as usize;
        let mut particle = ParticleState::new(EdgeSpec { from: 0, to: 9 }, speed, 0.0);
        for _ in 0..ticks - 1 {
            assert!(matches!(particle.tick(1.0), ParticleStep::Advanced(_)));
        }
        assert_eq!(particle.tick(1.0), ParticleStep::Arrived);
        assert!(particle.progress > 1.0);

        particle.restart(EdgeSpec { from: 9, to: 21 });
        assert_eq!(particle.progress, 0.0);
        assert_eq!(particle.edge, EdgeSpec { from: 9, to: 21 });
    }

    #[test]
    fn color_blend_matches_endpoints() {
        let source = Rgb::new(0.13, 0.83, 0.93);
        let target = Rgb::new(0.29, 0.87, 0.50);
        let mut particle = ParticleState::new(EdgeSpec { from: 0, to: 34 }, 0.25, 0.0);

        // At progress 0 the particle wears the source color.
        assert_eq!(source.lerp(target, particle.progress), source);

        // Just before reassignment the blend reaches the target color.
        while let ParticleStep::Advanced(t) = particle.tick(1.0) {
            let blended = source.lerp(target, t);
            if (t - 1.0).abs() < f32::EPSILON {
                assert_eq!(blended, target);
            }
        }
        assert_eq!(source.lerp(target, 1.0), target);
    }

    #[test]
    fn fractional_frames_scale_progress() {
        let mut particle = ParticleState::new(EdgeSpec { from: 0, to: 9 }, 0.01, 0.0);
        particle.tick(0.5);
        assert!((particle.progress - 0.005).abs() < 1e-6);
    }
}
