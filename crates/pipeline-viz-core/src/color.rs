//! RGB colors and interpolation for nodes and particles.

use serde::{Deserialize, Serialize};

/// An RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation between two colors using `t` as the blend
    /// factor. Exact at the boundaries: `t <= 0` yields `self`, `t >= 1`
    /// yields `other`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        if t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return other;
        }
        Rgb::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        let a = Rgb::new(0.1, 0.5, 0.9);
        let b = Rgb::new(0.8, 0.2, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn lerp_saturates_outside_range() {
        let a = Rgb::new(0.0, 0.0, 0.0);
        let b = Rgb::new(1.0, 1.0, 1.0);
        assert_eq!(a.lerp(b, 2.5), b);
        assert_eq!(a.lerp(b, -1.0), a);
    }
}
