use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Parameters of a circular orbit in the XZ plane, with an optional
/// vertical bob sharing the horizontal angle.
///
/// The position is a pure function of time: at phase zero and `t = 0` the
/// body sits at `(radius, vertical_radius, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    pub radius: f32,
    pub vertical_radius: f32,
    pub frequency: f32,
    pub phase: f32,
}

impl Orbit {
    /// Flat orbit of the given radius and angular frequency, phase zero.
    pub const fn flat(radius: f32, frequency: f32) -> Self {
        Self {
            radius,
            vertical_radius: 0.0,
            frequency,
            phase: 0.0,
        }
    }

    /// Position at simulated time `t`, relative to the orbit's center.
    pub fn position_at(&self, t: f32) -> Vec3 {
        let angle = self.frequency * t + self.phase;
        Vec3::new(
            self.radius * angle.cos(),
            self.vertical_radius * angle.cos(),
            self.radius * angle.sin(),
        )
    }
}
