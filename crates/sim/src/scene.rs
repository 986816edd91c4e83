use crate::orbit::Orbit;
use glam::Vec3;
use orrery_common::Transform;

/// Distance behind a followed body, along the camera's forward direction.
pub const FOLLOW_DISTANCE: f32 = 1.5;

/// Angular rate of the cosmetic spin accumulator, radians per second of
/// real (clamped) delta time.
pub const SPIN_RATE: f32 = 2.5;

const COMET_ORBIT: Orbit = Orbit {
    radius: 35.0,
    vertical_radius: 2.0,
    frequency: 0.85,
    phase: 0.0,
};
const PLANET_ORBIT: Orbit = Orbit::flat(20.0, 1.0);
const MOON_ORBIT: Orbit = Orbit::flat(4.0, 1.0);
const PROBE_ORBIT: Orbit = Orbit::flat(1.0, 2.5);

const COMET_SIZE: f32 = 1.5;
const SUN_SIZE: f32 = 3.0;

/// Which body a state belongs to, in draw order (sun drawn last).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    Comet,
    Planet,
    Moon,
    Probe,
    Sun,
}

/// One tick's resolved body transforms, all derived from simulated time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneFrame {
    pub comet: Transform,
    pub planet: Transform,
    pub moon: Transform,
    pub probe: Transform,
    pub sun: Transform,
}

/// The fixed five-body scene.
///
/// Positions are analytic: the hierarchy sun -> planet -> moon -> probe is
/// expressed by adding each child's orbital offset to its parent's already
/// computed position, never by a stored parent/child graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scene;

impl Scene {
    /// Evaluate all body transforms at simulated time `t`, with the
    /// cosmetic spin accumulator `spin` feeding the rotation expressions.
    pub fn evaluate(t: f32, spin: f32) -> SceneFrame {
        let comet_pos = COMET_ORBIT.position_at(t);
        let planet_pos = PLANET_ORBIT.position_at(t);
        let moon_pos = planet_pos + MOON_ORBIT.position_at(t);
        let probe_pos = moon_pos + PROBE_ORBIT.position_at(t);

        let planet_size = COMET_SIZE * 0.5;
        let moon_size = planet_size * 0.5;
        let probe_size = moon_size * 0.5;

        SceneFrame {
            comet: Transform {
                position: comet_pos,
                rotation: Vec3::new((-25.0f32).to_radians(), spin * 1.25, 0.0),
                scale: Vec3::splat(COMET_SIZE),
            },
            planet: Transform {
                position: planet_pos,
                rotation: Vec3::new(20.0f32.to_radians(), spin, 0.0),
                scale: Vec3::splat(planet_size),
            },
            moon: Transform {
                position: moon_pos,
                rotation: Vec3::ZERO,
                scale: Vec3::splat(moon_size),
            },
            probe: Transform {
                position: probe_pos,
                rotation: Vec3::new(spin * 2.0, spin * 1.2, -spin),
                scale: Vec3::splat(probe_size),
            },
            sun: Transform {
                position: Vec3::ZERO,
                rotation: Vec3::new(0.0, spin, 0.0),
                scale: Vec3::splat(SUN_SIZE),
            },
        }
    }

    /// Position of a single body at time `t`. Follow mode uses this to
    /// chase a body without evaluating the whole frame twice.
    pub fn body_position(body: Body, t: f32) -> Vec3 {
        let frame = Self::evaluate(t, 0.0);
        match body {
            Body::Comet => frame.comet.position,
            Body::Planet => frame.planet.position,
            Body::Moon => frame.moon.position,
            Body::Probe => frame.probe.position,
            Body::Sun => frame.sun.position,
        }
    }
}
