//! Physics backend contract
//!
//! The gameplay core drives the marble through these traits. Integration,
//! collision resolution and the broad/narrow phase belong to the backend
//! (`rapier` module); the controller only casts rays and applies impulses.

pub mod rapier;

use glam::{Quat, Vec3};

/// A ray hit, reported as the time-of-impact along the ray direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub toi: f32,
}

/// Spatial queries against the simulated scene.
pub trait PhysicsWorld {
    /// Cast a ray and return the nearest hit within `max_toi`.
    ///
    /// `solid` treats shapes as filled, so a ray starting inside one reports
    /// a time-of-impact of zero. Sensor colliders never produce hits.
    fn cast_ray(&self, origin: Vec3, dir: Vec3, max_toi: f32, solid: bool) -> Option<RayHit>;
}

/// The single dynamic body under player control.
///
/// The controller never sets position or velocity directly; all motion goes
/// through impulses.
pub trait DynamicBody {
    fn translation(&self) -> Vec3;
    fn rotation(&self) -> Quat;
    /// Instantaneous change of linear momentum.
    fn apply_impulse(&mut self, impulse: Vec3);
    /// Instantaneous change of angular momentum.
    fn apply_torque_impulse(&mut self, torque: Vec3);
}
