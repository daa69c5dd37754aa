//! Marble character controller
//!
//! Converts held directions into one linear and one torque impulse each tick
//! (the torque is what visibly rolls the mesh) and gates the edge-triggered
//! jump on a short downward ground ray.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec3;
use log::debug;

use super::input::{Action, InputSnapshot, InputState, Subscription};
use crate::consts::{
    GROUND_RAY_RANGE, GROUND_TOI_THRESHOLD, IMPULSE_COEFF, JUMP_IMPULSE, MARBLE_RADIUS,
    RAY_CLEARANCE, TORQUE_COEFF,
};
use crate::physics::{DynamicBody, PhysicsWorld};

/// Controller tunables. `Default` mirrors the design constants.
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    pub impulse_coeff: f32,
    pub torque_coeff: f32,
    pub jump_impulse: f32,
    /// Radius of the marble's collider; the ground ray starts just below it.
    pub body_radius: f32,
    pub ground_ray_range: f32,
    pub ground_toi_threshold: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            impulse_coeff: IMPULSE_COEFF,
            torque_coeff: TORQUE_COEFF,
            jump_impulse: JUMP_IMPULSE,
            body_radius: MARBLE_RADIUS,
            ground_ray_range: GROUND_RAY_RANGE,
            ground_toi_threshold: GROUND_TOI_THRESHOLD,
        }
    }
}

impl ControllerConfig {
    /// Distance below the body center where the ground ray starts.
    /// Exceeds the collider radius so the ray cannot start inside the marble.
    pub fn ray_origin_drop(&self) -> f32 {
        self.body_radius + RAY_CLEARANCE
    }
}

/// Sum of the directional impulse and torque contributions.
///
/// Held directions combine additively: forward is a -Z impulse with a -X
/// rolling torque, rightward a +X impulse with a -Z torque, and backward and
/// leftward mirror the signs.
pub fn directional_impulses(
    keys: &InputSnapshot,
    impulse_strength: f32,
    torque_strength: f32,
) -> (Vec3, Vec3) {
    let mut impulse = Vec3::ZERO;
    let mut torque = Vec3::ZERO;

    if keys.forward {
        impulse.z -= impulse_strength;
        torque.x -= torque_strength;
    }
    if keys.rightward {
        impulse.x += impulse_strength;
        torque.z -= torque_strength;
    }
    if keys.backward {
        impulse.z += impulse_strength;
        torque.x += torque_strength;
    }
    if keys.leftward {
        impulse.x -= impulse_strength;
        torque.z += torque_strength;
    }

    (impulse, torque)
}

/// Per-frame steering of the marble body.
pub struct CharacterController {
    config: ControllerConfig,
    jump_requested: Rc<Cell<bool>>,
    // Held so the edge handler dies with the controller.
    _jump_subscription: Subscription,
}

impl CharacterController {
    /// Wires the jump edge handler into `input`.
    ///
    /// The handler only latches a request; the ground check and the impulse
    /// happen inside the next [`tick`](Self::tick). The subscription is
    /// released when the controller is dropped, so a later edge can never
    /// fire into a torn-down controller.
    pub fn new(input: &InputState, config: ControllerConfig) -> Self {
        let jump_requested = Rc::new(Cell::new(false));
        let latch = Rc::clone(&jump_requested);
        let subscription = input.subscribe(Action::Jump, move |pressed| {
            if pressed {
                latch.set(true);
            }
        });
        Self {
            config,
            jump_requested,
            _jump_subscription: subscription,
        }
    }

    /// Advance one frame.
    ///
    /// Directional contributions are summed first and applied with exactly
    /// one impulse call and one torque call, then a latched jump request is
    /// resolved against the ground ray. While the body is not attached yet
    /// the tick is a no-op; a latched jump is still consumed, never buffered.
    pub fn tick<W, B>(&mut self, dt: f32, keys: &InputSnapshot, world: &W, body: Option<&mut B>)
    where
        W: PhysicsWorld + ?Sized,
        B: DynamicBody + ?Sized,
    {
        let jump_requested = self.jump_requested.replace(false);
        let Some(body) = body else {
            return;
        };

        let (impulse, torque) = directional_impulses(
            keys,
            self.config.impulse_coeff * dt,
            self.config.torque_coeff * dt,
        );
        body.apply_impulse(impulse);
        body.apply_torque_impulse(torque);

        if jump_requested {
            self.try_jump(world, body);
        }
    }

    /// Grounded check: a downward ray from just below the collider. An
    /// airborne request is dropped, not queued.
    fn try_jump<W, B>(&self, world: &W, body: &mut B)
    where
        W: PhysicsWorld + ?Sized,
        B: DynamicBody + ?Sized,
    {
        let origin = body.translation() - Vec3::new(0.0, self.config.ray_origin_drop(), 0.0);
        match world.cast_ray(origin, Vec3::NEG_Y, self.config.ground_ray_range, true) {
            Some(hit) if hit.toi < self.config.ground_toi_threshold => {
                body.apply_impulse(Vec3::new(0.0, self.config.jump_impulse, 0.0));
            }
            _ => debug!("jump ignored while airborne"),
        }
    }
}
