//! Third-person trailing camera
//!
//! A single-pole low-pass filter lags the camera behind the marble. The
//! interpolation fraction is clamped to 1 so a stalled frame lands the
//! camera exactly on target instead of flying past it.

use glam::{Mat4, Vec3};

use crate::consts::{CAMERA_LOOK_OFFSET, CAMERA_OFFSET, CAMERA_SMOOTH_RATE, CAMERA_START};

/// Position and aim of the active camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraTransform {
    /// Right-handed view matrix, +Y up, for whatever renderer consumes it.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self {
            position: CAMERA_START,
            look_at: Vec3::ZERO,
        }
    }
}

/// Exponential smoothing state, created once at startup and never reset.
pub struct CameraRig {
    smoothed_position: Vec3,
    smoothed_target: Vec3,
    smooth_rate: f32,
    offset: Vec3,
    look_offset: Vec3,
}

impl CameraRig {
    pub fn new(smooth_rate: f32, offset: Vec3, look_offset: Vec3) -> Self {
        Self {
            smoothed_position: CAMERA_START,
            smoothed_target: Vec3::ZERO,
            smooth_rate,
            offset,
            look_offset,
        }
    }

    /// Advance one frame toward the marble and write the result into `camera`.
    pub fn tick(&mut self, dt: f32, body_pos: Vec3, camera: &mut CameraTransform) {
        let target_position = body_pos + self.offset;
        let target_look = body_pos + self.look_offset;

        let t = smoothing_fraction(self.smooth_rate, dt);
        self.smoothed_position = self.smoothed_position.lerp(target_position, t);
        self.smoothed_target = self.smoothed_target.lerp(target_look, t);

        camera.position = self.smoothed_position;
        camera.look_at = self.smoothed_target;
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CAMERA_SMOOTH_RATE, CAMERA_OFFSET, CAMERA_LOOK_OFFSET)
    }
}

/// Interpolation fraction for one frame, clamped to `[0, 1]`.
pub fn smoothing_fraction(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fraction_scales_with_dt() {
        assert!((smoothing_fraction(5.0, 1.0 / 60.0) - 5.0 / 60.0).abs() < 1e-6);
        assert_eq!(smoothing_fraction(5.0, 10.0), 1.0);
        assert_eq!(smoothing_fraction(5.0, -1.0), 0.0);
    }

    #[test]
    fn test_spike_lands_exactly_on_target() {
        let mut rig = CameraRig::default();
        let mut camera = CameraTransform::default();
        let body = Vec3::new(1.0, 0.3, -4.0);

        // dt large enough that the clamped fraction is exactly 1
        rig.tick(10.0, body, &mut camera);
        assert_eq!(camera.position, body + CAMERA_OFFSET);
        assert_eq!(camera.look_at, body + CAMERA_LOOK_OFFSET);
        assert!(camera.view_matrix().is_finite());
    }

    #[test]
    fn test_idempotent_at_rest() {
        let mut rig = CameraRig::default();
        let mut camera = CameraTransform::default();
        let body = Vec3::new(-2.0, 0.3, 3.0);

        // converge, then tick again with the body unmoved
        rig.tick(10.0, body, &mut camera);
        let settled = camera;
        rig.tick(1.0 / 60.0, body, &mut camera);
        assert_eq!(camera, settled);
    }

    #[test]
    fn test_lags_behind_moving_body() {
        let mut rig = CameraRig::default();
        let mut camera = CameraTransform::default();

        rig.tick(1.0 / 60.0, Vec3::ZERO, &mut camera);
        let target = Vec3::ZERO + CAMERA_OFFSET;
        assert!(camera.position.distance(target) > 0.0, "one tick must not snap");

        // repeated ticks converge toward the target
        let before = camera.position.distance(target);
        for _ in 0..120 {
            rig.tick(1.0 / 60.0, Vec3::ZERO, &mut camera);
        }
        assert!(camera.position.distance(target) < before * 1e-3);
    }

    proptest! {
        /// The post-tick smoothed position lies on the segment between its
        /// pre-tick value and the target, for any non-negative dt.
        #[test]
        fn prop_never_overshoots(
            dt in 0.0f32..10.0,
            bx in -50.0f32..50.0,
            by in -50.0f32..50.0,
            bz in -50.0f32..50.0,
        ) {
            let mut rig = CameraRig::default();
            let mut camera = CameraTransform::default();
            let body = Vec3::new(bx, by, bz);
            let target = body + CAMERA_OFFSET;

            let before = CAMERA_START;
            rig.tick(dt, body, &mut camera);
            let after = camera.position;

            let full = before.distance(target);
            let travelled = before.distance(after);
            let remaining = after.distance(target);

            // on-segment: distances add up and neither leg exceeds the whole
            prop_assert!(travelled <= full + 1e-3);
            prop_assert!(remaining <= full + 1e-3);
            prop_assert!((travelled + remaining - full).abs() < 1e-2);
        }
    }
}
