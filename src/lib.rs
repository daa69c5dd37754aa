//! Marble Dash - a physics-driven marble time-trial
//!
//! Core modules:
//! - `sim`: Frame-driven gameplay core (input, controller, camera, session clock)
//! - `physics`: Physics backend contract and the Rapier3D adapter
//! - `hud`: Frame-synchronized overlay readout
//! - `settings`: Data-driven movement/camera tuning

pub mod hud;
pub mod physics;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{
    Action, CameraRig, CameraTransform, CharacterController, ControllerConfig, InputSnapshot,
    InputState, SessionPhase, SessionStore,
};

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Nominal scheduler timestep (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Widest frame delta fed into the simulation (tab-stall guard)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Linear impulse per held direction, scaled by the frame delta
    pub const IMPULSE_COEFF: f32 = 0.6;
    /// Torque impulse per held direction, scaled by the frame delta
    pub const TORQUE_COEFF: f32 = 0.2;

    /// Marble collider radius
    pub const MARBLE_RADIUS: f32 = 0.3;
    /// Clearance between the collider surface and the ground-ray origin
    pub const RAY_CLEARANCE: f32 = 0.01;
    /// Maximum distance probed by the ground ray
    pub const GROUND_RAY_RANGE: f32 = 10.0;
    /// Time-of-impact below which the marble counts as grounded (strict `<`)
    pub const GROUND_TOI_THRESHOLD: f32 = 0.15;
    /// Vertical impulse applied on a grounded jump
    pub const JUMP_IMPULSE: f32 = 0.5;

    /// Camera position offset from the marble (third-person trailing view)
    pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 0.65, 2.25);
    /// Camera look-at offset from the marble
    pub const CAMERA_LOOK_OFFSET: Vec3 = Vec3::new(0.0, 0.25, 0.0);
    /// Exponential smoothing rate for the camera lag
    pub const CAMERA_SMOOTH_RATE: f32 = 5.0;
    /// Camera position before the first frame (fly-in on level load)
    pub const CAMERA_START: Vec3 = Vec3::new(10.0, 10.0, 10.0);

    /// Marble spawn point
    pub const SPAWN_POSITION: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    /// Z coordinate of the goal sensor strip
    pub const GOAL_LINE_Z: f32 = -16.0;
    /// Height below which the marble has left the track and the run resets
    pub const FALL_RESET_Y: f32 = -4.0;
}
