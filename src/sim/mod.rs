//! Frame-driven gameplay core
//!
//! Everything here is deterministic and backend-agnostic:
//! - Components read the per-frame input snapshot and the session clock
//! - The physics world is touched only through the `physics` contract traits
//! - One writer per piece of state per frame, in the scheduler's fixed order

pub mod camera;
pub mod controller;
pub mod input;
pub mod session;

pub use camera::{CameraRig, CameraTransform, smoothing_fraction};
pub use controller::{CharacterController, ControllerConfig, directional_impulses};
pub use input::{Action, InputSnapshot, InputState, Subscription};
pub use session::{SessionPhase, SessionStore, compute_elapsed};
