//! Marble Dash entry point
//!
//! Builds the demo level, wires the gameplay components once at startup and
//! drives a scripted headless run. Every frame runs the fixed order:
//! controller, physics integration, camera, session triggers, timer readout.

use marble_dash::consts::{FALL_RESET_Y, FRAME_DT, MAX_FRAME_DT};
use marble_dash::hud::{self, TextOverlay};
use marble_dash::physics::rapier::RapierWorld;
use marble_dash::{
    Action, CameraRig, CameraTransform, CharacterController, InputState, SessionPhase,
    SessionStore, Settings,
};

struct App {
    input: InputState,
    controller: CharacterController,
    camera_rig: CameraRig,
    camera: CameraTransform,
    session: SessionStore,
    overlay: TextOverlay,
    world: RapierWorld,
    /// Milliseconds on the app clock, advanced by the frame deltas
    now_ms: f64,
}

impl App {
    fn new(settings: &Settings) -> Self {
        let mut world = RapierWorld::new();
        world.build_level();

        let input = InputState::new();
        let controller = CharacterController::new(&input, settings.controller_config());
        let camera_rig = CameraRig::new(
            settings.camera_smooth_rate,
            settings.camera_offset,
            settings.camera_look_offset,
        );

        Self {
            input,
            controller,
            camera_rig,
            camera: CameraTransform::default(),
            session: SessionStore::new(),
            overlay: TextOverlay::new(),
            world,
            now_ms: 0.0,
        }
    }

    /// One scheduler callback.
    fn frame(&mut self, dt: f32) {
        let dt = dt.min(MAX_FRAME_DT);
        self.now_ms += f64::from(dt) * 1000.0;
        let keys = self.input.snapshot();

        // the first input of a run starts the clock
        if self.session.phase() == SessionPhase::Ready && keys.any_held() {
            self.session.start(self.now_ms);
        }

        {
            let (scene, mut body) = self.world.split_mut();
            self.controller.tick(dt, &keys, &scene, body.as_mut());
        }
        self.world.step(dt);

        if let Some(pos) = self.world.marble_translation() {
            self.camera_rig.tick(dt, pos, &mut self.camera);

            if self.session.phase() == SessionPhase::Playing {
                if self.world.marble_at_goal() {
                    self.session.end(self.now_ms);
                } else if pos.y < FALL_RESET_Y {
                    log::info!("marble left the track, resetting");
                    self.session.restart();
                    self.world.reset_marble();
                }
            }
        }

        hud::sync_overlay(&mut self.overlay, &self.session, &keys, self.now_ms);
    }

    /// The overlay's restart affordance.
    fn restart_run(&mut self) {
        self.session.restart();
        self.world.reset_marble();
    }
}

fn main() {
    env_logger::init();
    log::info!("Marble Dash starting...");

    let settings = Settings::load();
    let mut app = App::new(&settings);
    run_demo(&mut app);
}

/// Scripted run: roll toward the goal, hop once on the way, cross the goal
/// strip, then restart from the overlay.
fn run_demo(app: &mut App) {
    app.input.set_action(Action::Forward, true);

    let mut frames = 0u32;
    while app.session.phase() != SessionPhase::Ended && frames < 3600 {
        if frames == 90 {
            app.input.set_action(Action::Jump, true);
        }
        if frames == 96 {
            app.input.set_action(Action::Jump, false);
        }
        app.frame(FRAME_DT);
        frames += 1;

        if frames % 60 == 0 {
            log::info!("hud: {}", app.overlay.render());
        }
    }
    app.input.set_action(Action::Forward, false);

    match app.session.phase() {
        SessionPhase::Ended => {
            log::info!("goal reached, final hud: {}", app.overlay.render());
            log::debug!(
                "camera settled at {} looking at {}",
                app.camera.position,
                app.camera.look_at
            );
        }
        _ => log::warn!("demo timed out before the goal"),
    }

    app.restart_run();
    app.frame(FRAME_DT);
    log::info!("after restart: {}", app.overlay.render());
}
