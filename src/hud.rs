//! Heads-up overlay and the frame-synchronized timer readout
//!
//! The run clock changes every frame, so the readout is pushed straight into
//! the overlay surface from the frame loop instead of going through a
//! change-notification path. Writes are plain overwrites: no diffing, no
//! animation, syncing twice with the same state is harmless.

use crate::sim::input::{Action, InputSnapshot};
use crate::sim::session::{SessionPhase, SessionStore};

/// Display surface the readout writes into.
pub trait OverlaySurface {
    fn set_time_text(&mut self, text: &str);
    fn set_key_active(&mut self, action: Action, active: bool);
    fn set_restart_visible(&mut self, visible: bool);
}

/// Elapsed seconds formatted for the overlay, two decimals.
pub fn format_elapsed(seconds: f64) -> String {
    format!("{seconds:.2}")
}

/// Push the current session clock and key levels into the overlay.
///
/// Called once per frame after physics and camera, on the scheduler's
/// cadence rather than on store change notifications.
pub fn sync_overlay(
    overlay: &mut dyn OverlaySurface,
    session: &SessionStore,
    keys: &InputSnapshot,
    now_ms: f64,
) {
    overlay.set_time_text(&format_elapsed(session.elapsed_seconds(now_ms)));
    for action in Action::ALL {
        overlay.set_key_active(action, keys.get(action));
    }
    overlay.set_restart_visible(session.phase() == SessionPhase::Ended);
}

/// In-memory overlay used by the native build; renders to a single line.
#[derive(Debug, Clone)]
pub struct TextOverlay {
    time_text: String,
    active: [bool; 5],
    restart_visible: bool,
}

impl TextOverlay {
    pub fn new() -> Self {
        Self {
            time_text: "0.00".to_string(),
            active: [false; 5],
            restart_visible: false,
        }
    }

    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    pub fn key_active(&self, action: Action) -> bool {
        self.active[action as usize]
    }

    pub fn restart_visible(&self) -> bool {
        self.restart_visible
    }

    /// One-line HUD, e.g. `3.23 [F···J] restart`.
    pub fn render(&self) -> String {
        let mut caps = String::with_capacity(5);
        for (action, label) in Action::ALL.into_iter().zip(['F', 'B', 'L', 'R', 'J']) {
            caps.push(if self.key_active(action) { label } else { '\u{b7}' });
        }
        let restart = if self.restart_visible { " restart" } else { "" };
        format!("{} [{}]{}", self.time_text, caps, restart)
    }
}

impl Default for TextOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlaySurface for TextOverlay {
    fn set_time_text(&mut self, text: &str) {
        self.time_text.clear();
        self.time_text.push_str(text);
    }

    fn set_key_active(&mut self, action: Action, active: bool) {
        self.active[action as usize] = active;
    }

    fn set_restart_visible(&mut self, visible: bool) {
        self.restart_visible = visible;
    }
}
