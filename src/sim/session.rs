//! Session phase store and run clock
//!
//! Process-wide run state shared between the frame loop and the overlay.
//! The triggers (`start`, `end`, `restart`) are invoked by app wiring: the
//! run-start keypress, the goal sensor, the overlay's restart affordance.
//! The controller and camera only ever read it.

use log::{debug, info};

/// Discrete session state governing timer behavior and UI affordances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the first input of a run
    Ready,
    /// Run in progress, clock counting
    Playing,
    /// Goal reached, clock frozen
    Ended,
}

/// Phase plus the clock bounds of the current run.
///
/// Timestamps are milliseconds on the app's monotonic clock. `end_time` is
/// meaningful only while the phase is [`SessionPhase::Ended`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    phase: SessionPhase,
    start_time: f64,
    end_time: f64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Ready,
            start_time: 0.0,
            end_time: 0.0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Run-start trigger. Only leaves [`SessionPhase::Ready`].
    pub fn start(&mut self, now_ms: f64) {
        if self.phase != SessionPhase::Ready {
            debug!("start ignored in phase {:?}", self.phase);
            return;
        }
        self.phase = SessionPhase::Playing;
        self.start_time = now_ms;
        info!("run started");
    }

    /// Goal trigger, freezes the clock. Only leaves [`SessionPhase::Playing`].
    pub fn end(&mut self, now_ms: f64) {
        if self.phase != SessionPhase::Playing {
            debug!("end ignored in phase {:?}", self.phase);
            return;
        }
        self.phase = SessionPhase::Ended;
        self.end_time = now_ms;
        info!(
            "run ended after {:.2} s",
            compute_elapsed(self.phase, self.start_time, self.end_time, now_ms)
        );
    }

    /// Restart trigger. Returns to [`SessionPhase::Ready`] with a cleared
    /// clock, so the next readout renders `0.00`.
    pub fn restart(&mut self) {
        match self.phase {
            SessionPhase::Playing | SessionPhase::Ended => {
                self.phase = SessionPhase::Ready;
                self.start_time = 0.0;
                self.end_time = 0.0;
                info!("session reset");
            }
            SessionPhase::Ready => debug!("restart ignored in phase Ready"),
        }
    }

    /// Elapsed run time in seconds for the current readout.
    pub fn elapsed_seconds(&self, now_ms: f64) -> f64 {
        compute_elapsed(self.phase, self.start_time, self.end_time, now_ms)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Elapsed seconds for a phase/timestamp triple.
///
/// `Playing` counts from `start_ms`, `Ended` is frozen at the recorded end,
/// `Ready` reads zero. Clamped so a misordered store can never surface a
/// negative time.
pub fn compute_elapsed(phase: SessionPhase, start_ms: f64, end_ms: f64, now_ms: f64) -> f64 {
    let ms = match phase {
        SessionPhase::Playing => now_ms - start_ms,
        SessionPhase::Ended => end_ms - start_ms,
        SessionPhase::Ready => 0.0,
    };
    (ms / 1000.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions_with_guards() {
        let mut session = SessionStore::new();
        assert_eq!(session.phase(), SessionPhase::Ready);

        // end/restart do nothing before a run
        session.end(100.0);
        session.restart();
        assert_eq!(session.phase(), SessionPhase::Ready);

        session.start(1000.0);
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.start_time(), 1000.0);

        // a second start is ignored
        session.start(2000.0);
        assert_eq!(session.start_time(), 1000.0);

        session.end(6500.0);
        assert_eq!(session.phase(), SessionPhase::Ended);
        assert_eq!(session.end_time(), 6500.0);

        session.restart();
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.start_time(), 0.0);
        assert_eq!(session.end_time(), 0.0);
    }

    #[test]
    fn test_elapsed_while_playing() {
        let elapsed = compute_elapsed(SessionPhase::Playing, 1000.0, 0.0, 4230.0);
        assert!((elapsed - 3.23).abs() < 1e-9);
    }

    #[test]
    fn test_elapsed_frozen_when_ended() {
        // later `now` values no longer move the clock
        for now in [6500.0, 10_000.0, 1e9] {
            let elapsed = compute_elapsed(SessionPhase::Ended, 1000.0, 6500.0, now);
            assert!((elapsed - 5.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_elapsed_zero_when_ready() {
        assert_eq!(compute_elapsed(SessionPhase::Ready, 1000.0, 6500.0, 9999.0), 0.0);
    }

    #[test]
    fn test_elapsed_clamped_to_zero() {
        // end before start is the store owner's bug; the readout still never
        // shows a negative number
        assert_eq!(compute_elapsed(SessionPhase::Ended, 5000.0, 1000.0, 9999.0), 0.0);
        assert_eq!(compute_elapsed(SessionPhase::Playing, 5000.0, 0.0, 1000.0), 0.0);
    }

    #[test]
    fn test_restart_rearms_start() {
        let mut session = SessionStore::new();
        session.start(1000.0);
        session.end(2000.0);
        session.restart();

        session.start(3000.0);
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.start_time(), 3000.0);
    }
}
