//! Wall-clock session timing.
//!
//! Remaining time is always derived from the gap between the start
//! timestamp and "now", minus time spent paused. Nothing here counts
//! callbacks, so a late or skipped tick never skews the display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Focus,
    Relax,
}

impl Mode {
    pub fn name(&self) -> &str {
        match self {
            Self::Focus => "🎯 FOCUS",
            Self::Relax => "☕ RELAX",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Focus => Self::Relax,
            Self::Relax => Self::Focus,
        }
    }
}

/// Coarse lifecycle used by the views to pick which controls to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockState {
    pub mode: Mode,
    pub total_duration_secs: u64,
    pub start_timestamp: Option<DateTime<Utc>>,
    pub accumulated_pause_ms: i64,
    pub pause_start_timestamp: Option<DateTime<Utc>>,
    pub running: bool,
    pub paused: bool,
}

/// One observation of a [`ClockState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub remaining_secs: u64,
    pub fill_fraction: f64,
    pub completed: bool,
}

impl ClockState {
    pub fn idle(mode: Mode, duration_secs: u64) -> Self {
        Self {
            mode,
            total_duration_secs: duration_secs.max(1),
            start_timestamp: None,
            accumulated_pause_ms: 0,
            pause_start_timestamp: None,
            running: false,
            paused: false,
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.running, self.paused) {
            (false, _) => Phase::Idle,
            (true, false) => Phase::Running,
            (true, true) => Phase::Paused,
        }
    }

    /// Whole seconds of unpaused time since start. Frozen while paused.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u64 {
        let Some(start) = self.start_timestamp else {
            return 0;
        };
        let observed = match (self.paused, self.pause_start_timestamp) {
            (true, Some(pause_start)) => pause_start,
            _ => now,
        };
        let ms = (observed - start).num_milliseconds() - self.accumulated_pause_ms;
        if ms <= 0 { 0 } else { (ms / 1000) as u64 }
    }

    pub fn remaining_secs(&self, now: DateTime<Utc>) -> u64 {
        self.total_duration_secs
            .saturating_sub(self.elapsed_secs(now))
    }

    /// Pure observation: does not touch `self`.
    pub fn tick(&self, now: DateTime<Utc>) -> Tick {
        let remaining_secs = self.remaining_secs(now);
        Tick {
            remaining_secs,
            fill_fraction: fill_fraction(self.mode, remaining_secs, self.total_duration_secs),
            completed: self.running && remaining_secs == 0,
        }
    }
}

/// Focus empties the vessel, relax fills it.
pub fn fill_fraction(mode: Mode, remaining_secs: u64, total_secs: u64) -> f64 {
    let total = total_secs.max(1) as f64;
    let ratio = remaining_secs.min(total_secs) as f64 / total;
    match mode {
        Mode::Focus => ratio,
        Mode::Relax => 1.0 - ratio,
    }
}

/// `MM:SS`, minutes never roll over into hours.
pub fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Focus/relax state machine for one timer screen.
#[derive(Debug, Clone)]
pub struct SessionClock {
    config: SessionConfig,
    state: ClockState,
    display: Tick,
}

impl SessionClock {
    pub fn new(config: SessionConfig) -> Self {
        let state = ClockState::idle(Mode::Focus, config.duration_for(Mode::Focus));
        Self {
            config,
            display: state.tick(Utc::now()),
            state,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &ClockState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Last tick applied to the clock.
    pub fn display(&self) -> Tick {
        self.display
    }

    pub fn start(&mut self, mode: Mode, duration_secs: u64, now: DateTime<Utc>) {
        self.state = ClockState {
            mode,
            total_duration_secs: duration_secs.max(1),
            start_timestamp: Some(now),
            accumulated_pause_ms: 0,
            pause_start_timestamp: None,
            running: true,
            paused: false,
        };
        self.display = self.state.tick(now);
        tracing::info!(?mode, duration_secs = self.state.total_duration_secs, "clock started");
    }

    /// Starts the current mode with its configured duration.
    pub fn start_current(&mut self, now: DateTime<Utc>) {
        let mode = self.state.mode;
        self.start(mode, self.config.duration_for(mode), now);
    }

    pub fn pause(&mut self, now: DateTime<Utc>) {
        if !self.state.running || self.state.paused {
            return;
        }
        self.display = self.state.tick(now);
        self.state.pause_start_timestamp = Some(now);
        self.state.paused = true;
        tracing::debug!(remaining = self.display.remaining_secs, "clock paused");
    }

    pub fn resume(&mut self, now: DateTime<Utc>) {
        if !self.state.paused {
            return;
        }
        if let Some(pause_start) = self.state.pause_start_timestamp.take() {
            self.state.accumulated_pause_ms += (now - pause_start).num_milliseconds().max(0);
        }
        self.state.paused = false;
        self.display = self.state.tick(now);
        tracing::debug!(
            paused_ms = self.state.accumulated_pause_ms,
            "clock resumed"
        );
    }

    pub fn toggle_pause(&mut self, now: DateTime<Utc>) {
        if self.state.paused {
            self.resume(now);
        } else {
            self.pause(now);
        }
    }

    pub fn reset(&mut self, mode: Mode, duration_secs: u64) {
        self.state = ClockState::idle(mode, duration_secs);
        self.display = Tick {
            remaining_secs: self.state.total_duration_secs,
            fill_fraction: fill_fraction(
                mode,
                self.state.total_duration_secs,
                self.state.total_duration_secs,
            ),
            completed: false,
        };
        tracing::info!(?mode, "clock reset");
    }

    /// Resets the current mode to its full configured duration.
    pub fn reset_current(&mut self) {
        let mode = self.state.mode;
        self.reset(mode, self.config.duration_for(mode));
    }

    /// Applies a tick computed from the current state.
    pub fn apply(&mut self, tick: Tick) {
        self.display = tick;
    }

    /// Focus rolls straight into relax; relax stops at an idle focus.
    pub fn on_complete(&mut self, now: DateTime<Utc>) {
        match self.state.mode {
            Mode::Focus => {
                tracing::info!("focus complete, relaxing");
                self.start(Mode::Relax, self.config.relax_secs, now);
            }
            Mode::Relax => {
                tracing::info!("relax complete, waiting for focus start");
                self.reset(Mode::Focus, self.config.focus_secs);
            }
        }
    }

    /// Ticks, applies the result and runs the completion transition.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Tick {
        let tick = self.state.tick(now);
        self.apply(tick);
        if tick.completed {
            self.on_complete(now);
        }
        tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_idle_state_is_full_duration() {
        let state = ClockState::idle(Mode::Focus, 90);
        let tick = state.tick(t0());
        assert_eq!(tick.remaining_secs, 90);
        assert_eq!(tick.fill_fraction, 1.0);
        assert!(!tick.completed);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_elapsed_floors_partial_seconds() {
        let mut state = ClockState::idle(Mode::Focus, 10);
        state.start_timestamp = Some(t0());
        state.running = true;
        assert_eq!(state.elapsed_secs(t0() + Duration::milliseconds(999)), 0);
        assert_eq!(state.elapsed_secs(t0() + Duration::milliseconds(1000)), 1);
        assert_eq!(state.elapsed_secs(t0() + Duration::milliseconds(2500)), 2);
    }

    #[test]
    fn test_clock_behind_start_reports_zero_elapsed() {
        let mut state = ClockState::idle(Mode::Focus, 10);
        state.start_timestamp = Some(t0());
        state.running = true;
        assert_eq!(state.elapsed_secs(t0() - Duration::seconds(5)), 0);
    }

    #[test]
    fn test_remaining_never_underflows() {
        let mut clock = SessionClock::new(SessionConfig::new(5, 5));
        clock.start(Mode::Focus, 5, t0());
        let tick = clock.state().tick(t0() + Duration::seconds(600));
        assert_eq!(tick.remaining_secs, 0);
        assert_eq!(tick.fill_fraction, 0.0);
        assert!(tick.completed);
    }

    #[test]
    fn test_fill_fraction_by_mode() {
        assert_eq!(fill_fraction(Mode::Focus, 30, 60), 0.5);
        assert_eq!(fill_fraction(Mode::Relax, 15, 60), 0.75);
        assert_eq!(fill_fraction(Mode::Focus, 0, 60), 0.0);
        assert_eq!(fill_fraction(Mode::Relax, 60, 60), 0.0);
    }

    #[test]
    fn test_pause_when_idle_is_noop() {
        let mut clock = SessionClock::new(SessionConfig::new(30, 30));
        let before = *clock.state();
        clock.pause(t0());
        assert_eq!(*clock.state(), before);
        clock.resume(t0());
        assert_eq!(*clock.state(), before);
    }

    #[test]
    fn test_double_pause_keeps_first_pause_start() {
        let mut clock = SessionClock::new(SessionConfig::new(30, 30));
        clock.start_current(t0());
        clock.pause(t0() + Duration::seconds(3));
        clock.pause(t0() + Duration::seconds(8));
        assert_eq!(
            clock.state().pause_start_timestamp,
            Some(t0() + Duration::seconds(3))
        );
    }

    #[test]
    fn test_elapsed_frozen_while_paused() {
        let mut clock = SessionClock::new(SessionConfig::new(30, 30));
        clock.start_current(t0());
        clock.pause(t0() + Duration::seconds(4));
        let a = clock.state().tick(t0() + Duration::seconds(5));
        let b = clock.state().tick(t0() + Duration::seconds(25));
        assert_eq!(a.remaining_secs, 26);
        assert_eq!(b.remaining_secs, 26);
        assert!(!b.completed);
    }

    #[test]
    fn test_toggle_pause_round_trip() {
        let mut clock = SessionClock::new(SessionConfig::new(30, 30));
        clock.start_current(t0());
        clock.toggle_pause(t0() + Duration::seconds(2));
        assert_eq!(clock.phase(), Phase::Paused);
        clock.toggle_pause(t0() + Duration::seconds(12));
        assert_eq!(clock.phase(), Phase::Running);
        assert_eq!(clock.state().accumulated_pause_ms, 10_000);
        assert_eq!(clock.state().remaining_secs(t0() + Duration::seconds(12)), 28);
    }

    #[test]
    fn test_reset_keeps_mode() {
        let mut clock = SessionClock::new(SessionConfig::new(20, 40));
        clock.start(Mode::Relax, 40, t0());
        clock.reset_current();
        assert_eq!(clock.mode(), Mode::Relax);
        assert_eq!(clock.phase(), Phase::Idle);
        assert_eq!(clock.display().remaining_secs, 40);
        assert_eq!(clock.display().fill_fraction, 0.0);
        assert!(clock.state().start_timestamp.is_none());
    }

    #[test]
    fn test_advance_runs_completion() {
        let mut clock = SessionClock::new(SessionConfig::new(2, 7));
        clock.start_current(t0());
        let tick = clock.advance(t0() + Duration::seconds(1));
        assert!(!tick.completed);
        assert_eq!(clock.mode(), Mode::Focus);

        let tick = clock.advance(t0() + Duration::seconds(2));
        assert!(tick.completed);
        assert_eq!(clock.mode(), Mode::Relax);
        assert_eq!(clock.phase(), Phase::Running);
        assert_eq!(clock.state().total_duration_secs, 7);
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(65), "01:05");
        assert_eq!(format_mmss(25 * 60), "25:00");
        assert_eq!(format_mmss(100 * 60 + 9), "100:09");
    }
}
