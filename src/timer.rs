//! The timer screen: one mounted [`SessionClock`] plus the single periodic
//! tick that drives it.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};

use crate::clock::{Phase, SessionClock, Tick};
use crate::config::{SessionDefaults, TimerParams};

/// A paired monotonic/wall-clock reading taken once per loop iteration.
#[derive(Debug, Clone, Copy)]
pub struct Moment {
    pub instant: Instant,
    pub wall: DateTime<Utc>,
}

impl Moment {
    pub fn now() -> Self {
        Self {
            instant: Instant::now(),
            wall: Utc::now(),
        }
    }

    pub fn after(&self, elapsed: Duration) -> Self {
        Self {
            instant: self.instant + elapsed,
            wall: self.wall + chrono::Duration::from_std(elapsed).unwrap_or(chrono::Duration::zero()),
        }
    }
}

/// At most one pending periodic callback.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period, next_due: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Replaces any pending deadline.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    /// True when the deadline has passed; the next one is scheduled from `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                true
            }
            _ => false,
        }
    }

    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    None,
    Back,
}

pub struct TimerScreen {
    clock: SessionClock,
    ticker: Ticker,
}

impl TimerScreen {
    pub fn mount(params: &TimerParams, defaults: &SessionDefaults, tick_period: Duration) -> Self {
        let config = params.session_config(defaults);
        tracing::info!(
            focus_secs = config.focus_secs,
            relax_secs = config.relax_secs,
            "timer screen mounted"
        );
        Self {
            clock: SessionClock::new(config),
            ticker: Ticker::new(tick_period),
        }
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn display(&self) -> Tick {
        self.clock.display()
    }

    pub fn start(&mut self, now: Moment) {
        if self.clock.phase() != Phase::Idle {
            return;
        }
        self.clock.start_current(now.wall);
        self.reschedule(now);
    }

    pub fn toggle_pause(&mut self, now: Moment) {
        if self.clock.phase() == Phase::Idle {
            return;
        }
        self.clock.toggle_pause(now.wall);
        self.reschedule(now);
    }

    pub fn reset(&mut self, now: Moment) {
        self.clock.reset_current();
        self.reschedule(now);
    }

    /// Runs the scheduled tick if it is due.
    pub fn on_frame(&mut self, now: Moment) -> Option<Tick> {
        if !self.ticker.poll(now.instant) {
            return None;
        }
        let before = self.clock.state().running;
        let tick = self.clock.advance(now.wall);
        if tick.completed || before != self.clock.state().running {
            self.reschedule(now);
        }
        Some(tick)
    }

    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until(now)
    }

    /// Cancels the pending tick and re-arms it only while counting down.
    fn reschedule(&mut self, now: Moment) {
        self.ticker.disarm();
        if self.clock.phase() == Phase::Running {
            self.ticker.arm(now.instant);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Moment) -> TimerAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('q') => return TimerAction::Back,
            KeyCode::Char(' ') | KeyCode::Enter => match self.clock.phase() {
                Phase::Idle => self.start(now),
                Phase::Running | Phase::Paused => self.toggle_pause(now),
            },
            KeyCode::Char('s') => self.start(now),
            KeyCode::Char('p') => self.toggle_pause(now),
            KeyCode::Char('r') => {
                if self.clock.phase() != Phase::Idle {
                    self.reset(now);
                }
            }
            _ => {}
        }
        TimerAction::None
    }
}

impl Drop for TimerScreen {
    fn drop(&mut self) {
        self.ticker.disarm();
        tracing::debug!("timer screen unmounted");
    }
}
