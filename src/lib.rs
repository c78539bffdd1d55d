//! Mind Pace: a terminal focus timer that alternates a focus interval,
//! during which the cup empties, with a relax interval, during which it
//! fills back up.

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod modal;
pub mod theme;
pub mod timer;
pub mod ui;

pub use clock::{ClockState, Mode, Phase, SessionClock, Tick};
pub use config::{AppConfig, SessionConfig, SessionDefaults, TimerParams};
pub use error::{MindPaceError, Result};
