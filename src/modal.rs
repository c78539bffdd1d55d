//! Session setup modal: a single slider splitting one minute between
//! focus and relax.

use crossterm::event::{KeyCode, KeyEvent};

use crate::config::{TimerParams, minutes_to_secs};

/// Slider bounds in tenths of a minute.
pub const SLIDER_MIN: u8 = 1;
pub const SLIDER_MAX: u8 = 9;
pub const SLIDER_DEFAULT: u8 = 5;
pub const SESSION_TENTHS: u8 = 10;
pub const SLIDER_LABELS: [&str; 3] = ["6s", "30s", "54s"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    None,
    Cancel,
    Confirm(TimerParams),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigModal {
    focus_tenths: u8,
}

impl Default for ConfigModal {
    fn default() -> Self {
        Self { focus_tenths: SLIDER_DEFAULT }
    }
}

impl ConfigModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus_minutes(&self) -> f64 {
        self.focus_tenths as f64 / 10.0
    }

    pub fn relax_minutes(&self) -> f64 {
        (SESSION_TENTHS - self.focus_tenths) as f64 / 10.0
    }

    /// Slider position in `[0, 1]` across its track.
    pub fn position(&self) -> f64 {
        (self.focus_tenths - SLIDER_MIN) as f64 / (SLIDER_MAX - SLIDER_MIN) as f64
    }

    pub fn increase(&mut self) {
        self.focus_tenths = (self.focus_tenths + 1).min(SLIDER_MAX);
    }

    pub fn decrease(&mut self) {
        self.focus_tenths = self.focus_tenths.saturating_sub(1).max(SLIDER_MIN);
    }

    pub fn confirm(&self) -> TimerParams {
        TimerParams::from_minutes(self.focus_minutes(), self.relax_minutes())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ModalAction {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Down | KeyCode::Char('-') => {
                self.decrease();
                ModalAction::None
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Up | KeyCode::Char('+') => {
                self.increase();
                ModalAction::None
            }
            KeyCode::Enter | KeyCode::Char('s') => ModalAction::Confirm(self.confirm()),
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('q') => ModalAction::Cancel,
            _ => ModalAction::None,
        }
    }
}

/// `"30 seconds"`, `"1 second"`.
pub fn format_seconds_label(minutes: f64) -> String {
    let seconds = minutes_to_secs(minutes).unwrap_or(0);
    format!("{} {}", seconds, if seconds == 1 { "second" } else { "seconds" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_split_is_half_and_half() {
        let modal = ConfigModal::new();
        assert_eq!(modal.focus_minutes(), 0.5);
        assert_eq!(modal.relax_minutes(), 0.5);
        assert_eq!(format_seconds_label(modal.focus_minutes()), "30 seconds");
    }

    #[test]
    fn test_slider_clamps_at_ends() {
        let mut modal = ConfigModal::new();
        for _ in 0..20 {
            modal.decrease();
        }
        assert_eq!(modal.focus_minutes(), 0.1);
        assert_eq!(modal.relax_minutes(), 0.9);
        assert_eq!(modal.position(), 0.0);
        for _ in 0..20 {
            modal.increase();
        }
        assert_eq!(modal.focus_minutes(), 0.9);
        assert_eq!(modal.relax_minutes(), 0.1);
        assert_eq!(modal.position(), 1.0);
    }

    #[test]
    fn test_labels_match_slider_extremes() {
        assert_eq!(format_seconds_label(0.1), "6 seconds");
        assert_eq!(format_seconds_label(0.9), "54 seconds");
        assert_eq!(format_seconds_label(1.0 / 60.0), "1 second");
    }

    #[test]
    fn test_confirm_emits_numeric_strings() {
        let mut modal = ConfigModal::new();
        modal.handle_key(key(KeyCode::Left));
        modal.handle_key(key(KeyCode::Left));
        let action = modal.handle_key(key(KeyCode::Enter));
        assert_eq!(
            action,
            ModalAction::Confirm(TimerParams {
                focus_time: Some("0.3".into()),
                relax_time: Some("0.7".into()),
            })
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut modal = ConfigModal::new();
        assert_eq!(modal.handle_key(key(KeyCode::Esc)), ModalAction::Cancel);
        assert_eq!(modal.handle_key(key(KeyCode::Tab)), ModalAction::None);
    }
}
