use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::{AppConfig, SessionDefaults, TimerParams};
use crate::modal::{ConfigModal, ModalAction};
use crate::theme::{Theme, Vessel, get_theme, theme_name};
use crate::timer::{Moment, TimerAction, TimerScreen};

/// How long the loop may sleep when no tick is pending.
pub const IDLE_POLL: Duration = Duration::from_millis(250);

pub enum Screen {
    Home,
    Timer(TimerScreen),
}

pub struct AppState {
    pub screen: Screen,
    pub modal: Option<ConfigModal>,
    pub defaults: SessionDefaults,
    pub theme: Theme,
    pub theme_name: String,
    pub vessel: Vessel,
    pub tick_period: Duration,
    pub animation_frame: u8,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let name = theme_name(&config.theme);
        Self {
            screen: Screen::Home,
            modal: None,
            defaults: config.session_defaults(),
            theme: get_theme(name),
            theme_name: name.into(),
            vessel: Vessel::from_name(&config.vessel),
            tick_period: config.tick_interval(),
            animation_frame: 0,
        }
    }

    pub fn timer(&self) -> Option<&TimerScreen> {
        match &self.screen {
            Screen::Timer(timer) => Some(timer),
            Screen::Home => None,
        }
    }

    pub fn open_modal(&mut self) {
        self.modal = Some(ConfigModal::new());
    }

    pub fn open_timer(&mut self, params: &TimerParams) {
        self.modal = None;
        self.screen = Screen::Timer(TimerScreen::mount(params, &self.defaults, self.tick_period));
        tracing::info!(?params, "navigated to timer");
    }

    pub fn back_home(&mut self) {
        self.screen = Screen::Home;
        tracing::info!("navigated home");
    }

    /// Advances the mounted timer, if any.
    pub fn update(&mut self, now: Moment) {
        if let Screen::Timer(timer) = &mut self.screen {
            timer.on_frame(now);
        }
        self.animation_frame = self.animation_frame.wrapping_add(1) % 20;
    }

    pub fn poll_timeout(&self, now: Moment) -> Duration {
        self.timer()
            .and_then(|timer| timer.time_until_tick(now.instant))
            .map_or(IDLE_POLL, |wait| wait.min(IDLE_POLL))
    }
}

/// Returns true when the application should quit.
pub fn handle_input(key: KeyEvent, app: &mut AppState, now: Moment) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if let Some(modal) = app.modal.as_mut() {
        match modal.handle_key(key) {
            ModalAction::Confirm(params) => app.open_timer(&params),
            ModalAction::Cancel => app.modal = None,
            ModalAction::None => {}
        }
        return false;
    }

    if let Screen::Timer(timer) = &mut app.screen {
        if timer.handle_key(key, now) == TimerAction::Back {
            app.back_home();
        }
        return false;
    }

    handle_home(key, app)
}

fn handle_home(key: KeyEvent, app: &mut AppState) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('b') => app.open_modal(),
        _ => {}
    }
    false
}
