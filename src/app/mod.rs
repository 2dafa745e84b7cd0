pub mod messages;
pub mod update;

use std::time::Duration;

use crate::notification::{self, Notification};
use crate::settings::Settings;
use crate::store::{IntentError, TaskListStore};
use crate::theme::{Theme, ThemeMode};

pub use self::messages::Message;

/// Input focus. `Editing` carries the single optional active-edit target;
/// everything here is transient UI state, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    List,
    Adding,
    Editing {
        index: usize,
    },
}

pub struct App {
    pub should_quit: bool,
    pub viewport: (u16, u16),
    pub store: TaskListStore,
    pub settings: Settings,
    pub theme_mode: ThemeMode,
    pub theme: Theme,
    pub mode: Mode,
    pub input: String,
    pub edit_buffer: String,
    pub selected: usize,
    pub notification: Option<Notification>,
}

impl App {
    pub fn new(
        store: TaskListStore,
        settings: Settings,
        theme_override: Option<ThemeMode>,
    ) -> Self {
        let theme_mode = theme_override.unwrap_or_else(|| store.theme());
        Self {
            should_quit: false,
            viewport: (0, 0),
            store,
            settings,
            theme_mode,
            theme: Theme::from_mode(theme_mode),
            mode: Mode::default(),
            input: String::new(),
            edit_buffer: String::new(),
            selected: 0,
            notification: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.settings.notification_duration_ms)
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        let backend = self.settings.backend();
        notification::dispatch_system(
            &notification,
            backend,
            self.settings.notification_duration_ms,
        );
        if backend.shows_footer() {
            self.notification = Some(notification);
        }
    }

    pub(crate) fn notify_intent_error(&mut self, error: IntentError) {
        self.notify(error.notification());
    }

    /// Flip the displayed theme. The persisted value follows the display,
    /// so a CLI override converges to storage on the first toggle.
    pub(crate) fn toggle_theme(&mut self) {
        let target = self.theme_mode.toggled();
        if self.store.theme() != target {
            self.store.toggle_theme();
        }
        self.theme_mode = target;
        self.theme = Theme::from_mode(target);
    }

    pub(crate) fn clamp_selection(&mut self) {
        let max_index = self.store.tasks().len().saturating_sub(1);
        self.selected = self.selected.min(max_index);
    }

    pub(crate) fn expire_notification(&mut self) {
        let duration = self.notification_duration();
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(duration))
        {
            self.notification = None;
        }
    }
}
