use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, Message, Mode};

impl App {
    pub fn update(&mut self, message: Message) -> Result<()> {
        match message {
            Message::Key(key) => self.handle_key(key),
            Message::Resize(w, h) => {
                self.viewport = (w, h);
            }
            Message::Tick => {
                self.expire_notification();
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.mode {
            Mode::List => self.handle_list_key(key),
            Mode::Adding => self.handle_adding_key(key),
            Mode::Editing { index } => self.handle_editing_key(key, index),
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('a') | KeyCode::Char('i') => {
                self.mode = Mode::Adding;
            }
            KeyCode::Char('e') => self.start_edit(),
            KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => self.remove_selected(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('j') | KeyCode::Down => {
                let max_index = self.store.tasks().len().saturating_sub(1);
                self.selected = (self.selected + 1).min(max_index);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Home => {
                self.selected = 0;
            }
            KeyCode::End => {
                self.selected = self.store.tasks().len().saturating_sub(1);
            }
            KeyCode::Char('t') => self.toggle_theme(),
            _ => {}
        }
    }

    fn handle_adding_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => match self.store.add_task(&self.input.clone()) {
                Ok(notification) => {
                    self.notify(notification);
                    self.input.clear();
                    self.selected = self.store.tasks().len().saturating_sub(1);
                    self.mode = Mode::List;
                }
                Err(error) => self.notify_intent_error(error),
            },
            KeyCode::Esc => {
                self.mode = Mode::List;
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(ch) => {
                self.input.push(ch);
            }
            _ => {}
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent, index: usize) {
        match key.code {
            KeyCode::Enter => {
                match self.store.save_edit(index, &self.edit_buffer.clone()) {
                    Ok(notification) => self.notify(notification),
                    Err(error) => self.notify_intent_error(error),
                }
                self.edit_buffer.clear();
                self.mode = Mode::List;
            }
            KeyCode::Esc => {
                self.edit_buffer.clear();
                self.mode = Mode::List;
            }
            KeyCode::Backspace => {
                self.edit_buffer.pop();
            }
            KeyCode::Char(ch) => {
                self.edit_buffer.push(ch);
            }
            _ => {}
        }
    }

    fn start_edit(&mut self) {
        if self.store.tasks().is_empty() {
            return;
        }

        match self.store.editable_text(self.selected) {
            Ok(text) => {
                self.edit_buffer = text.to_string();
                self.mode = Mode::Editing {
                    index: self.selected,
                };
            }
            Err(error) => self.notify_intent_error(error),
        }
    }

    fn remove_selected(&mut self) {
        if self.store.tasks().is_empty() {
            return;
        }

        match self.store.remove_task(self.selected) {
            Ok(notification) => {
                self.notify(notification);
                self.clamp_selection();
            }
            Err(error) => self.notify_intent_error(error),
        }
    }

    fn toggle_selected(&mut self) {
        if self.store.tasks().is_empty() {
            return;
        }

        match self.store.toggle_complete(self.selected) {
            Ok(notification) => self.notify(notification),
            Err(error) => self.notify_intent_error(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::Severity;
    use crate::settings::Settings;
    use crate::storage::Storage;
    use crate::store::TaskListStore;
    use crate::theme::ThemeMode;
    use tempfile::TempDir;

    fn test_app(temp: &TempDir) -> App {
        let store = TaskListStore::load(Storage::open(temp.path().join("state")));
        // Footer-only backend keeps tests free of desktop side effects.
        let settings = Settings::default();
        App::new(store, settings, None)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.update(Message::Key(KeyEvent::new(code, KeyModifiers::empty())))
            .expect("update should not fail");
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn test_add_task_via_keys() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let mut app = test_app(&temp);

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, Mode::Adding);

        type_text(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::List);
        assert_eq!(app.store.tasks().len(), 1);
        assert_eq!(app.store.tasks()[0].text, "Buy milk");
        assert!(app.input.is_empty());
        let notification = app.notification.as_ref().expect("notification expected");
        assert_eq!(notification.severity, Severity::Success);
    }

    #[test]
    fn test_empty_add_keeps_adding_mode() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let mut app = test_app(&temp);

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Adding);
        assert!(app.store.tasks().is_empty());
        let notification = app.notification.as_ref().expect("notification expected");
        assert_eq!(notification.severity, Severity::Warning);
        assert_eq!(notification.message, "Task cannot be empty!");
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let mut app = test_app(&temp);

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "buy milk");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store.tasks().len(), 1);
        let notification = app.notification.as_ref().expect("notification expected");
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(notification.message, "Task already exists!");
    }

    #[test]
    fn test_toggle_and_edit_refusal() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let mut app = test_app(&temp);

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Ship release");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char(' '));
        assert!(app.store.tasks()[0].done);
        let notification = app.notification.as_ref().expect("notification expected");
        assert_eq!(notification.message, "Task completed!");

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, Mode::List);
        let notification = app.notification.as_ref().expect("notification expected");
        assert_eq!(notification.message, "Cannot edit a completed task!");
    }

    #[test]
    fn test_edit_flow() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let mut app = test_app(&temp);

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "draft");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, Mode::Editing { index: 0 });
        assert_eq!(app.edit_buffer, "draft");

        type_text(&mut app, "!");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::List);
        assert_eq!(app.store.tasks()[0].text, "draft!");
        assert!(app.edit_buffer.is_empty());
    }

    #[test]
    fn test_escape_cancels_edit_without_change() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let mut app = test_app(&temp);

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "keep me");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, " not");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.mode, Mode::List);
        assert_eq!(app.store.tasks()[0].text, "keep me");
    }

    #[test]
    fn test_remove_clamps_selection() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let mut app = test_app(&temp);

        for text in ["one", "two"] {
            press(&mut app, KeyCode::Char('a'));
            type_text(&mut app, text);
            press(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.selected, 1);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.store.tasks().len(), 1);
        assert_eq!(app.selected, 0);

        press(&mut app, KeyCode::Char('d'));
        assert!(app.store.tasks().is_empty());

        // Deleting with an empty list stays a quiet no-op.
        app.notification = None;
        press(&mut app, KeyCode::Char('d'));
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_selection_navigation_clamps() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let mut app = test_app(&temp);

        for text in ["one", "two", "three"] {
            press(&mut app, KeyCode::Char('a'));
            type_text(&mut app, text);
            press(&mut app, KeyCode::Enter);
        }

        press(&mut app, KeyCode::Home);
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::End);
        assert_eq!(app.selected, 2);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn test_theme_toggle_key() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let mut app = test_app(&temp);

        assert_eq!(app.theme_mode, ThemeMode::Dark);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme_mode, ThemeMode::Light);
        assert_eq!(app.store.theme(), ThemeMode::Light);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme_mode, ThemeMode::Dark);
        assert_eq!(app.store.theme(), ThemeMode::Dark);
    }

    #[test]
    fn test_cli_theme_override_converges_on_toggle() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let store = TaskListStore::load(Storage::open(temp.path().join("state")));
        let mut app = App::new(store, Settings::default(), Some(ThemeMode::Light));

        assert_eq!(app.theme_mode, ThemeMode::Light);
        assert_eq!(app.store.theme(), ThemeMode::Dark);

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme_mode, ThemeMode::Dark);
        assert_eq!(app.store.theme(), ThemeMode::Dark);
    }

    #[test]
    fn test_quit_keys() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let mut app = test_app(&temp);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app = test_app(&temp);
        app.update(Message::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )))
        .expect("update should not fail");
        assert!(app.should_quit());
    }

    #[test]
    fn test_tick_expires_notification() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let mut app = test_app(&temp);
        app.settings.notification_duration_ms = 0;

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "short lived");
        press(&mut app, KeyCode::Enter);
        assert!(app.notification.is_some());

        app.update(Message::Tick).expect("update should not fail");
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_resize_updates_viewport() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let mut app = test_app(&temp);

        app.update(Message::Resize(120, 40))
            .expect("update should not fail");
        assert_eq!(app.viewport, (120, 40));
    }
}
