//! Keyboard handling for the App.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, Screen};

impl App {
    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        // The overlay swallows everything until dismissed.
        if self.overlay.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.overlay = None;
            }
            return;
        }

        match self.screen {
            Screen::Menu | Screen::Dashboard => self.handle_menu_key(key),
            Screen::Login | Screen::Register | Screen::Upload => self.handle_form_key(key),
            Screen::Videos | Screen::RecentVideos | Screen::Notifications => {
                self.handle_list_key(key)
            }
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let menu = self.current_menu();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_index = self.menu_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.menu_index + 1 < menu.len() {
                    self.menu_index += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(item) = menu.get(self.menu_index).copied() {
                    self.activate(item);
                }
            }
            KeyCode::Esc if self.screen == Screen::Dashboard => self.navigate_to(Screen::Menu),
            KeyCode::Char(c) => {
                if let Some(item) = menu.iter().find(|m| m.hotkey() == c).copied() {
                    self.activate(item);
                }
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                let back = if self.screen == Screen::Upload {
                    Screen::Dashboard
                } else {
                    Screen::Menu
                };
                self.navigate_to(back);
            }
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Enter => {
                if self.busy.is_some() {
                    return;
                }
                match self.screen {
                    Screen::Login => self.submit_login(),
                    Screen::Register => self.submit_register(),
                    Screen::Upload => self.submit_upload(),
                    _ => {}
                }
            }
            KeyCode::Char(c) => self.form.insert_char(c),
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        let len = self.list_len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.navigate_to(Screen::Dashboard),
            KeyCode::Up | KeyCode::Char('k') => {
                self.list_index = self.list_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.list_index + 1 < len {
                    self.list_index += 1;
                }
            }
            KeyCode::Home => self.list_index = 0,
            KeyCode::End => self.list_index = len.saturating_sub(1),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::adapters::mock::MockPushConnector;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app_with(None, MockPushConnector::new());
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_menu_navigation_and_enter() {
        let mut app = app_with(None, MockPushConnector::new());
        app.handle_key(press(KeyCode::Up));
        assert_eq!(app.menu_index, 0);
        app.handle_key(press(KeyCode::Down));
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Register);
    }

    #[test]
    fn test_hotkey_and_overlay_dismiss() {
        let mut app = app_with(None, MockPushConnector::new());
        app.handle_key(press(KeyCode::Char('m')));
        assert_eq!(app.screen, Screen::Dashboard);
        assert!(app.overlay.is_some());

        // swallowed while the overlay is up
        app.handle_key(press(KeyCode::Char('v')));
        assert_eq!(app.screen, Screen::Dashboard);

        app.handle_key(press(KeyCode::Enter));
        assert!(app.overlay.is_none());
        app.handle_key(press(KeyCode::Char('v')));
        assert_eq!(app.screen, Screen::Videos);
    }

    #[test]
    fn test_form_typing() {
        let mut app = app_with(None, MockPushConnector::new());
        app.navigate_to(Screen::Login);
        for c in "bob".chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Char('x')));
        assert_eq!(app.form.value(0), "bob");
        assert_eq!(app.form.value(1), "x");

        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Menu);
    }

    #[test]
    fn test_list_scrolling_is_bounded() {
        let mut app = app_with(None, MockPushConnector::new());
        app.enable_demo();
        app.overlay = None;
        app.navigate_to(Screen::Videos);
        for _ in 0..5 {
            app.handle_key(press(KeyCode::Down));
        }
        assert_eq!(app.list_index, 2);
        app.handle_key(press(KeyCode::Home));
        assert_eq!(app.list_index, 0);
        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Dashboard);
    }
}
