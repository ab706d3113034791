//! Type definitions for the application state.
//!
//! - [`Screen`] - Which screen is currently displayed
//! - [`MenuItem`] - Entries of the main and dashboard menus
//! - [`Form`] - Text input state for the login, register and upload screens

/// Represents which screen is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Menu,
    Login,
    Register,
    Dashboard,
    Upload,
    Videos,
    RecentVideos,
    Notifications,
}

impl Screen {
    /// Screens that only make sense with a session.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            Screen::Dashboard
                | Screen::Upload
                | Screen::Videos
                | Screen::RecentVideos
                | Screen::Notifications
        )
    }
}

/// A selectable menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Login,
    Register,
    Dashboard,
    DemoMode,
    Quit,
    Upload,
    Videos,
    Notifications,
    RecentVideos,
    Refresh,
    ToggleNotifications,
    MainMenu,
    Logout,
}

/// Main menu entries, in display order.
pub const MAIN_MENU: [MenuItem; 5] = [
    MenuItem::Login,
    MenuItem::Register,
    MenuItem::Dashboard,
    MenuItem::DemoMode,
    MenuItem::Quit,
];

/// Dashboard menu entries, in display order.
pub const DASHBOARD_MENU: [MenuItem; 8] = [
    MenuItem::Upload,
    MenuItem::Videos,
    MenuItem::Notifications,
    MenuItem::RecentVideos,
    MenuItem::Refresh,
    MenuItem::ToggleNotifications,
    MenuItem::MainMenu,
    MenuItem::Logout,
];

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Login => "Login",
            MenuItem::Register => "Register",
            MenuItem::Dashboard => "Dashboard",
            MenuItem::DemoMode => "Demo Mode",
            MenuItem::Quit => "Quit",
            MenuItem::Upload => "Upload Video",
            MenuItem::Videos => "My Videos",
            MenuItem::Notifications => "Notifications",
            MenuItem::RecentVideos => "Recent Videos",
            MenuItem::Refresh => "Refresh Data",
            MenuItem::ToggleNotifications => "Live Notifications",
            MenuItem::MainMenu => "Main Menu",
            MenuItem::Logout => "Logout",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MenuItem::Login => "Login to your account",
            MenuItem::Register => "Create a new account",
            MenuItem::Dashboard => "View dashboard (login required)",
            MenuItem::DemoMode => "Try the app with demo data",
            MenuItem::Quit => "Exit the application",
            MenuItem::Upload => "Upload a new video file",
            MenuItem::Videos => "Browse your videos",
            MenuItem::Notifications => "View real-time notifications",
            MenuItem::RecentVideos => "View your 3 most recent videos",
            MenuItem::Refresh => "Reload videos",
            MenuItem::ToggleNotifications => "Toggle the real-time connection",
            MenuItem::MainMenu => "Return to main menu",
            MenuItem::Logout => "End session and logout",
        }
    }

    /// Single-key shortcut shown next to the label.
    pub fn hotkey(&self) -> char {
        match self {
            MenuItem::Login => 'l',
            MenuItem::Register => 'r',
            MenuItem::Dashboard => 'd',
            MenuItem::DemoMode => 'm',
            MenuItem::Quit => 'q',
            MenuItem::Upload => 'u',
            MenuItem::Videos => 'v',
            MenuItem::Notifications => 'n',
            MenuItem::RecentVideos => 's',
            MenuItem::Refresh => 'r',
            MenuItem::ToggleNotifications => 'w',
            MenuItem::MainMenu => 'm',
            MenuItem::Logout => 'l',
        }
    }
}

/// One labelled text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    /// Render as asterisks
    pub masked: bool,
}

impl FormField {
    fn text(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
        }
    }

    fn secret(label: &'static str) -> Self {
        Self {
            masked: true,
            ..Self::text(label)
        }
    }

    /// What the screen shows for this field.
    pub fn display_value(&self) -> String {
        if self.masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// Input state of a form screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<FormField>,
    /// Index of the focused field
    pub focus: usize,
}

impl Form {
    pub fn login() -> Self {
        Self {
            fields: vec![FormField::text("Username"), FormField::secret("Password")],
            focus: 0,
        }
    }

    pub fn register() -> Self {
        Self {
            fields: vec![
                FormField::text("Username"),
                FormField::text("Email"),
                FormField::secret("Password"),
            ],
            focus: 0,
        }
    }

    pub fn upload() -> Self {
        Self {
            fields: vec![
                FormField::text("File Path"),
                FormField::text("Title"),
                FormField::text("Description"),
            ],
            focus: 0,
        }
    }

    /// Value of field `index`, or "" when out of range.
    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    /// Whether any field is empty after trimming.
    pub fn has_blank_field(&self) -> bool {
        self.fields.iter().any(|f| f.value.trim().is_empty())
    }
}
