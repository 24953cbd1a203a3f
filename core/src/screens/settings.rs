//! Local preferences and the logout prompt.
//!
//! Preferences live only in this screen's state. There is no session model,
//! so confirming logout only records the request.

use tracing::info;

use super::Confirmation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsScreen {
    pub notifications: bool,
    pub dark_mode: bool,
    pub auto_sync: bool,
    confirming_logout: bool,
}

impl SettingsScreen {
    pub fn new() -> Self {
        Self {
            notifications: true,
            dark_mode: false,
            auto_sync: true,
            confirming_logout: false,
        }
    }

    pub fn toggle_notifications(&mut self) -> bool {
        self.notifications = !self.notifications;
        self.notifications
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    pub fn toggle_auto_sync(&mut self) -> bool {
        self.auto_sync = !self.auto_sync;
        self.auto_sync
    }

    pub fn request_logout(&mut self) -> Confirmation {
        self.confirming_logout = true;
        Confirmation {
            title: "Logout".to_string(),
            message: "Are you sure you want to logout?".to_string(),
            confirm_label: "OK".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }

    pub fn cancel_logout(&mut self) {
        self.confirming_logout = false;
    }

    /// Returns whether a pending prompt was confirmed.
    pub fn confirm_logout(&mut self) -> bool {
        let confirmed = std::mem::take(&mut self.confirming_logout);
        if confirmed {
            info!("logout requested");
        }
        confirmed
    }
}

impl Default for SettingsScreen {
    fn default() -> Self {
        Self::new()
    }
}
