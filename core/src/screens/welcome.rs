//! Landing screen.

use crate::nav::{NavAction, Tab};

pub const TITLE: &str = "Welcome to WellCare";
pub const TAGLINE: &str = "Efficient Hospital Management";
pub const GET_STARTED: &str = "Get Started";

#[derive(Debug, Clone, Copy, Default)]
pub struct WelcomeScreen;

impl WelcomeScreen {
    pub fn get_started(&self) -> NavAction {
        NavAction::tab(Tab::PatientsList)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::{Navigator, Route};

    #[test]
    fn get_started_opens_main_tabs() {
        let mut nav = Navigator::new();
        nav.apply(WelcomeScreen.get_started());
        assert_eq!(nav.current(), &Route::Main { tab: Tab::PatientsList });
    }
}
