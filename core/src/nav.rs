//! Navigation graph: a stack of screens with one nested tab group.
//!
//! Routing is declarative. Screens return `NavAction`s and the host applies
//! them to a `Navigator`. The only data carried between screens besides
//! identifiers is the one-shot `refresh` flag, which tells the destination to
//! re-fetch because something it shows was mutated.

use std::mem::discriminant;

use tracing::debug;

/// Tabs inside the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    PatientsList,
    AddPatient,
    CriticalPatients,
    Settings,
}

impl Tab {
    pub fn title(self) -> &'static str {
        match self {
            Tab::PatientsList => "Patients",
            Tab::AddPatient => "Add Patient",
            Tab::CriticalPatients => "Critical",
            Tab::Settings => "Settings",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Welcome,
    Main { tab: Tab },
    PatientDetails { patient_id: String },
    AddTest { patient_id: String },
    PatientHistory { patient_id: String },
    UpdatePatient { patient_id: String },
    UpdateTest { patient_id: String, test_id: String },
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Welcome => "Welcome",
            Route::Main { .. } => "Main",
            Route::PatientDetails { .. } => "PatientDetails",
            Route::AddTest { .. } => "AddTest",
            Route::PatientHistory { .. } => "PatientHistory",
            Route::UpdatePatient { .. } => "UpdatePatient",
            Route::UpdateTest { .. } => "UpdateTest",
        }
    }

    /// Header title; `None` for screens drawn without a header.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Route::Welcome | Route::Main { .. } => None,
            Route::PatientDetails { .. } => Some("Patient Details"),
            Route::AddTest { .. } => Some("Add Test"),
            Route::PatientHistory { .. } => Some("Patient History"),
            Route::UpdatePatient { .. } => Some("Update Patient"),
            Route::UpdateTest { .. } => Some("Update Test"),
        }
    }

    fn same_screen(&self, other: &Route) -> bool {
        discriminant(self) == discriminant(other)
    }
}

/// What a screen asks the host to do after an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    Navigate { route: Route, refresh: bool },
    GoBack,
}

impl NavAction {
    pub fn to(route: Route) -> Self {
        NavAction::Navigate {
            route,
            refresh: false,
        }
    }

    pub fn refreshing(route: Route) -> Self {
        NavAction::Navigate {
            route,
            refresh: true,
        }
    }

    pub fn tab(tab: Tab) -> Self {
        Self::to(Route::Main { tab })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub route: Route,
    refresh: bool,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Entry>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Entry {
                route: Route::Welcome,
                refresh: false,
            }],
        }
    }

    pub fn current(&self) -> &Route {
        // The root entry is never popped.
        &self.stack[self.stack.len() - 1].route
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn apply(&mut self, action: NavAction) {
        match action {
            NavAction::Navigate { route, refresh } => self.navigate(route, refresh),
            NavAction::GoBack => {
                self.go_back();
            }
        }
    }

    /// Go to `route`. A screen already on the stack is popped back to and
    /// gets the new params; otherwise the route is pushed.
    pub fn navigate(&mut self, route: Route, refresh: bool) {
        debug!(route = route.name(), refresh, "navigate");
        match self.stack.iter().rposition(|e| e.route.same_screen(&route)) {
            Some(index) => {
                self.stack.truncate(index + 1);
                let entry = &mut self.stack[index];
                entry.route = route;
                entry.refresh = refresh;
            }
            None => self.stack.push(Entry { route, refresh }),
        }
    }

    /// Pop the current screen. Returns false at the root.
    pub fn go_back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        debug!(route = self.current().name(), "back");
        true
    }

    /// Read and clear the current screen's refresh flag.
    pub fn take_refresh(&mut self) -> bool {
        let last = self.stack.len() - 1;
        std::mem::take(&mut self.stack[last].refresh)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
