//! All patients, re-fetched every time the tab gains focus, with a live
//! name search.

use crate::client::PatientClient;
use crate::http::{HttpRequest, Reply};
use crate::nav::{NavAction, Route};
use crate::types::Patient;

use super::{failed, Alert, LoadState, PatientRow};

pub const SEARCH_PLACEHOLDER: &str = "Search patients...";

/// Case-insensitive substring match on a patient name. An empty query
/// matches everything.
pub fn name_matches(name: &str, query: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase())
}

#[derive(Debug, Clone)]
pub struct PatientsListScreen {
    client: PatientClient,
    patients: Vec<Patient>,
    query: String,
    state: LoadState,
}

impl PatientsListScreen {
    pub fn new(client: PatientClient) -> Self {
        Self {
            client,
            patients: Vec::new(),
            query: String::new(),
            state: LoadState::Idle,
        }
    }

    /// The tab gained focus: fetch the whole collection again.
    pub fn on_focus(&mut self) -> HttpRequest {
        self.state = LoadState::Loading;
        self.client.build_list_patients()
    }

    /// On failure the previously loaded list stays on screen.
    pub fn on_patients(&mut self, reply: Reply) -> Option<Alert> {
        match reply.and_then(|r| self.client.parse_list_patients(r)) {
            Ok(patients) => {
                self.patients = patients;
                self.state = LoadState::Loaded;
                None
            }
            Err(err) => {
                self.state = LoadState::Failed;
                Some(failed("list patients", &err, "Failed to fetch patients"))
            }
        }
    }

    /// Called on every keystroke in the search box.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn total(&self) -> usize {
        self.patients.len()
    }

    /// Rows matching the current query, in server order.
    pub fn rows(&self) -> Vec<PatientRow> {
        self.patients
            .iter()
            .filter(|p| name_matches(&p.name, &self.query))
            .map(PatientRow::from)
            .collect()
    }

    pub fn open(&self, patient_id: &str) -> NavAction {
        NavAction::to(Route::PatientDetails {
            patient_id: patient_id.to_string(),
        })
    }
}
