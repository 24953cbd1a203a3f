//! Patients the backend flags as critical. Fetched once when the tab first
//! mounts; focus does not refresh it.

use crate::client::PatientClient;
use crate::http::{HttpRequest, Reply};
use crate::nav::{NavAction, Route};
use crate::types::Patient;

use super::{failed, Alert, LoadState, PatientRow};

pub const NO_CRITICAL_PATIENTS: &str = "No critical patients";

#[derive(Debug, Clone)]
pub struct CriticalPatientsScreen {
    client: PatientClient,
    patients: Vec<Patient>,
    state: LoadState,
}

impl CriticalPatientsScreen {
    pub fn new(client: PatientClient) -> Self {
        Self {
            client,
            patients: Vec::new(),
            state: LoadState::Idle,
        }
    }

    /// Returns the fetch only the first time the screen mounts.
    pub fn on_mount(&mut self) -> Option<HttpRequest> {
        if self.state != LoadState::Idle {
            return None;
        }
        self.state = LoadState::Loading;
        Some(self.client.build_list_critical_patients())
    }

    pub fn on_patients(&mut self, reply: Reply) -> Option<Alert> {
        match reply.and_then(|r| self.client.parse_list_critical_patients(r)) {
            Ok(patients) => {
                self.patients = patients;
                self.state = LoadState::Loaded;
                None
            }
            Err(err) => {
                self.state = LoadState::Failed;
                Some(failed(
                    "list critical patients",
                    &err,
                    "Failed to fetch critical patients",
                ))
            }
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn rows(&self) -> Vec<PatientRow> {
        self.patients.iter().map(PatientRow::from).collect()
    }

    /// Placeholder text while the list is empty, including before the
    /// first response arrives.
    pub fn empty_text(&self) -> Option<&'static str> {
        self.patients.is_empty().then_some(NO_CRITICAL_PATIENTS)
    }

    pub fn open(&self, patient_id: &str) -> NavAction {
        NavAction::to(Route::PatientDetails {
            patient_id: patient_id.to_string(),
        })
    }
}
