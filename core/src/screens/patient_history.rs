//! Read-only view of a patient and every test on record, fetched as a
//! single aggregate when the screen mounts.

use crate::client::PatientClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, Reply};
use crate::types::PatientHistory;

use super::{failed, Alert, LoadState, PatientCard, TestRow};

#[derive(Debug, Clone)]
pub struct PatientHistoryScreen {
    client: PatientClient,
    request: HttpRequest,
    history: Option<PatientHistory>,
    state: LoadState,
}

impl PatientHistoryScreen {
    pub fn new(client: PatientClient, patient_id: &str) -> Result<Self, ApiError> {
        let request = client.build_get_patient_history(patient_id)?;
        Ok(Self {
            client,
            request,
            history: None,
            state: LoadState::Loading,
        })
    }

    pub fn on_mount(&self) -> HttpRequest {
        self.request.clone()
    }

    pub fn on_history(&mut self, reply: Reply) -> Option<Alert> {
        match reply.and_then(|r| self.client.parse_get_patient_history(r)) {
            Ok(history) => {
                self.history = Some(history);
                self.state = LoadState::Loaded;
                None
            }
            Err(err) => {
                self.state = LoadState::Failed;
                Some(failed(
                    "get patient history",
                    &err,
                    "Failed to fetch patient history",
                ))
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn card(&self) -> Option<PatientCard> {
        self.history.as_ref().map(|h| PatientCard::from(&h.patient))
    }

    pub fn tests(&self) -> Vec<TestRow> {
        self.history
            .iter()
            .flat_map(|h| h.tests.iter().map(TestRow::from))
            .collect()
    }

    pub fn empty_tests_text(&self) -> Option<&'static str> {
        match &self.history {
            Some(h) if h.tests.is_empty() => Some(super::NO_TESTS),
            _ => None,
        }
    }
}
