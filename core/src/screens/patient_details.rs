//! One patient's profile and their most recent tests.
//!
//! Both fetches go out on every focus. The host also passes the route's
//! one-shot `refresh` flag to `on_refresh` after a child screen mutated
//! data, which forces the same two fetches.

use crate::client::PatientClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, Reply};
use crate::nav::{NavAction, Route};
use crate::types::{Patient, Test};

use super::{failed, Alert, LoadState, PatientCard, TestRow};

/// How many tests the details screen lists; the full list lives on the
/// history screen.
pub const RECENT_TESTS: usize = 5;

#[derive(Debug, Clone)]
pub struct PatientDetailsScreen {
    client: PatientClient,
    patient_id: String,
    patient_request: HttpRequest,
    tests_request: HttpRequest,
    patient: Option<Patient>,
    tests: Vec<Test>,
    state: LoadState,
}

impl PatientDetailsScreen {
    pub fn new(client: PatientClient, patient_id: &str) -> Result<Self, ApiError> {
        let patient_request = client.build_get_patient(patient_id)?;
        let tests_request = client.build_list_tests(patient_id)?;
        Ok(Self {
            client,
            patient_id: patient_id.to_string(),
            patient_request,
            tests_request,
            patient: None,
            tests: Vec::new(),
            state: LoadState::Loading,
        })
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    /// The screen gained focus: fetch the patient and their tests.
    pub fn on_focus(&mut self) -> Vec<HttpRequest> {
        vec![self.patient_request.clone(), self.tests_request.clone()]
    }

    /// Re-fetch if the route carried a refresh flag.
    pub fn on_refresh(&mut self, refresh: bool) -> Vec<HttpRequest> {
        if refresh {
            self.on_focus()
        } else {
            Vec::new()
        }
    }

    /// The spinner goes away once the patient fetch settles, either way.
    pub fn on_patient(&mut self, reply: Reply) -> Option<Alert> {
        match reply.and_then(|r| self.client.parse_get_patient(r)) {
            Ok(patient) => {
                self.patient = Some(patient);
                self.state = LoadState::Loaded;
                None
            }
            Err(err) => {
                self.state = LoadState::Failed;
                Some(failed("get patient", &err, "Failed to fetch patient details"))
            }
        }
    }

    pub fn on_tests(&mut self, reply: Reply) -> Option<Alert> {
        match reply.and_then(|r| self.client.parse_list_tests(r)) {
            Ok(tests) => {
                self.tests = tests;
                None
            }
            Err(err) => Some(failed("list tests", &err, "Failed to fetch patient tests")),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn card(&self) -> Option<PatientCard> {
        self.patient.as_ref().map(PatientCard::from)
    }

    /// Up to [`RECENT_TESTS`] tests, in the order the server returned them.
    pub fn recent_tests(&self) -> Vec<TestRow> {
        self.tests.iter().take(RECENT_TESTS).map(TestRow::from).collect()
    }

    pub fn empty_tests_text(&self) -> Option<&'static str> {
        self.tests.is_empty().then_some(super::NO_TESTS)
    }

    pub fn add_test(&self) -> NavAction {
        NavAction::to(Route::AddTest {
            patient_id: self.patient_id.clone(),
        })
    }

    pub fn view_history(&self) -> NavAction {
        NavAction::to(Route::PatientHistory {
            patient_id: self.patient_id.clone(),
        })
    }

    pub fn edit_patient(&self) -> NavAction {
        NavAction::to(Route::UpdatePatient {
            patient_id: self.patient_id.clone(),
        })
    }

    pub fn open_test(&self, test_id: &str) -> NavAction {
        NavAction::to(Route::UpdateTest {
            patient_id: self.patient_id.clone(),
            test_id: test_id.to_string(),
        })
    }
}
