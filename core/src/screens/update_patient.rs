//! Edit or delete an existing patient.
//!
//! The form is pre-populated from a fetch on mount. Deletion is two-step:
//! `request_delete` only raises a confirmation; the DELETE request comes
//! from `confirm_delete`.

use crate::client::PatientClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, Reply};
use crate::nav::{NavAction, Route, Tab};
use crate::validation::PatientForm;

use super::{failed, settle, Alert, Confirmation, LoadState, Outcome, Submission, SubmitState};

#[derive(Debug, Clone)]
pub struct UpdatePatientScreen {
    client: PatientClient,
    patient_id: String,
    get_request: HttpRequest,
    pub form: PatientForm,
    load: LoadState,
    state: SubmitState,
    confirming: bool,
}

impl UpdatePatientScreen {
    pub fn new(client: PatientClient, patient_id: &str) -> Result<Self, ApiError> {
        let get_request = client.build_get_patient(patient_id)?;
        Ok(Self {
            client,
            patient_id: patient_id.to_string(),
            get_request,
            form: PatientForm::default(),
            load: LoadState::Idle,
            state: SubmitState::Idle,
            confirming: false,
        })
    }

    pub fn on_mount(&mut self) -> HttpRequest {
        self.load = LoadState::Loading;
        self.get_request.clone()
    }

    pub fn on_patient(&mut self, reply: Reply) -> Option<Alert> {
        match reply.and_then(|r| self.client.parse_get_patient(r)) {
            Ok(patient) => {
                self.form = PatientForm::from_patient(&patient);
                self.load = LoadState::Loaded;
                None
            }
            Err(err) => {
                self.load = LoadState::Failed;
                Some(failed("get patient", &err, "Failed to fetch patient details"))
            }
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    pub fn submit(&mut self) -> Submission {
        if self.is_submitting() {
            return Submission::Busy;
        }
        let input = match self.form.validate() {
            Ok(input) => input,
            Err(err) => return Submission::Rejected(Alert::error(err.to_string())),
        };
        match self.client.build_update_patient(&self.patient_id, &input) {
            Ok(request) => {
                self.state.begin();
                Submission::Send(request)
            }
            Err(err) => Submission::Rejected(failed("update patient", &err, "Failed to update patient")),
        }
    }

    pub fn on_updated(&mut self, reply: Reply) -> Outcome {
        let result = reply.and_then(|r| self.client.parse_update_patient(r));
        settle(
            &mut self.state,
            result,
            "update patient",
            "Patient updated successfully",
            "Failed to update patient",
            NavAction::GoBack,
        )
    }

    /// First tap on "Delete Patient": ask, don't act. `None` while a
    /// submission is in flight.
    pub fn request_delete(&mut self) -> Option<Confirmation> {
        if self.is_submitting() {
            return None;
        }
        self.confirming = true;
        Some(Confirmation::deletion("patient"))
    }

    pub fn cancel_delete(&mut self) {
        self.confirming = false;
    }

    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    /// The user confirmed. Yields the DELETE only if a confirmation is
    /// pending.
    pub fn confirm_delete(&mut self) -> Option<HttpRequest> {
        if !std::mem::take(&mut self.confirming) || self.is_submitting() {
            return None;
        }
        let request = self.client.build_delete_patient(&self.patient_id).ok()?;
        self.state.begin();
        Some(request)
    }

    pub fn on_deleted(&mut self, reply: Reply) -> Outcome {
        let result = reply.and_then(|r| self.client.parse_delete_patient(r));
        settle(
            &mut self.state,
            result,
            "delete patient",
            "Patient deleted successfully",
            "Failed to delete patient",
            NavAction::refreshing(Route::Main {
                tab: Tab::PatientsList,
            }),
        )
    }
}
