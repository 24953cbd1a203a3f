//! New-patient form.

use crate::client::PatientClient;
use crate::http::Reply;
use crate::nav::{NavAction, Route, Tab};
use crate::validation::PatientForm;

use super::{settle, Alert, Outcome, Submission, SubmitState};

#[derive(Debug, Clone)]
pub struct AddPatientScreen {
    client: PatientClient,
    pub form: PatientForm,
    state: SubmitState,
}

impl AddPatientScreen {
    pub fn new(client: PatientClient) -> Self {
        Self {
            client,
            form: PatientForm::default(),
            state: SubmitState::Idle,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    /// "Add Patient" was pressed. Validation runs first; nothing is sent
    /// unless it passes.
    pub fn submit(&mut self) -> Submission {
        if self.is_submitting() {
            return Submission::Busy;
        }
        let input = match self.form.validate() {
            Ok(input) => input,
            Err(err) => return Submission::Rejected(Alert::error(err.to_string())),
        };
        match self.client.build_create_patient(&input) {
            Ok(request) => {
                self.state.begin();
                Submission::Send(request)
            }
            Err(err) => Submission::Rejected(super::failed("add patient", &err, "Failed to add patient")),
        }
    }

    /// On success the form is cleared and the list tab is told to refresh.
    pub fn on_created(&mut self, reply: Reply) -> Outcome {
        let result = reply.and_then(|r| self.client.parse_create_patient(r));
        let outcome = settle(
            &mut self.state,
            result,
            "add patient",
            "Patient added successfully",
            "Failed to add patient",
            NavAction::refreshing(Route::Main {
                tab: Tab::PatientsList,
            }),
        );
        if outcome.succeeded() {
            self.form = PatientForm::default();
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, HttpResponse};
    use crate::error::ApiError;

    fn screen() -> AddPatientScreen {
        AddPatientScreen::new(PatientClient::new("http://h/api"))
    }

    fn fill(s: &mut AddPatientScreen) {
        s.form.name = "John Doe".into();
        s.form.age = "30".into();
        s.form.gender = "male".into();
        s.form.medical_history = "Allergy, Hypertension".into();
    }

    #[test]
    fn missing_name_and_age_blocks_submission() {
        let mut s = screen();
        s.form.gender = "male".into();
        match s.submit() {
            Submission::Rejected(alert) => {
                assert_eq!(alert.title, "Error");
                assert_eq!(alert.message, "Please fill in all required fields.");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert!(!s.is_submitting());
    }

    #[test]
    fn valid_form_posts_and_disables_submit() {
        let mut s = screen();
        fill(&mut s);
        let Submission::Send(req) = s.submit() else {
            panic!("expected a request");
        };
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://h/api/patients");
        assert!(s.is_submitting());
        assert_eq!(s.submit(), Submission::Busy);
    }

    #[test]
    fn success_navigates_to_list_with_refresh() {
        let mut s = screen();
        fill(&mut s);
        s.submit();
        let body = r#"{"_id":"9","name":"John Doe","age":30,"gender":"male"}"#;
        let outcome = s.on_created(Ok(HttpResponse::new(201, body)));
        assert_eq!(outcome.alert, Alert::success("Patient added successfully"));
        assert_eq!(
            outcome.nav,
            Some(NavAction::refreshing(Route::Main { tab: Tab::PatientsList }))
        );
        assert!(!s.is_submitting());
        assert!(s.form.name.is_empty());
    }

    #[test]
    fn failure_keeps_form_and_returns_to_idle() {
        let mut s = screen();
        fill(&mut s);
        s.submit();
        let outcome = s.on_created(Err(ApiError::Network("refused".into())));
        assert_eq!(outcome.alert, Alert::error("Failed to add patient"));
        assert!(outcome.nav.is_none());
        assert!(!s.is_submitting());
        assert_eq!(s.form.name, "John Doe");
    }
}
