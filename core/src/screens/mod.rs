//! Screen controllers.
//!
//! # Design
//! Every controller is sans-IO, like `PatientClient`: it hands out
//! `HttpRequest`s when the screen mounts, gains focus, or submits, and takes
//! the matching `Reply` back. In between it owns the screen's local state
//! (lists, form text, loading and submitting flags) and exposes view rows,
//! `Alert`s, and `NavAction`s for the host to render and apply.
//!
//! Mutating screens follow `idle -> submitting -> idle`. Success yields an
//! `Outcome` carrying the navigation to perform; failure yields an error
//! alert and leaves the form untouched. Nothing is retried.

pub mod add_patient;
pub mod critical_patients;
pub mod patient_details;
pub mod patient_history;
pub mod patients_list;
pub mod settings;
pub mod update_patient;
pub mod welcome;

pub use add_patient::AddPatientScreen;
pub use add_test::AddTestScreen;
pub use critical_patients::CriticalPatientsScreen;
pub use patient_details::PatientDetailsScreen;
pub use patient_history::PatientHistoryScreen;
pub use patients_list::PatientsListScreen;
pub use settings::SettingsScreen;
pub use update_patient::UpdatePatientScreen;
pub use update_test::UpdateTestScreen;
pub use welcome::WelcomeScreen;

use tracing::error;

use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::nav::NavAction;
use crate::types::{Patient, Test};

/// Text shown by list screens with nothing to show.
pub const NO_TESTS: &str = "No tests available";

/// A modal message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.title == "Error"
    }
}

/// A destructive action waiting for the user's explicit go-ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl Confirmation {
    fn deletion(what: &str) -> Self {
        Self {
            title: "Confirm Deletion".to_string(),
            message: format!(
                "Are you sure you want to delete this {what}? This action cannot be undone."
            ),
            confirm_label: "Delete".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
}

impl SubmitState {
    /// Enter `Submitting`. Returns false if a submission is already in
    /// flight.
    fn begin(&mut self) -> bool {
        if *self == SubmitState::Submitting {
            return false;
        }
        *self = SubmitState::Submitting;
        true
    }
}

/// Result of pressing a submit control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Validation passed; execute this request and hand the reply back.
    Send(HttpRequest),
    /// Validation failed; nothing was sent.
    Rejected(Alert),
    /// A submission is already in flight; the control is disabled.
    Busy,
}

/// What a finished mutation asks the host to show and do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub alert: Alert,
    /// Present only on success.
    pub nav: Option<NavAction>,
}

impl Outcome {
    pub fn succeeded(&self) -> bool {
        self.nav.is_some()
    }
}

/// Settle a mutation: back to idle, then either a success alert plus
/// navigation, or a logged failure and a generic alert.
fn settle<T>(
    state: &mut SubmitState,
    result: Result<T, ApiError>,
    operation: &str,
    success: &str,
    failure: &str,
    nav: NavAction,
) -> Outcome {
    *state = SubmitState::Idle;
    match result {
        Ok(_) => Outcome {
            alert: Alert::success(success),
            nav: Some(nav),
        },
        Err(err) => Outcome {
            alert: failed(operation, &err, failure),
            nav: None,
        },
    }
}

/// Log a remote failure and build the alert the user sees.
fn failed(operation: &str, err: &ApiError, message: &str) -> Alert {
    error!(operation, error = %err, "remote call failed");
    Alert::error(message)
}

/// One line of a patient list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRow {
    pub id: String,
    pub name: String,
    pub summary: String,
    pub critical: bool,
}

impl From<&Patient> for PatientRow {
    fn from(p: &Patient) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            summary: p.summary(),
            critical: p.critical_condition,
        }
    }
}

/// The profile block at the top of the details and history screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientCard {
    pub name: String,
    pub summary: String,
    pub address: String,
    pub phone_number: String,
    pub critical: bool,
}

impl From<&Patient> for PatientCard {
    fn from(p: &Patient) -> Self {
        Self {
            name: p.name.clone(),
            summary: p.summary(),
            address: p.address.clone().unwrap_or_default(),
            phone_number: p.phone_number.clone().unwrap_or_default(),
            critical: p.critical_condition,
        }
    }
}

/// One line of a test list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRow {
    pub id: String,
    pub kind: String,
    pub value: String,
    pub date: Option<String>,
}

impl From<&Test> for TestRow {
    fn from(t: &Test) -> Self {
        Self {
            id: t.id.clone(),
            kind: t.kind.label().to_string(),
            value: t.value.clone(),
            date: t.date_label(),
        }
    }
}
