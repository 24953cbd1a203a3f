//! Domain DTOs for the patient API.
//!
//! # Design
//! Field names follow the backend's JSON (`_id`, `phoneNumber`,
//! `criticalCondition`, ...). The mock server defines its own copies of these
//! shapes; the integration tests catch schema drift between the two crates.
//!
//! Fields the backend may leave out of a document (`_id` on embedded
//! records, optional contact details, the test timestamp) default instead of
//! failing the whole response.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Patient gender as offered by the form picker.
///
/// Serialized lowercase; parsed case-insensitively because older records
/// carry the capitalized label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Wire value, as sent in request payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    /// Picker label, as rendered in list rows.
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown gender: {s}"))
    }
}

impl TryFrom<String> for Gender {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Kind of vital-sign reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TestType {
    #[serde(rename = "Blood Pressure")]
    BloodPressure,
    #[serde(rename = "Respiratory Rate")]
    RespiratoryRate,
    #[serde(rename = "Blood Oxygen Level")]
    BloodOxygenLevel,
    #[serde(rename = "Heartbeat Rate")]
    HeartbeatRate,
}

impl TestType {
    pub const ALL: [TestType; 4] = [
        TestType::BloodPressure,
        TestType::RespiratoryRate,
        TestType::BloodOxygenLevel,
        TestType::HeartbeatRate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TestType::BloodPressure => "Blood Pressure",
            TestType::RespiratoryRate => "Respiratory Rate",
            TestType::BloodOxygenLevel => "Blood Oxygen Level",
            TestType::HeartbeatRate => "Heartbeat Rate",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestType::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown test type: {s}"))
    }
}

impl TryFrom<String> for TestType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A patient record. `critical_condition` is computed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub medical_history: Vec<String>,
    #[serde(default)]
    pub critical_condition: bool,
}

impl Patient {
    /// The "{age} years old • {gender}" line shown under the name.
    pub fn summary(&self) -> String {
        format!("{} years old • {}", self.age, self.gender)
    }
}

/// A single vital-sign reading belonging to one patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub patient_id: String,
    #[serde(rename = "type")]
    pub kind: TestType,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl Test {
    /// Calendar date of the reading, if the server stamped one.
    pub fn date_label(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m-%d").to_string())
    }
}

/// A patient together with every recorded test, fetched as one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientHistory {
    pub patient: Patient,
    #[serde(default)]
    pub tests: Vec<Test>,
}

/// Request payload for creating or replacing a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInput {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub medical_history: Vec<String>,
}

/// Request payload for creating or replacing a test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestInput {
    #[serde(rename = "type")]
    pub kind: TestType,
    pub value: String,
}
