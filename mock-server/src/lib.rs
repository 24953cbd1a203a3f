//! In-memory stand-in for the patient service.
//!
//! Serves the same routes as the real backend under `/api`. Whether a patient
//! is critical is decided by whoever seeds the store; the mock never derives
//! it from test values.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub medical_history: Vec<String>,
    #[serde(default)]
    pub critical_condition: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    #[serde(rename = "_id")]
    pub id: String,
    pub patient_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct History {
    pub patient: Patient,
    pub tests: Vec<Test>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInput {
    pub name: String,
    pub age: u32,
    pub gender: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub medical_history: Vec<String>,
}

#[derive(Deserialize)]
pub struct TestInput {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Default)]
pub struct Store {
    patients: Vec<Patient>,
    /// Newest first.
    tests: Vec<Test>,
}

impl Store {
    /// Seed a patient as-is, including its `critical_condition` flag.
    pub fn insert_patient(&mut self, patient: Patient) {
        self.patients.push(patient);
    }

    /// Seed a test as-is, keeping its timestamp.
    pub fn insert_test(&mut self, test: Test) {
        self.tests.insert(0, test);
    }

    fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    fn tests_for(&self, patient_id: &str) -> Vec<Test> {
        let mut tests: Vec<Test> = self
            .tests
            .iter()
            .filter(|t| t.patient_id == patient_id)
            .cloned()
            .collect();
        tests.sort_by(|a, b| b.date.cmp(&a.date));
        tests
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Db::default())
}

/// Router over an existing (possibly seeded) store.
pub fn app_with(db: Db) -> Router {
    let api = Router::new()
        .route("/patients", get(list_patients).post(create_patient))
        .route("/patients/critical", get(list_critical_patients))
        .route(
            "/patients/{id}",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        .route("/patients/{id}/history", get(get_history))
        .route("/patients/{id}/tests", get(list_tests).post(create_test))
        .route(
            "/patients/{id}/tests/{test_id}",
            get(get_test).put(update_test).delete(delete_test),
        )
        .with_state(db);
    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

// --- patients ---

async fn list_patients(State(db): State<Db>) -> Json<Vec<Patient>> {
    Json(db.read().await.patients.clone())
}

async fn list_critical_patients(State(db): State<Db>) -> Json<Vec<Patient>> {
    let store = db.read().await;
    Json(
        store
            .patients
            .iter()
            .filter(|p| p.critical_condition)
            .cloned()
            .collect(),
    )
}

async fn create_patient(
    State(db): State<Db>,
    Json(input): Json<PatientInput>,
) -> (StatusCode, Json<Patient>) {
    let patient = Patient {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        age: input.age,
        gender: input.gender,
        address: input.address,
        phone_number: input.phone_number,
        medical_history: input.medical_history,
        critical_condition: false,
    };
    debug!(id = %patient.id, "patient created");
    db.write().await.patients.push(patient.clone());
    (StatusCode::CREATED, Json(patient))
}

async fn get_patient(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, StatusCode> {
    let store = db.read().await;
    store.patient(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_patient(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<PatientInput>,
) -> Result<Json<Patient>, StatusCode> {
    let mut store = db.write().await;
    let patient = store
        .patients
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    patient.name = input.name;
    patient.age = input.age;
    patient.gender = input.gender;
    patient.address = input.address;
    patient.phone_number = input.phone_number;
    patient.medical_history = input.medical_history;
    Ok(Json(patient.clone()))
}

async fn delete_patient(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    let before = store.patients.len();
    store.patients.retain(|p| p.id != id);
    if store.patients.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    store.tests.retain(|t| t.patient_id != id);
    debug!(%id, "patient deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn get_history(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<History>, StatusCode> {
    let store = db.read().await;
    let patient = store.patient(&id).cloned().ok_or(StatusCode::NOT_FOUND)?;
    let tests = store.tests_for(&id);
    Ok(Json(History { patient, tests }))
}

// --- tests ---

async fn list_tests(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Test>>, StatusCode> {
    let store = db.read().await;
    store.patient(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(store.tests_for(&id)))
}

async fn create_test(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<TestInput>,
) -> Result<(StatusCode, Json<Test>), StatusCode> {
    let mut store = db.write().await;
    store.patient(&id).ok_or(StatusCode::NOT_FOUND)?;
    let test = Test {
        id: Uuid::new_v4().to_string(),
        patient_id: id,
        kind: input.kind,
        value: input.value,
        date: Utc::now(),
    };
    store.insert_test(test.clone());
    Ok((StatusCode::CREATED, Json(test)))
}

async fn get_test(
    State(db): State<Db>,
    Path((id, test_id)): Path<(String, String)>,
) -> Result<Json<Test>, StatusCode> {
    let store = db.read().await;
    store
        .tests
        .iter()
        .find(|t| t.patient_id == id && t.id == test_id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_test(
    State(db): State<Db>,
    Path((id, test_id)): Path<(String, String)>,
    Json(input): Json<TestInput>,
) -> Result<Json<Test>, StatusCode> {
    let mut store = db.write().await;
    let test = store
        .tests
        .iter_mut()
        .find(|t| t.patient_id == id && t.id == test_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    test.kind = input.kind;
    test.value = input.value;
    Ok(Json(test.clone()))
}

async fn delete_test(
    State(db): State<Db>,
    Path((id, test_id)): Path<(String, String)>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    let before = store.tests.len();
    store.tests.retain(|t| !(t.patient_id == id && t.id == test_id));
    if store.tests.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_at(id: &str, patient_id: &str, day: u32) -> Test {
        Test {
            id: id.to_string(),
            patient_id: patient_id.to_string(),
            kind: "Heartbeat Rate".to_string(),
            value: "70".to_string(),
            date: Utc.with_ymd_and_hms(2024, 11, day, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn patient_serializes_with_backend_field_names() {
        let patient = Patient {
            id: "p1".to_string(),
            name: "Test".to_string(),
            age: 40,
            gender: "female".to_string(),
            address: String::new(),
            phone_number: "555".to_string(),
            medical_history: vec!["Asthma".to_string()],
            critical_condition: true,
        };
        let json = serde_json::to_value(&patient).unwrap();
        assert_eq!(json["_id"], "p1");
        assert_eq!(json["phoneNumber"], "555");
        assert_eq!(json["medicalHistory"][0], "Asthma");
        assert_eq!(json["criticalCondition"], true);
    }

    #[test]
    fn patient_input_defaults_optional_fields() {
        let input: PatientInput =
            serde_json::from_str(r#"{"name":"A","age":3,"gender":"male"}"#).unwrap();
        assert!(input.address.is_empty());
        assert!(input.medical_history.is_empty());
    }

    #[test]
    fn patient_input_rejects_missing_name() {
        let result: Result<PatientInput, _> = serde_json::from_str(r#"{"age":3,"gender":"male"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_input_uses_type_key() {
        let input: TestInput =
            serde_json::from_str(r#"{"type":"Blood Pressure","value":"120/80"}"#).unwrap();
        assert_eq!(input.kind, "Blood Pressure");
    }

    #[test]
    fn tests_for_orders_newest_first() {
        let mut store = Store::default();
        store.insert_test(test_at("old", "p", 1));
        store.insert_test(test_at("new", "p", 20));
        store.insert_test(test_at("mid", "p", 10));
        store.insert_test(test_at("other", "q", 30));
        let ids: Vec<_> = store.tests_for("p").into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }
}
