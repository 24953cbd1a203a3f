//! Stateless HTTP request builder and response parser for the patient API.
//!
//! # Design
//! `PatientClient` holds only a `base_url` and carries no mutable state
//! between calls. Each route is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Patient, PatientHistory, PatientInput, Test, TestInput};

/// Synchronous, stateless client for the patient API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientClient {
    base_url: String,
}

impl PatientClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join `path` (with or without a leading `/`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // -- patients ---------------------------------------------------------

    pub fn build_list_patients(&self) -> HttpRequest {
        HttpRequest::bare(HttpMethod::Get, self.url("patients"))
    }

    pub fn build_list_critical_patients(&self) -> HttpRequest {
        HttpRequest::bare(HttpMethod::Get, self.url("patients/critical"))
    }

    pub fn build_get_patient(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::bare(HttpMethod::Get, self.patient_url(id)?))
    }

    pub fn build_create_patient(&self, input: &PatientInput) -> Result<HttpRequest, ApiError> {
        HttpRequest::json(HttpMethod::Post, self.url("patients"), input)
    }

    pub fn build_update_patient(
        &self,
        id: &str,
        input: &PatientInput,
    ) -> Result<HttpRequest, ApiError> {
        HttpRequest::json(HttpMethod::Put, self.patient_url(id)?, input)
    }

    pub fn build_delete_patient(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::bare(HttpMethod::Delete, self.patient_url(id)?))
    }

    pub fn build_get_patient_history(&self, id: &str) -> Result<HttpRequest, ApiError> {
        let path = format!("{}/history", self.patient_url(id)?);
        Ok(HttpRequest::bare(HttpMethod::Get, path))
    }

    pub fn parse_list_patients(&self, response: HttpResponse) -> Result<Vec<Patient>, ApiError> {
        decode(response)
    }

    pub fn parse_list_critical_patients(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Patient>, ApiError> {
        decode(response)
    }

    pub fn parse_get_patient(&self, response: HttpResponse) -> Result<Patient, ApiError> {
        decode(response)
    }

    pub fn parse_create_patient(&self, response: HttpResponse) -> Result<Patient, ApiError> {
        decode(response)
    }

    pub fn parse_update_patient(&self, response: HttpResponse) -> Result<Patient, ApiError> {
        decode(response)
    }

    pub fn parse_delete_patient(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_get_patient_history(
        &self,
        response: HttpResponse,
    ) -> Result<PatientHistory, ApiError> {
        decode(response)
    }

    // -- tests ------------------------------------------------------------

    pub fn build_list_tests(&self, patient_id: &str) -> Result<HttpRequest, ApiError> {
        let path = format!("{}/tests", self.patient_url(patient_id)?);
        Ok(HttpRequest::bare(HttpMethod::Get, path))
    }

    pub fn build_create_test(
        &self,
        patient_id: &str,
        input: &TestInput,
    ) -> Result<HttpRequest, ApiError> {
        let path = format!("{}/tests", self.patient_url(patient_id)?);
        HttpRequest::json(HttpMethod::Post, path, input)
    }

    pub fn build_get_test(&self, patient_id: &str, test_id: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::bare(HttpMethod::Get, self.test_url(patient_id, test_id)?))
    }

    pub fn build_update_test(
        &self,
        patient_id: &str,
        test_id: &str,
        input: &TestInput,
    ) -> Result<HttpRequest, ApiError> {
        HttpRequest::json(HttpMethod::Put, self.test_url(patient_id, test_id)?, input)
    }

    pub fn build_delete_test(
        &self,
        patient_id: &str,
        test_id: &str,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::bare(HttpMethod::Delete, self.test_url(patient_id, test_id)?))
    }

    pub fn parse_list_tests(&self, response: HttpResponse) -> Result<Vec<Test>, ApiError> {
        decode(response)
    }

    pub fn parse_create_test(&self, response: HttpResponse) -> Result<Test, ApiError> {
        decode(response)
    }

    pub fn parse_get_test(&self, response: HttpResponse) -> Result<Test, ApiError> {
        decode(response)
    }

    pub fn parse_update_test(&self, response: HttpResponse) -> Result<Test, ApiError> {
        decode(response)
    }

    pub fn parse_delete_test(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn patient_url(&self, id: &str) -> Result<String, ApiError> {
        Ok(format!("{}/patients/{}", self.base_url, segment(id)?))
    }

    fn test_url(&self, patient_id: &str, test_id: &str) -> Result<String, ApiError> {
        Ok(format!("{}/tests/{}", self.patient_url(patient_id)?, segment(test_id)?))
    }
}

/// Validate an identifier for use as a single path segment.
fn segment(id: &str) -> Result<&str, ApiError> {
    let bad = |c: char| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace();
    if id.is_empty() || id.contains(bad) {
        return Err(ApiError::InvalidId(id.to_string()));
    }
    Ok(id)
}

/// Map non-success status codes to the appropriate `ApiError` variant.
pub(crate) fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Check the status, then deserialize the JSON body.
pub(crate) fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Gender, TestType};

    fn client() -> PatientClient {
        PatientClient::new("http://10.0.2.2:5000/api")
    }

    fn input() -> PatientInput {
        PatientInput {
            name: "John Doe".to_string(),
            age: 30,
            gender: Gender::Male,
            address: "123 Main St".to_string(),
            phone_number: "555-1234".to_string(),
            medical_history: vec!["Allergy".to_string(), "Hypertension".to_string()],
        }
    }

    #[test]
    fn build_list_patients_produces_correct_request() {
        let req = client().build_list_patients();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://10.0.2.2:5000/api/patients");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_list_critical_patients_hits_critical_route() {
        let req = client().build_list_critical_patients();
        assert_eq!(req.path, "http://10.0.2.2:5000/api/patients/critical");
    }

    #[test]
    fn build_get_patient_produces_correct_request() {
        let req = client().build_get_patient("123").unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://10.0.2.2:5000/api/patients/123");
    }

    #[test]
    fn build_create_patient_sends_all_fields() {
        let req = client().build_create_patient(&input()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://10.0.2.2:5000/api/patients");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "John Doe");
        assert_eq!(body["age"], 30);
        assert_eq!(body["gender"], "male");
        assert_eq!(body["phoneNumber"], "555-1234");
        assert_eq!(body["medicalHistory"][1], "Hypertension");
    }

    #[test]
    fn build_update_patient_is_put_on_patient_path() {
        let req = client().build_update_patient("123", &input()).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://10.0.2.2:5000/api/patients/123");
        assert!(req.body.is_some());
    }

    #[test]
    fn build_delete_patient_has_no_body() {
        let req = client().build_delete_patient("123").unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }

    #[test]
    fn test_routes_are_scoped_under_patient() {
        let c = client();
        assert_eq!(
            c.build_list_tests("123").unwrap().path,
            "http://10.0.2.2:5000/api/patients/123/tests"
        );
        assert_eq!(
            c.build_get_patient_history("123").unwrap().path,
            "http://10.0.2.2:5000/api/patients/123/history"
        );
        assert_eq!(
            c.build_get_test("123", "456").unwrap().path,
            "http://10.0.2.2:5000/api/patients/123/tests/456"
        );
        let del = c.build_delete_test("123", "456").unwrap();
        assert_eq!(del.method, HttpMethod::Delete);
        assert_eq!(del.path, "http://10.0.2.2:5000/api/patients/123/tests/456");
    }

    #[test]
    fn build_create_test_sends_type_and_value() {
        let input = TestInput {
            kind: TestType::BloodPressure,
            value: "120/80".to_string(),
        };
        let req = client().build_create_test("123", &input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"type": "Blood Pressure", "value": "120/80"}));
    }

    #[test]
    fn unsafe_identifiers_are_rejected() {
        let c = client();
        for id in ["", "a/b", "a b", "x?y", "x#y", "%2F"] {
            let err = c.build_get_patient(id).unwrap_err();
            assert!(matches!(err, ApiError::InvalidId(_)), "{id:?}");
        }
        assert!(c.build_update_test("ok", "../x", &TestInput {
            kind: TestType::HeartbeatRate,
            value: "70".into(),
        })
        .is_err());
    }

    #[test]
    fn parse_list_patients_success() {
        let response = HttpResponse::new(
            200,
            r#"[{"_id":"1","name":"John Doe","age":65,"gender":"male"}]"#,
        );
        let patients = client().parse_list_patients(response).unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].name, "John Doe");
    }

    #[test]
    fn parse_get_patient_not_found() {
        let err = client().parse_get_patient(HttpResponse::new(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_patient_accepts_any_2xx() {
        let body = r#"{"_id":"9","name":"New","age":1,"gender":"other"}"#;
        assert!(client().parse_create_patient(HttpResponse::new(201, body)).is_ok());
        assert!(client().parse_create_patient(HttpResponse::new(200, body)).is_ok());
    }

    #[test]
    fn parse_create_patient_wrong_status() {
        let err = client()
            .parse_create_patient(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn parse_delete_ignores_body() {
        let c = client();
        assert!(c.parse_delete_patient(HttpResponse::new(204, "")).is_ok());
        assert!(c
            .parse_delete_test(HttpResponse::new(200, r#"{"message":"deleted"}"#))
            .is_ok());
        let err = c.parse_delete_test(HttpResponse::new(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_history_reads_patient_and_tests() {
        let body = r#"{"patient":{"name":"John Doe","age":30,"gender":"Male"},
            "tests":[{"_id":"1","type":"Blood Pressure","value":"120/80"}]}"#;
        let history = client()
            .parse_get_patient_history(HttpResponse::new(200, body))
            .unwrap();
        assert_eq!(history.patient.name, "John Doe");
        assert_eq!(history.tests.len(), 1);
        assert_eq!(history.tests[0].value, "120/80");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = PatientClient::new("http://localhost:5000/api/");
        assert_eq!(
            client.build_list_patients().path,
            "http://localhost:5000/api/patients"
        );
    }

    #[test]
    fn parse_list_patients_bad_json() {
        let err = client()
            .parse_list_patients(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
