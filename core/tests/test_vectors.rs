//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use serde_json::Value;
use wellcare_core::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, Patient, PatientClient, PatientHistory,
    PatientInput, Test, TestInput,
};

const BASE_URL: &str = "http://10.0.2.2:5000/api";

fn client() -> PatientClient {
    PatientClient::new(BASE_URL)
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

/// Compare method, full URL, headers (when listed) and JSON body (when listed).
fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(
        req.path,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );

    if let Some(headers) = expected["headers"].as_array() {
        let expected_headers: Vec<(String, String)> = headers
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    } else {
        assert!(req.headers.is_empty(), "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let actual: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&actual, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body"),
    }
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

// ---------------------------------------------------------------------------
// Patients
// ---------------------------------------------------------------------------

#[test]
fn create_patient_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/create_patient.json")) {
        let name = case["name"].as_str().unwrap();
        let input: PatientInput = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_patient(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let patient = c.parse_create_patient(simulated(&case)).unwrap();
        let expected: Patient = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(patient, expected, "{name}: parsed result");
    }
}

#[test]
fn list_patients_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/list_patients.json")) {
        let name = case["name"].as_str().unwrap();
        let critical = case["route"] == "critical";

        let req = if critical {
            c.build_list_critical_patients()
        } else {
            c.build_list_patients()
        };
        assert_request(name, &req, &case["expected_request"]);

        let patients = if critical {
            c.parse_list_critical_patients(simulated(&case)).unwrap()
        } else {
            c.parse_list_patients(simulated(&case)).unwrap()
        };
        let expected: Vec<Patient> =
            serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(patients, expected, "{name}: parsed result");
    }
}

#[test]
fn history_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/history.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["patient_id"].as_str().unwrap();

        let req = c.build_get_patient_history(id).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let history = c.parse_get_patient_history(simulated(&case)).unwrap();
        let expected: PatientHistory =
            serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(history, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/create_test.json")) {
        let name = case["name"].as_str().unwrap();
        let patient_id = case["patient_id"].as_str().unwrap();
        let input: TestInput = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_test(patient_id, &input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let test = c.parse_create_test(simulated(&case)).unwrap();
        let expected: Test = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(test, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn error_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/errors.json")) {
        let name = case["name"].as_str().unwrap();
        let status = case["status"].as_u64().unwrap() as u16;
        let body = case["body"].as_str().unwrap();

        let err = c
            .parse_list_patients(HttpResponse::new(status, body))
            .unwrap_err();
        match case["expected_error"].as_str().unwrap() {
            "NotFound" => assert_eq!(err, ApiError::NotFound, "{name}"),
            "Http" => assert_eq!(
                err,
                ApiError::Http {
                    status,
                    body: body.to_string()
                },
                "{name}"
            ),
            "Deserialization" => {
                assert!(matches!(err, ApiError::Deserialization(_)), "{name}: {err:?}")
            }
            other => panic!("unknown error kind: {other}"),
        }
    }
}
