//! Thin HTTP client wrapper: `get`, `post`, `put` and `delete` against the
//! configured base URL, decoding JSON bodies on success.
//!
//! There is no retry, timeout, backoff, or auth header. Every failure is
//! returned to the caller, which is expected to surface it as an alert.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::client::{check_status, decode, PatientClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, Reply};
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    routes: PatientClient,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(routes: PatientClient, transport: T) -> Self {
        Self { routes, transport }
    }

    /// The request builder bound to the same base URL.
    pub fn routes(&self) -> &PatientClient {
        &self.routes
    }

    /// Execute a request built elsewhere (typically by a screen controller).
    pub fn send(&self, request: &HttpRequest) -> Reply {
        debug!(method = %request.method, path = %request.path, "sending request");
        let reply = self.transport.execute(request);
        match &reply {
            Ok(response) => debug!(status = response.status, "response received"),
            Err(err) => debug!(error = %err, "transport failed"),
        }
        reply
    }

    pub fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = HttpRequest::bare(HttpMethod::Get, self.routes.url(path));
        decode(self.send(&request)?)
    }

    pub fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = HttpRequest::json(HttpMethod::Post, self.routes.url(path), body)?;
        decode(self.send(&request)?)
    }

    pub fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = HttpRequest::json(HttpMethod::Put, self.routes.url(path), body)?;
        decode(self.send(&request)?)
    }

    pub fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = HttpRequest::bare(HttpMethod::Delete, self.routes.url(path));
        check_status(&self.send(&request)?)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::http::HttpResponse;
    use crate::types::{Patient, TestInput, TestType};

    /// Replies with canned responses and remembers what was sent.
    struct Canned {
        replies: RefCell<Vec<Reply>>,
        sent: RefCell<Vec<HttpRequest>>,
    }

    impl Canned {
        fn new(replies: Vec<Reply>) -> Self {
            Self {
                replies: RefCell::new(replies),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Canned {
        fn execute(&self, request: &HttpRequest) -> Reply {
            self.sent.borrow_mut().push(request.clone());
            self.replies.borrow_mut().remove(0)
        }
    }

    fn api(replies: Vec<Reply>) -> ApiClient<Canned> {
        ApiClient::new(PatientClient::new("http://host:5000/api"), Canned::new(replies))
    }

    #[test]
    fn get_decodes_body() {
        let api = api(vec![Ok(HttpResponse::new(
            200,
            r#"[{"_id":"1","name":"A","age":1,"gender":"male"}]"#,
        ))]);
        let patients: Vec<Patient> = api.get("/patients").unwrap();
        assert_eq!(patients[0].name, "A");
        let sent = api.transport.sent.borrow();
        assert_eq!(sent[0].path, "http://host:5000/api/patients");
        assert_eq!(sent[0].method, HttpMethod::Get);
    }

    #[test]
    fn post_serializes_body_and_decodes_reply() {
        let api = api(vec![Ok(HttpResponse::new(
            201,
            r#"{"_id":"t","type":"Heartbeat Rate","value":"72"}"#,
        ))]);
        let input = TestInput {
            kind: TestType::HeartbeatRate,
            value: "72".into(),
        };
        let created: crate::types::Test = api.post("patients/1/tests", &input).unwrap();
        assert_eq!(created.id, "t");
        let sent = api.transport.sent.borrow();
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert!(sent[0].body.as_deref().unwrap().contains("Heartbeat Rate"));
    }

    #[test]
    fn put_reports_http_error_with_status() {
        let api = api(vec![Ok(HttpResponse::new(500, "boom"))]);
        let err = api
            .put::<_, Patient>("patients/1", &serde_json::json!({}))
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 500,
                body: "boom".into()
            }
        );
    }

    #[test]
    fn delete_passes_network_errors_through() {
        let api = api(vec![Err(ApiError::Network("connection refused".into()))]);
        let err = api.delete("patients/1").unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
