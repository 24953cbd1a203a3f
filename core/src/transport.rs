//! The seam between the sans-IO core and a real network stack.
//!
//! A `Transport` takes an `HttpRequest` built by the core and returns the
//! server's `HttpResponse` as data. Non-2xx statuses are *not* errors at this
//! layer; only failures that prevent a response from arriving are, and they
//! surface as `ApiError::Network`.

use crate::error::ApiError;
use crate::http::{HttpRequest, Reply};

pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Reply;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Reply {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> Reply {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use super::*;
    use crate::http::{HttpMethod, HttpResponse};

    /// Blocking transport backed by a ureq agent.
    ///
    /// ureq's status-code-as-error behavior is disabled so 4xx/5xx responses
    /// come back as data and the core decides what they mean.
    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: &HttpRequest) -> Reply {
            let path = request.path.as_str();
            let body = request.body.as_deref();
            let result = match (request.method, body) {
                (HttpMethod::Get, _) => self.agent.get(path).call(),
                (HttpMethod::Delete, _) => self.agent.delete(path).call(),
                (HttpMethod::Post, Some(body)) => self
                    .agent
                    .post(path)
                    .content_type("application/json")
                    .send(body.as_bytes()),
                (HttpMethod::Post, None) => self.agent.post(path).send_empty(),
                (HttpMethod::Put, Some(body)) => self
                    .agent
                    .put(path)
                    .content_type("application/json")
                    .send(body.as_bytes()),
                (HttpMethod::Put, None) => self.agent.put(path).send_empty(),
            };
            let mut response = result.map_err(|e| ApiError::Network(e.to_string()))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(k, v)| {
                    v.to_str()
                        .ok()
                        .map(|v| (k.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| ApiError::Network(e.to_string()))?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
