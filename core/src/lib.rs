//! Client core for the WellCare patient-tracking app.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of that sit the form
//! validators, the navigation graph, and one sans-IO controller per screen.
//! A host (the CLI, or a native shell over the C ABI) executes requests and
//! renders what the controllers expose.
//!
//! # Design
//! - `PatientClient` is stateless; it holds only `base_url`.
//! - Each route is split into `build_*` and `parse_*`, so the I/O boundary
//!   is explicit.
//! - `Transport` is the only seam that does I/O; `ApiClient` wraps one with
//!   `get`/`post`/`put`/`delete`.
//! - The remote service is the sole source of truth. Nothing is cached
//!   across screens; the `refresh` navigation flag is the only invalidation
//!   signal.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod nav;
pub mod screens;
pub mod transport;
pub mod types;
pub mod validation;

pub use api::ApiClient;
pub use client::PatientClient;
pub use config::ClientConfig;
pub use error::{ApiError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Reply};
pub use nav::{NavAction, Navigator, Route, Tab};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{Gender, Patient, PatientHistory, PatientInput, Test, TestInput, TestType};
pub use validation::{PatientForm, TestForm};
