//! C-ABI wrapper around `wellcare-core`.
//!
//! # Overview
//! Exposes the patient API and the form checks through `extern "C"`
//! functions so a native UI shell can build requests, run its own HTTP, and
//! parse responses without linking serde or an HTTP stack.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-route `wellcare_build_*` / `wellcare_parse_*` mirror the core API 1:1.
//! - A single `FfiResult` envelope with `FfiDataTag` + `void* data` conveys
//!   success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `wellcare_free_*` function to release them.

pub mod types;

use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use wellcare_core::{ApiError, HttpRequest, HttpResponse, PatientClient, PatientInput, TestInput};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client bound to `base_url`, e.g. `http://10.0.2.2:5000/api`.
///
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `wellcare_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_client_new(base_url: *const c_char) -> *mut FfiPatientClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let url = unsafe { read_str(base_url) };
        let client = PatientClient::new(url);
        Box::into_raw(Box::new(FfiPatientClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `wellcare_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_client_free(client: *mut FfiPatientClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Shared body of every `wellcare_build_*`: a null client, a rejected id or
/// form, and panics all come back as a null request.
fn build(
    client: *const FfiPatientClient,
    f: impl FnOnce(&PatientClient) -> Option<HttpRequest>,
) -> *mut FfiHttpRequest {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        f(&client.inner).map_or(std::ptr::null_mut(), FfiHttpRequest::from_core)
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// A required id argument; null reads as empty and is rejected by the core.
fn id_arg<'a>(ptr: *const c_char) -> &'a str {
    unsafe { read_str(ptr) }
}

/// The validated payload of a form pointer. Callers wanting the reason for
/// a `None` use `wellcare_validate_*`.
fn patient_payload(form: *const FfiPatientForm) -> Option<PatientInput> {
    if form.is_null() {
        return None;
    }
    unsafe { &*form }.to_core().validate().ok()
}

fn test_payload(form: *const FfiTestForm) -> Option<TestInput> {
    if form.is_null() {
        return None;
    }
    unsafe { &*form }.to_core().validate().ok()
}

/// `GET /patients`. Returns null if `client` is null.
/// The caller must free the returned pointer with `wellcare_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_build_list_patients(
    client: *const FfiPatientClient,
) -> *mut FfiHttpRequest {
    build(client, |c| Some(c.build_list_patients()))
}

/// `GET /patients/critical`.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_build_list_critical_patients(
    client: *const FfiPatientClient,
) -> *mut FfiHttpRequest {
    build(client, |c| Some(c.build_list_critical_patients()))
}

/// `GET /patients/{id}`. Returns null if `id` is null or not a usable path
/// segment.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_build_get_patient(
    client: *const FfiPatientClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    build(client, |c| c.build_get_patient(id_arg(id)).ok())
}

/// `POST /patients`. Returns null if the form does not validate.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_build_create_patient(
    client: *const FfiPatientClient,
    form: *const FfiPatientForm,
) -> *mut FfiHttpRequest {
    build(client, |c| c.build_create_patient(&patient_payload(form)?).ok())
}

/// `PUT /patients/{id}`. Returns null if `id` is unusable or the form does
/// not validate.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_build_update_patient(
    client: *const FfiPatientClient,
    id: *const c_char,
    form: *const FfiPatientForm,
) -> *mut FfiHttpRequest {
    build(client, |c| {
        c.build_update_patient(id_arg(id), &patient_payload(form)?).ok()
    })
}

/// `DELETE /patients/{id}`.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_build_delete_patient(
    client: *const FfiPatientClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    build(client, |c| c.build_delete_patient(id_arg(id)).ok())
}

/// `GET /patients/{id}/history`.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_build_get_patient_history(
    client: *const FfiPatientClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    build(client, |c| c.build_get_patient_history(id_arg(id)).ok())
}

/// `GET /patients/{patient_id}/tests`.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_build_list_tests(
    client: *const FfiPatientClient,
    patient_id: *const c_char,
) -> *mut FfiHttpRequest {
    build(client, |c| c.build_list_tests(id_arg(patient_id)).ok())
}

/// `POST /patients/{patient_id}/tests`. Returns null if the form does not
/// validate.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_build_create_test(
    client: *const FfiPatientClient,
    patient_id: *const c_char,
    form: *const FfiTestForm,
) -> *mut FfiHttpRequest {
    build(client, |c| {
        c.build_create_test(id_arg(patient_id), &test_payload(form)?).ok()
    })
}

/// `GET /patients/{patient_id}/tests/{test_id}`.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_build_get_test(
    client: *const FfiPatientClient,
    patient_id: *const c_char,
    test_id: *const c_char,
) -> *mut FfiHttpRequest {
    build(client, |c| c.build_get_test(id_arg(patient_id), id_arg(test_id)).ok())
}

/// `PUT /patients/{patient_id}/tests/{test_id}`.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_build_update_test(
    client: *const FfiPatientClient,
    patient_id: *const c_char,
    test_id: *const c_char,
    form: *const FfiTestForm,
) -> *mut FfiHttpRequest {
    build(client, |c| {
        c.build_update_test(id_arg(patient_id), id_arg(test_id), &test_payload(form)?)
            .ok()
    })
}

/// `DELETE /patients/{patient_id}/tests/{test_id}`.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_build_delete_test(
    client: *const FfiPatientClient,
    patient_id: *const c_char,
    test_id: *const c_char,
) -> *mut FfiHttpRequest {
    build(client, |c| c.build_delete_test(id_arg(patient_id), id_arg(test_id)).ok())
}

// ---------------------------------------------------------------------------
// Form validation
// ---------------------------------------------------------------------------

/// The message to show for an invalid patient form, or null if it is valid.
/// Free a non-null result with `wellcare_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_validate_patient_form(form: *const FfiPatientForm) -> *mut c_char {
    catch_unwind(|| {
        if form.is_null() {
            return c_string("null argument: form");
        }
        match unsafe { &*form }.to_core().validate() {
            Ok(_) => std::ptr::null_mut(),
            Err(err) => c_string(err.to_string()),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// The message to show for an invalid test form, or null if it is valid.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_validate_test_form(form: *const FfiTestForm) -> *mut c_char {
    catch_unwind(|| {
        if form.is_null() {
            return c_string("null argument: form");
        }
        match unsafe { &*form }.to_core().validate() {
            Ok(_) => std::ptr::null_mut(),
            Err(err) => c_string(err.to_string()),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Shared body of every `wellcare_parse_*`.
fn parse<T>(
    operation: &str,
    client: *const FfiPatientClient,
    response: *const FfiHttpResponse,
    parse: impl FnOnce(&PatientClient, HttpResponse) -> Result<T, ApiError>,
    wrap: impl FnOnce(T) -> *mut FfiResult,
) -> *mut FfiResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiResult::null_arg("client");
        }
        if response.is_null() {
            return FfiResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match parse(&client.inner, resp.to_core()) {
            Ok(value) => wrap(value),
            Err(e) => FfiResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiResult::panic(&format!("panic in {operation}")))
}

/// Result tagged `PatientList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_parse_list_patients(
    client: *const FfiPatientClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse(
        "wellcare_parse_list_patients",
        client,
        response,
        |c, r| c.parse_list_patients(r),
        FfiResult::ok_patient_list,
    )
}

/// Result tagged `PatientList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_parse_list_critical_patients(
    client: *const FfiPatientClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse(
        "wellcare_parse_list_critical_patients",
        client,
        response,
        |c, r| c.parse_list_critical_patients(r),
        FfiResult::ok_patient_list,
    )
}

/// Result tagged `Patient` on success.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_parse_get_patient(
    client: *const FfiPatientClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse(
        "wellcare_parse_get_patient",
        client,
        response,
        |c, r| c.parse_get_patient(r),
        FfiResult::ok_patient,
    )
}

#[unsafe(no_mangle)]
pub extern "C" fn wellcare_parse_create_patient(
    client: *const FfiPatientClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse(
        "wellcare_parse_create_patient",
        client,
        response,
        |c, r| c.parse_create_patient(r),
        FfiResult::ok_patient,
    )
}

#[unsafe(no_mangle)]
pub extern "C" fn wellcare_parse_update_patient(
    client: *const FfiPatientClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse(
        "wellcare_parse_update_patient",
        client,
        response,
        |c, r| c.parse_update_patient(r),
        FfiResult::ok_patient,
    )
}

/// Result tagged `None` on success; the body is ignored.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_parse_delete_patient(
    client: *const FfiPatientClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse(
        "wellcare_parse_delete_patient",
        client,
        response,
        |c, r| c.parse_delete_patient(r),
        |()| FfiResult::ok_empty(),
    )
}

/// Result tagged `History` on success.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_parse_get_patient_history(
    client: *const FfiPatientClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse(
        "wellcare_parse_get_patient_history",
        client,
        response,
        |c, r| c.parse_get_patient_history(r),
        FfiResult::ok_history,
    )
}

/// Result tagged `TestList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_parse_list_tests(
    client: *const FfiPatientClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse(
        "wellcare_parse_list_tests",
        client,
        response,
        |c, r| c.parse_list_tests(r),
        FfiResult::ok_test_list,
    )
}

/// Result tagged `Test` on success.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_parse_create_test(
    client: *const FfiPatientClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse(
        "wellcare_parse_create_test",
        client,
        response,
        |c, r| c.parse_create_test(r),
        FfiResult::ok_test,
    )
}

#[unsafe(no_mangle)]
pub extern "C" fn wellcare_parse_get_test(
    client: *const FfiPatientClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse(
        "wellcare_parse_get_test",
        client,
        response,
        |c, r| c.parse_get_test(r),
        FfiResult::ok_test,
    )
}

#[unsafe(no_mangle)]
pub extern "C" fn wellcare_parse_update_test(
    client: *const FfiPatientClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse(
        "wellcare_parse_update_test",
        client,
        response,
        |c, r| c.parse_update_test(r),
        FfiResult::ok_test,
    )
}

#[unsafe(no_mangle)]
pub extern "C" fn wellcare_parse_delete_test(
    client: *const FfiPatientClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse(
        "wellcare_parse_delete_test",
        client,
        response,
        |c, r| c.parse_delete_test(r),
        |()| FfiResult::ok_empty(),
    )
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by any `wellcare_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiHttpRequest::free(req) });
}

/// Free a result returned by any `wellcare_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_free_result(result: *mut FfiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiResult::free(result) });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn wellcare_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| free_string(s));
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
