//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, pointer plus length instead of `Vec`,
//! and tagged enums with explicit discriminants. Conversions live here so
//! `lib.rs` stays focused on the `extern "C"` surface.

use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;

use wellcare_core::{ApiError, HttpMethod, Patient, PatientForm, PatientHistory, Test, TestForm};

/// Opaque handle to a `PatientClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiPatientClient {
    pub(crate) inner: wellcare_core::PatientClient,
}

/// Owned C string from Rust text. Interior NULs are dropped rather than
/// failing the whole conversion.
pub(crate) fn c_string(s: impl Into<String>) -> *mut c_char {
    let s = s.into().replace('\0', "");
    CString::new(s).unwrap_or_default().into_raw()
}

/// Borrow a caller-provided C string. Null and invalid UTF-8 read as "".
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
pub(crate) unsafe fn read_str<'a>(ptr: *const c_char) -> &'a str {
    if ptr.is_null() {
        return "";
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().unwrap_or("")
}

pub(crate) fn free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Hand a vector to C as pointer plus length. Empty vectors become null.
fn into_raw_parts<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let len = items.len() as u32;
    let mut items = items.into_boxed_slice();
    let ptr = items.as_mut_ptr();
    std::mem::forget(items);
    (ptr, len)
}

/// Reclaim a vector handed out by `into_raw_parts`.
///
/// # Safety
/// `ptr`/`len` must come from `into_raw_parts` and not have been freed.
pub(crate) unsafe fn from_raw_parts<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = std::ptr::slice_from_raw_parts_mut(ptr, len as usize);
    unsafe { Box::from_raw(slice) }.into_vec()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `wellcare_build_*` functions. The C caller executes the request
/// and passes the response back through `wellcare_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    /// Null for GET and DELETE.
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: wellcare_core::HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: c_string(k),
                value: c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_parts(headers);
        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: c_string(req.path),
            headers,
            headers_len,
            body: req.body.map_or(std::ptr::null_mut(), c_string),
        }))
    }

    /// # Safety
    /// `req` must come from `from_core` and not have been freed.
    pub(crate) unsafe fn free(req: *mut Self) {
        let req = unsafe { Box::from_raw(req) };
        free_string(req.path);
        free_string(req.body);
        for h in unsafe { from_raw_parts(req.headers, req.headers_len) } {
            free_string(h.key);
            free_string(h.value);
        }
    }
}

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this after executing a request and passes a
/// pointer to a `wellcare_parse_*` function. The FFI layer reads but does
/// not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

impl FfiHttpResponse {
    pub(crate) fn to_core(&self) -> wellcare_core::HttpResponse {
        wellcare_core::HttpResponse::new(self.status, unsafe { read_str(self.body) })
    }
}

// ---------------------------------------------------------------------------
// Form input (caller-provided)
// ---------------------------------------------------------------------------

/// Raw patient form text. Any field may be null, which reads as empty.
#[repr(C)]
pub struct FfiPatientForm {
    pub name: *const c_char,
    pub age: *const c_char,
    pub gender: *const c_char,
    pub address: *const c_char,
    pub phone_number: *const c_char,
    /// Comma-separated.
    pub medical_history: *const c_char,
}

impl FfiPatientForm {
    pub(crate) fn to_core(&self) -> PatientForm {
        unsafe {
            PatientForm {
                name: read_str(self.name).to_string(),
                age: read_str(self.age).to_string(),
                gender: read_str(self.gender).to_string(),
                address: read_str(self.address).to_string(),
                phone_number: read_str(self.phone_number).to_string(),
                medical_history: read_str(self.medical_history).to_string(),
            }
        }
    }
}

/// Raw test form text. Any field may be null, which reads as empty.
#[repr(C)]
pub struct FfiTestForm {
    pub kind: *const c_char,
    pub value: *const c_char,
}

impl FfiTestForm {
    pub(crate) fn to_core(&self) -> TestForm {
        unsafe {
            TestForm {
                kind: read_str(self.kind).to_string(),
                value: read_str(self.value).to_string(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Network = 3,
    Deserialization = 4,
    Serialization = 5,
    InvalidId = 6,
    Panic = 7,
    NullArg = 8,
}

/// Tag that tells `wellcare_free_result` what `FfiResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Patient = 1,
    PatientList = 2,
    Test = 3,
    TestList = 4,
    History = 5,
}

#[repr(C)]
pub struct FfiPatient {
    pub id: *mut c_char,
    pub name: *mut c_char,
    pub age: u32,
    /// Lowercase wire value: "male", "female" or "other".
    pub gender: *mut c_char,
    /// Null when the server sent none.
    pub address: *mut c_char,
    pub phone_number: *mut c_char,
    pub medical_history: *mut *mut c_char,
    pub medical_history_len: u32,
    pub critical_condition: bool,
}

impl FfiPatient {
    fn from_core(p: Patient) -> Self {
        let history: Vec<*mut c_char> = p.medical_history.into_iter().map(c_string).collect();
        let (medical_history, medical_history_len) = into_raw_parts(history);
        Self {
            id: c_string(p.id),
            name: c_string(p.name),
            age: p.age,
            gender: c_string(p.gender.as_str()),
            address: p.address.map_or(std::ptr::null_mut(), c_string),
            phone_number: p.phone_number.map_or(std::ptr::null_mut(), c_string),
            medical_history,
            medical_history_len,
            critical_condition: p.critical_condition,
        }
    }

    fn free_fields(&self) {
        free_string(self.id);
        free_string(self.name);
        free_string(self.gender);
        free_string(self.address);
        free_string(self.phone_number);
        for item in unsafe { from_raw_parts(self.medical_history, self.medical_history_len) } {
            free_string(item);
        }
    }
}

#[repr(C)]
pub struct FfiPatientList {
    pub items: *mut FfiPatient,
    pub len: u32,
}

#[repr(C)]
pub struct FfiTest {
    pub id: *mut c_char,
    pub patient_id: *mut c_char,
    /// Display name, e.g. "Blood Pressure".
    pub kind: *mut c_char,
    pub value: *mut c_char,
    /// RFC 3339 timestamp, or null when the server sent none.
    pub date: *mut c_char,
}

impl FfiTest {
    fn from_core(t: Test) -> Self {
        Self {
            id: c_string(t.id),
            patient_id: c_string(t.patient_id),
            kind: c_string(t.kind.label()),
            value: c_string(t.value),
            date: t.date.map_or(std::ptr::null_mut(), |d| c_string(d.to_rfc3339())),
        }
    }

    fn free_fields(&self) {
        free_string(self.id);
        free_string(self.patient_id);
        free_string(self.kind);
        free_string(self.value);
        free_string(self.date);
    }
}

#[repr(C)]
pub struct FfiTestList {
    pub items: *mut FfiTest,
    pub len: u32,
}

impl FfiTestList {
    fn from_core(tests: Vec<Test>) -> Self {
        let (items, len) = into_raw_parts(tests.into_iter().map(FfiTest::from_core).collect());
        Self { items, len }
    }

    fn free_items(&self) {
        for t in unsafe { from_raw_parts(self.items, self.len) } {
            t.free_fields();
        }
    }
}

#[repr(C)]
pub struct FfiPatientHistory {
    pub patient: FfiPatient,
    pub tests: FfiTestList,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiResult {
    fn ok<T>(tag: FfiDataTag, data: T) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag: tag,
            data: Box::into_raw(Box::new(data)) as *mut c_void,
        }))
    }

    fn failure(error_code: FfiErrorCode, http_status: u16, message: String) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code,
            error_message: c_string(message),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn ok_patient(patient: Patient) -> *mut Self {
        Self::ok(FfiDataTag::Patient, FfiPatient::from_core(patient))
    }

    pub(crate) fn ok_patient_list(patients: Vec<Patient>) -> *mut Self {
        let (items, len) =
            into_raw_parts(patients.into_iter().map(FfiPatient::from_core).collect());
        Self::ok(FfiDataTag::PatientList, FfiPatientList { items, len })
    }

    pub(crate) fn ok_test(test: Test) -> *mut Self {
        Self::ok(FfiDataTag::Test, FfiTest::from_core(test))
    }

    pub(crate) fn ok_test_list(tests: Vec<Test>) -> *mut Self {
        Self::ok(FfiDataTag::TestList, FfiTestList::from_core(tests))
    }

    pub(crate) fn ok_history(history: PatientHistory) -> *mut Self {
        Self::ok(
            FfiDataTag::History,
            FfiPatientHistory {
                patient: FfiPatient::from_core(history.patient),
                tests: FfiTestList::from_core(history.tests),
            },
        )
    }

    /// Success with no payload (deletes).
    pub(crate) fn ok_empty() -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let code = match &err {
            ApiError::NotFound => FfiErrorCode::NotFound,
            ApiError::Http { .. } => FfiErrorCode::Http,
            ApiError::Network(_) => FfiErrorCode::Network,
            ApiError::Deserialization(_) => FfiErrorCode::Deserialization,
            ApiError::Serialization(_) => FfiErrorCode::Serialization,
            ApiError::InvalidId(_) => FfiErrorCode::InvalidId,
        };
        Self::failure(code, err.status().unwrap_or(0), err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, 0, msg.to_string())
    }

    /// # Safety
    /// `result` must come from one of the constructors above and not have
    /// been freed.
    pub(crate) unsafe fn free(result: *mut Self) {
        let result = unsafe { Box::from_raw(result) };
        free_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Patient => {
                let p = unsafe { Box::from_raw(result.data as *mut FfiPatient) };
                p.free_fields();
            }
            FfiDataTag::PatientList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiPatientList) };
                for p in unsafe { from_raw_parts(list.items, list.len) } {
                    p.free_fields();
                }
            }
            FfiDataTag::Test => {
                let t = unsafe { Box::from_raw(result.data as *mut FfiTest) };
                t.free_fields();
            }
            FfiDataTag::TestList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiTestList) };
                list.free_items();
            }
            FfiDataTag::History => {
                let h = unsafe { Box::from_raw(result.data as *mut FfiPatientHistory) };
                h.patient.free_fields();
                h.tests.free_items();
            }
            FfiDataTag::None => {}
        }
    }
}
