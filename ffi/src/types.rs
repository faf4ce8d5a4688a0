//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! The GUI host owns the transport to the store and hands it in as a
//! callback. `CallbackStore` adapts that callback to the core's
//! `StoreClient`; `FfiStatus` mirrors the core's error kinds as plain codes.
//! Conversion helpers live here to keep `lib.rs` focused on the
//! `extern "C"` surface.

use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;

use cardlist_core::{BoardError, CardCollection, StoreClient};

/// Runs one store command. Returns the response as a NUL-terminated
/// string owned by the host, or null when the store call failed.
pub type FfiStoreCallback = extern "C" fn(user_data: *mut c_void, command: *const c_char) -> *mut c_char;

/// Releases a response previously returned by `FfiStoreCallback`.
pub type FfiStoreRelease = extern "C" fn(user_data: *mut c_void, response: *mut c_char);

/// Status codes returned by every fallible FFI function.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiStatus {
    Ok = 0,
    StoreUnavailable = 1,
    MalformedResponse = 2,
    /// Reserved: `cardlist_accept_drop` reports bad payloads through
    /// `*handled = false`, never as this status.
    MalformedTransferPayload = 3,
    /// Reserved, same as `MalformedTransferPayload`.
    UnrecognizedTransferKind = 4,
    Panic = 5,
    NullArg = 6,
}

impl From<&BoardError> for FfiStatus {
    fn from(err: &BoardError) -> Self {
        match err {
            BoardError::StoreUnavailable(_) => FfiStatus::StoreUnavailable,
            BoardError::MalformedResponse(_) => FfiStatus::MalformedResponse,
            BoardError::MalformedTransferPayload(_) => FfiStatus::MalformedTransferPayload,
            BoardError::UnrecognizedTransferKind(_) => FfiStatus::UnrecognizedTransferKind,
        }
    }
}

/// `StoreClient` backed by a host callback.
pub struct CallbackStore {
    pub(crate) callback: FfiStoreCallback,
    pub(crate) release: Option<FfiStoreRelease>,
    pub(crate) user_data: *mut c_void,
}

impl StoreClient for CallbackStore {
    fn run_command(&mut self, command: &str) -> Result<String, BoardError> {
        let command = CString::new(command)
            .map_err(|_| BoardError::StoreUnavailable("command contains NUL".to_string()))?;
        let raw = (self.callback)(self.user_data, command.as_ptr());
        if raw.is_null() {
            return Err(BoardError::StoreUnavailable("store callback returned null".to_string()));
        }
        let response = unsafe { CStr::from_ptr(raw) }
            .to_str()
            .map(str::to_string)
            .map_err(|e| BoardError::MalformedResponse(format!("response is not UTF-8: {e}")));
        if let Some(release) = self.release {
            release(self.user_data, raw);
        }
        response
    }
}

/// Opaque handle to a `CardCollection`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiCardCollection {
    pub(crate) inner: CardCollection<CallbackStore>,
    pub(crate) last_error: Option<CString>,
}

impl FfiCardCollection {
    /// Record the outcome of a fallible call and turn it into a status.
    pub(crate) fn record<T>(&mut self, result: Result<T, BoardError>) -> (FfiStatus, Option<T>) {
        match result {
            Ok(value) => {
                self.last_error = None;
                (FfiStatus::Ok, Some(value))
            }
            Err(err) => {
                let status = FfiStatus::from(&err);
                self.last_error = CString::new(err.to_string()).ok();
                (status, None)
            }
        }
    }
}

/// Copy a Rust string into a heap C string the caller frees with
/// `cardlist_free_string`. Interior NULs yield null.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    CString::new(s).map(CString::into_raw).unwrap_or(std::ptr::null_mut())
}
