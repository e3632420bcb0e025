//! C ABI for callers that cannot catch native exceptions themselves.
//!
//! The declarations live in `include/exception_bridge.h`. Errors are handed
//! out as opaque [`ExceptionBridgeError`] pointers that the caller releases
//! with [`exception_bridge_error_free`].

use std::ffi::{CString, c_char, c_void};
use std::panic::AssertUnwindSafe;
use std::ptr;

use crate::error::{ErrorDescription, ExceptionSource};

const NULL_BLOCK_NAME: &str = "NSInvalidArgumentException";
const NULL_BLOCK_REASON: &str = "block must not be null";

/// Block signature accepted by [`exception_bridge_try_run`].
pub type ExceptionBridgeBlock = unsafe extern "C-unwind" fn(context: *mut c_void);

/// Opaque error handle. The strings it exposes live as long as the handle.
pub struct ExceptionBridgeError {
    description: ErrorDescription,
    domain: CString,
    message: CString,
    name: Option<CString>,
    reason: Option<CString>,
}

impl ExceptionBridgeError {
    fn new(description: ErrorDescription) -> Self {
        ExceptionBridgeError {
            domain: to_c_string(description.domain()),
            message: to_c_string(description.message()),
            name: description.name().map(to_c_string),
            reason: description.reason().map(to_c_string),
            description,
        }
    }

    pub fn description(&self) -> &ErrorDescription {
        &self.description
    }
}

/// Interior NULs would truncate the string on the C side, so they are
/// replaced rather than rejected.
fn to_c_string(s: &str) -> CString {
    CString::new(s.replace('\0', "\u{FFFD}")).unwrap_or_default()
}

/// Run `block(context)` and report whether it completed without raising.
///
/// On failure a new error handle is written to `*error` when `error` is
/// non-null; otherwise the error is dropped. On success `*error` is left
/// untouched. A null `block` is a caller error: nothing runs and the call
/// fails with an `NSInvalidArgumentException` description.
///
/// # Safety
///
/// `block` must be safe to call with `context`. `error` must be null or point
/// to writable storage for a pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn exception_bridge_try_run(
    block: Option<ExceptionBridgeBlock>,
    context: *mut c_void,
    error: *mut *mut ExceptionBridgeError,
) -> bool {
    let result = match block {
        Some(block) => crate::try_run(AssertUnwindSafe(|| unsafe { block(context) })),
        None => Err(ErrorDescription::from_parts(
            ExceptionSource::Caller,
            Some(NULL_BLOCK_NAME.to_owned()),
            Some(NULL_BLOCK_REASON.to_owned()),
        )),
    };
    match result {
        Ok(()) => true,
        Err(desc) => {
            if !error.is_null() {
                let handle = Box::new(ExceptionBridgeError::new(desc));
                unsafe { *error = Box::into_raw(handle) };
            }
            false
        }
    }
}

/// The error domain, or null if `error` is null.
///
/// # Safety
///
/// `error` must be null or a live handle from [`exception_bridge_try_run`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn exception_bridge_error_domain(
    error: *const ExceptionBridgeError,
) -> *const c_char {
    match unsafe { error.as_ref() } {
        Some(e) => e.domain.as_ptr(),
        None => ptr::null(),
    }
}

/// The error code, or 0 if `error` is null.
///
/// # Safety
///
/// `error` must be null or a live handle from [`exception_bridge_try_run`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn exception_bridge_error_code(error: *const ExceptionBridgeError) -> isize {
    match unsafe { error.as_ref() } {
        Some(e) => e.description.code(),
        None => 0,
    }
}

/// The human-readable message, or null if `error` is null.
///
/// # Safety
///
/// `error` must be null or a live handle from [`exception_bridge_try_run`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn exception_bridge_error_message(
    error: *const ExceptionBridgeError,
) -> *const c_char {
    match unsafe { error.as_ref() } {
        Some(e) => e.message.as_ptr(),
        None => ptr::null(),
    }
}

/// The exception name, or null if absent.
///
/// # Safety
///
/// `error` must be null or a live handle from [`exception_bridge_try_run`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn exception_bridge_error_name(
    error: *const ExceptionBridgeError,
) -> *const c_char {
    unsafe { error.as_ref() }
        .and_then(|e| e.name.as_ref())
        .map_or(ptr::null(), |s| s.as_ptr())
}

/// The raw exception reason, or null if absent.
///
/// # Safety
///
/// `error` must be null or a live handle from [`exception_bridge_try_run`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn exception_bridge_error_reason(
    error: *const ExceptionBridgeError,
) -> *const c_char {
    unsafe { error.as_ref() }
        .and_then(|e| e.reason.as_ref())
        .map_or(ptr::null(), |s| s.as_ptr())
}

/// Release an error handle. Null is ignored.
///
/// # Safety
///
/// `error` must be null or a handle from [`exception_bridge_try_run`] that has
/// not been freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn exception_bridge_error_free(error: *mut ExceptionBridgeError) {
    if !error.is_null() {
        drop(unsafe { Box::from_raw(error) });
    }
}
