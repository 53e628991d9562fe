//! FFI bindings for stride metrics
//!
//! This module provides C-compatible functions for calling the report entry points
//! from a host tracker app. All functions use C strings (null-terminated) and return
//! allocated memory that must be freed by the caller using `stride_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::report::{report_steps, report_training};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Build the steps-only report.
///
/// Mirrors `report_steps`: failures yield an empty string, never NULL,
/// unless `data` itself is not a valid C string.
///
/// # Safety
/// - `data` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `stride_free_string`.
#[no_mangle]
pub unsafe extern "C" fn stride_report_steps(
    data: *const c_char,
    weight: f64,
    height: f64,
) -> *mut c_char {
    clear_last_error();

    let data_str = match cstr_to_string(data) {
        Some(s) => s,
        None => {
            set_last_error("Invalid record string pointer");
            return ptr::null_mut();
        }
    };

    string_to_cstr(&report_steps(&data_str, weight, height))
}

/// Build the training report.
///
/// # Safety
/// - `data` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `stride_free_string`.
/// - Returns NULL on error; call `stride_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn stride_report_training(
    data: *const c_char,
    weight: f64,
    height: f64,
) -> *mut c_char {
    clear_last_error();

    let data_str = match cstr_to_string(data) {
        Some(s) => s,
        None => {
            set_last_error("Invalid record string pointer");
            return ptr::null_mut();
        }
    };

    match report_training(&data_str, weight, height) {
        Ok(report) => string_to_cstr(&report),
        Err(e) => {
            set_last_error(&format!("{}: {}", e.kind(), e));
            ptr::null_mut()
        }
    }
}

/// Free a string returned by a stride function.
///
/// # Safety
/// - `ptr` must be a pointer returned by a stride function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn stride_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the last error message for the current thread.
///
/// # Safety
/// - Returns a pointer owned by the library; do not free it.
/// - The pointer is valid until the next stride call on the same thread.
/// - Returns NULL if there is no error.
#[no_mangle]
pub unsafe extern "C" fn stride_last_error() -> *const c_char {
    LAST_ERROR.with(|e| {
        match &*e.borrow() {
            Some(cstr) => cstr.as_ptr(),
            None => ptr::null(),
        }
    })
}

/// Get the library version string.
///
/// # Safety
/// - Returns a static string; do not free it.
#[no_mangle]
pub unsafe extern "C" fn stride_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
