mod error;
mod handle;
mod types;

pub use error::*;
pub use handle::*;
pub use types::*;

use std::ffi::CString;
use std::os::raw::c_char;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use flex_delegate::{FlexApi, FlexDelegate};
use flex_sys::TfLiteDelegate;

/// Execute a closure that returns a `FlexStatus`, catching any panics
/// and converting them into `FlexStatus::ErrorInternal`.
fn catch_panic<F: FnOnce() -> FlexStatus>(f: F) -> FlexStatus {
    // Nothing is observed after a panic except the status and last error.
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(status) => status,
        Err(_) => {
            tracing::error!("panic at the flex FFI boundary");
            set_last_error("internal panic".to_string());
            FlexStatus::ErrorInternal
        }
    }
}

/// Create a delegate through `api` and write its handle into `*out`.
unsafe fn create_into(api: Arc<FlexApi>, out: *mut *mut FlexDelegateHandle) -> FlexStatus {
    match FlexDelegate::with_api(api) {
        Ok(delegate) => {
            *out = Box::into_raw(Box::new(FlexDelegateHandle::new(delegate)));
            FlexStatus::Ok
        }
        Err(err) => record_error(&err),
    }
}

/// Create a new flex delegate.
///
/// On success, writes a heap-allocated `FlexDelegateHandle` pointer into
/// `*out` and returns `FlexStatus::Ok`. The caller must later call
/// `flex_delegate_destroy` exactly once to free it. On failure `*out` is
/// left untouched.
#[no_mangle]
pub unsafe extern "C" fn flex_delegate_create(out: *mut *mut FlexDelegateHandle) -> FlexStatus {
    catch_panic(|| {
        if out.is_null() {
            set_last_error("out is null".to_string());
            return FlexStatus::ErrorInvalidArgument;
        }
        match flex_delegate::flex_api() {
            Ok(api) => unsafe { create_into(api, out) },
            Err(err) => record_error(&err),
        }
    })
}

/// Destroy a delegate previously created by `flex_delegate_create`.
///
/// Passing a null pointer is a no-op and returns `FlexStatus::Ok`. The
/// handle must not be used after this call, and must not be registered
/// with any interpreter that is still alive.
#[no_mangle]
pub unsafe extern "C" fn flex_delegate_destroy(handle: *mut FlexDelegateHandle) -> FlexStatus {
    if handle.is_null() {
        return FlexStatus::Ok;
    }
    catch_panic(|| {
        drop(unsafe { Box::from_raw(handle) });
        FlexStatus::Ok
    })
}

/// The raw `TfLiteDelegate*` to register with interpreter options.
///
/// Borrowed from `handle`: valid until `flex_delegate_destroy`. Returns null
/// for a null handle.
#[no_mangle]
pub unsafe extern "C" fn flex_delegate_ptr(handle: *const FlexDelegateHandle) -> *mut TfLiteDelegate {
    if handle.is_null() {
        return std::ptr::null_mut();
    }
    (*handle).delegate.as_ptr()
}

/// Retrieve the last error message.
///
/// Returns a pointer to a C string describing the most recent error on this
/// thread, or null if no error has occurred. The caller must free the
/// returned string with `flex_free_string`.
#[no_mangle]
pub extern "C" fn flex_last_error() -> *const c_char {
    match error::take_last_error() {
        Some(e) => e.into_raw(),
        None => std::ptr::null(),
    }
}

/// Free a string previously returned by `flex_last_error`.
#[no_mangle]
pub unsafe extern "C" fn flex_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
