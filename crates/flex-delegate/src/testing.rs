//! Allocation-tracking entry points for tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use flex_sys::TfLiteDelegate;

use crate::api::FlexApi;

static LIVE: Mutex<Option<HashSet<usize>>> = Mutex::new(None);
static SERIAL: Mutex<()> = Mutex::new(());

/// Serializes tests that inspect handle liveness; freed addresses get reused.
pub(crate) fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

fn with_live<R>(f: impl FnOnce(&mut HashSet<usize>) -> R) -> R {
    let mut guard = LIVE.lock().unwrap_or_else(|e| e.into_inner());
    f(guard.get_or_insert_with(HashSet::new))
}

unsafe extern "C" fn tracking_create() -> *mut TfLiteDelegate {
    let ptr = Box::into_raw(Box::new(0u64)) as *mut TfLiteDelegate;
    with_live(|live| live.insert(ptr as usize));
    ptr
}

unsafe extern "C" fn tracking_delete(delegate: *mut TfLiteDelegate) {
    if with_live(|live| live.remove(&(delegate as usize))) {
        drop(Box::from_raw(delegate as *mut u64));
    }
}

unsafe extern "C" fn failing_create() -> *mut TfLiteDelegate {
    std::ptr::null_mut()
}

/// Whether `handle` was created by `tracking_api` and not yet deleted.
pub(crate) fn is_live(handle: *mut TfLiteDelegate) -> bool {
    with_live(|live| live.contains(&(handle as usize)))
}

pub(crate) fn tracking_api() -> Arc<FlexApi> {
    // SAFETY: tracking_create/tracking_delete honor the create/delete contract.
    Arc::new(unsafe { FlexApi::from_fns(tracking_create, tracking_delete) })
}

pub(crate) fn failing_api() -> Arc<FlexApi> {
    // SAFETY: failing_create never hands out a handle.
    Arc::new(unsafe { FlexApi::from_fns(failing_create, tracking_delete) })
}
