use std::fmt;
use std::mem::ManuallyDrop;
use std::ptr::{self, NonNull};
use std::sync::Arc;

use flex_sys::TfLiteDelegate;
use tracing::{debug, warn};

use crate::api::{flex_api, FlexApi};
use crate::delegate::Delegate;
use crate::error::{DelegateError, Result};

/// Owning handle to one native flex delegate.
///
/// Created by `TfLiteFlexDelegateCreate` and destroyed exactly once by
/// `TfLiteFlexDelegateDelete`, either when dropped or through `close`.
/// The handle cannot be cloned; destroying it consumes the wrapper, so a
/// second destroy or a use after destroy does not compile.
///
/// The caller must drop the delegate only after every interpreter it was
/// registered with has been torn down.
pub struct FlexDelegate {
    handle: NonNull<TfLiteDelegate>,
    api: Arc<FlexApi>,
}

// SAFETY: The handle is exclusively owned and carries no thread affinity;
// destroying it only requires ownership, which moves with the value.
unsafe impl Send for FlexDelegate {}

impl FlexDelegate {
    /// Create a delegate through the process-wide `FlexApi`.
    ///
    /// # Errors
    /// `Unavailable` if the native library cannot be resolved,
    /// `AllocationFailure` if the native create call returns null.
    pub fn new() -> Result<Self> {
        Self::with_api(flex_api()?)
    }

    /// Create a delegate through a specific `FlexApi`.
    ///
    /// # Errors
    /// `AllocationFailure` if the native create call returns null. No retry
    /// is attempted.
    pub fn with_api(api: Arc<FlexApi>) -> Result<Self> {
        // SAFETY: A non-null result is owned by the returned wrapper and
        // released once in Drop.
        let raw = unsafe { api.create_raw() };
        match NonNull::new(raw) {
            Some(handle) => {
                debug!(handle = ?handle, source = ?api.source(), "created flex delegate");
                Ok(Self { handle, api })
            }
            None => {
                warn!(source = ?api.source(), "flex delegate create returned null");
                Err(DelegateError::AllocationFailure)
            }
        }
    }

    /// Reclaim ownership of a handle released by `into_raw_parts`.
    ///
    /// # Errors
    /// `NullHandle` if `handle` is null.
    ///
    /// # Safety
    /// `handle` must have been created through `api` and must not have been
    /// destroyed or reclaimed already.
    pub unsafe fn from_raw_parts(handle: *mut TfLiteDelegate, api: Arc<FlexApi>) -> Result<Self> {
        let handle = NonNull::new(handle).ok_or(DelegateError::NullHandle)?;
        Ok(Self { handle, api })
    }

    /// Give up ownership without destroying the handle.
    ///
    /// The caller becomes responsible for destroying it exactly once, either
    /// by reclaiming it with `from_raw_parts` or by calling the returned
    /// table's delete entry point. The `FlexApi` must be kept alive until then.
    pub fn into_raw_parts(self) -> (*mut TfLiteDelegate, Arc<FlexApi>) {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the Arc is moved out exactly once.
        let api = unsafe { ptr::read(&this.api) };
        (this.handle.as_ptr(), api)
    }

    /// Destroy the delegate now. Equivalent to dropping it.
    pub fn close(self) {
        drop(self);
    }

    /// The raw handle, borrowed for as long as `self` is alive.
    pub fn as_ptr(&self) -> *mut TfLiteDelegate {
        self.handle.as_ptr()
    }

    /// The entry point table this delegate was created through.
    pub fn api(&self) -> &Arc<FlexApi> {
        &self.api
    }
}

impl Drop for FlexDelegate {
    fn drop(&mut self) {
        // SAFETY: The handle came from this table's create and is released once here.
        unsafe { self.api.delete_raw(self.handle.as_ptr()) };
        debug!(handle = ?self.handle, "destroyed flex delegate");
    }
}

impl fmt::Debug for FlexDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlexDelegate")
            .field("handle", &self.handle)
            .field("source", self.api.source())
            .finish()
    }
}

impl Delegate for FlexDelegate {
    fn name(&self) -> &str {
        "flex"
    }

    fn as_ptr(&self) -> *mut TfLiteDelegate {
        self.handle.as_ptr()
    }
}
