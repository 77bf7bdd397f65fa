//! `flex-sys` - Raw C declarations for the TensorFlow Lite flex delegate.
//!
//! The native library exposes exactly two entry points:
//!
//! ```c
//! TfLiteDelegate* TfLiteFlexDelegateCreate();
//! void TfLiteFlexDelegateDelete(TfLiteDelegate* delegate);
//! ```
//!
//! Use the safe wrappers in `flex-delegate` instead of calling these directly.
//! With the `link` feature the symbols are resolved at link time; without it
//! only the types and symbol names are provided, for runtime loading.

use std::marker::{PhantomData, PhantomPinned};

/// Opaque delegate handle owned by the TensorFlow Lite runtime.
///
/// Only ever handled behind a raw pointer. The marker fields make the type
/// unconstructible, `!Send`, `!Sync` and `!Unpin` from Rust.
#[repr(C)]
pub struct TfLiteDelegate {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// Signature of `TfLiteFlexDelegateCreate`. Returns null on allocation failure.
pub type FlexDelegateCreateFn = unsafe extern "C" fn() -> *mut TfLiteDelegate;

/// Signature of `TfLiteFlexDelegateDelete`.
pub type FlexDelegateDeleteFn = unsafe extern "C" fn(delegate: *mut TfLiteDelegate);

/// Nul-terminated symbol name of the create entry point.
pub const CREATE_SYMBOL: &[u8] = b"TfLiteFlexDelegateCreate\0";

/// Nul-terminated symbol name of the delete entry point.
pub const DELETE_SYMBOL: &[u8] = b"TfLiteFlexDelegateDelete\0";

#[cfg(feature = "link")]
extern "C" {
    /// Creates a new flex delegate instance that must be destroyed with
    /// `TfLiteFlexDelegateDelete` once TFLite no longer uses it.
    pub fn TfLiteFlexDelegateCreate() -> *mut TfLiteDelegate;

    /// Destroys a delegate created with `TfLiteFlexDelegateCreate`.
    pub fn TfLiteFlexDelegateDelete(delegate: *mut TfLiteDelegate);
}

/// Strip the trailing nul from one of the symbol constants, for display.
pub fn symbol_name(symbol: &'static [u8]) -> &'static str {
    let bytes = symbol.strip_suffix(b"\0").unwrap_or(symbol);
    std::str::from_utf8(bytes).unwrap_or("<invalid symbol>")
}
