use flex_sys::TfLiteDelegate;

/// A delegate that can be registered with a TensorFlow Lite interpreter.
///
/// Releasing the native handle is tied to `Drop`, so an implementor must
/// outlive every interpreter it was registered with.
pub trait Delegate: Send {
    /// Returns the name of this delegate (e.g., "flex").
    fn name(&self) -> &str;

    /// The raw handle to hand to the interpreter options.
    ///
    /// The pointer is borrowed: it stays valid only while `self` is alive.
    fn as_ptr(&self) -> *mut TfLiteDelegate;
}

impl<D: Delegate + ?Sized> Delegate for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn as_ptr(&self) -> *mut TfLiteDelegate {
        (**self).as_ptr()
    }
}
