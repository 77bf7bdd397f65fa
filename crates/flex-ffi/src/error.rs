use std::cell::RefCell;
use std::ffi::CString;

use flex_delegate::DelegateError;

use crate::types::FlexStatus;

// One slot per thread: a C caller reads the message on the thread that failed.
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Store an error message for later retrieval via `flex_last_error`.
///
/// Messages containing an interior nul are dropped.
pub fn set_last_error(msg: String) {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = CString::new(msg).ok());
}

/// Take the last error message, leaving `None` in its place.
pub fn take_last_error() -> Option<CString> {
    LAST_ERROR.with(|slot| slot.borrow_mut().take())
}

/// Record `err` as this thread's last error and map it to a status code.
pub fn record_error(err: &DelegateError) -> FlexStatus {
    set_last_error(err.to_string());
    FlexStatus::from(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_sets_message() {
        let status = record_error(&DelegateError::Unavailable("no library".into()));
        assert_eq!(status, FlexStatus::ErrorUnavailable);
        let msg = take_last_error().unwrap();
        assert_eq!(
            msg.to_str().unwrap(),
            "flex delegate runtime unavailable: no library"
        );
    }

    #[test]
    fn test_interior_nul_is_dropped() {
        set_last_error("bad\0message".to_string());
        assert!(take_last_error().is_none());
    }

    #[test]
    fn test_slot_is_per_thread() {
        set_last_error("main".to_string());
        let other = std::thread::spawn(take_last_error).join().unwrap();
        assert!(other.is_none());
        assert_eq!(take_last_error().unwrap().to_str().unwrap(), "main");
    }
}
