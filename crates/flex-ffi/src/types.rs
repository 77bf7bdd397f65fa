use flex_delegate::DelegateError;

/// Status codes returned by all FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexStatus {
    Ok = 0,
    ErrorInvalidArgument = 1,
    ErrorAllocation = 2,
    ErrorUnavailable = 3,
    ErrorInternal = 4,
}

impl From<&DelegateError> for FlexStatus {
    fn from(err: &DelegateError) -> Self {
        match err {
            DelegateError::AllocationFailure => FlexStatus::ErrorAllocation,
            DelegateError::NullHandle => FlexStatus::ErrorInvalidArgument,
            DelegateError::LibraryNotFound { .. }
            | DelegateError::MissingSymbol { .. }
            | DelegateError::Unavailable(_) => FlexStatus::ErrorUnavailable,
        }
    }
}
