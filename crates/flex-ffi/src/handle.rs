use flex_delegate::FlexDelegate;

/// Opaque handle passed across the C boundary. Owns one flex delegate.
pub struct FlexDelegateHandle {
    pub delegate: FlexDelegate,
}

impl FlexDelegateHandle {
    pub fn new(delegate: FlexDelegate) -> Self {
        Self { delegate }
    }
}
