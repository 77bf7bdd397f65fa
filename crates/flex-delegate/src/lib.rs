//! `flex-delegate` - Owning wrapper over the TensorFlow Lite flex delegate.
//!
//! This crate provides:
//! - A `FlexDelegate` type that owns one native delegate handle and destroys
//!   it exactly once on drop
//! - A `Delegate` trait exposing the raw handle for interpreter registration
//! - A `FlexApi` table of the two native entry points, linked or loaded at runtime
//! - A `LoaderConfig` describing where to look for the shared library

pub mod api;
pub mod config;
pub mod delegate;
pub mod error;
pub mod flex;
#[cfg(test)]
pub(crate) mod testing;

// Re-export primary types at the crate root for convenience.
pub use api::{flex_api, is_available, ApiSource, FlexApi};
pub use config::LoaderConfig;
pub use delegate::Delegate;
pub use error::{DelegateError, Result};
pub use flex::FlexDelegate;
pub use flex_sys::TfLiteDelegate;
