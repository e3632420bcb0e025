//! Run code behind a barrier that turns native exceptions into error values.
//!
//! Objective-C APIs such as `AVAudioEngine` report some failures by raising
//! an `NSException`, which Swift cannot catch and Rust cannot unwind through.
//! Rust panics likewise must not cross an `extern "C"` boundary. [`try_run`]
//! and [`catch`] intercept both and return an [`ErrorDescription`] shaped like
//! an `NSError`.
//!
//! Foreign callers use the C ABI in [`ffi`] or, on Apple platforms, the
//! block-based entry point under [`platform`].

pub mod bridge;
pub mod error;
pub mod exception;
pub mod ffi;
pub mod platform;

// Re-exports
pub use bridge::*;
pub use error::*;
pub use exception::*;
