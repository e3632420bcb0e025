//! The exception barrier.
//!
//! Objective-C exceptions and Rust panics both unwind the stack, and neither
//! may cross an `extern "C"` boundary or reach a Swift caller. [`catch`] runs a
//! closure behind a barrier that stops both kinds of unwind and reports them as
//! an [`ErrorDescription`] instead.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe, UnwindSafe};

use crate::error::{ErrorDescription, ExceptionSource, PANIC_EXCEPTION_NAME};
use crate::exception::Exception;

/// Run `block` and report whether it completed without raising.
///
/// `block` runs exactly once, synchronously, on the calling thread.
///
/// ```
/// let result = exception_bridge::try_run(|| {
///     let _ = 2 + 2;
/// });
/// assert!(result.is_ok());
/// ```
pub fn try_run(block: impl FnOnce() + UnwindSafe) -> Result<(), ErrorDescription> {
    catch(block)
}

/// Run `f` and return its result, or a description of the native exception it
/// raised.
///
/// No unwind of any kind propagates out of this function.
pub fn catch<R>(f: impl FnOnce() -> R + UnwindSafe) -> Result<R, ErrorDescription> {
    let result = match panic::catch_unwind(|| catch_native(f)) {
        Ok(result) => result,
        Err(payload) => Err(describe_panic(payload)),
    };

    #[cfg(feature = "log")]
    if let Err(ref desc) = result {
        log::debug!(
            source:? = desc.exception_source(),
            name:? = desc.name();
            "intercepted native exception: {}", desc.message()
        );
    }

    result
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
fn catch_native<R>(f: impl FnOnce() -> R + UnwindSafe) -> Result<R, ErrorDescription> {
    crate::platform::apple::catch_objc(f)
}

#[cfg(not(any(target_os = "macos", target_os = "ios")))]
fn catch_native<R>(f: impl FnOnce() -> R + UnwindSafe) -> Result<R, ErrorDescription> {
    Ok(f())
}

/// Translate a panic payload. Recognises [`Exception`] and the `&str`/`String`
/// payloads produced by `panic!`.
fn describe_panic(payload: Box<dyn Any + Send>) -> ErrorDescription {
    let (name, reason) = match payload.downcast::<Exception>() {
        Ok(exception) => exception.into_parts(),
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&'static str>()
                .map(|s| (*s).to_owned())
                .or_else(|| payload.downcast_ref::<String>().cloned());
            discard_payload(payload);
            (PANIC_EXCEPTION_NAME.to_owned(), reason)
        }
    };
    ErrorDescription::from_parts(ExceptionSource::Panic, Some(name), reason)
}

/// Drop a payload of unknown type. Its destructor may itself panic; that
/// second payload is leaked.
fn discard_payload(payload: Box<dyn Any + Send>) {
    if let Err(nested) = panic::catch_unwind(AssertUnwindSafe(move || drop(payload))) {
        std::mem::forget(nested);
    }
}
