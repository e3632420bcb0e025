use std::panic::UnwindSafe;

use objc2::exception::Exception;
use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2_foundation::{NSException, NSString};

use crate::error::{ErrorDescription, ExceptionSource};

pub mod ext;

/// Catch Objective-C exceptions and convert them to an [`ErrorDescription`].
pub(crate) fn catch_objc<R>(f: impl FnOnce() -> R + UnwindSafe) -> Result<R, ErrorDescription> {
    objc2::exception::catch(f).map_err(describe_exception)
}

/// Translate a caught Objective-C exception.
///
/// `NSException` instances contribute their name and reason. Anything else
/// that was thrown is described by its debug representation, and a `nil`
/// exception gets the fallback message.
fn describe_exception(exception: Option<Retained<Exception>>) -> ErrorDescription {
    let Some(exception) = exception else {
        return ErrorDescription::from_parts(ExceptionSource::ObjectiveC, None, None);
    };

    // SAFETY: every thrown Objective-C exception is an object.
    let object: Retained<AnyObject> = unsafe { Retained::cast_unchecked(exception) };
    match object.downcast::<NSException>() {
        Ok(ns_exception) => {
            let name = unsafe { ns_exception.name() }.to_string();
            let reason = unsafe { ns_exception.reason() }.map(|r| r.to_string());
            ErrorDescription::from_parts(ExceptionSource::ObjectiveC, Some(name), reason)
        }
        Err(other) => ErrorDescription::from_parts(
            ExceptionSource::ObjectiveC,
            None,
            Some(format!("{other:?}")),
        ),
    }
}

/// Raise an `NSException` with the given name and reason.
///
/// # Safety
///
/// The exception must be caught before it unwinds through any frame that
/// cannot handle it, e.g. by calling this inside [`try_run`](crate::try_run).
pub unsafe fn raise_ns_exception(name: &str, reason: Option<&str>) -> ! {
    let name = NSString::from_str(name);
    let reason = reason.map(NSString::from_str);
    let exception =
        unsafe { NSException::exceptionWithName_reason_userInfo(&name, reason.as_deref(), None) };
    // SAFETY: NSException is a valid throwable object.
    unsafe { objc2::exception::throw(Retained::cast_unchecked(exception)) }
}
