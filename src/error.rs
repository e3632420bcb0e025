use core::fmt;

use arrayvec::ArrayVec;

/// Error domain reported for every intercepted native exception.
pub const ERROR_DOMAIN: &str = "NativeExceptionErrorDomain";

/// Error code reported for every intercepted native exception.
pub const ERROR_CODE: isize = -1;

/// Message used when the exception carries no usable reason.
pub const FALLBACK_MESSAGE: &str = "Unknown native exception";

/// Name given to Rust panics whose payload does not carry one.
pub const PANIC_EXCEPTION_NAME: &str = "RustPanic";

/// User-info key holding the human-readable message. Matches Foundation's
/// `NSLocalizedDescriptionKey`.
pub const LOCALIZED_DESCRIPTION_KEY: &str = "NSLocalizedDescription";

/// User-info key holding the original exception name.
pub const EXCEPTION_NAME_KEY: &str = "ExceptionName";

/// User-info key holding the original exception reason.
pub const EXCEPTION_REASON_KEY: &str = "ExceptionReason";

const MAX_USER_INFO_ENTRIES: usize = 3;

/// The runtime that raised an intercepted exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ExceptionSource {
    /// An Objective-C exception (`@throw`, `-[NSException raise]`).
    ObjectiveC,
    /// A Rust panic or [`Exception::raise`](crate::Exception::raise).
    Panic,
    /// The bridge was called incorrectly, e.g. with a null block.
    Caller,
}

/// Structured description of an intercepted native exception.
///
/// The shape mirrors `NSError`: a domain, a code, a localized message and a
/// user-info map. Callers on the far side of an FFI boundary can rebuild their
/// own error type from it without any further translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDescription {
    source: ExceptionSource,
    message: String,
    name: Option<String>,
    reason: Option<String>,
    user_info: ArrayVec<(&'static str, String), MAX_USER_INFO_ENTRIES>,
}

impl ErrorDescription {
    /// Build a description from whatever metadata the exception exposed.
    ///
    /// Empty names and reasons are treated as absent. The message falls back
    /// to [`FALLBACK_MESSAGE`] so it is never empty.
    pub(crate) fn from_parts(
        source: ExceptionSource,
        name: Option<String>,
        reason: Option<String>,
    ) -> Self {
        let name = name.filter(|n| !n.is_empty());
        let reason = reason.filter(|r| !r.is_empty());
        let message = reason
            .clone()
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_owned());

        let mut user_info = ArrayVec::new();
        user_info.push((LOCALIZED_DESCRIPTION_KEY, message.clone()));
        if let Some(ref n) = name {
            user_info.push((EXCEPTION_NAME_KEY, n.clone()));
        }
        if let Some(ref r) = reason {
            user_info.push((EXCEPTION_REASON_KEY, r.clone()));
        }

        ErrorDescription {
            source,
            message,
            name,
            reason,
            user_info,
        }
    }

    pub fn domain(&self) -> &'static str {
        ERROR_DOMAIN
    }

    pub fn code(&self) -> isize {
        ERROR_CODE
    }

    /// Human-readable message: the exception reason, or [`FALLBACK_MESSAGE`].
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The exception name, e.g. `NSInvalidArgumentException`.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The raw exception reason, if the exception carried one.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn exception_source(&self) -> ExceptionSource {
        self.source
    }

    /// Auxiliary key/value metadata, in the order `NSError` would list it.
    pub fn user_info(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.user_info.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Look up a single user-info value.
    pub fn user_info_value(&self, key: &str) -> Option<&str> {
        self.user_info
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for ErrorDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(ref name) => write!(f, "{name}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl core::error::Error for ErrorDescription {}
