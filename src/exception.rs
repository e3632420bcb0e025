use core::fmt;

/// A native exception raised from Rust code.
///
/// Raising one unwinds the stack with the exception as the payload, much like
/// `-[NSException raise]` does on Apple platforms. The bridge recognises the
/// payload and reports its name and reason instead of a generic panic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exception {
    name: String,
    reason: Option<String>,
}

impl Exception {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Exception {
            name: name.into(),
            reason: Some(reason.into()),
        }
    }

    /// An exception that carries a name but no reason.
    pub fn without_reason(name: impl Into<String>) -> Self {
        Exception {
            name: name.into(),
            reason: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Unwind with this exception as the payload.
    ///
    /// The panic hook is not invoked, so nothing is printed when the exception
    /// is intercepted by [`try_run`](crate::try_run) or [`catch`](crate::catch).
    pub fn raise(self) -> ! {
        std::panic::resume_unwind(Box::new(self))
    }

    pub(crate) fn into_parts(self) -> (String, Option<String>) {
        (self.name, self.reason)
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            Some(ref reason) => write!(f, "{}: {reason}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl core::error::Error for Exception {}
