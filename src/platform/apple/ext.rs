use std::panic::AssertUnwindSafe;

use block2::DynBlock;
use objc2::rc::Retained;
use objc2::runtime::{AnyObject, Bool};
use objc2_foundation::{NSDictionary, NSError, NSString};

use crate::error::ErrorDescription;

/// Apple-specific conversions for [`ErrorDescription`].
pub trait AppleErrorDescriptionExt {
    /// Build an `NSError` with the same domain, code and user info.
    fn to_ns_error(&self) -> Retained<NSError>;
}

impl AppleErrorDescriptionExt for ErrorDescription {
    fn to_ns_error(&self) -> Retained<NSError> {
        let domain = NSString::from_str(self.domain());

        let (keys, values): (Vec<_>, Vec<_>) = self
            .user_info()
            .map(|(k, v)| (NSString::from_str(k), NSString::from_str(v)))
            .unzip();
        let key_refs: Vec<&NSString> = keys.iter().map(|k| &**k).collect();
        let value_refs: Vec<&AnyObject> = values.iter().map(|v| as_object(v)).collect();
        let user_info = NSDictionary::from_slices(&key_refs, &value_refs);

        unsafe { NSError::errorWithDomain_code_userInfo(&domain, self.code(), Some(&user_info)) }
    }
}

fn as_object(s: &NSString) -> &AnyObject {
    s
}

/// Objective-C entry point: run `block`, returning `NO` and filling `error` if
/// it raised.
///
/// Declared for Objective-C and Swift callers as
///
/// ```objc
/// BOOL exception_bridge_try_block(void (NS_NOESCAPE ^_Nonnull block)(void),
///                                 NSError *_Nullable *_Nullable error);
/// ```
///
/// The error is returned autoreleased, following Cocoa's out-parameter
/// convention. `error` is left untouched on success.
///
/// # Safety
///
/// `error` must be null or point to writable storage for an `NSError *`.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn exception_bridge_try_block(
    block: &DynBlock<dyn Fn()>,
    error: *mut *mut NSError,
) -> Bool {
    match crate::try_run(AssertUnwindSafe(|| block.call(()))) {
        Ok(()) => Bool::YES,
        Err(desc) => {
            if !error.is_null() {
                unsafe { *error = Retained::autorelease_ptr(desc.to_ns_error()) };
            }
            Bool::NO
        }
    }
}
