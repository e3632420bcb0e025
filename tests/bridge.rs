use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

use exception_bridge::{
    ERROR_CODE, ERROR_DOMAIN, EXCEPTION_NAME_KEY, Exception, ExceptionSource, FALLBACK_MESSAGE,
    LOCALIZED_DESCRIPTION_KEY, PANIC_EXCEPTION_NAME, catch, try_run,
};

#[test]
fn normal_block_succeeds() {
    let result = try_run(|| {
        let sum = 2 + 2;
        assert_eq!(sum, 4);
    });
    assert!(result.is_ok());
}

#[test]
fn block_runs_exactly_once() {
    let calls = Cell::new(0);
    let result = try_run(AssertUnwindSafe(|| calls.set(calls.get() + 1)));
    assert!(result.is_ok());
    assert_eq!(calls.get(), 1);

    let result = try_run(AssertUnwindSafe(|| {
        calls.set(calls.get() + 1);
        Exception::without_reason("Stop").raise();
    }));
    assert!(result.is_err());
    assert_eq!(calls.get(), 2);
}

#[test]
fn side_effects_before_the_exception_are_kept() {
    let mut log = Vec::new();
    let result = try_run(AssertUnwindSafe(|| {
        log.push("connect");
        log.push("start");
        Exception::new("AudioEngineException", "required condition is false").raise();
    }));
    assert!(result.is_err());
    assert_eq!(log, ["connect", "start"]);
}

#[test]
fn named_exception_is_described() {
    let err = try_run(|| Exception::new("NSInvalidArgumentException", "bad format").raise())
        .expect_err("exception should be intercepted");

    assert!(err.message().contains("bad format"));
    assert_eq!(err.name(), Some("NSInvalidArgumentException"));
    assert_eq!(err.domain(), ERROR_DOMAIN);
    assert_eq!(err.code(), ERROR_CODE);
    assert_eq!(err.exception_source(), ExceptionSource::Panic);
    assert_eq!(
        err.user_info_value(EXCEPTION_NAME_KEY),
        Some("NSInvalidArgumentException")
    );
    assert_eq!(
        err.user_info_value(LOCALIZED_DESCRIPTION_KEY),
        Some("bad format")
    );
}

#[test]
fn missing_reason_uses_fallback() {
    let err = try_run(|| Exception::without_reason("NSGenericException").raise())
        .expect_err("exception should be intercepted");

    assert_eq!(err.message(), FALLBACK_MESSAGE);
    assert!(!err.message().is_empty());
    assert_eq!(err.reason(), None);
    assert_eq!(err.name(), Some("NSGenericException"));
}

#[test]
fn plain_panic_is_intercepted() {
    let err = try_run(|| panic!("device {} vanished", 3)).expect_err("panic should be intercepted");
    assert_eq!(err.name(), Some(PANIC_EXCEPTION_NAME));
    assert_eq!(err.message(), "device 3 vanished");
}

#[test]
fn success_and_error_are_exclusive() {
    fn returns() {}
    fn raises_with_reason() {
        Exception::new("A", "b").raise()
    }
    fn raises_without_reason() {
        Exception::without_reason("A").raise()
    }
    fn panics_with_opaque_payload() {
        panic::panic_any(5_i64)
    }

    let blocks: [(bool, fn()); 4] = [
        (true, returns),
        (false, raises_with_reason),
        (false, raises_without_reason),
        (false, panics_with_opaque_payload),
    ];

    for (expect_ok, block) in blocks {
        let result = try_run(block);
        assert_eq!(result.is_ok(), expect_ok);
        if let Err(err) = result {
            assert!(!err.message().is_empty());
        }
    }
}

#[test]
fn bridge_never_unwinds_itself() {
    let outer = panic::catch_unwind(|| {
        let _ = try_run(|| {});
        let _ = try_run(|| Exception::new("NSRangeException", "index 4 beyond bounds").raise());
        let _ = try_run(|| Exception::without_reason("NSInternalInconsistencyException").raise());
        let _ = try_run(|| panic!("plain"));
    });
    assert!(outer.is_ok());
}

#[test]
fn catch_returns_value() {
    let frames = catch(|| 512_u32 * 2);
    assert_eq!(frames, Ok(1024));

    let failed: Result<u32, _> = catch(|| Exception::new("Overload", "too many nodes").raise());
    assert_eq!(failed.map_err(|e| e.to_string()), Err("Overload: too many nodes".to_owned()));
}

#[test]
fn nested_barriers_are_independent() {
    let outer = try_run(|| {
        let inner = try_run(|| Exception::new("Inner", "first").raise());
        assert_eq!(inner.map_err(|e| e.message().to_owned()), Err("first".to_owned()));
        Exception::new("Outer", "second").raise();
    });
    let err = outer.expect_err("outer exception should be intercepted");
    assert_eq!(err.name(), Some("Outer"));
    assert_eq!(err.message(), "second");
}

#[test]
fn concurrent_calls_are_independent() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let result = try_run(move || {
                    if i % 2 == 1 {
                        Exception::new("Worker", format!("worker {i}")).raise();
                    }
                });
                (i, result)
            })
        })
        .collect();

    for handle in handles {
        let (i, result) = handle.join().expect("worker thread panicked");
        match result {
            Ok(()) => assert_eq!(i % 2, 0),
            Err(err) => assert_eq!(err.message(), format!("worker {i}")),
        }
    }
}
