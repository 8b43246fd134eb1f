use condense::setup_logging;

#[test]
fn test_logging_setup() {
    // Only one global subscriber may be installed per process, so this test
    // checks the first installation does not panic.
    let result = std::panic::catch_unwind(|| {
        setup_logging();
    });

    assert!(result.is_ok(), "setup_logging function should not panic");
}
