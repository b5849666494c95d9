use std::sync::Arc;

use templated_log::init::{default_logger, init_default, InitError};
use templated_log::{args, Level, Logger, MemorySink};

// The default logger is process-wide, so everything touching it lives in
// one test.
#[test]
fn installs_once() {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::new(Arc::clone(&sink)).with_level(Level::Debug);

    init_default(logger).unwrap();
    default_logger().debug("hello {who}", args!["world"]);

    assert_eq!(sink.events()[0].message(), "hello world");

    let second = init_default(Logger::new(MemorySink::new()));
    assert!(matches!(second, Err(InitError::AlreadyInitialized)));
}
