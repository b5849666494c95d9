use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use templated_log::{
    args, debug, error, info, warn, Arg, Data, Event, FixedClock, Level, Logger, MemorySink,
    ReservedKeys, Settings, SinkFn, Value,
};

fn capture(level: Level) -> (Logger, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap());
    let log = Logger::new(Arc::clone(&sink))
        .with_level(level)
        .with_clock(clock);
    (log, sink)
}

#[test]
fn renders_message_and_details_together() {
    let (log, sink) = capture(Level::Info);

    log.info("{x} and {y}", args![1, "a"]);

    let event = &sink.events()[0];
    assert_eq!(event.message(), "1 and a");
    assert_eq!(event.details(), &Data::new().with("x", 1).with("y", "a"));
}

#[test]
fn suppressed_calls_never_run_deferred_arguments() {
    let (log, sink) = capture(Level::Warning);
    let calls = Arc::new(AtomicUsize::new(0));

    let thunk = |calls: &Arc<AtomicUsize>| {
        let calls = Arc::clone(calls);
        Arg::lazy(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            "expensive"
        })
    };

    log.debug("{diag}", args![thunk(&calls)]);
    log.info("{diag}", args![thunk(&calls)]);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(sink.is_empty());

    log.warn("{diag}", args![thunk(&calls)]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(sink.events()[0].message(), "expensive");
}

#[test]
fn degrades_visibly_instead_of_failing() {
    let (log, sink) = capture(Level::Info);

    log.info("{x} is missing", args![]);
    log.info("odd { } brace", args![]);
    log.info("literal {{brace}}", args![]);

    let messages: Vec<String> = sink
        .events()
        .iter()
        .map(|e| e.message().to_string())
        .collect();
    assert_eq!(
        messages,
        vec!["{x:MISSING} is missing", "odd { } brace", "literal {brace}"]
    );
    assert!(sink.events().iter().all(|e| e.details().is_empty()));
}

#[test]
fn custom_format_rounds_display_only() {
    let (log, sink) = capture(Level::Info);

    log.info("{n|%.2f} done", args![42.235]);

    let event = &sink.events()[0];
    assert_eq!(event.message(), "42.24 done");
    assert_eq!(event.details().get("n"), Some(&Value::Float(42.235)));
}

#[test]
fn extra_arguments_are_kept() {
    let (log, sink) = capture(Level::Info);

    log.info("{a}", args![1, 2]);

    let details = sink.events()[0].details().clone();
    assert_eq!(details.get("a"), Some(&Value::Int(1)));
    assert_eq!(details.get("_1"), Some(&Value::Int(2)));
}

#[test]
fn merged_view_prefers_details_and_reserved_keys() {
    let (log, sink) = capture(Level::Info);
    let log = log
        .with_context("user", "from-context")
        .with_context("message", "caller supplied")
        .with_context("time", "caller supplied");

    log.info("hello {user}", args!["from-details"]);

    let event = &sink.events()[0];
    let data = event.data();
    assert_eq!(data.get("user"), Some(&Value::Str("from-details".into())));
    assert_eq!(data.get("message"), Some(&Value::Str("hello from-details".into())));
    assert_eq!(data.get("level"), Some(&Value::Str("info".into())));
    assert_eq!(data.get("time"), Some(&Value::Time(event.time())));
    // the context itself still holds the caller's value
    assert_eq!(
        event.context().get("user"),
        Some(&Value::Str("from-context".into()))
    );
}

#[test]
fn merged_view_uses_logger_reserved_keys() {
    let sink = Arc::new(MemorySink::new());
    let keys = ReservedKeys {
        level: "lvl".into(),
        message: "msg".into(),
        time: "ts".into(),
        type_tag: "kind".into(),
    };
    let log = Logger::new(Arc::clone(&sink))
        .with_settings(Arc::new(Settings::default().with_keys(keys)))
        .with_type::<Settings>();

    log.info("hi", args![]);

    let data = sink.events()[0].data();
    assert_eq!(data.get("msg"), Some(&Value::Str("hi".into())));
    assert_eq!(data.get("lvl"), Some(&Value::Str("info".into())));
    assert!(data.contains_key("ts"));
    assert!(data.contains_key("kind"));
    assert!(!data.contains_key("message"));
    assert!(!data.contains_key("level"));
}

#[test]
fn derived_loggers_do_not_leak_context() {
    let (root, sink) = capture(Level::Info);
    let a = root.with_context("k", "a");
    let b = root.with_context("k", "b");

    root.info("root", args![]);
    a.info("a", args![]);
    b.info("b", args![]);

    let events = sink.events();
    assert!(events[0].context().is_empty());
    assert_eq!(events[1].context().get("k"), Some(&Value::Str("a".into())));
    assert_eq!(events[2].context().get("k"), Some(&Value::Str("b".into())));
}

#[test]
fn macros_route_to_matching_levels() {
    let (log, sink) = capture(Level::Debug);

    error!(log, "e {code}", 500);
    warn!(log, "w");
    info!(log, "i {a} {b}", 1, 2.5);
    debug!(log, "d {t}", true,);

    let events = sink.events();
    let summary: Vec<(Level, &str)> = events.iter().map(|e| (e.level(), e.message())).collect();
    assert_eq!(
        summary,
        vec![
            (Level::Error, "e 500"),
            (Level::Warning, "w"),
            (Level::Info, "i 1 2.5"),
            (Level::Debug, "d true"),
        ]
    );
}

#[test]
fn plain_closures_work_as_sinks() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = Arc::clone(&seen);
    let log = Logger::new(SinkFn(move |event: &Event| {
        record.lock().unwrap().push(event.message().to_string());
    }));

    log.info("via {kind}", args!["closure"]);

    assert_eq!(*seen.lock().unwrap(), vec!["via closure"]);
}

#[test]
fn local_time_rendering_when_utc_is_off() {
    let (log, sink) = capture(Level::Info);
    let log = log.with_settings(Arc::new(Settings::default().with_utc(false)));
    let t = chrono::FixedOffset::west_opt(5 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 7, 1, 4, 0, 0)
        .unwrap();

    log.info("at {t}", args![t]);

    assert_eq!(sink.events()[0].message(), "at 2024-07-01T04:00:00.000");
}
