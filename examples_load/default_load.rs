use std::time::Instant;

use templated_log::{args, Arg, Level, Logger, NoopSink};

const TEMPLATES: [&str; 4] = [
    "{user} opened {path}",
    "request took {ms|%.2f}ms",
    "cache {state} for {key}, {hits} hits so far",
    "nothing to substitute here",
];

fn emit_all(log: &Logger, n: u64) -> std::time::Duration {
    let start = Instant::now();

    for i in 0..n {
        let template = TEMPLATES[(i % TEMPLATES.len() as u64) as usize];
        let level = match i % 4 {
            0 => Level::Error,
            1 => Level::Warning,
            2 => Level::Info,
            _ => Level::Debug,
        };
        log.emit(
            level,
            template,
            args!["ana", 4.44444, Arg::lazy(move || i * 2), i],
        );
    }

    start.elapsed()
}

fn main() {
    let n: u64 = 100_000;

    for threshold in [Level::Suppressed, Level::Info, Level::Debug] {
        let log = Logger::new(NoopSink).with_level(threshold);
        let elapsed = emit_all(&log, n);
        println!(
            "threshold {}: {} emits in {:?} (~{:.0} ev/s)",
            threshold,
            n,
            elapsed,
            n as f64 / elapsed.as_secs_f64()
        );
    }
}
