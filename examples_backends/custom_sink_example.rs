use templated_log::{args, Event, Level, Logger, Sink};

/// Example of integrating a completely custom destination by
/// implementing the `Sink` trait directly. Imagine this feeds some
/// in-house log viewer; for the sake of example we print a compact
/// key=value line.
struct KeyValueSink;

impl Sink for KeyValueSink {
    fn handle(&self, event: &Event) {
        let mut line = format!("level={} msg={:?}", event.level(), event.message());
        for (key, value) in &event.context().merged(event.details()) {
            line.push_str(&format!(" {}={}", key, value));
        }
        println!("{}", line);
    }
}

struct PaymentService;

fn main() {
    let log = Logger::new(KeyValueSink)
        .with_level(Level::Debug)
        .with_type_tag(&PaymentService)
        .with_context("region", "eu-west-1");

    log.info("custom sink example started", args![]);
    log.debug("charged {user} {amount|%.2f} EUR", args!["ana", 12.5]);
    log.error("card {card} declined", args!["**** 4242", "insufficient funds"]);
}
