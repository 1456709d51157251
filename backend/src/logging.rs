use std::fmt::Write as _;

use tracing::{Event, Subscriber};
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::Context, EnvFilter, Layer, Registry};

const DEFAULT_FILTER: &str = "warn,spinwheel_backend=info,spinwheel_shared=info";

/// Collects the message plus any structured fields of an event. Events bridged
/// from the `log` facade carry their real target in `log.target`.
#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: String,
    log_target: Option<String>,
}

impl EventVisitor {
    fn push_field(&mut self, name: &str, value: std::fmt::Arguments<'_>) {
        let _ = write!(self.fields, " {}={}", name, value);
    }
}

impl tracing::field::Visit for EventVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => {
                let _ = write!(self.message, "{:?}", value);
            }
            name if name.starts_with("log.") => {}
            name => self.push_field(name, format_args!("{:?}", value)),
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        match field.name() {
            "message" => self.message.push_str(value),
            "log.target" => self.log_target = Some(value.to_string()),
            name if name.starts_with("log.") => {}
            name => self.push_field(name, format_args!("{}", value)),
        }
    }
}

struct SpinLogLayer;

impl<S: Subscriber> Layer<S> for SpinLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        if metadata.target().starts_with("sqlx") {
            // Query logging is too chatty for the console.
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        if visitor.message.is_empty() {
            return;
        }

        let target = visitor.log_target.as_deref().unwrap_or_else(|| metadata.target());
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");

        match *metadata.level() {
            tracing::Level::ERROR => eprintln!("[{}] ❌ Error: {} - {}{}", timestamp, target, visitor.message, visitor.fields),
            tracing::Level::WARN => eprintln!("[{}] ⚠️ Warning: {} - {}{}", timestamp, target, visitor.message, visitor.fields),
            tracing::Level::INFO => println!("[{}] ℹ️ {} - {}{}", timestamp, target, visitor.message, visitor.fields),
            _ => println!("[{}] 🔄 {} - {}{}", timestamp, target, visitor.message, visitor.fields),
        }
    }
}

/// Installs the console subscriber. `RUST_LOG` overrides the default filter, and
/// records from the `log` facade (the spin engine) are routed through it too.
pub fn setup() -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    Registry::default()
        .with(env_filter)
        .with(SpinLogLayer)
        .try_init()
}
