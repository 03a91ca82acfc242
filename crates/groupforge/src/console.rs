//! Colored console output for compliance and editor events.
//!
//! Provides a `tracing` layer that renders the structured events emitted by
//! the scoring and editor crates. Enabled with the `console` feature.

use std::io::{self, Write};
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_FILTER: &str = "groupforge_scoring=debug,groupforge_editor=debug";

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the console layer as the global subscriber.
///
/// Respects `RUST_LOG` when set. Safe to call multiple times; only the first
/// call has effect, and an already installed global subscriber is left alone.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ComplianceConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats GroupForge events with colors.
pub struct ComplianceConsoleLayer;

impl<S: Subscriber> Layer<S> for ComplianceConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("groupforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    person: Option<String>,
    group: Option<String>,
    reason: Option<String>,
    stage: Option<String>,
    error: Option<String>,
    session: Option<u64>,
    generation: Option<u64>,
    warnings: Option<u64>,
    constraint_count: Option<u64>,
    violated_count: Option<u64>,
    total_violations: Option<u64>,
    elapsed_us: Option<u64>,
}

impl EventVisitor {
    fn set_str(&mut self, name: &str, value: String) {
        let slot = match name {
            "event" => &mut self.event,
            "person" => &mut self.person,
            "group" => &mut self.group,
            "reason" => &mut self.reason,
            "stage" => &mut self.stage,
            "error" => &mut self.error,
            _ => return,
        };
        *slot = Some(value);
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_str(field.name(), s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_str(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let slot = match field.name() {
            "session" => &mut self.session,
            "generation" => &mut self.generation,
            "warnings" => &mut self.warnings,
            "constraint_count" => &mut self.constraint_count,
            "violated_count" => &mut self.violated_count,
            "total_violations" => &mut self.total_violations,
            "elapsed_us" => &mut self.elapsed_us,
            _ => return,
        };
        *slot = Some(value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref() {
        Some("compliance_evaluated") => format_compliance(v),
        Some("drop_rejected") => format_drop_rejected(v),
        Some("move_committed") => format_move_committed(v),
        Some("preview_failed") => format_preview_failed(v),
        Some("preview_discarded") => format_preview_discarded(v),
        _ => String::new(),
    }
}

fn format_compliance(v: &EventVisitor) -> String {
    let constraints = v.constraint_count.unwrap_or(0);
    let violated = v.violated_count.unwrap_or(0);
    let total = v.total_violations.unwrap_or(0);

    let status = if violated == 0 {
        "all satisfied".bright_green().to_string()
    } else {
        format!("{violated} violated").bright_red().to_string()
    };

    format!(
        "{} {} {} {} constraints, {}, {} violations ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Compliance]".bright_cyan(),
        constraints.to_string().white().bold(),
        status,
        total.to_string().yellow(),
        format_elapsed_us(v.elapsed_us.unwrap_or(0)).bright_black()
    )
}

fn format_drop_rejected(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} -> {} (session {}): {}",
        timestamp().bright_black(),
        "WARN".yellow(),
        "[Editor]".bright_cyan(),
        field(&v.person),
        field(&v.group),
        v.session.unwrap_or(0),
        field(&v.reason).bright_red()
    )
}

fn format_move_committed(v: &EventVisitor) -> String {
    let warnings = v.warnings.unwrap_or(0);
    let suffix = if warnings > 0 {
        format!(" with {warnings} warning(s)").yellow().to_string()
    } else {
        String::new()
    };
    format!(
        "{} {} {} {} -> {} (session {}){}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Editor]".bright_cyan(),
        field(&v.person).white().bold(),
        field(&v.group).white().bold(),
        v.session.unwrap_or(0),
        suffix
    )
}

fn format_preview_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} {} #{} {} -> {}: {}",
        timestamp().bright_black(),
        "ERROR".bright_red(),
        "[Preview]".bright_cyan(),
        v.generation.unwrap_or(0),
        field(&v.person),
        field(&v.group),
        field(&v.error).bright_red()
    )
}

fn format_preview_discarded(v: &EventVisitor) -> String {
    format!(
        "    {} preview #{} discarded at {}",
        "->".bright_blue(),
        v.generation.unwrap_or(0),
        field(&v.stage)
    )
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("?")
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_elapsed_us(us: u64) -> String {
    if us < 1_000 {
        format!("{us}µs")
    } else if us < 1_000_000 {
        format!("{:.2}ms", us as f64 / 1_000.0)
    } else {
        format!("{:.2}s", us as f64 / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(event: &str) -> EventVisitor {
        EventVisitor {
            event: Some(event.to_string()),
            ..EventVisitor::default()
        }
    }

    #[test]
    fn test_unknown_events_are_silent() {
        assert!(format_event(&EventVisitor::default()).is_empty());
        assert!(format_event(&visitor("solver_step")).is_empty());
    }

    #[test]
    fn test_drop_rejected_line() {
        let v = EventVisitor {
            person: Some("ann".to_string()),
            group: Some("g1".to_string()),
            session: Some(2),
            reason: Some("Capacity exceeded".to_string()),
            ..visitor("drop_rejected")
        };
        let line = format_event(&v);
        assert!(line.contains("ann"));
        assert!(line.contains("(session 2)"));
        assert!(line.contains("Capacity exceeded"));
    }

    #[test]
    fn test_compliance_line_counts() {
        let v = EventVisitor {
            constraint_count: Some(4),
            violated_count: Some(1),
            total_violations: Some(3),
            elapsed_us: Some(1_500),
            ..visitor("compliance_evaluated")
        };
        let line = format_event(&v);
        assert!(line.contains("1 violated"));
        assert!(line.contains("1.50ms"));
    }

    #[test]
    fn test_elapsed_units() {
        assert_eq!(format_elapsed_us(999), "999µs");
        assert_eq!(format_elapsed_us(2_500_000), "2.50s");
    }
}
