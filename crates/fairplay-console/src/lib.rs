//! Colorful console output for tier searches and tournament updates.
//!
//! Provides a custom `tracing` layer that formats Fairplay events with colors
//! on stderr, leaving stdout free for reports.
//!
//! ## Log Levels
//!
//! - **INFO**: Search start/end, recorded results, round changes
//! - **DEBUG**: Search improvements and rejected results

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SEARCH_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library crates whose events the console layer renders.
const TARGETS: [&str; 2] = ["fairplay_search", "fairplay_tournament"];

/// Crate name of the facade and of the `fairplay` binary.
const APP_TARGET: &str = "fairplay";

fn is_rendered(target: &str) -> bool {
    TARGETS.iter().any(|t| target.starts_with(t))
        || target == APP_TARGET
        || target
            .strip_prefix(APP_TARGET)
            .is_some_and(|rest| rest.starts_with("::"))
}

/// Initializes console output at INFO.
///
/// Safe to call multiple times - only the first call has effect.
/// `RUST_LOG` overrides the default filter.
pub fn init() {
    init_with_level(LevelFilter::INFO);
}

/// Initializes console output with a default level for Fairplay crates.
pub fn init_with_level(level: LevelFilter) {
    INIT.get_or_init(|| {
        print_banner();

        let directive = |target: &str| -> Directive {
            format!("{target}={level}")
                .parse()
                .expect("target and level form a valid directive")
        };
        let filter = EnvFilter::builder()
            .with_default_directive(directive("fairplay_search"))
            .from_env_lossy()
            .add_directive(directive("fairplay_tournament"))
            .add_directive(directive(APP_TARGET));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(FairplayConsoleLayer)
            .try_init();
    });
}

// Marks the start of a search for elapsed time tracking.
fn mark_search_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SEARCH_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since the last search start.
fn elapsed_secs() -> f64 {
    let epoch = EPOCH.get_or_init(Instant::now);
    let start_nanos = SEARCH_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 _____     _           _
|  ___|_ _(_)_ __ _ __| | __ _ _   _
| |_ / _` | | '__| '_ \ |/ _` | | | |
|  _| (_| | | |  | |_) | | (_| | |_| |
|_|  \__,_|_|_|  | .__/|_|\__,_|\__, |
                 |_|            |___/
"#;

    let version_line = format!("        v{} - Doubles Tournament Fairness\n", VERSION);

    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{}", banner.bright_cyan());
    let _ = writeln!(stderr, "{}", version_line.bright_white().bold());
    let _ = stderr.flush();
}

/// A tracing layer that formats Fairplay events with colors.
pub struct FairplayConsoleLayer;

impl<S: Subscriber> Layer<S> for FairplayConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !is_rendered(event.metadata().target()) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    mode: Option<String>,
    seed: Option<String>,
    error: Option<String>,
    environment: Option<String>,
    message: Option<String>,
    players: Option<u64>,
    combinations: Option<u64>,
    total_trials: Option<u64>,
    trials: Option<u64>,
    speed: Option<u64>,
    duration_ms: Option<u64>,
    violations: Option<u64>,
    good_matchups: Option<u64>,
    top_size: Option<u64>,
    bottom_size: Option<u64>,
    trial: Option<u64>,
    round: Option<u64>,
    court: Option<u64>,
    team1_score: Option<u64>,
    team2_score: Option<u64>,
    replaced: Option<bool>,
    terminated_early: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "players" => self.players = Some(value),
            "combinations" => self.combinations = Some(value),
            "total_trials" => self.total_trials = Some(value),
            "trials" => self.trials = Some(value),
            "speed" => self.speed = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "violations" => self.violations = Some(value),
            "good_matchups" => self.good_matchups = Some(value),
            "top_size" => self.top_size = Some(value),
            "bottom_size" => self.bottom_size = Some(value),
            "trial" => self.trial = Some(value),
            "round" => self.round = Some(value),
            "court" => self.court = Some(value),
            "team1_score" => self.team1_score = Some(value),
            "team2_score" => self.team2_score = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "replaced" => self.replaced = Some(value),
            "terminated_early" => self.terminated_early = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let value = Some(value.to_string());
        match field.name() {
            "event" => self.event = value,
            "mode" => self.mode = value,
            "seed" => self.seed = value,
            "error" => self.error = value,
            "environment" => self.environment = value,
            "message" => self.message = value,
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "search_start" => format_search_start(v),
        "improvement" => format_improvement(v),
        "search_end" => format_search_end(v),
        "result_recorded" => format_result_recorded(v),
        "result_rejected" => format_result_rejected(v),
        "round_advanced" => format_round_advanced(v),
        "environment_created" | "environment_removed" => format_environment(v, event),
        _ => v
            .message
            .as_deref()
            .map(|m| format!("{} {}", format_elapsed(), m))
            .unwrap_or_default(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_search_start(v: &EventVisitor) -> String {
    mark_search_start();

    format!(
        "{} {} Searching │ {} players │ {} size pairs │ {} trials │ seed {} │ {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.players).bright_yellow(),
        count(v.combinations).bright_yellow(),
        count(v.total_trials).bright_yellow(),
        v.seed.as_deref().unwrap_or("?").bright_magenta(),
        v.mode.as_deref().unwrap_or("sequential").white(),
    )
}

fn format_improvement(v: &EventVisitor) -> String {
    format!(
        "{} {} {} │ top {} bottom {} │ trial {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        format_violations(v.violations.unwrap_or(0), v.good_matchups.unwrap_or(0)),
        v.top_size.unwrap_or(0),
        v.bottom_size.unwrap_or(0),
        count(v.trial).bright_black(),
    )
}

fn format_search_end(v: &EventVisitor) -> String {
    let duration = v.duration_ms.unwrap_or(0);
    let violations = v.violations.unwrap_or(0);

    let mut output = format!(
        "{} {} Search complete │ {} │ {} trials │ {} trials/s │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(duration).yellow(),
        count(v.trials).white(),
        count(v.speed).bright_magenta().bold(),
        format_violations(violations, v.good_matchups.unwrap_or(0)),
    );

    if v.terminated_early == Some(true) {
        output.push_str(&format!(" │ {}", "stopped early".bright_yellow()));
    }

    output
}

fn format_result_recorded(v: &EventVisitor) -> String {
    let verb = if v.replaced == Some(true) {
        "replaced"
    } else {
        "recorded"
    };
    format!(
        "{} {} Round {} Court {} {} │ {}-{}",
        format_elapsed(),
        "✓".bright_green(),
        v.round.unwrap_or(0),
        v.court.unwrap_or(0),
        verb,
        v.team1_score.unwrap_or(0).bright_white().bold(),
        v.team2_score.unwrap_or(0).bright_white().bold(),
    )
}

fn format_result_rejected(v: &EventVisitor) -> String {
    format!(
        "{} {} Round {} Court {} rejected │ {}",
        format_elapsed(),
        "✗".bright_red(),
        v.round.unwrap_or(0),
        v.court.unwrap_or(0),
        v.error.as_deref().unwrap_or("unknown error").bright_red(),
    )
}

fn format_round_advanced(v: &EventVisitor) -> String {
    format!(
        "{} {} Round {} in play",
        format_elapsed(),
        "▶".bright_blue(),
        v.round.unwrap_or(0).white().bold(),
    )
}

fn format_environment(v: &EventVisitor, event: &str) -> String {
    let verb = if event == "environment_created" {
        "created"
    } else {
        "removed"
    };
    format!(
        "{} {} Environment {} {}",
        format_elapsed(),
        "●".bright_blue(),
        v.environment.as_deref().unwrap_or("?").white().bold(),
        verb,
    )
}

fn format_violations(violations: u64, good_matchups: u64) -> String {
    let violations_str = format!("{violations} violations");
    let colored = if violations == 0 {
        violations_str.bright_green().to_string()
    } else {
        violations_str.bright_red().to_string()
    };
    format!("{} / {} good matchups", colored, good_matchups.white())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
