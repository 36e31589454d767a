use prometheus::{register_counter, register_counter_vec, Counter, CounterVec};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref ANSWERS_CHECKED: CounterVec = register_counter_vec!(
        "answers_checked_total",
        "Number of checked answers",
        &["result"]
    )
    .unwrap();
    pub static ref RANDOM_QUESTIONS_SERVED: Counter = register_counter!(
        "random_questions_served_total",
        "Number of random questions handed out"
    )
    .unwrap();
}

pub fn record_answer_check(correct: bool) {
    let result = if correct { "correct" } else { "incorrect" };
    ANSWERS_CHECKED.with_label_values(&[result]).inc();
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. `.env` is read first so `LOG_LEVEL` and
/// `INCLUDE_SPAN_EVENTS` can live there too.
pub fn init_tracing() {
    dotenv::dotenv().ok();
    let mut fmt_layer = fmt::layer();
    if std::env::var("INCLUDE_SPAN_EVENTS").is_ok_and(|value| value.eq_ignore_ascii_case("true")) {
        fmt_layer = fmt_layer.with_span_events(FmtSpan::ENTER | FmtSpan::EXIT);
    }
    let filter_layer = log_filter();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
