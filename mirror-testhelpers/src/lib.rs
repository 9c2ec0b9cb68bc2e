#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use mirror_testhelpers_macros::test;

use std::sync::LazyLock;
use std::time::Instant;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding a targets filter, e.g. `mirror=debug`.
pub const LOG_ENV: &str = "MIRROR_LOG";

/// Process start, as seen by the first test that logs.
static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Prints the time since [`START_TIME`] instead of wall-clock time, so
/// interleaved test output reads as one timeline.
struct Uptime;

impl FormatTime for Uptime {
    fn format_time(&self, w: &mut Writer<'_>) -> core::fmt::Result {
        let elapsed = START_TIME.elapsed();
        write!(w, "{:4}.{:03}s", elapsed.as_secs(), elapsed.subsec_millis())
    }
}

/// Targets filter from [`LOG_ENV`], falling back to everything at `TRACE`
/// when the variable is unset or does not parse.
fn filter_from_env() -> Targets {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|s| s.parse::<Targets>().ok())
        .unwrap_or_else(|| Targets::new().with_default(tracing::Level::TRACE))
}

/// Lazy initialization of the global tracing subscriber.
///
/// Runs once per process however many tests call [`setup`]. `try_init`
/// leaves an already installed subscriber alone.
static SUBSCRIBER_INIT: LazyLock<()> = LazyLock::new(|| {
    // Start the uptime clock before the first event is formatted
    let _ = *START_TIME;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_timer(Uptime)
                .with_target(false)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .with(filter_from_env())
        .try_init()
        .ok();
});

/// Install the test subscriber, once per process.
///
/// Called by [`test`] before every test body. Later calls do nothing, and a
/// subscriber installed by someone else is left in place.
pub fn setup() {
    // Ensure the subscriber is initialized
    #[allow(clippy::let_unit_value)]
    let _ = *SUBSCRIBER_INIT;
}

/// An error type that panics when it's built, so tests can use `?` on any
/// error and still get the failing location.
#[derive(Debug)]
pub struct IPanic;

impl<E> From<E> for IPanic
where
    E: core::error::Error + Send + Sync,
{
    #[track_caller]
    fn from(value: E) -> Self {
        panic!("from: {}: {value}", core::panic::Location::caller())
    }
}
