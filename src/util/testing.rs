//! Shared helpers for unit and integration tests.

use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{NodeId, TreeArena};

static TEST_SETUP: Once = Once::new();

/// Installs the global tracing subscriber once per test binary.
///
/// Honors `RUST_LOG`; defaults to `debug`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Builds `A(B(C, D(G)), F)` and returns the handles in that order:
/// `[a, b, c, d, g, f]`.
///
/// ```text
/// A
/// +--B
/// |  +--C
/// |  +--D
/// |     +--G
/// +--F
/// ```
pub fn sample_tree(arena: &mut TreeArena<String>) -> [NodeId; 6] {
    let [a, b, c, d, g, f] =
        ["A", "B", "C", "D", "G", "F"].map(|label| arena.insert(label.to_string()));
    for (parent, child) in [(a, b), (b, c), (b, d), (d, g), (a, f)] {
        arena
            .add_child(parent, child)
            .unwrap_or_else(|e| panic!("sample tree is acyclic: {e}"));
    }
    [a, b, c, d, g, f]
}
