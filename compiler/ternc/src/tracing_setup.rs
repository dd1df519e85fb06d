//! Tracing subscriber setup.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Call once at startup; later calls do nothing. Output is enabled only
/// when `RUST_LOG` is set (e.g. `RUST_LOG=tern_types=debug` for the
/// declaration walk, `RUST_LOG=tern_eval=trace` for every executed node).
/// Setting `TERN_LOG_TREE` switches to indented, span-nested output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
        // A subscriber installed by the host takes precedence.
        let _ = if std::env::var_os("TERN_LOG_TREE").is_some() {
            registry
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .try_init()
        } else {
            registry
                .with(fmt::layer().with_target(true).with_level(true))
                .try_init()
        };
    });
}
