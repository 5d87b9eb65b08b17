//! Generation sessions for the apigen binding generator.
//!
//! A [`Session`] drives model construction for a whole declaration graph:
//!
//! 1. collect every extension method in the graph, and report malformed ones
//! 2. build every generator-facing interface, once per target language
//!
//! One interface failing never stops the others; its error lands in the
//! session's diagnostics and the run moves on.
//!
//! ```text
//! let config = GenConfig::from_options([("codeGenerators", "java,js")])?;
//! let output = generate(&arena, config);
//! if let Some(guarantee) = output.errors { ... }
//! ```

use std::sync::Once;

mod config;
mod session;

pub use config::{ConfigError, GenConfig};
pub use session::{generate, GenOutput, Session};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=apigen=debug` or `RUST_LOG=apigen_model=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
