//! Logging setup for the CLI
//!
//! Diagnostics go to stderr through `tracing-subscriber`; `RUST_LOG` wins over
//! the level picked from the command line.

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

const CRATE_TARGETS: [&str; 5] = [
    "resource_planner",
    "resource_planner_common",
    "resource_planner_parser",
    "resource_planner_analyzer",
    "resource_planner_generator",
];

/// Default level for the planner crates
pub fn level_for(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Filter directives applied when `RUST_LOG` is unset
pub fn default_directives(level: Level) -> Vec<String> {
    CRATE_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect()
}

/// Initialise the global subscriber; later calls are ignored
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();

        if env::var("RUST_LOG").is_err() {
            for directive in default_directives(level_for(verbose)) {
                if let Ok(directive) = directive.parse() {
                    filter = filter.add_directive(directive);
                }
            }
        }

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    });
}
