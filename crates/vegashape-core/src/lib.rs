//! Vegashape Core
//!
//! Normalization and round-trip comparison engine for Vega transaction
//! JSON. A document is encoded and decoded through an external schema codec
//! to discover how the schema-driven system reshapes it; the decoded tree is
//! rewritten by a fixed list of envelope-unwrap rules and pruned of empty
//! values, then structurally diffed against the original.

pub mod codec;
pub mod error;
pub mod format;
pub mod json;
pub mod path;
pub mod prune;
pub mod reconcile;
pub mod result;
pub mod rules;

// Re-export commonly used types
pub use codec::{Delta, ExactDiff, JsonRoundTrip, MessageCodec, TreeDiff};
pub use error::{ErrorKind, ShapeError};
pub use format::OutputFormat;
pub use json::{JsonErrorInfo, parse_or, parse_or_with_context, reparse, to_json_string};
pub use path::{PathPattern, Segment, rewrite};
pub use prune::{default_empties, prune};
pub use reconcile::{ShapeCheck, reconcile};
pub use result::{Result, ResultExt};
pub use rules::{Rule, apply_rules, go_wire_rules};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vegashape=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
