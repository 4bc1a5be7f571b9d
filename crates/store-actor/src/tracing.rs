//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate for any binary
//! built on the store actors.
//!
//! ## What Gets Traced
//!
//! - **Store lifecycle**: startup, shutdown and final record count
//! - **Record operations**: Create, Get, Find, Save, Delete with `entity_type` and `id` fields
//! - **Facade calls**: one span per facade method (`#[instrument]`). The store runs in its own
//!   task, so its events are not nested under the facade span; correlate them by `id`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show full payloads and queries
//! RUST_LOG=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` an update that changes nothing shows no `Saved` line:
//!
//! ```text
//! INFO Store started entity_type="User"
//! INFO Created entity_type="User" id=user_1 size=1
//! INFO update: No changes, nothing persisted
//! INFO update: Changes persisted fields=["name"]
//! INFO Saved entity_type="User" id=user_1
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` (e.g. `"info"`) is used.
/// Calling it a second time is a no-op.
pub fn setup_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact() // Compact format shows spans inline (e.g., "update:load")
        .try_init();
}
