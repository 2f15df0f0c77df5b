//! Tracing subscriber setup.
//!
//! The library only emits `tracing` events. Hosts that do not bring their own
//! subscriber can call [`init`] once at startup; `RUST_LOG` controls the
//! filter and defaults to `schemaboard=info`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "schemaboard=info";

/// Install a formatting subscriber. Fails if one is already installed.
pub fn try_init() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;
    Ok(())
}

/// Like [`try_init`], but a second call is a silent no-op.
pub fn init() {
    if try_init().is_err() {
        tracing::trace!("tracing subscriber already installed");
    }
}
