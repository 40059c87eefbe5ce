//! Integration test crate for draftkit.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! Set `RUST_LOG=draftkit_draft=debug` to see placement logs.

#[cfg(test)]
mod draft;

#[cfg(test)]
mod persistence;

#[cfg(test)]
mod properties;

/// Route `tracing` output to the test harness, filtered by `RUST_LOG`.
#[cfg(test)]
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
