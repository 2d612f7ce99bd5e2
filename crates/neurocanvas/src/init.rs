//! Process-level setup.

/// Installs the `env_logger` backend for the `log` macros.
///
/// Safe to call more than once; later calls are no-ops. Verbosity follows
/// `RUST_LOG` (e.g. `RUST_LOG=neurocanvas=debug`).
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::info!("neurocanvas {} logging initialized", env!("CARGO_PKG_VERSION"));
    }
}
