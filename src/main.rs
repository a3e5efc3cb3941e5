//! a compact host monitor.

use {
    hostwatch::{App, Error},
    tracing_subscriber::EnvFilter,
};

fn main() -> Result<(), Error> {
    init_logging();
    App::new().run()
}

/// installs a subscriber that writes diagnostics to stderr.
///
/// diagnostics are off unless requested through `RUST_LOG`, so that they never interleave with
/// the display on stdout.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
