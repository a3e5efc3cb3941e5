//! a compact host monitor.
//!
//! samples cpu, memory, disk, network, temperature, and power statistics once per interval, and
//! redraws them in place as a single terminal frame.

use self::{
    config::Config,
    sentinel::Sentinel,
    source::{Host, SystemClock},
    window::Screen,
};

pub mod config;
pub mod history;
pub mod meter;
/// best-effort host metric queries.
pub mod probe;
pub mod rate;
pub mod render;
pub mod sentinel;
pub mod source;
/// cpu time accounting from `/proc/stat`.
pub mod stat;
pub mod window;

pub type Error = Box<dyn std::error::Error>;

pub struct App<C = SystemClock, S = Host> {
    sentinel: Sentinel<C, S>,
    screen: Screen,
    config: Config,
}

// === impl App ===

impl App {
    /// initializes a new application.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// initializes a new application, with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self::with_sentinel(Sentinel::new(config.history), config)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, S> App<C, S> {
    /// initializes a new application that observes the host through `sentinel`.
    pub fn with_sentinel(sentinel: Sentinel<C, S>, config: Config) -> Self {
        Self {
            sentinel,
            screen: Screen::new(),
            config,
        }
    }
}
