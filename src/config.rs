use std::time::Duration;

/// tunables for the display.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// how long to sleep between ticks.
    pub interval: Duration,
    /// how many samples each trend retains.
    pub history: usize,
    /// the narrowest a progress bar may be.
    pub min_bar_width: usize,
    /// columns left unused at the right edge of separators.
    pub margin: usize,
    pub thresholds: Thresholds,
}

/// a warning and a danger level for one metric.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Threshold {
    pub warn: f64,
    pub danger: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Thresholds {
    /// cpu usage, in percent.
    pub cpu: Threshold,
    /// cpu temperature, in degrees celsius.
    pub temperature: Threshold,
    /// cpu power draw, in watts.
    pub power: Threshold,
    pub ram: Threshold,
    pub swap: Threshold,
    pub disk: Threshold,
    pub inodes: Threshold,
}

// === impl Config ===

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1000),
            history: 20,
            min_bar_width: 5,
            margin: 2,
            thresholds: Thresholds::default(),
        }
    }
}

// === impl Threshold ===

impl Threshold {
    pub const fn new(warn: f64, danger: f64) -> Self {
        Self { warn, danger }
    }
}

// === impl Thresholds ===

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cpu: Threshold::new(70.0, 90.0),
            temperature: Threshold::new(75.0, 85.0),
            power: Threshold::new(100.0, 200.0),
            ram: Threshold::new(80.0, 95.0),
            swap: Threshold::new(1.0, 50.0),
            disk: Threshold::new(80.0, 95.0),
            inodes: Threshold::new(80.0, 90.0),
        }
    }
}
