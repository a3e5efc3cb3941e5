//! best-effort queries of host metrics.
//!
//! every function here degrades to a documented sentinel rather than failing: a missing or
//! malformed source yields `None`, zeroed counters, or placeholder text for that metric alone.

use {
    crate::{
        source::Source,
        stat::{self, CpuTicks},
    },
    std::path::Path,
    tracing::debug,
};

pub use self::{
    energy::{BACKENDS, EnergyBackend, energy},
    memory::{MemoryInfo, memory},
    net::{NetCounters, primary_net},
    system::{SystemInfo, system_info},
};

mod energy;
mod memory;
mod net;
mod system;


/// one, five, and fifteen minute load averages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

/// root filesystem usage.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DiskUsage {
    pub total_gb: f64,
    pub used_gb: f64,
    pub percent_used: f64,
    pub inode_percent_used: f64,
}

/// reads `path` via `source`, logging and discarding any failure.
pub(crate) fn read(source: &impl Source, path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    source
        .read(path)
        .inspect_err(|error| debug!(path = %path.display(), %error, "source unavailable"))
        .ok()
}

/// returns the aggregate cpu ticks from `/proc/stat`.
///
/// yields zeroed ticks if the table cannot be read or parsed.
pub fn cpu(source: &impl Source) -> CpuTicks {
    read(source, "/proc/stat")
        .and_then(|contents| {
            stat::aggregate(&contents)
                .inspect_err(|error| debug!(%error, "could not parse cpu ticks"))
                .ok()
        })
        .unwrap_or_default()
}

/// returns the number of online processors, or zero if unknown.
pub fn core_count(source: &impl Source) -> usize {
    source.online_cpus().unwrap_or(0)
}

/// returns the system load averages, or `None` if `/proc/loadavg` is unavailable.
pub fn load_average(source: &impl Source) -> Option<LoadAverage> {
    let loadavg = read(source, "/proc/loadavg")?;
    let mut fields = loadavg.split_whitespace().map(str::parse::<f64>);

    let mut next = || fields.next()?.ok();
    let (one, five, fifteen) = (next()?, next()?, next()?);
    Some(LoadAverage { one, five, fifteen })
}

/// returns the cpu temperature in degrees celsius, or `None` if no sensor is available.
///
/// thermal zones are probed in index order and the first readable zone wins. readings above
/// 1000 are taken to be millidegrees.
pub fn temperature(source: &impl Source) -> Option<f64> {
    const ZONES: usize = 5;

    (0..ZONES).find_map(|zone| {
        let path = format!("/sys/class/thermal/thermal_zone{zone}/temp");
        let raw = read(source, path)?.trim().parse::<i64>().ok()?;
        Some(if raw > 1000 {
            raw as f64 / 1000.0
        } else {
            raw as f64
        })
    })
}

/// returns root filesystem usage, or `None` if the filesystem cannot be queried.
pub fn root_disk(source: &impl Source) -> Option<DiskUsage> {
    const GIB: f64 = (1024 * 1024 * 1024) as f64;

    let stats = source
        .fs_stats(Path::new("/"))
        .inspect_err(|error| debug!(%error, "could not query root filesystem"))
        .ok()?;

    let total_gb = (stats.blocks as f64 * stats.block_size as f64) / GIB;
    let free_gb = (stats.blocks_free as f64 * stats.block_size as f64) / GIB;
    let used_gb = total_gb - free_gb;
    let percent_used = if total_gb > 0.0 {
        used_gb / total_gb * 100.0
    } else {
        0.0
    };
    let inode_percent_used = if stats.files > 0 {
        stats.files.saturating_sub(stats.files_free) as f64 / stats.files as f64 * 100.0
    } else {
        0.0
    };

    Some(DiskUsage {
        total_gb,
        used_gb,
        percent_used,
        inode_percent_used,
    })
}
