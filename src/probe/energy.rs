use super::*;

/// a hardware interface that exposes cumulative energy counters in microjoules.
#[derive(Debug)]
pub struct EnergyBackend {
    pub name: &'static str,
    /// lists every candidate counter path, for each socket or channel.
    channels: fn() -> Vec<String>,
}

/// energy backends, in priority order.
pub static BACKENDS: &[EnergyBackend] = &[
    EnergyBackend {
        name: "intel-rapl",
        channels: || {
            (0..4)
                .map(|socket| {
                    format!("/sys/class/powercap/intel-rapl/intel-rapl:{socket}/energy_uj")
                })
                .collect()
        },
    },
    EnergyBackend {
        name: "hwmon",
        channels: || {
            (0..10)
                .flat_map(|chip| {
                    (1..=4).map(move |channel| {
                        format!("/sys/class/hwmon/hwmon{chip}/energy{channel}_input")
                    })
                })
                .collect()
        },
    },
    EnergyBackend {
        name: "amd_energy",
        channels: || {
            (0..4)
                .map(|socket| {
                    format!("/sys/class/powercap/amd_energy/amd_energy:{socket}/energy_uj")
                })
                .collect()
        },
    },
];

/// returns the cumulative cpu energy counter in microjoules, or `None` if unsupported.
///
/// the first backend in [`BACKENDS`] with any readable channel wins, and its channels are
/// summed.
pub fn energy(source: &impl Source) -> Option<u64> {
    energy_from(source, BACKENDS)
}

pub(crate) fn energy_from(source: &impl Source, backends: &[EnergyBackend]) -> Option<u64> {
    backends.iter().find_map(|backend| backend.probe(source))
}

// === impl EnergyBackend ===

impl EnergyBackend {
    /// sums every readable channel, or returns `None` if no channel could be read.
    pub fn probe(&self, source: &impl Source) -> Option<u64> {
        let Self { name, channels } = self;

        let total = channels()
            .into_iter()
            .filter_map(|path| source.read(Path::new(&path)).ok())
            .filter_map(|uj| uj.trim().parse::<u64>().ok())
            .reduce(u64::saturating_add)?;

        tracing::trace!(backend = %name, total, "read energy counters");
        Some(total)
    }
}
