use {super::*, std::str::FromStr};

/// memory statistics from `/proc/meminfo`, in kilobytes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MemoryInfo {
    pub total: u64,
    pub free: u64,
    pub buffers: u64,
    pub cached: u64,
    /// reclaimable slab memory.
    pub reclaimable: u64,
    pub swap_total: u64,
    pub swap_free: u64,
}

/// returns memory statistics. unreadable or missing fields are zero.
pub fn memory(source: &impl Source) -> MemoryInfo {
    read(source, "/proc/meminfo")
        .map(|meminfo| meminfo.parse().unwrap_or_default())
        .unwrap_or_default()
}

// === impl MemoryInfo ===

impl FromStr for MemoryInfo {
    type Err = std::convert::Infallible;
    fn from_str(meminfo: &str) -> Result<Self, Self::Err> {
        let mut info = Self::default();

        for line in meminfo.lines() {
            let mut tokens = line.split_whitespace();
            let (Some(key), Some(value)) = (tokens.next(), tokens.next()) else {
                continue;
            };
            let Ok(value) = value.parse::<u64>() else {
                continue;
            };

            let field = match key {
                "MemTotal:" => &mut info.total,
                "MemFree:" => &mut info.free,
                "Buffers:" => &mut info.buffers,
                "Cached:" => &mut info.cached,
                "SReclaimable:" => &mut info.reclaimable,
                "SwapTotal:" => &mut info.swap_total,
                "SwapFree:" => &mut info.swap_free,
                _ => continue,
            };
            *field = value;
        }

        Ok(info)
    }
}
