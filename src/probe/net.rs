use super::*;

/// cumulative counters for a single network interface.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NetCounters {
    pub interface: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub rx_drop: u64,
    pub rx_errors: u64,
}

/// returns the counters of the busiest non-loopback interface, or `None` if there is none.
///
/// the busiest interface is the one with the most received bytes. on a tie, the first
/// interface listed wins.
pub fn primary_net(source: &impl Source) -> Option<NetCounters> {
    read(source, "/proc/net/dev").and_then(|dev| busiest(&dev))
}

pub(crate) fn busiest(dev: &str) -> Option<NetCounters> {
    dev.lines()
        .skip(2) // skip the two header lines.
        .filter_map(NetCounters::parse)
        .filter(|counters| counters.interface != "lo")
        .fold(None, |best: Option<NetCounters>, counters| match best {
            Some(best) if counters.rx_bytes <= best.rx_bytes => Some(best),
            _ => Some(counters),
        })
}

// === impl NetCounters ===

impl NetCounters {
    /// the receive and transmit columns of each `/proc/net/dev` row.
    const COLUMNS: usize = 16;

    /// parses one row of `/proc/net/dev`, e.g. `eth0: 1500 12 0 0 0 0 0 0 900 10 0 0 0 0 0 0`.
    fn parse(line: &str) -> Option<Self> {
        let (interface, columns) = line.split_once(':')?;
        let columns = columns
            .split_whitespace()
            .map(str::parse::<u64>)
            .collect::<Result<Vec<_>, _>>()
            .ok()?;
        if columns.len() < Self::COLUMNS {
            debug!(%interface, columns = columns.len(), "short network row");
            return None;
        }

        Some(Self {
            interface: interface.trim().to_owned(),
            rx_bytes: columns[0],
            rx_errors: columns[2],
            rx_drop: columns[3],
            tx_bytes: columns[8],
        })
    }
}
