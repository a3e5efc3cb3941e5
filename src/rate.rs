//! rates and percentages derived from pairs of cumulative samples.

use {
    crate::{
        probe::{MemoryInfo, NetCounters},
        stat::CpuTicks,
    },
    std::time::Duration,
};

/// memory in use, derived from a [`MemoryInfo`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MemoryUsage {
    /// kilobytes in use.
    pub used: u64,
    /// kilobytes in total.
    pub total: u64,
    pub percent: f64,
}

/// receive and transmit throughput, in megabits per second.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Throughput {
    pub rx_mbps: f64,
    pub tx_mbps: f64,
}

/// returns the percentage of cpu time spent active between two samples.
///
/// yields zero when no ticks elapsed.
pub fn cpu_percent(previous: CpuTicks, current: CpuTicks) -> f64 {
    let active = current.active - previous.active;
    let total = current.total - previous.total;

    if total.get() == 0 {
        return 0.0;
    }

    (100.0 * (active / total)).clamp(0.0, 100.0)
}

/// returns the power drawn between two energy counter readings, in watts.
///
/// yields `None` when either reading is unsupported, when the previous reading is zero, or when
/// the counter moved backwards (a wrap or reset).
pub fn power(previous: Option<u64>, current: Option<u64>, elapsed: Duration) -> Option<f64> {
    let (previous, current) = (previous?, current?);
    let seconds = elapsed.as_secs_f64();

    if previous == 0 || current < previous || seconds <= 0.0 {
        return None;
    }

    Some((current - previous) as f64 / 1_000_000.0 / seconds)
}

/// returns ram in use: everything that is not free, buffered, cached, or reclaimable.
pub fn ram(
    &MemoryInfo {
        total,
        free,
        buffers,
        cached,
        reclaimable,
        ..
    }: &MemoryInfo,
) -> MemoryUsage {
    let used = total
        .saturating_sub(free)
        .saturating_sub(buffers)
        .saturating_sub(cached)
        .saturating_sub(reclaimable);

    MemoryUsage {
        used,
        total,
        percent: percent_of(used, total),
    }
}

/// returns swap in use.
pub fn swap(
    &MemoryInfo {
        swap_total,
        swap_free,
        ..
    }: &MemoryInfo,
) -> MemoryUsage {
    let used = swap_total.saturating_sub(swap_free);

    MemoryUsage {
        used,
        total: swap_total,
        percent: percent_of(used, swap_total),
    }
}

/// returns network throughput between two samples of the same interface.
///
/// yields zero throughput if either sample is missing, or the primary interface changed.
pub fn throughput(
    previous: Option<&NetCounters>,
    current: Option<&NetCounters>,
    elapsed: Duration,
) -> Throughput {
    match (previous, current) {
        (Some(previous), Some(current)) if previous.interface == current.interface => Throughput {
            rx_mbps: mbps(previous.rx_bytes, current.rx_bytes, elapsed),
            tx_mbps: mbps(previous.tx_bytes, current.tx_bytes, elapsed),
        },
        _ => Throughput::default(),
    }
}

/// returns megabits per second transferred between two byte counters.
///
/// NB: a counter that moved backwards yields zero.
pub fn mbps(previous: u64, current: u64, elapsed: Duration) -> f64 {
    let seconds = elapsed.as_secs_f64();
    if seconds <= 0.0 {
        return 0.0;
    }

    current.saturating_sub(previous) as f64 * 8.0 / 1_000_000.0 / seconds
}

fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }

    part as f64 / whole as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use {super::*, crate::stat::UserHz};

    const SECOND: Duration = Duration::from_secs(1);

    fn ticks(active: u64, total: u64) -> CpuTicks {
        CpuTicks {
            active: UserHz::new(active),
            total: UserHz::new(total),
        }
    }

    fn iface(name: &str, rx_bytes: u64, tx_bytes: u64) -> NetCounters {
        NetCounters {
            interface: name.to_owned(),
            rx_bytes,
            tx_bytes,
            ..NetCounters::default()
        }
    }

    #[test]
    fn fully_busy_cpu() {
        let percent = cpu_percent(ticks(1000, 2000), ticks(1500, 2500));
        assert_eq!(percent, 100.0);
    }

    #[test]
    fn half_busy_cpu() {
        let percent = cpu_percent(ticks(1000, 2000), ticks(1250, 2500));
        assert_eq!(percent, 50.0);
    }

    #[test]
    fn cpu_percent_grows_with_active_ticks() {
        let previous = ticks(0, 0);
        let percents = (0..=100)
            .map(|active| cpu_percent(previous, ticks(active, 100)))
            .collect::<Vec<_>>();

        assert!(percents.iter().all(|p| (0.0..=100.0).contains(p)));
        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn no_elapsed_ticks() {
        assert_eq!(cpu_percent(ticks(10, 20), ticks(10, 20)), 0.0);
    }

    #[test]
    fn cpu_counters_moving_backwards() {
        assert_eq!(cpu_percent(ticks(10, 20), ticks(5, 10)), 0.0);
    }

    #[test]
    fn watts() {
        assert_eq!(power(Some(1_000_000), Some(51_000_000), SECOND), Some(50.0));
        assert_eq!(
            power(Some(1_000_000), Some(51_000_000), 2 * SECOND),
            Some(25.0)
        );
    }

    #[test]
    fn energy_counter_reset_is_unavailable() {
        assert_eq!(power(Some(500_000), Some(100), SECOND), None);
    }

    #[test]
    fn energy_unsupported_is_unavailable() {
        assert_eq!(power(None, Some(100), SECOND), None);
        assert_eq!(power(Some(100), None, SECOND), None);
        assert_eq!(power(Some(0), Some(100), SECOND), None);
        assert_eq!(power(Some(100), Some(200), Duration::ZERO), None);
    }

    #[test]
    fn ram_usage() {
        let info = MemoryInfo {
            total: 16_000_000,
            free: 8_000_000,
            buffers: 100_000,
            cached: 2_000_000,
            reclaimable: 50_000,
            ..MemoryInfo::default()
        };
        let usage = ram(&info);
        assert_eq!(usage.used, 5_850_000);
        assert!((usage.percent - 36.5625).abs() < 1e-9);
    }

    #[test]
    fn ram_unknown() {
        assert_eq!(ram(&MemoryInfo::default()), MemoryUsage::default());
    }

    #[test]
    fn swap_usage() {
        let info = MemoryInfo {
            swap_total: 4_000_000,
            swap_free: 3_000_000,
            ..MemoryInfo::default()
        };
        let usage = swap(&info);
        assert_eq!(usage.used, 1_000_000);
        assert_eq!(usage.percent, 25.0);
    }

    #[test]
    fn swap_disabled() {
        assert_eq!(swap(&MemoryInfo::default()).percent, 0.0);
    }

    #[test]
    fn network_throughput() {
        let (a, b) = (iface("eth0", 0, 0), iface("eth0", 1_250_000, 250_000));
        let Throughput { rx_mbps, tx_mbps } = throughput(Some(&a), Some(&b), SECOND);
        assert_eq!(rx_mbps, 10.0);
        assert_eq!(tx_mbps, 2.0);
    }

    #[test]
    fn network_interface_changed() {
        let (a, b) = (iface("eth0", 0, 0), iface("eth1", 1_250_000, 250_000));
        assert_eq!(throughput(Some(&a), Some(&b), SECOND), Throughput::default());
        assert_eq!(throughput(None, Some(&b), SECOND), Throughput::default());
    }

    #[test]
    fn network_counter_reset() {
        assert_eq!(mbps(1_000, 10, SECOND), 0.0);
        assert_eq!(mbps(0, 1_000, Duration::ZERO), 0.0);
    }
}
