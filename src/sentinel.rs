use {
    crate::{
        history::History,
        probe::{self, DiskUsage, LoadAverage, NetCounters, SystemInfo},
        rate::{self, MemoryUsage, Throughput},
        source::{Clock, Host, Source, SystemClock},
        stat::CpuTicks,
    },
    std::time::{Duration, Instant},
    tracing::trace,
};

/// observes host statistics, and keeps the trends derived from them.
pub struct Sentinel<C = SystemClock, S = Host> {
    /// the clock being used to measure time.
    clock: C,
    /// the underlying source of host statistics.
    source: S,
    trends: Trends,
    inner: Inner,
}

enum Inner {
    Initialized,
    Running {
        /// the cumulative counters observed on the last tick.
        last: Baseline,
    },
}

/// the cumulative counters that rates are derived from.
#[derive(Clone, Debug)]
struct Baseline {
    time: Instant,
    cpu: CpuTicks,
    net: Option<NetCounters>,
    energy: Option<u64>,
}

/// everything observed and derived on one tick.
#[derive(Clone, Debug)]
pub struct Recording {
    /// when the recording began.
    pub start: Instant,
    /// when the recording ended.
    pub end: Instant,
    pub system: SystemInfo,
    pub cores: usize,
    pub load: Option<LoadAverage>,
    /// degrees celsius, if a sensor is available.
    pub temperature: Option<f64>,
    pub cpu_percent: f64,
    /// watts, if energy counters are available and did not reset.
    pub power: Option<f64>,
    pub ram: MemoryUsage,
    pub swap: MemoryUsage,
    pub disk: Option<DiskUsage>,
    pub net: Option<NetCounters>,
    pub throughput: Throughput,
}

/// rolling histories of the trended metrics.
#[derive(Clone, Debug)]
pub struct Trends {
    /// cpu usage, in percent.
    pub cpu: History,
    /// received megabits per second.
    pub rx: History,
    /// transmitted megabits per second.
    pub tx: History,
}

// === impl Sentinel ===

impl<C: Default, S: Default> Sentinel<C, S> {
    /// creates a new [`Sentinel`], retaining `history` samples of each trend.
    pub fn new(history: usize) -> Self {
        Self::with(C::default(), S::default(), history)
    }
}

impl<C, S> Sentinel<C, S> {
    pub fn with(clock: C, source: S, history: usize) -> Self {
        Self {
            clock,
            source,
            trends: Trends::new(history),
            inner: Inner::Initialized,
        }
    }

    pub fn trends(&self) -> &Trends {
        &self.trends
    }
}

impl<C, S> Sentinel<C, S>
where
    C: Clock,
    S: Source,
{
    /// returns a [`Recording`] of the host since this was last called.
    ///
    /// NB: by virtue of rates being a comparison to the previous reading, this will only take a
    /// baseline and return `None` the first time it is called.
    pub fn observe(&mut self) -> Option<Recording> {
        let Self {
            clock,
            source,
            trends,
            inner,
        } = self;

        let new = Baseline::read(&*source, &*clock);
        match std::mem::replace(inner, Inner::Running { last: new.clone() }) {
            Inner::Initialized => {
                trace!("took baseline");
                None
            }
            Inner::Running { last } => {
                let recording = Recording::new(&*source, last, new);
                trends.record(&recording);
                trace!(
                    elapsed = ?recording.elapsed(),
                    cpu = recording.cpu_percent,
                    rx = recording.throughput.rx_mbps,
                    tx = recording.throughput.tx_mbps,
                    "observed host"
                );
                Some(recording)
            }
        }
    }
}

// === impl Baseline ===

impl Baseline {
    fn read(source: &impl Source, clock: &impl Clock) -> Self {
        Self {
            time: clock.now(),
            cpu: probe::cpu(source),
            net: probe::primary_net(source),
            energy: probe::energy(source),
        }
    }
}

// === impl Recording ===

impl Recording {
    /// the window of time this recording covers.
    pub fn elapsed(&self) -> Duration {
        let Self { start, end, .. } = self;
        end.saturating_duration_since(*start)
    }

    /// samples the remaining metrics, and derives rates from two sets of counters.
    fn new(source: &impl Source, last: Baseline, new: Baseline) -> Self {
        let Baseline {
            time: start,
            cpu: cpu_a,
            net: net_a,
            energy: energy_a,
        } = last;
        let Baseline {
            time: end,
            cpu: cpu_b,
            net: net_b,
            energy: energy_b,
        } = new;

        let elapsed = end.saturating_duration_since(start);
        let memory = probe::memory(source);

        Self {
            start,
            end,
            system: probe::system_info(source),
            cores: probe::core_count(source),
            load: probe::load_average(source),
            temperature: probe::temperature(source),
            cpu_percent: rate::cpu_percent(cpu_a, cpu_b),
            power: rate::power(energy_a, energy_b, elapsed),
            ram: rate::ram(&memory),
            swap: rate::swap(&memory),
            disk: probe::root_disk(source),
            throughput: rate::throughput(net_a.as_ref(), net_b.as_ref(), elapsed),
            net: net_b,
        }
    }
}

// === impl Trends ===

impl Trends {
    pub fn new(history: usize) -> Self {
        Self {
            cpu: History::new(history),
            rx: History::new(history),
            tx: History::new(history),
        }
    }

    /// appends the newest rates to each history.
    pub fn record(&mut self, recording: &Recording) {
        let Self { cpu, rx, tx } = self;
        cpu.push(recording.cpu_percent);
        rx.push(recording.throughput.rx_mbps);
        tx.push(recording.throughput.tx_mbps);
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::source::{MockClock, MockSource},
    };

    const STAT: &str = "/proc/stat";
    const NET: &str = "/proc/net/dev";
    const RAPL: &str = "/sys/class/powercap/intel-rapl/intel-rapl:0/energy_uj";
    const NET_HEADER: &str = "header\nheader\n";

    fn net_dev(rx: u64, tx: u64) -> String {
        format!("{NET_HEADER}  eth0: {rx} 0 0 0 0 0 0 0 {tx} 0 0 0 0 0 0 0\n")
    }

    fn sentinel(ticks: usize) -> Sentinel<MockClock, MockSource> {
        let source = MockSource::default()
            .file(STAT, "cpu 1000 0 0 1000 0 0 0 0 0 0\n")
            .file(NET, net_dev(0, 0))
            .file(RAPL, "1000000\n");
        Sentinel::with(MockClock::ticking(ticks, Duration::from_secs(1)), source, 20)
    }

    #[test]
    fn first_observation_is_a_baseline() {
        let mut sentinel = sentinel(1);
        assert!(sentinel.observe().is_none());
        assert!(sentinel.trends().cpu.is_empty());
    }

    #[test]
    fn rates_are_derived_from_the_baseline() {
        let mut sentinel = sentinel(2);
        assert!(sentinel.observe().is_none());

        // active 1000 -> 1500, total 2000 -> 2500.
        sentinel.source.replace(STAT, "cpu 1500 0 0 1000 0 0 0 0 0 0\n");
        sentinel.source.replace(NET, net_dev(1_250_000, 125_000));
        sentinel.source.replace(RAPL, "31000000\n");

        let recording = sentinel.observe().unwrap();
        assert_eq!(recording.elapsed(), Duration::from_secs(1));
        assert_eq!(recording.cpu_percent, 100.0);
        assert_eq!(recording.power, Some(30.0));
        assert_eq!(recording.throughput.rx_mbps, 10.0);
        assert_eq!(recording.throughput.tx_mbps, 1.0);
        assert_eq!(recording.net.as_ref().map(|n| n.interface.as_str()), Some("eth0"));
    }

    #[test]
    fn energy_reset_suppresses_power() {
        let mut sentinel = sentinel(3);
        sentinel.observe();

        sentinel.source.replace(RAPL, "100\n");
        assert_eq!(sentinel.observe().unwrap().power, None);

        // the next tick compares against the reset counter.
        sentinel.source.replace(RAPL, "2000100\n");
        assert_eq!(sentinel.observe().unwrap().power, Some(2.0));
    }

    #[test]
    fn trends_accumulate() {
        let mut sentinel = sentinel(26);
        sentinel.observe();

        for i in 1..=25u64 {
            let active = 1000 + i * 10;
            let total = 2000 + i * 100;
            let idle = total - active;
            sentinel
                .source
                .replace(STAT, format!("cpu {active} 0 0 {idle} 0 0 0 0 0 0\n"));
            sentinel.observe();
        }

        let Trends { cpu, rx, tx } = sentinel.trends();
        assert_eq!(cpu.len(), 20);
        assert_eq!(rx.len(), 20);
        assert_eq!(tx.len(), 20);
        assert!(cpu.iter().all(|p| (p - 10.0).abs() < 1e-9));
    }

    #[test]
    fn unreadable_host_degrades() {
        let mut sentinel = Sentinel::with(
            MockClock::ticking(2, Duration::from_secs(1)),
            MockSource::default(),
            20,
        );
        sentinel.observe();
        let recording = sentinel.observe().unwrap();

        assert_eq!(recording.cpu_percent, 0.0);
        assert_eq!(recording.power, None);
        assert_eq!(recording.temperature, None);
        assert_eq!(recording.load, None);
        assert_eq!(recording.disk, None);
        assert_eq!(recording.net, None);
        assert_eq!(recording.throughput, Throughput::default());
        assert_eq!(recording.system, SystemInfo::default());
    }
}
