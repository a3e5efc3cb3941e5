use super::*;

/// how the system's cpus, in aggregate, have spent their time since boot.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CpuTime {
    /// time spent in user mode.
    user: UserHz,
    /// time spent in user mode with low priority (nice).
    nice: UserHz,
    /// time spent in system mode.
    system: UserHz,
    /// time spent in the idle task.
    idle: UserHz,
    /// time waiting for i/o to complete. this value may decrease.
    iowait: UserHz,
    /// time servicing interrupts.
    irq: UserHz,
    /// time servicing softirqs.
    softirq: UserHz,
    /// time stolen by a hypervisor.
    steal: UserHz,
    /// time spent running a virtual cpu for guest operating systems. already counted in `user`.
    guest: UserHz,
    /// time spent running a niced guest. already counted in `nice`.
    guest_nice: UserHz,
}

/// cumulative active and total cpu ticks.
///
/// both values are monotonic non-decreasing since boot.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CpuTicks {
    pub active: UserHz,
    pub total: UserHz,
}

// === impl CpuTime ===

impl CpuTime {
    /// the fewest fields a cpu line may carry. `guest` and `guest_nice` arrived later.
    const MIN_FIELDS: usize = 8;
    const MAX_FIELDS: usize = 10;

    /// returns the active and total ticks represented by this entry.
    pub fn ticks(&self) -> CpuTicks {
        let active = self.active();
        let Self { idle, iowait, .. } = *self;

        CpuTicks {
            active,
            total: active + idle + iowait,
        }
    }

    fn active(&self) -> UserHz {
        let Self {
            user,
            nice,
            system,
            irq,
            softirq,
            steal,
            idle: _,       // do not count idle time...
            iowait: _,     // ...or time spent waiting on i/o.
            guest: _,      // guest time is already included in `user`...
            guest_nice: _, // ...and niced guest time in `nice`.
        } = *self;

        user + nice + system + irq + softirq + steal
    }
}

impl TryFrom<Vec<UserHz>> for CpuTime {
    type Error = StatParseError;
    fn try_from(mut times: Vec<UserHz>) -> Result<Self, Self::Error> {
        if !(Self::MIN_FIELDS..=Self::MAX_FIELDS).contains(&times.len()) {
            return Err(StatParseError::CpuTime { fields: times.len() });
        }

        // older kernels omit the trailing guest fields.
        times.resize(Self::MAX_FIELDS, UserHz::ZERO);
        let [
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
            guest,
            guest_nice,
        ] = <[UserHz; 10]>::try_from(times).map_err(|times| {
            StatParseError::CpuTime {
                fields: times.len(),
            }
        })?;

        Ok(Self {
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
            guest,
            guest_nice,
        })
    }
}
