use std::{
    fmt::{self, Display},
    iter::{once, repeat_n},
};

/// a bracketed progress bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Meter {
    pub percent: f64,
    pub width: usize,
}

// === impl Meter ===

impl Meter {
    const ACTIVE: char = '|';
    const IDLE: char = '.';
    const BORDER_L: char = '[';
    const BORDER_R: char = ']';

    pub fn new(percent: f64, width: usize) -> Self {
        Self { percent, width }
    }

    /// returns a bar width suited to a terminal `cols` columns wide: a third of it, but at
    /// least `min`.
    pub fn width_for(cols: u16, min: usize) -> usize {
        (cols as usize / 3).max(min)
    }

    /// the number of filled positions.
    pub fn filled(&self) -> usize {
        let Self { percent, width } = *self;
        let filled = (percent / 100.0 * width as f64).floor();
        // NaN and negative percentages fill nothing.
        if filled.is_nan() || filled < 0.0 {
            return 0;
        }

        (filled as usize).min(width)
    }
}

impl Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { width, .. } = *self;
        let filled = self.filled();

        let meter = {
            let active = repeat_n(Self::ACTIVE, filled);
            let idle = repeat_n(Self::IDLE, width - filled);
            active.chain(idle)
        };
        once(Self::BORDER_L)
            .chain(meter)
            .chain(once(Self::BORDER_R))
            .try_for_each(|c| f.write_fmt(format_args!("{c}")))
    }
}
