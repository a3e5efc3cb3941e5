use {crate::render::Tier, std::collections::VecDeque};

/// a rolling window of recent samples, oldest first.
#[derive(Clone, Debug)]
pub struct History {
    samples: VecDeque<f64>,
    capacity: usize,
}

/// how samples are scaled when discretized into [`Level`]s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ceiling {
    /// scale against a known maximum, e.g. 100 for percentages.
    Fixed(f64),
    /// scale against the largest sample currently retained.
    Auto,
}

/// a discretized sample, from 0 (lowest) to 8 (highest).
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Level(u8);

// === impl History ===

impl History {
    /// the smallest ceiling an automatically scaled history will use.
    const FLOOR: f64 = 0.001;

    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// appends the newest sample, evicting the oldest if the window is full.
    pub fn push(&mut self, value: f64) {
        let Self { samples, capacity } = self;

        samples.push_back(value);
        while samples.len() > *capacity {
            samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// returns the retained samples, oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + Clone + '_ {
        self.samples.iter().copied()
    }

    /// returns the retained samples as levels, oldest first.
    ///
    /// the returned iterator is lazy, and may be cloned to walk the levels again.
    pub fn levels(&self, ceiling: Ceiling) -> impl ExactSizeIterator<Item = Level> + Clone + '_ {
        let ceiling = match ceiling {
            Ceiling::Fixed(max) => max,
            Ceiling::Auto => self.iter().fold(Self::FLOOR, f64::max),
        }
        .max(Self::FLOOR);

        self.iter().map(move |value| Level::scaled(value, ceiling))
    }
}

// === impl Level ===

impl Level {
    pub const MAX: u8 = 8;

    const GLYPHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

    /// scales `value` linearly into a level, where `ceiling` maps to the highest level.
    pub fn scaled(value: f64, ceiling: f64) -> Self {
        let ratio = (value / ceiling).clamp(0.0, 1.0);
        // NaN clamps to NaN, which casts to zero.
        Self((ratio * Self::MAX as f64).floor() as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn glyph(self) -> char {
        Self::GLYPHS[self.0 as usize]
    }

    pub fn tier(self) -> Tier {
        match self.0 {
            6.. => Tier::Danger,
            4.. => Tier::Warning,
            _ => Tier::Nominal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_exceeds_capacity() {
        let mut history = History::new(20);
        for i in 0..25 {
            history.push(i as f64);
            assert!(history.len() <= 20);
        }

        let retained = history.iter().collect::<Vec<_>>();
        let expected = (5..25).map(|i| i as f64).collect::<Vec<_>>();
        assert_eq!(retained, expected);
    }

    #[test]
    fn zero_capacity_retains_nothing() {
        let mut history = History::new(0);
        history.push(1.0);
        assert!(history.is_empty());
    }

    #[test]
    fn fixed_ceiling() {
        let mut history = History::new(4);
        for value in [0.0, 50.0, 99.0, 100.0] {
            history.push(value);
        }
        let levels = history
            .levels(Ceiling::Fixed(100.0))
            .map(Level::get)
            .collect::<Vec<_>>();
        assert_eq!(levels, [0, 4, 7, 8]);
    }

    #[test]
    fn values_beyond_the_ceiling_saturate() {
        let mut history = History::new(2);
        history.push(-5.0);
        history.push(250.0);
        let levels = history
            .levels(Ceiling::Fixed(100.0))
            .map(Level::get)
            .collect::<Vec<_>>();
        assert_eq!(levels, [0, 8]);
    }

    #[test]
    fn auto_ceiling_is_the_series_maximum() {
        let mut history = History::new(3);
        for value in [1.0, 2.0, 4.0] {
            history.push(value);
        }
        let levels = history
            .levels(Ceiling::Auto)
            .map(Level::get)
            .collect::<Vec<_>>();
        assert_eq!(levels, [2, 4, 8]);
    }

    #[test]
    fn auto_ceiling_of_an_idle_series() {
        let mut history = History::new(3);
        for _ in 0..3 {
            history.push(0.0);
        }
        assert!(history.levels(Ceiling::Auto).all(|l| l == Level(0)));
    }

    #[test]
    fn levels_can_be_restarted() {
        let mut history = History::new(3);
        history.push(10.0);
        history.push(20.0);
        let levels = history.levels(Ceiling::Auto);
        let first = levels.clone().collect::<Vec<_>>();
        let second = levels.collect::<Vec<_>>();
        assert_eq!(first, second);
    }

    #[test]
    fn glyphs_and_tiers() {
        assert_eq!(Level(0).glyph(), ' ');
        assert_eq!(Level(8).glyph(), '█');
        assert_eq!(Level(3).tier(), Tier::Nominal);
        assert_eq!(Level(4).tier(), Tier::Warning);
        assert_eq!(Level(5).tier(), Tier::Warning);
        assert_eq!(Level(6).tier(), Tier::Danger);
        assert_eq!(Level(8).tier(), Tier::Danger);
    }
}
