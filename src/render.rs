//! formats a [`Recording`] into a [`Frame`] of styled text.

use {
    crate::{
        config::{Config, Threshold},
        history::{Ceiling, History},
        meter::Meter,
        sentinel::{Recording, Trends},
    },
    crossterm::style::{Color, StyledContent, Stylize, style},
    std::fmt::{Display, Write},
};

/// a color tier, chosen by comparing a value against a [`Threshold`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Tier {
    Nominal,
    Warning,
    Danger,
}

/// one complete rendered snapshot of the display.
///
/// lines carry no trailing newline; the [`Screen`](crate::window::Screen) adds those. a rendered
/// line never exceeds the width of the terminal, so each occupies exactly one row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    lines: Vec<String>,
}

/// returns the tier of `value`.
///
/// values at or above `danger` are in danger, and values at or above `warn` warrant a warning.
/// when `invert` is set, higher values are better and the tiers are reversed.
pub fn colorize(value: f64, warn: f64, danger: f64, invert: bool) -> Tier {
    let tier = if value >= danger {
        Tier::Danger
    } else if value >= warn {
        Tier::Warning
    } else {
        Tier::Nominal
    };

    if invert { tier.inverted() } else { tier }
}

// === impl Tier ===

impl Tier {
    pub fn color(self) -> Color {
        match self {
            Self::Nominal => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Danger => Color::Red,
        }
    }

    /// styles `content` in this tier's color.
    pub fn paint<D: Display>(self, content: D) -> StyledContent<D> {
        style(content).with(self.color())
    }

    fn inverted(self) -> Self {
        match self {
            Self::Nominal => Self::Danger,
            Self::Warning => Self::Warning,
            Self::Danger => Self::Nominal,
        }
    }
}

impl Threshold {
    pub fn tier(&self, value: f64) -> Tier {
        let Self { warn, danger } = *self;
        colorize(value, warn, danger, false)
    }
}

// === impl Frame ===

impl Frame {
    /// renders the display for a terminal `cols` columns wide.
    pub fn render(recording: &Recording, trends: &Trends, config: &Config, cols: u16) -> Self {
        let mut frame = Builder {
            lines: Vec::new(),
            config,
            cols: cols.max(1) as usize,
            rule: cols.saturating_sub(config.margin as u16).max(1) as usize,
            bar: Meter::width_for(cols, config.min_bar_width),
        };

        frame.banner();
        frame.system(recording);
        frame.rule('-');
        frame.cpu(recording, trends);
        frame.rule('-');
        frame.memory(recording);
        frame.rule('-');
        frame.disk(recording);
        frame.rule('-');
        frame.network(recording, trends);
        frame.rule('=');

        Self { lines: frame.lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// the number of lines this frame occupies on screen.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Frame {
    fn from_iter<I: IntoIterator<Item = S>>(lines: I) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// accumulates the lines of a frame.
struct Builder<'a> {
    lines: Vec<String>,
    config: &'a Config,
    /// the width of the terminal.
    cols: usize,
    /// the width of separators.
    rule: usize,
    /// the width of progress bars.
    bar: usize,
}

impl<'a> Builder<'a> {
    /// returns the configuration, without holding a borrow of the builder.
    fn config(&self) -> &'a Config {
        self.config
    }

    /// appends `line`, clipped so that it cannot wrap.
    fn push(&mut self, line: String) {
        self.lines.push(clip(&line, self.cols));
    }

    fn rule(&mut self, c: char) {
        let rule = std::iter::repeat_n(c, self.rule).collect::<String>();
        self.push(rule.with(Color::Cyan).to_string());
    }

    fn heading(&mut self, title: impl Display) {
        self.push(format!(" [ {title} ]").bold().to_string());
    }

    fn banner(&mut self) {
        let refresh = self.config.interval.as_secs_f64();
        self.rule('=');
        self.push(
            format!(" HOSTWATCH STATUS MONITOR | AUTO REFRESH: {refresh}S")
                .with(Color::Cyan)
                .bold()
                .to_string(),
        );
        self.rule('=');
    }

    fn system(&mut self, Recording { system, .. }: &Recording) {
        self.heading("SYSTEM");
        self.push(format!(" OS:     {} ({})", system.os, system.kernel));
        self.push(format!(" Model:  {}", system.machine_label()));
        self.push(format!(" CPU:    {}", system.cpu_model));
        self.push(format!(" Uptime: {}", system.uptime));
    }

    fn cpu(
        &mut self,
        Recording {
            cpu_percent,
            cores,
            temperature,
            load,
            power,
            ..
        }: &Recording,
        trends: &Trends,
    ) {
        let Config {
            thresholds,
            history,
            ..
        } = self.config();
        self.heading("CPU");

        let usage = format!("{} {cpu_percent:>5.1}%", Meter::new(*cpu_percent, self.bar));
        self.push(format!(
            " Usage: {} | Cores: {cores}",
            thresholds.cpu.tier(*cpu_percent).paint(usage)
        ));
        self.push(format!(
            " Trend: {}",
            sparkline(&trends.cpu, Ceiling::Fixed(100.0), *history)
        ));

        // a zone reading zero is not a working sensor.
        let temperature = match temperature {
            Some(t) if *t > 0.0 => thresholds
                .temperature
                .tier(*t)
                .paint(format!("{t:.1}°C"))
                .to_string(),
            _ => "N/A".to_owned(),
        };
        let load = match load {
            Some(l) => format!("{:.2} {:.2} {:.2}", l.one, l.five, l.fifteen),
            None => "N/A".to_owned(),
        };
        self.push(format!(" Temp:  {} | Load: {load}", pad(&temperature, 8)));

        // counters that did not advance this tick read as unavailable.
        let power = match power {
            Some(w) if *w > 0.0 => thresholds
                .power
                .tier(*w)
                .paint(format!("{w:.1} W"))
                .to_string(),
            _ => "N/A (RAPL/hwmon unsupported)".to_owned(),
        };
        self.push(format!(" Power: {power}"));
    }

    fn memory(&mut self, Recording { ram, swap, .. }: &Recording) {
        let Config { thresholds, .. } = self.config();
        self.heading("RAM & SWAP");

        let line = format!(
            "{} {}MB / {}MB ({}%)",
            Meter::new(ram.percent, self.bar),
            ram.used / 1024,
            ram.total / 1024,
            ram.percent as u64,
        );
        self.push(format!(" RAM:  {}", thresholds.ram.tier(ram.percent).paint(line)));

        let line = if swap.total > 0 {
            format!(
                "{} {}MB / {}MB ({}%)",
                Meter::new(swap.percent, self.bar),
                swap.used / 1024,
                swap.total / 1024,
                swap.percent as u64,
            )
        } else {
            format!("{} 0MB (Disabled)", Meter::new(0.0, self.bar))
        };
        self.push(format!(
            " Swap: {}",
            thresholds.swap.tier(swap.percent).paint(line)
        ));
    }

    fn disk(&mut self, Recording { disk, .. }: &Recording) {
        let Config { thresholds, .. } = self.config();
        self.heading("DISK /");

        let Some(disk) = disk else {
            self.push(" Space: N/A".to_owned());
            self.push(" Inode: N/A".to_owned());
            return;
        };

        let space = format!(
            "{} {:.1}GB / {:.1}GB ({}%)",
            Meter::new(disk.percent_used, self.bar),
            disk.used_gb,
            disk.total_gb,
            disk.percent_used as u64,
        );
        self.push(format!(
            " Space: {}",
            thresholds.disk.tier(disk.percent_used).paint(space)
        ));

        let inodes = format!("{}% Used", disk.inode_percent_used as u64);
        self.push(format!(
            " Inode: {}",
            thresholds.inodes.tier(disk.inode_percent_used).paint(inodes)
        ));
    }

    fn network(&mut self, Recording { net, throughput, .. }: &Recording, trends: &Trends) {
        let (interface, drops, errors) = match net {
            Some(net) => (net.interface.as_str(), net.rx_drop, net.rx_errors),
            None => ("N/A", 0, 0),
        };
        self.heading(format_args!("NETWORK ({interface})"));

        // any drop or error at all is bad.
        let flag = |count: u64| colorize(count as f64, 1.0, 1.0, false).paint(count);
        let history = self.config.history;

        let rx = format!("{:>8.2} Mbps", throughput.rx_mbps);
        self.push(format!(
            " RX In:  {rx} {} [ Loss: {} ]",
            sparkline(&trends.rx, Ceiling::Auto, history),
            flag(drops)
        ));
        let tx = format!("{:>8.2} Mbps", throughput.tx_mbps);
        self.push(format!(
            " TX Out: {tx} {} [ Err:  {} ]",
            sparkline(&trends.tx, Ceiling::Auto, history),
            flag(errors)
        ));
    }
}

/// renders `history` as a strip of glyphs, right-aligned within `width` cells.
fn sparkline(history: &History, ceiling: Ceiling, width: usize) -> String {
    let mut out = " ".repeat(width.saturating_sub(history.len()));
    for level in history.levels(ceiling) {
        // writing to a string cannot fail.
        let _ = write!(out, "{}", level.tier().paint(level.glyph()));
    }
    out
}

/// pads plain or styled `text` with spaces to `width` visible characters.
fn pad(text: &str, width: usize) -> String {
    let visible = visible_width(text);
    format!("{text}{}", " ".repeat(width.saturating_sub(visible)))
}

/// truncates `text` to `width` visible characters.
///
/// escape sequences are always kept, so styling that was opened is still reset.
fn clip(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    let mut visible = 0;
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            out.push(c);
            for c in chars.by_ref() {
                out.push(c);
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else if visible < width {
            out.push(c);
            visible += 1;
        }
    }
    out
}

/// counts the characters of `text` that are not part of an escape sequence.
fn visible_width(text: &str) -> usize {
    let mut chars = text.chars();
    let mut width = 0;
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // skip the control sequence, through its final byte.
            chars.by_ref().find(|c| c.is_ascii_alphabetic());
        } else {
            width += 1;
        }
    }
    width
}
