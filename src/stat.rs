use std::{
    fmt::{self, Display},
    str::FromStr,
};

pub use self::{
    cpu_time::{CpuTicks, CpuTime},
    user_hz::UserHz,
};

mod cpu_time;
mod user_hz;

#[cfg(test)]
mod tests;

/// the aggregate "cpu" line of the `/proc/stat` kernel statistics table.
///
/// see `proc_stat(5)` for more information.
#[derive(Debug, Eq, PartialEq)]
pub struct CpuLine {
    pub time: CpuTime,
}

#[derive(Debug, Eq, PartialEq)]
pub enum StatParseError {
    Empty,
    NotAggregate { kind: String },
    UserHzParse(<UserHz as FromStr>::Err),
    CpuTime { fields: usize },
    MissingAggregate,
}

/// finds the aggregate "cpu" line in the contents of `/proc/stat`, and returns its ticks.
pub fn aggregate(stat: &str) -> Result<CpuTicks, StatParseError> {
    let line = stat
        .lines()
        .find(|line| line.split_whitespace().next() == Some("cpu"))
        .ok_or(StatParseError::MissingAggregate)?
        .parse::<CpuLine>()?;

    Ok(line.time.ticks())
}

// === impl CpuLine ===

impl FromStr for CpuLine {
    type Err = StatParseError;
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            None => return Err(StatParseError::Empty),
            Some("cpu") => {}
            Some(kind) => {
                return Err(StatParseError::NotAggregate {
                    kind: kind.to_owned(),
                });
            }
        }

        let time = tokens
            .map(str::parse::<UserHz>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StatParseError::UserHzParse)
            .and_then(CpuTime::try_from)?;

        Ok(Self { time })
    }
}

// === impl StatParseError ===

impl Display for StatParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use StatParseError::*;
        match self {
            Empty => f.write_str("empty line"),
            NotAggregate { kind } => write!(f, "not the aggregate cpu line: {kind}"),
            UserHzParse(error) => write!(f, "invalid tick count: {error}"),
            CpuTime { fields } => write!(f, "expected 8 to 10 cpu time fields, found {fields}"),
            MissingAggregate => f.write_str("no aggregate cpu line"),
        }
    }
}

impl std::error::Error for StatParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use StatParseError::*;

        match self {
            UserHzParse(error) => Some(error),
            Empty | NotAggregate { .. } | CpuTime { .. } | MissingAggregate => None,
        }
    }
}
