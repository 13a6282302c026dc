use std::str::FromStr;

/// Selects which lines of a stream will emit trace records.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TracingConfig {
    All,
    Between(usize, usize),
    Before(usize),
    After(usize),
    Only(usize),
    Off,
}

impl TracingConfig {
    /// Returns true if the given line should be traced
    pub fn includes(&self, line: usize) -> bool {
        match *self {
            TracingConfig::All => true,
            TracingConfig::After(start) if start <= line => true,
            TracingConfig::Before(end) if line <= end => true,
            TracingConfig::Between(start, end) if start <= line && line <= end => true,
            TracingConfig::Only(only) if line == only => true,
            _ => false,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        TracingConfig::Off
    }
}

/// Parses a tracing range from the command line:
///
/// * `all` or `off`
/// * `N` to trace only line N
/// * `A-B` to trace lines A through B
/// * `<N` to trace every line up to and including N
/// * `>N` to trace every line from N onward
impl FromStr for TracingConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "all" => Ok(TracingConfig::All),
            "off" => Ok(TracingConfig::Off),
            _ if s.starts_with('<') => Ok(TracingConfig::Before(parse_line(&s[1..])?)),
            _ if s.starts_with('>') => Ok(TracingConfig::After(parse_line(&s[1..])?)),
            _ => match s.split_once('-') {
                Some((start, end)) => {
                    let start = parse_line(start)?;
                    let end = parse_line(end)?;
                    if start > end {
                        Err(format!("Invalid trace range {}: start is after end", s))
                    } else {
                        Ok(TracingConfig::Between(start, end))
                    }
                }
                None => Ok(TracingConfig::Only(parse_line(s)?)),
            },
        }
    }
}

fn parse_line(s: &str) -> Result<usize, String> {
    s.trim()
        .parse()
        .map_err(|e| format!("Invalid line number '{}': {}", s, e))
}

pub trait Tracing {
    fn set_tracing(&mut self, config: TracingConfig);
}
