use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveTime;
use serde::de;
use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// HumanDuration
// ---------------------------------------------------------------------------

/// A duration parsed from a human-readable string like `"30s"`, `"5m"`, `"15h"`, `"2d"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(Duration);

impl HumanDuration {
    pub fn as_duration(&self) -> Duration {
        self.0
    }

    pub fn as_secs(&self) -> u64 {
        self.0.as_secs()
    }
}

impl From<Duration> for HumanDuration {
    fn from(d: Duration) -> Self {
        Self(d)
    }
}

impl FromStr for HumanDuration {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            anyhow::bail!("empty duration string");
        }

        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| anyhow::anyhow!("missing unit suffix in duration: {s:?}"))?;
        let (num_part, suffix) = s.split_at(split);
        let value: u64 = num_part
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid number in duration: {s:?}"))?;

        let unit: u64 = match suffix {
            "s" => 1,
            "m" => 60,
            "h" => 3600,
            "d" => 86400,
            _ => {
                anyhow::bail!("unsupported duration suffix {suffix:?} in {s:?} (expected s/m/h/d)")
            }
        };
        let secs = value
            .checked_mul(unit)
            .ok_or_else(|| anyhow::anyhow!("duration overflows: {s:?}"))?;

        Ok(Self(Duration::from_secs(secs)))
    }
}

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        if secs == 0 {
            return write!(f, "0s");
        }
        if secs % 86400 == 0 {
            write!(f, "{}d", secs / 86400)
        } else if secs % 3600 == 0 {
            write!(f, "{}h", secs / 3600)
        } else if secs % 60 == 0 {
            write!(f, "{}m", secs / 60)
        } else {
            write!(f, "{secs}s")
        }
    }
}

impl<'de> Deserialize<'de> for HumanDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// ClockTime
// ---------------------------------------------------------------------------

/// A wall-clock time of day written as `"HH:MM"` or `"HH:MM:SS"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub fn as_time(&self) -> NaiveTime {
        self.0
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(t: NaiveTime) -> Self {
        Self(t)
    }
}

impl FromStr for ClockTime {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .map(Self)
            .map_err(|_| anyhow::anyhow!("invalid time of day {s:?} (expected HH:MM or HH:MM:SS)"))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_duration_parse_and_display() {
        let d: HumanDuration = "15h".parse().unwrap();
        assert_eq!(d.as_secs(), 54_000);
        assert_eq!(d.to_string(), "15h");
        let d: HumanDuration = "90s".parse().unwrap();
        assert_eq!(d.to_string(), "90s");
        let d: HumanDuration = "120m".parse().unwrap();
        assert_eq!(d.to_string(), "2h");
    }

    #[test]
    fn human_duration_errors() {
        assert!("".parse::<HumanDuration>().is_err());
        assert!("15".parse::<HumanDuration>().is_err());
        assert!("h".parse::<HumanDuration>().is_err());
        assert!("3w".parse::<HumanDuration>().is_err());
        assert!("5124095576030432h".parse::<HumanDuration>().is_err());
        assert!("99999999999999999999s".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn clock_time_formats() {
        let t: ClockTime = "07:00".parse().unwrap();
        assert_eq!(t.to_string(), "07:00:00");
        let t: ClockTime = "21:30:15".parse().unwrap();
        assert_eq!(t.to_string(), "21:30:15");
        assert!("25:00".parse::<ClockTime>().is_err());
        assert!("seven".parse::<ClockTime>().is_err());
    }
}
