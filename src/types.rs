// src/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named output locations on the dashboard
///
/// Every text the presenter writes lands in exactly one of these fields.
/// The progress bar is addressed separately through its width and tier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Worker name reported by the pool
    Worker,
    /// Timestamp of the last accepted share
    LastShare,
    /// Accepted share count
    Shares,
    /// Best share of the current round, in tera-units
    BestShare,
    /// Best share ever, in tera-units
    BestEver,
    /// Network difficulty, in tera-units
    NetworkDiff,
    /// One-minute hashrate
    Hashrate1m,
    /// Five-minute hashrate
    Hashrate5m,
    /// One-hour hashrate
    Hashrate1hr,
    /// One-day hashrate
    Hashrate1d,
    /// Seven-day hashrate
    Hashrate7d,
    /// "Best Shot in percent" line
    Percent,
    /// Probability of a block within one day
    OddsDayPercent,
    /// "1:N" odds within one day
    OddsDayChance,
    /// Probability of a block within a week
    OddsWeekPercent,
    /// "1:N" odds within a week
    OddsWeekChance,
    /// Probability of a block within a month
    OddsMonthPercent,
    /// "1:N" odds within a month
    OddsMonthChance,
    /// Probability of a block within a year
    OddsYearPercent,
    /// "1:N" odds within a year
    OddsYearChance,
}

impl Field {
    /// Every field, in display order
    pub const ALL: [Field; 20] = [
        Field::Worker,
        Field::LastShare,
        Field::Shares,
        Field::BestShare,
        Field::BestEver,
        Field::NetworkDiff,
        Field::Hashrate1m,
        Field::Hashrate5m,
        Field::Hashrate1hr,
        Field::Hashrate1d,
        Field::Hashrate7d,
        Field::Percent,
        Field::OddsDayPercent,
        Field::OddsDayChance,
        Field::OddsWeekPercent,
        Field::OddsWeekChance,
        Field::OddsMonthPercent,
        Field::OddsMonthChance,
        Field::OddsYearPercent,
        Field::OddsYearChance,
    ];

    /// Human label used by the text renderer
    pub fn label(self) -> &'static str {
        match self {
            Field::Worker => "Worker",
            Field::LastShare => "Last share",
            Field::Shares => "Shares",
            Field::BestShare => "Best share",
            Field::BestEver => "Best ever",
            Field::NetworkDiff => "Network difficulty",
            Field::Hashrate1m => "Hashrate 1m",
            Field::Hashrate5m => "Hashrate 5m",
            Field::Hashrate1hr => "Hashrate 1hr",
            Field::Hashrate1d => "Hashrate 1d",
            Field::Hashrate7d => "Hashrate 7d",
            Field::Percent => "Progress",
            Field::OddsDayPercent => "Day",
            Field::OddsDayChance => "Day odds",
            Field::OddsWeekPercent => "Week",
            Field::OddsWeekChance => "Week odds",
            Field::OddsMonthPercent => "Month",
            Field::OddsMonthChance => "Month odds",
            Field::OddsYearPercent => "Year",
            Field::OddsYearChance => "Year odds",
        }
    }
}

/// Progress-bar tier derived from the best-share percentage
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarClass {
    /// Best share reached the network difficulty
    Green,
    /// At least 75% of the way there
    Yellow,
    /// Below 75%
    Red,
}

impl fmt::Display for BarClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarClass::Green => write!(f, "green"),
            BarClass::Yellow => write!(f, "yellow"),
            BarClass::Red => write!(f, "red"),
        }
    }
}

/// Time horizons for the block-discovery odds
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Horizon {
    /// One day
    Day,
    /// Seven days
    Week,
    /// Thirty days
    Month,
    /// 365 days
    Year,
}

impl Horizon {
    /// All horizons, shortest first
    pub const ALL: [Horizon; 4] = [Horizon::Day, Horizon::Week, Horizon::Month, Horizon::Year];

    /// Length of the horizon in days
    pub fn days(self) -> u32 {
        match self {
            Horizon::Day => 1,
            Horizon::Week => 7,
            Horizon::Month => 30,
            Horizon::Year => 365,
        }
    }

    /// Fields receiving (percentage, odds) for this horizon
    pub fn fields(self) -> (Field, Field) {
        match self {
            Horizon::Day => (Field::OddsDayPercent, Field::OddsDayChance),
            Horizon::Week => (Field::OddsWeekPercent, Field::OddsWeekChance),
            Horizon::Month => (Field::OddsMonthPercent, Field::OddsMonthChance),
            Horizon::Year => (Field::OddsYearPercent, Field::OddsYearChance),
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Horizon::Day => write!(f, "day"),
            Horizon::Week => write!(f, "week"),
            Horizon::Month => write!(f, "month"),
            Horizon::Year => write!(f, "year"),
        }
    }
}

/// Hashrate averaging windows reported by the pool
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashrateWindow {
    /// 1 minute
    OneMinute,
    /// 5 minutes
    FiveMinutes,
    /// 1 hour
    OneHour,
    /// 1 day
    OneDay,
    /// 7 days
    SevenDays,
}

impl HashrateWindow {
    /// All windows, shortest first
    pub const ALL: [HashrateWindow; 5] = [
        HashrateWindow::OneMinute,
        HashrateWindow::FiveMinutes,
        HashrateWindow::OneHour,
        HashrateWindow::OneDay,
        HashrateWindow::SevenDays,
    ];

    /// Display field for this window
    pub fn field(self) -> Field {
        match self {
            HashrateWindow::OneMinute => Field::Hashrate1m,
            HashrateWindow::FiveMinutes => Field::Hashrate5m,
            HashrateWindow::OneHour => Field::Hashrate1hr,
            HashrateWindow::OneDay => Field::Hashrate1d,
            HashrateWindow::SevenDays => Field::Hashrate7d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizons_cover_distinct_fields() {
        let mut seen = Vec::new();
        for h in Horizon::ALL {
            let (p, c) = h.fields();
            assert!(!seen.contains(&p) && !seen.contains(&c));
            seen.push(p);
            seen.push(c);
        }
        assert_eq!(seen.len(), 8);
        assert_eq!(Horizon::Year.days(), 365);
    }

    #[test]
    fn bar_class_renders_css_names() {
        assert_eq!(BarClass::Green.to_string(), "green");
        assert_eq!(BarClass::Yellow.to_string(), "yellow");
        assert_eq!(BarClass::Red.to_string(), "red");
    }
}
