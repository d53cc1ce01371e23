// src/stats/deriver.rs
//! Derived dashboard statistics
//!
//! Pure arithmetic over one worker entry and the network difficulty. Nothing
//! here performs I/O or fails: absent or zero inputs turn into zero values
//! and placeholder text.

use crate::network::status::WorkerEntry;
use crate::types::{BarClass, HashrateWindow, Horizon};
use crate::utils::numeric::{fixed, number_text};
use serde::Serialize;

/// Raw difficulty / hash units per tera-unit
pub const TERA: f64 = 1e12;

/// Expected blocks per day at the 10-minute target spacing
pub const BLOCKS_PER_DAY: f64 = 144.0;

/// Target block interval in seconds
pub const BLOCK_INTERVAL_SECS: f64 = 600.0;

/// Shown wherever a value is unavailable
pub const PLACEHOLDER: &str = "–";

/// Block-discovery probability over one horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HorizonOdds {
    /// Horizon the probability covers
    pub horizon: Horizon,
    /// Cumulative probability in percent (0..=100)
    pub percent: f64,
}

impl HorizonOdds {
    /// Probability with three decimals, e.g. `"0.251 %"`
    pub fn percent_text(&self) -> String {
        format!("{} %", fixed(self.percent, 3))
    }

    /// `"1:N"` odds, or a dash when the probability is zero
    pub fn chance_text(&self) -> String {
        if self.percent > 0.0 {
            format!("1:{:.0}", (100.0 / self.percent).round())
        } else {
            PLACEHOLDER.to_string()
        }
    }
}

/// Everything the presenter shows that is computed rather than copied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedStats {
    /// Best share of the round in tera-units
    pub best_share_t: f64,
    /// Best share ever in tera-units
    pub best_ever_t: f64,
    /// Network difficulty in tera-units, if known
    pub network_diff_t: Option<f64>,
    /// Best share as a percentage of the network difficulty (unclamped)
    pub percent: f64,
    /// Progress-bar tier for `percent`
    pub bar_class: BarClass,
    /// Odds for every horizon, shortest first
    pub odds: Vec<HorizonOdds>,
}

impl DerivedStats {
    /// Computes the statistics for `worker` against `network_diff`
    pub fn derive(worker: &WorkerEntry, network_diff: Option<f64>) -> Self {
        let diff = network_diff.filter(|d| d.is_finite() && *d > 0.0);
        let best_share_t = worker.best_share().unwrap_or(0.0) / TERA;
        let best_ever_t = worker.best_ever().unwrap_or(0.0) / TERA;
        let network_diff_t = diff.map(|d| d / TERA);

        let percent = match network_diff_t {
            Some(diff_t) => best_share_t / diff_t * 100.0,
            None => 0.0,
        };

        // Every horizon uses the one-day average.
        let hashrate_th = worker.hashrate(HashrateWindow::OneDay).unwrap_or(0.0);
        let odds = Horizon::ALL
            .iter()
            .map(|&horizon| HorizonOdds {
                horizon,
                percent: diff
                    .map(|d| block_odds_percent(hashrate_th, d, horizon.days()))
                    .unwrap_or(0.0),
            })
            .collect();

        DerivedStats {
            best_share_t,
            best_ever_t,
            network_diff_t,
            percent,
            bar_class: classify(percent),
            odds,
        }
    }

    /// Best share, e.g. `"0.550000 T"`
    pub fn best_share_text(&self) -> String {
        format!("{} T", fixed(self.best_share_t, 6))
    }

    /// Best ever, e.g. `"9.100000 T"`
    pub fn best_ever_text(&self) -> String {
        format!("{} T", fixed(self.best_ever_t, 6))
    }

    /// Network difficulty, e.g. `"126.27 T"`, or a dash
    pub fn network_diff_text(&self) -> String {
        match self.network_diff_t {
            Some(d) => format!("{} T", fixed(d, 2)),
            None => PLACEHOLDER.to_string(),
        }
    }

    /// Bar fill in percent, clamped to `0..=100`
    pub fn bar_width(&self) -> f64 {
        clamp_percent(self.percent)
    }

    /// Bar fill as a CSS-style width, e.g. `"42.5%"`
    pub fn bar_width_text(&self) -> String {
        format!("{}%", number_text(self.bar_width()))
    }

    /// `"Best Shot in percent: 0.43553 %"`
    pub fn percent_text(&self) -> String {
        format!("Best Shot in percent: {} %", fixed(self.percent, 5))
    }
}

/// Clamps a percentage into `0..=100`, mapping NaN to zero
pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// Progress-bar tier: green at 100% or more, yellow from 75%, else red
pub fn classify(percent: f64) -> BarClass {
    if percent >= 100.0 {
        BarClass::Green
    } else if percent >= 75.0 {
        BarClass::Yellow
    } else {
        BarClass::Red
    }
}

/// Probability (in percent) of finding at least one block within `days`
///
/// `hashrate_th` is the miner's rate in TH/s and `network_diff` the raw
/// network difficulty. Zero or invalid inputs yield 0.
pub fn block_odds_percent(hashrate_th: f64, network_diff: f64, days: u32) -> f64 {
    let my_hashrate = hashrate_th * TERA;
    let network_hashrate = network_diff * 2f64.powi(32) / BLOCK_INTERVAL_SECS;
    let valid = my_hashrate > 0.0 && network_hashrate > 0.0 && network_hashrate.is_finite();
    if !valid {
        return 0.0;
    }

    let p_per_block = (my_hashrate / network_hashrate).min(1.0);
    let blocks = f64::from(days) * BLOCKS_PER_DAY;
    // 1 - (1 - p)^n without losing the tiny p to rounding
    let p_total = -(blocks * (-p_per_block).ln_1p()).exp_m1();
    p_total * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn worker(bestshare: f64, bestever: f64, hashrate1d: &str) -> WorkerEntry {
        WorkerEntry {
            workername: json!("bc1qtest.rig"),
            bestshare: json!(bestshare),
            bestever: json!(bestever),
            hashrate1d: json!(hashrate1d),
            ..WorkerEntry::default()
        }
    }

    #[test]
    fn odds_for_ten_terahash_against_80t_difficulty() {
        let percent = block_odds_percent(10.0, 80e12, 1);

        let network_hashrate = 80e12 * 2f64.powi(32) / 600.0;
        assert!((network_hashrate - 5.7266e20).abs() / 5.7266e20 < 1e-4);
        let p_per_block = 1e13 / network_hashrate;
        assert!((p_per_block - 1.7462e-8).abs() < 1e-11);
        assert!((percent / 100.0 - 2.5146e-6).abs() < 1e-9);

        let odds = HorizonOdds {
            horizon: Horizon::Day,
            percent,
        };
        assert_eq!(odds.percent_text(), "0.000 %");
        assert_eq!(odds.chance_text(), format!("1:{:.0}", (100.0 / percent).round()));
        assert!(odds.chance_text().starts_with("1:39"));
    }

    #[test]
    fn odds_grow_with_horizon_and_stay_below_certainty() {
        let day = block_odds_percent(500.0, 80e12, 1);
        let year = block_odds_percent(500.0, 80e12, 365);
        assert!(day > 0.0 && year > day && year <= 100.0);
        assert_eq!(block_odds_percent(1e12, 1.0, 1), 100.0);
    }

    #[test]
    fn zero_inputs_give_zero_odds_and_a_dash() {
        assert_eq!(block_odds_percent(0.0, 80e12, 7), 0.0);
        assert_eq!(block_odds_percent(10.0, 0.0, 7), 0.0);
        assert_eq!(block_odds_percent(f64::NAN, 80e12, 7), 0.0);

        let odds = HorizonOdds {
            horizon: Horizon::Week,
            percent: 0.0,
        };
        assert_eq!(odds.percent_text(), "0.000 %");
        assert_eq!(odds.chance_text(), "–");
    }

    #[test]
    fn bar_tiers() {
        assert_eq!(classify(100.0), BarClass::Green);
        assert_eq!(classify(80.0), BarClass::Yellow);
        assert_eq!(classify(75.0), BarClass::Yellow);
        assert_eq!(classify(50.0), BarClass::Red);
        assert_eq!(classify(120.0), BarClass::Green);
    }

    #[test]
    fn bar_width_is_clamped_but_percent_text_is_not() {
        // best share 120% of difficulty
        let stats = DerivedStats::derive(&worker(96e12, 96e12, "1T"), Some(80e12));
        assert_eq!(stats.bar_width_text(), "100%");
        assert_eq!(stats.bar_class, BarClass::Green);
        assert_eq!(stats.percent_text(), "Best Shot in percent: 120.00000 %");
        assert_eq!(clamp_percent(-3.0), 0.0);
        assert_eq!(clamp_percent(f64::NAN), 0.0);
    }

    #[test]
    fn derives_tera_units_and_texts() {
        let stats = DerivedStats::derive(&worker(40e12, 9.1e12, "10T"), Some(80e12));

        assert_eq!(stats.best_share_text(), "40.000000 T");
        assert_eq!(stats.best_ever_text(), "9.100000 T");
        assert_eq!(stats.network_diff_text(), "80.00 T");
        assert_eq!(stats.bar_width_text(), "50%");
        assert_eq!(stats.bar_class, BarClass::Red);
        assert_eq!(stats.odds.len(), 4);
        assert_eq!(stats.odds[0].horizon, Horizon::Day);
        assert_eq!(stats.odds[0].percent, block_odds_percent(10.0, 80e12, 1));
        assert_eq!(stats.odds[3].percent, block_odds_percent(10.0, 80e12, 365));
    }

    #[test]
    fn missing_difficulty_degrades_to_placeholders() {
        let stats = DerivedStats::derive(&worker(40e12, 9.1e12, "10T"), None);
        assert_eq!(stats.network_diff_text(), "–");
        assert_eq!(stats.percent, 0.0);
        assert_eq!(stats.bar_width_text(), "0%");
        assert!(stats.odds.iter().all(|o| o.chance_text() == "–"));

        let zero = DerivedStats::derive(&worker(40e12, 9.1e12, "10T"), Some(0.0));
        assert_eq!(zero, stats);
    }

    #[test]
    fn exact_midpoints_round_up() {
        let odds = HorizonOdds {
            horizon: Horizon::Day,
            percent: 0.0625,
        };
        assert_eq!(odds.percent_text(), "0.063 %");

        // 0.125 T is exactly representable and sits on the 2-decimal midpoint
        let stats = DerivedStats::derive(&worker(0.5e12, 0.5e12, "1T"), Some(0.125e12));
        assert_eq!(stats.network_diff_text(), "0.13 T");
    }

    #[test]
    fn tiny_bar_width_uses_exponent_notation() {
        let stats = DerivedStats::derive(&worker(1.0, 1.0, "1T"), Some(1e20));
        assert_eq!(stats.bar_width_text(), "9.999999999999999e-19%");
        assert_eq!(stats.bar_class, BarClass::Red);
    }

    #[test]
    fn unparsable_hashrate_counts_as_zero() {
        let stats = DerivedStats::derive(&worker(1.0, 1.0, "n/a"), Some(80e12));
        assert!(stats.odds.iter().all(|o| o.percent == 0.0));
    }
}
