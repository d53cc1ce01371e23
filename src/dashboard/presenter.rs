// src/dashboard/presenter.rs
//! Update orchestration
//!
//! [`Presenter::submit`] is the single action every trigger funnels into.
//! It runs `Idle → Fetching → Success | Failed`:
//!
//! 1. save the trimmed identifier
//! 2. await the network difficulty (absent only degrades the output)
//! 3. await the worker snapshot (absent fails the update)
//! 4. write either the derived fields or the placeholder set
//!
//! Overlapping submits are not prevented; the fetcher caches are
//! last-write-wins.

use crate::config::Config;
use crate::dashboard::display::DisplaySurface;
use crate::network::{DifficultyFetcher, HttpSource, ReqwestSource, WorkerStatusFetcher};
use crate::prefs::{FilePreferenceStore, PreferenceStore};
use crate::stats::deriver::{DerivedStats, PLACEHOLDER};
use crate::types::{Field, HashrateWindow, Horizon};
use crate::utils::error::DashboardError;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Worker name shown when the update fails
pub const NOT_FOUND_TEXT: &str = "Invalid or not found!";
/// Percent line shown when the update fails
pub const FAILED_PERCENT_TEXT: &str = "Best Shot in percent: –";
/// Horizon percentage shown when the update fails
pub const FAILED_ODDS_PERCENT: &str = "<0.001%";
/// Horizon odds shown when the update fails
pub const FAILED_ODDS_CHANCE: &str = "<1:1000";

/// Where the presenter is in its update cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateState {
    /// No update has run yet
    Idle,
    /// Fetches are in flight
    Fetching,
    /// Last update rendered real data
    Success,
    /// Last update rendered placeholders
    Failed,
}

/// Everything a successful update rendered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Identifier that was submitted
    pub identifier: String,
    /// Worker name reported by the pool
    pub worker: Option<String>,
    /// Last share timestamp as reported
    pub last_share: Option<String>,
    /// Share count as reported
    pub shares: Option<String>,
    /// Hashrates in TH/s, in window order
    pub hashrates: Vec<(HashrateWindow, Option<f64>)>,
    /// Derived statistics
    pub stats: DerivedStats,
}

/// Result of one [`Presenter::submit`]
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// Data was fetched and written
    Success(Box<Report>),
    /// Worker data was unavailable; placeholders were written
    Failed,
}

/// Orchestrates preference save, fetches, derivation, and rendering
pub struct Presenter {
    prefs: Box<dyn PreferenceStore>,
    difficulty: DifficultyFetcher,
    workers: WorkerStatusFetcher,
    state: Mutex<UpdateState>,
}

impl Presenter {
    /// Assembles a presenter from its parts
    pub fn new(
        prefs: Box<dyn PreferenceStore>,
        difficulty: DifficultyFetcher,
        workers: WorkerStatusFetcher,
    ) -> Self {
        Presenter {
            prefs,
            difficulty,
            workers,
            state: Mutex::new(UpdateState::Idle),
        }
    }

    /// Wires the production stack described by `config`
    ///
    /// # Errors
    /// Returns `DashboardError` if the HTTP client cannot be built
    pub fn from_config(config: &Config) -> Result<Self, DashboardError> {
        let source: Arc<dyn HttpSource> = Arc::new(ReqwestSource::new(config.request_timeout())?);
        Ok(Self::with_source(config, source))
    }

    /// Wires the stack described by `config` on top of `source`
    pub fn with_source(config: &Config, source: Arc<dyn HttpSource>) -> Self {
        let ttl = config.cache_ttl();
        Presenter::new(
            Box::new(FilePreferenceStore::new(&config.preferences_path)),
            DifficultyFetcher::new(source.clone(), &config.difficulty_url, ttl),
            WorkerStatusFetcher::new(source, &config.status_base_url, config.relay(), ttl),
        )
    }

    /// Saved identifier used to prefill the input
    pub fn initial_input(&self) -> Option<String> {
        self.prefs.load()
    }

    /// Current update state
    pub async fn state(&self) -> UpdateState {
        *self.state.lock().await
    }

    async fn transition(&self, next: UpdateState) {
        let mut state = self.state.lock().await;
        log::debug!("Update state {:?} -> {:?}", *state, next);
        *state = next;
    }

    /// Runs one full update for `input` and writes the result into `display`
    ///
    /// # Arguments
    /// * `input` - Identifier as typed; surrounding whitespace is trimmed
    /// * `display` - Surface that receives either the results or the placeholders
    ///
    /// # Operations
    /// 1. Saves the trimmed identifier as the preference
    /// 2. Fetches the network difficulty and the worker status
    /// 3. Renders the derived statistics, or the failure placeholders when no
    ///    worker came back
    ///
    /// # Returns
    /// The report on success, [`UpdateOutcome::Failed`] otherwise
    pub async fn submit<D>(&self, input: &str, display: &mut D) -> UpdateOutcome
    where
        D: DisplaySurface + ?Sized,
    {
        let identifier = input.trim();
        self.transition(UpdateState::Fetching).await;

        if let Err(e) = self.prefs.save(identifier) {
            log::warn!("Could not remember worker address: {}", e);
        }

        let network_diff = self.difficulty.get().await;
        let status = self.workers.get(identifier).await;

        let worker = match status.as_ref().and_then(|s| s.primary_worker()) {
            Some(worker) => worker,
            None => {
                log::error!("Error loading data for '{}': no worker data", identifier);
                render_failure(display);
                self.transition(UpdateState::Failed).await;
                return UpdateOutcome::Failed;
            }
        };

        let report = Report {
            identifier: identifier.to_string(),
            worker: worker.name(),
            last_share: worker.last_share(),
            shares: worker.share_count(),
            hashrates: HashrateWindow::ALL
                .iter()
                .map(|&w| (w, worker.hashrate(w)))
                .collect(),
            stats: DerivedStats::derive(worker, network_diff),
        };
        render_success(&report, display);
        self.transition(UpdateState::Success).await;
        UpdateOutcome::Success(Box::new(report))
    }
}

fn or_placeholder(value: Option<&str>) -> &str {
    value.unwrap_or(PLACEHOLDER)
}

/// Writes a successful report and opens the share and odds sections
pub fn render_success<D: DisplaySurface + ?Sized>(report: &Report, display: &mut D) {
    let stats = &report.stats;

    display.set_text(Field::Worker, or_placeholder(report.worker.as_deref()));
    display.set_text(Field::LastShare, or_placeholder(report.last_share.as_deref()));
    display.set_text(Field::Shares, or_placeholder(report.shares.as_deref()));

    for (window, rate) in &report.hashrates {
        let text = match rate {
            Some(rate) => format!("{} TH/s", rate),
            None => PLACEHOLDER.to_string(),
        };
        display.set_text(window.field(), &text);
    }

    display.set_text(Field::BestShare, &stats.best_share_text());
    display.set_text(Field::BestEver, &stats.best_ever_text());
    display.set_text(Field::NetworkDiff, &stats.network_diff_text());

    display.set_bar_width(&stats.bar_width_text());
    display.set_bar_class(stats.bar_class);
    display.set_text(Field::Percent, &stats.percent_text());

    for odds in &stats.odds {
        let (percent_field, chance_field) = odds.horizon.fields();
        display.set_text(percent_field, &odds.percent_text());
        display.set_text(chance_field, &odds.chance_text());
    }

    for (index, label) in display.section_labels().iter().enumerate() {
        let label = label.to_lowercase();
        if label.contains("shares") || label.contains("odds") {
            display.open_section(index);
        }
    }
}

/// Overwrites every field with its failure placeholder
///
/// The bar tier is left as it was; only the width is reset.
pub fn render_failure<D: DisplaySurface + ?Sized>(display: &mut D) {
    display.set_text(Field::Worker, NOT_FOUND_TEXT);
    for field in [
        Field::LastShare,
        Field::Shares,
        Field::BestShare,
        Field::BestEver,
        Field::NetworkDiff,
    ] {
        display.set_text(field, PLACEHOLDER);
    }
    for window in HashrateWindow::ALL {
        display.set_text(window.field(), PLACEHOLDER);
    }
    display.set_bar_width("0%");
    display.set_text(Field::Percent, FAILED_PERCENT_TEXT);
    for horizon in Horizon::ALL {
        let (percent_field, chance_field) = horizon.fields();
        display.set_text(percent_field, FAILED_ODDS_PERCENT);
        display.set_text(chance_field, FAILED_ODDS_CHANCE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::display::Board;
    use crate::network::http::testing::ScriptedSource;
    use crate::types::BarClass;
    use tempfile::TempDir;

    const DIFF_URL: &str = "https://difficulty.test/q";

    struct Fixture {
        _dir: TempDir,
        source: Arc<ScriptedSource>,
        presenter: Presenter,
        prefs_path: std::path::PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let prefs_path = dir.path().join("prefs.toml");
        let config = Config {
            difficulty_url: DIFF_URL.to_string(),
            status_base_url: "https://pool.test/users".to_string(),
            relay_url: String::new(),
            preferences_path: prefs_path.clone(),
            ..Config::default()
        };
        let source = Arc::new(ScriptedSource::new());
        let presenter = Presenter::with_source(&config, source.clone());
        Fixture {
            _dir: dir,
            source,
            presenter,
            prefs_path,
        }
    }

    fn status_page(name: &str) -> String {
        format!(
            r#"<html><pre>{{"worker": [{{"workername": "{name}", "lastshare": 1760600000,
            "shares": 1234, "bestshare": 40000000000000, "bestever": 9100000000000,
            "hashrate1m": "11.5T", "hashrate5m": "11T", "hashrate1hr": "10.5T",
            "hashrate1d": "10T", "hashrate7d": "9.75T"}}]}}</pre></html>"#
        )
    }

    #[tokio::test]
    async fn success_writes_every_field_and_opens_sections() {
        let fx = fixture();
        fx.source.respond(DIFF_URL, "80000000000000");
        fx.source.respond("/users/alice", &status_page("alice.rig1"));
        let mut board = Board::new();

        let outcome = fx.presenter.submit("  alice  ", &mut board).await;

        assert!(matches!(outcome, UpdateOutcome::Success(_)));
        assert_eq!(fx.presenter.state().await, UpdateState::Success);
        assert_eq!(board.text(Field::Worker), Some("alice.rig1"));
        assert_eq!(board.text(Field::LastShare), Some("1760600000"));
        assert_eq!(board.text(Field::Shares), Some("1234"));
        assert_eq!(board.text(Field::Hashrate1m), Some("11.5 TH/s"));
        assert_eq!(board.text(Field::Hashrate7d), Some("9.75 TH/s"));
        assert_eq!(board.text(Field::BestShare), Some("40.000000 T"));
        assert_eq!(board.text(Field::BestEver), Some("9.100000 T"));
        assert_eq!(board.text(Field::NetworkDiff), Some("80.00 T"));
        assert_eq!(board.text(Field::Percent), Some("Best Shot in percent: 50.00000 %"));
        assert_eq!(board.bar_width(), "50%");
        assert_eq!(board.bar_class(), Some(BarClass::Red));
        assert_eq!(board.text(Field::OddsDayPercent), Some("0.000 %"));
        assert!(board.text(Field::OddsDayChance).unwrap().starts_with("1:"));
        assert!(board.text(Field::OddsYearPercent).unwrap().ends_with(" %"));

        let open: Vec<_> = board
            .sections()
            .iter()
            .filter(|s| s.open)
            .map(|s| s.label.as_str())
            .collect();
        assert!(open.contains(&"Shares"));
        assert!(open.contains(&"Odds of Finding a Block"));
    }

    #[tokio::test]
    async fn submit_persists_trimmed_identifier() {
        let fx = fixture();
        fx.source.respond(DIFF_URL, "80000000000000");
        fx.source.respond("/users/abc123", &status_page("abc123.rig"));

        fx.presenter.submit("\tabc123 \n", &mut Board::new()).await;

        let reloaded = FilePreferenceStore::new(&fx.prefs_path);
        assert_eq!(reloaded.load().as_deref(), Some("abc123"));
        assert_eq!(fx.presenter.initial_input().as_deref(), Some("abc123"));
        assert!(
            fx.source
                .requests()
                .iter()
                .any(|u| u == "https://pool.test/users/abc123")
        );
    }

    #[tokio::test]
    async fn failure_overwrites_previous_success_with_placeholders() {
        let fx = fixture();
        fx.source.respond(DIFF_URL, "80000000000000");
        fx.source.respond("/users/alice", &status_page("alice.rig1"));
        fx.source.fail("/users/bob");
        let mut board = Board::new();

        fx.presenter.submit("alice", &mut board).await;
        let outcome = fx.presenter.submit("bob", &mut board).await;

        assert_eq!(outcome, UpdateOutcome::Failed);
        assert_eq!(fx.presenter.state().await, UpdateState::Failed);
        assert_eq!(board.text(Field::Worker), Some(NOT_FOUND_TEXT));
        for field in [
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
        ] {
            assert_eq!(board.text(field), Some("–"), "{:?}", field);
        }
        assert_eq!(board.bar_width(), "0%");
        assert_eq!(board.text(Field::Percent), Some(FAILED_PERCENT_TEXT));
        for horizon in Horizon::ALL {
            let (p, c) = horizon.fields();
            assert_eq!(board.text(p), Some(FAILED_ODDS_PERCENT));
            assert_eq!(board.text(c), Some(FAILED_ODDS_CHANCE));
        }
        // bob was still remembered even though the lookup failed
        assert_eq!(fx.presenter.initial_input().as_deref(), Some("bob"));
    }

    #[tokio::test]
    async fn missing_difficulty_degrades_without_failing() {
        let fx = fixture();
        fx.source.fail(DIFF_URL);
        fx.source.respond("/users/alice", &status_page("alice.rig1"));
        let mut board = Board::new();

        let outcome = fx.presenter.submit("alice", &mut board).await;

        assert!(matches!(outcome, UpdateOutcome::Success(_)));
        assert_eq!(board.text(Field::NetworkDiff), Some("–"));
        assert_eq!(board.bar_width(), "0%");
        assert_eq!(board.text(Field::OddsDayChance), Some("–"));
    }

    #[tokio::test]
    async fn empty_worker_list_fails_the_update() {
        let fx = fixture();
        fx.source.respond(DIFF_URL, "80000000000000");
        fx.source
            .respond("/users/idle", r#"<pre>{"workername": "idle", "worker": []}</pre>"#);
        let mut board = Board::new();

        assert_eq!(fx.presenter.submit("idle", &mut board).await, UpdateOutcome::Failed);
        assert_eq!(board.text(Field::Worker), Some(NOT_FOUND_TEXT));
    }

    #[tokio::test]
    async fn repeated_submits_reuse_both_caches() {
        let fx = fixture();
        fx.source.respond(DIFF_URL, "80000000000000");
        fx.source.respond("/users/alice", &status_page("alice.rig1"));
        let mut board = Board::new();

        fx.presenter.submit("alice", &mut board).await;
        fx.presenter.submit("alice", &mut board).await;

        assert_eq!(fx.source.count(DIFF_URL), 1);
        assert_eq!(fx.source.count("/users/alice"), 1);
    }

    #[tokio::test]
    async fn difficulty_cache_is_shared_across_identifiers() {
        let fx = fixture();
        fx.source.respond(DIFF_URL, "80000000000000");
        fx.source.respond("/users/alice", &status_page("alice.rig1"));
        fx.source.respond("/users/bob", &status_page("bob.rig1"));
        let mut board = Board::new();

        fx.presenter.submit("alice", &mut board).await;
        let outcome = fx.presenter.submit("bob", &mut board).await;

        assert!(matches!(outcome, UpdateOutcome::Success(_)));
        assert_eq!(board.text(Field::Worker), Some("bob.rig1"));
        assert_eq!(board.text(Field::NetworkDiff), Some("80.00 T"));
        assert_eq!(fx.source.count(DIFF_URL), 1);
        assert_eq!(fx.source.count("/users/alice"), 1);
        assert_eq!(fx.source.count("/users/bob"), 1);
    }

    #[tokio::test]
    async fn starts_idle_with_no_saved_input() {
        let fx = fixture();
        assert_eq!(fx.presenter.state().await, UpdateState::Idle);
        assert_eq!(fx.presenter.initial_input(), None);
    }
}
