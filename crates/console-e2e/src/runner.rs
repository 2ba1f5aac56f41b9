//! Suite runner: drives registered scenarios against browser sessions

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::driver::DriverFactory;
use crate::error::E2eResult;
use crate::globals::SuiteGlobals;
use crate::scenarios::{self, Scenario};
use crate::session::{Session, StepResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    Passed,
    Failed,
    Skipped,
}

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub tags: Vec<String>,
    pub status: ScenarioStatus,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub steps: Vec<StepResult>,
    /// Failure message, or why the scenario was skipped
    pub error: Option<String>,
    pub screenshot: Option<PathBuf>,
}

impl ScenarioResult {
    fn skipped(scenario: &Scenario, reason: String) -> Self {
        Self {
            name: scenario.name.to_string(),
            tags: tags(scenario),
            status: ScenarioStatus::Skipped,
            started_at: Utc::now(),
            duration_ms: 0,
            steps: Vec::new(),
            error: Some(reason),
            screenshot: None,
        }
    }
}

/// Result of running the suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl TestSuiteResult {
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Configuration for the suite runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub output_dir: PathBuf,
    pub screenshot_on_failure: bool,
    /// Run only scenarios carrying one of these tags
    pub tags: Vec<String>,
    /// Run only scenarios with these names
    pub names: Vec<String>,
    /// Also run scenarios registered as disabled
    pub include_disabled: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("test-results"),
            screenshot_on_failure: true,
            tags: Vec::new(),
            names: Vec::new(),
            include_disabled: false,
        }
    }
}

fn tags(scenario: &Scenario) -> Vec<String> {
    scenario.tags.iter().map(|t| t.to_string()).collect()
}

/// File name stem for artifacts of a scenario
fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

pub struct SuiteRunner<F: DriverFactory> {
    factory: F,
    clock: Arc<dyn Clock>,
    globals: Arc<SuiteGlobals>,
    config: RunnerConfig,
}

impl<F: DriverFactory> SuiteRunner<F> {
    pub fn new(factory: F, globals: SuiteGlobals, config: RunnerConfig) -> Self {
        Self {
            factory,
            clock: Arc::new(SystemClock),
            globals: Arc::new(globals),
            config,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Whether the name and tag filters let `scenario` through
    pub fn is_selected(&self, scenario: &Scenario) -> bool {
        let by_name =
            self.config.names.is_empty() || self.config.names.iter().any(|n| n == scenario.name);
        let by_tag =
            self.config.tags.is_empty() || self.config.tags.iter().any(|t| scenario.has_tag(t));
        by_name && by_tag
    }

    /// Selected, and either enabled or explicitly included
    fn will_run(&self, scenario: &Scenario) -> bool {
        self.is_selected(scenario) && (scenario.enabled_by_default || self.config.include_disabled)
    }

    /// Reject globals a scenario about to run cannot do without
    pub fn check_globals(&self) -> E2eResult<()> {
        if scenarios::all()
            .iter()
            .any(|s| s.has_tag("openapi") && self.will_run(s))
        {
            self.globals.openapi_urls()?;
        }
        Ok(())
    }

    /// Run every registered scenario that passes the filters
    pub async fn run_all(&self) -> TestSuiteResult {
        self.run_scenarios(&scenarios::all()).await
    }

    /// Run `list` in order.
    ///
    /// A scenario is skipped when it is disabled and not explicitly
    /// included, or when a prerequisite that ran in this suite did not pass.
    /// Prerequisites outside the selection are assumed to be in place.
    pub async fn run_scenarios(&self, list: &[Scenario]) -> TestSuiteResult {
        let start = self.clock.now();
        let selected: Vec<&Scenario> = list.iter().filter(|s| self.is_selected(s)).collect();
        let mut outcomes: HashMap<&'static str, ScenarioStatus> = HashMap::new();
        let mut results = Vec::with_capacity(selected.len());

        info!("Running {} scenario(s)...", selected.len());

        for scenario in selected {
            let blocker = scenario.requires.iter().find(|r| {
                outcomes
                    .get(*r)
                    .map(|status| *status != ScenarioStatus::Passed)
                    .unwrap_or(false)
            });

            let result = if !self.will_run(scenario) {
                ScenarioResult::skipped(scenario, "disabled by default".to_string())
            } else if let Some(required) = blocker {
                ScenarioResult::skipped(scenario, format!("prerequisite '{}' did not pass", required))
            } else {
                self.run_scenario(scenario).await
            };

            match result.status {
                ScenarioStatus::Passed => info!("✓ {} ({} ms)", result.name, result.duration_ms),
                ScenarioStatus::Failed => error!(
                    "✗ {} - {}",
                    result.name,
                    result.error.as_deref().unwrap_or("unknown error")
                ),
                ScenarioStatus::Skipped => info!(
                    "- {} skipped: {}",
                    result.name,
                    result.error.as_deref().unwrap_or("")
                ),
            }
            outcomes.insert(scenario.name, result.status);
            results.push(result);
        }

        let count = |status: ScenarioStatus| results.iter().filter(|r| r.status == status).count();
        let passed = count(ScenarioStatus::Passed);
        let failed = count(ScenarioStatus::Failed);
        let skipped = count(ScenarioStatus::Skipped);
        let duration_ms = self.clock.now().saturating_duration_since(start).as_millis() as u64;

        info!(
            "Scenario results: {} passed, {} failed, {} skipped ({} ms)",
            passed, failed, skipped, duration_ms
        );

        TestSuiteResult {
            total: results.len(),
            passed,
            failed,
            skipped,
            duration_ms,
            results,
        }
    }

    /// Run one scenario in a fresh browser session
    pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioResult {
        let started_at = Utc::now();
        let start = self.clock.now();
        debug!("Running scenario: {}", scenario.name);

        let driver = match self.factory.connect().await {
            Ok(driver) => driver,
            Err(e) => {
                return ScenarioResult {
                    name: scenario.name.to_string(),
                    tags: tags(scenario),
                    status: ScenarioStatus::Failed,
                    started_at,
                    duration_ms: 0,
                    steps: Vec::new(),
                    error: Some(e.to_string()),
                    screenshot: None,
                }
            }
        };

        let mut session = Session::new(driver, Arc::clone(&self.clock), Arc::clone(&self.globals));
        let outcome = (scenario.run)(&mut session).await;

        let mut screenshot = None;
        if outcome.is_err() && self.config.screenshot_on_failure && !session.is_ended() {
            match self.save_screenshot(&mut session, scenario.name).await {
                Ok(path) => screenshot = Some(path),
                Err(e) => warn!("Failure screenshot of '{}' not saved: {}", scenario.name, e),
            }
        }
        if !session.is_ended() {
            // Failure already logged by the session
            let _ = session.end().await;
        }

        let duration_ms = self.clock.now().saturating_duration_since(start).as_millis() as u64;
        ScenarioResult {
            name: scenario.name.to_string(),
            tags: tags(scenario),
            status: if outcome.is_ok() {
                ScenarioStatus::Passed
            } else {
                ScenarioStatus::Failed
            },
            started_at,
            duration_ms,
            steps: session.into_steps(),
            error: outcome.err().map(|e| e.to_string()),
            screenshot,
        }
    }

    async fn save_screenshot(&self, session: &mut Session, name: &str) -> E2eResult<PathBuf> {
        let png = session.screenshot().await?;
        let dir = self.config.output_dir.join("screenshots");
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.png", slug(name)));
        std::fs::write(&path, png)?;
        info!("Screenshot saved: {}", path.display());
        Ok(path)
    }

    /// Write suite results to JSON file
    pub fn write_results(&self, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        write_results(&self.config.output_dir, results)
    }
}

pub fn write_results(output_dir: &Path, results: &TestSuiteResult) -> E2eResult<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    let path = output_dir.join("test-results.json");
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(&path, json)?;

    info!("Results written to: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;

    use crate::clock::ManualClock;
    use crate::globals::test_globals;
    use crate::locator::Locator;
    use crate::testing::FakeFactory;

    fn passes(s: &mut Session) -> BoxFuture<'_, E2eResult<()>> {
        Box::pin(async move {
            let url = s.globals().launch_url.clone();
            s.navigate(&url).await?;
            s.end().await
        })
    }

    fn fails(s: &mut Session) -> BoxFuture<'_, E2eResult<()>> {
        Box::pin(async move { s.wait_visible(&Locator::xpath("//*[@id=\"missing\"]")).await })
    }

    fn scenario(
        name: &'static str,
        requires: &'static [&'static str],
        enabled_by_default: bool,
        run: scenarios::ScenarioFn,
    ) -> Scenario {
        Scenario {
            name,
            tags: &["ss", "clients"],
            requires,
            enabled_by_default,
            run,
        }
    }

    fn runner(factory: FakeFactory, config: RunnerConfig) -> SuiteRunner<FakeFactory> {
        SuiteRunner::new(factory, test_globals(), config).with_clock(Arc::new(ManualClock::new()))
    }

    #[tokio::test]
    async fn test_failure_skips_dependents_and_keeps_screenshot() {
        let dir = tempfile::tempdir().unwrap();
        let factory = FakeFactory::default();
        let config = RunnerConfig {
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let list = [
            scenario("add", &[], true, passes),
            scenario("edit", &["add"], true, fails),
            scenario("delete", &["edit"], true, passes),
            scenario("other", &["add"], true, passes),
        ];

        let suite = runner(factory.clone(), config).run_scenarios(&list).await;

        assert_eq!((suite.passed, suite.failed, suite.skipped), (2, 1, 1));
        assert!(!suite.success());
        let edit = &suite.results[1];
        assert_eq!(edit.status, ScenarioStatus::Failed);
        assert!(edit.error.as_deref().unwrap().contains("missing"));
        assert!(edit.screenshot.as_ref().unwrap().exists());
        let delete = &suite.results[2];
        assert_eq!(delete.status, ScenarioStatus::Skipped);
        assert!(delete.error.as_deref().unwrap().contains("'edit'"));

        // Every session that ran was ended exactly once
        let ends = factory.driver.actions().iter().filter(|a| *a == "end").count();
        assert_eq!(ends, 3);
    }

    #[tokio::test]
    async fn test_disabled_scenarios_need_opt_in() {
        let list = [scenario("openapi", &[], false, passes)];

        let suite = runner(FakeFactory::default(), RunnerConfig::default())
            .run_scenarios(&list)
            .await;
        assert_eq!(suite.skipped, 1);
        assert_eq!(suite.results[0].error.as_deref(), Some("disabled by default"));

        let config = RunnerConfig {
            include_disabled: true,
            ..Default::default()
        };
        let suite = runner(FakeFactory::default(), config).run_scenarios(&list).await;
        assert_eq!(suite.passed, 1);
    }

    #[tokio::test]
    async fn test_unselected_prerequisite_does_not_block() {
        let config = RunnerConfig {
            names: vec!["edit".to_string()],
            ..Default::default()
        };
        let list = [
            scenario("add", &[], true, fails),
            scenario("edit", &["add"], true, passes),
        ];

        let suite = runner(FakeFactory::default(), config).run_scenarios(&list).await;

        assert_eq!(suite.total, 1);
        assert_eq!(suite.results[0].name, "edit");
        assert_eq!(suite.results[0].status, ScenarioStatus::Passed);
    }

    #[test]
    fn test_tag_filter() {
        let config = RunnerConfig {
            tags: vec!["openapi".to_string()],
            ..Default::default()
        };
        let suite = runner(FakeFactory::default(), config);
        let selected: Vec<_> = scenarios::all()
            .into_iter()
            .filter(|s| suite.is_selected(s))
            .map(|s| s.name)
            .collect();
        assert_eq!(
            selected,
            vec![
                scenarios::ADD_OPENAPI_SERVICE,
                scenarios::EDIT_OPENAPI_SERVICE,
                scenarios::DELETE_OPENAPI_SERVICE
            ]
        );
    }

    #[test]
    fn test_openapi_urls_required_only_when_openapi_runs() {
        let mut globals = test_globals();
        globals.openapi_url_1.clear();
        globals.openapi_url_2.clear();

        let rest_only =
            SuiteRunner::new(FakeFactory::default(), globals.clone(), RunnerConfig::default());
        rest_only.check_globals().unwrap();

        let config = RunnerConfig {
            include_disabled: true,
            ..Default::default()
        };
        let with_openapi = SuiteRunner::new(FakeFactory::default(), globals, config);
        assert!(matches!(with_openapi.check_globals(), Err(crate::E2eError::Config(_))));
    }

    #[test]
    fn test_write_results() {
        let dir = tempfile::tempdir().unwrap();
        let suite = TestSuiteResult {
            total: 0,
            passed: 0,
            failed: 0,
            skipped: 0,
            duration_ms: 0,
            results: Vec::new(),
        };
        let path = write_results(dir.path(), &suite).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["total"], 0);
        assert!(json["results"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_slug() {
        assert_eq!(
            slug("Security server client add rest service"),
            "security-server-client-add-rest-service"
        );
    }
}
