//! Scenario session: one live browser plus the wait/assert contract
//!
//! Every page object action takes `&mut Session`. Waits poll the driver on
//! the session's clock until the condition holds or the timeout elapses;
//! assertions are point-in-time checks that expect a prior wait. Each call
//! is recorded as a [`StepResult`] for the suite report.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::clock::{self, Clock};
use crate::driver::{Driver, Key};
use crate::error::{E2eError, E2eResult};
use crate::globals::SuiteGlobals;
use crate::locator::Locator;

/// Result of executing a single step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub success: bool,
    pub step_name: String,
    pub duration_ms: u64,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitState {
    Visible,
    NotPresent,
}

impl fmt::Display for WaitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitState::Visible => f.write_str("visible"),
            WaitState::NotPresent => f.write_str("not present"),
        }
    }
}

pub struct Session {
    driver: Box<dyn Driver>,
    clock: Arc<dyn Clock>,
    globals: Arc<SuiteGlobals>,
    wait_timeout: Duration,
    poll_interval: Duration,
    steps: Vec<StepResult>,
    ended: bool,
}

impl Session {
    pub fn new(driver: Box<dyn Driver>, clock: Arc<dyn Clock>, globals: Arc<SuiteGlobals>) -> Self {
        Self {
            wait_timeout: globals.wait_timeout(),
            poll_interval: globals.poll_interval(),
            driver,
            clock,
            globals,
            steps: Vec::new(),
            ended: false,
        }
    }

    pub fn globals(&self) -> Arc<SuiteGlobals> {
        Arc::clone(&self.globals)
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    pub fn steps(&self) -> &[StepResult] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<StepResult> {
        self.steps
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    fn record<T>(&mut self, step_name: String, started: Instant, result: &E2eResult<T>) {
        let duration_ms = self
            .clock
            .now()
            .saturating_duration_since(started)
            .as_millis() as u64;
        match result {
            Ok(_) => debug!("{} ({} ms)", step_name, duration_ms),
            Err(e) => debug!("{} failed: {}", step_name, e),
        }
        self.steps.push(StepResult {
            success: result.is_ok(),
            step_name,
            duration_ms,
            error: result.as_ref().err().map(|e| e.to_string()),
        });
    }

    // Actions

    pub async fn navigate(&mut self, url: &str) -> E2eResult<()> {
        let started = self.clock.now();
        let result = self.driver.navigate(url).await;
        self.record(format!("navigate:{}", url), started, &result);
        result
    }

    pub async fn click(&mut self, locator: &Locator) -> E2eResult<()> {
        let started = self.clock.now();
        let result = self.driver.click(locator).await;
        self.record(format!("click:{}", locator), started, &result);
        result
    }

    /// Clear the field and type `text`; `""` leaves it empty
    pub async fn fill(&mut self, locator: &Locator, text: &str) -> E2eResult<()> {
        let started = self.clock.now();
        let result = self.driver.fill(locator, text).await;
        self.record(format!("fill:{}", locator), started, &result);
        result
    }

    pub async fn hover(&mut self, locator: &Locator) -> E2eResult<()> {
        let started = self.clock.now();
        let result = self.driver.hover(locator).await;
        self.record(format!("hover:{}", locator), started, &result);
        result
    }

    pub async fn press_key(&mut self, key: Key) -> E2eResult<()> {
        let started = self.clock.now();
        let result = self.driver.press_key(key).await;
        self.record(format!("press:{:?}", key), started, &result);
        result
    }

    pub async fn text(&mut self, locator: &Locator) -> E2eResult<String> {
        let started = self.clock.now();
        let result = self.driver.text(locator).await;
        self.record(format!("text:{}", locator), started, &result);
        result
    }

    pub async fn pause(&mut self, duration: Duration) {
        let started = self.clock.now();
        self.clock.sleep(duration).await;
        self.record(format!("pause:{}ms", duration.as_millis()), started, &Ok(()));
    }

    /// Block until `floor` has passed since `since`; returns the time padded
    pub async fn pad_since(&mut self, since: Instant, floor: Duration) -> Duration {
        let wait = clock::remaining(self.clock.as_ref(), since, floor);
        if !wait.is_zero() {
            info!("Waiting {} ms", wait.as_millis());
            self.pause(wait).await;
        }
        wait
    }

    pub async fn screenshot(&mut self) -> E2eResult<Vec<u8>> {
        self.driver.screenshot().await
    }

    /// End the browser session. Safe to call more than once.
    pub async fn end(&mut self) -> E2eResult<()> {
        if self.ended {
            return Ok(());
        }
        self.ended = true;
        let started = self.clock.now();
        let result = self.driver.end().await;
        if let Err(e) = &result {
            warn!("Ending browser session failed: {}", e);
        }
        self.record("end".to_string(), started, &result);
        result
    }

    // Waits

    pub async fn wait_visible(&mut self, locator: &Locator) -> E2eResult<()> {
        self.wait_for(locator, WaitState::Visible, self.wait_timeout).await
    }

    pub async fn wait_visible_for(&mut self, locator: &Locator, timeout: Duration) -> E2eResult<()> {
        self.wait_for(locator, WaitState::Visible, timeout).await
    }

    pub async fn wait_not_present(&mut self, locator: &Locator) -> E2eResult<()> {
        self.wait_for(locator, WaitState::NotPresent, self.wait_timeout).await
    }

    pub async fn wait_for(
        &mut self,
        locator: &Locator,
        state: WaitState,
        timeout: Duration,
    ) -> E2eResult<()> {
        let started = self.clock.now();
        let result = self.poll(locator, state, timeout).await;
        let name = match state {
            WaitState::Visible => format!("wait_visible:{}", locator),
            WaitState::NotPresent => format!("wait_not_present:{}", locator),
        };
        self.record(name, started, &result);
        result
    }

    async fn poll(&mut self, locator: &Locator, state: WaitState, timeout: Duration) -> E2eResult<()> {
        let started = self.clock.now();
        loop {
            let holds = match state {
                WaitState::Visible => self.driver.is_displayed(locator).await?,
                WaitState::NotPresent => !self.driver.is_present(locator).await?,
            };
            if holds {
                return Ok(());
            }

            let elapsed = self.clock.now().saturating_duration_since(started);
            if elapsed >= timeout {
                return Err(E2eError::Timeout {
                    locator: locator.to_string(),
                    state: state.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            self.clock.sleep(self.poll_interval.min(timeout - elapsed)).await;
        }
    }

    // Assertions

    pub async fn assert_contains_text(&mut self, locator: &Locator, expected: &str) -> E2eResult<()> {
        let started = self.clock.now();
        let result = match self.driver.text(locator).await {
            Ok(actual) if actual.contains(expected) => Ok(()),
            Ok(actual) => Err(E2eError::assertion(
                locator,
                format!("text containing {:?}", expected),
                format!("{:?}", actual),
            )),
            Err(e) => Err(e),
        };
        self.record(format!("assert_contains_text:{}", locator), started, &result);
        result
    }

    pub async fn expect_text_equals(&mut self, locator: &Locator, expected: &str) -> E2eResult<()> {
        let started = self.clock.now();
        let result = match self.driver.text(locator).await {
            Ok(actual) if actual.trim() == expected => Ok(()),
            Ok(actual) => Err(E2eError::assertion(
                locator,
                format!("text {:?}", expected),
                format!("{:?}", actual),
            )),
            Err(e) => Err(e),
        };
        self.record(format!("expect_text_equals:{}", locator), started, &result);
        result
    }

    pub async fn expect_text_not_contains(&mut self, locator: &Locator, unexpected: &str) -> E2eResult<()> {
        let started = self.clock.now();
        let result = match self.driver.text(locator).await {
            Ok(actual) if !actual.contains(unexpected) => Ok(()),
            Ok(actual) => Err(E2eError::assertion(
                locator,
                format!("text without {:?}", unexpected),
                format!("{:?}", actual),
            )),
            Err(e) => Err(e),
        };
        self.record(format!("expect_text_not_contains:{}", locator), started, &result);
        result
    }

    pub async fn assert_value(&mut self, locator: &Locator, expected: &str) -> E2eResult<()> {
        let started = self.clock.now();
        let result = match self.driver.value(locator).await {
            Ok(actual) if actual == expected => Ok(()),
            Ok(actual) => Err(E2eError::assertion(
                locator,
                format!("value {:?}", expected),
                format!("{:?}", actual),
            )),
            Err(e) => Err(e),
        };
        self.record(format!("assert_value:{}", locator), started, &result);
        result
    }

    pub async fn assert_value_contains(&mut self, locator: &Locator, expected: &str) -> E2eResult<()> {
        let started = self.clock.now();
        let result = match self.driver.value(locator).await {
            Ok(actual) if actual.contains(expected) => Ok(()),
            Ok(actual) => Err(E2eError::assertion(
                locator,
                format!("value containing {:?}", expected),
                format!("{:?}", actual),
            )),
            Err(e) => Err(e),
        };
        self.record(format!("assert_value_contains:{}", locator), started, &result);
        result
    }

    pub async fn expect_selected(&mut self, locator: &Locator, selected: bool) -> E2eResult<()> {
        let started = self.clock.now();
        let result = match self.driver.is_selected(locator).await {
            Ok(actual) if actual == selected => Ok(()),
            Ok(actual) => Err(E2eError::assertion(
                locator,
                if selected { "selected" } else { "not selected" },
                if actual { "selected" } else { "not selected" },
            )),
            Err(e) => Err(e),
        };
        self.record(format!("expect_selected:{}", locator), started, &result);
        result
    }

    pub async fn expect_enabled(&mut self, locator: &Locator, enabled: bool) -> E2eResult<()> {
        let started = self.clock.now();
        let result = match self.driver.is_enabled(locator).await {
            Ok(actual) if actual == enabled => Ok(()),
            Ok(actual) => Err(E2eError::assertion(
                locator,
                if enabled { "enabled" } else { "disabled" },
                if actual { "enabled" } else { "disabled" },
            )),
            Err(e) => Err(e),
        };
        self.record(format!("expect_enabled:{}", locator), started, &result);
        result
    }

    /// Visible and showing exactly `expected`
    pub async fn expect_visible_text(&mut self, locator: &Locator, expected: &str) -> E2eResult<()> {
        self.wait_visible(locator).await?;
        self.expect_text_equals(locator, expected).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::globals::test_globals;
    use crate::testing::{FakeDriver, FakeElement};

    fn session(driver: &FakeDriver, clock: &ManualClock) -> Session {
        Session::new(
            Box::new(driver.clone()),
            Arc::new(clock.clone()),
            Arc::new(test_globals()),
        )
    }

    #[tokio::test]
    async fn test_wait_visible_polls_until_shown() {
        let driver = FakeDriver::new();
        let loc = Locator::xpath("//*[@id=\"app\"]");
        driver.insert(&loc, FakeElement::visible("").shown_after(3));
        let clock = ManualClock::new();
        let mut s = session(&driver, &clock);

        s.wait_visible(&loc).await.unwrap();
        assert_eq!(clock.elapsed(), Duration::from_millis(1500));
        assert!(s.steps().last().unwrap().success);
    }

    #[tokio::test]
    async fn test_wait_visible_times_out_naming_locator() {
        let driver = FakeDriver::new();
        let clock = ManualClock::new();
        let mut s = session(&driver, &clock);
        let loc = Locator::xpath("//*[@data-test=\"missing\"]");

        let err = s.wait_visible(&loc).await.unwrap_err();
        match err {
            E2eError::Timeout { locator, timeout_ms, .. } => {
                assert!(locator.contains("missing"));
                assert_eq!(timeout_ms, 10_000);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(clock.elapsed(), Duration::from_secs(10));
        assert!(!s.steps().last().unwrap().success);
    }

    #[tokio::test]
    async fn test_wait_not_present_after_removal() {
        let driver = FakeDriver::new();
        let loc = Locator::css(".v-snack");
        driver.insert(&loc, FakeElement::visible("REST service added").gone_after(2));
        let clock = ManualClock::new();
        let mut s = session(&driver, &clock);

        s.wait_not_present(&loc).await.unwrap();
        assert_eq!(clock.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_contains_text_reports_actual() {
        let driver = FakeDriver::new();
        let loc = Locator::css(".snack");
        driver.insert(&loc, FakeElement::visible("Validation failure"));
        let clock = ManualClock::new();
        let mut s = session(&driver, &clock);

        s.assert_contains_text(&loc, "Validation").await.unwrap();
        let err = s.assert_contains_text(&loc, "REST service added").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("css:.snack"));
        assert!(msg.contains("Validation failure"));
    }

    #[tokio::test]
    async fn test_value_and_selection_checks() {
        let driver = FakeDriver::new();
        let url = Locator::css("input[name=url]");
        let radio = Locator::css("input[value=REST]");
        driver.insert(&url, FakeElement::input("https://www.niis.org/nosuch2/"));
        driver.insert(&radio, FakeElement::input("").selected(true));
        let clock = ManualClock::new();
        let mut s = session(&driver, &clock);

        s.assert_value_contains(&url, "nosuch2").await.unwrap();
        assert!(s.assert_value(&url, "").await.is_err());
        s.expect_selected(&radio, true).await.unwrap();
        assert!(s.expect_selected(&radio, false).await.is_err());
    }

    #[tokio::test]
    async fn test_pad_since_fills_refresh_window() {
        let driver = FakeDriver::new();
        let clock = ManualClock::new();
        let mut s = session(&driver, &clock);

        let start = s.now();
        clock.advance(Duration::from_secs(25));
        let padded = s.pad_since(start, Duration::from_secs(60)).await;
        assert_eq!(padded, Duration::from_secs(35));
        assert_eq!(clock.elapsed(), Duration::from_secs(60));

        let padded = s.pad_since(start, Duration::from_secs(60)).await;
        assert_eq!(padded, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_end_is_idempotent() {
        let driver = FakeDriver::new();
        let clock = ManualClock::new();
        let mut s = session(&driver, &clock);

        s.end().await.unwrap();
        s.end().await.unwrap();
        assert!(s.is_ended());
        assert_eq!(driver.actions().iter().filter(|a| *a == "end").count(), 1);
    }
}
