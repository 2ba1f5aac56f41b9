//! Security server console E2E suite
//!
//! Drives the client services views of the security server admin console
//! through a W3C WebDriver endpoint:
//! - Page objects describe the console's views and dialogs as typed locators
//! - Scenarios exercise REST and OpenAPI service descriptions end to end
//! - The runner executes scenarios in order, skipping dependents of failures
//! - A chromedriver/geckodriver process can be spawned on demand
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SuiteRunner<F: DriverFactory>            │
//! │    ├── run_all() -> TestSuiteResult                         │
//! │    ├── run_scenario(&Scenario) -> ScenarioResult            │
//! │    └── write_results() -> test-results.json                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Scenario (registry)                                        │
//! │    ├── name, tags, requires, enabled_by_default             │
//! │    └── run: fn(&mut Session) -> BoxFuture<E2eResult<()>>    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Session                                                    │
//! │    ├── actions: navigate, click, fill, hover, press_key     │
//! │    ├── waits: wait_visible, wait_not_present (Clock-driven) │
//! │    └── assertions: text, value, selected, enabled           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Driver (trait)                                             │
//! │    └── WebDriverClient ── HTTP ──> DriverService process    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod clock;
pub mod driver;
pub mod error;
pub mod globals;
pub mod locator;
pub mod messages;
pub mod model;
pub mod pages;
pub mod runner;
pub mod scenarios;
pub mod service;
pub mod session;
pub mod validation;
pub mod webdriver;

#[cfg(test)]
mod testing;

pub use error::{E2eError, E2eResult};
pub use globals::SuiteGlobals;
pub use runner::{RunnerConfig, ScenarioResult, ScenarioStatus, SuiteRunner, TestSuiteResult};
pub use scenarios::Scenario;
pub use service::{DriverService, DriverServiceConfig};
pub use session::Session;
pub use webdriver::{Browser, WebDriverConfig, WebDriverFactory};
