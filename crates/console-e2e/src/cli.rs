//! Command line of the suite binary
//!
//! The suite is a `harness = false` test target, so `cargo test` hands it
//! the same arguments it hands libtest targets. Those are accepted here and
//! kept apart from the suite's own options.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser};

use crate::error::E2eResult;
use crate::runner::RunnerConfig;
use crate::webdriver::{Browser, WebDriverConfig};

#[derive(Parser, Debug)]
#[command(name = "ss-console-e2e")]
#[command(about = "E2E suite for the security server client services views")]
pub struct SuiteArgs {
    /// Suite globals (console URL, credentials, fixture URLs)
    #[arg(short, long, env = "SS_CONSOLE_E2E_GLOBALS")]
    pub globals: Option<PathBuf>,

    /// WebDriver endpoint to use instead of spawning a driver
    #[arg(long, env = "SS_CONSOLE_E2E_WEBDRIVER_URL")]
    pub webdriver_url: Option<String>,

    /// Driver executable to spawn (default: chromedriver or geckodriver on PATH)
    #[arg(long)]
    pub webdriver_binary: Option<PathBuf>,

    /// Browser to use (chromium, firefox)
    #[arg(long, default_value = "chromium")]
    pub browser: String,

    /// Run the browser headless (--headless false shows the window)
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub headless: bool,

    /// Viewport width
    #[arg(long, default_value = "1280")]
    pub viewport_width: u32,

    /// Viewport height
    #[arg(long, default_value = "720")]
    pub viewport_height: u32,

    /// Run only scenarios carrying this tag
    #[arg(short, long)]
    pub tag: Vec<String>,

    /// Run only the scenario with this name
    #[arg(short, long)]
    pub name: Vec<String>,

    /// Also run scenarios that are disabled by default
    #[arg(long)]
    pub include_disabled: bool,

    /// Do not save a screenshot when a scenario fails
    #[arg(long)]
    pub no_screenshots: bool,

    /// Output directory for results
    #[arg(short, long, default_value = "test-results")]
    pub output: PathBuf,

    #[command(flatten)]
    pub libtest: LibtestArgs,
}

/// Arguments cargo forwards to every test target
#[derive(Args, Debug, Default)]
pub struct LibtestArgs {
    /// Test name filters
    #[arg(hide = true)]
    pub filters: Vec<String>,

    #[arg(long, hide = true)]
    pub nocapture: bool,

    #[arg(long, hide = true)]
    pub show_output: bool,

    #[arg(short, long, hide = true)]
    pub quiet: bool,

    #[arg(long, hide = true)]
    pub exact: bool,

    #[arg(long, hide = true)]
    pub ignored: bool,

    #[arg(long, hide = true)]
    pub include_ignored: bool,

    #[arg(long, hide = true)]
    pub list: bool,

    #[arg(long, hide = true)]
    pub test_threads: Option<String>,

    #[arg(long, hide = true)]
    pub format: Option<String>,

    #[arg(long, hide = true)]
    pub color: Option<String>,

    #[arg(long, hide = true)]
    pub skip: Vec<String>,
}

impl SuiteArgs {
    /// A libtest name filter or listing targets unit tests, not the browser suite
    pub fn targets_unit_tests(&self) -> bool {
        !self.libtest.filters.is_empty() || self.libtest.list
    }

    pub fn webdriver_config(&self, url: String) -> E2eResult<WebDriverConfig> {
        let browser: Browser = self.browser.parse()?;
        Ok(WebDriverConfig {
            url,
            browser,
            headless: self.headless,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            request_timeout: Duration::from_secs(30),
        })
    }

    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            output_dir: self.output.clone(),
            screenshot_on_failure: !self.no_screenshots,
            tags: self.tag.clone(),
            names: self.name.clone(),
            include_disabled: self.include_disabled,
        }
    }
}
