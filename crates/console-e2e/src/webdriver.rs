//! W3C WebDriver client
//!
//! Speaks the WebDriver HTTP protocol to a local `chromedriver` or
//! `geckodriver` (see [`crate::service`]) or to a remote grid.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::driver::{Driver, DriverFactory, Key};
use crate::error::{E2eError, E2eResult};
use crate::locator::Locator;

/// Web element reference key defined by the W3C spec
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Control+A, release modifiers, Backspace
const CLEAR_KEYS: &str = "\u{E009}a\u{E000}\u{E003}";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
}

impl Browser {
    fn browser_name(&self) -> &'static str {
        match self {
            Browser::Chromium => "chrome",
            Browser::Firefox => "firefox",
        }
    }

    /// Default driver executable for this browser
    pub fn driver_binary(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromedriver",
            Browser::Firefox => "geckodriver",
        }
    }
}

impl std::str::FromStr for Browser {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chromium" | "chrome" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            other => Err(E2eError::Config(format!("unsupported browser: {}", other))),
        }
    }
}

/// Configuration for WebDriver sessions
#[derive(Debug, Clone)]
pub struct WebDriverConfig {
    /// Base URL of the WebDriver endpoint
    pub url: String,
    pub browser: Browser,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub request_timeout: Duration,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:9515".to_string(),
            browser: Browser::Chromium,
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl WebDriverConfig {
    /// New-session payload for the configured browser
    pub fn capabilities(&self) -> Value {
        let browser_options = match self.browser {
            Browser::Chromium => {
                let mut args = vec![format!(
                    "--window-size={},{}",
                    self.viewport_width, self.viewport_height
                )];
                if self.headless {
                    args.push("--headless=new".to_string());
                }
                json!({ "goog:chromeOptions": { "args": args } })
            }
            Browser::Firefox => {
                let mut args = vec![
                    format!("--width={}", self.viewport_width),
                    format!("--height={}", self.viewport_height),
                ];
                if self.headless {
                    args.push("-headless".to_string());
                }
                json!({ "moz:firefoxOptions": { "args": args } })
            }
        };

        let mut always_match = json!({
            "browserName": self.browser.browser_name(),
            // The console runs behind a self-signed certificate
            "acceptInsecureCerts": true,
        });
        if let (Some(target), Some(extra)) = (always_match.as_object_mut(), browser_options.as_object()) {
            target.extend(extra.clone());
        }

        json!({ "capabilities": { "alwaysMatch": always_match } })
    }
}

/// A live WebDriver session
pub struct WebDriverClient {
    http: reqwest::Client,
    base_url: String,
    session_id: String,
}

impl WebDriverClient {
    pub async fn new_session(config: &WebDriverConfig) -> E2eResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let base_url = config.url.trim_end_matches('/').to_string();

        let response = http
            .post(format!("{}/session", base_url))
            .json(&config.capabilities())
            .send()
            .await?;
        let ok = response.status().is_success();
        let value = unwrap_value(ok, response.json().await?)?;

        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| E2eError::Protocol(format!("new session without id: {}", value)))?
            .to_string();

        info!("Started {:?} session {}", config.browser, session_id);
        Ok(Self {
            http,
            base_url,
            session_id,
        })
    }

    async fn command(&self, method: Method, path: &str, body: Option<Value>) -> E2eResult<Value> {
        let url = format!("{}/session/{}{}", self.base_url, self.session_id, path);
        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await?;
        let ok = response.status().is_success();
        unwrap_value(ok, response.json().await?)
    }

    async fn find_all(&self, locator: &Locator) -> E2eResult<Vec<String>> {
        let body = json!({
            "using": locator.strategy().webdriver_name(),
            "value": locator.value(),
        });
        let value = self.command(Method::POST, "/elements", Some(body)).await?;
        let elements = value
            .as_array()
            .ok_or_else(|| E2eError::Protocol(format!("elements is not an array: {}", value)))?;
        Ok(elements.iter().filter_map(element_id).collect())
    }

    async fn find(&self, locator: &Locator) -> E2eResult<String> {
        self.find_all(locator)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| E2eError::ElementNotFound(locator.to_string()))
    }

    async fn element_get(&self, locator: &Locator, property: &str) -> E2eResult<Value> {
        let id = self.find(locator).await?;
        self.command(Method::GET, &format!("/element/{}/{}", id, property), None)
            .await
    }

    async fn element_flag(&self, locator: &Locator, property: &str) -> E2eResult<bool> {
        let value = self.element_get(locator, property).await?;
        value
            .as_bool()
            .ok_or_else(|| E2eError::Protocol(format!("{} is not a boolean: {}", property, value)))
    }

    async fn perform_actions(&self, actions: Value) -> E2eResult<()> {
        self.command(Method::POST, "/actions", Some(json!({ "actions": [actions] })))
            .await?;
        self.command(Method::DELETE, "/actions", None).await?;
        Ok(())
    }
}

/// Take the `value` member of a response, mapping error payloads
fn unwrap_value(ok: bool, payload: Value) -> E2eResult<Value> {
    let value = payload.get("value").cloned().unwrap_or(Value::Null);
    if ok {
        return Ok(value);
    }
    let error = value
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Err(E2eError::WebDriver { error, message })
}

fn element_id(reference: &Value) -> Option<String> {
    reference
        .get(ELEMENT_KEY)
        .and_then(Value::as_str)
        .map(String::from)
}

fn is_stale(err: &E2eError) -> bool {
    matches!(err, E2eError::WebDriver { error, .. } if error == "stale element reference")
}

#[async_trait]
impl Driver for WebDriverClient {
    async fn navigate(&mut self, url: &str) -> E2eResult<()> {
        self.command(Method::POST, "/url", Some(json!({ "url": url })))
            .await?;
        Ok(())
    }

    async fn click(&mut self, locator: &Locator) -> E2eResult<()> {
        let id = self.find(locator).await?;
        self.command(Method::POST, &format!("/element/{}/click", id), Some(json!({})))
            .await?;
        Ok(())
    }

    async fn fill(&mut self, locator: &Locator, text: &str) -> E2eResult<()> {
        let id = self.find(locator).await?;
        // Key-based clearing fires the input events the form validation listens to
        let keys = format!("{}{}", CLEAR_KEYS, text);
        self.command(
            Method::POST,
            &format!("/element/{}/value", id),
            Some(json!({ "text": keys })),
        )
        .await?;
        Ok(())
    }

    async fn text(&mut self, locator: &Locator) -> E2eResult<String> {
        let value = self.element_get(locator, "text").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn value(&mut self, locator: &Locator) -> E2eResult<String> {
        let value = self.element_get(locator, "property/value").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn is_present(&mut self, locator: &Locator) -> E2eResult<bool> {
        Ok(!self.find_all(locator).await?.is_empty())
    }

    async fn is_displayed(&mut self, locator: &Locator) -> E2eResult<bool> {
        let Some(id) = self.find_all(locator).await?.into_iter().next() else {
            return Ok(false);
        };
        match self
            .command(Method::GET, &format!("/element/{}/displayed", id), None)
            .await
        {
            Ok(value) => Ok(value.as_bool().unwrap_or(false)),
            // Re-rendered between lookup and display check
            Err(e) if is_stale(&e) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn is_selected(&mut self, locator: &Locator) -> E2eResult<bool> {
        self.element_flag(locator, "selected").await
    }

    async fn is_enabled(&mut self, locator: &Locator) -> E2eResult<bool> {
        self.element_flag(locator, "enabled").await
    }

    async fn hover(&mut self, locator: &Locator) -> E2eResult<()> {
        let id = self.find(locator).await?;
        debug!("Moving pointer to {}", locator);
        self.perform_actions(json!({
            "type": "pointer",
            "id": "mouse",
            "parameters": { "pointerType": "mouse" },
            "actions": [{
                "type": "pointerMove",
                "duration": 0,
                "origin": { ELEMENT_KEY: id },
                "x": 0,
                "y": 0,
            }],
        }))
        .await
    }

    async fn press_key(&mut self, key: Key) -> E2eResult<()> {
        let code = key.code_point().to_string();
        self.perform_actions(json!({
            "type": "key",
            "id": "keyboard",
            "actions": [
                { "type": "keyDown", "value": code },
                { "type": "keyUp", "value": code },
            ],
        }))
        .await
    }

    async fn screenshot(&mut self) -> E2eResult<Vec<u8>> {
        let value = self.command(Method::GET, "/screenshot", None).await?;
        let encoded = value
            .as_str()
            .ok_or_else(|| E2eError::Protocol("screenshot is not a string".to_string()))?;
        Ok(STANDARD.decode(encoded)?)
    }

    async fn end(&mut self) -> E2eResult<()> {
        debug!("Deleting session {}", self.session_id);
        self.command(Method::DELETE, "", None).await?;
        Ok(())
    }
}

/// Opens a new WebDriver session for every scenario
#[derive(Debug, Clone)]
pub struct WebDriverFactory {
    pub config: WebDriverConfig,
}

#[async_trait]
impl DriverFactory for WebDriverFactory {
    async fn connect(&self) -> E2eResult<Box<dyn Driver>> {
        Ok(Box::new(WebDriverClient::new_session(&self.config).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chromium_capabilities() {
        let caps = WebDriverConfig::default().capabilities();
        let always = &caps["capabilities"]["alwaysMatch"];
        assert_eq!(always["browserName"], "chrome");
        assert_eq!(always["acceptInsecureCerts"], true);
        let args = always["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args.contains(&json!("--headless=new")));
        assert!(args.contains(&json!("--window-size=1280,720")));
    }

    #[test]
    fn test_headful_firefox_capabilities() {
        let config = WebDriverConfig {
            browser: Browser::Firefox,
            headless: false,
            ..Default::default()
        };
        let caps = config.capabilities();
        let args = caps["capabilities"]["alwaysMatch"]["moz:firefoxOptions"]["args"]
            .as_array()
            .unwrap();
        assert!(!args.contains(&json!("-headless")));
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_error_payload_maps_to_webdriver_error() {
        let payload = json!({
            "value": { "error": "no such element", "message": "Unable to locate element" }
        });
        match unwrap_value(false, payload).unwrap_err() {
            E2eError::WebDriver { error, message } => {
                assert_eq!(error, "no such element");
                assert_eq!(message, "Unable to locate element");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_element_reference_parsing() {
        let value = json!([{ ELEMENT_KEY: "abc-123" }, { "other": "x" }]);
        let ids: Vec<String> = value.as_array().unwrap().iter().filter_map(element_id).collect();
        assert_eq!(ids, vec!["abc-123".to_string()]);
    }

    #[test]
    fn test_browser_from_str() {
        assert_eq!("chrome".parse::<Browser>().unwrap(), Browser::Chromium);
        assert_eq!("firefox".parse::<Browser>().unwrap().driver_binary(), "geckodriver");
        assert!("webkit".parse::<Browser>().is_err());
    }
}
