//! Driver service management - spawning and health checking chromedriver/geckodriver

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{E2eError, E2eResult};
use crate::webdriver::Browser;

/// Handle to a running WebDriver service process
pub struct DriverService {
    child: Child,
    pub url: String,
    pub port: u16,
}

impl DriverService {
    /// Spawn the WebDriver service for the configured browser
    pub async fn spawn(config: DriverServiceConfig) -> E2eResult<Self> {
        let port = match config.port {
            Some(port) => port,
            None => find_free_port()?,
        };
        let url = format!("http://127.0.0.1:{}", port);
        let binary = config
            .binary_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(config.browser.driver_binary()));

        info!("Spawning {} on port {}", binary.display(), port);

        let mut cmd = Command::new(&binary);
        match config.browser {
            Browser::Chromium => {
                cmd.arg(format!("--port={}", port));
            }
            Browser::Firefox => {
                cmd.args(["--port", &port.to_string()]);
            }
        }

        cmd.stdout(Stdio::null()).stderr(Stdio::null());

        let child = cmd.spawn().map_err(|e| {
            E2eError::ServiceStartup(format!("Failed to spawn {}: {}", binary.display(), e))
        })?;

        let handle = DriverService {
            child,
            url: url.clone(),
            port,
        };

        handle.wait_for_ready(config.startup_timeout).await?;

        info!("Driver service is ready at {}", url);
        Ok(handle)
    }

    /// Poll `/status` until the service reports it accepts sessions
    async fn wait_for_ready(&self, timeout_duration: Duration) -> E2eResult<()> {
        let status_url = format!("{}/status", self.url);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let start = std::time::Instant::now();
        let mut attempts = 0;

        while start.elapsed() < timeout_duration {
            attempts += 1;

            match client.get(&status_url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    let body: serde_json::Value = resp.json().await?;
                    if is_ready(&body) {
                        return Ok(());
                    }
                }
                Ok(resp) => {
                    warn!("Status check returned {}", resp.status());
                }
                Err(e) => {
                    if attempts == 1 {
                        info!("Waiting for driver service to start...");
                    }
                    // Connection refused is expected while the service is starting
                    if !e.is_connect() {
                        warn!("Status check error: {}", e);
                    }
                }
            }

            sleep(Duration::from_millis(100)).await;
        }

        Err(E2eError::ServiceHealthCheck(attempts))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Stop the service
    pub fn stop(&mut self) -> E2eResult<()> {
        // Already reaped
        if let Ok(Some(_)) = self.child.try_wait() {
            return Ok(());
        }
        info!("Stopping driver service (pid: {})", self.child.id());

        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(self.child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                std::thread::sleep(Duration::from_millis(200));
            }
        }

        // Force kill if still running
        let _ = self.child.kill();
        let _ = self.child.wait();

        Ok(())
    }
}

impl Drop for DriverService {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

fn is_ready(status: &serde_json::Value) -> bool {
    status["value"]["ready"].as_bool().unwrap_or(false)
}

/// Configuration for spawning a driver service
#[derive(Debug, Clone)]
pub struct DriverServiceConfig {
    pub browser: Browser,

    /// Path to the driver executable (None = look up the browser's default on PATH)
    pub binary_path: Option<PathBuf>,

    /// Port to listen on (None = find free port)
    pub port: Option<u16>,

    pub startup_timeout: Duration,
}

impl Default for DriverServiceConfig {
    fn default() -> Self {
        Self {
            browser: Browser::Chromium,
            binary_path: None,
            port: None,
            startup_timeout: Duration::from_secs(30),
        }
    }
}

/// Find a free port to use
fn find_free_port() -> E2eResult<u16> {
    use std::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_free_port() {
        let port = find_free_port().unwrap();
        assert!(port > 1024);
    }

    #[test]
    fn test_ready_status() {
        let ready = serde_json::json!({ "value": { "ready": true, "message": "ChromeDriver ready" } });
        let busy = serde_json::json!({ "value": { "ready": false } });
        assert!(is_ready(&ready));
        assert!(!is_ready(&busy));
        assert!(!is_ready(&serde_json::json!({})));
    }

    #[tokio::test]
    async fn test_missing_binary_fails_startup() {
        let config = DriverServiceConfig {
            binary_path: Some(PathBuf::from("/nonexistent/chromedriver")),
            startup_timeout: Duration::from_millis(100),
            ..Default::default()
        };
        match DriverService::spawn(config).await {
            Err(E2eError::ServiceStartup(msg)) => assert!(msg.contains("/nonexistent/chromedriver")),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("spawn of a missing binary succeeded"),
        }
    }
}
