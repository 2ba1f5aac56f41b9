//! Browser driver capability
//!
//! The suite never talks to a browser directly. Every page object action
//! goes through a [`Driver`] owned by the scenario's
//! [`Session`](crate::session::Session).

use async_trait::async_trait;

use crate::error::E2eResult;
use crate::locator::Locator;

/// Keys the scenarios press outside of text entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
}

impl Key {
    /// WebDriver key code point
    pub fn code_point(&self) -> char {
        match self {
            Key::Escape => '\u{E00C}',
        }
    }
}

/// Primitives a browser automation backend has to provide.
///
/// Lookups resolve to the first element matching the locator. Checks
/// (`is_displayed`, `is_present`) never fail for a missing element; they
/// answer `false`.
#[async_trait]
pub trait Driver: Send {
    async fn navigate(&mut self, url: &str) -> E2eResult<()>;

    async fn click(&mut self, locator: &Locator) -> E2eResult<()>;

    /// Replace the field's content with `text`. An empty `text` leaves the
    /// field empty but still fires the input events validation hangs on.
    async fn fill(&mut self, locator: &Locator, text: &str) -> E2eResult<()>;

    async fn text(&mut self, locator: &Locator) -> E2eResult<String>;

    async fn value(&mut self, locator: &Locator) -> E2eResult<String>;

    async fn is_present(&mut self, locator: &Locator) -> E2eResult<bool>;

    async fn is_displayed(&mut self, locator: &Locator) -> E2eResult<bool>;

    async fn is_selected(&mut self, locator: &Locator) -> E2eResult<bool>;

    async fn is_enabled(&mut self, locator: &Locator) -> E2eResult<bool>;

    async fn hover(&mut self, locator: &Locator) -> E2eResult<()>;

    async fn press_key(&mut self, key: Key) -> E2eResult<()>;

    /// PNG bytes of the current viewport
    async fn screenshot(&mut self) -> E2eResult<Vec<u8>>;

    async fn end(&mut self) -> E2eResult<()>;
}

/// Opens a fresh browser session per scenario
#[async_trait]
pub trait DriverFactory: Send + Sync {
    async fn connect(&self) -> E2eResult<Box<dyn Driver>>;
}
