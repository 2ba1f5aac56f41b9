//! Scripted in-memory driver for unit tests

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::clock::ManualClock;
use crate::driver::{Driver, DriverFactory, Key};
use crate::error::{E2eError, E2eResult};
use crate::globals::test_globals;
use crate::locator::Locator;
use crate::session::Session;

#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    pub text: String,
    pub value: String,
    pub displayed: bool,
    pub selected: bool,
    pub enabled: bool,
    /// Lookups that still report the element as missing
    shown_after: u32,
    /// Lookups after which the element is gone
    gone_after: Option<u32>,
}

impl FakeElement {
    pub fn visible(text: &str) -> Self {
        Self {
            text: text.to_string(),
            displayed: true,
            enabled: true,
            ..Default::default()
        }
    }

    pub fn input(value: &str) -> Self {
        Self {
            value: value.to_string(),
            displayed: true,
            enabled: true,
            ..Default::default()
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn shown_after(mut self, lookups: u32) -> Self {
        self.shown_after = lookups;
        self
    }

    pub fn gone_after(mut self, lookups: u32) -> Self {
        self.gone_after = Some(lookups);
        self
    }
}

/// Page change applied when an action is performed
#[derive(Debug, Clone)]
struct Reaction {
    trigger: String,
    /// Only on this occurrence of the trigger (1-based)
    nth: Option<u32>,
    target: String,
    /// `None` removes the target
    element: Option<FakeElement>,
}

#[derive(Debug, Default)]
struct FakeState {
    elements: HashMap<String, FakeElement>,
    lookups: HashMap<String, u32>,
    actions: Vec<String>,
    timeline: Vec<(Duration, String)>,
    reactions: Vec<Reaction>,
    triggered: HashMap<String, u32>,
}

impl FakeState {
    fn perform(&mut self, action: String, at: Duration) {
        let count = self.triggered.entry(action.clone()).or_insert(0);
        *count += 1;
        let count = *count;

        let fired: Vec<Reaction> = self
            .reactions
            .iter()
            .filter(|r| r.trigger == action && r.nth.map(|n| n == count).unwrap_or(true))
            .cloned()
            .collect();
        for reaction in fired {
            self.lookups.remove(&reaction.target);
            match reaction.element {
                Some(element) => {
                    self.elements.insert(reaction.target, element);
                }
                None => {
                    self.elements.remove(&reaction.target);
                }
            }
        }

        self.timeline.push((at, action.clone()));
        self.actions.push(action);
    }

    fn lookup(&mut self, locator: &Locator) -> Option<&FakeElement> {
        let key = locator.value().to_string();
        let count = self.lookups.entry(key.clone()).or_insert(0);
        *count += 1;
        let count = *count;
        let element = self.elements.get(&key)?;
        if count <= element.shown_after {
            return None;
        }
        if element.gone_after.map(|n| count > n).unwrap_or(false) {
            return None;
        }
        Some(element)
    }

    fn get(&self, locator: &Locator) -> E2eResult<&FakeElement> {
        self.elements
            .get(locator.value())
            .ok_or_else(|| E2eError::ElementNotFound(locator.to_string()))
    }
}

/// Cloning shares the scripted page, so a test keeps a handle after boxing
#[derive(Debug, Clone, Default)]
pub struct FakeDriver {
    state: Arc<Mutex<FakeState>>,
    clock: Option<ManualClock>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp every action with the fake time of `clock`
    pub fn with_clock(clock: &ManualClock) -> Self {
        Self {
            clock: Some(clock.clone()),
            ..Self::default()
        }
    }

    pub fn insert(&self, locator: &Locator, element: FakeElement) {
        self.state
            .lock()
            .elements
            .insert(locator.value().to_string(), element);
    }

    /// Replace (or with `None` remove) `target` on every click of `trigger`
    pub fn on_click(&self, trigger: &Locator, target: &Locator, element: Option<FakeElement>) {
        self.react(format!("click:{}", trigger.value()), None, target, element);
    }

    /// Like [`FakeDriver::on_click`], on the `nth` click only (1-based)
    pub fn on_nth_click(
        &self,
        trigger: &Locator,
        nth: u32,
        target: &Locator,
        element: Option<FakeElement>,
    ) {
        self.react(format!("click:{}", trigger.value()), Some(nth), target, element);
    }

    /// Replace `target` whenever `input` is filled with exactly `text`
    pub fn on_fill(&self, input: &Locator, text: &str, target: &Locator, element: Option<FakeElement>) {
        self.react(format!("fill:{}={}", input.value(), text), None, target, element);
    }

    fn react(&self, trigger: String, nth: Option<u32>, target: &Locator, element: Option<FakeElement>) {
        self.state.lock().reactions.push(Reaction {
            trigger,
            nth,
            target: target.value().to_string(),
            element,
        });
    }

    pub fn actions(&self) -> Vec<String> {
        self.state.lock().actions.clone()
    }

    /// Actions with the fake time they happened at
    pub fn timeline(&self) -> Vec<(Duration, String)> {
        self.state.lock().timeline.clone()
    }

    fn log(&self, action: String) {
        let at = self.clock.as_ref().map(ManualClock::elapsed).unwrap_or_default();
        self.state.lock().perform(action, at);
    }
}

/// Session over `driver` with the example globals
pub fn session(driver: &FakeDriver, clock: &ManualClock) -> Session {
    Session::new(
        Box::new(driver.clone()),
        Arc::new(clock.clone()),
        Arc::new(test_globals()),
    )
}

#[async_trait]
impl Driver for FakeDriver {
    async fn navigate(&mut self, url: &str) -> E2eResult<()> {
        self.log(format!("navigate:{}", url));
        Ok(())
    }

    async fn click(&mut self, locator: &Locator) -> E2eResult<()> {
        self.log(format!("click:{}", locator.value()));
        Ok(())
    }

    async fn fill(&mut self, locator: &Locator, text: &str) -> E2eResult<()> {
        self.state
            .lock()
            .elements
            .entry(locator.value().to_string())
            .or_insert_with(|| FakeElement::input(""))
            .value = text.to_string();
        self.log(format!("fill:{}={}", locator.value(), text));
        Ok(())
    }

    async fn text(&mut self, locator: &Locator) -> E2eResult<String> {
        Ok(self.state.lock().get(locator)?.text.clone())
    }

    async fn value(&mut self, locator: &Locator) -> E2eResult<String> {
        Ok(self.state.lock().get(locator)?.value.clone())
    }

    async fn is_present(&mut self, locator: &Locator) -> E2eResult<bool> {
        Ok(self.state.lock().lookup(locator).is_some())
    }

    async fn is_displayed(&mut self, locator: &Locator) -> E2eResult<bool> {
        Ok(self
            .state
            .lock()
            .lookup(locator)
            .map(|e| e.displayed)
            .unwrap_or(false))
    }

    async fn is_selected(&mut self, locator: &Locator) -> E2eResult<bool> {
        Ok(self.state.lock().get(locator)?.selected)
    }

    async fn is_enabled(&mut self, locator: &Locator) -> E2eResult<bool> {
        Ok(self.state.lock().get(locator)?.enabled)
    }

    async fn hover(&mut self, locator: &Locator) -> E2eResult<()> {
        self.log(format!("hover:{}", locator.value()));
        Ok(())
    }

    async fn press_key(&mut self, key: Key) -> E2eResult<()> {
        self.log(format!("press:{:?}", key));
        Ok(())
    }

    async fn screenshot(&mut self) -> E2eResult<Vec<u8>> {
        self.log("screenshot".to_string());
        Ok(b"\x89PNG fake".to_vec())
    }

    async fn end(&mut self) -> E2eResult<()> {
        self.log("end".to_string());
        Ok(())
    }
}

/// Hands out drivers sharing one scripted page
#[derive(Debug, Clone, Default)]
pub struct FakeFactory {
    pub driver: FakeDriver,
}

#[async_trait]
impl DriverFactory for FakeFactory {
    async fn connect(&self) -> E2eResult<Box<dyn Driver>> {
        Ok(Box::new(self.driver.clone()))
    }
}
