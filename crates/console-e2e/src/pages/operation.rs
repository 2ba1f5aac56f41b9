//! REST operation details: parameters, access rights and endpoints tab

use crate::error::E2eResult;
use crate::locator::{xpath_literal, Locator};
use crate::session::Session;

use super::Section;

#[derive(Debug, Clone, Copy, Default)]
pub struct RestOperationDetails;

/// Help icons of the parameters form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationHelp {
    Url,
    Timeout,
    VerifyCert,
}

impl RestOperationDetails {
    pub const ROOT: Locator = Locator::xpath("//*[@data-test=\"service-detail-view\"]");

    pub const SERVICE_URL: Locator =
        Locator::xpath("//*[@data-test=\"service-detail-view\"]//input[@data-test=\"service-url\"]");
    pub const TIMEOUT: Locator =
        Locator::xpath("//*[@data-test=\"service-detail-view\"]//input[@data-test=\"service-timeout\"]");
    pub const SSL_AUTH: Locator =
        Locator::xpath("//*[@data-test=\"service-detail-view\"]//input[@data-test=\"ssl-auth\"]");
    pub const SSL_AUTH_CLICK_AREA: Locator = Locator::xpath(
        "//*[@data-test=\"service-detail-view\"]//input[@data-test=\"ssl-auth\"]/following-sibling::div[contains(@class, \"v-input--selection-controls__ripple\")]",
    );
    pub const SAVE_PARAMETERS: Locator =
        Locator::xpath("//*[@data-test=\"service-detail-view\"]//button[@data-test=\"save-service-parameters\"]");
    pub const CLOSE: Locator =
        Locator::xpath("//*[@data-test=\"service-detail-view\"]//*[@data-test=\"close-x\"]");

    pub const URL_HELP: Locator =
        Locator::xpath("//*[@data-test=\"service-detail-view\"]//*[@data-test=\"url-help\"]");
    pub const TIMEOUT_HELP: Locator =
        Locator::xpath("//*[@data-test=\"service-detail-view\"]//*[@data-test=\"timeout-help\"]");
    pub const VERIFY_CERT_HELP: Locator =
        Locator::xpath("//*[@data-test=\"service-detail-view\"]//*[@data-test=\"verify-cert-help\"]");
    pub const ACTIVE_TOOLTIP: Locator = Locator::xpath(
        "//div[contains(@class, \"v-tooltip__content\") and contains(@class, \"menuable__content__active\")]",
    );

    pub const ENDPOINTS_TAB: Locator = Locator::xpath(
        "//*[@data-test=\"service-detail-view\"]//a[contains(@class, \"v-tab\") and contains(text(), \"ENDPOINTS\")]",
    );
    pub const ADD_SUBJECTS: Locator =
        Locator::xpath("//*[@data-test=\"service-detail-view\"]//button[@data-test=\"show-add-subjects\"]");
    pub const REMOVE_ALL_SUBJECTS: Locator =
        Locator::xpath("//*[@data-test=\"service-detail-view\"]//button[@data-test=\"remove-subjects\"]");

    pub fn help_icon(help: OperationHelp) -> Locator {
        match help {
            OperationHelp::Url => Self::URL_HELP,
            OperationHelp::Timeout => Self::TIMEOUT_HELP,
            OperationHelp::VerifyCert => Self::VERIFY_CERT_HELP,
        }
    }

    /// Remove button in the members table row of `subject`
    pub fn remove_subject_button(subject: &str) -> Locator {
        Locator::dynamic_xpath(format!(
            "//table[contains(@class, \"group-members-table\")]//tr[.//td[contains(text(), {})]]//button[@data-test=\"remove-subject\"]",
            xpath_literal(subject)
        ))
    }

    pub async fn enter_url(&self, s: &mut Session, url: &str) -> E2eResult<()> {
        s.fill(&Self::SERVICE_URL, url).await
    }

    pub async fn enter_timeout(&self, s: &mut Session, timeout: &str) -> E2eResult<()> {
        s.fill(&Self::TIMEOUT, timeout).await
    }

    pub async fn toggle_cert_verification(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::SSL_AUTH_CLICK_AREA).await
    }

    pub async fn save_parameters(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::SAVE_PARAMETERS).await
    }

    pub async fn close(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::CLOSE).await
    }

    /// Hover a help icon and check the tooltip it opens
    pub async fn expect_help(&self, s: &mut Session, help: OperationHelp, text: &str) -> E2eResult<()> {
        s.hover(&Self::help_icon(help)).await?;
        s.expect_visible_text(&Self::ACTIVE_TOOLTIP, text).await
    }

    pub async fn open_add_access_rights(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::ADD_SUBJECTS).await
    }

    pub async fn remove_access_right(&self, s: &mut Session, subject: &str) -> E2eResult<()> {
        s.click(&Self::remove_subject_button(subject)).await
    }

    pub async fn remove_all_access_rights(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::REMOVE_ALL_SUBJECTS).await
    }

    pub async fn open_endpoints_tab(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::ENDPOINTS_TAB).await
    }
}

impl Section for RestOperationDetails {
    fn root(&self) -> Locator {
        Self::ROOT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::globals::test_globals;
    use crate::messages;
    use crate::testing::{FakeDriver, FakeElement};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_help_tooltip_checked_after_hover() {
        let driver = FakeDriver::new();
        driver.insert(
            &RestOperationDetails::ACTIVE_TOOLTIP,
            FakeElement::visible(messages::TIMEOUT_HELP),
        );
        let mut s = Session::new(
            Box::new(driver.clone()),
            Arc::new(ManualClock::new()),
            Arc::new(test_globals()),
        );

        RestOperationDetails
            .expect_help(&mut s, OperationHelp::Timeout, messages::TIMEOUT_HELP)
            .await
            .unwrap();
        assert_eq!(
            driver.actions(),
            vec![format!("hover:{}", RestOperationDetails::TIMEOUT_HELP.value())]
        );

        let err = RestOperationDetails
            .expect_help(&mut s, OperationHelp::Url, messages::URL_HELP)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Assertion failed"));
    }

    #[test]
    fn test_remove_subject_button_targets_row() {
        let loc = RestOperationDetails::remove_subject_button("Security server owners");
        assert!(loc.value().contains("contains(text(), \"Security server owners\")"));
        assert!(loc.value().ends_with("//button[@data-test=\"remove-subject\"]"));
    }
}
