//! Service description details dialog (REST base path or OpenAPI 3)

use crate::error::E2eResult;
use crate::locator::Locator;
use crate::model::ServiceType;
use crate::session::Session;

use super::{dialog_cancel, dialog_save, field_message, Section};

#[derive(Debug, Clone, Copy)]
pub struct ServiceDetailsDialog {
    service_type: ServiceType,
}

impl ServiceDetailsDialog {
    pub const ROOT: Locator = Locator::xpath("//*[@data-test=\"service-description-details-dialog\"]");
    pub const SERVICE_TYPE: Locator = Locator::xpath(
        "//*[@data-test=\"service-description-details-dialog\"]//*[@data-test=\"service-type\"]",
    );
    pub const SERVICE_CODE: Locator = Locator::xpath(
        "//*[@data-test=\"service-description-details-dialog\"]//input[@data-test=\"service-code\"]",
    );
    pub const SERVICE_URL: Locator = Locator::xpath(
        "//*[@data-test=\"service-description-details-dialog\"]//input[@data-test=\"service-url\"]",
    );
    pub const DELETE_SERVICE: Locator = Locator::xpath(
        "//*[@data-test=\"service-description-details-dialog\"]//button[@data-test=\"service-description-details-delete-button\"]",
    );
    pub const CLOSE: Locator = Locator::xpath(
        "//*[@data-test=\"service-description-details-dialog\"]//*[@data-test=\"close-x\"]",
    );
    pub const DELETE_DIALOG: Locator =
        Locator::xpath("//*[@data-test=\"delete-service-description-dialog\"]");

    pub fn new(service_type: ServiceType) -> Self {
        Self { service_type }
    }

    pub fn code_message() -> Locator {
        field_message(&Self::SERVICE_CODE)
    }

    pub fn url_message() -> Locator {
        field_message(&Self::SERVICE_URL)
    }

    /// The dialog names the type this object was opened for
    pub async fn expect_type(&self, s: &mut Session) -> E2eResult<()> {
        s.wait_visible(&Self::SERVICE_TYPE).await?;
        s.assert_contains_text(&Self::SERVICE_TYPE, self.service_type.details_name())
            .await
    }

    pub async fn enter_service_code(&self, s: &mut Session, code: &str) -> E2eResult<()> {
        s.fill(&Self::SERVICE_CODE, code).await
    }

    pub async fn enter_service_url(&self, s: &mut Session, url: &str) -> E2eResult<()> {
        s.fill(&Self::SERVICE_URL, url).await
    }

    pub async fn confirm_dialog(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&dialog_save(&Self::ROOT)).await
    }

    pub async fn cancel_dialog(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&dialog_cancel(&Self::ROOT)).await
    }

    pub async fn delete_service(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::DELETE_SERVICE).await?;
        s.wait_visible(&Self::DELETE_DIALOG).await
    }

    pub async fn cancel_delete(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&dialog_cancel(&Self::DELETE_DIALOG)).await
    }

    pub async fn confirm_delete(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&dialog_save(&Self::DELETE_DIALOG)).await
    }

    pub async fn close_service_details(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::CLOSE).await
    }
}

impl Section for ServiceDetailsDialog {
    fn root(&self) -> Locator {
        Self::ROOT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::globals::test_globals;
    use crate::testing::{FakeDriver, FakeElement};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_expect_type_matches_dialog_kind() {
        let driver = FakeDriver::new();
        driver.insert(
            &ServiceDetailsDialog::SERVICE_TYPE,
            FakeElement::visible("REST API Base Path"),
        );
        let mut s = Session::new(
            Box::new(driver.clone()),
            Arc::new(ManualClock::new()),
            Arc::new(test_globals()),
        );

        ServiceDetailsDialog::new(ServiceType::Rest)
            .expect_type(&mut s)
            .await
            .unwrap();
        assert!(ServiceDetailsDialog::new(ServiceType::OpenApi3)
            .expect_type(&mut s)
            .await
            .is_err());
    }
}
