//! Services tab of a client: service descriptions and their services

use crate::error::E2eResult;
use crate::locator::{self, Locator};
use crate::model::ServiceType;
use crate::session::Session;

use super::{dialog_cancel, dialog_save, field_message, Section};

#[derive(Debug, Clone, Copy, Default)]
pub struct ServicesSection;

impl ServicesSection {
    pub const ROOT: Locator = Locator::xpath("//*[@data-test=\"client-services-view\"]");

    pub const ADD_REST_BUTTON: Locator =
        Locator::xpath("//button[@data-test=\"add-rest-button\"]");
    pub const ADD_DIALOG: Locator = Locator::xpath("//*[@data-test=\"add-rest-dialog\"]");
    pub const NEW_SERVICE_URL: Locator =
        Locator::xpath("//*[@data-test=\"add-rest-dialog\"]//input[@name=\"serviceUrl\"]");
    pub const NEW_SERVICE_CODE: Locator =
        Locator::xpath("//*[@data-test=\"add-rest-dialog\"]//input[@name=\"serviceCode\"]");
    pub const REST_PATH_RADIO: Locator =
        Locator::xpath("//*[@data-test=\"add-rest-dialog\"]//input[@value=\"REST\"]");
    pub const OPENAPI_RADIO: Locator =
        Locator::xpath("//*[@data-test=\"add-rest-dialog\"]//input[@value=\"OPENAPI3\"]");
    pub const CONFIRM_ADD_SERVICE: Locator = Locator::xpath(
        "//*[@data-test=\"add-rest-dialog\"]//button[@data-test=\"dialog-save-button\"]",
    );

    pub const SERVICE_DESCRIPTION: Locator =
        Locator::xpath("//*[@data-test=\"service-description-header\"]");
    pub const EXPAND_DETAILS: Locator = Locator::xpath(
        "//*[@data-test=\"service-description-header\"]//*[@data-test=\"service-description-accordion\"]",
    );
    pub const OPEN_DETAILS: Locator = Locator::xpath(
        "//*[@data-test=\"service-description-header\"]//*[@data-test=\"service-description-details\"]",
    );
    pub const ENABLE_TOGGLE: Locator = Locator::xpath(
        "//*[@data-test=\"service-description-header\"]//*[@data-test=\"service-description-enable-disable\"]",
    );
    pub const REFRESH_TIMESTAMP: Locator =
        Locator::xpath("//*[@data-test=\"service-description-refresh-timestamp\"]");
    pub const OPERATION_URL: Locator = Locator::xpath("//td[@data-test=\"service-url\"]");

    pub const DISABLE_DIALOG: Locator = Locator::xpath("//*[@data-test=\"disable-service-dialog\"]");
    pub const DISABLE_NOTICE: Locator =
        Locator::xpath("//*[@data-test=\"disable-service-dialog\"]//input[@name=\"disableNotice\"]");

    pub fn service_url_message() -> Locator {
        field_message(&Self::NEW_SERVICE_URL)
    }

    pub fn service_code_message() -> Locator {
        field_message(&Self::NEW_SERVICE_CODE)
    }

    /// TLS lock icon in the row of `code`, drawn with `style`
    pub fn lock_icon(code: &str, style: &str) -> Locator {
        locator::service_row(code).within(&format!(
            "//*[contains(@class, \"mdi-lock\") and contains(@style, {})]",
            locator::xpath_literal(style)
        ))
    }

    /// Operation URL cell in the row of `code`
    pub fn row_url(code: &str, url: &str) -> Locator {
        locator::service_row(code).within(&format!(
            "//td[@data-test=\"service-url\" and contains(text(), {})]",
            locator::xpath_literal(url)
        ))
    }

    pub async fn open_add_rest(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::ADD_REST_BUTTON).await?;
        s.wait_visible(&Self::ADD_DIALOG).await
    }

    pub async fn enter_service_url(&self, s: &mut Session, url: &str) -> E2eResult<()> {
        s.fill(&Self::NEW_SERVICE_URL, url).await
    }

    pub async fn enter_service_code(&self, s: &mut Session, code: &str) -> E2eResult<()> {
        s.fill(&Self::NEW_SERVICE_CODE, code).await
    }

    pub async fn select_rest_path(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::REST_PATH_RADIO).await
    }

    pub async fn select_open_api(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::OPENAPI_RADIO).await
    }

    pub async fn select_type(&self, s: &mut Session, service_type: ServiceType) -> E2eResult<()> {
        match service_type {
            ServiceType::Rest => self.select_rest_path(s).await,
            ServiceType::OpenApi3 => self.select_open_api(s).await,
        }
    }

    pub async fn cancel_add_dialog(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&dialog_cancel(&Self::ADD_DIALOG)).await
    }

    pub async fn confirm_add_dialog(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&dialog_save(&Self::ADD_DIALOG)).await
    }

    pub async fn expand_service_details(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::EXPAND_DETAILS).await
    }

    /// Open the operation behind the service link for `code`
    pub async fn open_operation(&self, s: &mut Session, code: &str) -> E2eResult<()> {
        let link = locator::service_link(code);
        s.wait_visible(&link).await?;
        s.click(&link).await
    }

    pub async fn open_service_details(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::OPEN_DETAILS).await
    }

    pub async fn toggle_enabled(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::ENABLE_TOGGLE).await
    }

    pub async fn enter_disable_notice(&self, s: &mut Session, notice: &str) -> E2eResult<()> {
        s.fill(&Self::DISABLE_NOTICE, notice).await
    }

    pub async fn cancel_disable(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&dialog_cancel(&Self::DISABLE_DIALOG)).await
    }

    pub async fn confirm_disable(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&dialog_save(&Self::DISABLE_DIALOG)).await
    }

    pub async fn refresh_timestamp(&self, s: &mut Session) -> E2eResult<String> {
        s.wait_visible(&Self::REFRESH_TIMESTAMP).await?;
        s.text(&Self::REFRESH_TIMESTAMP).await
    }

    /// Header of the single description reads `<TYPE> (<url>`
    pub async fn expect_description(
        &self,
        s: &mut Session,
        service_type: ServiceType,
        url: &str,
    ) -> E2eResult<()> {
        s.wait_visible(&Self::SERVICE_DESCRIPTION).await?;
        s.assert_contains_text(&Self::SERVICE_DESCRIPTION, &service_type.description_header(url))
            .await
    }
}

impl Section for ServicesSection {
    fn root(&self) -> Locator {
        Self::ROOT
    }
}
