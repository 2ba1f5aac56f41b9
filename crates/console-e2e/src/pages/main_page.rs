//! Console shell: top navigation, snackbar and the page's sections

use crate::error::E2eResult;
use crate::locator::{self, Locator};
use crate::model::ServiceType;
use crate::session::Session;

use super::{
    AddSubjectsPopup, ClientInfo, ClientsTab, EndpointPopup, RemoveAccessRightPopup,
    RemoveAllAccessRightsPopup, RestOperationDetails, RestServiceEndpoints, ServiceDetailsDialog,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct MainPage;

impl MainPage {
    pub const CLIENTS_TAB: Locator =
        Locator::xpath("//div[contains(@class, \"v-tabs-bar\")]//a[contains(text(), \"CLIENTS\")]");
    pub const SNACKBAR_MESSAGE: Locator =
        Locator::xpath("//*[contains(@class, \"v-snack__content\")]");
    pub const SNACKBAR_CLOSE: Locator = Locator::xpath(
        "//*[contains(@class, \"v-snack__content\")]//button[@data-test=\"close-snackbar\"]",
    );

    pub async fn open_clients_tab(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::CLIENTS_TAB).await
    }

    pub async fn close_snackbar(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::SNACKBAR_CLOSE).await
    }

    /// Wait for a snackbar carrying `text` and check the message element
    pub async fn expect_snackbar(&self, s: &mut Session, text: &str) -> E2eResult<()> {
        s.wait_visible(&locator::snackbar_with_text(text)).await?;
        s.assert_contains_text(&Self::SNACKBAR_MESSAGE, text).await
    }

    /// Expect the snackbar, then dismiss it
    pub async fn acknowledge_snackbar(&self, s: &mut Session, text: &str) -> E2eResult<()> {
        self.expect_snackbar(s, text).await?;
        self.close_snackbar(s).await
    }

    pub fn clients_tab(&self) -> ClientsTab {
        ClientsTab
    }

    pub fn client_info(&self) -> ClientInfo {
        ClientInfo
    }

    pub fn rest_operation_details(&self) -> RestOperationDetails {
        RestOperationDetails
    }

    pub fn add_subjects_popup(&self) -> AddSubjectsPopup {
        AddSubjectsPopup
    }

    pub fn remove_access_right_popup(&self) -> RemoveAccessRightPopup {
        RemoveAccessRightPopup
    }

    pub fn remove_all_access_rights_popup(&self) -> RemoveAllAccessRightsPopup {
        RemoveAllAccessRightsPopup
    }

    pub fn rest_service_endpoints(&self) -> RestServiceEndpoints {
        RestServiceEndpoints
    }

    pub fn add_endpoint_popup(&self) -> EndpointPopup {
        EndpointPopup::add()
    }

    pub fn edit_endpoint_popup(&self) -> EndpointPopup {
        EndpointPopup::edit()
    }

    pub fn service_details(&self, service_type: ServiceType) -> ServiceDetailsDialog {
        ServiceDetailsDialog::new(service_type)
    }
}
