//! Clients list and the client details view

use crate::error::E2eResult;
use crate::locator::{xpath_literal, Locator};
use crate::session::Session;

use super::{Section, ServicesSection};

#[derive(Debug, Clone, Copy, Default)]
pub struct ClientsTab;

impl ClientsTab {
    pub const ROOT: Locator = Locator::xpath("//*[@data-test=\"clients-view\"]");

    pub fn client_link(name: &str) -> Locator {
        Self::ROOT.within(&format!(
            "//tbody//span[contains(@class, \"name\") and contains(text(), {})]",
            xpath_literal(name)
        ))
    }

    /// Open the client the suite manages
    pub async fn open_test_service(&self, s: &mut Session) -> E2eResult<()> {
        let name = s.globals().test_client.clone();
        s.click(&Self::client_link(&name)).await
    }
}

impl Section for ClientsTab {
    fn root(&self) -> Locator {
        Self::ROOT
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ClientInfo;

impl ClientInfo {
    pub const ROOT: Locator = Locator::xpath("//*[@data-test=\"client-details-view\"]");
    pub const SERVICES_TAB: Locator = Locator::xpath(
        "//*[@data-test=\"client-details-view\"]//a[contains(@class, \"v-tab\") and contains(text(), \"SERVICES\")]",
    );

    pub async fn open_services_tab(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::SERVICES_TAB).await
    }

    pub fn services(&self) -> ServicesSection {
        ServicesSection
    }
}

impl Section for ClientInfo {
    fn root(&self) -> Locator {
        Self::ROOT
    }
}
