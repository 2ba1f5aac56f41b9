//! Page and section objects of the client services console
//!
//! Each type names one page, panel or dialog. Elements are exposed as
//! locators, actions take the scenario's [`Session`] explicitly. Nested
//! regions are reached through typed accessors:
//!
//! ```text
//! MainPage
//!   ├── clients_tab()            ClientsTab
//!   ├── client_info()            ClientInfo
//!   │     └── services()         ServicesSection
//!   ├── rest_operation_details() RestOperationDetails
//!   ├── add_subjects_popup()     AddSubjectsPopup
//!   ├── remove_access_right_popup() / remove_all_access_rights_popup()
//!   ├── rest_service_endpoints() RestServiceEndpoints
//!   ├── add_endpoint_popup() / edit_endpoint_popup()   EndpointPopup
//!   └── service_details(type)    ServiceDetailsDialog
//! ```

pub mod access_rights;
pub mod clients;
pub mod endpoints;
pub mod front;
pub mod main_page;
pub mod operation;
pub mod service_details;
pub mod services;

pub use access_rights::{AddSubjectsPopup, RemoveAccessRightPopup, RemoveAllAccessRightsPopup};
pub use clients::{ClientInfo, ClientsTab};
pub use endpoints::{EndpointPopup, RestServiceEndpoints};
pub use front::FrontPage;
pub use main_page::MainPage;
pub use operation::RestOperationDetails;
pub use service_details::ServiceDetailsDialog;
pub use services::ServicesSection;

use crate::error::E2eResult;
use crate::locator::Locator;
use crate::session::Session;

/// A region of the console that can be waited on as a whole
pub trait Section {
    /// Element whose visibility means the region is open
    fn root(&self) -> Locator;
}

/// Wait until `section` is shown
pub async fn wait_open(s: &mut Session, section: &impl Section) -> E2eResult<()> {
    s.wait_visible(&section.root()).await
}

/// Validation message rendered under the input matching `input`
pub(crate) fn field_message(input: &Locator) -> Locator {
    input.within("/ancestor::div[contains(@class, \"v-input\")][1]//div[contains(@class, \"v-messages__message\")]")
}

pub(crate) fn dialog_save(root: &Locator) -> Locator {
    root.within("//button[@data-test=\"dialog-save-button\"]")
}

pub(crate) fn dialog_cancel(root: &Locator) -> Locator {
    root.within("//button[@data-test=\"dialog-cancel-button\"]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_message_follows_input() {
        let input = Locator::xpath("//input[@name=\"serviceUrl\"]");
        assert_eq!(
            field_message(&input).value(),
            "//input[@name=\"serviceUrl\"]/ancestor::div[contains(@class, \"v-input\")][1]//div[contains(@class, \"v-messages__message\")]"
        );
    }
}
