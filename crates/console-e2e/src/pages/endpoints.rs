//! Endpoints tab of a REST service and the endpoint dialogs

use crate::error::E2eResult;
use crate::locator::{xpath_literal, Locator};
use crate::model::HttpMethod;
use crate::session::Session;

use super::{dialog_cancel, dialog_save, field_message, Section};

#[derive(Debug, Clone, Copy, Default)]
pub struct RestServiceEndpoints;

impl RestServiceEndpoints {
    pub const ROOT: Locator =
        Locator::xpath("//table[.//thead[.//*[contains(text(), \"HTTP Request Method\")]]]");
    pub const ADD_BUTTON: Locator = Locator::xpath("//button[@data-test=\"endpoint-add\"]");

    /// Any element of the table mentioning `path`
    pub fn path_entry(path: &str) -> Locator {
        Self::ROOT.within(&format!("//*[contains(text(), {})]", xpath_literal(path)))
    }

    pub fn edit_button(path: &str) -> Locator {
        Self::ROOT.within(&format!(
            "//tr[.//*[contains(text(), {})]]//button[@data-test=\"endpoint-edit\"]",
            xpath_literal(path)
        ))
    }

    /// Cell `column` (1-based) of body row `row` (1-based)
    pub fn cell(row: usize, column: usize) -> Locator {
        Self::ROOT.within(&format!("//tbody/tr[{}]/td[{}]", row, column))
    }

    pub async fn open_add_dialog(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::ADD_BUTTON).await
    }

    pub fn row_edit_button(row: usize) -> Locator {
        Self::ROOT.within(&format!(
            "//tbody/tr[{}]//button[@data-test=\"endpoint-edit\"]",
            row
        ))
    }

    pub async fn open_edit(&self, s: &mut Session, path: &str) -> E2eResult<()> {
        s.click(&Self::edit_button(path)).await
    }

    /// Edit the endpoint in body row `row` (1-based)
    pub async fn open_edit_row(&self, s: &mut Session, row: usize) -> E2eResult<()> {
        s.click(&Self::row_edit_button(row)).await
    }

    /// Row `index` lists `method` and `path`
    pub async fn verify_endpoint_row(
        &self,
        s: &mut Session,
        index: usize,
        method: HttpMethod,
        path: &str,
    ) -> E2eResult<()> {
        let method_cell = Self::cell(index, 1);
        s.wait_visible(&method_cell).await?;
        s.expect_text_equals(&method_cell, method.as_str()).await?;
        s.expect_text_equals(&Self::cell(index, 2), path).await
    }
}

impl Section for RestServiceEndpoints {
    fn root(&self) -> Locator {
        Self::ROOT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndpointDialog {
    Add,
    Edit,
}

/// Add-endpoint dialog or endpoint edit view; both share one form
#[derive(Debug, Clone, Copy)]
pub struct EndpointPopup {
    dialog: EndpointDialog,
}

impl EndpointPopup {
    pub const DELETE_DIALOG: Locator = Locator::xpath("//*[@data-test=\"delete-endpoint-dialog\"]");

    pub fn add() -> Self {
        Self {
            dialog: EndpointDialog::Add,
        }
    }

    pub fn edit() -> Self {
        Self {
            dialog: EndpointDialog::Edit,
        }
    }

    pub fn request_path(&self) -> Locator {
        self.root().within("//input[@data-test=\"endpoint-path\"]")
    }

    pub fn method_dropdown(&self) -> Locator {
        self.root().within("//*[@data-test=\"endpoint-method\"]")
    }

    pub fn request_path_message(&self) -> Locator {
        field_message(&self.request_path())
    }

    pub fn method_option(method: HttpMethod) -> Locator {
        Locator::dynamic_xpath(format!(
            "//div[contains(@class, \"v-select-list\")]//div[contains(@class, \"v-list-item__title\") and text()={}]",
            xpath_literal(method.as_str())
        ))
    }

    fn save_button(&self) -> Locator {
        match self.dialog {
            EndpointDialog::Add => dialog_save(&self.root()),
            EndpointDialog::Edit => self.root().within("//button[@data-test=\"endpoint-save\"]"),
        }
    }

    fn cancel_button(&self) -> Locator {
        match self.dialog {
            EndpointDialog::Add => dialog_cancel(&self.root()),
            EndpointDialog::Edit => self.root().within("//button[@data-test=\"endpoint-cancel\"]"),
        }
    }

    pub async fn click_method_menu(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&self.method_dropdown()).await
    }

    pub async fn verify_method_exists(&self, s: &mut Session, method: HttpMethod) -> E2eResult<()> {
        s.wait_visible(&Self::method_option(method)).await
    }

    pub async fn select_request_method(&self, s: &mut Session, method: HttpMethod) -> E2eResult<()> {
        self.click_method_menu(s).await?;
        let option = Self::method_option(method);
        s.wait_visible(&option).await?;
        s.click(&option).await
    }

    pub async fn enter_path(&self, s: &mut Session, path: &str) -> E2eResult<()> {
        s.fill(&self.request_path(), path).await
    }

    pub async fn add_selected(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&self.save_button()).await
    }

    pub async fn cancel(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&self.cancel_button()).await
    }

    pub async fn delete_endpoint(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&self.root().within("//button[@data-test=\"endpoint-delete\"]"))
            .await
    }

    pub async fn cancel_delete(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&dialog_cancel(&Self::DELETE_DIALOG)).await
    }

    pub async fn confirm_delete(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&dialog_save(&Self::DELETE_DIALOG)).await
    }
}

impl Section for EndpointPopup {
    fn root(&self) -> Locator {
        match self.dialog {
            EndpointDialog::Add => Locator::xpath("//*[@data-test=\"add-endpoint-dialog\"]"),
            EndpointDialog::Edit => Locator::xpath("//*[@data-test=\"endpoint-details-view\"]"),
        }
    }
}
