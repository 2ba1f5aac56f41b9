//! Access rights dialogs of an operation

use crate::error::E2eResult;
use crate::locator::{xpath_literal, Locator};
use crate::model::SubjectType;
use crate::session::Session;

use super::{dialog_cancel, dialog_save, Section};

/// Subject search and selection dialog.
///
/// Actions return the popup itself so a search and its checks read as one
/// chain:
///
/// ```ignore
/// popup
///     .start_search(s).await?
///     .verify_client_type_visible(s, SubjectType::Subsystem).await?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AddSubjectsPopup;

impl AddSubjectsPopup {
    pub const ROOT: Locator = Locator::xpath("//*[@data-test=\"add-subjects-dialog\"]");
    pub const SEARCH: Locator =
        Locator::xpath("//*[@data-test=\"add-subjects-dialog\"]//button[@data-test=\"search-button\"]");
    pub const TYPE_SELECT: Locator =
        Locator::xpath("//*[@data-test=\"add-subjects-dialog\"]//*[@data-test=\"member-type-select\"]");
    pub const ADD_SELECTED: Locator =
        Locator::xpath("//*[@data-test=\"add-subjects-dialog\"]//button[@data-test=\"save\"]");
    pub const CANCEL: Locator =
        Locator::xpath("//*[@data-test=\"add-subjects-dialog\"]//button[@data-test=\"cancel-button\"]");

    /// Search result cell showing a subject type
    pub fn client_type_cell(subject_type: SubjectType) -> Locator {
        Self::ROOT.within(&format!(
            "//table//td[contains(text(), {})]",
            xpath_literal(subject_type.as_str())
        ))
    }

    /// Selection checkbox of the search result row naming `subject`
    pub fn subject_checkbox(subject: &str) -> Locator {
        Self::ROOT.within(&format!(
            "//table//tr[.//td[contains(text(), {})]]//div[contains(@class, \"v-input--selection-controls__ripple\")]",
            xpath_literal(subject)
        ))
    }

    fn type_option(subject_type: SubjectType) -> Locator {
        Locator::dynamic_xpath(format!(
            "//div[contains(@class, \"v-select-list\")]//div[contains(@class, \"v-list-item__title\") and text()={}]",
            xpath_literal(subject_type.as_str())
        ))
    }

    pub async fn start_search(&self, s: &mut Session) -> E2eResult<&Self> {
        s.click(&Self::SEARCH).await?;
        Ok(self)
    }

    pub async fn select_service_client_type(
        &self,
        s: &mut Session,
        subject_type: SubjectType,
    ) -> E2eResult<&Self> {
        s.click(&Self::TYPE_SELECT).await?;
        let option = Self::type_option(subject_type);
        s.wait_visible(&option).await?;
        s.click(&option).await?;
        Ok(self)
    }

    pub async fn verify_client_type_visible(
        &self,
        s: &mut Session,
        subject_type: SubjectType,
    ) -> E2eResult<&Self> {
        s.wait_visible(&Self::client_type_cell(subject_type)).await?;
        Ok(self)
    }

    pub async fn verify_client_type_not_present(
        &self,
        s: &mut Session,
        subject_type: SubjectType,
    ) -> E2eResult<&Self> {
        s.wait_not_present(&Self::client_type_cell(subject_type)).await?;
        Ok(self)
    }

    pub async fn select_subject(&self, s: &mut Session, subject: &str) -> E2eResult<&Self> {
        let checkbox = Self::subject_checkbox(subject);
        s.wait_visible(&checkbox).await?;
        s.click(&checkbox).await?;
        Ok(self)
    }

    pub async fn add_selected(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::ADD_SELECTED).await
    }

    pub async fn cancel(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&Self::CANCEL).await
    }
}

impl Section for AddSubjectsPopup {
    fn root(&self) -> Locator {
        Self::ROOT
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveAccessRightPopup;

impl RemoveAccessRightPopup {
    pub const ROOT: Locator = Locator::xpath("//*[@data-test=\"remove-access-right-dialog\"]");

    pub async fn confirm(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&dialog_save(&Self::ROOT)).await
    }

    pub async fn cancel(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&dialog_cancel(&Self::ROOT)).await
    }
}

impl Section for RemoveAccessRightPopup {
    fn root(&self) -> Locator {
        Self::ROOT
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveAllAccessRightsPopup;

impl RemoveAllAccessRightsPopup {
    pub const ROOT: Locator = Locator::xpath("//*[@data-test=\"remove-all-access-rights-dialog\"]");

    pub async fn confirm(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&dialog_save(&Self::ROOT)).await
    }

    pub async fn cancel(&self, s: &mut Session) -> E2eResult<()> {
        s.click(&dialog_cancel(&Self::ROOT)).await
    }
}

impl Section for RemoveAllAccessRightsPopup {
    fn root(&self) -> Locator {
        Self::ROOT
    }
}
