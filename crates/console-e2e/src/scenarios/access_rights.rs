//! Access rights of a REST operation

use futures::future::BoxFuture;
use tracing::info;

use crate::error::E2eResult;
use crate::locator::access_right_member;
use crate::messages;
use crate::model::SubjectType;
use crate::pages::{self, MainPage};
use crate::session::Session;

use super::{open_client_services, REST_CODE};

/// Subjects granted access; one of each subject type
const GRANTED: [&str; 3] = ["TestOrg", "Security server owners", "Group1"];
/// Selected in a cancelled dialog only
const NOT_GRANTED: &str = "TestCom";

/// Sign in and open the operation of the REST service
async fn open_operation(s: &mut Session) -> E2eResult<()> {
    let main = MainPage;
    let services = main.client_info().services();
    open_client_services(s).await?;
    services.expand_service_details(s).await?;
    services.open_operation(s, REST_CODE).await?;
    pages::wait_open(s, &main.rest_operation_details()).await
}

pub(super) fn add_access_rights(s: &mut Session) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(async move {
        let main = MainPage;
        let operation = main.rest_operation_details();
        let popup = main.add_subjects_popup();
        open_operation(s).await?;

        operation.open_add_access_rights(s).await?;
        pages::wait_open(s, &popup).await?;

        info!("Subject types and filtering");
        popup
            .start_search(s)
            .await?
            .verify_client_type_visible(s, SubjectType::Subsystem)
            .await?
            .verify_client_type_visible(s, SubjectType::GlobalGroup)
            .await?
            .verify_client_type_visible(s, SubjectType::LocalGroup)
            .await?;
        // Selecting a type filters only on the next search
        popup
            .select_service_client_type(s, SubjectType::Subsystem)
            .await?
            .verify_client_type_visible(s, SubjectType::Subsystem)
            .await?
            .verify_client_type_visible(s, SubjectType::GlobalGroup)
            .await?
            .verify_client_type_visible(s, SubjectType::LocalGroup)
            .await?;
        popup
            .start_search(s)
            .await?
            .verify_client_type_not_present(s, SubjectType::LocalGroup)
            .await?
            .verify_client_type_not_present(s, SubjectType::GlobalGroup)
            .await?
            .verify_client_type_visible(s, SubjectType::Subsystem)
            .await?;

        info!("Cancelled selection grants nothing");
        popup.select_subject(s, NOT_GRANTED).await?;
        popup.cancel(s).await?;
        s.wait_not_present(&access_right_member(NOT_GRANTED)).await?;

        info!("Granting {:?}", GRANTED);
        operation.open_add_access_rights(s).await?;
        pages::wait_open(s, &popup).await?;
        popup.start_search(s).await?;
        for subject in GRANTED {
            popup.select_subject(s, subject).await?;
        }
        popup.add_selected(s).await?;
        main.acknowledge_snackbar(s, messages::ACCESS_RIGHTS_ADDED).await?;

        for subject in GRANTED {
            s.wait_visible(&access_right_member(subject)).await?;
        }
        s.wait_not_present(&access_right_member(NOT_GRANTED)).await?;

        s.end().await
    })
}

pub(super) fn remove_access_rights(s: &mut Session) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(async move {
        let main = MainPage;
        let operation = main.rest_operation_details();
        let remove_one = main.remove_access_right_popup();
        let remove_all = main.remove_all_access_rights_popup();
        let [removed, remaining @ ..] = GRANTED;
        open_operation(s).await?;

        info!("Removing {}", removed);
        operation.remove_access_right(s, removed).await?;
        pages::wait_open(s, &remove_one).await?;
        remove_one.cancel(s).await?;
        s.wait_visible(&access_right_member(removed)).await?;

        operation.remove_access_right(s, removed).await?;
        pages::wait_open(s, &remove_one).await?;
        remove_one.confirm(s).await?;
        main.acknowledge_snackbar(s, messages::ACCESS_RIGHTS_REMOVED).await?;
        s.wait_not_present(&MainPage::SNACKBAR_MESSAGE).await?;
        s.wait_not_present(&access_right_member(removed)).await?;
        for subject in remaining {
            s.wait_visible(&access_right_member(subject)).await?;
        }

        info!("Removing all access rights");
        operation.remove_all_access_rights(s).await?;
        pages::wait_open(s, &remove_all).await?;
        remove_all.cancel(s).await?;
        for subject in remaining {
            s.wait_visible(&access_right_member(subject)).await?;
        }

        operation.remove_all_access_rights(s).await?;
        pages::wait_open(s, &remove_all).await?;
        remove_all.confirm(s).await?;
        main.acknowledge_snackbar(s, messages::ACCESS_RIGHTS_REMOVED).await?;
        for subject in remaining {
            s.wait_not_present(&access_right_member(subject)).await?;
        }

        s.end().await
    })
}
