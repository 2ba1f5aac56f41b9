//! REST service description lifecycle: add, edit, delete

use futures::future::BoxFuture;
use tracing::info;

use crate::error::E2eResult;
use crate::locator;
use crate::messages;
use crate::model::ServiceType;
use crate::pages::{self, MainPage, ServiceDetailsDialog, ServicesSection};
use crate::session::Session;
use crate::validation::{self, ServiceForm};

use super::{
    expect_field, expect_rejected, open_client_services, EDITED_OPERATION_URL, RENAMED_REST_CODE,
    REST_CODE,
};

/// Inline rules of the add dialog, then check a cancelled dialog reopens empty
pub(super) async fn check_add_dialog(
    s: &mut Session,
    service_type: ServiceType,
    code: &str,
) -> E2eResult<()> {
    let services = ServicesSection;

    info!("Empty and malformed values are flagged inline");
    services.open_add_rest(s).await?;
    s.expect_enabled(&ServicesSection::CONFIRM_ADD_SERVICE, false).await?;
    services.enter_service_url(s, "a").await?;
    for url in ["", "foobar"] {
        services.enter_service_url(s, url).await?;
        expect_field(
            s,
            &ServicesSection::service_url_message(),
            validation::service_url(ServiceForm::Add, url),
        )
        .await?;
    }
    services.enter_service_code(s, "a").await?;
    services.enter_service_code(s, "").await?;
    expect_field(
        s,
        &ServicesSection::service_code_message(),
        validation::service_code(ServiceForm::Add, ""),
    )
    .await?;
    services.enter_service_code(s, code).await?;
    services.select_type(s, service_type).await?;
    services.cancel_add_dialog(s).await?;

    info!("Reopened dialog starts empty");
    services.open_add_rest(s).await?;
    s.assert_value(&ServicesSection::NEW_SERVICE_URL, "").await?;
    s.assert_value(&ServicesSection::NEW_SERVICE_CODE, "").await?;
    s.expect_selected(&ServicesSection::REST_PATH_RADIO, false).await?;
    s.expect_selected(&ServicesSection::OPENAPI_RADIO, false).await?;
    s.expect_enabled(&ServicesSection::CONFIRM_ADD_SERVICE, false).await
}

pub(super) fn add_rest_service(s: &mut Session) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(async move {
        let globals = s.globals();
        let main = MainPage;
        let services = main.client_info().services();
        open_client_services(s).await?;

        check_add_dialog(s, ServiceType::Rest, REST_CODE).await?;

        info!("Invalid service code is rejected on submit");
        services.select_rest_path(s).await?;
        services.enter_service_url(s, &globals.rest_url_1).await?;
        services.enter_service_code(s, "/").await?;
        services.confirm_add_dialog(s).await?;
        expect_rejected(s, validation::service_code(ServiceForm::Add, "/")).await?;

        info!("Adding service {}", REST_CODE);
        services.open_add_rest(s).await?;
        services.select_rest_path(s).await?;
        services.enter_service_url(s, &globals.rest_url_1).await?;
        services.enter_service_code(s, REST_CODE).await?;
        services.confirm_add_dialog(s).await?;
        main.acknowledge_snackbar(s, messages::REST_SERVICE_ADDED).await?;

        services
            .expect_description(s, ServiceType::Rest, &globals.rest_url_1)
            .await?;
        services.expand_service_details(s).await?;
        s.wait_visible(&locator::service_link(REST_CODE)).await?;

        s.end().await
    })
}

/// Enable the description, cancel one disable, then disable with a notice
pub(super) async fn cycle_enabled(s: &mut Session, services: &ServicesSection) -> E2eResult<()> {
    let main = MainPage;
    let disable_title = locator::dialog_title(messages::DISABLE_DIALOG_TITLE);

    services.toggle_enabled(s).await?;
    main.acknowledge_snackbar(s, messages::DESCRIPTION_ENABLED).await?;

    services.toggle_enabled(s).await?;
    s.wait_visible(&disable_title).await?;
    services.enter_disable_notice(s, "Message1").await?;
    services.cancel_disable(s).await?;

    services.toggle_enabled(s).await?;
    s.wait_visible(&disable_title).await?;
    s.assert_value(&ServicesSection::DISABLE_NOTICE, "").await?;
    services.enter_disable_notice(s, "Notice1").await?;
    services.confirm_disable(s).await?;
    main.acknowledge_snackbar(s, messages::DESCRIPTION_DISABLED).await
}

/// Inline rules of the details dialog for empty and malformed values
pub(super) async fn check_details_rules(s: &mut Session, details: &ServiceDetailsDialog) -> E2eResult<()> {
    details.enter_service_code(s, "").await?;
    expect_field(
        s,
        &ServiceDetailsDialog::code_message(),
        validation::service_code(ServiceForm::Details, ""),
    )
    .await?;
    for url in ["foobar", ""] {
        details.enter_service_url(s, url).await?;
        expect_field(
            s,
            &ServiceDetailsDialog::url_message(),
            validation::service_url(ServiceForm::Details, url),
        )
        .await?;
    }
    Ok(())
}

pub(super) fn edit_rest_service(s: &mut Session) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(async move {
        let globals = s.globals();
        let main = MainPage;
        let services = main.client_info().services();
        let details = main.service_details(ServiceType::Rest);
        open_client_services(s).await?;

        services.expand_service_details(s).await?;
        let initial_timestamp = services.refresh_timestamp(s).await?;
        let started = s.now();

        cycle_enabled(s, &services).await?;

        info!("Details dialog validation");
        services.open_service_details(s).await?;
        pages::wait_open(s, &details).await?;
        details.expect_type(s).await?;
        details.enter_service_code(s, "/").await?;
        details.confirm_dialog(s).await?;
        expect_rejected(s, validation::service_code(ServiceForm::Details, "/")).await?;
        check_details_rules(s, &details).await?;

        info!("Cancelled edit keeps the description");
        details.enter_service_url(s, &globals.rest_url_2).await?;
        details.enter_service_code(s, RENAMED_REST_CODE).await?;
        details.cancel_dialog(s).await?;
        services
            .expect_description(s, ServiceType::Rest, EDITED_OPERATION_URL)
            .await?;
        s.wait_visible(&locator::service_link(REST_CODE)).await?;

        info!("Renaming {} to {}", REST_CODE, RENAMED_REST_CODE);
        services.open_service_details(s).await?;
        pages::wait_open(s, &details).await?;
        details.enter_service_url(s, &globals.rest_url_2).await?;
        details.enter_service_code(s, RENAMED_REST_CODE).await?;
        // The refresh timestamp has minute resolution
        s.pad_since(started, globals.refresh_window()).await;
        details.confirm_dialog(s).await?;
        main.acknowledge_snackbar(s, messages::DESCRIPTION_SAVED).await?;

        services
            .expect_description(s, ServiceType::Rest, &globals.rest_url_2)
            .await?;
        s.wait_not_present(&locator::service_link(REST_CODE)).await?;
        s.wait_visible(&locator::service_link(RENAMED_REST_CODE)).await?;
        s.expect_text_not_contains(&ServicesSection::REFRESH_TIMESTAMP, &initial_timestamp)
            .await?;

        s.end().await
    })
}

/// Cancel one delete, then delete the only description of `service_type`
pub(super) async fn delete_description(
    s: &mut Session,
    service_type: ServiceType,
    url: &str,
) -> E2eResult<()> {
    let main = MainPage;
    let services = main.client_info().services();
    let details = main.service_details(service_type);

    services.open_service_details(s).await?;
    pages::wait_open(s, &details).await?;
    details.delete_service(s).await?;
    details.cancel_delete(s).await?;
    details.close_service_details(s).await?;
    services.expect_description(s, service_type, url).await?;

    services.open_service_details(s).await?;
    pages::wait_open(s, &details).await?;
    details.delete_service(s).await?;
    details.confirm_delete(s).await?;
    main.acknowledge_snackbar(s, messages::DESCRIPTION_DELETED).await?;
    s.wait_not_present(&ServicesSection::SERVICE_DESCRIPTION).await
}

pub(super) fn delete_rest_service(s: &mut Session) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(async move {
        let globals = s.globals();
        open_client_services(s).await?;
        delete_description(s, ServiceType::Rest, &globals.rest_url_2).await?;
        s.end().await
    })
}
