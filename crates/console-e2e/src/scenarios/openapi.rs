//! OpenAPI 3 service description lifecycle
//!
//! These need a console that can fetch the configured OpenAPI documents,
//! so they are registered disabled.

use std::time::Duration;

use futures::future::BoxFuture;
use tracing::info;

use crate::error::E2eResult;
use crate::locator;
use crate::messages;
use crate::model::ServiceType;
use crate::pages::{self, MainPage, ServicesSection};
use crate::session::Session;
use crate::validation::{self, ServiceForm};

use super::rest_services::{check_add_dialog, check_details_rules, cycle_enabled, delete_description};
use super::{expect_rejected, open_client_services, OPENAPI_CODE, RENAMED_OPENAPI_CODE};

const MISSING_DOCUMENT: &str = "https://www.niis.org/nosuchopenapi.yaml";
const MISSING_DETAILS_DOCUMENT: &str = "https://www.niis.org/nosuch.wsdl";
/// The console fetches the document before answering
const PARSE_FAILURE_TIMEOUT: Duration = Duration::from_secs(20);

pub(super) fn add_openapi_service(s: &mut Session) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(async move {
        let globals = s.globals();
        let (document_url, _) = globals.openapi_urls()?;
        let main = MainPage;
        let services = main.client_info().services();
        open_client_services(s).await?;

        check_add_dialog(s, ServiceType::OpenApi3, OPENAPI_CODE).await?;

        info!("Unreachable document is refused");
        services.select_open_api(s).await?;
        services.enter_service_url(s, MISSING_DOCUMENT).await?;
        services.enter_service_code(s, OPENAPI_CODE).await?;
        services.confirm_add_dialog(s).await?;
        main.acknowledge_snackbar(s, messages::OPENAPI_PARSE_FAILED).await?;

        // The dialog stays open after a refused document
        info!("Invalid service code is rejected on submit");
        services.select_open_api(s).await?;
        services.enter_service_url(s, document_url).await?;
        services.enter_service_code(s, "/").await?;
        services.confirm_add_dialog(s).await?;
        expect_rejected(s, validation::service_code(ServiceForm::Add, "/")).await?;

        info!("Adding service {}", OPENAPI_CODE);
        services.enter_service_code(s, OPENAPI_CODE).await?;
        services.confirm_add_dialog(s).await?;
        main.acknowledge_snackbar(s, messages::OPENAPI_SERVICE_ADDED).await?;
        services
            .expect_description(s, ServiceType::OpenApi3, document_url)
            .await?;
        services.expand_service_details(s).await?;
        s.wait_visible(&locator::service_link(OPENAPI_CODE)).await?;

        s.end().await
    })
}

pub(super) fn edit_openapi_service(s: &mut Session) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(async move {
        let globals = s.globals();
        let (document_url, renamed_url) = globals.openapi_urls()?;
        let main = MainPage;
        let services = main.client_info().services();
        let details = main.service_details(ServiceType::OpenApi3);
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
        details.cancel_dialog(s).await?;

        info!("Unreachable document is refused");
        services.open_service_details(s).await?;
        pages::wait_open(s, &details).await?;
        details.enter_service_url(s, MISSING_DETAILS_DOCUMENT).await?;
        details.confirm_dialog(s).await?;
        s.wait_visible_for(
            &locator::snackbar_with_text(messages::OPENAPI_PARSE_FAILED),
            PARSE_FAILURE_TIMEOUT,
        )
        .await?;
        main.close_snackbar(s).await?;

        info!("Cancelled edit keeps the description");
        details.enter_service_code(s, RENAMED_OPENAPI_CODE).await?;
        details.enter_service_url(s, renamed_url).await?;
        details.cancel_dialog(s).await?;
        services
            .expect_description(s, ServiceType::OpenApi3, document_url)
            .await?;
        s.wait_visible(&locator::service_link(OPENAPI_CODE)).await?;

        info!("Renaming {} to {}", OPENAPI_CODE, RENAMED_OPENAPI_CODE);
        services.open_service_details(s).await?;
        pages::wait_open(s, &details).await?;
        details.enter_service_url(s, renamed_url).await?;
        details.enter_service_code(s, RENAMED_OPENAPI_CODE).await?;
        s.pad_since(started, globals.refresh_window()).await;
        details.confirm_dialog(s).await?;
        main.acknowledge_snackbar(s, messages::DESCRIPTION_SAVED).await?;

        services
            .expect_description(s, ServiceType::OpenApi3, renamed_url)
            .await?;
        s.wait_not_present(&locator::service_link(OPENAPI_CODE)).await?;
        s.wait_visible(&locator::service_link(RENAMED_OPENAPI_CODE)).await?;
        s.expect_text_not_contains(&ServicesSection::REFRESH_TIMESTAMP, &initial_timestamp)
            .await?;

        s.end().await
    })
}

pub(super) fn delete_openapi_service(s: &mut Session) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(async move {
        let globals = s.globals();
        let (_, renamed_url) = globals.openapi_urls()?;
        open_client_services(s).await?;
        delete_description(s, ServiceType::OpenApi3, renamed_url).await?;
        s.end().await
    })
}
