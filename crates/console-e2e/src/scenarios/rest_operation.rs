//! Parameters of a REST operation

use futures::future::BoxFuture;
use tracing::info;

use crate::error::E2eResult;
use crate::messages;
use crate::pages::operation::OperationHelp;
use crate::pages::{self, MainPage, RestOperationDetails, ServicesSection};
use crate::session::Session;

use super::{open_client_services, EDITED_OPERATION_URL, REST_CODE};

const INITIAL_TIMEOUT: &str = "60";
const EDITED_TIMEOUT: &str = "40";

pub(super) fn edit_rest_operation(s: &mut Session) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(async move {
        let globals = s.globals();
        let main = MainPage;
        let services = main.client_info().services();
        let operation = main.rest_operation_details();
        open_client_services(s).await?;

        services.expand_service_details(s).await?;
        services.open_operation(s, REST_CODE).await?;
        pages::wait_open(s, &operation).await?;

        operation.expect_help(s, OperationHelp::Url, messages::URL_HELP).await?;
        operation
            .expect_help(s, OperationHelp::Timeout, messages::TIMEOUT_HELP)
            .await?;
        operation
            .expect_help(s, OperationHelp::VerifyCert, messages::VERIFY_CERT_HELP)
            .await?;

        info!("Closing without saving keeps the parameters");
        operation.enter_url(s, EDITED_OPERATION_URL).await?;
        operation.enter_timeout(s, EDITED_TIMEOUT).await?;
        s.expect_selected(&RestOperationDetails::SSL_AUTH, false).await?;
        operation.close(s).await?;

        s.wait_visible(&ServicesSection::OPERATION_URL).await?;
        s.assert_contains_text(&ServicesSection::OPERATION_URL, &globals.rest_url_1)
            .await?;
        s.wait_visible(&ServicesSection::lock_icon(REST_CODE, &globals.service_ssl_auth_on_style))
            .await?;
        services.open_operation(s, REST_CODE).await?;
        pages::wait_open(s, &operation).await?;
        s.assert_value_contains(&RestOperationDetails::SERVICE_URL, &globals.rest_url_1)
            .await?;
        s.assert_value_contains(&RestOperationDetails::TIMEOUT, INITIAL_TIMEOUT)
            .await?;
        s.expect_selected(&RestOperationDetails::SSL_AUTH, true).await?;

        info!("Saving new parameters");
        operation.toggle_cert_verification(s).await?;
        operation.enter_url(s, EDITED_OPERATION_URL).await?;
        operation.enter_timeout(s, EDITED_TIMEOUT).await?;
        operation.save_parameters(s).await?;
        main.acknowledge_snackbar(s, messages::SERVICE_SAVED).await?;
        operation.close(s).await?;

        s.wait_visible(&ServicesSection::row_url(REST_CODE, EDITED_OPERATION_URL))
            .await?;
        s.wait_visible(&ServicesSection::lock_icon(REST_CODE, &globals.service_ssl_auth_off_style))
            .await?;

        services.open_operation(s, REST_CODE).await?;
        pages::wait_open(s, &operation).await?;
        s.assert_value_contains(&RestOperationDetails::SERVICE_URL, EDITED_OPERATION_URL)
            .await?;
        s.assert_value_contains(&RestOperationDetails::TIMEOUT, EDITED_TIMEOUT)
            .await?;
        s.expect_selected(&RestOperationDetails::SSL_AUTH, false).await?;
        operation.close(s).await?;

        s.end().await
    })
}
