//! Endpoints of a REST service

use futures::future::BoxFuture;
use tracing::info;

use crate::driver::Key;
use crate::error::{E2eError, E2eResult};
use crate::locator;
use crate::messages;
use crate::model::{table_row, EndpointRule, HttpMethod};
use crate::pages::{self, MainPage, RestServiceEndpoints};
use crate::session::Session;
use crate::validation;

use super::{expect_field, open_client_services, REST_CODE};

/// Sign in and open the endpoints tab of the REST service's operation
async fn open_endpoints(s: &mut Session) -> E2eResult<()> {
    let main = MainPage;
    let services = main.client_info().services();
    let operation = main.rest_operation_details();
    open_client_services(s).await?;
    services.expand_service_details(s).await?;
    services.open_operation(s, REST_CODE).await?;
    pages::wait_open(s, &operation).await?;
    operation.open_endpoints_tab(s).await?;
    pages::wait_open(s, &main.rest_service_endpoints()).await
}

/// Endpoints the add scenario leaves behind, in creation order
fn created_endpoints() -> [EndpointRule; 4] {
    [
        EndpointRule::new(HttpMethod::Post, "/testreq2"),
        EndpointRule::new(HttpMethod::Post, "/testreq1"),
        EndpointRule::new(HttpMethod::Post, "/testreq3"),
        EndpointRule::new(HttpMethod::Delete, "/testreq1"),
    ]
}

fn row_of(rules: &[EndpointRule], rule: &EndpointRule) -> E2eResult<usize> {
    table_row(rules, rule).ok_or_else(|| {
        E2eError::Config(format!("{} {} is not an expected endpoint", rule.method, rule.path))
    })
}

async fn add_endpoint(s: &mut Session, rule: &EndpointRule) -> E2eResult<()> {
    let main = MainPage;
    let popup = main.add_endpoint_popup();
    main.rest_service_endpoints().open_add_dialog(s).await?;
    pages::wait_open(s, &popup).await?;
    popup.enter_path(s, &rule.path).await?;
    popup.select_request_method(s, rule.method).await?;
    popup.add_selected(s).await
}

pub(super) fn add_endpoints(s: &mut Session) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(async move {
        let main = MainPage;
        let endpoints = main.rest_service_endpoints();
        let popup = main.add_endpoint_popup();
        open_endpoints(s).await?;

        info!("Path is required");
        endpoints.open_add_dialog(s).await?;
        pages::wait_open(s, &popup).await?;
        popup.select_request_method(s, HttpMethod::Get).await?;
        popup.enter_path(s, "").await?;
        expect_field(s, &popup.request_path_message(), validation::endpoint_path("")).await?;

        popup.enter_path(s, "/noreq1").await?;
        popup.cancel(s).await?;
        pages::wait_open(s, &endpoints).await?;
        s.wait_not_present(&RestServiceEndpoints::path_entry("/noreq1"))
            .await?;

        info!("Dialog defaults and method menu");
        endpoints.open_add_dialog(s).await?;
        pages::wait_open(s, &popup).await?;
        s.assert_value(&popup.request_path(), "/").await?;
        s.assert_contains_text(&popup.method_dropdown(), HttpMethod::All.as_str())
            .await?;
        popup.click_method_menu(s).await?;
        for method in HttpMethod::ALL_METHODS {
            popup.verify_method_exists(s, method).await?;
        }
        s.press_key(Key::Escape).await?;

        let created = created_endpoints();
        let [first, rest @ ..] = &created;

        info!("Adding {} {}", first.method, first.path);
        popup.enter_path(s, &first.path).await?;
        popup.select_request_method(s, first.method).await?;
        popup.add_selected(s).await?;
        main.acknowledge_snackbar(s, messages::ENDPOINT_CREATED).await?;
        pages::wait_open(s, &endpoints).await?;
        endpoints.verify_endpoint_row(s, 1, first.method, &first.path).await?;

        info!("Duplicate endpoint is refused");
        add_endpoint(s, first).await?;
        main.acknowledge_snackbar(s, messages::ENDPOINT_EXISTS).await?;

        // New rows are appended until the table is reloaded
        for (index, rule) in rest.iter().enumerate() {
            add_endpoint(s, rule).await?;
            pages::wait_open(s, &endpoints).await?;
            endpoints
                .verify_endpoint_row(s, index + 2, rule.method, &rule.path)
                .await?;
        }

        s.end().await
    })
}

pub(super) fn edit_endpoints(s: &mut Session) -> BoxFuture<'_, E2eResult<()>> {
    Box::pin(async move {
        let main = MainPage;
        let endpoints = main.rest_service_endpoints();
        let popup = main.edit_endpoint_popup();
        let delete_title = locator::dialog_title(messages::DELETE_ENDPOINT_TITLE);
        open_endpoints(s).await?;

        let mut rules = created_endpoints().to_vec();
        let edited = EndpointRule::new(HttpMethod::Post, "/testreq1");
        let renamed = EndpointRule::new(HttpMethod::Put, "/newreq1");
        let duplicate_path = "/testreq2";
        let removed_path = "/testreq3";
        let row = row_of(&rules, &edited)?;

        endpoints.open_edit_row(s, row).await?;
        pages::wait_open(s, &popup).await?;
        s.assert_value(&popup.request_path(), &edited.path).await?;
        s.assert_contains_text(&popup.method_dropdown(), edited.method.as_str())
            .await?;

        info!("Path is required");
        popup.enter_path(s, "").await?;
        expect_field(s, &popup.request_path_message(), validation::endpoint_path("")).await?;

        info!("Cancelled edit keeps the endpoint");
        popup.enter_path(s, &renamed.path).await?;
        popup.select_request_method(s, renamed.method).await?;
        popup.cancel(s).await?;
        pages::wait_open(s, &endpoints).await?;
        s.wait_not_present(&RestServiceEndpoints::path_entry(&renamed.path))
            .await?;
        endpoints
            .verify_endpoint_row(s, row, edited.method, &edited.path)
            .await?;

        info!("Edit colliding with another endpoint is refused");
        endpoints.open_edit_row(s, row).await?;
        pages::wait_open(s, &popup).await?;
        popup.enter_path(s, duplicate_path).await?;
        popup.add_selected(s).await?;
        main.acknowledge_snackbar(s, messages::ENDPOINT_EXISTS).await?;

        info!("Changing {} {} to {} {}", edited.method, edited.path, renamed.method, renamed.path);
        popup.enter_path(s, &renamed.path).await?;
        popup.select_request_method(s, renamed.method).await?;
        popup.add_selected(s).await?;
        main.acknowledge_snackbar(s, messages::ENDPOINT_SAVED).await?;
        pages::wait_open(s, &endpoints).await?;
        rules.retain(|r| *r != edited);
        rules.push(renamed.clone());
        let row = row_of(&rules, &renamed)?;
        endpoints
            .verify_endpoint_row(s, row, renamed.method, &renamed.path)
            .await?;

        info!("Deleting {}", removed_path);
        endpoints.open_edit(s, removed_path).await?;
        pages::wait_open(s, &popup).await?;
        popup.delete_endpoint(s).await?;
        s.wait_visible(&delete_title).await?;
        popup.cancel_delete(s).await?;
        popup.cancel(s).await?;
        pages::wait_open(s, &endpoints).await?;

        endpoints.open_edit(s, removed_path).await?;
        pages::wait_open(s, &popup).await?;
        popup.delete_endpoint(s).await?;
        s.wait_visible(&delete_title).await?;
        popup.confirm_delete(s).await?;
        main.acknowledge_snackbar(s, messages::ENDPOINT_REMOVED).await?;
        s.wait_not_present(&RestServiceEndpoints::path_entry(removed_path))
            .await?;

        s.end().await
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::pages::{EndpointPopup, RestOperationDetails, Section};
    use crate::scenarios::tests::script_client_services;
    use crate::testing::{session, FakeDriver, FakeElement};

    /// Endpoints tab where the `n`th save of the add dialog lands in `rows[n]`
    fn script_endpoints_tab(driver: &FakeDriver, rows: [usize; 4]) {
        let popup = EndpointPopup::add();
        let save = pages::dialog_save(&popup.root());

        script_client_services(driver);
        driver.insert(&locator::service_link(REST_CODE), FakeElement::visible(REST_CODE));
        driver.insert(&RestOperationDetails::ROOT, FakeElement::visible(""));
        driver.insert(&RestServiceEndpoints::ROOT, FakeElement::visible(""));
        driver.insert(&popup.root(), FakeElement::visible(""));
        driver.insert(&popup.method_dropdown(), FakeElement::visible(HttpMethod::All.as_str()));
        for method in HttpMethod::ALL_METHODS {
            driver.insert(&EndpointPopup::method_option(method), FakeElement::visible(method.as_str()));
        }
        for text in [messages::ENDPOINT_CREATED, messages::ENDPOINT_EXISTS] {
            driver.insert(&locator::snackbar_with_text(text), FakeElement::visible(text));
        }
        driver.on_click(
            &RestServiceEndpoints::ADD_BUTTON,
            &popup.request_path(),
            Some(FakeElement::input("/")),
        );
        driver.on_fill(
            &popup.request_path(),
            "",
            &popup.request_path_message(),
            Some(FakeElement::visible(messages::PATH_REQUIRED)),
        );

        driver.on_nth_click(
            &save,
            1,
            &MainPage::SNACKBAR_MESSAGE,
            Some(FakeElement::visible(messages::ENDPOINT_CREATED)),
        );
        driver.on_nth_click(
            &save,
            2,
            &MainPage::SNACKBAR_MESSAGE,
            Some(FakeElement::visible(messages::ENDPOINT_EXISTS)),
        );
        // The second save is the refused duplicate
        for (rule, (nth, row)) in created_endpoints().iter().zip([1, 3, 4, 5].into_iter().zip(rows)) {
            driver.on_nth_click(
                &save,
                nth,
                &RestServiceEndpoints::cell(row, 1),
                Some(FakeElement::visible(rule.method.as_str())),
            );
            driver.on_nth_click(
                &save,
                nth,
                &RestServiceEndpoints::cell(row, 2),
                Some(FakeElement::visible(&rule.path)),
            );
        }
    }

    #[tokio::test]
    async fn test_added_endpoints_listed_in_insertion_order() {
        let driver = FakeDriver::new();
        script_endpoints_tab(&driver, [1, 2, 3, 4]);
        let mut s = session(&driver, &ManualClock::new());

        add_endpoints(&mut s).await.unwrap();

        let path_checks: Vec<String> = s
            .steps()
            .iter()
            .filter(|step| step.step_name.starts_with("expect_text_equals:") && step.step_name.ends_with("/td[2]"))
            .map(|step| step.step_name.clone())
            .collect();
        let expected: Vec<String> = (1..=4)
            .map(|row| format!("expect_text_equals:{}", RestServiceEndpoints::cell(row, 2)))
            .collect();
        assert_eq!(path_checks, expected);
        assert!(driver.actions().contains(&"press:Escape".to_string()));
    }

    #[tokio::test]
    async fn test_sorted_table_fails_insertion_order_check() {
        let driver = FakeDriver::new();
        // DELETE /testreq1 and POST /testreq1 sort ahead of /testreq2
        script_endpoints_tab(&driver, [3, 2, 4, 1]);
        let mut s = session(&driver, &ManualClock::new());

        assert!(add_endpoints(&mut s).await.is_err());
    }

    #[test]
    fn test_edited_endpoint_rows() {
        let mut rules = created_endpoints().to_vec();
        let edited = EndpointRule::new(HttpMethod::Post, "/testreq1");
        assert_eq!(row_of(&rules, &edited).unwrap(), 2);

        let renamed = EndpointRule::new(HttpMethod::Put, "/newreq1");
        rules.retain(|r| *r != edited);
        rules.push(renamed.clone());
        assert_eq!(row_of(&rules, &renamed).unwrap(), 1);
        assert!(row_of(&rules, &edited).is_err());
    }
}
