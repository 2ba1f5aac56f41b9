//! Client services scenarios
//!
//! Scenarios run in registry order. Later ones work on artifacts earlier
//! ones created (the `s1c1` REST service, its endpoints and access rights);
//! each declares the scenarios it builds on in `requires` so the runner can
//! skip it when one of them did not pass.

use std::fmt;

use futures::future::BoxFuture;

use crate::error::{E2eError, E2eResult};
use crate::locator::Locator;
use crate::pages::{self, FrontPage, MainPage};
use crate::session::Session;
use crate::validation::FieldOutcome;

mod access_rights;
mod endpoints;
mod openapi;
mod rest_operation;
mod rest_services;

/// Code of the REST service the suite creates
pub const REST_CODE: &str = "s1c1";
/// Code the REST service is renamed to
pub const RENAMED_REST_CODE: &str = "s1c2";
/// Operation URL set by the operation edit; the description follows it
pub const EDITED_OPERATION_URL: &str = "https://www.niis.org/nosuch2/";
pub const OPENAPI_CODE: &str = "s2c1";
pub const RENAMED_OPENAPI_CODE: &str = "s2c2";

pub const ADD_REST_SERVICE: &str = "Security server client add rest service";
pub const EDIT_REST_OPERATION: &str = "Security server client edit rest operation";
pub const ADD_ACCESS_RIGHTS: &str = "Security server client add rest operation access rights";
pub const REMOVE_ACCESS_RIGHTS: &str = "Security server client remove rest operation access rights";
pub const ADD_ENDPOINTS: &str = "Security server client add rest endpoints";
pub const EDIT_ENDPOINTS: &str = "Security server client edit rest endpoints";
pub const EDIT_REST_SERVICE: &str = "Security server client edit rest service";
pub const DELETE_REST_SERVICE: &str = "Security server client delete rest service";
pub const ADD_OPENAPI_SERVICE: &str = "Security server client add openapi service";
pub const EDIT_OPENAPI_SERVICE: &str = "Security server client edit openapi service";
pub const DELETE_OPENAPI_SERVICE: &str = "Security server client delete openapi service";

const REST_TAGS: &[&str] = &["ss", "clients", "restservices"];
const OPENAPI_TAGS: &[&str] = &["ss", "clients", "openapi"];

pub type ScenarioFn = for<'a> fn(&'a mut Session) -> BoxFuture<'a, E2eResult<()>>;

#[derive(Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub tags: &'static [&'static str],
    /// Scenarios whose artifacts this one works on
    pub requires: &'static [&'static str],
    pub enabled_by_default: bool,
    pub run: ScenarioFn,
}

impl Scenario {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag)
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("requires", &self.requires)
            .field("enabled_by_default", &self.enabled_by_default)
            .finish()
    }
}

/// All scenarios in execution order
pub fn all() -> Vec<Scenario> {
    vec![
        Scenario {
            name: ADD_REST_SERVICE,
            tags: REST_TAGS,
            requires: &[],
            enabled_by_default: true,
            run: rest_services::add_rest_service,
        },
        Scenario {
            name: EDIT_REST_OPERATION,
            tags: REST_TAGS,
            requires: &[ADD_REST_SERVICE],
            enabled_by_default: true,
            run: rest_operation::edit_rest_operation,
        },
        Scenario {
            name: ADD_ACCESS_RIGHTS,
            tags: REST_TAGS,
            requires: &[ADD_REST_SERVICE],
            enabled_by_default: true,
            run: access_rights::add_access_rights,
        },
        Scenario {
            name: REMOVE_ACCESS_RIGHTS,
            tags: REST_TAGS,
            requires: &[ADD_ACCESS_RIGHTS],
            enabled_by_default: true,
            run: access_rights::remove_access_rights,
        },
        Scenario {
            name: ADD_ENDPOINTS,
            tags: REST_TAGS,
            requires: &[ADD_REST_SERVICE],
            enabled_by_default: true,
            run: endpoints::add_endpoints,
        },
        Scenario {
            name: EDIT_ENDPOINTS,
            tags: REST_TAGS,
            requires: &[ADD_ENDPOINTS],
            enabled_by_default: true,
            run: endpoints::edit_endpoints,
        },
        Scenario {
            name: EDIT_REST_SERVICE,
            tags: REST_TAGS,
            requires: &[EDIT_REST_OPERATION],
            enabled_by_default: true,
            run: rest_services::edit_rest_service,
        },
        Scenario {
            name: DELETE_REST_SERVICE,
            tags: REST_TAGS,
            requires: &[EDIT_REST_SERVICE],
            enabled_by_default: true,
            run: rest_services::delete_rest_service,
        },
        // The console cannot fetch external OpenAPI descriptions in every
        // environment, so these only run when asked for.
        Scenario {
            name: ADD_OPENAPI_SERVICE,
            tags: OPENAPI_TAGS,
            requires: &[],
            enabled_by_default: false,
            run: openapi::add_openapi_service,
        },
        Scenario {
            name: EDIT_OPENAPI_SERVICE,
            tags: OPENAPI_TAGS,
            requires: &[ADD_OPENAPI_SERVICE],
            enabled_by_default: false,
            run: openapi::edit_openapi_service,
        },
        Scenario {
            name: DELETE_OPENAPI_SERVICE,
            tags: OPENAPI_TAGS,
            requires: &[EDIT_OPENAPI_SERVICE],
            enabled_by_default: false,
            run: openapi::delete_openapi_service,
        },
    ]
}

pub fn find(name: &str) -> E2eResult<Scenario> {
    all()
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| E2eError::ScenarioNotFound(name.to_string()))
}

/// Sign in and open the services tab of the test client
pub(crate) async fn open_client_services(s: &mut Session) -> E2eResult<()> {
    let front = FrontPage;
    let main = MainPage;
    let clients = main.clients_tab();
    let client_info = main.client_info();

    front.navigate(s).await?;
    pages::wait_open(s, &front).await?;
    front.signin_default_user(s).await?;

    main.open_clients_tab(s).await?;
    pages::wait_open(s, &clients).await?;
    clients.open_test_service(s).await?;
    pages::wait_open(s, &client_info).await?;
    client_info.open_services_tab(s).await?;
    pages::wait_open(s, &client_info.services()).await
}

/// Check the inline message a field rule predicts
pub(crate) async fn expect_field(s: &mut Session, message: &Locator, outcome: FieldOutcome) -> E2eResult<()> {
    match outcome {
        FieldOutcome::Inline(text) => {
            s.wait_visible(message).await?;
            s.assert_contains_text(message, text).await
        }
        FieldOutcome::Accepted | FieldOutcome::RejectedOnSubmit(_) => s.wait_not_present(message).await,
    }
}

/// Check the snackbar a value rejected on submit produces, then dismiss it
pub(crate) async fn expect_rejected(s: &mut Session, outcome: FieldOutcome) -> E2eResult<()> {
    match outcome {
        FieldOutcome::RejectedOnSubmit(text) => MainPage.acknowledge_snackbar(s, text).await,
        other => Err(E2eError::assertion(
            "field rule",
            "a value rejected on submit",
            format!("{:?}", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::time::Duration;

    use crate::clock::ManualClock;
    use crate::messages;
    use crate::pages::{ClientInfo, ClientsTab, ServicesSection};
    use crate::testing::{session, FakeDriver, FakeElement};

    /// Script the views `open_client_services` passes through
    pub(super) fn script_client_services(driver: &FakeDriver) {
        for root in [
            FrontPage::APP,
            FrontPage::USERNAME,
            ClientsTab::ROOT,
            ClientInfo::ROOT,
            ServicesSection::ROOT,
        ] {
            driver.insert(&root, FakeElement::visible(""));
        }
    }

    #[tokio::test]
    async fn test_open_client_services_signs_in_first() {
        let driver = FakeDriver::new();
        script_client_services(&driver);
        let mut s = session(&driver, &ManualClock::new());

        open_client_services(&mut s).await.unwrap();

        let actions = driver.actions();
        assert_eq!(actions[0], "navigate:https://localhost:4000");
        assert_eq!(actions[1], format!("fill:{}=xrd", FrontPage::USERNAME.value()));
        assert_eq!(
            actions.last().unwrap(),
            &format!("click:{}", ClientInfo::SERVICES_TAB.value())
        );
    }

    #[tokio::test]
    async fn test_inline_message_is_waited_for() {
        let driver = FakeDriver::new();
        let clock = ManualClock::new();
        let message = ServicesSection::service_url_message();
        // Rendered one poll after the input changes
        driver.insert(&message, FakeElement::visible(messages::URL_REQUIRED).shown_after(1));
        let mut s = session(&driver, &clock);

        expect_field(&mut s, &message, FieldOutcome::Inline(messages::URL_REQUIRED))
            .await
            .unwrap();
        assert_eq!(clock.elapsed(), Duration::from_millis(500));

        let err = expect_field(&mut s, &message, FieldOutcome::Inline(messages::REST_URL_INVALID))
            .await
            .unwrap_err();
        assert!(matches!(err, E2eError::AssertionFailed { .. }));
    }

    #[tokio::test]
    async fn test_accepted_value_shows_no_message() {
        let driver = FakeDriver::new();
        let mut s = session(&driver, &ManualClock::new());
        let message = ServicesSection::service_code_message();

        expect_field(&mut s, &message, FieldOutcome::Accepted).await.unwrap();
        expect_field(&mut s, &message, FieldOutcome::RejectedOnSubmit(messages::VALIDATION_FAILURE))
            .await
            .unwrap();
        assert!(expect_rejected(&mut s, FieldOutcome::Accepted).await.is_err());
    }

    #[test]
    fn test_prerequisites_precede_dependents() {
        let scenarios = all();
        let mut seen = HashSet::new();
        for scenario in &scenarios {
            for required in scenario.requires {
                assert!(
                    seen.contains(required),
                    "{} requires {} which does not run before it",
                    scenario.name,
                    required
                );
            }
            assert!(seen.insert(scenario.name), "duplicate scenario {}", scenario.name);
        }
    }

    #[test]
    fn test_rest_scenarios_enabled_openapi_opt_in() {
        for scenario in all() {
            assert_eq!(scenario.enabled_by_default, scenario.has_tag("restservices"));
        }
    }

    #[test]
    fn test_find_by_name() {
        assert_eq!(find(EDIT_ENDPOINTS).unwrap().requires, &[ADD_ENDPOINTS]);
        assert!(matches!(find("nope"), Err(E2eError::ScenarioNotFound(_))));
    }
}
