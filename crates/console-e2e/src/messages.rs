//! Texts the console shows for the outcomes under test

// Snackbar notifications
pub const REST_SERVICE_ADDED: &str = "REST service added";
pub const OPENAPI_SERVICE_ADDED: &str = "OpenApi3 service added";
pub const VALIDATION_FAILURE: &str = "Validation failure";
pub const OPENAPI_PARSE_FAILED: &str = "Parsing OpenApi3 description failed";
pub const SERVICE_SAVED: &str = "Service saved";
pub const DESCRIPTION_SAVED: &str = "Description saved";
pub const DESCRIPTION_ENABLED: &str = "Service description enabled";
pub const DESCRIPTION_DISABLED: &str = "Service description disabled";
pub const DESCRIPTION_DELETED: &str = "Service description deleted";
pub const ACCESS_RIGHTS_ADDED: &str = "Access rights added successfully";
pub const ACCESS_RIGHTS_REMOVED: &str = "Access rights removed successfully";
pub const ENDPOINT_CREATED: &str = "New endpoint created successfully";
pub const ENDPOINT_SAVED: &str = "Changes to endpoint saved successfully";
pub const ENDPOINT_REMOVED: &str = "Endpoint removed successfully";
pub const ENDPOINT_EXISTS: &str =
    "Endpoint with equivalent service code, method and path already exists for this client";

// Inline field validation
pub const URL_REQUIRED: &str = "The URL field is required";
pub const REST_URL_INVALID: &str = "REST URL is not valid";
pub const SERVICE_CODE_REQUIRED: &str = "The Service Code field is required";
pub const PATH_REQUIRED: &str = "The path field is required";
/// The details dialog reports a missing code with the untranslated field key
pub const DETAILS_CODE_REQUIRED: &str = "The fields.code_field field is required";
/// The details dialog reuses the WSDL wording for every URL kind
pub const DETAILS_URL_INVALID: &str = "WSDL URL is not valid";

// Dialog titles
pub const DISABLE_DIALOG_TITLE: &str = "Disable?";
pub const DELETE_ENDPOINT_TITLE: &str = "Delete endpoint";

// Operation help tooltips
pub const URL_HELP: &str = "The URL where requests targeted at the service are directed";
pub const TIMEOUT_HELP: &str = "The maximum duration of a request to the service, in seconds";
pub const VERIFY_CERT_HELP: &str = "Verify TLS certificate when a secure connection is established";
