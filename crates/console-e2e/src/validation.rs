//! Field rules of the service dialogs
//!
//! Scenarios feed edge-case values into the dialogs and assert on the
//! message the console shows. The expected message comes from here so the
//! add dialog and the details dialog stay consistent about which value
//! triggers which rule.

use std::sync::OnceLock;

use regex::Regex;

use crate::messages;

/// Dialog a field lives in; the two word their messages differently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceForm {
    Add,
    Details,
}

/// What the console does with a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    /// Accepted by the inline rules
    Accepted,
    /// Inline message shown while typing, submit stays disabled
    Inline(&'static str),
    /// Passes the inline rules but the server answers with a snackbar
    RejectedOnSubmit(&'static str),
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https?://[^\s/?#]+\.[^\s/?#]+(:\d+)?([/?#]\S*)?$")
            .expect("static URL pattern compiles")
    })
}

pub fn service_url(form: ServiceForm, url: &str) -> FieldOutcome {
    if url.is_empty() {
        return FieldOutcome::Inline(messages::URL_REQUIRED);
    }
    if !url_pattern().is_match(url) {
        return FieldOutcome::Inline(match form {
            ServiceForm::Add => messages::REST_URL_INVALID,
            ServiceForm::Details => messages::DETAILS_URL_INVALID,
        });
    }
    FieldOutcome::Accepted
}

pub fn service_code(form: ServiceForm, code: &str) -> FieldOutcome {
    if code.is_empty() {
        return FieldOutcome::Inline(match form {
            ServiceForm::Add => messages::SERVICE_CODE_REQUIRED,
            ServiceForm::Details => messages::DETAILS_CODE_REQUIRED,
        });
    }
    if code.contains('/') {
        return FieldOutcome::RejectedOnSubmit(messages::VALIDATION_FAILURE);
    }
    FieldOutcome::Accepted
}

pub fn endpoint_path(path: &str) -> FieldOutcome {
    if path.is_empty() {
        FieldOutcome::Inline(messages::PATH_REQUIRED)
    } else {
        FieldOutcome::Accepted
    }
}
