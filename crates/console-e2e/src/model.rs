//! Console entities the scenarios refer to

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Request methods offered by the endpoint dialog, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    All,
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
    Trace,
}

impl HttpMethod {
    pub const ALL_METHODS: [HttpMethod; 9] = [
        HttpMethod::All,
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::All => "ALL",
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (method, path) rule of a REST service.
///
/// Ordered the way the endpoint table lists a freshly loaded service:
/// by path, then by method name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRule {
    pub method: HttpMethod,
    pub path: String,
}

impl EndpointRule {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

impl Ord for EndpointRule {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path
            .cmp(&other.path)
            .then_with(|| self.method.as_str().cmp(other.method.as_str()))
    }
}

impl PartialOrd for EndpointRule {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// 1-based row of `rule` once `rules` are listed in table order
pub fn table_row(rules: &[EndpointRule], rule: &EndpointRule) -> Option<usize> {
    let mut sorted = rules.to_vec();
    sorted.sort();
    sorted.iter().position(|r| r == rule).map(|i| i + 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    Rest,
    OpenApi3,
}

impl ServiceType {
    /// Prefix of the description header in the services list
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Rest => "REST",
            ServiceType::OpenApi3 => "OPENAPI3",
        }
    }

    /// Type as written in the service details dialog
    pub fn details_name(&self) -> &'static str {
        match self {
            ServiceType::Rest => "REST API Base Path",
            ServiceType::OpenApi3 => "OpenAPI 3 Description",
        }
    }

    /// Header of a description backed by `url`, e.g. `REST (https://...)`
    pub fn description_header(&self, url: &str) -> String {
        format!("{} ({})", self.label(), url)
    }
}

/// Kinds of access right subjects listed by the add-subjects search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectType {
    Subsystem,
    GlobalGroup,
    LocalGroup,
}

impl SubjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectType::Subsystem => "SUBSYSTEM",
            SubjectType::GlobalGroup => "GLOBALGROUP",
            SubjectType::LocalGroup => "LOCALGROUP",
        }
    }
}
