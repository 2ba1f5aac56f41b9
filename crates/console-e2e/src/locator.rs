//! Element locators
//!
//! Page objects declare their elements as `const` locators; dynamic rows
//! (a service link for a given code, a member cell for a subject) are built
//! with the helpers at the bottom of this module.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    XPath,
    Css,
}

impl Strategy {
    /// Name of the strategy in the WebDriver `using` field
    pub fn webdriver_name(&self) -> &'static str {
        match self {
            Strategy::XPath => "xpath",
            Strategy::Css => "css selector",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    strategy: Strategy,
    value: Cow<'static, str>,
}

impl Locator {
    pub const fn xpath(value: &'static str) -> Self {
        Self {
            strategy: Strategy::XPath,
            value: Cow::Borrowed(value),
        }
    }

    pub const fn css(value: &'static str) -> Self {
        Self {
            strategy: Strategy::Css,
            value: Cow::Borrowed(value),
        }
    }

    pub fn dynamic_xpath(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::XPath,
            value: Cow::Owned(value.into()),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Scope an XPath locator below another XPath locator.
    ///
    /// `child` must be a relative path starting with `//` or `/`.
    pub fn within(&self, child: &str) -> Self {
        debug_assert_eq!(self.strategy, Strategy::XPath);
        Self::dynamic_xpath(format!("{}{}", self.value, child))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.strategy {
            Strategy::XPath => write!(f, "xpath:{}", self.value),
            Strategy::Css => write!(f, "css:{}", self.value),
        }
    }
}

/// Quote a string for use inside an XPath expression.
///
/// XPath 1.0 has no escape syntax, so a value holding both quote kinds is
/// spliced together with `concat()`.
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('"') {
        return format!("\"{}\"", value);
    }
    if !value.contains('\'') {
        return format!("'{}'", value);
    }
    let parts: Vec<String> = value
        .split('"')
        .map(|part| format!("\"{}\"", part))
        .collect();
    format!("concat({})", parts.join(", '\"', "))
}

/// Snackbar banner holding the given text
pub fn snackbar_with_text(text: &str) -> Locator {
    Locator::dynamic_xpath(format!(
        "//*[contains(@class, \"v-snack\") and .//*[contains(text(), {})]]",
        xpath_literal(text)
    ))
}

/// Dialog whose title contains the given text
pub fn dialog_title(text: &str) -> Locator {
    Locator::dynamic_xpath(format!(
        "//*[contains(@data-test, \"dialog-title\") and contains(text(), {})]",
        xpath_literal(text)
    ))
}

/// Service link cell for a service code in the expanded description
pub fn service_link(code: &str) -> Locator {
    Locator::dynamic_xpath(format!(
        "//td[contains(@data-test, \"service-link\") and contains(text(), {})]",
        xpath_literal(code)
    ))
}

/// Row of the service table for a service code
pub fn service_row(code: &str) -> Locator {
    Locator::dynamic_xpath(format!(
        "//tr[.//td[@data-test=\"service-link\" and contains(text(), {})]]",
        xpath_literal(code)
    ))
}

/// Cell of the access rights members table naming a subject
pub fn access_right_member(subject: &str) -> Locator {
    Locator::dynamic_xpath(format!(
        "//table[contains(@class, \"group-members-table\")]//td[contains(text(), {})]",
        xpath_literal(subject)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_literal() {
        assert_eq!(xpath_literal("s1c1"), "\"s1c1\"");
    }

    #[test]
    fn test_literal_with_double_quote() {
        assert_eq!(xpath_literal("say \"hi\""), "'say \"hi\"'");
    }

    #[test]
    fn test_literal_with_both_quotes() {
        assert_eq!(
            xpath_literal("it's \"x\""),
            "concat(\"it's \", '\"', \"x\", '\"', \"\")"
        );
    }

    #[test]
    fn test_service_link_locator() {
        let loc = service_link("s1c1");
        assert_eq!(loc.strategy(), Strategy::XPath);
        assert_eq!(
            loc.value(),
            "//td[contains(@data-test, \"service-link\") and contains(text(), \"s1c1\")]"
        );
    }

    #[test]
    fn test_within_scopes_xpath() {
        let row = service_row("s1c1");
        let lock = row.within("//*[contains(@class, \"mdi-lock\")]");
        assert!(lock.value().starts_with("//tr[.//td"));
        assert!(lock.value().ends_with("mdi-lock\")]"));
    }

    #[test]
    fn test_display_names_strategy() {
        assert_eq!(Locator::css("#app").to_string(), "css:#app");
        assert_eq!(Locator::xpath("//a").to_string(), "xpath://a");
    }
}
