//! Logical element descriptors
//!
//! Locators are immutable strategy+value pairs resolved against the live DOM
//! on every use; the target page is dynamic and externally controlled, so
//! nothing is cached. Attribute-based strategies (`Id`, `Name`, `AriaLabel`)
//! are preferred over structural paths, which break on every front-end
//! release.

use std::fmt;

/// A strategy+value pair identifying zero or more elements on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Match on the `id` attribute.
    Id(String),
    /// Match on the `name` attribute.
    Name(String),
    /// Match on the `aria-label` attribute.
    AriaLabel(String),
    /// Anchor whose visible text contains the given fragment.
    LinkText(String),
    /// Raw CSS selector.
    Css(String),
    /// Raw XPath expression, for text-anchored lookups CSS cannot express.
    XPath(String),
}

/// How a locator is executed against the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Query {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn id(value: impl Into<String>) -> Self {
        Self::Id(value.into())
    }

    pub fn name(value: impl Into<String>) -> Self {
        Self::Name(value.into())
    }

    pub fn aria_label(value: impl Into<String>) -> Self {
        Self::AriaLabel(value.into())
    }

    pub fn link_text(value: impl Into<String>) -> Self {
        Self::LinkText(value.into())
    }

    pub fn css(value: impl Into<String>) -> Self {
        Self::Css(value.into())
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self::XPath(value.into())
    }

    pub(crate) fn query(&self) -> Query {
        match self {
            Self::Id(v) => Query::Css(format!("[id='{}']", escape_css_value(v))),
            Self::Name(v) => Query::Css(format!("[name='{}']", escape_css_value(v))),
            Self::AriaLabel(v) => Query::Css(format!("[aria-label='{}']", escape_css_value(v))),
            Self::LinkText(v) => Query::XPath(format!(
                "//a[contains(normalize-space(.), {})]",
                xpath_literal(v)
            )),
            Self::Css(v) => Query::Css(v.clone()),
            Self::XPath(v) => Query::XPath(v.clone()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(v) => write!(f, "id={v}"),
            Self::Name(v) => write!(f, "name={v}"),
            Self::AriaLabel(v) => write!(f, "aria-label={v}"),
            Self::LinkText(v) => write!(f, "link-text={v}"),
            Self::Css(v) => write!(f, "css={v}"),
            Self::XPath(v) => write!(f, "xpath={v}"),
        }
    }
}

/// Escape a value for use inside a single-quoted CSS attribute selector.
fn escape_css_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Render a string as an XPath 1.0 literal, quotes included. XPath has no
/// escape syntax, so a value carrying both quote kinds becomes a `concat()`
/// call; anything else would silently match nothing.
pub(crate) fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{value}'")
    } else if !value.contains('"') {
        format!("\"{value}\"")
    } else {
        let parts: Vec<String> = value.split('\'').map(|part| format!("'{part}'")).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}
