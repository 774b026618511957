//! Metadata rendering
//!
//! Turns a PyPI JSON metadata document into display markdown: a short-form
//! summary built from the `info` block, and the long description used as
//! the cached `md` payload. Markup-dialect conversion (RST and friends) is
//! out of scope; descriptions pass through as-is.

use serde_json::Value;

/// Render the short-form summary for a package
///
/// Always derived from the JSON document, never cached separately.
#[must_use]
pub fn render_summary(package: &str, doc: &Value) -> String {
    let info = &doc["info"];
    let mut parts = vec![format!("## {package}")];

    parts.push(format!(
        "**Version:** `{}`",
        str_field(info, "version").unwrap_or("N/A")
    ));
    parts.push(format!(
        "**Requires Python:** {}",
        str_field(info, "requires_python").unwrap_or("N/A")
    ));

    if let Some(homepage) = str_field(info, "home_page").filter(|s| !s.is_empty()) {
        parts.push(format!("**Homepage:** [{homepage}]({homepage})"));
    }

    let project_urls = &info["project_urls"];
    let release_url = str_field(project_urls, "Download URL")
        .or_else(|| str_field(project_urls, "Source"));
    if let Some(url) = release_url {
        parts.push(format!("**Release:** [{url}]({url})"));
    }
    if let Some(url) = str_field(project_urls, "Bug Tracker") {
        parts.push(format!("**Bug Tracker:** [{url}]({url})"));
    }

    if let Some(classifiers) = info["classifiers"].as_array() {
        let listed: Vec<String> = classifiers
            .iter()
            .filter_map(Value::as_str)
            .take(15)
            .map(|c| format!("- {c}"))
            .collect();
        if !listed.is_empty() {
            parts.push(format!("**Classifiers:**\n{}", listed.join("\n")));
        }
    }

    if let Some(summary) = str_field(info, "summary").filter(|s| !s.is_empty()) {
        parts.push(format!("**Summary:** {summary}"));
    }

    parts.join("\n\n")
}

/// Extract the long description as the markdown payload
///
/// Returns an empty string when the document has no description, so a
/// partial-miss upgrade stores a definite value rather than retrying on
/// every lookup.
#[must_use]
pub fn render_description(doc: &Value) -> String {
    str_field(&doc["info"], "description")
        .unwrap_or_default()
        .to_string()
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}
