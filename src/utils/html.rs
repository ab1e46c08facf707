//! Page fragment extraction.
//!
//! Page resources may be served either as bare fragments or as complete
//! HTML documents. Complete documents are reduced to their `<body>` inner
//! markup, with any `<style>` blocks from `<head>` carried along so
//! page-scoped styles travel with the content.

use std::sync::LazyLock;

use regex::Regex;

/// Case-insensitive ASCII pattern for a tag name (`body` -> `[bB][oO][dD][yY]`).
fn tag(name: &str) -> String {
    name.chars()
        .map(|c| format!("[{}{}]", c.to_ascii_lowercase(), c.to_ascii_uppercase()))
        .collect()
}

fn element_pattern(name: &str, lazy: bool) -> Regex {
    let t = tag(name);
    let body = if lazy { "(.*?)" } else { "(.*)" };
    let pattern = format!(r"(?s)<{t}(?:[ \t\r\n/][^>]*)?>{body}</{t}[ \t\r\n]*>");
    Regex::new(&pattern).expect("static element pattern")
}

static BODY: LazyLock<Regex> = LazyLock::new(|| element_pattern("body", false));
static HEAD: LazyLock<Regex> = LazyLock::new(|| element_pattern("head", true));
static STYLE: LazyLock<Regex> = LazyLock::new(|| element_pattern("style", true));

/// Whether the payload is a complete HTML document rather than a fragment.
pub fn is_full_document(markup: &str) -> bool {
    let head = markup.trim_start();
    let prefix: String = head.chars().take(9).collect::<String>().to_ascii_lowercase();
    prefix.starts_with("<!doctype") || prefix.starts_with("<html") || BODY.is_match(markup)
}

/// Reduce fetched markup to the content injected into the content slot.
///
/// Fragments are returned unchanged. Documents yield head styles followed by
/// the body's inner markup; a document without a `<body>` is passed through.
pub fn extract_content(markup: &str) -> String {
    if !is_full_document(markup) {
        return markup.to_string();
    }

    let Some(body) = BODY.captures(markup).and_then(|c| c.get(1)) else {
        return markup.to_string();
    };

    let styles: Vec<&str> = HEAD
        .captures(markup)
        .and_then(|c| c.get(1))
        .map(|head| STYLE.find_iter(head.as_str()).map(|m| m.as_str()).collect())
        .unwrap_or_default();

    if styles.is_empty() {
        return body.as_str().to_string();
    }

    let mut content = styles.join("\n");
    content.push('\n');
    content.push_str(body.as_str());
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_passthrough() {
        let fragment = "<section class=\"intro-section\"><h1>About</h1></section>";
        assert!(!is_full_document(fragment));
        assert_eq!(extract_content(fragment), fragment);
    }

    #[test]
    fn test_document_body_extracted() {
        let doc = "<!DOCTYPE html><html><head><title>x</title></head>\
                   <body class=\"page\"><main>Hello</main></body></html>";
        assert!(is_full_document(doc));
        assert_eq!(extract_content(doc), "<main>Hello</main>");
    }

    #[test]
    fn test_head_styles_travel_with_body() {
        let doc = "<html><HEAD><style>.a{color:red}</style><link rel=\"x\">\
                   <style media=\"print\">.b{}</style></HEAD><BODY><p>x</p></BODY></html>";
        assert_eq!(
            extract_content(doc),
            "<style>.a{color:red}</style>\n<style media=\"print\">.b{}</style>\n<p>x</p>"
        );
    }

    #[test]
    fn test_body_styles_not_duplicated() {
        let doc = "<html><head></head><body><style>.c{}</style><p>y</p></body></html>";
        assert_eq!(extract_content(doc), "<style>.c{}</style><p>y</p>");
    }

    #[test]
    fn test_document_without_body_passthrough() {
        let doc = "<!doctype html><html><head></head></html>";
        assert_eq!(extract_content(doc), doc);
    }

    #[test]
    fn test_tbody_is_not_body() {
        let fragment = "<table><tbody><tr><td>1</td></tr></tbody></table>";
        assert!(!is_full_document(fragment));
    }
}
