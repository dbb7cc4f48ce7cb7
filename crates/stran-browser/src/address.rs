//! Turning address-bar text into a loadable URL.

use url::Url;

const KNOWN_SCHEMES: &[&str] = &["http", "https", "about", "stran", "file", "data"];

/// Interpret what the user typed as a URL.
///
/// Input with a known scheme is kept as is; anything else that looks like
/// a host is assumed to be `https://`. Returns `None` for blank input or
/// text with inner whitespace.
pub fn url_from_user_input(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
        return None;
    }

    if let Ok(url) = Url::parse(trimmed) {
        if KNOWN_SCHEMES.contains(&url.scheme()) {
            return Some(url.into());
        }
    }

    Url::parse(&format!("https://{trimmed}"))
        .ok()
        .filter(|url| url.host().is_some())
        .map(String::from)
}
