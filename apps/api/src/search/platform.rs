//! Derives a short platform label from a result URL's hostname.

use url::Url;

const FALLBACK: &str = "web";

/// Returns the main domain label, e.g. `"linkedin"` for
/// `https://www.linkedin.com/in/jane` and `"spectator"` for
/// `https://spectator.co.uk/article`. Never panics; malformed URLs map to
/// `"web"`.
pub fn identify_platform(raw_url: &str) -> String {
    let Ok(parsed) = Url::parse(raw_url) else {
        return FALLBACK.to_string();
    };
    let Some(host) = parsed.host_str() else {
        return FALLBACK.to_string();
    };

    let domain = host.strip_prefix("www.").unwrap_or(host);
    let parts: Vec<&str> = domain.split('.').collect();

    // Two-part public suffixes like co.uk / com.au: skip the country label.
    if parts.len() >= 3 && matches!(parts[parts.len() - 2], "co" | "com" | "org" | "net") {
        return parts[parts.len() - 3].to_string();
    }

    parts[0].to_string()
}
