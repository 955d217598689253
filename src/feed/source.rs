use url::Url;

const FALLBACK_SOURCE: &str = "calendar";

/// Label for events coming from `feed_url`: its host without a leading `www.`.
///
/// Falls back to `"calendar"` when the URL cannot be parsed or has no host.
pub fn source_name(feed_url: &str) -> String {
    Url::parse(feed_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_owned))
        .filter(|host| !host.is_empty())
        .map(|host| host.strip_prefix("www.").map(str::to_owned).unwrap_or(host))
        .unwrap_or_else(|| FALLBACK_SOURCE.to_owned())
}
