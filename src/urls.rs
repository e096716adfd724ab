//! Classification and resolution of references found in a page.

use url::Url;

use crate::error::{PageLoaderError, Result};

/// Loose absolute-URL test: anything carrying a `//` separator.
pub fn is_absolute(candidate: &str) -> bool {
    candidate.contains("//")
}

/// Whether `candidate` belongs to the same site as `page_url`.
///
/// References without a host are always local. Otherwise the hosts must be
/// equal, or the candidate must be the `www.` variant of the page host. The
/// reverse (bare candidate, `www.` page) is not treated as local.
pub fn is_local(candidate: &str, page_url: &str) -> bool {
    let Some(candidate_host) = authority(candidate) else {
        return true;
    };
    authority(page_url).is_some_and(|page_host| {
        candidate_host == page_host || candidate_host == format!("www.{page_host}")
    })
}

/// Make `candidate` absolute by joining it onto `page_url`.
///
/// Absolute candidates are returned unchanged. Relative ones follow RFC 3986
/// reference resolution, so `..`, root-relative paths and query strings
/// behave the way a browser resolves them.
pub fn resolve_absolute(candidate: &str, page_url: &str) -> Result<String> {
    if is_absolute(candidate) {
        return Ok(candidate.to_string());
    }
    Url::parse(page_url)
        .and_then(|base| base.join(candidate))
        .map(String::from)
        .map_err(|source| PageLoaderError::InvalidUrl {
            url: candidate.to_string(),
            source,
        })
}

/// Prefix `http://` to a page URL typed without a scheme.
pub fn normalize_page_url(url: &str) -> String {
    if is_absolute(url) {
        url.to_string()
    } else {
        tracing::warn!("Looks like the scheme is missing in \"{url}\", using \"http://{url}\"");
        format!("http://{url}")
    }
}

/// `host[:port]` of a URL, or `None` for references without an authority.
///
/// Hosts come back lowercased and a port equal to the scheme's default is
/// dropped, so `http://Site.test:80` and `http://site.test` compare equal.
fn authority(raw: &str) -> Option<String> {
    let parsed = if raw.starts_with("//") {
        Url::parse(&format!("http:{raw}"))
    } else {
        Url::parse(raw)
    };
    let parsed = parsed.ok()?;
    let host = parsed.host_str().filter(|host| !host.is_empty())?;
    Some(match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
