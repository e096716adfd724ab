//! Deterministic file names derived from URLs.
//!
//! The scheme is dropped, every run of characters that is not a letter or a
//! digit collapses into a single `-`, and the trailing extension of the last
//! path segment is kept, stripped, or replaced depending on [`Extension`].
//!
//! ```
//! use page_loader::naming::{make_name, Extension};
//!
//! assert_eq!(make_name("http://site.com", Extension::Keep), "site-com.html");
//! assert_eq!(make_name("http://web.site.ru/here.ext", Extension::Keep), "web-site-ru-here.ext");
//! assert_eq!(make_name("http://web.site.ru/here.ext", Extension::Strip), "web-site-ru-here");
//! assert_eq!(make_name("http://site.com/blog", Extension::Replace("_files")), "site-com-blog_files");
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// Ending used by [`Extension::Keep`] when the URL has none of its own.
pub const DEFAULT_EXTENSION: &str = ".html";

static ENDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\w+$").expect("ending pattern is valid"));

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\W_]+").expect("separator pattern is valid"));

/// What to append to the transformed name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extension<'a> {
    /// Keep the detected ending, or the default one if none was found.
    Keep,
    /// Append nothing.
    Strip,
    /// Append this string verbatim instead of the detected ending.
    Replace(&'a str),
}

/// Derive a file name from `url` using [`DEFAULT_EXTENSION`] as fallback ending.
pub fn make_name(url: &str, extension: Extension<'_>) -> String {
    make_name_with_default(url, extension, DEFAULT_EXTENSION)
}

/// Derive a file name from `url`, falling back to `default_extension` when
/// [`Extension::Keep`] finds no ending.
pub fn make_name_with_default(
    url: &str,
    extension: Extension<'_>,
    default_extension: &str,
) -> String {
    let (has_authority, rest) = match url.split_once("//") {
        Some((_, rest)) => (true, rest),
        None => (false, url),
    };
    let trimmed = rest.strip_prefix('/').unwrap_or(rest);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

    let ending = detect_ending(trimmed, has_authority);
    let stem = ending
        .and_then(|ending| trimmed.strip_suffix(ending))
        .unwrap_or(trimmed);
    let name = SEPARATORS.replace_all(stem, "-");

    match extension {
        Extension::Keep => format!("{name}{}", ending.unwrap_or(default_extension)),
        Extension::Strip => name.into_owned(),
        Extension::Replace(suffix) => format!("{name}{suffix}"),
    }
}

/// The `.suffix` of the final path segment. A bare authority (`site.com`
/// after a scheme) has no path segment and therefore no ending.
fn detect_ending(trimmed: &str, has_authority: bool) -> Option<&str> {
    let path = if has_authority {
        trimmed.split_once('/').map(|(_, path)| path)?
    } else {
        trimmed
    };
    let segment = path.rsplit_once('/').map_or(path, |(_, last)| last);
    ENDING.find(segment).map(|m| m.as_str())
}
