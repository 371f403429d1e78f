//! Qualified-name helpers shared by elements and attributes.
//!
//! Names are stored split: a local part plus an optional prefix. An empty
//! prefix is treated as no prefix, so `":local"` and `"local"` produce the
//! same parts.
//!
//! See <https://www.w3.org/TR/xml-names/#NT-QName>

use std::borrow::Cow;

/// Splits `prefix:local` at the first colon.
///
/// # Examples
///
/// ```
/// use xmlgrove::util::qname::split_qname;
///
/// assert_eq!(split_qname("svg:rect"), (Some("svg"), "rect"));
/// assert_eq!(split_qname("div"), (None, "div"));
/// assert_eq!(split_qname(":div"), (None, "div"));
/// ```
#[must_use]
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.split_once(':') {
        Some((prefix, local)) if !prefix.is_empty() => (Some(prefix), local),
        Some((_, local)) => (None, local),
        None => (None, qname),
    }
}

/// Joins a prefix and local name back into `prefix:local`.
///
/// Borrows `local` unchanged when there is no prefix.
#[must_use]
pub fn join_qname<'a>(prefix: Option<&str>, local: &'a str) -> Cow<'a, str> {
    match prefix {
        Some(prefix) if !prefix.is_empty() => Cow::Owned(format!("{prefix}:{local}")),
        _ => Cow::Borrowed(local),
    }
}

/// Converts a namespace URI argument to its stored form: `""` is no
/// namespace.
#[must_use]
pub fn namespace_from_uri(uri: &str) -> Option<String> {
    (!uri.is_empty()).then(|| uri.to_string())
}
