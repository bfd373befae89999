//! Whole-URL glue: splitting a [`Url`] into codec inputs and joining
//! [`UrlParts`] back onto a base URL.
//!
//! The engines themselves never touch URL syntax; everything
//! percent-encoding related happens at this boundary. Splitting hands the
//! decoder fully decoded text and joining re-escapes it, so a record
//! round-trips through a URL even when its values carry reserved
//! characters.

use std::collections::HashMap;
use std::fmt;
use url::Url;

use crate::encoder::UrlParts;
use crate::error::CodecError;

/// Errors raised at the URL boundary, outside the codec itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlCodingError {
    /// The URL cannot carry a segmented path (`mailto:`, `data:` and
    /// friends).
    CannotBeABase(String),
    /// The codec rejected the record or the URL's parts.
    Codec(CodecError),
}

impl fmt::Display for UrlCodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlCodingError::CannotBeABase(url) => {
                write!(f, "url '{}' cannot carry a segmented path", url)
            }
            UrlCodingError::Codec(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for UrlCodingError {}

impl From<CodecError> for UrlCodingError {
    fn from(err: CodecError) -> Self {
        UrlCodingError::Codec(err)
    }
}

/// Split a URL into ordered path components and a decoded query map.
///
/// Path components and query values are both percent-decoded, so the codec
/// sees `a b` where the URL spells `a%20b`. Percent-escapes that are not
/// valid UTF-8 decode lossily instead of failing the split. Empty path
/// segments are dropped, so `/`, `/users/` and `//users` normalize to what
/// the path actually says. A key repeated in the query string snapshots to
/// its last occurrence.
pub fn split_url(url: &Url) -> Result<(Vec<String>, HashMap<String, String>), UrlCodingError> {
    let segments = url
        .path_segments()
        .ok_or_else(|| UrlCodingError::CannotBeABase(url.to_string()))?;
    let components: Vec<String> = segments
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let bytes = urlencoding::decode_binary(segment.as_bytes());
            String::from_utf8_lossy(&bytes).into_owned()
        })
        .collect();
    let mut query = HashMap::new();
    for (key, value) in url.query_pairs() {
        query.insert(key.into_owned(), value.into_owned());
    }
    Ok((components, query))
}

/// Join encoded parts onto a base URL.
///
/// The base's scheme, authority and fragment survive. Its path is replaced
/// when the record emitted any components and its query is replaced when
/// the record emitted any pairs; an empty side leaves the base's side
/// untouched. Query pairs are appended in key order so the same record
/// always assembles the same URL.
pub fn join_url(base: &Url, parts: &UrlParts) -> Result<Url, UrlCodingError> {
    let mut url = base.clone();
    if !parts.path.is_empty() {
        url.path_segments_mut()
            .map_err(|_| UrlCodingError::CannotBeABase(base.to_string()))?
            .clear()
            .extend(parts.path.iter());
    }
    if !parts.query.is_empty() {
        url.set_query(None);
        let mut pairs = url.query_pairs_mut();
        for (key, value) in parts.query_pairs() {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_drops_empty_segments() {
        let url = Url::parse("https://example.com/users//42/").expect("parse");
        let (components, query) = split_url(&url).expect("split");
        assert_eq!(components, vec!["users".to_string(), "42".to_string()]);
        assert!(query.is_empty());
    }

    #[test]
    fn test_split_percent_decodes_path_segments() {
        let url = Url::parse("https://example.com/search/a%20b/100%25").expect("parse");
        let (components, _) = split_url(&url).expect("split");
        assert_eq!(
            components,
            vec!["search".to_string(), "a b".to_string(), "100%".to_string()]
        );
    }

    #[test]
    fn test_split_decodes_query_and_keeps_last_duplicate() {
        let url = Url::parse("https://example.com/?q=first&q=a%20b").expect("parse");
        let (_, query) = split_url(&url).expect("split");
        assert_eq!(query.get("q").map(String::as_str), Some("a b"));
    }

    #[test]
    fn test_split_rejects_cannot_be_a_base() {
        let url = Url::parse("mailto:someone@example.com").expect("parse");
        let err = split_url(&url).expect_err("must reject");
        assert!(matches!(err, UrlCodingError::CannotBeABase(_)));
    }

    #[test]
    fn test_join_replaces_path_and_query() {
        let base = Url::parse("https://example.com/old?stale=1").expect("parse");
        let parts = UrlParts {
            path: vec!["users".to_string(), "42".to_string()],
            query: HashMap::from([("page".to_string(), "2".to_string())]),
        };
        let url = join_url(&base, &parts).expect("join");
        assert_eq!(url.as_str(), "https://example.com/users/42?page=2");
    }

    #[test]
    fn test_join_percent_encodes_query_values() {
        let base = Url::parse("https://example.com").expect("parse");
        let parts = UrlParts {
            path: vec!["search".to_string()],
            query: HashMap::from([("q".to_string(), "a b".to_string())]),
        };
        let url = join_url(&base, &parts).expect("join");
        assert_eq!(url.as_str(), "https://example.com/search?q=a+b");
    }

    #[test]
    fn test_join_keeps_base_path_and_query_when_parts_are_empty() {
        let base = Url::parse("https://example.com/v1?token=abc").expect("parse");
        let url = join_url(&base, &UrlParts::default()).expect("join");
        assert_eq!(url.as_str(), "https://example.com/v1?token=abc");
    }
}
