// Request signing
//
// motionEye authenticates API calls with a `_signature` query parameter.
// The server recomputes it over a canonical form of the request (path,
// sorted and re-encoded query, body, key), so the canonicalization here
// must agree with the server's byte for byte. Scheme and host are not
// covered.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Method;
use sha1::{Digest, Sha1};
use tracing::trace;
use url::form_urlencoded;

/// Query parameter carrying the signature. Never part of its own input.
pub const SIGNATURE_PARAM: &str = "_signature";

/// Bodies starting with this marker are file attachments and are not signed.
const ATTACHMENT_MARKER: &str = "---";

/// Characters left unescaped when re-encoding query values: the set
/// JavaScript's `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'!')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*');

/// Compute the signature for a request.
///
/// `url` may be absolute or just `path?query`; only the path, query and
/// fragment take part. Any `_signature` already present in the query is
/// ignored, so re-signing a signed URL gives the same result.
///
/// The digest input is `{method}:{path_and_query}:{body}:{key}` where an
/// absent body is the empty string.
pub fn compute_signature(method: &Method, url: &str, body: Option<&str>, key: &str) -> String {
    let canonical = canonical_path(url);
    trace!(%method, path = %canonical, "computing request signature");

    let path = sanitize(&canonical);
    let key = sanitize(key);
    let body = body
        .filter(|b| !b.starts_with(ATTACHMENT_MARKER))
        .map(sanitize)
        .unwrap_or_default();

    let input = format!("{method}:{path}:{body}:{key}");
    hex::encode(Sha1::digest(input.as_bytes()))
}

/// Path, canonical query and fragment, with scheme and host dropped.
fn canonical_path(url: &str) -> String {
    let parts = SplitUrl::parse(url);
    let query = canonical_query(parts.query);

    let mut out = String::with_capacity(url.len());
    out.push_str(parts.path);
    if !query.is_empty() {
        out.push('?');
        out.push_str(&query);
    }
    if !parts.fragment.is_empty() {
        out.push('#');
        out.push_str(parts.fragment);
    }
    out
}

/// Decode, drop `_signature`, stable-sort by name, re-encode values.
fn canonical_query(query: &str) -> String {
    let mut pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .filter(|(name, _)| name != SIGNATURE_PARAM)
        .collect();

    // `sort_by` is stable: repeated names keep their relative order.
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    pairs
        .iter()
        .map(|(name, value)| format!("{name}={}", utf8_percent_encode(value, COMPONENT)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Replace everything outside the signing alphabet with `-`.
fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if is_signing_char(c) { c } else { '-' })
        .collect()
}

fn is_signing_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '/' | '?' | '_' | '.' | '=' | '&' | '{' | '}' | '[' | ']' | '"' | ':' | ',' | ' ' | '-'
        )
}

/// `urlsplit`-style view of a URL string. No normalization is applied.
#[derive(Debug, PartialEq, Eq)]
struct SplitUrl<'a> {
    path: &'a str,
    query: &'a str,
    fragment: &'a str,
}

impl<'a> SplitUrl<'a> {
    fn parse(url: &'a str) -> Self {
        let mut rest = url;

        if let Some((scheme, after)) = rest.split_once(':') {
            if is_scheme(scheme) {
                rest = after;
            }
        }

        if let Some(after) = rest.strip_prefix("//") {
            let end = after.find(['/', '?', '#']).unwrap_or(after.len());
            rest = &after[end..];
        }

        let (rest, fragment) = rest.split_once('#').unwrap_or((rest, ""));
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

        Self {
            path,
            query,
            fragment,
        }
    }
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_KEY: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";
    const PASSWORD_KEY: &str = "5baa61e4c9b93f3f0682250b6cf8331b7ee68fd8";

    fn sha1_hex(input: &str) -> String {
        hex::encode(Sha1::digest(input.as_bytes()))
    }

    // ── Golden vectors ──────────────────────────────────────────────

    #[test]
    fn golden_login_signature() {
        let sig = compute_signature(
            &Method::GET,
            "http://host:8000/login?_username=username",
            None,
            PASSWORD_KEY,
        );
        assert_eq!(sig, "2df0446590ac6038c4cec2b3d39639bf22575fed");
    }

    #[test]
    fn golden_signature_ignores_host() {
        let sig = compute_signature(
            &Method::GET,
            "http://127.0.0.1:1234/login?_username=admin",
            None,
            PASSWORD_KEY,
        );
        assert_eq!(sig, "010aec346f06cb5cf7f25dd5e3a33798d3032ae7");
    }

    #[test]
    fn golden_snapshot_signature() {
        let sig = compute_signature(
            &Method::GET,
            "http://host:8000/picture/100/current/?_username=user",
            None,
            EMPTY_KEY,
        );
        assert_eq!(sig, "5419538a3223b63a72d79982cd7604e17442b350");
    }

    #[test]
    fn golden_post_with_body() {
        let sig = compute_signature(
            &Method::POST,
            "http://h/action/1/snapshot?_username=admin",
            Some("{}"),
            PASSWORD_KEY,
        );
        assert_eq!(sig, "05d54877ec8a4f2666f2fb6dbaa5b8d3334b7cac");
    }

    // ── Canonicalization ────────────────────────────────────────────

    #[test]
    fn existing_signature_is_ignored() {
        let signed = compute_signature(
            &Method::GET,
            "/login?_username=admin&_signature=deadbeef",
            None,
            PASSWORD_KEY,
        );
        let unsigned =
            compute_signature(&Method::GET, "/login?_username=admin", None, PASSWORD_KEY);
        assert_eq!(signed, unsigned);
    }

    #[test]
    fn signature_is_deterministic() {
        let url = "http://host/config/1/set?b=2&a=1";
        let first = compute_signature(&Method::POST, url, Some(r#"{"a": 1}"#), "k");
        let second = compute_signature(&Method::POST, url, Some(r#"{"a": 1}"#), "k");
        assert_eq!(first, second);
    }

    #[test]
    fn query_sorted_by_name_only() {
        // Equal names keep their order; values are not sorted.
        assert_eq!(canonical_query("b=2&a=1&_signature=zz&a=0"), "a=1&a=0&b=2");
        let sig = compute_signature(&Method::GET, "http://h/x?b=2&a=1&_signature=zz&a=0", None, EMPTY_KEY);
        assert_eq!(sig, "550a93acbf3f76be8bfc02577f9200250efaa702");
    }

    #[test]
    fn values_reencoded_like_encode_uri_component() {
        assert_eq!(
            canonical_query("q=a+b%2Fc!*~%C3%A9&p=(x)'"),
            "p=(x)'&q=a%20b%2Fc!*~%C3%A9"
        );
        let sig = compute_signature(&Method::GET, "/x?q=a+b%2Fc!*~%C3%A9", None, EMPTY_KEY);
        assert_eq!(sig, "2d650bee259ba0a522dfae654102344c400708e5");
    }

    #[test]
    fn blank_values_are_kept() {
        assert_eq!(canonical_query("a=&b"), "a=&b=");
        let sig = compute_signature(&Method::GET, "/x?a=&b", None, "key");
        assert_eq!(sig, sha1_hex("GET:/x?a=&b=::key"));
    }

    #[test]
    fn no_query_means_no_question_mark() {
        assert_eq!(canonical_path("http://h/x"), "/x");
        let sig = compute_signature(&Method::GET, "http://h/x", None, "key");
        assert_eq!(sig, sha1_hex("GET:/x::key"));
    }

    #[test]
    fn only_signature_param_leaves_no_query() {
        assert_eq!(canonical_path("/x?_signature=abc"), "/x");
    }

    #[test]
    fn fragment_is_covered() {
        assert_eq!(canonical_path("/x?a=1#frag"), "/x?a=1#frag");
        let sig = compute_signature(&Method::GET, "/x?a=1#frag", None, "key");
        assert_eq!(sig, "e8b81722d36246beaf94fb3884be93505321fb79");
    }

    #[test]
    fn key_and_body_are_sanitized() {
        let sig = compute_signature(&Method::GET, "/x", None, "k$y");
        assert_eq!(sig, sha1_hex("GET:/x::k-y"));

        let sig = compute_signature(&Method::POST, "/x", Some("{\"a\": \"b\\c\"}"), "key");
        assert_eq!(sig, sha1_hex("POST:/x:{\"a\": \"b-c\"}:key"));
    }

    #[test]
    fn attachment_body_is_not_signed() {
        let with_attachment =
            compute_signature(&Method::POST, "/upload?_username=admin", Some("---boundary\nxx"), EMPTY_KEY);
        let without_body = compute_signature(&Method::POST, "/upload?_username=admin", None, EMPTY_KEY);
        assert_eq!(with_attachment, without_body);
        assert_eq!(with_attachment, "a2b94354a6e6b26706b94176cc87b8de625fdc25");
    }

    #[test]
    fn empty_body_matches_absent_body() {
        assert_eq!(
            compute_signature(&Method::POST, "/x", Some(""), "key"),
            compute_signature(&Method::POST, "/x", None, "key"),
        );
    }

    #[test]
    fn non_ascii_characters_become_single_dashes() {
        assert_eq!(sanitize("é%~"), "---");
        assert_eq!(sanitize(r#"{"id": [1, 2]}"#), r#"{"id": [1, 2]}"#);
    }

    // ── Splitting ───────────────────────────────────────────────────

    #[test]
    fn split_absolute_url() {
        assert_eq!(
            SplitUrl::parse("https://user@host:8765/a/b?x=1#top"),
            SplitUrl {
                path: "/a/b",
                query: "x=1",
                fragment: "top",
            }
        );
    }

    #[test]
    fn split_relative_url() {
        assert_eq!(
            SplitUrl::parse("/a?x=1"),
            SplitUrl {
                path: "/a",
                query: "x=1",
                fragment: "",
            }
        );
    }

    #[test]
    fn split_host_without_path() {
        assert_eq!(
            SplitUrl::parse("http://host?x=1"),
            SplitUrl {
                path: "",
                query: "x=1",
                fragment: "",
            }
        );
    }

    #[test]
    fn colon_in_path_is_not_a_scheme() {
        assert_eq!(SplitUrl::parse("/a:b").path, "/a:b");
        assert_eq!(SplitUrl::parse("1a:b").path, "1a:b");
    }
}
