//! Canonical request construction.
//!
//! Builds the normalized string form of a request that SigV4 hashes and
//! signs. Ordering and encoding here are load-bearing: the verifier
//! recomputes the same string independently and a single byte of drift
//! rejects the request.

use crate::constants::{AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET};
use crate::hash::hex_sha256;
use crate::{Error, Result};
use http::HeaderMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use std::fmt::Write;

/// Percent-encode a path with the strict AWS URI set, keeping `/` as the
/// segment separator.
///
/// The path is decoded first so already-escaped sequences do not get encoded
/// a second time.
pub(crate) fn canonical_uri(path: &str) -> Result<String> {
    let decoded = percent_decode_str(path).decode_utf8().map_err(|e| {
        Error::request_invalid(format!("path {path} is not valid utf-8 after decoding"))
            .with_source(e)
    })?;

    Ok(utf8_percent_encode(&decoded, &AWS_URI_ENCODE_SET).to_string())
}

/// Sorted `key=value` pairs joined with `&`; empty input stays empty.
///
/// Keys sort ascending in byte order. The sort is stable, so duplicate keys
/// keep their insertion order and are not deduplicated. Values take the AWS
/// query encoding; keys are emitted as given.
pub(crate) fn canonical_query_string(params: &[(String, String)]) -> String {
    if params.is_empty() {
        return String::new();
    }

    let mut params: Vec<&(String, String)> = params.iter().collect();
    params.sort_by(|a, b| a.0.cmp(&b.0));

    params
        .iter()
        .map(|(k, v)| format!("{k}={}", utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET)))
        .collect::<Vec<_>>()
        .join("&")
}

/// One `name:value` line per header, sorted by name, every line
/// `\n`-terminated. Values are trimmed of surrounding whitespace.
///
/// `HeaderMap` stores names lower-cased, so byte ordering here is the
/// case-insensitive ordering the signature requires.
pub(crate) fn canonical_headers(headers: &HeaderMap) -> Result<String> {
    let mut s = String::with_capacity(128);
    for name in signed_header_names(headers) {
        let value = headers[name].to_str()?;
        writeln!(s, "{name}:{}", value.trim())?;
    }

    Ok(s)
}

/// Lower-cased header names sorted ascending.
pub(crate) fn signed_header_names(headers: &HeaderMap) -> Vec<&str> {
    let mut names = headers.keys().map(|k| k.as_str()).collect::<Vec<_>>();
    names.sort_unstable();

    names
}

/// Hex SHA256 of the payload. The empty payload hashes to the well-known
/// empty-string digest, never an error.
pub(crate) fn hashed_payload(body: &str) -> String {
    hex_sha256(body.as_bytes())
}

/// Assemble the canonical request:
///
/// ```text
/// <method>
/// <canonical uri>
/// <canonical query string>
/// <canonical headers>
///
/// <signed header names>
/// <hashed payload>
/// ```
pub(crate) fn canonical_request(
    method: &str,
    path: &str,
    params: &[(String, String)],
    headers: &HeaderMap,
    payload: &str,
) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    writeln!(f, "{method}")?;
    writeln!(f, "{}", canonical_uri(path)?)?;
    writeln!(f, "{}", canonical_query_string(params))?;
    // Canonical headers carry their own trailing newline; the writeln after
    // them is the blank separator line.
    write!(f, "{}", canonical_headers(headers)?)?;
    writeln!(f)?;
    writeln!(f, "{}", signed_header_names(headers).join(";"))?;
    write!(f, "{}", hashed_payload(payload))?;

    Ok(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::HeaderName;
    use http::HeaderValue;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn header_name(name: &str) -> HeaderName {
        name.parse().expect("header name must parse")
    }

    #[test_case("/", "/"; "root")]
    #[test_case("/hello/world", "/hello/world"; "plain segments")]
    #[test_case("/hello world", "/hello%20world"; "space escaped")]
    #[test_case("/hello%20world", "/hello%20world"; "no double encoding")]
    #[test_case("/a=b", "/a%3Db"; "reserved characters escaped")]
    fn test_canonical_uri(input: &str, expected: &str) {
        assert_eq!(
            canonical_uri(input).expect("path must canonicalize"),
            expected
        );
    }

    #[test]
    fn test_canonical_query_string_empty() {
        assert_eq!(canonical_query_string(&[]), "");
    }

    #[test]
    fn test_canonical_query_string_sorted() {
        let params = vec![
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "1".to_string()),
        ];
        assert_eq!(canonical_query_string(&params), "a=1&b=2");
    }

    #[test]
    fn test_canonical_query_string_duplicate_keys_keep_insertion_order() {
        let params = vec![
            ("key".to_string(), "second".to_string()),
            ("a".to_string(), "1".to_string()),
            ("key".to_string(), "first".to_string()),
        ];
        assert_eq!(canonical_query_string(&params), "a=1&key=second&key=first");
    }

    #[test]
    fn test_canonical_query_string_encodes_values() {
        let params = vec![("query".to_string(), "TEST QUERY/slash".to_string())];
        assert_eq!(
            canonical_query_string(&params),
            "query=TEST%20QUERY%2Fslash"
        );
    }

    #[test]
    fn test_canonical_headers_sorted_and_terminated() {
        let mut headers = HeaderMap::new();
        headers.insert("x-amz-date", HeaderValue::from_static("20220313T072004Z"));
        headers.insert(
            header_name("Accept"),
            HeaderValue::from_static("application/json"),
        );
        headers.insert("host", HeaderValue::from_static("  example.com  "));

        let canonical = canonical_headers(&headers).expect("headers must canonicalize");
        assert_eq!(
            canonical,
            "accept:application/json\nhost:example.com\nx-amz-date:20220313T072004Z\n"
        );

        let lines: Vec<&str> = canonical.split_terminator('\n').collect();
        let mut sorted = lines.clone();
        sorted.sort_unstable();
        assert_eq!(lines, sorted);
        assert!(canonical.ends_with('\n'));
    }

    #[test]
    fn test_signed_header_names() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header_name("X-Amz-Date"),
            HeaderValue::from_static("20220313T072004Z"),
        );
        headers.insert(header_name("Host"), HeaderValue::from_static("example.com"));
        headers.insert(
            header_name("Accept"),
            HeaderValue::from_static("application/json"),
        );

        assert_eq!(
            signed_header_names(&headers).join(";"),
            "accept;host;x-amz-date"
        );
    }

    #[test]
    fn test_hashed_payload_empty_body() {
        assert_eq!(
            hashed_payload(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_canonical_request_layout() {
        // The GET example from the SigV4 documentation.
        let mut headers = HeaderMap::new();
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=utf-8"),
        );
        headers.insert("host", HeaderValue::from_static("iam.amazonaws.com"));
        headers.insert("x-amz-date", HeaderValue::from_static("20150830T123600Z"));

        let params = vec![
            ("Action".to_string(), "ListUsers".to_string()),
            ("Version".to_string(), "2010-05-08".to_string()),
        ];

        let creq =
            canonical_request("GET", "/", &params, &headers, "").expect("request must canonicalize");
        assert_eq!(
            creq,
            "GET\n\
             /\n\
             Action=ListUsers&Version=2010-05-08\n\
             content-type:application/x-www-form-urlencoded; charset=utf-8\n\
             host:iam.amazonaws.com\n\
             x-amz-date:20150830T123600Z\n\
             \n\
             content-type;host;x-amz-date\n\
             e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        // The documented hash of this canonical request.
        assert_eq!(
            hex_sha256(creq.as_bytes()),
            "f536975d06c0309214f805bb90ccff089219ecd68b2577efef23edd43b7e1a59"
        );
    }
}
