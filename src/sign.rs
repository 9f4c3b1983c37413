//! Signing key derivation and signature assembly.

use crate::hash::{hex_sha256, hmac_sha256};
use crate::time::{format_date, format_iso8601, DateTime};

/// Scope: "20220313/<region>/<service>/aws4_request"
pub(crate) fn credential_scope(now: DateTime, region: &str, service: &str) -> String {
    format!("{}/{}/{}/aws4_request", format_date(now), region, service)
}

/// StringToSign:
///
/// ```text
/// AWS4-HMAC-SHA256
/// 20220313T072004Z
/// 20220313/<region>/<service>/aws4_request
/// <hashed_canonical_request>
/// ```
pub(crate) fn string_to_sign(now: DateTime, scope: &str, canonical_request: &str) -> String {
    format!(
        "AWS4-HMAC-SHA256\n{}\n{}\n{}",
        format_iso8601(now),
        scope,
        hex_sha256(canonical_request.as_bytes())
    )
}

/// Derive the request-scoped signing key. Each step's raw output keys the
/// next HMAC; only the final signature gets hex encoded.
pub(crate) fn generate_signing_key(
    secret: &str,
    now: DateTime,
    region: &str,
    service: &str,
) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(now).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), "aws4_request".as_bytes())
}

/// Authorization header value for a computed signature.
///
/// The signed-header list must be the one canonicalized into the signature,
/// not recomputed from a later header set.
pub(crate) fn authorization_header(
    access_key: &str,
    scope: &str,
    signed_headers: &str,
    signature: &str,
) -> String {
    format!(
        "AWS4-HMAC-SHA256 Credential={access_key}/{scope}, SignedHeaders={signed_headers}, Signature={signature}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hex_hmac_sha256;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    // The key derivation example from the SigV4 documentation.
    const EXAMPLE_SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    fn example_time() -> DateTime {
        chrono::Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap()
    }

    #[test]
    fn test_credential_scope() {
        assert_eq!(
            credential_scope(example_time(), "us-east-1", "iam"),
            "20150830/us-east-1/iam/aws4_request"
        );
    }

    #[test]
    fn test_generate_signing_key_matches_documented_vector() {
        let key = generate_signing_key(EXAMPLE_SECRET, example_time(), "us-east-1", "iam");
        assert_eq!(
            hex::encode(&key),
            "c4afb1cc5771d871763a393e44b703571b55cc28424d1a5e86da6ed3c154a4b9"
        );
    }

    #[test]
    fn test_string_to_sign_and_signature_match_documented_vector() {
        let scope = credential_scope(example_time(), "us-east-1", "iam");
        let sts = string_to_sign(
            example_time(),
            &scope,
            "GET\n\
             /\n\
             Action=ListUsers&Version=2010-05-08\n\
             content-type:application/x-www-form-urlencoded; charset=utf-8\n\
             host:iam.amazonaws.com\n\
             x-amz-date:20150830T123600Z\n\
             \n\
             content-type;host;x-amz-date\n\
             e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        );

        assert_eq!(
            sts,
            "AWS4-HMAC-SHA256\n\
             20150830T123600Z\n\
             20150830/us-east-1/iam/aws4_request\n\
             f536975d06c0309214f805bb90ccff089219ecd68b2577efef23edd43b7e1a59"
        );

        let key = generate_signing_key(EXAMPLE_SECRET, example_time(), "us-east-1", "iam");
        assert_eq!(
            hex_hmac_sha256(&key, sts.as_bytes()),
            "5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
        );
    }

    #[test]
    fn test_authorization_header_layout() {
        let header = authorization_header(
            "AKIDEXAMPLE",
            "20150830/us-east-1/iam/aws4_request",
            "content-type;host;x-amz-date",
            "5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7",
        );
        assert_eq!(
            header,
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/iam/aws4_request, \
             SignedHeaders=content-type;host;x-amz-date, \
             Signature=5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
        );
    }
}
