//! AWS Signature Version 4 for JSON protocol requests.

use chrono::{DateTime, Utc};
use golem_transcribe::TranscribeError;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

pub struct SigV4Params<'a> {
    pub access_key: &'a str,
    pub secret_key: &'a str,
    pub session_token: Option<&'a str>,
    pub region: &'a str,
    pub service: &'a str,
}

/// Headers to attach to the request once signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub amz_date: String,
    pub authorization: String,
    pub security_token: Option<String>,
    pub signed_headers: String,
}

pub fn hash_sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn hmac_sha256(key: &[u8], data: &str) -> Result<Vec<u8>, TranscribeError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| TranscribeError::Unauthorized(format!("invalid signing key: {e}")))?;
    mac.update(data.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

pub fn derive_signing_key(
    secret: &str,
    date: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, TranscribeError> {
    let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date)?;
    let k_region = hmac_sha256(&k_date, region)?;
    let k_service = hmac_sha256(&k_region, service)?;
    hmac_sha256(&k_service, "aws4_request")
}

/// Signs a request at instant `at`.
///
/// `headers` are the headers to sign besides `x-amz-date` and
/// `x-amz-security-token`, which are added here. `uri` must already be
/// URI-encoded and the query string is taken as empty.
pub fn sign(
    params: &SigV4Params<'_>,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    payload: &[u8],
    at: DateTime<Utc>,
) -> Result<SignedRequest, TranscribeError> {
    let amz_date = at.format("%Y%m%dT%H%M%SZ").to_string();
    let date_stamp = at.format("%Y%m%d").to_string();

    let mut canonical: Vec<(String, String)> = headers
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v.trim().to_string()))
        .collect();
    canonical.push(("x-amz-date".into(), amz_date.clone()));
    if let Some(token) = params.session_token {
        canonical.push(("x-amz-security-token".into(), token.to_string()));
    }
    canonical.sort_by(|a, b| a.0.cmp(&b.0));

    let signed_headers = canonical
        .iter()
        .map(|(k, _)| k.as_str())
        .collect::<Vec<_>>()
        .join(";");
    let canonical_headers = canonical
        .iter()
        .map(|(k, v)| format!("{k}:{v}\n"))
        .collect::<String>();

    let canonical_request = format!(
        "{method}\n{uri}\n\n{canonical_headers}\n{signed_headers}\n{}",
        hash_sha256_hex(payload)
    );
    let credential_scope = format!(
        "{date_stamp}/{}/{}/aws4_request",
        params.region, params.service
    );
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{credential_scope}\n{}",
        hash_sha256_hex(canonical_request.as_bytes())
    );

    let signing_key =
        derive_signing_key(params.secret_key, &date_stamp, params.region, params.service)?;
    let signature = hex::encode(hmac_sha256(&signing_key, &string_to_sign)?);

    Ok(SignedRequest {
        authorization: format!(
            "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={signed_headers}, Signature={signature}",
            params.access_key
        ),
        amz_date,
        security_token: params.session_token.map(str::to_string),
        signed_headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    #[test]
    fn signing_key_matches_published_vector() {
        let key = derive_signing_key(SECRET, "20120215", "us-east-1", "iam").unwrap();
        assert_eq!(
            hex::encode(key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    #[test]
    fn vanilla_get_matches_published_signature() {
        let params = SigV4Params {
            access_key: "AKIDEXAMPLE",
            secret_key: SECRET,
            session_token: None,
            region: "us-east-1",
            service: "service",
        };
        let at = Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap();
        let signed = sign(
            &params,
            "GET",
            "/",
            &[("Host", "example.amazonaws.com")],
            b"",
            at,
        )
        .unwrap();
        assert_eq!(signed.amz_date, "20150830T123600Z");
        assert_eq!(
            signed.authorization,
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/service/aws4_request, \
             SignedHeaders=host;x-amz-date, \
             Signature=5fa00fa31553b73ebf1942676e86291e8372ff2a2260956d9b8aae1d763fbf31"
        );
    }

    #[test]
    fn session_token_is_signed() {
        let params = SigV4Params {
            access_key: "AKIDEXAMPLE",
            secret_key: SECRET,
            session_token: Some("token"),
            region: "eu-west-1",
            service: "transcribe",
        };
        let signed = sign(
            &params,
            "POST",
            "/",
            &[
                ("Content-Type", "application/x-amz-json-1.1"),
                ("Host", "transcribe.eu-west-1.amazonaws.com"),
                ("X-Amz-Target", "Transcribe.ListVocabularies"),
            ],
            b"{}",
            Utc::now(),
        )
        .unwrap();
        assert_eq!(
            signed.signed_headers,
            "content-type;host;x-amz-date;x-amz-security-token;x-amz-target"
        );
        assert_eq!(signed.security_token.as_deref(), Some("token"));
        assert!(signed.authorization.contains("/eu-west-1/transcribe/aws4_request"));
    }
}
