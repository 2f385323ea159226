//! OAuth 1.0a request signing (HMAC-SHA1, user context).

use crate::config::Credentials;
use crate::types::{PosterError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use uuid::Uuid;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// RFC 3986 encoding: everything but `A-Z a-z 0-9 - . _ ~` is escaped.
pub fn percent_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Compute the base64 HMAC-SHA1 signature for a request.
///
/// `url` must not carry a query string; query and form parameters belong
/// in `params` together with the `oauth_*` fields.
pub fn signature(
    method: &str,
    url: &str,
    params: &[(String, String)],
    consumer_secret: &str,
    token_secret: &str,
) -> Result<String> {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let base = format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&param_string)
    );
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );

    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| PosterError::Signing(e.to_string()))?;
    mac.update(base.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

pub struct OAuthSigner {
    credentials: Credentials,
}

impl OAuthSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// `Authorization` header value with a fresh nonce and timestamp.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        extra_params: &[(String, String)],
    ) -> Result<String> {
        let nonce = Uuid::new_v4().simple().to_string();
        let timestamp = Utc::now().timestamp();
        self.authorization_header_with(method, url, extra_params, &nonce, timestamp)
    }

    pub fn authorization_header_with(
        &self,
        method: &str,
        url: &str,
        extra_params: &[(String, String)],
        nonce: &str,
        timestamp: i64,
    ) -> Result<String> {
        let mut oauth_params = vec![
            ("oauth_consumer_key".to_string(), self.credentials.api_key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_token".to_string(), self.credentials.access_token.clone()),
            ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
        ];

        let mut signed_params = oauth_params.clone();
        signed_params.extend_from_slice(extra_params);
        let sig = signature(
            method,
            url,
            &signed_params,
            &self.credentials.api_secret,
            &self.credentials.access_secret,
        )?;

        oauth_params.push(("oauth_signature".to_string(), sig));
        oauth_params.sort();

        let fields = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("OAuth {}", fields))
    }
}
