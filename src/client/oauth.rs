//! OAuth 1.0a request signing (HMAC-SHA1) for the Twitter REST API.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use chrono::Utc;
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::{Rng, distributions::Alphanumeric, thread_rng};
use sha1::Sha1;
use url::Url;

use super::base::ClientError;
use crate::core::config::Credentials;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters stay literal; everything else is escaped.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const NONCE_LEN: usize = 32;


pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}


pub fn generate_nonce() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// Builds the signature base string: method, base URL and the sorted,
/// encoded parameter string, each percent-encoded and joined by `&`.
pub fn signature_base_string(method: &str, url: &Url, params: &[(String, String)]) -> String {
    let mut base_url = url.clone();
    base_url.set_query(None);
    base_url.set_fragment(None);

    let mut encoded: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (encode(&k), encode(&v)))
        .chain(params.iter().map(|(k, v)| (encode(k), encode(v))))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(base_url.as_str()),
        encode(&param_string)
    )
}


#[derive(Debug, Clone)]
pub struct OAuthSigner {
    credentials: Credentials,
}

impl OAuthSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// `Authorization` header value for a request with a fresh nonce and timestamp.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &Url,
        params: &[(String, String)],
    ) -> Result<String, ClientError> {
        self.authorization_header_with(method, url, params, &generate_nonce(), Utc::now().timestamp())
    }


    pub fn authorization_header_with(
        &self,
        method: &str,
        url: &Url,
        params: &[(String, String)],
        nonce: &str,
        timestamp: i64,
    ) -> Result<String, ClientError> {
        let mut oauth_params = vec![
            ("oauth_consumer_key".to_string(), self.credentials.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_token".to_string(), self.credentials.access_token.clone()),
            ("oauth_version".to_string(), "1.0".to_string()),
        ];

        let all_params: Vec<(String, String)> = params.iter().chain(oauth_params.iter()).cloned().collect();
        let base = signature_base_string(method, url, &all_params);
        let signature = self.sign(&base)?;
        oauth_params.push(("oauth_signature".to_string(), signature));
        oauth_params.sort();

        let header = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {header}"))
    }

    fn sign(&self, base: &str) -> Result<String, ClientError> {
        let key = format!(
            "{}&{}",
            encode(&self.credentials.consumer_secret),
            encode(&self.credentials.access_secret)
        );
        let mut mac = <HmacSha1 as Mac>::new_from_slice(key.as_bytes())
            .map_err(|e| ClientError::Signing(e.to_string()))?;
        mac.update(base.as_bytes());
        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }
}
