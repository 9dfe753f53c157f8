//! OAuth 1.0a request signing (HMAC-SHA1)

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

use crate::config::CompleteCredentials;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 percent-encoding: everything but `A-Z a-z 0-9 - . _ ~`
pub(crate) fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Signs requests on behalf of one consumer/token pair
#[derive(Clone, Copy)]
pub struct OAuthSigner<'a> {
    consumer_key: &'a str,
    consumer_secret: &'a str,
    token: &'a str,
    token_secret: &'a str,
}

impl<'a> OAuthSigner<'a> {
    pub fn new(
        consumer_key: &'a str,
        consumer_secret: &'a str,
        token: &'a str,
        token_secret: &'a str,
    ) -> Self {
        Self {
            consumer_key,
            consumer_secret,
            token,
            token_secret,
        }
    }

    pub(crate) fn from_credentials(creds: &CompleteCredentials<'a>) -> Self {
        Self::new(
            creds.api_key,
            creds.api_secret,
            creds.access_token,
            creds.access_token_secret,
        )
    }

    /// `Authorization` header value for a request, with a fresh nonce and
    /// the current time
    pub fn authorization(&self, method: &str, url: &str, params: &[(&str, &str)]) -> String {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.authorization_with(method, url, params, &nonce, &timestamp)
    }

    /// Deterministic variant of [`OAuthSigner::authorization`]
    pub fn authorization_with(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> String {
        let oauth = self.oauth_params(nonce, timestamp);
        let signature = self.signature(method, url, params, &oauth);

        let mut fields: Vec<(&str, &str)> = oauth.to_vec();
        fields.push(("oauth_signature", signature.as_str()));
        fields.sort_unstable();

        let joined = fields
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("OAuth {joined}")
    }

    fn oauth_params<'b>(&'b self, nonce: &'b str, timestamp: &'b str) -> [(&'b str, &'b str); 6] {
        [
            ("oauth_consumer_key", self.consumer_key),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp),
            ("oauth_token", self.token),
            ("oauth_version", "1.0"),
        ]
    }

    /// Base64 HMAC-SHA1 over the signature base string
    pub(crate) fn signature(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        oauth: &[(&str, &str)],
    ) -> String {
        let mut encoded: Vec<(String, String)> = params
            .iter()
            .chain(oauth)
            .map(|(k, v)| (encode(k), encode(v)))
            .collect();
        encoded.sort();

        let param_string = encoded
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let base = format!(
            "{}&{}&{}",
            method.to_ascii_uppercase(),
            encode(url),
            encode(&param_string)
        );
        let key = format!("{}&{}", encode(self.consumer_secret), encode(self.token_secret));

        // HMAC accepts keys of any length
        let Ok(mut mac) = HmacSha1::new_from_slice(key.as_bytes()) else {
            return String::new();
        };
        mac.update(base.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }
}
