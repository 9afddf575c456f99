//! Slack request signing
//!
//! Slack signs every Events API request with the app's signing secret:
//! `X-Slack-Signature: v0=<hex(hmac_sha256(secret, "v0:{timestamp}:{body}"))>`.

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "x-slack-signature";
pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";

const VERSION: &str = "v0";

/// Requests older (or newer) than this are rejected as replays
pub const DEFAULT_TOLERANCE_SECS: i64 = 5 * 60;

/// Why a request failed verification
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("missing header {0}")]
    MissingHeader(&'static str),

    #[error("malformed header {0}")]
    MalformedHeader(&'static str),

    #[error("request timestamp outside the accepted window")]
    Expired,

    #[error("signature mismatch")]
    Mismatch,
}

/// Verifies `X-Slack-Signature` against the signing secret
#[derive(Clone)]
pub struct SignatureVerifier {
    keyed: HmacSha256,
    tolerance_secs: i64,
}

impl SignatureVerifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, InvalidLength> {
        Ok(Self {
            keyed: <HmacSha256 as Mac>::new_from_slice(secret.as_ref())?,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        })
    }

    /// Check the signing headers of a request against its raw body
    pub fn verify(
        &self,
        headers: &HeaderMap,
        body: &[u8],
        now: DateTime<Utc>,
    ) -> Result<(), SignatureError> {
        let timestamp = header_str(headers, TIMESTAMP_HEADER)?;
        let signature = header_str(headers, SIGNATURE_HEADER)?;

        let issued: i64 = timestamp
            .parse()
            .map_err(|_| SignatureError::MalformedHeader(TIMESTAMP_HEADER))?;
        if (now.timestamp() - issued).abs() > self.tolerance_secs {
            return Err(SignatureError::Expired);
        }

        let expected = signature
            .strip_prefix("v0=")
            .and_then(|digest| hex::decode(digest).ok())
            .ok_or(SignatureError::MalformedHeader(SIGNATURE_HEADER))?;

        // verify_slice compares in constant time
        self.mac(timestamp, body)
            .verify_slice(&expected)
            .map_err(|_| SignatureError::Mismatch)
    }

    /// `v0=<hex>` signature for a timestamp and body
    pub fn sign(&self, timestamp: i64, body: &[u8]) -> String {
        let digest = self.mac(&timestamp.to_string(), body).finalize().into_bytes();
        format!("{VERSION}={}", hex::encode(digest))
    }

    fn mac(&self, timestamp: &str, body: &[u8]) -> HmacSha256 {
        let mut mac = self.keyed.clone();
        mac.update(VERSION.as_bytes());
        mac.update(b":");
        mac.update(timestamp.as_bytes());
        mac.update(b":");
        mac.update(body);
        mac
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("tolerance_secs", &self.tolerance_secs)
            .finish()
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, SignatureError> {
    headers
        .get(name)
        .ok_or(SignatureError::MissingHeader(name))?
        .to_str()
        .map_err(|_| SignatureError::MalformedHeader(name))
}
