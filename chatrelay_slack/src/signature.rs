//! Slack request signing (version `v0`).
//!
//! Slack signs every Events API request with
//! `v0=hex(HMAC-SHA256(signing_secret, "v0:{timestamp}:{body}"))`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

const VERSION: &str = "v0";

/// Requests older (or newer) than this are rejected as possible replays.
pub const MAX_CLOCK_SKEW_SECS: i64 = 60 * 5;

fn mac_for(secret: &str, timestamp: &str, body: &[u8]) -> Result<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| Error::InvalidSignature("unusable signing secret"))?;
    mac.update(VERSION.as_bytes());
    mac.update(b":");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);
    Ok(mac)
}

/// Compute the `X-Slack-Signature` value for a request.
pub fn sign(secret: &str, timestamp: &str, body: &[u8]) -> Result<String> {
    let digest = mac_for(secret, timestamp, body)?.finalize().into_bytes();
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{VERSION}={hex}"))
}

/// Check `signature` against the request, with `now` in Unix seconds.
pub fn verify(
    secret: &str,
    timestamp: &str,
    body: &[u8],
    signature: &str,
    now: i64,
) -> Result<()> {
    let sent_at: i64 = timestamp
        .trim()
        .parse()
        .map_err(|_| Error::InvalidSignature("malformed timestamp"))?;
    if now.abs_diff(sent_at) > MAX_CLOCK_SKEW_SECS.unsigned_abs() {
        return Err(Error::StaleRequest);
    }

    let expected = signature
        .strip_prefix("v0=")
        .and_then(decode_hex)
        .ok_or(Error::InvalidSignature("malformed signature"))?;

    mac_for(secret, timestamp.trim(), body)?
        .verify_slice(&expected)
        .map_err(|_| Error::InvalidSignature("signature mismatch"))
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    let pairs = hex.as_bytes().chunks_exact(2);
    if !pairs.remainder().is_empty() {
        return None;
    }
    pairs
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|s| u8::from_str_radix(s, 16).ok())
        })
        .collect()
}
