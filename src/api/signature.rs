use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{error, warn};

type HmacSha256 = Hmac<Sha256>;

/// Checks `signature` (the `X-Line-Signature` header) against an HMAC-SHA256 of
/// the raw request body keyed by the channel secret.
///
/// The comparison runs in constant time. Malformed base64 or a blank header
/// yields `false` rather than an error.
#[must_use]
pub fn verify(request_body: &[u8], signature: &str, channel_secret: &str) -> bool {
    if signature.is_empty() {
        warn!("Empty X-Line-Signature header");
        return false;
    }

    let Ok(received) = BASE64.decode(signature) else {
        warn!("X-Line-Signature is not valid base64");
        return false;
    };

    let mut mac = match HmacSha256::new_from_slice(channel_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return false;
        }
    };
    mac.update(request_body);

    if mac.verify_slice(&received).is_ok() {
        true
    } else {
        warn!("Signature verification failed");
        false
    }
}

/// Produces the header value LINE would send for `request_body`.
#[must_use]
pub fn compute_signature(request_body: &[u8], channel_secret: &str) -> String {
    let mut mac = match HmacSha256::new_from_slice(channel_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return String::new();
        }
    };
    mac.update(request_body);
    BASE64.encode(mac.finalize().into_bytes())
}
