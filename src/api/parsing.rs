use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;

use crate::core::models::WebhookEnvelope;
use crate::errors::BotError;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// HTTP method of an API Gateway event (payload v2, falling back to v1).
pub fn request_method(payload: &Value) -> Option<&str> {
    v_str(payload, &["requestContext", "http", "method"])
        .or_else(|| v_str(payload, &["httpMethod"]))
}

/// Request path of an API Gateway event (payload v2, falling back to v1).
pub fn request_path(payload: &Value) -> Option<&str> {
    v_str(payload, &["rawPath"]).or_else(|| v_str(payload, &["path"]))
}

/// Raw body bytes, undoing API Gateway's base64 wrapping when flagged.
///
/// # Errors
///
/// Returns [`BotError::MalformedEnvelope`] if the body is absent, not a string,
/// or flagged as base64 but not decodable.
pub fn extract_body(payload: &Value) -> Result<Vec<u8>, BotError> {
    let Some(body) = payload.get("body") else {
        return Err(BotError::MalformedEnvelope("missing body".to_string()));
    };

    let Some(body_str) = body.as_str() else {
        return Err(BotError::MalformedEnvelope("body is not a string".to_string()));
    };

    let is_base64 = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if is_base64 {
        BASE64
            .decode(body_str)
            .map_err(|e| BotError::MalformedEnvelope(format!("invalid base64 body: {e}")))
    } else {
        Ok(body_str.as_bytes().to_vec())
    }
}

/// Parses a webhook body. Events keep their delivery order.
///
/// # Errors
///
/// Returns [`BotError::MalformedEnvelope`] if the body isn't a LINE webhook
/// envelope. Message events without a reply token still parse.
pub fn parse_envelope(body: &[u8]) -> Result<WebhookEnvelope, BotError> {
    Ok(serde_json::from_slice(body)?)
}

