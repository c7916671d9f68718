use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::ClientError;
use crate::http::HttpResponseParts;

pub fn parse_body_json(resp: &HttpResponseParts) -> Option<JsonValue> {
    let s = std::str::from_utf8(&resp.body).ok()?;
    serde_json::from_str(s).ok()
}

fn fallback_message(status: u16) -> String {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("");
    format!("HTTP {status}: {reason}")
}

/// Maps a non-2xx response to a [`ClientError`].
///
/// The body's `error` and `code` fields are used when it is a JSON object;
/// otherwise only the status line is reported.
pub fn error_from_response(resp: &HttpResponseParts) -> ClientError {
    let json = parse_body_json(resp);
    let field = |name: &str| {
        json.as_ref()
            .and_then(|v| v.get(name))
            .and_then(JsonValue::as_str)
            .map(str::to_string)
    };

    ClientError {
        message: field("error").unwrap_or_else(|| fallback_message(resp.status)),
        code: field("code"),
        http_status: Some(resp.status),
    }
}

/// Decodes a 2xx body, reporting any failure as `"{context}: invalid response body: ..."`
/// under `code`.
pub fn decode_success<T: DeserializeOwned>(
    resp: &HttpResponseParts,
    context: &str,
    code: &str,
) -> Result<T, ClientError> {
    serde_json::from_slice(&resp.body).map_err(|e| {
        ClientError::new(format!("{context}: invalid response body: {e}")).with_code(code)
    })
}
