use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::core::models::ImprovementRequest;
use crate::errors::AppError;

/// Decodes an `application/x-www-form-urlencoded` component.
///
/// `+` is turned into a space before percent-decoding so an encoded `%2B`
/// survives as a literal plus sign.
///
/// # Examples
///
/// ```
/// use content_improver::api::parsing::decode_url_component;
///
/// assert_eq!(decode_url_component("hello+world").unwrap(), "hello world");
/// assert_eq!(decode_url_component("1%2B1").unwrap(), "1+1");
/// ```
///
/// # Errors
///
/// Returns an error if the decoded bytes are not valid UTF-8.
pub fn decode_url_component(input: &str) -> Result<String, AppError> {
    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.to_string())
        .map_err(|e| AppError::ParseError(format!("Failed to decode URL component: {e}")))
}

/// Parses a form-encoded body into a field map. Later duplicates win.
///
/// # Errors
///
/// Returns an error if any key or value fails to decode.
pub fn parse_form_data(form_data: &str) -> Result<HashMap<String, String>, AppError> {
    let mut map = HashMap::new();

    for pair in form_data.split('&').filter(|p| !p.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_url_component(raw_key)?;
        let value = decode_url_component(raw_value)?;
        map.insert(key, value);
    }

    Ok(map)
}

/// Builds the proxy input from the `post_content` and `api_key` fields.
#[must_use]
pub fn improvement_request_from_form(form: &HashMap<String, String>) -> ImprovementRequest {
    ImprovementRequest {
        content: form.get("post_content").cloned(),
        api_key: form.get("api_key").cloned(),
    }
}

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

/// Case-insensitive header lookup on the trigger's `headers` object.
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

/// HTTP method of an API Gateway v1/v2 or function URL payload.
pub fn request_method(payload: &Value) -> Option<&str> {
    v_str(payload, &["requestContext", "http", "method"])
        .or_else(|| v_str(payload, &["httpMethod"]))
}

/// Raw request body, base64-decoded when the trigger flagged it.
///
/// A missing body reads as empty.
///
/// # Errors
///
/// Returns an error if the body is not a string or base64 decoding fails.
pub fn extract_body(payload: &Value) -> Result<String, AppError> {
    let body = match payload.get("body") {
        None | Some(Value::Null) => return Ok(String::new()),
        Some(Value::String(s)) => s,
        Some(_) => return Err(AppError::ParseError("Invalid body format".to_string())),
    };

    let is_base64 = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !is_base64 {
        return Ok(body.clone());
    }

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| AppError::ParseError(format!("Invalid base64 body: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::ParseError(format!("Body is not UTF-8: {e}")))
}
