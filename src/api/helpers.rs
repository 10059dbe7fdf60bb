//! Response builders for the Lambda HTTP trigger.

use serde_json::{Value, json};

/// Returns a response with the given status and a JSON body.
#[must_use]
pub fn json_response(status_code: u16, body: &Value) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": body.to_string()
    })
}

/// Returns a 200 OK response with the given JSON body.
#[must_use]
pub fn ok_json(body: &Value) -> Value {
    json_response(200, body)
}

/// Returns a 200 OK success envelope carrying `data`.
#[must_use]
pub fn ok_envelope(data: &Value) -> Value {
    ok_json(&json!({ "success": true, "data": data }))
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json_response(status_code, &json!({ "error": message }))
}
