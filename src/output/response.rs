//! The JSON document printed on stdout after a run, and its exit code.
//!
//! `{"success": true, "data": ...}` on success,
//! `{"success": false, "error": {code, message, details, hints?}}` otherwise.

use std::io::{self, Write};

use elementary_init::{Error, ErrorCode, Result};
use serde::Serialize;
use serde_json::{json, Value};

/// Build the envelope for a command result and pick the process exit code.
pub fn envelope<T: Serialize>(result: Result<(T, i32)>) -> (Value, i32) {
    let data = result.and_then(|(data, exit_code)| {
        serde_json::to_value(data)
            .map(|value| (value, exit_code))
            .map_err(|e| Error::internal_json(e.to_string(), Some("serialize response".to_string())))
    });

    match data {
        Ok((data, exit_code)) => (json!({ "success": true, "data": data }), exit_code),
        Err(err) => (error_body(&err), exit_code_for_error(err.code)),
    }
}

fn error_body(err: &Error) -> Value {
    let mut error = json!({
        "code": err.code.as_str(),
        "message": err.message,
        "details": err.details,
    });
    if !err.hints.is_empty() {
        error["hints"] = json!(err.hints);
    }
    json!({ "success": false, "error": error })
}

/// Config and input problems are the caller's to fix; everything else is ours.
pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigInvalidJson
        | ErrorCode::ConfigInvalidValue
        | ErrorCode::ValidationMissingArgument => 2,

        ErrorCode::InternalIoError | ErrorCode::InternalJsonError | ErrorCode::InternalUnexpected => 1,
    }
}

/// Pretty-print `value` on stdout. A closed pipe is not an error.
pub fn print(value: &Value) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|e| Error::internal_json(e.to_string(), Some("serialize response".to_string())))?;

    match writeln!(io::stdout().lock(), "{}", payload) {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_wraps_data_and_keeps_exit_code() {
        let (value, code) = envelope(Ok((json!({ "cleanupDone": true }), 0)));
        assert_eq!(code, 0);
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["cleanupDone"], true);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn validation_errors_exit_with_2() {
        let err = Error::validation_missing_argument(vec!["theme_name".to_string()]);
        let (value, code) = envelope::<()>(Err(err));
        assert_eq!(code, 2);
        assert_eq!(value["error"]["code"], "validation.missing_argument");
    }

    #[test]
    fn internal_errors_exit_with_1() {
        assert_eq!(exit_code_for_error(ErrorCode::InternalIoError), 1);
    }

    #[test]
    fn error_envelope_omits_empty_hints() {
        let (value, _) = envelope::<()>(Err(Error::internal_unexpected("boom")));
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "internal.unexpected");
        assert!(value["error"].get("hints").is_none());
        assert!(value.get("data").is_none());

        let (value, _) = envelope::<()>(Err(Error::internal_unexpected("boom").with_hint("retry")));
        assert_eq!(value["error"]["hints"][0]["message"], "retry");
    }
}
