//! CLI response formatting and output.
//!
//! Provides the JSON envelope, plain-text error printing, and exit code mapping.

use alphafix::error::Hint;
use alphafix::{Error, ErrorCode, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) -> Result<()> {
    use std::io::{self, Write};

    let payload = response.to_json()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", payload) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

pub fn map_cmd_result_to_json<T: Serialize>(
    result: Result<(T, i32)>,
) -> (Result<serde_json::Value>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(data) {
            Ok(value) => (Ok(value), exit_code),
            Err(err) => (
                Err(Error::internal_json(
                    err.to_string(),
                    Some("serialize response".to_string()),
                )),
                1,
            ),
        },
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigInvalidJson
        | ErrorCode::ConfigInvalidValue
        | ErrorCode::ValidationInvalidArgument => 2,

        ErrorCode::InternalIoError
        | ErrorCode::InternalJsonError
        | ErrorCode::InternalUnexpected => 1,
    }
}

pub fn print_json_result(result: Result<serde_json::Value>) -> Result<()> {
    match result {
        Ok(data) => print_response(&CliResponse::success(data)),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}

/// Render an error for text mode. Returns the exit code to use.
pub fn print_text_error(err: &Error) -> i32 {
    eprintln!("{}", format_text_error(err));
    exit_code_for_error(err.code)
}

fn format_text_error(err: &Error) -> String {
    let mut out = format!("error: {} ({})", err.message, err.code.as_str());

    if let Some(problem) = err.details.get("problem").and_then(|v| v.as_str()) {
        out.push_str(&format!("\n  {}", problem));
    }
    if let Some(cause) = err.details.get("error").and_then(|v| v.as_str()) {
        out.push_str(&format!("\n  {}", cause));
    }
    if let Some(context) = err.context() {
        out.push_str(&format!("\n  while: {}", context));
    }
    for hint in &err.hints {
        out.push_str(&format!("\n  hint: {}", hint.message));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_serializes_context() {
        let err = Error::internal_io(
            "stream did not contain valid UTF-8",
            Some("read lib/main.dart".to_string()),
        );

        let json = CliResponse::<()>::from_error(&err).to_json().unwrap();

        assert!(json.contains("\"success\": false"));
        assert!(json.contains("\"code\": \"internal.io_error\""));
        assert!(json.contains("read lib/main.dart"));
        assert!(!json.contains("\"hints\""));
    }

    #[test]
    fn io_error_maps_to_exit_code_1() {
        let err = Error::internal_io("disk full", None);
        let (_value, exit_code) = map_cmd_result_to_json::<serde_json::Value>(Err(err));
        assert_eq!(exit_code, 1);
    }

    #[test]
    fn invalid_path_maps_to_exit_code_2() {
        let err = Error::validation_invalid_argument("path", "'lib' is not a directory", None, None);
        let (_value, exit_code) = map_cmd_result_to_json::<serde_json::Value>(Err(err));
        assert_eq!(exit_code, 2);
    }

    #[test]
    fn success_keeps_command_exit_code() {
        let (value, exit_code) = map_cmd_result_to_json(Ok((serde_json::json!({"n": 1}), 1)));
        assert_eq!(exit_code, 1);
        assert_eq!(value.unwrap()["n"], 1);
    }

    #[test]
    fn text_error_lists_problem_context_and_hints() {
        let err = Error::validation_invalid_argument("path", "'lib' is not a directory", None, None)
            .with_hint("Pass --path <DIR>");
        let text = format_text_error(&err);
        assert!(text.starts_with("error: Invalid argument (validation.invalid_argument)"));
        assert!(text.contains("'lib' is not a directory"));
        assert!(text.contains("hint: Pass --path <DIR>"));

        let io = Error::internal_io("permission denied", Some("write lib/a.dart".to_string()));
        let text = format_text_error(&io);
        assert!(text.contains("permission denied"));
        assert!(text.contains("while: write lib/a.dart"));
    }
}
