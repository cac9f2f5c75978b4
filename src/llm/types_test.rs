use super::*;
use crate::error::ErrorCode;

#[test]
fn error_codes_are_distinct_per_variant() {
    let cases = [
        (LlmError::MissingApiKey { var: "API_KEY".into() }, "E_MISSING_API_KEY"),
        (LlmError::HttpClient("tls".into()), "E_HTTP_CLIENT"),
        (LlmError::Transport("timeout".into()), "E_LLM_TRANSPORT"),
        (LlmError::Status { status: 500, body: "oops".into() }, "E_LLM_STATUS"),
        (LlmError::Decode("json".into()), "E_LLM_DECODE"),
    ];
    for (err, code) in cases {
        assert_eq!(err.error_code(), code);
    }
}

#[test]
fn missing_api_key_names_the_variable() {
    let err = LlmError::MissingApiKey { var: "API_KEY".into() };
    assert_eq!(err.to_string(), "missing API key: env var API_KEY not set");
}

#[test]
fn status_error_hides_body_from_display() {
    let err = LlmError::Status { status: 403, body: "secret detail".into() };
    assert_eq!(err.to_string(), "model returned status 403");
}

#[test]
fn transport_and_server_errors_are_retryable() {
    assert!(LlmError::Transport("conn refused".into()).retryable());
    assert!(LlmError::Status { status: 429, body: String::new() }.retryable());
    assert!(LlmError::Status { status: 503, body: String::new() }.retryable());
}

#[test]
fn client_and_config_errors_are_not_retryable() {
    assert!(!LlmError::Status { status: 400, body: String::new() }.retryable());
    assert!(!LlmError::Status { status: 401, body: String::new() }.retryable());
    assert!(!LlmError::MissingApiKey { var: "API_KEY".into() }.retryable());
    assert!(!LlmError::Decode("eof".into()).retryable());
}
