//! Tests for the domain error payload.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn forbidden_with_details() -> DomainError {
    DomainError::forbidden("admins only").with_details(json!({"requiredRole": "admin"}))
}

#[rstest]
#[case(DomainError::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(DomainError::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(DomainError::forbidden("no"), ErrorCode::Forbidden)]
#[case(DomainError::not_found("gone"), ErrorCode::NotFound)]
fn shorthands_set_code(#[case] error: DomainError, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case(ErrorCode::Unauthorized, "login required")]
#[case(ErrorCode::NotFound, "not found")]
fn blank_messages_fall_back_to_the_code(#[case] code: ErrorCode, #[case] expected: &str) {
    let err = DomainError::new(code, "   ");
    assert_eq!(err.message(), expected);
}

#[rstest]
fn display_uses_message(forbidden_with_details: DomainError) {
    assert_eq!(forbidden_with_details.to_string(), "admins only");
}

#[rstest]
fn unknown_names_the_missing_record() {
    let err = DomainError::unknown("access request", "1700000000000");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "access request 1700000000000 not found");
    assert_eq!(
        err.details(),
        Some(&json!({"kind": "access request", "id": "1700000000000"}))
    );
}

#[rstest]
fn serializes_snake_case_code_and_details(forbidden_with_details: DomainError) {
    let value = serde_json::to_value(&forbidden_with_details).expect("serialize error");
    assert_eq!(
        value,
        json!({
            "code": "forbidden",
            "message": "admins only",
            "details": {"requiredRole": "admin"}
        })
    );
}

#[rstest]
fn omits_absent_details() {
    let value = serde_json::to_value(DomainError::not_found("gone")).expect("serialize error");
    assert_eq!(value, json!({"code": "not_found", "message": "gone"}));
}

#[rstest]
#[case("invalid_request", ErrorCode::InvalidRequest)]
#[case("forbidden", ErrorCode::Forbidden)]
fn codes_parse_from_their_labels(#[case] label: &str, #[case] expected: ErrorCode) {
    let code: ErrorCode = label.parse().expect("known label");
    assert_eq!(code, expected);
    assert_eq!(code.as_str(), label);
}

#[rstest]
fn unknown_code_labels_are_rejected() {
    let err = "internal_error".parse::<ErrorCode>().expect_err("unknown label");
    assert_eq!(err.to_string(), "unknown error code 'internal_error'");
}
