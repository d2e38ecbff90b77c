use askuser_common::auth::parse_authorization;
use askuser_common::error::AskUserError;

#[test]
fn test_parse_bearer_token() {
    let auth = parse_authorization("Bearer alice:assistant-7:topsecret").unwrap();

    assert_eq!(auth.user_id, "alice");
    assert_eq!(auth.ai_id, "assistant-7");
    assert_eq!(auth.key_hint, "cret");
}

#[test]
fn test_parse_without_bearer_prefix() {
    let auth = parse_authorization("alice:assistant-7:topsecret").unwrap();

    assert_eq!(auth.user_id, "alice");
}

#[test]
fn test_prefix_is_case_insensitive_and_repeatable() {
    let auth = parse_authorization("bearer Bearer alice:assistant-7:topsecret").unwrap();

    assert_eq!(auth.user_id, "alice");
    assert_eq!(auth.key_hint, "cret");
}

#[test]
fn test_short_secret_hint_is_whole_secret() {
    let auth = parse_authorization("Bearer alice:ai:xy").unwrap();

    assert_eq!(auth.key_hint, "xy");
}

#[test]
fn test_multibyte_secret_does_not_break_hint() {
    let auth = parse_authorization("Bearer alice:ai:秘密のかぎ").unwrap();

    assert_eq!(auth.key_hint, "密のかぎ");
}

#[test]
fn test_rejects_missing_segments() {
    for header in ["", "Bearer ", "Bearer alice", "Bearer alice:ai", "Bearer ::", "Bearer alice::secret"] {
        let err = parse_authorization(header).unwrap_err();
        assert!(
            matches!(err, AskUserError::InvalidAuthorization),
            "expected InvalidAuthorization for {header:?}"
        );
    }
}

#[test]
fn test_secret_may_contain_colons() {
    let auth = parse_authorization("Bearer alice:ai:sk:live:1234").unwrap();

    assert_eq!(auth.user_id, "alice");
    assert_eq!(auth.ai_id, "ai");
    assert_eq!(auth.key_hint, "1234");
}
