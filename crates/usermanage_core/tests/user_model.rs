use usermanage_core::{Entity, User, UserType, ValidationError};

fn sample_user() -> User {
    User::new("test-uuid", "John Doe", "john.doe@qt.com", "192.168.1.1", 1).unwrap()
}

#[test]
fn new_user_keeps_values_verbatim() {
    let user = sample_user();

    assert_eq!(user.id(), "test-uuid");
    assert_eq!(user.name(), "John Doe");
    assert_eq!(user.email(), "john.doe@qt.com");
    assert_eq!(user.last_login_address(), "192.168.1.1");
    assert_eq!(user.user_type(), UserType::Regular);
}

#[test]
fn set_name_and_id() {
    let mut user = sample_user();
    user.set_name("Jerry");
    user.set_id("other-uuid".to_string());

    assert_eq!(user.name(), "Jerry");
    assert_eq!(user.id(), "other-uuid");
}

#[test]
fn set_email_accepts_valid_address() {
    let mut user = sample_user();
    user.set_email("lee@example.com").unwrap();
    assert_eq!(user.email(), "lee@example.com");
}

#[test]
fn set_invalid_email_fails_and_keeps_previous_value() {
    let mut user = sample_user();

    let err = user.set_email("invalid").unwrap_err();
    assert_eq!(err, ValidationError::InvalidEmail("invalid".to_string()));
    assert_eq!(user.email(), "john.doe@qt.com");
}

#[test]
fn set_email_accepts_single_trailing_newline_verbatim() {
    let mut user = sample_user();

    user.set_email("lee@example.com\n").unwrap();
    assert_eq!(user.email(), "lee@example.com\n");

    let err = user.set_email("lee@example.com\n\n").unwrap_err();
    assert!(matches!(err, ValidationError::InvalidEmail(_)));
    assert_eq!(user.email(), "lee@example.com\n");
}

#[test]
fn set_last_login_address_accepts_ipv4_and_ipv6() {
    let mut user = sample_user();

    user.set_last_login_address("192.168.1.2").unwrap();
    assert_eq!(user.last_login_address(), "192.168.1.2");

    user.set_last_login_address("2001:db8::ff00:42:8329").unwrap();
    assert_eq!(user.last_login_address(), "2001:db8::ff00:42:8329");
}

#[test]
fn set_invalid_last_login_address_fails_and_keeps_previous_value() {
    let mut user = sample_user();

    let err = user.set_last_login_address("192.invalid").unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidIpAddress("192.invalid".to_string())
    );
    assert_eq!(user.last_login_address(), "192.168.1.1");
}

#[test]
fn set_user_type_accepts_known_codes() {
    let mut user = sample_user();

    for (code, expected) in [
        (1, UserType::Regular),
        (2, UserType::Premium),
        (3, UserType::Admin),
    ] {
        user.set_user_type(code).unwrap();
        assert_eq!(user.user_type(), expected);
        assert_eq!(user.user_type().code(), code);
    }
}

#[test]
fn set_out_of_range_user_type_fails_and_keeps_previous_value() {
    let mut user = sample_user();
    user.set_user_type(2).unwrap();

    for code in [0, 4, -1] {
        let err = user.set_user_type(code).unwrap_err();
        assert_eq!(err, ValidationError::InvalidUserType(code));
        assert_eq!(user.user_type(), UserType::Premium);
    }
}

#[test]
fn constructor_rejects_each_invalid_field() {
    assert!(matches!(
        User::new("id", "n", "nope", "10.0.0.1", 1),
        Err(ValidationError::InvalidEmail(_))
    ));
    assert!(matches!(
        User::new("id", "n", "a@b.cd", "host.example", 1),
        Err(ValidationError::InvalidIpAddress(_))
    ));
    assert!(matches!(
        User::new("id", "n", "a@b.cd", "10.0.0.1", 9),
        Err(ValidationError::InvalidUserType(9))
    ));
}

#[test]
fn serialization_uses_column_names() {
    let user = User::new("u-1", "Xu L", "xul@google.com", "::1", 3).unwrap();

    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["uuid"], "u-1");
    assert_eq!(json["user_name"], "Xu L");
    assert_eq!(json["email"], "xul@google.com");
    assert_eq!(json["last_login_ip"], "::1");
    assert_eq!(json["user_type"], 3);

    let decoded: User = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, user);
}

#[test]
fn deserialize_rejects_invalid_fields() {
    let value = serde_json::json!({
        "uuid": "u-2",
        "user_name": "Bad",
        "email": "bad",
        "last_login_ip": "10.0.0.1",
        "user_type": 1
    });

    let err = serde_json::from_value::<User>(value).unwrap_err();
    assert!(
        err.to_string().contains("invalid email format"),
        "unexpected error: {err}"
    );
}
