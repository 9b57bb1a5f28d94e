use rusqlite::types::Value;
use usermanage_core::{
    Entity, Mapper, MappingError, Record, User, UserMapper, UserType, ValidationError,
};

fn user_record() -> Record {
    Record::new()
        .with("uuid", "some-uuid-for-test".to_string())
        .with("user_name", "Jerry Li".to_string())
        .with("email", "jerry.li@example.com".to_string())
        .with("last_login_ip", "192.168.1.1".to_string())
        .with("user_type", 1_i64)
}

#[test]
fn map_from_storage_builds_user() {
    let user = UserMapper.map_from_storage(&user_record()).unwrap();

    assert_eq!(user.id(), "some-uuid-for-test");
    assert_eq!(user.name(), "Jerry Li");
    assert_eq!(user.email(), "jerry.li@example.com");
    assert_eq!(user.last_login_address(), "192.168.1.1");
    assert_eq!(user.user_type(), UserType::Regular);
}

#[test]
fn map_from_storage_ignores_storage_only_columns() {
    let record = user_record().with("deleted", 1_i64);
    let user = UserMapper.map_from_storage(&record).unwrap();
    assert_eq!(user.id(), "some-uuid-for-test");
}

#[test]
fn map_to_storage_emits_fixed_columns() {
    let user =
        User::new("other-uuid-for-test", "Xu L", "xul@google.com", "192.168.1.1", 1).unwrap();
    let record = UserMapper.map_to_storage(&user);

    assert_eq!(
        record.columns().collect::<Vec<_>>(),
        vec!["uuid", "user_name", "email", "last_login_ip", "user_type"]
    );
    assert_eq!(
        record.get("uuid"),
        Some(&Value::Text("other-uuid-for-test".to_string()))
    );
    assert_eq!(record.get("user_name"), Some(&Value::Text("Xu L".to_string())));
    assert_eq!(
        record.get("email"),
        Some(&Value::Text("xul@google.com".to_string()))
    );
    assert_eq!(
        record.get("last_login_ip"),
        Some(&Value::Text("192.168.1.1".to_string()))
    );
    assert_eq!(record.get("user_type"), Some(&Value::Integer(1)));
    assert!(!record.contains("deleted"));

    let pairs: Vec<(&str, &Value)> = record.iter().collect();
    assert_eq!(pairs.len(), 5);
    assert_eq!(pairs[4], ("user_type", &Value::Integer(1)));
}

#[test]
fn mapping_round_trip_preserves_every_field() {
    let user = User::new("round-trip", "Ann", "ann@host.net", "fe80::1", 2).unwrap();
    let restored = UserMapper
        .map_from_storage(&UserMapper.map_to_storage(&user))
        .unwrap();
    assert_eq!(restored, user);
}

#[test]
fn missing_column_is_reported() {
    let record: Record = user_record()
        .into_iter()
        .filter(|(column, _)| column != "email")
        .collect();

    let err = UserMapper.map_from_storage(&record).unwrap_err();
    assert_eq!(err, MappingError::MissingColumn("email".to_string()));
}

#[test]
fn mistyped_column_is_reported() {
    let record = user_record().with("user_type", "1".to_string());

    let err = UserMapper.map_from_storage(&record).unwrap_err();
    assert_eq!(
        err,
        MappingError::UnexpectedType {
            column: "user_type".to_string(),
            expected: "integer",
        }
    );
}

#[test]
fn invalid_values_surface_validation_error() {
    let record = user_record().with("last_login_ip", "192.invalid".to_string());

    let err = UserMapper.map_from_storage(&record).unwrap_err();
    assert_eq!(
        err,
        MappingError::Validation(ValidationError::InvalidIpAddress(
            "192.invalid".to_string()
        ))
    );
}
