use rusqlite::Connection;
use usermanage_core::db::schema::latest_version;
use usermanage_core::db::{open_db, ConnectionSource, DbConfig, DbError, SqliteFile};

#[test]
fn open_db_bootstraps_user_table() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(&DbConfig::new(dir.path().join("users.db"))).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "user");
    assert_eq!(
        column_names(&conn, "user"),
        vec![
            "uuid",
            "user_name",
            "email",
            "last_login_ip",
            "user_type",
            "deleted"
        ]
    );
}

#[test]
fn reopening_same_database_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let source = SqliteFile::new(DbConfig::new(dir.path().join("users.db")));
    assert_eq!(source.config().path, dir.path().join("users.db"));

    let first = source.open().unwrap();
    first
        .execute(
            "INSERT INTO user (uuid, user_name, email, last_login_ip, user_type)
             VALUES ('u-1', 'A', 'a@b.cd', '10.0.0.1', 1);",
            [],
        )
        .unwrap();
    drop(first);

    let second = source.open().unwrap();
    assert_eq!(schema_version(&second), latest_version());
    let count: i64 = second
        .query_row("SELECT COUNT(*) FROM user;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn deleted_flag_defaults_to_zero() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(&DbConfig::new(dir.path().join("users.db"))).unwrap();
    conn.execute(
        "INSERT INTO user (uuid, user_name, email, last_login_ip, user_type)
         VALUES ('u-1', 'A', 'a@b.cd', '10.0.0.1', 2);",
        [],
    )
    .unwrap();

    let deleted: i64 = conn
        .query_row("SELECT deleted FROM user WHERE uuid = 'u-1';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(deleted, 0);
}

#[test]
fn bootstrap_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig::new(dir.path().join("bare.db")).with_schema_bootstrap(false);

    let conn = open_db(&config).unwrap();
    assert_eq!(schema_version(&conn), 0);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&DbConfig::new(&path)).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn opening_unreachable_path_returns_sqlite_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("nested").join("users.db");

    let err = open_db(&DbConfig::new(path)).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)), "unexpected error: {err}");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn column_names(conn: &Connection, table_name: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info(\"{table_name}\");"))
        .unwrap();
    stmt.query_map([], |row| row.get::<_, String>("name"))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
