//! Provisioning through the real config file, log sink and SQLite store.
//!
//! Kept as the only test in this binary: the log sink installs a global
//! subscriber, which can happen once per process.

use std::fs;

use musannif::cli::{self, Command};
use musannif::lifecycle::{ProductionSubsystems, Shutdown};
use musannif::storage::{Role, SqliteStore, StorageError, UserStore};

#[tokio::test]
async fn test_signup_with_production_subsystems() {
    let dir = tempfile::tempdir().unwrap();
    let logs = dir.path().join("logs");
    let data = dir.path().join("data");
    let config_path = dir.path().join("config.toml");

    fs::write(
        &config_path,
        format!(
            r#"
            [server]
            host = "127.0.0.1"
            port = 0

            [app]
            log_directory = "{}"
            sqlite_directory = "{}"
            environment = "debug"

            [secrets]
            jwt_access_secret = "access"
            jwt_refresh_secret = "refresh"
            "#,
            logs.display(),
            data.display()
        ),
    )
    .unwrap();

    let subsystems = ProductionSubsystems::new(&config_path);
    let command = Command::Signup {
        username: "writer".into(),
        password: "s3cret".into(),
    };

    cli::execute(command, &subsystems, Shutdown::new())
        .await
        .unwrap();

    assert!(logs.join("info.log").exists());
    assert!(logs.join("error.log").exists());

    let store = SqliteStore::open(&data).unwrap();
    let conn = rusqlite::Connection::open(store.path()).unwrap();
    let (hash, role): (String, String) = conn
        .query_row(
            "SELECT password_hash, role FROM users WHERE username = ?1",
            ["writer"],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert!(hash.starts_with("$argon2id$"));
    assert_eq!(role, Role::User.as_str());

    assert!(matches!(
        store.create_user("writer", "other", Role::User),
        Err(StorageError::UserExists(name)) if name == "writer"
    ));
}
