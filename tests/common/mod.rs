use std::path::{Path, PathBuf};

use rusqlite::Connection;

/// Builds a small three-table database with one explicit index and
/// enough rows to span multiple pages.
pub fn sample_db(dir: &Path) -> PathBuf {
    let path = dir.join("sample.db");

    let connection = Connection::open(&path).unwrap();

    connection.execute_batch("
        CREATE TABLE users(id INTEGER PRIMARY KEY, name TEXT, email TEXT);
        CREATE TABLE posts(id INTEGER PRIMARY KEY, user_id INTEGER, body TEXT);
        CREATE TABLE tags(id INTEGER PRIMARY KEY, label TEXT);
        CREATE INDEX idx_posts_user ON posts(user_id);
    ").unwrap();

    for i in 0..200 {
        connection.execute(
            "INSERT INTO users(name, email) VALUES (?1, ?2)",
            rusqlite::params![format!("user-{i}"), format!("user-{i}@example.com")]
        ).unwrap();

        connection.execute(
            "INSERT INTO posts(user_id, body) VALUES (?1, ?2)",
            rusqlite::params![i, "lorem ipsum dolor sit amet ".repeat(10)]
        ).unwrap();
    }

    connection.execute("INSERT INTO tags(label) VALUES ('demo')", []).unwrap();

    path
}
