use rusqlite::Connection;
use tracing::info;

use crate::Result;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);"
    )?;

    let version: i64 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Message DB: running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS messages (
                id          TEXT NOT NULL,
                lang_code   TEXT NOT NULL,
                content     TEXT NOT NULL,
                created_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
                PRIMARY KEY (id, lang_code)
            );

            CREATE INDEX IF NOT EXISTS idx_lang_id
                ON messages(lang_code, id);

            INSERT INTO schema_version (version) VALUES (1);
            "
        )?;
    }

    Ok(())
}
