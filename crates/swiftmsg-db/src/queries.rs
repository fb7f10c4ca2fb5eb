use crate::models::{LanguageCount, MessageRow, Stats};
use crate::{Database, DbError, Result};
use rusqlite::{Connection, params};
use swiftmsg_lang::{DEFAULT_LANGUAGE, LocaleSource, ProcessEnv};
use tracing::debug;

impl Database {
    // -- Writes --

    /// Insert a message, replacing any existing row for (id, lang_code).
    /// `lang_code` is stored as given.
    pub fn add(&self, id: &str, lang_code: &str, content: &str) -> Result<()> {
        if id.is_empty() || lang_code.is_empty() {
            return Err(DbError::validation("id and language code cannot be empty"));
        }

        let now = chrono::Utc::now().timestamp();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO messages (id, lang_code, content, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![id, lang_code, content, now],
            )?;
            Ok(())
        })
    }

    /// Remove every language variant of `id`. Returns the number of rows removed.
    pub fn delete_by_id(&self, id: &str) -> Result<usize> {
        if id.is_empty() {
            return Err(DbError::validation("id cannot be empty"));
        }

        self.with_conn(|conn| Ok(conn.execute("DELETE FROM messages WHERE id = ?1", [id])?))
    }

    /// Remove the single row for (lang_code, id). Returns whether it existed.
    pub fn delete(&self, lang_code: &str, id: &str) -> Result<bool> {
        if id.is_empty() || lang_code.is_empty() {
            return Err(DbError::validation("id and language code cannot be empty"));
        }

        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM messages WHERE lang_code = ?1 AND id = ?2",
                [lang_code, id],
            )?;
            Ok(removed > 0)
        })
    }

    // -- Lookups --

    /// Content of `id` in the language named by `language_hint`, falling back
    /// to English when the requested language has no row.
    pub fn get(&self, language_hint: &str, id: &str) -> Result<String> {
        if id.is_empty() {
            return Err(DbError::validation("id cannot be empty"));
        }

        let code = swiftmsg_lang::resolve(language_hint);
        self.with_conn(|conn| {
            if let Some(content) = query_content(conn, &code, id)? {
                return Ok(content);
            }

            if code != DEFAULT_LANGUAGE {
                debug!("Message '{}' missing for '{}', trying '{}'", id, code, DEFAULT_LANGUAGE);
                if let Some(content) = query_content(conn, DEFAULT_LANGUAGE, id)? {
                    return Ok(content);
                }
            }

            Err(DbError::NotFound {
                id: id.to_string(),
                lang: code,
            })
        })
    }

    /// `get` using the language of the process locale environment.
    pub fn get_system(&self, id: &str) -> Result<String> {
        self.get_system_with(&ProcessEnv, id)
    }

    /// `get` using the locale read from `source`.
    pub fn get_system_with<S: LocaleSource + ?Sized>(&self, source: &S, id: &str) -> Result<String> {
        if id.is_empty() {
            return Err(DbError::validation("id cannot be empty"));
        }

        let lang = swiftmsg_lang::system_language_from(source);
        self.get(&lang, id)
    }

    // -- Listings --

    /// All rows stored under exactly `lang_code`, ordered by id.
    pub fn list_by_language(&self, lang_code: &str) -> Result<Vec<MessageRow>> {
        if lang_code.is_empty() {
            return Err(DbError::validation("language code cannot be empty"));
        }

        self.with_conn(|conn| query_messages_for_language(conn, lang_code))
    }

    /// Every row, ordered by (id, lang_code).
    pub fn list_all(&self) -> Result<Vec<MessageRow>> {
        self.with_conn(query_all_messages)
    }

    /// Row counts overall and per language, read in one transaction.
    pub fn stats(&self) -> Result<Stats> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let total: i64 = tx.query_row("SELECT COUNT(*) FROM messages", [], |r| r.get(0))?;

            let per_language = {
                let mut stmt = tx.prepare(
                    "SELECT lang_code, COUNT(*) FROM messages GROUP BY lang_code ORDER BY lang_code",
                )?;
                stmt.query_map([], |row| {
                    Ok(LanguageCount {
                        lang_code: row.get(0)?,
                        count: row.get::<_, i64>(1)? as u64,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?
            };

            tx.commit()?;
            Ok(Stats {
                total: total as u64,
                per_language,
            })
        })
    }
}

fn query_content(conn: &Connection, lang_code: &str, id: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT content FROM messages WHERE lang_code = ?1 AND id = ?2 LIMIT 1",
        [lang_code, id],
        |row| row.get(0),
    )
    .optional()
}

fn query_messages_for_language(conn: &Connection, lang_code: &str) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, lang_code, content, created_at FROM messages WHERE lang_code = ?1 ORDER BY id",
    )?;

    let rows = stmt
        .query_map([lang_code], map_message_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_all_messages(conn: &Connection) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, lang_code, content, created_at FROM messages ORDER BY id, lang_code",
    )?;

    let rows = stmt
        .query_map([], map_message_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn map_message_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        lang_code: row.get(1)?,
        content: row.get(2)?,
        created_at: row.get(3)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
