use rusqlite::{params, Connection, OptionalExtension, Result};

pub fn read_record(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM records WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
}

pub fn write_record(conn: &Connection, key: &str, value: &str, updated_at: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO records (key, value, updated_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at",
        params![key, value, updated_at],
    )?;
    Ok(())
}
