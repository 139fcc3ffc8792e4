use rusqlite::Connection;

use crate::error::CrmResult;

/// Initialize the database schema. Creates the contacts table if it doesn't exist.
pub fn initialize(conn: &Connection) -> CrmResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}
