//! SQLite-backed wiki store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, named_params, params};

use super::{Result, StoreError};
use crate::category::{MemberEntry, MembershipQuery, Namespace, PagingWindow, Title};

/// Pages and category links in one SQLite database.
pub struct WikiStore {
    conn: Mutex<Connection>,
}

impl WikiStore {
    /// Open (creating if needed) a database file.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(Connection::open(db_path)?),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> Result<Self> {
        let store = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS page (
                page_id INTEGER PRIMARY KEY AUTOINCREMENT,
                page_namespace INTEGER NOT NULL,
                page_title TEXT NOT NULL,
                page_text TEXT NOT NULL DEFAULT '',
                UNIQUE (page_namespace, page_title)
            );

            CREATE TABLE IF NOT EXISTS categorylinks (
                cl_from INTEGER NOT NULL,
                cl_to TEXT NOT NULL,
                cl_sortkey TEXT NOT NULL,
                cl_timestamp INTEGER NOT NULL,
                PRIMARY KEY (cl_from, cl_to),
                FOREIGN KEY (cl_from) REFERENCES page(page_id)
            );

            CREATE INDEX IF NOT EXISTS cl_sortkey ON categorylinks (cl_to, cl_sortkey);
            CREATE INDEX IF NOT EXISTS cl_timestamp ON categorylinks (cl_to, cl_timestamp);",
        )?;
        Ok(())
    }

    /// Insert or update a page, returning its id.
    pub fn save_page(&self, title: &Title, text: &str) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO page (page_namespace, page_title, page_text) VALUES (?1, ?2, ?3)
             ON CONFLICT (page_namespace, page_title) DO UPDATE SET page_text = excluded.page_text",
            params![title.namespace().id(), title.db_key(), text],
        )?;
        let id = conn.query_row(
            "SELECT page_id FROM page WHERE page_namespace = ?1 AND page_title = ?2",
            params![title.namespace().id(), title.db_key()],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// The stored text of a page, if the page exists.
    pub fn page_text(&self, title: &Title) -> Result<Option<String>> {
        let conn = self.conn()?;
        let text = conn
            .query_row(
                "SELECT page_text FROM page WHERE page_namespace = ?1 AND page_title = ?2",
                params![title.namespace().id(), title.db_key()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(text)
    }

    /// Put a page in a category, replacing any earlier link to the same category.
    pub fn add_category_link(
        &self,
        page_id: i64,
        category: &Title,
        sort_key: &str,
        timestamp: i64,
    ) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO categorylinks (cl_from, cl_to, cl_sortkey, cl_timestamp)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (cl_from, cl_to) DO UPDATE
             SET cl_sortkey = excluded.cl_sortkey, cl_timestamp = excluded.cl_timestamp",
            params![page_id, category.db_key(), sort_key, timestamp],
        )?;
        Ok(())
    }

    /// Sort keys of pages linked to both categories, most recently linked
    /// to `category` first.
    pub fn recent_in_both(
        &self,
        category: &Title,
        status: &Title,
        limit: usize,
    ) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT c1.cl_sortkey, c1.cl_timestamp
             FROM categorylinks AS c1
             JOIN categorylinks AS c2 ON c1.cl_from = c2.cl_from
             WHERE c1.cl_to = ?1 AND c2.cl_to = ?2
             ORDER BY c1.cl_timestamp DESC, c1.cl_from DESC
             LIMIT ?3",
        )?;
        let rows = stmt.query_map(
            params![category.db_key(), status.db_key(), limit as i64],
            |row| row.get::<_, String>(0),
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

impl MembershipQuery for WikiStore {
    fn fetch(
        &self,
        category: &Title,
        window: &PagingWindow,
        limit: usize,
    ) -> Result<Vec<MemberEntry>> {
        let (cursor, comparison, order) = match (&window.from, &window.until) {
            (Some(from), _) => (Some(from.as_str()), ">=", "ASC"),
            (None, Some(until)) => (Some(until.as_str()), "<", "DESC"),
            (None, None) => (None, ">=", "ASC"),
        };

        let sql = format!(
            "SELECT p.page_namespace, p.page_title, cl.cl_sortkey
             FROM categorylinks AS cl
             JOIN page AS p ON p.page_id = cl.cl_from
             WHERE cl.cl_to = :category
               AND (:cursor IS NULL OR cl.cl_sortkey {comparison} :cursor)
             ORDER BY cl.cl_sortkey {order}, p.page_title {order}
             LIMIT :limit"
        );

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            named_params! {
                ":category": category.db_key(),
                ":cursor": cursor,
                ":limit": limit as i64,
            },
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )?;

        let mut entries = Vec::new();
        for row in rows {
            let (namespace, key, sort_key) = row?;
            let title = Namespace::from_id(namespace).and_then(|ns| Title::new(ns, &key));
            match title {
                Some(title) => entries.push(MemberEntry::new(title, sort_key)),
                None => tracing::warn!(namespace, key = %key, "skipping member with unusable title"),
            }
        }
        Ok(entries)
    }
}
