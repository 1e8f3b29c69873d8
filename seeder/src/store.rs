//! Access to the monitoring app's `monitor` table.
//!
//! The table belongs to the app; this module only reads, inserts and deletes
//! rows and never issues DDL.

use crate::error::SeedError;
use crate::types::{
    NewMonitor, MONITOR_ACCEPTED_STATUS_CODES, MONITOR_DNS_RESOLVE_SERVER,
    MONITOR_DNS_RESOLVE_TYPE, MONITOR_HTTP_BODY_ENCODING, MONITOR_INTERVAL_SECS,
    MONITOR_MAX_REDIRECTS, MONITOR_MAX_RETRIES, MONITOR_METHOD, MONITOR_PACKET_SIZE,
    MONITOR_RESEND_INTERVAL, MONITOR_RETRY_INTERVAL_SECS, MONITOR_TYPE, MONITOR_WEIGHT,
};
use anyhow::{Context, Result};
use rusqlite::{named_params, Connection, OpenFlags, OptionalExtension};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const INSERT_MONITOR_SQL: &str = "INSERT INTO monitor (
    name, description, active, user_id, interval, url, type, weight,
    keyword, maxretries, retry_interval, resend_interval, timeout,
    ignore_tls, upside_down, maxredirects, accepted_statuscodes_json,
    dns_resolve_type, dns_resolve_server, method, http_body_encoding,
    expiry_notification, packet_size, created_date
) VALUES (
    :name, :description, 1, :user_id, :interval, :url, :type, :weight,
    :keyword, :maxretries, :retry_interval, :resend_interval, :timeout,
    0, 0, :maxredirects, :accepted_statuscodes_json,
    :dns_resolve_type, :dns_resolve_server, :method, :http_body_encoding,
    0, :packet_size, :created_date
)";

/// Exclusive handle on the monitor database for the length of one run.
/// Dropping it closes the connection.
#[derive(Debug)]
pub struct MonitorStore {
    conn: Connection,
}

impl MonitorStore {
    /// Opens an existing database read-write. Never creates the file.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SeedError::MissingDatabase {
                path: path.to_path_buf(),
            }
            .into());
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("open monitor database at {}", path.display()))?;
        // Fail on a locked file straight away instead of rusqlite's 5s wait.
        conn.busy_timeout(Duration::ZERO)
            .context("disable busy timeout on monitor database")?;
        debug!(path = %path.display(), "opened monitor database");

        Ok(Self { conn })
    }

    /// Id of the row whose `url` is byte-equal to `url`, if any.
    pub fn find_by_url(&self, url: &str) -> Result<Option<i64>> {
        self.conn
            .query_row(
                "SELECT id FROM monitor WHERE url = ?1 LIMIT 1",
                [url],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("look up monitor with url {url}"))
    }

    pub fn insert(&self, monitor: &NewMonitor) -> Result<i64> {
        self.conn
            .execute(
                INSERT_MONITOR_SQL,
                named_params! {
                    ":name": monitor.name,
                    ":description": monitor.description,
                    ":user_id": monitor.owner_id,
                    ":interval": MONITOR_INTERVAL_SECS,
                    ":url": monitor.url,
                    ":type": MONITOR_TYPE,
                    ":weight": MONITOR_WEIGHT,
                    ":keyword": monitor.keyword,
                    ":maxretries": MONITOR_MAX_RETRIES,
                    ":retry_interval": MONITOR_RETRY_INTERVAL_SECS,
                    ":resend_interval": MONITOR_RESEND_INTERVAL,
                    ":timeout": monitor.timeout_secs,
                    ":maxredirects": MONITOR_MAX_REDIRECTS,
                    ":accepted_statuscodes_json": MONITOR_ACCEPTED_STATUS_CODES,
                    ":dns_resolve_type": MONITOR_DNS_RESOLVE_TYPE,
                    ":dns_resolve_server": MONITOR_DNS_RESOLVE_SERVER,
                    ":method": MONITOR_METHOD,
                    ":http_body_encoding": MONITOR_HTTP_BODY_ENCODING,
                    ":packet_size": MONITOR_PACKET_SIZE,
                    ":created_date": monitor.created_date
                },
            )
            .with_context(|| format!("insert monitor '{}'", monitor.name))?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Deletes every row whose `url` starts with `prefix`. Exact prefix match,
    /// so `%` and `_` in the prefix are literals and case is significant.
    pub fn delete_by_url_prefix(&self, prefix: &str) -> Result<usize> {
        self.conn
            .execute(
                "DELETE FROM monitor WHERE substr(url, 1, length(?1)) = ?1",
                [prefix],
            )
            .with_context(|| format!("delete monitors under {prefix}"))
    }

    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM monitor", [], |row| row.get(0))
            .context("count monitors")?;
        Ok(count.max(0) as u64)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{insert_foreign, kuma_db, urls};
    use super::*;
    use crate::types::MonitorDefinition;
    use chrono::Utc;

    fn row(name: &'static str, path: &'static str) -> NewMonitor {
        NewMonitor::from_definition(
            &MonitorDefinition::new(name, path, "test"),
            "http://x/",
            1,
            48,
            Utc::now(),
        )
    }

    #[test]
    fn open_refuses_missing_file_and_does_not_create_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");

        let err = MonitorStore::open(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SeedError>(),
            Some(SeedError::MissingDatabase { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn insert_then_find_by_exact_url() -> Result<()> {
        let (_dir, path) = kuma_db();
        let store = MonitorStore::open(&path)?;

        let id = store.insert(&row("Always Up", "/always-up"))?;
        assert_eq!(store.find_by_url("http://x/always-up")?, Some(id));
        assert_eq!(store.find_by_url("http://x/always-up/")?, None);
        assert_eq!(store.find_by_url("HTTP://X/always-up")?, None);
        assert_eq!(store.count()?, 1);
        Ok(())
    }

    #[test]
    fn insert_writes_fixed_columns_and_null_keyword() -> Result<()> {
        let (_dir, path) = kuma_db();
        let store = MonitorStore::open(&path)?;
        store.insert(&row("Always Up", "/always-up"))?;

        let (active, interval, kind, method, keyword, timeout, codes): (
            bool,
            i64,
            String,
            String,
            Option<String>,
            f64,
            String,
        ) = store.conn.query_row(
            "SELECT active, interval, type, method, keyword, timeout, accepted_statuscodes_json
             FROM monitor",
            [],
            |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                    r.get(5)?,
                    r.get(6)?,
                ))
            },
        )?;
        assert!(active);
        assert_eq!(interval, 60);
        assert_eq!(kind, "http");
        assert_eq!(method, "GET");
        assert_eq!(keyword, None);
        assert_eq!(timeout, 48.0);
        assert_eq!(codes, r#"["200-299"]"#);
        Ok(())
    }

    #[test]
    fn prefix_delete_leaves_lookalike_urls() -> Result<()> {
        let (_dir, path) = kuma_db();
        insert_foreign(&path, "mine", "http://x/a");
        insert_foreign(&path, "sibling host", "http://xyz/a");
        insert_foreign(&path, "other case", "HTTP://X/b");
        insert_foreign(&path, "wildcard bait", "http://x_/c");

        let store = MonitorStore::open(&path)?;
        assert_eq!(store.delete_by_url_prefix("http://x/")?, 1);
        drop(store);

        assert_eq!(
            urls(&path),
            vec!["http://xyz/a", "HTTP://X/b", "http://x_/c"]
        );
        Ok(())
    }

    #[test]
    fn prefix_with_like_wildcards_is_literal() -> Result<()> {
        let (_dir, path) = kuma_db();
        insert_foreign(&path, "a", "http://a%b/x");
        insert_foreign(&path, "b", "http://aXb/x");

        let store = MonitorStore::open(&path)?;
        assert_eq!(store.delete_by_url_prefix("http://a%b/")?, 1);
        assert_eq!(store.count()?, 1);
        Ok(())
    }
}
