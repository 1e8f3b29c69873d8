//! Removal of every monitor this tool could have created.
//!
//! Ownership is structural: a row is ours if its URL sits under the
//! configured base URL. The catalogue is not consulted, so rows seeded from an
//! older catalogue are removed too.

use crate::store::MonitorStore;
use crate::types::managed_prefix;
use anyhow::Result;
use tracing::info;

/// Deletes all rows under `base_url` and returns how many went.
pub fn clear(store: &MonitorStore, base_url: &str) -> Result<usize> {
    let prefix = managed_prefix(base_url);
    let deleted = store.delete_by_url_prefix(&prefix)?;
    info!(%prefix, deleted, "cleared seeded monitors");
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::{insert_foreign, insert_foreign_owned, kuma_db, rows};

    fn row(name: &str, user_id: i64, url: &str) -> (String, i64, String) {
        (name.to_string(), user_id, url.to_string())
    }

    #[test]
    fn clear_removes_only_rows_under_base() -> Result<()> {
        let (_dir, path) = kuma_db();
        insert_foreign(&path, "seeded a", "http://x/always-up");
        insert_foreign_owned(&path, "prod", "https://example.com/health", 2);
        insert_foreign(&path, "seeded b", "http://x/keyword/present");
        insert_foreign_owned(&path, "same owner, other host", "http://x.internal/ping", 7);

        let store = MonitorStore::open(&path)?;
        assert_eq!(clear(&store, "http://x/")?, 2);
        assert_eq!(store.count()?, 2);
        drop(store);

        assert_eq!(
            rows(&path),
            vec![
                row("prod", 2, "https://example.com/health"),
                row("same owner, other host", 7, "http://x.internal/ping"),
            ]
        );
        Ok(())
    }

    #[test]
    fn base_without_trailing_slash_does_not_overmatch() -> Result<()> {
        let (_dir, path) = kuma_db();
        insert_foreign(&path, "ours", "http://x/always-up");
        insert_foreign(&path, "theirs", "http://xyz/always-up");

        let store = MonitorStore::open(&path)?;
        assert_eq!(clear(&store, "http://x")?, 1);
        drop(store);

        assert_eq!(rows(&path), vec![row("theirs", 1, "http://xyz/always-up")]);
        Ok(())
    }

    #[test]
    fn clear_on_empty_table_is_a_no_op() -> Result<()> {
        let (_dir, path) = kuma_db();
        let store = MonitorStore::open(&path)?;
        assert_eq!(clear(&store, "http://x/")?, 0);
        Ok(())
    }
}
