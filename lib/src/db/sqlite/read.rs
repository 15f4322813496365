use rusqlite::{Connection, named_params};
use crate::db::{DbResult, DbResults};
use crate::schema::table::USERS;
use crate::types::{ColumnInfo, UserSummary};
use super::fromdb::{self, COLUMNS_SQL, USERS_SQL};

pub fn columns(conn: &Connection, table: &str) -> DbResults<ColumnInfo> {
    fromdb::internal_err_fn(|| {
        let mut stmt = conn.prepare(format!("
            SELECT {COLUMNS_SQL} FROM pragma_table_info(:table)
            ORDER BY cid
        ").as_ref())?;
        let rows = stmt.query_map(
            named_params! { ":table": table },
            fromdb::mapper(fromdb::column_info))?;
        rows.collect()
    })
}

pub fn has_column(conn: &Connection, table: &str, column: &str)
-> DbResult<bool> {
    Ok(columns(conn, table)?.iter().any(|c| c.name == column))
}

pub fn count_users(conn: &Connection, kobo_id: &str) -> DbResult<u64> {
    let n: i64 = conn.query_row(format!("
        SELECT COUNT(*) FROM {USERS}
        WHERE kobo_id = :kobo_id
    ").as_ref(), named_params! { ":kobo_id": kobo_id }, |r| r.get(0))
        .map_err(|e| format!("error counting users ({kobo_id}): {e}"))?;
    fromdb::count(n)
}

pub fn recent_users(conn: &Connection, limit: u32) -> DbResults<UserSummary> {
    fromdb::internal_err_fn(|| {
        let mut stmt = conn.prepare(format!("
            SELECT {USERS_SQL} FROM {USERS}
            ORDER BY created_at DESC, rowid DESC
            LIMIT :limit
        ").as_ref())?;
        let rows = stmt.query_map(
            named_params! { ":limit": limit },
            fromdb::mapper(fromdb::user_summary))?;
        rows.collect()
    })
}
