use rusqlite::Row;
use crate::db::DbResult;
use crate::types::{ColumnInfo, UserSummary};

pub fn internal_err<T>(r: rusqlite::Result<T>) -> DbResult<T> {
    r.map_err(|e| format!("internal error: {e}"))
}

pub fn internal_err_fn<T, F>(f: F) -> DbResult<T>
where
    F: FnOnce() -> rusqlite::Result<T>
{
    internal_err(f())
}

pub fn row_get<T>(r: &Row, i: usize) -> DbResult<T>
where
    T: rusqlite::types::FromSql
{
    internal_err(r.get(i))
}

/// Adapt a row reader for use with [`rusqlite::Statement::query_map`].
pub fn mapper<T, F>(f: F) -> impl Fn(&Row<'_>) -> rusqlite::Result<T>
where
    F: Fn(&Row<'_>) -> DbResult<T>,
{
    move |r| {
        f(r)
            .map_err(|e| rusqlite::Error::from(
                rusqlite::types::FromSqlError::Other(e.into())))
    }
}

pub fn count(n: i64) -> DbResult<u64> {
    u64::try_from(n).map_err(|_| format!("read invalid row count: {n}"))
}

pub const COLUMNS_SQL: &str = "name, type";

/// for result selected by [`COLUMNS_SQL`]
pub fn column_info(r: &Row) -> DbResult<ColumnInfo> {
    Ok(ColumnInfo {
        name: row_get(r, 0)?,
        type_: row_get(r, 1)?,
    })
}

pub const USERS_SQL: &str = "kobo_id, pin, first_name, surname, role, \
                             created_at";

/// for result selected by [`USERS_SQL`]
pub fn user_summary(r: &Row) -> DbResult<UserSummary> {
    Ok(UserSummary {
        kobo_id: row_get(r, 0)?,
        pin: row_get(r, 1)?,
        first_name: row_get(r, 2)?,
        surname: row_get(r, 3)?,
        role: row_get(r, 4)?,
        created_at: row_get(r, 5)?,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use super::{internal_err, mapper};

    #[test]
    fn mapper_keeps_reader_error() {
        let conn = Connection::open_in_memory().unwrap();
        let r = conn.query_row("SELECT 1", [], mapper(|_| {
            Err::<i64, _>("bad row layout".to_owned())
        }));
        let e = internal_err(r).unwrap_err();
        assert!(e.contains("bad row layout"), "{e}");
    }

    #[test]
    fn mapper_passes_rows_through() {
        let conn = Connection::open_in_memory().unwrap();
        let n: i64 = conn.query_row("SELECT 7", [], mapper(|r| {
            super::row_get(r, 0)
        })).unwrap();
        assert_eq!(n, 7);
    }
}
