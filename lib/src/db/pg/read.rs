use postgres::{GenericClient, Row};
use postgres::types::FromSql;
use crate::db::{DbResult, DbResults};
use crate::schema::table::USERS;
use crate::types::{ColumnInfo, UserSummary};

fn row_get<'r, T>(r: &'r Row, i: usize) -> DbResult<T>
where
    T: FromSql<'r>,
{
    r.try_get(i).map_err(|e| format!("internal error: {e}"))
}

pub fn database_exists(client: &mut impl GenericClient, name: &str)
-> DbResult<bool> {
    client.query("SELECT 1 FROM pg_database WHERE datname = $1", &[&name])
        .map(|rows| !rows.is_empty())
        .map_err(|e| format!("error checking for database ({name}): {e}"))
}

pub fn columns(client: &mut impl GenericClient, table: &str)
-> DbResults<ColumnInfo> {
    let rows = client.query("
        SELECT column_name::text, data_type::text
        FROM information_schema.columns
        WHERE table_schema = current_schema() AND table_name::text = $1
        ORDER BY ordinal_position
    ", &[&table])
        .map_err(|e| format!("error reading columns ({table}): {e}"))?;
    rows.iter()
        .map(|r| -> DbResult<ColumnInfo> {
            Ok(ColumnInfo { name: row_get(r, 0)?, type_: row_get(r, 1)? })
        })
        .collect()
}

pub fn count_users(client: &mut impl GenericClient, kobo_id: &str)
-> DbResult<u64> {
    let row = client.query_one(format!("
        SELECT COUNT(*) FROM {USERS} WHERE kobo_id = $1
    ").as_str(), &[&kobo_id])
        .map_err(|e| format!("error counting users ({kobo_id}): {e}"))?;
    let n: i64 = row_get(&row, 0)?;
    u64::try_from(n).map_err(|_| format!("read invalid row count: {n}"))
}

pub fn recent_users(client: &mut impl GenericClient, limit: u32)
-> DbResults<UserSummary> {
    let rows = client.query(format!("
        SELECT kobo_id, pin, first_name, surname, role, created_at
        FROM {USERS}
        ORDER BY created_at DESC NULLS LAST
        LIMIT $1
    ").as_str(), &[&i64::from(limit)])
        .map_err(|e| format!("error listing users: {e}"))?;
    rows.iter()
        .map(|r| -> DbResult<UserSummary> { Ok(UserSummary {
            kobo_id: row_get(r, 0)?,
            pin: row_get(r, 1)?,
            first_name: row_get(r, 2)?,
            surname: row_get(r, 3)?,
            role: row_get(r, 4)?,
            created_at: row_get(r, 5)?,
        }) })
        .collect()
}
