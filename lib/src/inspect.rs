//! Read-only views of the database.

use crate::db::{Db, DbResult, DbResults};
use crate::types::{ColumnInfo, UserSummary};

pub const DEFAULT_RECENT_USERS: u32 = 5;

/// Columns of a table, or nothing if the table does not exist.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TableInfo {
    Missing { table: String },
    Columns { table: String, columns: Vec<ColumnInfo> },
}

impl TableInfo {
    /// One `"<name>: <type>"` line per column, or a single line saying the
    /// table does not exist.
    pub fn lines(&self) -> Vec<String> {
        match self {
            TableInfo::Missing { table } => vec![format!(
                "Table '{table}' does not exist (or no columns found).")],
            TableInfo::Columns { columns, .. } => columns.iter()
                .map(|c| format!("{}: {}", c.name, c.type_))
                .collect(),
        }
    }
}

pub fn inspect_table(db: &mut dyn Db, table: &str) -> DbResult<TableInfo> {
    let columns = db.columns(table)?;
    let table = table.to_owned();
    if columns.is_empty() {
        Ok(TableInfo::Missing { table })
    } else {
        Ok(TableInfo::Columns { table, columns })
    }
}

pub fn recent_users(db: &mut dyn Db, limit: u32) -> DbResults<UserSummary> {
    db.recent_users(limit)
}
