use crate::schema::ColumnDef;
use super::{Db, DbResult};

pub fn table_exists(db: &mut dyn Db, table: &str) -> DbResult<bool> {
    Ok(!db.columns(table)?.is_empty())
}

/// The subset of `wanted` that `table` does not have, in the given order.
pub fn missing_columns<'c>(
    db: &mut dyn Db,
    table: &str,
    wanted: &'c [ColumnDef],
) -> DbResult<Vec<&'c ColumnDef>> {
    let existing = db.columns(table)?;
    Ok(wanted.iter()
        .filter(|col| !existing.iter().any(|e| e.name == col.name))
        .collect())
}
