use crate::schema::{self, ColumnDef, ColumnType, TableDef};

pub fn column_type(type_: &ColumnType) -> String {
    match type_ {
        // INTEGER PRIMARY KEY aliases the rowid, which is generated
        ColumnType::Serial => "INTEGER".to_owned(),
        ColumnType::Text => "TEXT".to_owned(),
        ColumnType::Varchar(n) => format!("VARCHAR({n})"),
        ColumnType::Integer => "INTEGER".to_owned(),
        ColumnType::Boolean => "BOOLEAN".to_owned(),
        ColumnType::Timestamp => "TIMESTAMP".to_owned(),
    }
}

pub fn create_table(table: &TableDef) -> String {
    schema::create_table_sql(table, |col| {
        schema::column_sql(col, &column_type(&col.type_), true)
    })
}

/// SQLite refuses `UNIQUE` in `ADD COLUMN`; see [`unique_index`].
pub fn add_column(table: &str, col: &ColumnDef) -> String {
    format!("ALTER TABLE {table} ADD COLUMN {}",
            schema::column_sql(col, &column_type(&col.type_), false))
}

pub fn unique_index(table: &str, col: &ColumnDef) -> String {
    format!("CREATE UNIQUE INDEX IF NOT EXISTS {} ON {table} ({})",
            schema::unique_key_name(table, col.name), col.name)
}

#[cfg(test)]
mod tests {
    use crate::schema::{ITEMS, USERS_ADDED_COLUMNS};
    use super::{add_column, create_table, unique_index};

    #[test]
    fn serial_becomes_rowid_alias() {
        let sql = create_table(&ITEMS);
        assert!(sql.contains("id INTEGER PRIMARY KEY,"), "{sql}");
        assert!(sql.contains("is_service BOOLEAN DEFAULT FALSE"), "{sql}");
    }

    #[test]
    fn unique_moves_to_index() {
        let kobo_id = &USERS_ADDED_COLUMNS[0];
        assert_eq!(add_column("users", kobo_id),
                   "ALTER TABLE users ADD COLUMN kobo_id VARCHAR(50)");
        assert_eq!(unique_index("users", kobo_id),
                   "CREATE UNIQUE INDEX IF NOT EXISTS users_kobo_id_key \
                    ON users (kobo_id)");
    }
}
