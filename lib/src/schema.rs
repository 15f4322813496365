//! Dialect-neutral description of the tables this tool manages.
//!
//! Backends render these definitions to their own SQL; see
//! [`column_sql`] for the parts they share.

pub mod table {
    pub const USERS: &str = "users";
    pub const ITEMS: &str = "items";
    pub const SALES: &str = "sales";
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColumnType {
    /// Auto-generated sequential integer key.
    Serial,
    Text,
    Varchar(u16),
    Integer,
    Boolean,
    Timestamp,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColumnDefault {
    Text(&'static str),
    Bool(bool),
    CurrentTimestamp,
}

impl ColumnDefault {
    pub fn sql(&self) -> String {
        match self {
            ColumnDefault::Text(s) => format!("'{}'", s.replace('\'', "''")),
            ColumnDefault::Bool(true) => "TRUE".to_owned(),
            ColumnDefault::Bool(false) => "FALSE".to_owned(),
            ColumnDefault::CurrentTimestamp => "CURRENT_TIMESTAMP".to_owned(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub type_: ColumnType,
    pub primary_key: bool,
    pub not_null: bool,
    pub unique: bool,
    pub default: Option<ColumnDefault>,
}

impl ColumnDef {
    const fn new(name: &'static str, type_: ColumnType) -> ColumnDef {
        ColumnDef {
            name,
            type_,
            primary_key: false,
            not_null: false,
            unique: false,
            default: None,
        }
    }

    const fn primary_key(self) -> ColumnDef {
        ColumnDef { primary_key: true, ..self }
    }

    const fn not_null(self) -> ColumnDef {
        ColumnDef { not_null: true, ..self }
    }

    const fn unique(self) -> ColumnDef {
        ColumnDef { unique: true, ..self }
    }

    const fn default(self, default: ColumnDefault) -> ColumnDef {
        ColumnDef { default: Some(default), ..self }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
}

use ColumnType::{Boolean, Integer, Serial, Text, Timestamp, Varchar};

/// Layout of `users` as first created, before any reconciliation.
pub const USERS_BASE: TableDef = TableDef {
    name: table::USERS,
    columns: &[
        ColumnDef::new("id", Text).primary_key(),
        ColumnDef::new("owner_name", Text),
        ColumnDef::new("shop_name", Text),
        ColumnDef::new("phone", Text),
        ColumnDef::new("state", Text),
        ColumnDef::new("city", Text),
        ColumnDef::new("business_type", Text),
        ColumnDef::new("created_at", Timestamp)
            .default(ColumnDefault::CurrentTimestamp),
    ],
};

/// Columns added to `users`, in the order they are applied.
pub const USERS_ADDED_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("kobo_id", Varchar(50)).unique(),
    ColumnDef::new("pin", Varchar(10)),
    ColumnDef::new("first_name", Varchar(100)),
    ColumnDef::new("surname", Varchar(100)),
    ColumnDef::new("business_name", Varchar(100)),
    ColumnDef::new("country", Varchar(50)),
    ColumnDef::new("role", Varchar(20)).default(ColumnDefault::Text("user")),
];

/// `user_kobo_id` is a loose reference to `users.kobo_id`; existing data is
/// not guaranteed to satisfy a foreign key.
pub const ITEMS: TableDef = TableDef {
    name: table::ITEMS,
    columns: &[
        ColumnDef::new("id", Serial).primary_key(),
        ColumnDef::new("name", Varchar(100)).not_null(),
        ColumnDef::new("price", Integer).not_null(),
        ColumnDef::new("quantity", Integer).not_null(),
        ColumnDef::new("category", Varchar(50)),
        ColumnDef::new("is_service", Boolean)
            .default(ColumnDefault::Bool(false)),
        ColumnDef::new("user_kobo_id", Varchar(50)),
        ColumnDef::new("created_at", Timestamp)
            .default(ColumnDefault::CurrentTimestamp),
    ],
};

pub const SALES: TableDef = TableDef {
    name: table::SALES,
    columns: &[
        ColumnDef::new("id", Serial).primary_key(),
        ColumnDef::new("item_id", Integer),
        ColumnDef::new("item_name", Varchar(100)),
        ColumnDef::new("quantity", Integer).not_null(),
        ColumnDef::new("total", Integer).not_null(),
        ColumnDef::new("user_kobo_id", Varchar(50)),
        ColumnDef::new("created_at", Timestamp)
            .default(ColumnDefault::CurrentTimestamp),
    ],
};

/// Tables created by reconciliation after `users` has its columns.
pub const DEPENDENT_TABLES: &[&TableDef] = &[&ITEMS, &SALES];

/// Name of the unique constraint or index on a column, matching the name
/// Postgres gives an inline `UNIQUE` constraint.
pub fn unique_key_name(table: &str, column: &str) -> String {
    format!("{table}_{column}_key")
}

/// Render a column definition.
///
/// `type_sql` is the backend's rendering of the column type. `inline_unique`
/// is false where the backend enforces uniqueness some other way.
pub fn column_sql(col: &ColumnDef, type_sql: &str, inline_unique: bool)
-> String {
    let mut sql = format!("{} {type_sql}", col.name);
    if col.primary_key {
        sql.push_str(" PRIMARY KEY");
    }
    if col.not_null {
        sql.push_str(" NOT NULL");
    }
    if col.unique && inline_unique {
        sql.push_str(" UNIQUE");
    }
    if let Some(default) = &col.default {
        sql.push_str(" DEFAULT ");
        sql.push_str(&default.sql());
    }
    sql
}

/// Render `CREATE TABLE IF NOT EXISTS`, with each column rendered by
/// `render`.
pub fn create_table_sql<F>(table: &TableDef, render: F) -> String
where
    F: Fn(&ColumnDef) -> String,
{
    let cols: Vec<String> = table.columns.iter()
        .map(|col| format!("    {}", render(col)))
        .collect();
    format!("CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
            table.name, cols.join(",\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_constraints_in_order() {
        let col = ColumnDef::new("role", Varchar(20))
            .not_null()
            .default(ColumnDefault::Text("user"));
        assert_eq!(column_sql(&col, "VARCHAR(20)", true),
                   "role VARCHAR(20) NOT NULL DEFAULT 'user'");
    }

    #[test]
    fn unique_can_be_left_to_backend() {
        let kobo_id = &USERS_ADDED_COLUMNS[0];
        assert_eq!(column_sql(kobo_id, "VARCHAR(50)", true),
                   "kobo_id VARCHAR(50) UNIQUE");
        assert_eq!(column_sql(kobo_id, "VARCHAR(50)", false),
                   "kobo_id VARCHAR(50)");
    }

    #[test]
    fn text_defaults_are_quoted() {
        assert_eq!(ColumnDefault::Text("o'k").sql(), "'o''k'");
        assert_eq!(ColumnDefault::Bool(false).sql(), "FALSE");
    }

    #[test]
    fn dependent_tables_have_no_foreign_keys() {
        for table in DEPENDENT_TABLES {
            let sql = create_table_sql(table, |c| column_sql(c, "T", true));
            assert!(!sql.contains("REFERENCES"), "{sql}");
            assert!(sql.starts_with(&format!(
                "CREATE TABLE IF NOT EXISTS {} (", table.name)));
        }
    }

    #[test]
    fn unique_key_matches_postgres_naming() {
        assert_eq!(unique_key_name("users", "kobo_id"), "users_kobo_id_key");
    }
}
