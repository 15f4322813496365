use crate::schema::{self, ColumnDef, ColumnType, TableDef};
use crate::schema::table::USERS;

pub fn column_type(type_: &ColumnType) -> String {
    match type_ {
        ColumnType::Serial => "SERIAL".to_owned(),
        ColumnType::Text => "TEXT".to_owned(),
        ColumnType::Varchar(n) => format!("VARCHAR({n})"),
        ColumnType::Integer => "INTEGER".to_owned(),
        ColumnType::Boolean => "BOOLEAN".to_owned(),
        ColumnType::Timestamp => "TIMESTAMP".to_owned(),
    }
}

fn column(col: &ColumnDef) -> String {
    schema::column_sql(col, &column_type(&col.type_), true)
}

pub fn create_table(table: &TableDef) -> String {
    schema::create_table_sql(table, column)
}

pub fn add_column(table: &str, col: &ColumnDef) -> String {
    format!("ALTER TABLE {table} ADD COLUMN IF NOT EXISTS {}", column(col))
}

/// `name` must already be a valid identifier; quoting keeps its case.
pub fn create_database(name: &str) -> String {
    format!("CREATE DATABASE \"{}\"", name.replace('"', "\"\""))
}

pub fn insert_user() -> String {
    format!("
        INSERT INTO {USERS} (id, kobo_id, pin, first_name, surname,
                             business_name, country, business_type, role)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT DO NOTHING
    ")
}

#[cfg(test)]
mod tests {
    use crate::schema::{ITEMS, SALES, USERS_ADDED_COLUMNS};
    use super::{add_column, create_database, create_table};

    #[test]
    fn added_columns_are_idempotent_alterations() {
        let stmts: Vec<String> = USERS_ADDED_COLUMNS.iter()
            .map(|c| add_column("users", c))
            .collect();
        assert_eq!(stmts, vec![
            "ALTER TABLE users ADD COLUMN IF NOT EXISTS kobo_id VARCHAR(50) UNIQUE",
            "ALTER TABLE users ADD COLUMN IF NOT EXISTS pin VARCHAR(10)",
            "ALTER TABLE users ADD COLUMN IF NOT EXISTS first_name VARCHAR(100)",
            "ALTER TABLE users ADD COLUMN IF NOT EXISTS surname VARCHAR(100)",
            "ALTER TABLE users ADD COLUMN IF NOT EXISTS business_name VARCHAR(100)",
            "ALTER TABLE users ADD COLUMN IF NOT EXISTS country VARCHAR(50)",
            "ALTER TABLE users ADD COLUMN IF NOT EXISTS role VARCHAR(20) DEFAULT 'user'",
        ]);
    }

    #[test]
    fn items_table() {
        assert_eq!(create_table(&ITEMS), "\
CREATE TABLE IF NOT EXISTS items (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    price INTEGER NOT NULL,
    quantity INTEGER NOT NULL,
    category VARCHAR(50),
    is_service BOOLEAN DEFAULT FALSE,
    user_kobo_id VARCHAR(50),
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)");
    }

    #[test]
    fn sales_table() {
        assert_eq!(create_table(&SALES), "\
CREATE TABLE IF NOT EXISTS sales (
    id SERIAL PRIMARY KEY,
    item_id INTEGER,
    item_name VARCHAR(100),
    quantity INTEGER NOT NULL,
    total INTEGER NOT NULL,
    user_kobo_id VARCHAR(50),
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)");
    }

    #[test]
    fn database_name_is_quoted() {
        assert_eq!(create_database("kobo"), "CREATE DATABASE \"kobo\"");
    }
}
