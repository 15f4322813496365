//! SQLite database implementation.

use std::fs;
use std::path::Path;
use log::debug;
use rusqlite::Connection;
use crate::db::{DbResult, DbResults, DbUpdate, DbWriteResult, EnsureOutcome};
use crate::types::{ColumnInfo, UserSummary};

mod fromdb;
mod read;
mod todb;
mod write;

/// SQLite [`Db`](crate::db::Db) implementation.
#[derive(Debug)]
pub struct Db { conn: Connection }

fn create_parent_dir(db_path: &Path) -> DbResult<()> {
    let db_path_parent = db_path.parent()
        .map(|p| if p.as_os_str().is_empty() { Path::new(".") } else { p })
        .unwrap_or(db_path);

    fs::create_dir_all(db_path_parent)
        .map_err(|e| format!("error creating directory ({}): {e}",
                             db_path_parent.display()))
}

/// Connect to the database, creating it if needed.
pub fn open(db_path: &Path) -> DbResult<Db> {
    create_parent_dir(db_path)?;
    let conn = Connection::open(db_path)
        .map_err(|e| format!("error opening database ({}): {e}",
                             db_path.display()))?;
    debug!("opened sqlite database {}", db_path.display());
    Ok(Db { conn })
}

#[cfg(test)]
pub fn open_memory() -> DbResult<Db> {
    let conn = Connection::open_in_memory()
        .map_err(|e| format!("error opening in-memory database: {e}"))?;
    Ok(Db { conn })
}

/// An empty file is a valid empty database, so creating the database means
/// creating the file.
pub fn ensure_database(db_path: &Path) -> DbResult<EnsureOutcome> {
    if db_path.exists() {
        open(db_path)?;
        return Ok(EnsureOutcome::AlreadyExists);
    }
    create_parent_dir(db_path)?;
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(db_path)
        .map_err(|e| format!("error creating database ({}): {e}",
                             db_path.display()))?;
    open(db_path)?;
    Ok(EnsureOutcome::Created)
}

/// Run a single `update` against the database.
fn write_update(conn: &Connection, update: &DbUpdate) -> DbResult<u64> {
    match update {
        DbUpdate::CreateTable { table } => write::create_table(conn, table),
        DbUpdate::AddColumn { table, column } => {
            write::add_column(conn, table, column)
        }
        DbUpdate::InsertUser { user } => write::insert_user(conn, user),
    }
}

impl crate::db::Db for Db {
    fn write(&mut self, updates: &[&DbUpdate]) -> DbWriteResult {
        let tx = self.conn.transaction()
            .map_err(|e| format!("error writing to database: {e}"))?;

        let counts = updates.iter()
            .map(|update| write_update(&tx, update))
            .collect::<DbResults<u64>>()?;

        tx.commit()
            .map_err(|e| format!("error writing to database: {e}"))?;
        Ok(counts)
    }

    fn columns(&mut self, table: &str) -> DbResults<ColumnInfo> {
        read::columns(&self.conn, table)
    }

    fn count_users(&mut self, kobo_id: &str) -> DbResult<u64> {
        read::count_users(&self.conn, kobo_id)
    }

    fn recent_users(&mut self, limit: u32) -> DbResults<UserSummary> {
        read::recent_users(&self.conn, limit)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::{Db as _, DbUpdate};
    use crate::reconcile::reconcile;
    use crate::schema::{self, ColumnDef, ColumnType, TableDef};
    use crate::types::AdminSeed;
    use super::open_memory;

    const WIDGETS: TableDef = TableDef {
        name: "widgets",
        columns: &[
            ColumnDef {
                name: "id",
                type_: ColumnType::Serial,
                primary_key: true,
                not_null: false,
                unique: false,
                default: None,
            },
        ],
    };

    const LABEL: ColumnDef = ColumnDef {
        name: "label",
        type_: ColumnType::Varchar(30),
        primary_key: false,
        not_null: false,
        unique: true,
        default: None,
    };

    #[test]
    fn missing_table_has_no_columns() {
        let mut db = open_memory().unwrap();
        assert!(db.columns("nothing_here").unwrap().is_empty());
    }

    #[test]
    fn add_column_twice_is_a_no_op() {
        let mut db = open_memory().unwrap();
        let create = DbUpdate::create_table(&WIDGETS);
        let add = DbUpdate::add_column(WIDGETS.name, &LABEL);
        db.write(&[&create, &add]).unwrap();
        db.write(&[&create, &add]).unwrap();

        let cols = db.columns(WIDGETS.name).unwrap();
        let names: Vec<&str> = cols.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "label"]);
        assert_eq!(cols[1].type_, "VARCHAR(30)");
    }

    #[test]
    fn existing_column_is_left_without_index() {
        let mut db = open_memory().unwrap();
        let plain = ColumnDef { unique: false, ..LABEL };
        db.write(&[
            &DbUpdate::create_table(&WIDGETS),
            &DbUpdate::add_column(WIDGETS.name, &plain),
        ]).unwrap();
        db.conn.execute_batch("
            INSERT INTO widgets (label) VALUES ('dup');
            INSERT INTO widgets (label) VALUES ('dup');
        ").unwrap();

        assert_eq!(db.write(&[&DbUpdate::add_column(WIDGETS.name, &LABEL)]),
                   Ok(vec![0]));
        db.conn.execute_batch("INSERT INTO widgets (label) VALUES ('dup')")
            .unwrap();
    }

    #[test]
    fn legacy_users_with_duplicate_kobo_ids_reconcile() {
        let mut db = open_memory().unwrap();
        db.write(&[&DbUpdate::create_table(&schema::USERS_BASE)]).unwrap();
        db.conn.execute_batch("
            ALTER TABLE users ADD COLUMN kobo_id VARCHAR(50);
            INSERT INTO users (id, kobo_id) VALUES ('a', 'DUP');
            INSERT INTO users (id, kobo_id) VALUES ('b', 'DUP');
        ").unwrap();

        let report = reconcile(&mut db, &AdminSeed::default()).unwrap();
        assert_eq!(report.schema.added_columns.len(), 6);
        assert_eq!(db.columns(schema::table::USERS).unwrap().len(), 15);
        assert_eq!(db.count_users("DUP").unwrap(), 2);
    }

    #[test]
    fn added_unique_column_is_enforced_by_index() {
        let mut db = open_memory().unwrap();
        db.write(&[
            &DbUpdate::create_table(&WIDGETS),
            &DbUpdate::add_column(WIDGETS.name, &LABEL),
        ]).unwrap();
        db.conn.execute_batch("INSERT INTO widgets (label) VALUES ('a')")
            .unwrap();
        assert!(db.conn
            .execute_batch("INSERT INTO widgets (label) VALUES ('a')")
            .is_err());
    }

    #[test]
    fn failed_write_is_rolled_back() {
        let mut db = open_memory().unwrap();
        let bad = DbUpdate::add_column("no_such_table", &LABEL);
        assert!(db.write(&[&DbUpdate::create_table(&WIDGETS), &bad]).is_err());
        assert!(db.columns(WIDGETS.name).unwrap().is_empty());
    }

    #[test]
    fn conflicting_insert_affects_no_rows() {
        let mut db = open_memory().unwrap();
        db.write(&[&DbUpdate::create_table(&schema::USERS_BASE)]).unwrap();
        let adds: Vec<DbUpdate> = schema::USERS_ADDED_COLUMNS.iter()
            .map(|c| DbUpdate::add_column(schema::table::USERS, c))
            .collect();
        db.write(&adds.iter().collect::<Vec<_>>()).unwrap();

        let first = AdminSeed::default().new_user();
        let second = AdminSeed::default().new_user();
        assert_ne!(first.id, second.id);
        assert_eq!(db.write(&[&DbUpdate::insert_user(&first)]).unwrap(),
                   vec![1]);
        assert_eq!(db.write(&[&DbUpdate::insert_user(&second)]).unwrap(),
                   vec![0]);
        assert_eq!(db.count_users(&first.kobo_id).unwrap(), 1);
    }
}
