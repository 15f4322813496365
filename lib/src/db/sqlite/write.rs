//! Helpers for writing to the database.

use log::debug;
use rusqlite::{Connection, named_params};
use crate::db::DbResult;
use crate::schema::{table::USERS, ColumnDef, TableDef};
use crate::types::NewUser;
use super::{read, todb};

pub fn create_table(conn: &Connection, table: &TableDef) -> DbResult<u64> {
    let sql = todb::create_table(table);
    debug!("{sql}");
    conn.execute_batch(&sql)
        .map(|_| 0)
        .map_err(|e| format!("error creating table ({}): {e}", table.name))
}

pub fn add_column(conn: &Connection, table: &str, col: &ColumnDef)
-> DbResult<u64> {
    // an existing column keeps whatever constraints it already has
    if read::has_column(conn, table, col.name)? {
        return Ok(0);
    }
    let sql = todb::add_column(table, col);
    debug!("{sql}");
    conn.execute_batch(&sql)
        .map_err(|e| format!(
            "error adding column ({table}.{}): {e}", col.name))?;
    if col.unique {
        let sql = todb::unique_index(table, col);
        debug!("{sql}");
        conn.execute_batch(&sql)
            .map_err(|e| format!(
                "error adding unique index ({table}.{}): {e}", col.name))?;
    }
    Ok(0)
}

pub fn insert_user(conn: &Connection, user: &NewUser) -> DbResult<u64> {
    conn.execute(format!("
        INSERT INTO {USERS} (id, kobo_id, pin, first_name, surname,
                             business_name, country, business_type, role)
        VALUES (:id, :kobo_id, :pin, :first_name, :surname,
                :business_name, :country, :business_type, :role)
        ON CONFLICT DO NOTHING
    ").as_ref(), named_params! {
        ":id": user.id,
        ":kobo_id": user.kobo_id,
        ":pin": user.pin,
        ":first_name": user.first_name,
        ":surname": user.surname,
        ":business_name": user.business_name,
        ":country": user.country,
        ":business_type": user.business_type,
        ":role": user.role.as_ref(),
    })
        .map(|n| n as u64)
        .map_err(|e| format!("error creating user ({}): {e}", user.kobo_id))
}
