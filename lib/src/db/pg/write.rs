//! Helpers for writing to the database.

use log::debug;
use postgres::GenericClient;
use crate::db::DbResult;
use crate::schema::{ColumnDef, TableDef};
use crate::types::NewUser;
use super::todb;

pub fn create_database(client: &mut impl GenericClient, name: &str)
-> DbResult<()> {
    let sql = todb::create_database(name);
    debug!("{sql}");
    client.batch_execute(&sql)
        .map_err(|e| format!("error creating database ({name}): {e}"))
}

pub fn create_table(client: &mut impl GenericClient, table: &TableDef)
-> DbResult<u64> {
    let sql = todb::create_table(table);
    debug!("{sql}");
    client.batch_execute(&sql)
        .map(|_| 0)
        .map_err(|e| format!("error creating table ({}): {e}", table.name))
}

pub fn add_column(client: &mut impl GenericClient, table: &str, col: &ColumnDef)
-> DbResult<u64> {
    let sql = todb::add_column(table, col);
    debug!("{sql}");
    client.batch_execute(&sql)
        .map(|_| 0)
        .map_err(|e| format!(
            "error adding column ({table}.{}): {e}", col.name))
}

pub fn insert_user(client: &mut impl GenericClient, user: &NewUser)
-> DbResult<u64> {
    client.execute(todb::insert_user().as_str(), &[
        &user.id,
        &user.kobo_id,
        &user.pin,
        &user.first_name,
        &user.surname,
        &user.business_name,
        &user.country,
        &user.business_type,
        &user.role.as_ref(),
    ])
        .map_err(|e| format!("error creating user ({}): {e}", user.kobo_id))
}
