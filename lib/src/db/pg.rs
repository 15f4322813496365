//! PostgreSQL database implementation.

use log::{debug, info};
use postgres::{Client, NoTls};
use crate::db::{DbResult, DbResults, DbUpdate, DbWriteResult, EnsureOutcome};
use crate::types::{ColumnInfo, UserSummary};

mod read;
mod todb;
mod write;

/// Connection parameters.
#[derive(Clone)]
pub struct Params {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
    /// Database connected to when `dbname` may not exist.
    pub maintenance_db: String,
}

/// PostgreSQL [`Db`](crate::db::Db) implementation.
pub struct Db { client: Client }

fn connect(params: &Params, dbname: &str) -> DbResult<Client> {
    let mut cfg = postgres::Config::new();
    cfg.host(&params.host)
        .port(params.port)
        .dbname(dbname)
        .user(&params.user);
    if !params.password.is_empty() {
        cfg.password(&params.password);
    }
    let client = cfg.connect(NoTls)
        .map_err(|e| format!(
            "error connecting to database ({}@{}:{}/{dbname}): {e}",
            params.user, params.host, params.port))?;
    debug!("connected to {}:{}/{dbname}", params.host, params.port);
    Ok(client)
}

pub fn open(params: &Params) -> DbResult<Db> {
    Ok(Db { client: connect(params, &params.dbname)? })
}

pub fn ensure_database(params: &Params) -> DbResult<EnsureOutcome> {
    let mut client = connect(params, &params.maintenance_db)?;
    if read::database_exists(&mut client, &params.dbname)? {
        return Ok(EnsureOutcome::AlreadyExists);
    }
    info!("database {} does not exist, creating", params.dbname);
    write::create_database(&mut client, &params.dbname)?;
    Ok(EnsureOutcome::Created)
}

/// Run a single `update` against the database.
fn write_update(tx: &mut postgres::Transaction, update: &DbUpdate)
-> DbResult<u64> {
    match update {
        DbUpdate::CreateTable { table } => write::create_table(tx, table),
        DbUpdate::AddColumn { table, column } => {
            write::add_column(tx, table, column)
        }
        DbUpdate::InsertUser { user } => write::insert_user(tx, user),
    }
}

impl crate::db::Db for Db {
    fn write(&mut self, updates: &[&DbUpdate]) -> DbWriteResult {
        let mut tx = self.client.transaction()
            .map_err(|e| format!("error writing to database: {e}"))?;

        let counts = updates.iter()
            .map(|update| write_update(&mut tx, update))
            .collect::<DbResults<u64>>()?;

        tx.commit()
            .map_err(|e| format!("error writing to database: {e}"))?;
        Ok(counts)
    }

    fn columns(&mut self, table: &str) -> DbResults<ColumnInfo> {
        read::columns(&mut self.client, table)
    }

    fn count_users(&mut self, kobo_id: &str) -> DbResult<u64> {
        read::count_users(&mut self.client, kobo_id)
    }

    fn recent_users(&mut self, limit: u32) -> DbResults<UserSummary> {
        read::recent_users(&mut self.client, limit)
    }
}
