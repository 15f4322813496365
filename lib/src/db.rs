use crate::config::{self, Config};
use crate::configrefs;
use crate::schema::{ColumnDef, TableDef};
use crate::types::{ColumnInfo, NewUser, UserSummary};

mod pg;
mod sqlite;
pub mod util;

pub type DbResult<T> = Result<T, String>;
pub type DbResults<T> = DbResult<Vec<T>>;
/// Rows affected by each update of a write, in order.
pub type DbWriteResult = DbResults<u64>;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Backend {
    Postgres,
    Sqlite,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DbUpdate<'a> {
    /// Create the table if it does not exist.
    CreateTable { table: &'a TableDef },
    /// Add the column if it does not exist.
    AddColumn { table: &'a str, column: &'a ColumnDef },
    /// Insert the user, unless that would violate a uniqueness constraint.
    InsertUser { user: &'a NewUser },
}

impl<'a> DbUpdate<'a> {
    pub fn create_table(table: &'a TableDef) -> DbUpdate<'a> {
        DbUpdate::CreateTable { table }
    }

    pub fn add_column(table: &'a str, column: &'a ColumnDef) -> DbUpdate<'a> {
        DbUpdate::AddColumn { table, column }
    }

    pub fn insert_user(user: &'a NewUser) -> DbUpdate<'a> {
        DbUpdate::InsertUser { user }
    }
}

/// Outcome of making sure the target database exists.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EnsureOutcome {
    Created,
    AlreadyExists,
}

pub trait Db {
    /// Run all `updates` in a single transaction.
    fn write(&mut self, updates: &[&DbUpdate]) -> DbWriteResult;

    /// Columns of `table` in definition order; empty if there is no such
    /// table.
    fn columns(&mut self, table: &str) -> DbResults<ColumnInfo>;

    fn count_users(&mut self, kobo_id: &str) -> DbResult<u64>;

    /// Most recently created users first.
    fn recent_users(&mut self, limit: u32) -> DbResults<UserSummary>;
}

/// Connect to the database selected by `cfg`.
///
/// The connection is closed when the returned value is dropped.
pub fn open<C>(cfg: &C) -> DbResult<Box<dyn Db>>
where
    C: Config + ?Sized,
{
    match config::get_ref(cfg, &configrefs::DB_BACKEND)? {
        Backend::Postgres => {
            let params = postgres_params(cfg)?;
            Ok(Box::new(pg::open(&params)?))
        }
        Backend::Sqlite => {
            let path = config::get_ref(cfg, &configrefs::DB_SQLITE_PATH)?;
            Ok(Box::new(sqlite::open(&path)?))
        }
    }
}

/// Create the database selected by `cfg` if it does not exist.
pub fn ensure_database<C>(cfg: &C) -> DbResult<EnsureOutcome>
where
    C: Config + ?Sized,
{
    match config::get_ref(cfg, &configrefs::DB_BACKEND)? {
        Backend::Postgres => pg::ensure_database(&postgres_params(cfg)?),
        Backend::Sqlite => {
            let path = config::get_ref(cfg, &configrefs::DB_SQLITE_PATH)?;
            sqlite::ensure_database(&path)
        }
    }
}

/// Human-readable description of the database selected by `cfg`, without
/// credentials.
pub fn describe<C>(cfg: &C) -> DbResult<String>
where
    C: Config + ?Sized,
{
    match config::get_ref(cfg, &configrefs::DB_BACKEND)? {
        Backend::Postgres => {
            let p = postgres_params(cfg)?;
            Ok(format!("postgres://{}@{}:{}/{}",
                       p.user, p.host, p.port, p.dbname))
        }
        Backend::Sqlite => {
            let path = config::get_ref(cfg, &configrefs::DB_SQLITE_PATH)?;
            Ok(format!("sqlite:{}", path.display()))
        }
    }
}

fn postgres_params<C>(cfg: &C) -> DbResult<pg::Params>
where
    C: Config + ?Sized,
{
    Ok(pg::Params {
        host: config::get_ref(cfg, &configrefs::DB_POSTGRES_HOST)?,
        port: config::get_ref(cfg, &configrefs::DB_POSTGRES_PORT)?,
        dbname: config::get_ref(cfg, &configrefs::DB_POSTGRES_NAME)?,
        user: config::get_ref(cfg, &configrefs::DB_POSTGRES_USER)?,
        password: config::get_ref(cfg, &configrefs::DB_POSTGRES_PASSWORD)?,
        maintenance_db: config::get_ref(
            cfg, &configrefs::DB_POSTGRES_MAINTENANCE_DB)?,
    })
}

/// In-memory SQLite database, for tests.
#[cfg(test)]
pub fn open_memory() -> DbResult<Box<dyn Db>> {
    Ok(Box::new(sqlite::open_memory()?))
}
