//! Bring a database up to the baseline schema and make sure the single
//! administrative user exists.
//!
//! Every step is idempotent, so reconciling is safe to repeat.  Work happens
//! in two transactions: all schema changes first, then the administrative
//! user.  A failure while seeding leaves the committed schema in place.

use log::{debug, info};
use crate::config::{self, Config};
use crate::configrefs;
use crate::db::{util, Db, DbResult, DbUpdate};
use crate::schema::{self, table::USERS};
use crate::types::{AdminSeed, ADMIN_KOBO_ID};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SchemaReport {
    /// Tables that did not exist before.
    pub created_tables: Vec<&'static str>,
    /// Columns `users` was missing before.
    pub added_columns: Vec<&'static str>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SeedOutcome {
    Created { kobo_id: String, pin: String },
    AlreadyExists,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReconcileReport {
    pub schema: SchemaReport,
    pub admin: SeedOutcome,
}

/// Read the administrative user's settings from `cfg`.
pub fn admin_seed<C>(cfg: &C) -> Result<AdminSeed, String>
where
    C: Config + ?Sized,
{
    AdminSeed::new(&config::get_ref(cfg, &configrefs::ADMIN_PIN)?)
}

pub fn reconcile(db: &mut dyn Db, seed: &AdminSeed)
-> DbResult<ReconcileReport> {
    let schema = reconcile_schema(db)?;
    let admin = seed_admin(db, seed)?;
    Ok(ReconcileReport { schema, admin })
}

/// Create missing tables and add missing `users` columns, in one
/// transaction.
pub fn reconcile_schema(db: &mut dyn Db) -> DbResult<SchemaReport> {
    let mut report = SchemaReport::default();
    if !util::table_exists(db, USERS)? {
        report.created_tables.push(USERS);
    }
    report.added_columns = util::missing_columns(
        db, USERS, schema::USERS_ADDED_COLUMNS)?
        .into_iter()
        .map(|col| col.name)
        .collect();
    for table in schema::DEPENDENT_TABLES {
        if !util::table_exists(db, table.name)? {
            report.created_tables.push(table.name);
        }
    }

    let mut updates = vec![DbUpdate::create_table(&schema::USERS_BASE)];
    updates.extend(schema::USERS_ADDED_COLUMNS.iter()
        .map(|col| DbUpdate::add_column(USERS, col)));
    updates.extend(schema::DEPENDENT_TABLES.iter()
        .map(|&table| DbUpdate::create_table(table)));
    let update_refs: Vec<&DbUpdate> = updates.iter().collect();

    debug!("applying {} schema updates", update_refs.len());
    db.write(&update_refs[..])
        .map_err(|e| format!("schema update failed: {e}"))?;
    info!("schema reconciled: created tables {:?}, added columns {:?}",
          report.created_tables, report.added_columns);
    Ok(report)
}

/// Insert the administrative user unless one already exists.
pub fn seed_admin(db: &mut dyn Db, seed: &AdminSeed) -> DbResult<SeedOutcome> {
    if db.count_users(ADMIN_KOBO_ID)? > 0 {
        info!("admin user {ADMIN_KOBO_ID} already exists");
        return Ok(SeedOutcome::AlreadyExists);
    }

    let user = seed.new_user();
    let counts = db.write(&[&DbUpdate::insert_user(&user)])
        .map_err(|e| format!("admin user creation failed: {e}"))?;
    if counts.first() == Some(&1) {
        info!("created admin user {ADMIN_KOBO_ID} (row {})", user.id);
        Ok(SeedOutcome::Created { kobo_id: user.kobo_id, pin: user.pin })
    } else {
        // another run inserted it since the check
        info!("admin user {ADMIN_KOBO_ID} was created concurrently");
        Ok(SeedOutcome::AlreadyExists)
    }
}
