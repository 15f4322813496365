use log::debug;
use kobodb::config::Config;
use kobodb::db::{self, EnsureOutcome};
use kobodb::inspect::{self, TableInfo};
use kobodb::reconcile::{self, SeedOutcome};
use crate::output;

fn connect(cfg: &dyn Config) -> Result<Box<dyn db::Db>, String> {
    debug!("connecting to {}", db::describe(cfg)?);
    db::open(cfg)
}

pub fn create_db(cfg: &dyn Config) -> Result<(), String> {
    let target = db::describe(cfg)?;
    match db::ensure_database(cfg)? {
        EnsureOutcome::Created => println!("Database created: {target}"),
        EnsureOutcome::AlreadyExists => {
            println!("Database already exists: {target}")
        }
    }
    Ok(())
}

pub fn setup(cfg: &dyn Config) -> Result<(), String> {
    let seed = reconcile::admin_seed(cfg)?;
    let mut db = connect(cfg)?;
    println!("Connected to database successfully!");

    println!("Updating 'users' table schema...");
    let report = reconcile::reconcile_schema(db.as_mut())?;
    for table in &report.created_tables {
        println!(" - created table {table}");
    }
    for column in &report.added_columns {
        println!(" - added column users.{column}");
    }
    println!("Schema updated successfully.");

    match reconcile::seed_admin(db.as_mut(), &seed)? {
        SeedOutcome::Created { kobo_id, pin } => {
            println!("Admin user created: ID={kobo_id}, PIN={pin}");
        }
        SeedOutcome::AlreadyExists => println!("Admin user already exists."),
    }
    Ok(())
}

pub fn inspect(cfg: &dyn Config, table: &str, yaml: bool)
-> Result<(), String> {
    let mut db = connect(cfg)?;
    if !yaml {
        println!("Connected. Inspecting '{table}' table columns...");
    }
    let info = inspect::inspect_table(db.as_mut(), table)?;
    match (&info, yaml) {
        (TableInfo::Columns { columns, .. }, true) => {
            print!("{}", output::yaml(columns)?);
        }
        (TableInfo::Missing { .. }, _) => {
            for line in info.lines() {
                println!("{line}");
            }
        }
        (TableInfo::Columns { .. }, false) => {
            for line in info.lines() {
                println!(" - {line}");
            }
        }
    }
    Ok(())
}

pub fn verify_users(cfg: &dyn Config, limit: u32, yaml: bool)
-> Result<(), String> {
    let mut db = connect(cfg)?;
    let users = inspect::recent_users(db.as_mut(), limit)?;
    if yaml {
        print!("{}", output::yaml(&users)?);
    } else {
        println!("Recent Users:");
        print!("{}", output::users_table(&users));
    }
    Ok(())
}
