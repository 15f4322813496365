use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Parser, Subcommand};
use kobodb::config::{self, Config};
use kobodb::inspect::DEFAULT_RECENT_USERS;

mod commands;
mod output;

/// Prefix of environment variables read as configuration, e.g.
/// `KOBO_DB_POSTGRES_PASSWORD` for `db.postgres.password`.
const ENV_PREFIX: &str = "KOBO_";

/// Keep the Kobo database at its baseline schema.
#[derive(Parser, Debug)]
#[command(name = "kobodb", version, about, long_about = None)]
struct Args {
    /// YAML configuration file; environment variables override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the database if it does not exist
    CreateDb,
    /// Add missing columns and tables, and create the admin user if needed
    Setup,
    /// List the columns of a table
    Inspect {
        #[arg(long, default_value = "users")]
        table: String,
        /// Print the columns as YAML
        #[arg(long)]
        yaml: bool,
    },
    /// List the most recently created users
    VerifyUsers {
        #[arg(long, default_value_t = DEFAULT_RECENT_USERS)]
        limit: u32,
        /// Print the users as YAML
        #[arg(long)]
        yaml: bool,
    },
}

fn cfg_factory(args: &Args) -> Result<Box<dyn Config>, String> {
    let mut layers: Vec<Box<dyn Config>> =
        vec![Box::new(config::env::new(ENV_PREFIX))];
    if let Some(path) = &args.config {
        layers.push(Box::new(config::file::new(path)?));
    }
    Ok(Box::new(config::layered::new(layers)))
}

fn run(args: &Args) -> Result<(), String> {
    let cfg = cfg_factory(args)?;
    match &args.command {
        Command::CreateDb => commands::create_db(cfg.as_ref()),
        Command::Setup => commands::setup(cfg.as_ref()),
        Command::Inspect { table, yaml } => {
            commands::inspect(cfg.as_ref(), table, *yaml)
        }
        Command::VerifyUsers { limit, yaml } => {
            commands::verify_users(cfg.as_ref(), *limit, *yaml)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use super::{Args, Command};

    #[test]
    fn args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn inspect_defaults_to_users() {
        let args = Args::try_parse_from(["kobodb", "inspect"]).unwrap();
        match args.command {
            Command::Inspect { table, yaml } => {
                assert_eq!(table, "users");
                assert!(!yaml);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verify_users_limit() {
        let args = Args::try_parse_from(
            ["kobodb", "-c", "kobo.yaml", "verify-users", "--limit", "9"])
            .unwrap();
        assert_eq!(args.config.as_deref(),
                   Some(std::path::Path::new("kobo.yaml")));
        assert!(matches!(args.command,
                         Command::VerifyUsers { limit: 9, yaml: false }));
    }
}
