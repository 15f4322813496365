use std::path::PathBuf;
use crate::config::{ValueRef, parse, validate};
use crate::db::Backend;

pub const DB_BACKEND: ValueRef<'static, Backend> = ValueRef {
    names: &["db", "backend"],
    def: "postgres",
    type_: &parse::BACKEND,
    validators: &[],
};

pub const DB_POSTGRES_HOST: ValueRef<'static, String> = ValueRef {
    names: &["db", "postgres", "host"],
    def: "localhost",
    type_: &parse::STRING,
    validators: &[validate::NON_EMPTY],
};

pub const DB_POSTGRES_PORT: ValueRef<'static, u16> = ValueRef {
    names: &["db", "postgres", "port"],
    def: "5432",
    type_: &parse::PORT,
    validators: &[],
};

pub const DB_POSTGRES_NAME: ValueRef<'static, String> = ValueRef {
    names: &["db", "postgres", "name"],
    def: "kobo",
    type_: &parse::STRING,
    validators: &[validate::SQL_IDENTIFIER],
};

pub const DB_POSTGRES_USER: ValueRef<'static, String> = ValueRef {
    names: &["db", "postgres", "user"],
    def: "postgres",
    type_: &parse::STRING,
    validators: &[validate::NON_EMPTY],
};

pub const DB_POSTGRES_PASSWORD: ValueRef<'static, String> = ValueRef {
    names: &["db", "postgres", "password"],
    def: "",
    type_: &parse::STRING,
    validators: &[],
};

/// Database to connect to when the target database may not exist yet.
pub const DB_POSTGRES_MAINTENANCE_DB: ValueRef<'static, String> = ValueRef {
    names: &["db", "postgres", "maintenance-db"],
    def: "postgres",
    type_: &parse::STRING,
    validators: &[validate::NON_EMPTY],
};

pub const DB_SQLITE_PATH: ValueRef<'static, PathBuf> = ValueRef {
    names: &["db", "sqlite", "db-path"],
    def: "~/.local/share/kobodb/kobo.sqlite",
    type_: &parse::FILE_PATH,
    validators: &[],
};

pub const ADMIN_PIN: ValueRef<'static, String> = ValueRef {
    names: &["admin", "pin"],
    def: "1234",
    type_: &parse::STRING,
    validators: &[validate::PIN],
};
