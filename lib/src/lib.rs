//! Library for kobodb, a tool for keeping the Kobo database at its baseline
//! schema.
//!
//! The main entry point is [`reconcile::reconcile`], which adds missing
//! columns and tables and makes sure the administrative user exists.  It is
//! safe to run repeatedly.

pub mod config;
mod configrefs;
pub mod db;
pub mod inspect;
pub mod reconcile;
pub mod schema;
pub mod types;
