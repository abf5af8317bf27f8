//! Relational store for users, admins, projects and credentials
//!
//! A thin async layer over PostgreSQL: `tokio-postgres` statements issued
//! through a `deadpool-postgres` pool. Each operation is a single statement,
//! except cascading deletes, which run in one transaction.

pub mod client;
pub mod connection;
pub mod error;
pub mod operations;
pub mod schema;

pub use client::Database;
pub use connection::DatabaseConfig;
pub use error::{Error, Result};
