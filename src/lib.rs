// HTTP server modules
pub mod handlers;
pub mod routes;
pub mod state;

pub mod auth;
pub mod error;
pub mod models;
pub mod settings;

// Postgres-backed storage
pub mod db;

// Outbound calls: reachability checks and the agent relay
pub mod upstream;
