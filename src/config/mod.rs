/// Database configuration and connection management
pub mod database;

/// Bootstrap seed data loading from bootstrap.toml
pub mod bootstrap;
